//! Scanning a complete single-file component.

use pretty_assertions::assert_eq;
use px_scanner::{Markers, RegexScanner, Scanner};

const COMPONENT: &str = r#"<script setup lang="ts">
const width = '300px'
</script>

<template>
  <section style="padding: 24px 32px; border-width: 1px">
    <h1 :style="{ fontSize: '36px', lineHeight: '48px' }">Title</h1>
    <img style="width: 50%" />
  </section>
</template>

<style scoped>
section { margin: 8px; }
</style>
"#;

#[test]
fn scans_only_inside_the_template() {
    let scanner = RegexScanner::new(&Markers::default(), "px").unwrap();
    let region = scanner.locate_region(COMPONENT).unwrap();

    assert!(region.text.starts_with("<template>"));
    assert!(region.text.ends_with("</template>"));

    let found: Vec<_> = scanner
        .locate_declarations(region.text)
        .into_iter()
        .map(|d| (d.property, d.value))
        .collect();

    assert_eq!(
        found,
        vec![
            ("padding", "24px 32px"),
            ("border-width", "1px"),
            ("fontSize", "36px"),
            ("lineHeight", "48px"),
        ]
    );
}

#[test]
fn token_ranges_index_the_value() {
    let scanner = RegexScanner::new(&Markers::default(), "px").unwrap();
    let value = "24px 32px";
    let tokens = scanner.locate_tokens(value);

    let sliced: Vec<_> = tokens.iter().map(|t| &value[t.range]).collect();
    assert_eq!(sliced, vec!["24px", "32px"]);
}
