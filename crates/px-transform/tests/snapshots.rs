//! End-to-end rewriting of Vue single-file components.

use pretty_assertions::assert_eq;
use px_transform::{transform_document, Markers, Options, Target, ViewportWidth};

fn transform(source: &str, options: &Options) -> String {
    transform_document(source, "src/components/Card.vue", options, &Target::default())
        .expect("document should be transformed")
}

#[test]
fn test_letter_spacing_excluded_default_precision() {
    let options = Options {
        prop_list: vec!["*".into(), "!letter-spacing".into()],
        ..Default::default()
    };
    let output = transform(
        r#"<template><div style="width: 100px; letter-spacing: 2px;"></div></template>"#,
        &options,
    );
    insta::assert_snapshot!(output, @r#"<template><div style="width: 13.33333vw; letter-spacing: 2px;"></div></template>"#);
}

#[test]
fn test_letter_spacing_excluded_precision_two() {
    let options = Options {
        prop_list: vec!["*".into(), "!letter-spacing".into()],
        unit_precision: 2,
        ..Default::default()
    };
    let output = transform(
        r#"<template><div style="width: 100px; letter-spacing: 2px;"></div></template>"#,
        &options,
    );
    insta::assert_snapshot!(output, @r#"<template><div style="width: 13.33vw; letter-spacing: 2px;"></div></template>"#);
}

#[test]
fn test_full_component() {
    let source = r#"<script setup>
const size = 32
</script>

<template>
  <section style="padding: 24px 36px; border: 1px solid #000">
    <h1 :style="{ fontSize: '36px', marginBottom: '12px' }">Title</h1>
  </section>
</template>

<style scoped>
section { padding: 24px; }
</style>
"#;
    let options = Options {
        viewport_width: ViewportWidth::Fixed(375.0),
        unit_precision: 3,
        prop_list: vec!["*".into(), "!font*".into()],
        ..Default::default()
    };

    let expected = r#"<script setup>
const size = 32
</script>

<template>
  <section style="padding: 6.4vw 9.6vw; border: 1px solid #000">
    <h1 :style="{ fontSize: '36px', marginBottom: '3.2vw' }">Title</h1>
  </section>
</template>

<style scoped>
section { padding: 24px; }
</style>
"#;
    assert_eq!(transform(source, &options), expected);
}

#[test]
fn test_per_document_viewport_width() {
    let options = Options {
        viewport_width: ViewportWidth::per_document(|id| {
            if id.contains("/mobile/") {
                375.0
            } else {
                1920.0
            }
        }),
        unit_precision: 2,
        ..Default::default()
    };
    let source = r#"<template><div style="width: 96px"></div></template>"#;
    let target = Target::default();

    let mobile = transform_document(source, "src/mobile/A.vue", &options, &target).unwrap();
    let desktop = transform_document(source, "src/desktop/A.vue", &options, &target).unwrap();

    assert_eq!(mobile, r#"<template><div style="width: 25.6vw"></div></template>"#);
    assert_eq!(desktop, r#"<template><div style="width: 5vw"></div></template>"#);
}

#[test]
fn test_text_outside_custom_markers_is_untouched() {
    let markers = Markers::new("<!-- vw:start -->", "<!-- vw:end -->");
    let target = Target {
        extension: ".html".into(),
        markers,
    };
    let options = Options {
        unit_precision: 2,
        ..Default::default()
    };
    let source = "<p style=\"top: 75px\"></p><!-- vw:start --><p style=\"top: 75px\"></p><!-- vw:end -->";

    let output = transform_document(source, "index.html", &options, &target).unwrap();
    assert_eq!(
        output,
        "<p style=\"top: 75px\"></p><!-- vw:start --><p style=\"top: 10vw\"></p><!-- vw:end -->"
    );
}

#[test]
fn test_values_below_threshold_are_untouched() {
    let options = Options {
        min_pixel_value: 10.0,
        ..Default::default()
    };
    let source = r#"<template><div style="margin: 10px 9px 11px 0px"></div></template>"#;
    let output = transform(source, &options);
    assert_eq!(
        output,
        r#"<template><div style="margin: 10px 9px 1.46667vw 0px"></div></template>"#
    );
}

#[test]
fn test_region_spans_first_start_to_last_end() {
    let options = Options {
        unit_precision: 2,
        ..Default::default()
    };
    let source = concat!(
        r#"<i style="top: 75px"></i>"#,
        r#"<template><a style="top: 75px"></a></template>"#,
        r#"<div style="top: 75px"></div>"#,
        r#"<TEMPLATE><b style="top: 75px"></b></TEMPLATE>"#,
        r#"<style>.b { top: 75px }</style>"#,
    );

    let output = transform(source, &options);
    insta::assert_snapshot!(output, @r#"<i style="top: 75px"></i><template><a style="top: 10vw"></a></template><div style="top: 10vw"></div><TEMPLATE><b style="top: 10vw"></b></TEMPLATE><style>.b { top: 75px }</style>"#);
}
