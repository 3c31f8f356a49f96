//! Config discovery against on-disk fixtures.

use camino::{Utf8Path, Utf8PathBuf};
use postcss_config::{ConfigContext, ConfigError, ConfigLoader, JsonLoader, MissingLoader};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        Self { _dir: dir, root }
    }

    fn write(&self, relative: &str, content: &str) -> Utf8PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn loader(&self, start: &str) -> ConfigLoader {
        ConfigLoader::new()
            .root(self.root.join(start))
            .stop_dir(Some(self.root.clone()))
            .context(ConfigContext {
                cwd: self.root.clone(),
                env: "production".to_string(),
            })
    }
}

fn file_name(path: &Option<Utf8PathBuf>) -> Option<&str> {
    path.as_deref().and_then(Utf8Path::file_name)
}

#[test]
fn nothing_found_is_an_empty_config() {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.root.join("app/src")).unwrap();

    let config = fixture.loader("app/src").load().unwrap();
    assert_eq!(config.path, None);
    assert_eq!(config.value, json!({}));
}

#[test]
fn package_json_without_field_is_skipped() {
    let fixture = Fixture::new();
    fixture.write("app/package.json", r#"{ "name": "app" }"#);
    fixture.write(
        ".postcssrc.json",
        r#"{ "plugins": { "postcss-px-to-viewport": { "viewportWidth": 375 } } }"#,
    );

    let config = fixture.loader("app").load().unwrap();
    assert_eq!(file_name(&config.path), Some(".postcssrc.json"));
    assert_eq!(
        config.plugin_options("postcss-px-to-viewport"),
        Some(&json!({ "viewportWidth": 375 }))
    );
}

#[test]
fn package_json_field_wins_within_a_directory() {
    let fixture = Fixture::new();
    fixture.write(
        "package.json",
        r#"{ "name": "app", "postcss": { "plugins": { "postcss-px-to-viewport": { "unitPrecision": 2 } } } }"#,
    );
    fixture.write("postcss.config.js", "export default { plugins: {} }");

    let config = fixture.loader("").load().unwrap();
    assert_eq!(file_name(&config.path), Some("package.json"));
    assert_eq!(
        config.plugin_options("postcss-px-to-viewport"),
        Some(&json!({ "unitPrecision": 2 }))
    );
}

#[test]
fn nearest_directory_wins() {
    let fixture = Fixture::new();
    fixture.write("postcss.config.js", "module.exports = { plugins: { outer: {} } }");
    fixture.write(
        "packages/web/.postcssrc.yml",
        "plugins:\n  postcss-px-to-viewport-8-plugin:\n    viewportWidth: 390\n",
    );
    fs::create_dir_all(fixture.root.join("packages/web/src/pages")).unwrap();

    let config = fixture.loader("packages/web/src/pages").load().unwrap();
    assert_eq!(file_name(&config.path), Some(".postcssrc.yml"));
    assert_eq!(
        config.plugin_options("postcss-px-to-viewport-8-plugin"),
        Some(&json!({ "viewportWidth": 390 }))
    );
}

#[test]
fn extensionless_rc_is_yaml_or_json() {
    let fixture = Fixture::new();
    fixture.write(".postcssrc", "plugins:\n  postcss-px-to-viewport:\n    minPixelValue: 2\n");

    let config = fixture.loader("").load().unwrap();
    assert_eq!(
        config.plugin_options("postcss-px-to-viewport"),
        Some(&json!({ "minPixelValue": 2 }))
    );
}

#[test]
fn empty_files_are_skipped() {
    let fixture = Fixture::new();
    fixture.write("postcss.config.js", "module.exports = { plugins: { outer: {} } }");
    fixture.write("app/.postcssrc.json", "  \n");
    fixture.write("app/postcss.config.cjs", "");

    let config = fixture.loader("app").load().unwrap();
    assert_eq!(file_name(&config.path), Some("postcss.config.js"));
    assert_eq!(config.plugin_options("outer"), Some(&json!({})));
}

#[test]
fn null_config_is_an_empty_object() {
    let fixture = Fixture::new();
    fixture.write("postcss.config.js", "module.exports = { plugins: { outer: {} } }");
    fixture.write("app/.postcssrc.yml", "~\n");

    let config = fixture.loader("app").load().unwrap();
    assert_eq!(file_name(&config.path), Some(".postcssrc.yml"));
    assert_eq!(config.value, json!({}));
}

#[test]
fn function_config_receives_context() {
    let fixture = Fixture::new();
    fixture.write(
        "postcss.config.cjs",
        r#"module.exports = ({ env }) => ({
            plugins: {
                'postcss-px-to-viewport': { viewportWidth: env === 'production' ? 375 : 750 },
            },
        });"#,
    );

    let config = fixture.loader("").load().unwrap();
    assert_eq!(
        config.plugin_options("postcss-px-to-viewport"),
        Some(&json!({ "viewportWidth": 375 }))
    );
}

#[test]
fn broken_config_names_the_search_root() {
    let fixture = Fixture::new();
    let path = fixture.write(".postcssrc.json", "{ plugins: ");
    fs::create_dir_all(fixture.root.join("src")).unwrap();

    let err = fixture.loader("src").load().unwrap_err();
    match &err {
        ConfigError::Load { root, path: found, .. } => {
            assert_eq!(root, &fixture.root.join("src"));
            assert_eq!(found, &path);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains(fixture.root.join("src").as_str()));
}

#[test]
fn broken_package_json_is_a_load_error() {
    let fixture = Fixture::new();
    fixture.write("package.json", "{");

    let err = fixture.loader("").load().unwrap_err();
    assert!(matches!(err, ConfigError::Load { .. }));
}

#[test]
fn missing_loader_is_reported_distinctly() {
    let fixture = Fixture::new();
    fixture.write("postcss.config.ts", "export default { plugins: {} }");

    let err = fixture
        .loader("")
        .loader(
            ".ts",
            MissingLoader {
                loader: "typescript",
                feature: "typescript",
            },
        )
        .load()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::LoaderMissing {
            loader: "typescript",
            ..
        }
    ));
}

#[test]
fn loaders_are_replaceable() {
    let fixture = Fixture::new();
    fixture.write(".postcssrc", r#"{ "plugins": { "a": { "b": 1 } } }"#);

    let config = fixture.loader("").loader("", JsonLoader).load().unwrap();
    assert_eq!(config.plugin_options("a"), Some(&json!({ "b": 1 })));
}

#[cfg(feature = "typescript")]
#[test]
fn typescript_config() {
    let fixture = Fixture::new();
    fixture.write(
        "postcss.config.ts",
        r#"import type { Config } from 'postcss-load-config';
        export default {
            plugins: { 'postcss-px-to-viewport': { viewportWidth: 375, propList: ['*'] } },
        } satisfies Config;"#,
    );

    let config = fixture.loader("").load().unwrap();
    assert_eq!(
        config.plugin_options("postcss-px-to-viewport"),
        Some(&json!({ "viewportWidth": 375, "propList": ["*"] }))
    );
}
