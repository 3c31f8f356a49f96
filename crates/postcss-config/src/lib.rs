//! PostCSS configuration discovery.
//!
//! This crate finds the PostCSS configuration that applies to a directory and
//! loads it into a [`serde_json::Value`] without running any JavaScript:
//! - a `postcss` field in `package.json`
//! - `.postcssrc` files in JSON or YAML
//! - `.postcssrc.*` and `postcss.config.*` scripts, evaluated statically
//!
//! Directories are searched from the root upward, stopping after the user's
//! home directory. Empty files are skipped. Finding nothing is not an error.
//!
//! # Example
//!
//! ```no_run
//! use postcss_config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load().unwrap();
//! if let Some(options) = config.plugin_options("postcss-px-to-viewport") {
//!     println!("{options}");
//! }
//! ```

mod context;
mod error;
mod loaders;
mod script;
mod search;

pub use context::ConfigContext;
pub use error::{ConfigError, LoadError};
pub use loaders::{JsonLoader, Loader, Loaders, MissingLoader, YamlLoader};
pub use script::ScriptLoader;
pub use search::{PACKAGE_PROP, SEARCH_PLACES};

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// A loaded PostCSS configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PostcssConfig {
    /// The file the config was loaded from, `None` when nothing was found.
    pub path: Option<Utf8PathBuf>,
    /// The config object.
    pub value: Value,
}

impl PostcssConfig {
    /// An empty config.
    pub fn empty() -> Self {
        Self {
            path: None,
            value: Value::Object(Default::default()),
        }
    }

    /// Returns the options of a plugin declared in the object form of
    /// `plugins`. Disabled plugins (`false`) and non-object entries are skipped.
    pub fn plugin_options(&self, name: &str) -> Option<&Value> {
        self.value
            .get("plugins")?
            .get(name)
            .filter(|options| options.is_object())
    }
}

/// Searches for and loads a PostCSS configuration.
#[derive(Debug)]
pub struct ConfigLoader {
    root: Option<Utf8PathBuf>,
    stop_dir: Option<Utf8PathBuf>,
    context: Option<ConfigContext>,
    loaders: Loaders,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader searching from the current directory up to the home directory.
    pub fn new() -> Self {
        Self {
            root: None,
            stop_dir: dirs::home_dir().and_then(|home| Utf8PathBuf::try_from(home).ok()),
            context: None,
            loaders: Loaders::default(),
        }
    }

    /// Sets the directory the search starts from.
    pub fn root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Sets the last directory searched. `None` searches up to the filesystem root.
    pub fn stop_dir(mut self, stop_dir: Option<Utf8PathBuf>) -> Self {
        self.stop_dir = stop_dir;
        self
    }

    /// Sets the context passed to function configs.
    pub fn context(mut self, context: ConfigContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Registers a loader for an extension, replacing the default one.
    pub fn loader(mut self, extension: impl Into<String>, loader: impl Loader + 'static) -> Self {
        self.loaders.insert(extension, loader);
        self
    }

    /// Searches for a config and loads it.
    pub fn load(&self) -> Result<PostcssConfig, ConfigError> {
        let cwd = current_dir()?;
        let root = match &self.root {
            Some(root) if root.is_relative() => cwd.join(root),
            Some(root) => root.clone(),
            None => cwd.clone(),
        };
        let context = self
            .context
            .clone()
            .unwrap_or_else(|| ConfigContext::new(cwd));

        for dir in search::search_dirs(&root, self.stop_dir.as_deref()) {
            for path in search::candidates(dir) {
                let loaded = self
                    .load_file(&path, &context)
                    .map_err(|source| ConfigError::from_load(root.clone(), path.clone(), source))?;

                if let Some(value) = loaded {
                    log::debug!("loaded PostCSS config from {path}");
                    return Ok(PostcssConfig {
                        path: Some(path),
                        value: if value.is_null() {
                            Value::Object(Default::default())
                        } else {
                            value
                        },
                    });
                }
            }
        }

        log::debug!("no PostCSS config found from {root}");
        Ok(PostcssConfig::empty())
    }

    /// Loads one candidate; `None` means keep searching.
    fn load_file(&self, path: &Utf8Path, ctx: &ConfigContext) -> Result<Option<Value>, LoadError> {
        let content = std::fs::read_to_string(path)?;

        if path.file_name() == Some("package.json") {
            let manifest: Value = serde_json::from_str(&content)?;
            return Ok(manifest.get(PACKAGE_PROP).cloned());
        }

        if content.trim().is_empty() {
            log::debug!("skipping empty PostCSS config {path}");
            return Ok(None);
        }

        let loader = self
            .loaders
            .for_path(path)
            .ok_or_else(|| LoadError::NoLoader(loaders::extension_key(path)))?;
        loader.load(path, &content, ctx).map(Some)
    }
}

fn current_dir() -> Result<Utf8PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Root(e.to_string()))?;
    Utf8PathBuf::try_from(cwd).map_err(|e| ConfigError::Root(e.to_string()))
}
