//! Loaders turning config file contents into JSON values.

use crate::context::ConfigContext;
use crate::error::LoadError;
use crate::script::ScriptLoader;
use camino::Utf8Path;
use indexmap::IndexMap;
use serde_json::Value;

/// Turns the contents of one config file into a value.
pub trait Loader: Send + Sync {
    /// Loads `content`, read from `path`.
    fn load(&self, path: &Utf8Path, content: &str, ctx: &ConfigContext)
        -> Result<Value, LoadError>;
}

/// Strict JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn load(&self, _: &Utf8Path, content: &str, _: &ConfigContext) -> Result<Value, LoadError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// YAML, which also accepts JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl Loader for YamlLoader {
    fn load(&self, _: &Utf8Path, content: &str, _: &ConfigContext) -> Result<Value, LoadError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Stands in for a loader that was not compiled in.
#[derive(Debug, Clone, Copy)]
pub struct MissingLoader {
    /// Name of the missing loader.
    pub loader: &'static str,
    /// Cargo feature providing it.
    pub feature: &'static str,
}

impl Loader for MissingLoader {
    fn load(&self, _: &Utf8Path, _: &str, _: &ConfigContext) -> Result<Value, LoadError> {
        Err(LoadError::LoaderMissing {
            loader: self.loader,
            feature: self.feature,
        })
    }
}

/// Loaders keyed by file extension (`.json`), `""` for extension-less files.
pub struct Loaders {
    by_extension: IndexMap<String, Box<dyn Loader>>,
}

impl Loaders {
    /// Creates an empty map.
    pub fn empty() -> Self {
        Self {
            by_extension: IndexMap::new(),
        }
    }

    /// Registers `loader` for `extension`, replacing any previous one.
    pub fn insert(&mut self, extension: impl Into<String>, loader: impl Loader + 'static) {
        self.by_extension.insert(extension.into(), Box::new(loader));
    }

    /// Returns the loader registered for `extension`.
    pub fn get(&self, extension: &str) -> Option<&dyn Loader> {
        self.by_extension.get(extension).map(|l| l.as_ref())
    }

    /// Returns the loader for a file, keyed by its extension.
    pub fn for_path(&self, path: &Utf8Path) -> Option<&dyn Loader> {
        self.get(&extension_key(path))
    }

    /// Returns the registered extensions in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.by_extension.keys().map(String::as_str)
    }
}

impl Default for Loaders {
    fn default() -> Self {
        let mut loaders = Self::empty();
        loaders.insert("", YamlLoader);
        loaders.insert(".json", JsonLoader);
        loaders.insert(".yaml", YamlLoader);
        loaders.insert(".yml", YamlLoader);
        loaders.insert(".js", ScriptLoader::javascript());
        loaders.insert(".cjs", ScriptLoader::javascript());
        loaders.insert(".mjs", ScriptLoader::javascript());
        register_typescript(&mut loaders);
        loaders
    }
}

impl std::fmt::Debug for Loaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.extensions()).finish()
    }
}

#[cfg(feature = "typescript")]
fn register_typescript(loaders: &mut Loaders) {
    loaders.insert(".ts", ScriptLoader::typescript());
    loaders.insert(".cts", ScriptLoader::typescript());
}

#[cfg(not(feature = "typescript"))]
fn register_typescript(loaders: &mut Loaders) {
    let missing = MissingLoader {
        loader: "typescript",
        feature: "typescript",
    };
    loaders.insert(".ts", missing);
    loaders.insert(".cts", missing);
}

/// Returns the map key for a path: `.ext`, or `""` without an extension.
pub(crate) fn extension_key(path: &Utf8Path) -> String {
    path.extension()
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
