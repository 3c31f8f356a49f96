//! Configuration loading errors.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// An error raised by a single loader while reading one config file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The script could not be parsed.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The script uses a construct that cannot be evaluated statically.
    #[error("cannot evaluate {0} statically")]
    Unsupported(String),

    /// The script exports nothing.
    #[error("the script has no default export")]
    NoExport,

    /// No loader is registered for the file's extension.
    #[error("no loader registered for `{0}` files")]
    NoLoader(String),

    /// The loader for this kind of file is not compiled in.
    #[error("the {loader} loader is not available")]
    LoaderMissing {
        /// Name of the missing loader.
        loader: &'static str,
        /// Cargo feature providing it.
        feature: &'static str,
    },
}

/// An error raised while resolving the external configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A config file was found but could not be loaded.
    #[error("failed to load PostCSS config searched from {root}: {path}: {source}")]
    #[diagnostic(code(postcss_config::load))]
    Load {
        /// Directory the search started from.
        root: Utf8PathBuf,
        /// The offending file.
        path: Utf8PathBuf,
        /// What went wrong.
        #[source]
        source: LoadError,
    },

    /// A config file needs a loader that is not compiled in.
    #[error("the {loader} loader is required to load {path}")]
    #[diagnostic(
        code(postcss_config::loader_missing),
        help("enable the cargo feature providing this loader, or convert the file to JSON or YAML")
    )]
    LoaderMissing {
        /// Name of the missing loader.
        loader: &'static str,
        /// Cargo feature providing it.
        feature: &'static str,
        /// The file needing it.
        path: Utf8PathBuf,
    },

    /// The search root could not be determined.
    #[error("cannot determine the directory to search PostCSS config from: {0}")]
    #[diagnostic(code(postcss_config::root))]
    Root(String),
}

impl ConfigError {
    /// Wraps a loader failure, keeping missing loaders distinct.
    pub(crate) fn from_load(root: Utf8PathBuf, path: Utf8PathBuf, source: LoadError) -> Self {
        match source {
            LoadError::LoaderMissing { loader, feature } => Self::LoaderMissing {
                loader,
                feature,
                path,
            },
            source => Self::Load { root, path, source },
        }
    }
}
