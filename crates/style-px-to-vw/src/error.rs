//! Plugin errors.

use miette::Diagnostic;
use postcss_config::ConfigError;
use thiserror::Error;

/// An error aborting one transform invocation.
#[derive(Debug, Error, Diagnostic)]
pub enum PluginError {
    /// The external configuration could not be resolved.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The px-to-viewport section of the external configuration has the wrong shape.
    #[error("invalid px-to-viewport options in {location}: {source}")]
    #[diagnostic(
        code(style_px_to_vw::invalid_options),
        help("check the types of viewportWidth, unitPrecision, propList, include and exclude")
    )]
    InvalidOptions {
        /// The config file the options came from.
        location: String,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}
