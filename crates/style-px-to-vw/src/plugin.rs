//! The host plugin.

use crate::error::PluginError;
use crate::order::{validate_plugin_order, OrderingViolation, PipelineConfig};
use crate::resolve::resolve_options;
use camino::Utf8PathBuf;
use postcss_config::ConfigLoader;
use px_transform::{transform_document, Options, PartialOptions, Target};

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "vite-plugin-style-px-to-vw";

/// The rewritten document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The full document text.
    pub code: String,
}

/// The callbacks a host build pipeline drives.
pub trait HostPlugin: Send + Sync {
    /// The plugin name.
    fn name(&self) -> &str;

    /// Called once the pipeline's plugin list is final.
    fn config_resolved(&self, _config: &PipelineConfig) -> Option<OrderingViolation> {
        None
    }

    /// Called for every document. `Ok(None)` leaves the document as is.
    fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>, PluginError>;
}

/// Rewrites px lengths in Vue templates into viewport units.
#[derive(Debug)]
pub struct StylePxToVw {
    overrides: PartialOptions,
    target: Target,
    config: ConfigLoader,
}

/// Creates the plugin with optional caller overrides.
pub fn style_px_to_vw(options: Option<PartialOptions>) -> StylePxToVw {
    StylePxToVw {
        overrides: options.unwrap_or_default(),
        target: Target::default(),
        config: ConfigLoader::new(),
    }
}

impl StylePxToVw {
    /// Applies the transform to another kind of document.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Searches the PostCSS config from `root` instead of the current directory.
    pub fn with_config_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.config = self.config.root(root);
        self
    }

    /// Replaces the PostCSS config loader.
    pub fn with_config_loader(mut self, loader: ConfigLoader) -> Self {
        self.config = loader;
        self
    }

    /// Resolves the effective options for one invocation.
    pub fn resolve_options(&self) -> Result<Options, PluginError> {
        resolve_options(&self.overrides, &self.config)
    }
}

impl HostPlugin for StylePxToVw {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn config_resolved(&self, config: &PipelineConfig) -> Option<OrderingViolation> {
        let violation = validate_plugin_order(config)?;
        log::warn!("{violation}");
        Some(violation)
    }

    fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>, PluginError> {
        if !id.ends_with(self.target.extension.as_str()) {
            return Ok(None);
        }

        let options = self.resolve_options()?;
        Ok(transform_document(code, id, &options, &self.target).map(|code| TransformOutput { code }))
    }
}
