//! Plugin ordering validation.

use crate::plugin::PLUGIN_NAME;
use miette::Diagnostic;
use thiserror::Error;

/// Name of the Vue single-file component compiler plugin.
pub const VUE_PLUGIN_NAME: &str = "vite:vue";

/// The host pipeline as seen once its configuration is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Plugin names in execution order.
    pub plugins: Vec<String>,
}

impl PipelineConfig {
    /// Creates a pipeline from plugin names in execution order.
    pub fn new<I, S>(plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            plugins: plugins.into_iter().map(Into::into).collect(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.plugins.iter().position(|p| p == name)
    }
}

/// The template compiler runs before the px-to-vw rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("(!) The vite-plugin-style-px-to-vw must be used before @vitejs/plugin-vue")]
#[diagnostic(code(style_px_to_vw::plugin_order), severity(Warning))]
pub struct OrderingViolation {
    /// Position of this plugin in the pipeline.
    pub plugin_index: usize,
    /// Position of the template compiler in the pipeline.
    pub compiler_index: usize,
}

/// Checks that this plugin runs before the template compiler.
///
/// A pipeline without either plugin is not a violation.
pub fn validate_plugin_order(config: &PipelineConfig) -> Option<OrderingViolation> {
    let plugin_index = config.position(PLUGIN_NAME)?;
    let compiler_index = config.position(VUE_PLUGIN_NAME)?;

    (compiler_index < plugin_index).then_some(OrderingViolation {
        plugin_index,
        compiler_index,
    })
}
