//! Context handed to function-valued configs.

use camino::Utf8PathBuf;
use serde_json::{json, Value};

/// The `ctx` argument a config function receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigContext {
    /// Working directory of the process.
    pub cwd: Utf8PathBuf,
    /// `NODE_ENV`, `development` when unset.
    pub env: String,
}

impl ConfigContext {
    /// Creates a context for `cwd`, reading the environment from `NODE_ENV`.
    pub fn new(cwd: impl Into<Utf8PathBuf>) -> Self {
        let env = std::env::var("NODE_ENV")
            .ok()
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| "development".to_string());
        Self {
            cwd: cwd.into(),
            env,
        }
    }

    /// Returns the context as a JS-like object.
    pub fn to_value(&self) -> Value {
        json!({
            "cwd": self.cwd.as_str(),
            "env": self.env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_value() {
        let ctx = ConfigContext {
            cwd: "/work/app".into(),
            env: "test".to_string(),
        };
        assert_eq!(ctx.to_value(), json!({ "cwd": "/work/app", "env": "test" }));
    }
}
