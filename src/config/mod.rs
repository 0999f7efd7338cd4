mod loader;

use std::collections::HashMap;

use serde::Deserialize;

pub use loader::{ConfigLoader, ConfigLoaderError, FileConfigLoader};

/// Launch configuration for the MineCode server process.
///
/// Recognized options mirror the editor-side settings: whether to prefer the
/// project-local isolated environment, the executable to fall back to, and
/// the arguments handed to it. `env` adds variables on top of the inherited
/// environment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_use_isolated_environment")]
    pub use_isolated_environment: bool,

    #[serde(default = "default_explicit_executable")]
    pub explicit_executable: String,

    #[serde(default = "default_server_args")]
    pub args: Vec<String>,

    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            use_isolated_environment: default_use_isolated_environment(),
            explicit_executable: default_explicit_executable(),
            args: default_server_args(),
            env: HashMap::default(),
        }
    }
}

fn default_use_isolated_environment() -> bool {
    true
}

fn default_explicit_executable() -> String {
    "py".to_string()
}

fn default_server_args() -> Vec<String> {
    vec!["-m".to_string(), "minecode.server".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ServerConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config, ServerConfig::default());
        assert!(config.use_isolated_environment);
        assert_eq!(config.explicit_executable, "py");
        assert_eq!(config.args, vec!["-m", "minecode.server"]);
        assert!(config.env.is_empty());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let yaml = r#"
use_isolated_environment: false
explicit_executable: python3
args: ["-m", "minecode.server", "--verbose"]
env:
  MINECODE_WIKI_CACHE: /tmp/wiki
"#;
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();

        assert!(!config.use_isolated_environment);
        assert_eq!(config.explicit_executable, "python3");
        assert_eq!(config.args.len(), 3);
        assert_eq!(
            config.env.get("MINECODE_WIKI_CACHE"),
            Some(&"/tmp/wiki".to_string())
        );
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let config: ServerConfig =
            serde_yaml::from_str("explicit_executable: python3.12").unwrap();

        assert!(config.use_isolated_environment);
        assert_eq!(config.explicit_executable, "python3.12");
        assert_eq!(config.args, vec!["-m", "minecode.server"]);
    }
}
