use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;

const ISOLATED_ENV_DIR: &str = ".venv";

/// Fully resolved launch command for the server process.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: HashMap<String, String>,
}

/// Path where the isolated-environment interpreter lives under `root`,
/// whether or not it exists.
pub fn isolated_interpreter(root: &Path) -> PathBuf {
    #[cfg(target_family = "windows")]
    {
        root.join(ISOLATED_ENV_DIR).join("Scripts").join("python.exe")
    }
    #[cfg(not(target_family = "windows"))]
    {
        root.join(ISOLATED_ENV_DIR).join("bin").join("python")
    }
}

/// Determines the executable to launch for the given project root.
///
/// The project-local interpreter is preferred when the configuration asks for
/// it and the interpreter is actually present; otherwise the configured
/// executable is used as-is. Pure function of filesystem existence and
/// config, no side effects.
pub fn resolve_command(root: &Path, config: &ServerConfig) -> LaunchCommand {
    let interpreter = isolated_interpreter(root);
    let program = if config.use_isolated_environment && interpreter.exists() {
        interpreter
    } else {
        PathBuf::from(&config.explicit_executable)
    };

    LaunchCommand {
        program,
        args: config.args.clone(),
        working_dir: root.to_path_buf(),
        env: config.env.clone(),
    }
}
