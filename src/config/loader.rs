use std::path::{Path, PathBuf};

use thiserror::Error;

use super::ServerConfig;

#[derive(Error, Debug)]
pub enum ConfigLoaderError {
    #[error("error loading config: `{0}`")]
    IOError(#[from] std::io::Error),

    #[error("error loading config: `{0}`")]
    SerdeYamlError(#[from] serde_yaml::Error),
}

pub trait ConfigLoader {
    fn load_config(&self) -> Result<ServerConfig, ConfigLoaderError>;
}

/// Loads the server launch configuration from a YAML file.
pub struct FileConfigLoader {
    file_path: PathBuf,
}

impl FileConfigLoader {
    pub fn new(file_path: &Path) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
        }
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load_config(&self) -> Result<ServerConfig, ConfigLoaderError> {
        let f = std::fs::File::open(&self.file_path)?;
        let config: ServerConfig = serde_yaml::from_reader(f)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "explicit_executable: python3").unwrap();

        let config = FileConfigLoader::new(file.path()).load_config().unwrap();

        assert_eq!(config.explicit_executable, "python3");
        assert!(config.use_isolated_environment);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let loader = FileConfigLoader::new(Path::new("/nonexistent/minecode.yml"));

        assert_matches!(
            loader.load_config().unwrap_err(),
            ConfigLoaderError::IOError(_)
        );
    }

    #[test]
    fn malformed_yaml_is_a_serde_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "args: not-a-sequence").unwrap();

        let loader = FileConfigLoader::new(file.path());

        assert_matches!(
            loader.load_config().unwrap_err(),
            ConfigLoaderError::SerdeYamlError(_)
        );
    }
}
