use crate::error::{RepogenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the manifest lives. `None` falls back to the install-location
/// convention: `<exe_dir>/../manifest.txt`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ManifestConfig {
    pub path: Option<PathBuf>,
}

/// Where entries are materialized. `None` falls back to the sibling
/// `repo_out` convention.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub root: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RepogenError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| RepogenError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| RepogenError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["repogen.toml", ".repogen.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref manifest) = cli_args.manifest {
            self.manifest.path = Some(manifest.clone());
        }

        if let Some(ref output_root) = cli_args.output_root {
            self.output.root = Some(output_root.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| RepogenError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| RepogenError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref manifest_path) = self.manifest.path {
            if manifest_path.exists() && !manifest_path.is_file() {
                return Err(RepogenError::Config {
                    message: format!(
                        "Manifest path is not a regular file: {}",
                        manifest_path.display()
                    ),
                });
            }
        }

        if let Some(ref root) = self.output.root {
            if root.exists() && !root.is_dir() {
                return Err(RepogenError::Config {
                    message: format!(
                        "Output root exists but is not a directory: {}",
                        root.display()
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample = Self {
            manifest: ManifestConfig {
                path: Some(PathBuf::from("manifest.txt")),
            },
            output: OutputConfig {
                root: Some(PathBuf::from("repo_out")),
            },
        };
        toml::to_string_pretty(&sample).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub manifest: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_output_root(mut self, output_root: Option<PathBuf>) -> Self {
        self.output_root = output_root;
        self
    }
}
