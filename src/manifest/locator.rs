use crate::error::{RepogenError, Result};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "manifest.txt";
pub const OUTPUT_ROOT_NAME: &str = "repo_out";

/// The manifest text, read once and never mutated.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub text: String,
}

impl Manifest {
    pub fn len_bytes(&self) -> u64 {
        self.text.len() as u64
    }
}

/// Resolves and reads the manifest. An explicit path wins; otherwise the
/// manifest is expected one level above the tool's own install directory,
/// next to which the `repo_out` output root also lives.
pub struct ManifestLocator {
    explicit_path: Option<PathBuf>,
}

impl ManifestLocator {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
        }
    }

    pub fn with_path<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.explicit_path = path.map(Into::into);
        self
    }

    pub fn resolve(&self) -> Result<PathBuf> {
        match self.explicit_path {
            Some(ref path) => Ok(path.clone()),
            None => Ok(install_root()?.join(MANIFEST_FILE_NAME)),
        }
    }

    /// Resolves the manifest path and verifies the file exists. Fails with
    /// `MissingManifest` before any extraction or write is attempted.
    pub fn locate(&self) -> Result<PathBuf> {
        let path = self.resolve()?;

        if !path.is_file() {
            return Err(RepogenError::MissingManifest { path });
        }

        Ok(path)
    }

    pub fn load(&self) -> Result<Manifest> {
        let path = self.locate()?;
        let text = std::fs::read_to_string(&path).map_err(RepogenError::Io)?;

        Ok(Manifest { path, text })
    }
}

impl Default for ManifestLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory one level above the executable, the root both conventional
/// paths are derived from.
fn install_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| RepogenError::Config {
        message: format!("Cannot determine the tool's own location: {}", e),
    })?;

    let exe_dir = exe.parent().ok_or_else(|| RepogenError::Config {
        message: format!("Executable has no parent directory: {}", exe.display()),
    })?;

    exe_dir
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| RepogenError::Config {
            message: format!(
                "Install directory has no parent to hold a manifest: {}",
                exe_dir.display()
            ),
        })
}

pub fn conventional_output_root() -> Result<PathBuf> {
    Ok(install_root()?.join(OUTPUT_ROOT_NAME))
}
