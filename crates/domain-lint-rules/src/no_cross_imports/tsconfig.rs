//! Path aliases read from the project's `tsconfig.json`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::domains::DomainMap;

/// Supplies alias domains for a project root.
///
/// Implementations must not cache: each call reflects the source as it is
/// now. `None` means no aliases are available.
pub trait AliasSource: Send + Sync {
    /// Loads the alias table for `root`.
    fn load(&self, root: &Path) -> Option<DomainMap>;
}

/// Reads `compilerOptions.paths` from a JSON file under the project root.
#[derive(Debug, Clone)]
pub struct TsConfigFile {
    file_name: PathBuf,
}

impl Default for TsConfigFile {
    fn default() -> Self {
        Self::new("tsconfig.json")
    }
}

impl TsConfigFile {
    /// Reads `file_name` relative to the root passed to [`AliasSource::load`].
    #[must_use]
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

#[derive(Deserialize)]
struct TsConfig {
    #[serde(rename = "compilerOptions", default)]
    compiler_options: CompilerOptions,
}

#[derive(Deserialize, Default)]
struct CompilerOptions {
    #[serde(default)]
    paths: DomainMap,
}

impl AliasSource for TsConfigFile {
    fn load(&self, root: &Path) -> Option<DomainMap> {
        let path = root.join(&self.file_name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No alias config at {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<TsConfig>(&content) {
            Ok(config) => Some(config.compiler_options.paths),
            Err(e) => {
                debug!("Ignoring unparsable {}: {}", path.display(), e);
                None
            }
        }
    }
}
