use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use typeport_compiler::CompileOptions;

pub const DEFAULT_CONFIG_NAME: &str = "typeport.config.json";

/// typeport configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory searched for `*.types.json` package dumps
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory receiving the generated `.ts` files
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub compiler_options: CompileOptions,
}

fn default_src_dir() -> String {
    "types".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let config_path = root.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.src_dir)
    }

    pub fn get_out_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            compiler_options: CompileOptions::default(),
        }
    }
}
