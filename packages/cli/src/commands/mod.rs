pub mod compile;
pub mod init;
pub mod refs;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use refs::{refs, RefsArgs};

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use typeport_ast::Package;
use walkdir::WalkDir;

/// Suffix of package dump files produced by source parsers
pub const PACKAGE_SUFFIX: &str = ".types.json";

/// All package dumps below `dir`, in a stable order
pub fn find_package_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(PACKAGE_SUFFIX))
        })
        .collect();
    files.sort();
    files
}

pub fn load_package(path: &Path) -> Result<Package> {
    debug!(path = %path.display(), "Loading package dump");
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| anyhow!("Invalid package dump: {}", e))
}

/// `models/user.types.json` becomes `models/user.ts`
pub fn output_relative_path(relative: &Path) -> PathBuf {
    let file_name = relative
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(PACKAGE_SUFFIX).unwrap_or(file_name);
    relative.with_file_name(format!("{}.ts", stem))
}
