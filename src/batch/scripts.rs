use crate::error::BatchError;
use std::fmt;
use std::path::{Path, PathBuf};

pub const ARTIFACT_EXTENSION: &str = "wav";

/// Where the mix for `script` is written: `<output_dir>/<stem>.wav`.
pub fn artifact_path(output_dir: &Path, script: &Path) -> PathBuf {
    let mut name = script
        .file_stem()
        .unwrap_or(script.as_os_str())
        .to_os_string();
    name.push(".");
    name.push(ARTIFACT_EXTENSION);
    output_dir.join(name)
}

/// All `*.txt` scripts in `dir` except README files, sorted by file name.
pub fn discover_scripts(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::MissingInput(dir.to_path_buf()));
    }

    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        let is_readme = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("README"));
        if path.is_file() && is_txt && !is_readme {
            scripts.push(path);
        }
    }

    scripts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(scripts)
}

/// Dry-run view of one script: the artifact it maps to and whether it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStatus {
    pub script: PathBuf,
    pub artifact: PathBuf,
    pub present: bool,
}

pub fn status_report(scripts: &[PathBuf], output_dir: &Path) -> Vec<ScriptStatus> {
    scripts
        .iter()
        .map(|script| {
            let artifact = artifact_path(output_dir, script);
            ScriptStatus {
                present: artifact.is_file(),
                script: script.clone(),
                artifact,
            }
        })
        .collect()
}

impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.present { "present" } else { "missing" };
        write!(
            f,
            "[{}] {} -> {}",
            mark,
            self.script.display(),
            self.artifact.display()
        )
    }
}
