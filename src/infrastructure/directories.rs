use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::{DirectoryConfig, IoConfig};

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
}

/// Creates the log directory and the parents of the report files, if any.
pub fn ensure_directories(dirs: &DirectoryConfig, io: &IoConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(Path::new(&dirs.logs_dir))?;

    let write_check = logs_dir.join(".write-test");
    fs::write(&write_check, b"ok")
        .with_context(|| format!("log directory {} is not writable", logs_dir.display()))?;
    fs::remove_file(&write_check)?;

    for parent in [io.output_path.as_deref(), io.trends_path.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
    {
        ensure_dir(parent)?;
    }

    Ok(ResolvedPaths { logs_dir })
}

fn ensure_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
    }
    Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_and_report_directories() {
        let root = tempfile::tempdir().unwrap();
        let logs = root.path().join("logs");
        let report = root.path().join("out/nested/report.json");
        let trends = root.path().join("stats/trends.json");

        let paths = ensure_directories(
            &DirectoryConfig {
                logs_dir: logs.display().to_string(),
            },
            &IoConfig {
                input_path: None,
                output_path: Some(report.clone()),
                trends_path: Some(trends.clone()),
            },
        )
        .unwrap();

        assert!(paths.logs_dir.is_dir());
        assert!(report.parent().unwrap().is_dir());
        assert!(trends.parent().unwrap().is_dir());
        assert!(!paths.logs_dir.join(".write-test").exists());
    }
}
