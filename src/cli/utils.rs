//! Convenience helpers shared by the CLI.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info};

/// `stem` with `.ext` appended; an existing dot in the stem is kept.
pub fn output_path(stem: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Persist bytes either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content)?;
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    info!("writing to \"{}\"", path.display());
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Status line on stderr, mirrored to the log.
pub fn console_message(message: &str) {
    eprintln!("[PUNCHER] {}", message);
    info!("{}", message);
}

pub fn console_error(message: &str) {
    eprintln!("[ERROR] {}", message);
    error!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_appends_extension() {
        assert_eq!(output_path(Path::new("card"), "svg"), PathBuf::from("card.svg"));
        assert_eq!(
            output_path(Path::new("out/iss_tle.v1"), "png"),
            PathBuf::from("out/iss_tle.v1.png")
        );
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("card.svg");
        write_output(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }
}
