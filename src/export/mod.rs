//! Output formats for a synthesized scheme.

pub mod scss;
pub mod ui_json;
pub mod zed;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

pub use scss::ScssExport;
pub use ui_json::{UiColors, UiJsonExport};
pub use zed::ZedExport;

/// A document that can be rendered from the scheme.
pub trait Exporter {
    /// Human-readable format name.
    fn name(&self) -> &str;

    /// Render the whole document.
    fn render(&self) -> Result<String>;
}

/// A rendered document waiting to be written.
pub struct Output<'a> {
    pub path: &'a Path,
    pub what: String,
    pub content: String,
}

impl<'a> Output<'a> {
    /// Render `exporter` for `path`. Nothing touches the disk yet.
    pub fn render(path: &'a Path, exporter: &dyn Exporter) -> Result<Self> {
        Ok(Self {
            path,
            what: exporter.name().to_string(),
            content: exporter.render()?,
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".wallhue-tmp");
    path.with_file_name(name)
}

fn stage(output: &Output<'_>) -> Result<PathBuf> {
    let path = output.path;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    }
    let staged = staging_path(path);
    std::fs::write(&staged, &output.content)
        .with_context(|| format!("failed to write {} to {}", output.what, path.display()))?;
    Ok(staged)
}

/// Write every output, or none of them.
///
/// Each document goes to a hidden sibling file first. Only once all of them
/// are on disk are they renamed into place; a failed write removes the
/// staged files and leaves existing outputs untouched.
pub fn write_all(outputs: &[Output<'_>]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for output in outputs {
        match stage(output) {
            Ok(path) => staged.push(path),
            Err(err) => {
                for path in &staged {
                    if let Err(cleanup) = std::fs::remove_file(path) {
                        debug!("could not remove {}: {cleanup}", path.display());
                    }
                }
                return Err(err);
            }
        }
    }

    for (output, staged) in outputs.iter().zip(&staged) {
        std::fs::rename(staged, output.path).with_context(|| {
            format!("failed to move {} into {}", output.what, output.path.display())
        })?;
        info!("wrote {} to {}", output.what, output.path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Exporter for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn render(&self) -> Result<String> {
            anyhow::bail!("render failed")
        }
    }

    struct Fixed;

    impl Exporter for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn render(&self) -> Result<String> {
            Ok("content".to_string())
        }
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wallhue-export-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn failed_render_produces_no_output() {
        let path = scratch("failing.txt");
        assert!(Output::render(&path, &Failing).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn write_creates_parent_directories() {
        let path = scratch("nested/dir/fixed.txt");
        let output = Output::render(&path, &Fixed).unwrap();
        write_all(&[output]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
        assert!(!staging_path(&path).exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn failed_write_leaves_earlier_outputs_unwritten() {
        let good = scratch("all-or-nothing/good.txt");
        let blocker = scratch("all-or-nothing/blocker");
        std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        std::fs::write(&blocker, "a file, not a directory").unwrap();
        let bad = blocker.join("bad.txt");

        let outputs = [
            Output::render(&good, &Fixed).unwrap(),
            Output::render(&bad, &Fixed).unwrap(),
        ];
        assert!(write_all(&outputs).is_err());
        assert!(!good.exists());
        assert!(!staging_path(&good).exists());
        let _ = std::fs::remove_file(&blocker);
    }
}
