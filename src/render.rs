//! Markdown rendering and output layout.
//!
//! Each documented file becomes one Markdown page mirroring its relative
//! path under the output root, with the extension replaced by `.md`
//! (`src/a.py` -> `<out>/src/a.md`, `Dockerfile` -> `<out>/Dockerfile.md`).

use std::fs;
use std::path::{Path, PathBuf};

/// The fixed page format: file header, summary section, logic flow section.
pub fn markdown_page(relative: &Path, summary: &str, logic_flow: &str) -> String {
    format!(
        "# File: {}\n\n## Summary\n\n{}\n\n## Logic Flow\n\n{}\n",
        relative.display(),
        summary,
        logic_flow,
    )
}

/// Write a rendered page under `output_root`, creating parent directories as
/// needed. Returns the path of the written Markdown file.
pub fn write_page(output_root: &Path, relative: &Path, content: &str) -> std::io::Result<PathBuf> {
    let md_path = output_root.join(relative.with_extension("md"));
    if let Some(parent) = md_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&md_path, content)?;
    Ok(md_path)
}
