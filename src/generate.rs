//! Coordinating module for the discover-summarise-render pipeline.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use futures::future::try_join;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::discover::{discover, DiscoverError};
use crate::llm::TextModel;
use crate::prompts;
use crate::render;

/// Configuration for one documentation run.
#[derive(Debug)]
pub struct GenerateConfig {
    /// Human-readable repository name, used in diagnostics only.
    pub name: String,
    /// Root directory to scan.
    pub root: PathBuf,
    /// Where the Markdown tree is written.
    pub output_dir: PathBuf,
    pub include: HashSet<String>,
    pub exclude_suffixes: HashSet<String>,
    pub exclude_dirs: HashSet<String>,
}

/// Outcome of a run. A per-file failure does not abort the pipeline; callers
/// can distinguish zero matches from a failed run via the error type.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub documented: Vec<PathBuf>,
    pub skipped_empty: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),
    #[error("failed to create output directory {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Run the full pipeline: discover files, produce a summary and a logic-flow
/// analysis per file, and write the Markdown tree.
pub async fn generate(
    config: &GenerateConfig,
    model: &dyn TextModel,
) -> Result<GenerateReport, GenerateError> {
    info!(
        name = %config.name,
        root = %config.root.display(),
        output_dir = %config.output_dir.display(),
        "Starting documentation generation"
    );

    let files = discover(
        &config.root,
        &config.include,
        &config.exclude_suffixes,
        &config.exclude_dirs,
    )?;
    info!(count = files.len(), "Files selected for documentation");

    fs::create_dir_all(&config.output_dir).map_err(|e| GenerateError::OutputDir {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let mut report = GenerateReport::default();
    for relative in &files {
        let absolute = config.root.join(relative);
        debug!(path = %absolute.display(), "Processing file");
        println!("Processing: {}", relative.display());

        let content = match fs::read_to_string(&absolute) {
            Ok(content) => content,
            Err(e) => {
                error!(error = ?e, path = %absolute.display(), "Failed to read file");
                println!("Error processing file {}: {}", relative.display(), e);
                report.failed.push(FileFailure {
                    path: relative.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if content.trim().is_empty() {
            warn!(path = %absolute.display(), "Skipped empty file");
            println!("Skipped empty file: {}", relative.display());
            report.skipped_empty.push(relative.clone());
            continue;
        }

        // The two prompts are independent; issue them concurrently.
        let summary_prompt = prompts::summary_prompt(&content);
        let logic_flow_prompt = prompts::logic_flow_prompt(&content);
        let (summary, logic_flow) = match try_join(
            model.generate(&summary_prompt),
            model.generate(&logic_flow_prompt),
        )
        .await
        {
            Ok(pair) => pair,
            Err(e) => {
                error!(error = ?e, path = %relative.display(), "Model call failed for file");
                println!("Error processing file {}: {}", relative.display(), e);
                report.failed.push(FileFailure {
                    path: relative.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let page = render::markdown_page(relative, &summary, &logic_flow);
        match render::write_page(&config.output_dir, relative, &page) {
            Ok(md_path) => {
                info!(path = %md_path.display(), "Generated documentation page");
                println!("Generated: {}", md_path.display());
                report.documented.push(relative.clone());
            }
            Err(e) => {
                error!(error = ?e, path = %relative.display(), "Failed to write Markdown file");
                println!("Error writing file for {}: {}", relative.display(), e);
                report.failed.push(FileFailure {
                    path: relative.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        documented = report.documented.len(),
        skipped_empty = report.skipped_empty.len(),
        failed = report.failed.len(),
        "Documentation generation complete"
    );
    Ok(report)
}
