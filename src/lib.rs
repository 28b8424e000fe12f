pub mod cache;
pub mod commit_size;
pub mod discover;
pub mod generate;
pub mod llm;
pub mod prompts;
pub mod render;
pub mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cache::{CachedModel, JsonFileCache};
use generate::GenerateConfig;
use llm::GeminiClient;
use settings::Settings;

/// CLI for ai-docs: per-file Markdown documentation via a hosted LLM.
#[derive(Parser)]
#[clap(
    name = "ai-docs",
    version,
    about = "Generate per-file Markdown documentation for a source tree using a hosted LLM"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Document every matching file under a directory as a Markdown tree
    Generate {
        /// Local repository name, used in diagnostics
        #[clap(short, long, default_value = "repo_name")]
        name: String,
        /// Top level directory to scan
        #[clap(short, long, default_value = ".")]
        directory: PathBuf,
        /// Additional directory names to exclude from the scan
        #[clap(short, long = "exclude-dirs", num_args = 0..)]
        exclude_dirs: Vec<String>,
        /// Output directory for generated Markdown (defaults to <DIRECTORY>/docs)
        #[clap(long)]
        output: Option<PathBuf>,
        /// Bypass the on-disk prompt cache
        #[clap(long)]
        no_cache: bool,
    },
    /// Classify the size of a commit range from git diff statistics
    CommitSize {
        /// Base commit hash to compare with
        commit: String,
        /// Target commit hash
        #[clap(long, default_value = "HEAD")]
        target: String,
        /// Path to the git repository
        #[clap(long, default_value = ".")]
        repo: PathBuf,
        /// Show per-file change details
        #[clap(short, long)]
        verbose: bool,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate {
            name,
            directory,
            exclude_dirs,
            output,
            no_cache,
        } => {
            let settings = Settings::from_env();

            let mut excluded = settings::default_exclude_dirs();
            excluded.extend(exclude_dirs);

            let config = GenerateConfig {
                name,
                output_dir: output.unwrap_or_else(|| directory.join("docs")),
                root: directory,
                include: settings::default_include_suffixes(),
                exclude_suffixes: settings::default_exclude_suffixes(),
                exclude_dirs: excluded,
            };

            let client = GeminiClient::new(&settings)?;

            println!("Documentation generation starting...");
            let report = if no_cache {
                generate::generate(&config, &client).await?
            } else {
                let cached =
                    CachedModel::new(client, JsonFileCache::new(settings.cache_file.clone()));
                generate::generate(&config, &cached).await?
            };

            println!(
                "\nDocumentation generation complete. Files written to: {}",
                config.output_dir.display()
            );
            println!(
                "Documented: {}, skipped empty: {}, failed: {}",
                report.documented.len(),
                report.skipped_empty.len(),
                report.failed.len()
            );
            Ok(())
        }
        Commands::CommitSize {
            commit,
            target,
            repo,
            verbose,
        } => {
            let stats = commit_size::diff_stats(&repo, &commit, &target)?;

            println!("Commit Size: {}", commit_size::classify(stats.total_lines()));
            println!("Files Changed: {}", stats.files_changed);
            println!("Lines Added: {}", stats.insertions);
            println!("Lines Deleted: {}", stats.deletions);
            println!("Total Lines Changed: {}", stats.total_lines());

            if verbose {
                let mut files = commit_size::changed_files(&repo, &commit, &target)?;
                files.sort_by(|a, b| {
                    (b.insertions + b.deletions).cmp(&(a.insertions + a.deletions))
                });
                println!("\nChanged Files:");
                for file in files {
                    println!("  {}: +{} -{}", file.path, file.insertions, file.deletions);
                }
            }
            Ok(())
        }
    }
}
