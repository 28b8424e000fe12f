//! Built-in filter defaults and runtime settings.
//!
//! Settings are read from the environment exactly once at startup (after
//! `dotenvy` has loaded any `.env` file) and passed down explicitly; nothing
//! deeper in the call chain consults the environment.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_PROJECT_ID: &str = "sre-ai-dev";
pub const DEFAULT_LOCATION: &str = "us-central1";
pub const DEFAULT_CACHE_FILE: &str = "llm_cache.json";

/// Suffixes (and literal extensionless names) documented by default.
pub fn default_include_suffixes() -> HashSet<String> {
    [
        ".js",
        ".json",
        ".jsx",
        ".md",
        ".py",
        ".pyi",
        ".pyx",
        ".rs",
        ".rst",
        ".tf",
        ".tfvars",
        ".toml",
        ".ts",
        ".tsx",
        ".yaml",
        ".yml",
        "Dockerfile",
        "Jenkinsfile",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Suffixes rejected even when included. Empty by default.
pub fn default_exclude_suffixes() -> HashSet<String> {
    HashSet::new()
}

/// Directory names whose contents are never documented. Note that `docs` is
/// excluded so a rerun does not document its own output.
pub fn default_exclude_dirs() -> HashSet<String> {
    [
        ".git",
        ".github",
        ".terraform",
        ".venv",
        ".env",
        "__pycache__",
        "assets",
        "build",
        "dist",
        "docs",
        "env",
        "images",
        "node_modules",
        "target",
        "temp",
        "tests",
        "tmp",
        "venv",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Runtime configuration for the hosted model client and the prompt cache.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub project_id: String,
    pub location: String,
    /// Bearer token for the model endpoint. Absent until `GEMINI_API_KEY`
    /// is set; client construction fails without it.
    pub api_key: Option<String>,
    /// Full base URL override for the model endpoint, mainly for tests and
    /// proxies. When unset the Vertex AI URL is derived from project/location.
    pub endpoint: Option<String>,
    pub cache_file: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let project_id =
            env::var("GEMINI_PROJECT_ID").unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string());
        let location =
            env::var("GEMINI_LOCATION").unwrap_or_else(|_| DEFAULT_LOCATION.to_string());

        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) => {
                info!("GEMINI_API_KEY found in env");
                Some(key)
            }
            Err(_) => {
                warn!("GEMINI_API_KEY not set; model calls will be unavailable");
                None
            }
        };

        let endpoint = env::var("GEMINI_ENDPOINT").ok();
        let cache_file = env::var("LLM_CACHE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_FILE));

        info!(
            model = %model,
            project_id = %project_id,
            location = %location,
            cache_file = %cache_file.display(),
            "Settings loaded from environment"
        );

        Settings {
            model,
            project_id,
            location,
            api_key,
            endpoint,
            cache_file,
        }
    }
}
