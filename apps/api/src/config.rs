use anyhow::{anyhow, Context, Result};

use crate::recommendations::Priority;
use crate::selection::selector::{SelectionOptions, DEFAULT_MAX_CHANGES_PER_SECTION};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Default per-section edit budget when a request doesn't override it.
    pub max_changes_per_section: usize,
    /// Default priority threshold when a request doesn't override it.
    pub priority_threshold: Priority,
    /// Requests with larger documents are rejected.
    pub max_document_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let priority_label = optional_env("PRIORITY_THRESHOLD", "medium");
        let priority_threshold = Priority::parse(&priority_label).ok_or_else(|| {
            anyhow!("PRIORITY_THRESHOLD must be one of high, medium, low (got '{priority_label}')")
        })?;

        let max_changes_per_section = parse_budget(&optional_env(
            "MAX_CHANGES_PER_SECTION",
            &DEFAULT_MAX_CHANGES_PER_SECTION.to_string(),
        ))?;

        Ok(Config {
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            max_changes_per_section,
            priority_threshold,
            max_document_bytes: optional_env("MAX_DOCUMENT_BYTES", "65536")
                .parse::<usize>()
                .context("MAX_DOCUMENT_BYTES must be a non-negative integer")?,
        })
    }

    /// Selection options used when a request supplies none.
    pub fn selection_defaults(&self) -> SelectionOptions {
        SelectionOptions {
            priority_threshold: self.priority_threshold,
            categories: Vec::new(),
            max_changes_per_section: self.max_changes_per_section,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_changes_per_section: DEFAULT_MAX_CHANGES_PER_SECTION,
            priority_threshold: Priority::Medium,
            max_document_bytes: 65536,
        }
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Per-section budgets must allow at least one edit, matching request validation.
fn parse_budget(raw: &str) -> Result<usize> {
    let budget = raw
        .parse::<usize>()
        .context("MAX_CHANGES_PER_SECTION must be a positive integer")?;
    if budget == 0 {
        return Err(anyhow!("MAX_CHANGES_PER_SECTION must be at least 1"));
    }
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_selection_defaults() {
        let config = Config::default();
        assert_eq!(config.selection_defaults(), SelectionOptions::default());
    }

    #[test]
    fn test_budget_parsing() {
        assert_eq!(parse_budget("3").unwrap(), 3);
        assert!(parse_budget("0").is_err());
        assert!(parse_budget("-1").is_err());
        assert!(parse_budget("many").is_err());
    }
}
