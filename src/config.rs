//! Runtime configuration from the process environment.

use std::env;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    /// Upper bound on organization-search pages per run.
    pub max_pages: u32,
    pub page_delay_ms: u64,
    pub enrich_delay_ms: u64,
    /// How many matched organizations to enrich with people.
    pub enrich_org_limit: usize,
}

impl Config {
    /// Read configuration from the environment. The API key is the only
    /// required value; everything else is defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("APOLLO_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let api_base = env::var("APOLLO_API_BASE")
            .unwrap_or_else(|_| "https://api.apollo.io/v1".to_string());

        let max_pages = env::var("APOLLO_MAX_PAGES")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .unwrap_or(2);

        let page_delay_ms = env::var("APOLLO_PAGE_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let enrich_delay_ms = env::var("APOLLO_ENRICH_DELAY_MS")
            .unwrap_or_else(|_| "500".to_string())
            .parse()
            .unwrap_or(500);

        let enrich_org_limit = env::var("APOLLO_ENRICH_ORG_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(Self {
            api_key,
            api_base,
            max_pages,
            page_delay_ms,
            enrich_delay_ms,
            enrich_org_limit,
        })
    }
}
