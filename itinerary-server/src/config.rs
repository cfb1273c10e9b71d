//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::{
    CatalogCache, CatalogCacheConfig, CatalogClient, CatalogClientConfig, CatalogSource,
};
use crate::domain::{AllowanceTable, BudgetTier};
use crate::planner::PlannerConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CATALOG_URL: &str = "http://127.0.0.1:8000/api/tourism/attractions/";
const DEFAULT_CACHE_PATH: &str = "attractions_cache.json";
const DEFAULT_REFRESH_SECS: u64 = 60 * 60;

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub catalog_url: String,
    pub catalog_api_key: Option<String>,

    /// Read the catalog from this file instead of the content store.
    pub catalog_file: Option<PathBuf>,

    pub cache_path: PathBuf,
    pub refresh_interval: Duration,
    pub planner: PlannerConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// Unset or blank variables take their defaults. A variable that is set
    /// but does not parse is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = parse_or(&var, "BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?;
        let refresh_secs: u64 = parse_or(&var, "CATALOG_REFRESH_SECS", DEFAULT_REFRESH_SECS)?;
        if refresh_secs == 0 {
            anyhow::bail!("CATALOG_REFRESH_SECS must be positive");
        }

        let defaults = PlannerConfig::default();
        let daily_capacity_mins: u32 =
            parse_or(&var, "DAILY_CAPACITY_MINS", defaults.daily_capacity_mins)?;
        if daily_capacity_mins == 0 {
            anyhow::bail!("DAILY_CAPACITY_MINS must be positive");
        }

        let base = AllowanceTable::default();
        let allowances = AllowanceTable::new(
            parse_or(&var, "ALLOWANCE_LOW", base.daily_allowance(BudgetTier::Low))?,
            parse_or(&var, "ALLOWANCE_MEDIUM", base.daily_allowance(BudgetTier::Medium))?,
            parse_or(&var, "ALLOWANCE_HIGH", base.daily_allowance(BudgetTier::High))?,
        )
        .context("invalid ALLOWANCE_LOW/ALLOWANCE_MEDIUM/ALLOWANCE_HIGH")?;

        Ok(Self {
            bind_addr,
            catalog_url: var("CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            catalog_api_key: var("CATALOG_API_KEY"),
            catalog_file: var("CATALOG_FILE").map(PathBuf::from),
            cache_path: var("CATALOG_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH)),
            refresh_interval: Duration::from_secs(refresh_secs),
            planner: PlannerConfig::new(daily_capacity_mins, allowances),
        })
    }

    /// Build the catalog source: the local file if one is configured,
    /// otherwise the content store.
    pub fn catalog_source(&self) -> Result<CatalogSource> {
        if let Some(path) = &self.catalog_file {
            return Ok(CatalogSource::File(path.clone()));
        }
        let mut client_config = CatalogClientConfig::new(&self.catalog_url);
        if let Some(key) = &self.catalog_api_key {
            client_config = client_config.with_api_key(key);
        }
        let client = CatalogClient::new(client_config).context("failed to create catalog client")?;
        Ok(CatalogSource::Remote(client))
    }

    /// The disk cache for catalog records.
    pub fn catalog_cache(&self) -> CatalogCache {
        CatalogCache::new(CatalogCacheConfig::new(self.cache_path.clone()))
    }
}

fn parse_or<T>(var: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Money;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.catalog_api_key, None);
        assert_eq!(config.catalog_file, None);
        assert_eq!(config.cache_path, PathBuf::from("attractions_cache.json"));
        assert_eq!(config.refresh_interval, Duration::from_secs(3600));
        assert_eq!(config.planner.daily_capacity_mins, 480);
        assert_eq!(config.planner.allowances, AllowanceTable::default());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("CATALOG_API_KEY", "secret"),
            ("CATALOG_FILE", "/srv/attractions.json"),
            ("CATALOG_REFRESH_SECS", "60"),
            ("DAILY_CAPACITY_MINS", "600"),
            ("ALLOWANCE_LOW", "100"),
            ("ALLOWANCE_MEDIUM", "200.50"),
            ("ALLOWANCE_HIGH", "300"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.catalog_api_key.as_deref(), Some("secret"));
        assert!(matches!(
            config.catalog_source().unwrap(),
            CatalogSource::File(_)
        ));
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.planner.daily_capacity_mins, 600);
        assert_eq!(
            config.planner.allowances.daily_allowance(BudgetTier::Medium),
            Money::from_minor(20050)
        );
    }

    #[test]
    fn blank_values_take_defaults() {
        let config = config_from(&[("CATALOG_API_KEY", "  "), ("DAILY_CAPACITY_MINS", "")]).unwrap();
        assert_eq!(config.catalog_api_key, None);
        assert_eq!(config.planner.daily_capacity_mins, 480);
    }

    #[test]
    fn rejects_unparseable_values() {
        assert!(config_from(&[("DAILY_CAPACITY_MINS", "lots")]).is_err());
        assert!(config_from(&[("CATALOG_REFRESH_SECS", "-1")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "localhost")]).is_err());
        assert!(config_from(&[("ALLOWANCE_LOW", "1.234")]).is_err());
    }

    #[test]
    fn rejects_zero_capacity_and_interval() {
        assert!(config_from(&[("DAILY_CAPACITY_MINS", "0")]).is_err());
        assert!(config_from(&[("CATALOG_REFRESH_SECS", "0")]).is_err());
    }

    #[test]
    fn rejects_unordered_allowances() {
        let err = config_from(&[("ALLOWANCE_LOW", "2000")]).unwrap_err();
        assert!(err.to_string().contains("ALLOWANCE"));
    }

    #[test]
    fn remote_source_by_default() {
        let config = config_from(&[]).unwrap();
        assert!(matches!(
            config.catalog_source().unwrap(),
            CatalogSource::Remote(_)
        ));
    }
}
