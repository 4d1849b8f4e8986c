//! Process configuration loaded from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

use petpulse_calendar::InsightOptions;

const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// When set, events are stored in Postgres; otherwise in memory.
    pub database_url: Option<String>,
    pub insights: InsightOptions,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = parse_or(get("BIND_ADDR"), "BIND_ADDR", "0.0.0.0:8080".parse::<SocketAddr>().ok())?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let defaults = InsightOptions::default();
        let insights = InsightOptions {
            trend_top_categories: parse_positive(
                get("INSIGHTS_TOP_CATEGORIES"),
                "INSIGHTS_TOP_CATEGORIES",
                defaults.trend_top_categories,
            )?,
            critical_horizon_days: parse_positive(
                get("INSIGHTS_CRITICAL_HORIZON_DAYS"),
                "INSIGHTS_CRITICAL_HORIZON_DAYS",
                defaults.critical_horizon_days,
            )?,
            opportunity_horizon_days: parse_positive(
                get("INSIGHTS_OPPORTUNITY_HORIZON_DAYS"),
                "INSIGHTS_OPPORTUNITY_HORIZON_DAYS",
                defaults.opportunity_horizon_days,
            )?,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            database_url: get("DATABASE_URL"),
            insights,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match (raw, default) {
        (Some(value), _) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(ConfigError::Invalid {
            key,
            value: String::new(),
            reason: "missing and no default".to_string(),
        }),
    }
}

fn parse_positive<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default + Copy,
    T::Err: std::fmt::Display,
{
    let value = parse_or(raw.clone(), key, Some(default))?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw.unwrap_or_default(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.insights, InsightOptions::default());
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let cfg = config(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", " s3cret "),
            ("DATABASE_URL", "postgres://localhost/petpulse"),
            ("INSIGHTS_TOP_CATEGORIES", "5"),
            ("INSIGHTS_CRITICAL_HORIZON_DAYS", "14"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/petpulse"));
        assert_eq!(cfg.insights.trend_top_categories, 5);
        assert_eq!(cfg.insights.critical_horizon_days, 14);
        assert_eq!(cfg.insights.opportunity_horizon_days, 45);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        assert_eq!(config(&[("DATABASE_URL", "  ")]).unwrap().database_url, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config(&[("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { key: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("INSIGHTS_TOP_CATEGORIES", "0")]),
            Err(ConfigError::Invalid { key: "INSIGHTS_TOP_CATEGORIES", .. })
        ));
        assert!(matches!(
            config(&[("INSIGHTS_OPPORTUNITY_HORIZON_DAYS", "-3")]),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
