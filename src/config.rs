use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MealDbConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mealdb: MealDbConfig,
    pub featured_retry_limit: u32,
}

const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mealdb = MealDbConfig {
            base_url: std::env::var("MEALDB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout_secs: std::env::var("MEALDB_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
            connect_timeout_secs: std::env::var("MEALDB_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        let featured_retry_limit = std::env::var("FEATURED_RETRY_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);
        Ok(Self {
            mealdb,
            featured_retry_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let config = AppConfig::from_env().expect("config from empty env");
        assert_eq!(config.mealdb.timeout_secs, 30);
        assert_eq!(config.mealdb.connect_timeout_secs, 10);
        assert_eq!(config.featured_retry_limit, 5);
        assert!(config.mealdb.base_url.starts_with("https://"));
    }
}
