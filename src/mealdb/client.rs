use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::MealDbConfig;

use super::error::MealDbError;
use super::record::{
    CategoriesEnvelope, CategoryRecord, ListEntry, ListEnvelope, MealRecord, MealsEnvelope,
    MealSummary, SummariesEnvelope,
};

/// Read-only client for the upstream recipe database. One method per
/// logical query endpoint; implementations return the parsed records with
/// the envelope already stripped (null list -> empty vec).
#[async_trait]
pub trait MealDbClient: Send + Sync {
    async fn random(&self) -> Result<Vec<MealRecord>, MealDbError>;
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>, MealDbError>;
    async fn search_by_letter(&self, letter: char) -> Result<Vec<MealRecord>, MealDbError>;
    async fn lookup(&self, id: &str) -> Result<Vec<MealRecord>, MealDbError>;
    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealSummary>, MealDbError>;
    async fn filter_by_area(&self, area: &str) -> Result<Vec<MealSummary>, MealDbError>;
    async fn filter_by_ingredient(&self, ingredient: &str)
        -> Result<Vec<MealSummary>, MealDbError>;
    async fn categories(&self) -> Result<Vec<CategoryRecord>, MealDbError>;
    async fn list_categories(&self) -> Result<Vec<ListEntry>, MealDbError>;
    async fn list_areas(&self) -> Result<Vec<ListEntry>, MealDbError>;
}

/// reqwest-backed implementation against a configured base URL.
#[derive(Debug, Clone)]
pub struct MealDb {
    http: reqwest::Client,
    base_url: String,
}

impl MealDb {
    pub fn new(config: &MealDbConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base_url}/{path}?{query}` and decode the JSON body.
    ///
    /// Query values are percent-encoded by reqwest, so free-text search
    /// input needs no escaping at call sites.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MealDbError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MealDbError::Status(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MealDbClient for MealDb {
    async fn random(&self) -> Result<Vec<MealRecord>, MealDbError> {
        let envelope: MealsEnvelope = self.get_json("random.php", &[]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>, MealDbError> {
        let envelope: MealsEnvelope = self.get_json("search.php", &[("s", name)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn search_by_letter(&self, letter: char) -> Result<Vec<MealRecord>, MealDbError> {
        let letter = letter.to_string();
        let envelope: MealsEnvelope = self.get_json("search.php", &[("f", &*letter)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn lookup(&self, id: &str) -> Result<Vec<MealRecord>, MealDbError> {
        let envelope: MealsEnvelope = self.get_json("lookup.php", &[("i", id)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealSummary>, MealDbError> {
        let envelope: SummariesEnvelope = self.get_json("filter.php", &[("c", category)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn filter_by_area(&self, area: &str) -> Result<Vec<MealSummary>, MealDbError> {
        let envelope: SummariesEnvelope = self.get_json("filter.php", &[("a", area)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn filter_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<MealSummary>, MealDbError> {
        let envelope: SummariesEnvelope =
            self.get_json("filter.php", &[("i", ingredient)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn categories(&self) -> Result<Vec<CategoryRecord>, MealDbError> {
        let envelope: CategoriesEnvelope = self.get_json("categories.php", &[]).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    async fn list_categories(&self) -> Result<Vec<ListEntry>, MealDbError> {
        let envelope: ListEnvelope = self.get_json("list.php", &[("c", "list")]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn list_areas(&self) -> Result<Vec<ListEntry>, MealDbError> {
        let envelope: ListEnvelope = self.get_json("list.php", &[("a", "list")]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }
}
