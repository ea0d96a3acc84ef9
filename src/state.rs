use std::sync::Arc;

use crate::config::AppConfig;
use crate::mealdb::MealDb;
use crate::recipes::{RecipeService, SearchSession};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub recipes: RecipeService,
    /// Shared typeahead session; later responses invalidate earlier ones.
    pub search: Arc<SearchSession>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = Arc::new(MealDb::new(&config.mealdb)?);
        let recipes = RecipeService::new(db, config.featured_retry_limit);
        let search = Arc::new(SearchSession::new(recipes.clone()));
        Ok(Self {
            config,
            recipes,
            search,
        })
    }

    /// State over an upstream that answers every query with zero results.
    /// Keeps handler tests off the network.
    #[cfg(test)]
    pub fn fake() -> Self {
        use async_trait::async_trait;

        use crate::config::MealDbConfig;
        use crate::mealdb::{
            CategoryRecord, ListEntry, MealDbClient, MealDbError, MealRecord, MealSummary,
        };

        struct EmptyMealDb;

        #[async_trait]
        impl MealDbClient for EmptyMealDb {
            async fn random(&self) -> Result<Vec<MealRecord>, MealDbError> {
                Ok(Vec::new())
            }
            async fn search_by_name(&self, _name: &str) -> Result<Vec<MealRecord>, MealDbError> {
                Ok(Vec::new())
            }
            async fn search_by_letter(
                &self,
                _letter: char,
            ) -> Result<Vec<MealRecord>, MealDbError> {
                Ok(Vec::new())
            }
            async fn lookup(&self, _id: &str) -> Result<Vec<MealRecord>, MealDbError> {
                Ok(Vec::new())
            }
            async fn filter_by_category(
                &self,
                _category: &str,
            ) -> Result<Vec<MealSummary>, MealDbError> {
                Ok(Vec::new())
            }
            async fn filter_by_area(&self, _area: &str) -> Result<Vec<MealSummary>, MealDbError> {
                Ok(Vec::new())
            }
            async fn filter_by_ingredient(
                &self,
                _ingredient: &str,
            ) -> Result<Vec<MealSummary>, MealDbError> {
                Ok(Vec::new())
            }
            async fn categories(&self) -> Result<Vec<CategoryRecord>, MealDbError> {
                Ok(Vec::new())
            }
            async fn list_categories(&self) -> Result<Vec<ListEntry>, MealDbError> {
                Ok(Vec::new())
            }
            async fn list_areas(&self) -> Result<Vec<ListEntry>, MealDbError> {
                Ok(Vec::new())
            }
        }

        let config = Arc::new(AppConfig {
            mealdb: MealDbConfig {
                base_url: "https://fake.local/api/json/v1/1".into(),
                timeout_secs: 1,
                connect_timeout_secs: 1,
            },
            featured_retry_limit: 5,
        });
        let recipes = RecipeService::new(Arc::new(EmptyMealDb), config.featured_retry_limit);
        let search = Arc::new(SearchSession::new(recipes.clone()));
        Self {
            config,
            recipes,
            search,
        }
    }
}
