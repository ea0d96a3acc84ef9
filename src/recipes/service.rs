use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::mealdb::{MealDbClient, MealDbError, MealSummary};

use super::model::{Category, Meal};

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("upstream returned no recipes")]
    NotFound,
    #[error("first-letter search takes exactly one alphabetic character")]
    InvalidLetter,
    #[error(transparent)]
    Upstream(#[from] MealDbError),
}

/// Outcome of one detail lookup inside a filter fan-out. A failed or empty
/// lookup becomes `Skipped` instead of failing the batch.
#[derive(Debug)]
pub enum Hydration {
    Ok(Meal),
    Skipped { id: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Skip {
    pub id: String,
    pub reason: String,
}

/// Result of a two-phase filter query: the meals that hydrated plus the
/// entries that were dropped along the way. An all-skipped outcome still
/// reads as success; `skipped` lets callers tell it apart from zero matches.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub meals: Vec<Meal>,
    pub skipped: Vec<Skip>,
}

/// Retrieval and aggregation over the upstream client. Stateless apart from
/// the injected client and config knobs; every call is a fresh round trip.
#[derive(Clone)]
pub struct RecipeService {
    db: Arc<dyn MealDbClient>,
    featured_retry_limit: u32,
}

impl RecipeService {
    pub fn new(db: Arc<dyn MealDbClient>, featured_retry_limit: u32) -> Self {
        Self {
            db,
            // An exhausted retry loop must still return the last batch.
            featured_retry_limit: featured_retry_limit.max(1),
        }
    }

    pub async fn random_meal(&self) -> Result<Meal, RecipeError> {
        let records = self.db.random().await?;
        let record = records.into_iter().next().ok_or(RecipeError::NotFound)?;
        Meal::from_record(record).map_err(|_| RecipeError::NotFound)
    }

    /// `count` independent random picks, fetched concurrently. Branches
    /// that fail or do not normalize are dropped. A batch with a repeated
    /// id is refetched whole, up to the configured ceiling; whatever ids
    /// still collide after that are filtered out rather than returned twice.
    pub async fn featured(&self, count: usize) -> Result<Vec<Meal>, RecipeError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut batch = self.random_batch(count).await;
        let mut attempt = 1;
        while attempt < self.featured_retry_limit && has_duplicate_ids(&batch) {
            warn!(attempt, "featured batch repeated a meal id, refetching");
            batch = self.random_batch(count).await;
            attempt += 1;
        }
        Ok(dedup_by_id(batch))
    }

    async fn random_batch(&self, count: usize) -> Vec<Meal> {
        join_all((0..count).map(|_| self.random_meal()))
            .await
            .into_iter()
            .filter_map(Result::ok)
            .collect()
    }

    /// Name search. Matching nothing is a plain empty vec, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<Meal>, RecipeError> {
        let records = self.db.search_by_name(query).await?;
        Ok(normalize_all(records))
    }

    pub async fn search_by_letter(&self, letter: &str) -> Result<Vec<Meal>, RecipeError> {
        let mut chars = letter.chars();
        let first = chars.next().filter(|c| c.is_alphabetic());
        let (Some(letter), None) = (first, chars.next()) else {
            return Err(RecipeError::InvalidLetter);
        };
        let records = self.db.search_by_letter(letter).await?;
        Ok(normalize_all(records))
    }

    /// Detail lookup. Ids get probed for recipes deleted upstream, so a
    /// miss is `None`, not a failure.
    pub async fn meal_by_id(&self, id: &str) -> Result<Option<Meal>, RecipeError> {
        let records = self.db.lookup(id).await?;
        Ok(records
            .into_iter()
            .next()
            .and_then(|record| Meal::from_record(record).ok()))
    }

    pub async fn by_category(&self, category: &str) -> Result<FilterOutcome, RecipeError> {
        let summaries = self.db.filter_by_category(category).await?;
        Ok(self.hydrate(summaries).await)
    }

    pub async fn by_area(&self, area: &str) -> Result<FilterOutcome, RecipeError> {
        let summaries = self.db.filter_by_area(area).await?;
        Ok(self.hydrate(summaries).await)
    }

    pub async fn by_ingredient(&self, ingredient: &str) -> Result<FilterOutcome, RecipeError> {
        let summaries = self.db.filter_by_ingredient(ingredient).await?;
        Ok(self.hydrate(summaries).await)
    }

    /// Phase two of a filter query: the filter endpoints return id, name
    /// and thumbnail only, so every entry is re-fetched for full detail,
    /// in parallel. One bad id drops that entry, never the batch.
    async fn hydrate(&self, summaries: Vec<MealSummary>) -> FilterOutcome {
        let outcomes = join_all(summaries.into_iter().map(|s| self.hydrate_one(s))).await;
        let mut result = FilterOutcome::default();
        for outcome in outcomes {
            match outcome {
                Hydration::Ok(meal) => result.meals.push(meal),
                Hydration::Skipped { id, reason } => {
                    warn!(%id, %reason, "dropping entry from filter result");
                    result.skipped.push(Skip { id, reason });
                }
            }
        }
        result
    }

    async fn hydrate_one(&self, summary: MealSummary) -> Hydration {
        let Some(id) = summary.id.filter(|id| !id.trim().is_empty()) else {
            return Hydration::Skipped {
                id: String::new(),
                reason: "filter entry has no id".into(),
            };
        };
        match self.meal_by_id(&id).await {
            Ok(Some(meal)) => Hydration::Ok(meal),
            Ok(None) => Hydration::Skipped {
                id,
                reason: "not found on detail lookup".into(),
            },
            Err(err) => Hydration::Skipped {
                id,
                reason: err.to_string(),
            },
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, RecipeError> {
        let records = self.db.categories().await?;
        Ok(records.into_iter().map(Category::from).collect())
    }

    /// Selector values, upstream order kept, duplicates not filtered.
    pub async fn category_names(&self) -> Result<Vec<String>, RecipeError> {
        let entries = self.db.list_categories().await?;
        Ok(entries.into_iter().filter_map(|e| e.category).collect())
    }

    pub async fn area_names(&self) -> Result<Vec<String>, RecipeError> {
        let entries = self.db.list_areas().await?;
        Ok(entries.into_iter().filter_map(|e| e.area).collect())
    }
}

fn normalize_all(records: Vec<crate::mealdb::MealRecord>) -> Vec<Meal> {
    records
        .into_iter()
        .filter_map(|record| match Meal::from_record(record) {
            Ok(meal) => Some(meal),
            Err(err) => {
                debug!(%err, "dropping record that failed normalization");
                None
            }
        })
        .collect()
}

fn has_duplicate_ids(meals: &[Meal]) -> bool {
    let mut seen = HashSet::new();
    meals.iter().any(|meal| !seen.insert(meal.id.as_str()))
}

fn dedup_by_id(meals: Vec<Meal>) -> Vec<Meal> {
    let mut seen = HashSet::new();
    meals
        .into_iter()
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use crate::mealdb::{CategoryRecord, ListEntry, MealRecord};

    use super::*;

    fn record(id: &str) -> MealRecord {
        serde_json::from_str(&format!(
            r#"{{"idMeal": "{id}", "strMeal": "Meal {id}", "strIngredient1": "Salt"}}"#
        ))
        .expect("record should deserialize")
    }

    fn summary(id: &str) -> MealSummary {
        MealSummary {
            id: Some(id.to_string()),
            name: Some(format!("Meal {id}")),
            thumb: None,
        }
    }

    /// Scripted stand-in for the upstream client. `random_ids` is cycled
    /// one id per call; lookups consult the failure/missing lists.
    #[derive(Default)]
    struct FakeMealDb {
        calls: AtomicUsize,
        random_ids: Vec<&'static str>,
        search_ids: Vec<&'static str>,
        summaries: Vec<MealSummary>,
        lookup_fail: Vec<&'static str>,
        lookup_missing: Vec<&'static str>,
    }

    impl FakeMealDb {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MealDbClient for FakeMealDb {
        async fn random(&self) -> Result<Vec<MealRecord>, MealDbError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.random_ids.is_empty() {
                return Ok(Vec::new());
            }
            Ok(vec![record(self.random_ids[n % self.random_ids.len()])])
        }

        async fn search_by_name(&self, _name: &str) -> Result<Vec<MealRecord>, MealDbError> {
            Ok(self.search_ids.iter().map(|id| record(id)).collect())
        }

        async fn search_by_letter(&self, _letter: char) -> Result<Vec<MealRecord>, MealDbError> {
            Ok(self.search_ids.iter().map(|id| record(id)).collect())
        }

        async fn lookup(&self, id: &str) -> Result<Vec<MealRecord>, MealDbError> {
            if self.lookup_fail.contains(&id) {
                return Err(MealDbError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            if self.lookup_missing.contains(&id) {
                return Ok(Vec::new());
            }
            Ok(vec![record(id)])
        }

        async fn filter_by_category(
            &self,
            _category: &str,
        ) -> Result<Vec<MealSummary>, MealDbError> {
            Ok(self.summaries.clone())
        }

        async fn filter_by_area(&self, _area: &str) -> Result<Vec<MealSummary>, MealDbError> {
            Ok(self.summaries.clone())
        }

        async fn filter_by_ingredient(
            &self,
            _ingredient: &str,
        ) -> Result<Vec<MealSummary>, MealDbError> {
            Ok(self.summaries.clone())
        }

        async fn categories(&self) -> Result<Vec<CategoryRecord>, MealDbError> {
            Ok(Vec::new())
        }

        async fn list_categories(&self) -> Result<Vec<ListEntry>, MealDbError> {
            Ok(vec![
                ListEntry {
                    category: Some("Beef".into()),
                    area: None,
                },
                ListEntry {
                    category: Some("Dessert".into()),
                    area: None,
                },
            ])
        }

        async fn list_areas(&self) -> Result<Vec<ListEntry>, MealDbError> {
            Ok(vec![ListEntry {
                category: None,
                area: Some("Thai".into()),
            }])
        }
    }

    fn service(fake: FakeMealDb) -> (Arc<FakeMealDb>, RecipeService) {
        let fake = Arc::new(fake);
        let service = RecipeService::new(fake.clone(), 5);
        (fake, service)
    }

    #[tokio::test]
    async fn featured_distinct_batch_needs_no_retry() {
        let (fake, service) = service(FakeMealDb {
            random_ids: vec!["1", "2", "3"],
            ..Default::default()
        });
        let meals = service.featured(3).await.expect("featured");
        assert_eq!(meals.len(), 3);
        assert_eq!(fake.call_count(), 3);
    }

    #[tokio::test]
    async fn featured_duplicate_batches_stop_at_the_ceiling() {
        // Every batch of three draws ids {7, 7, 8}, so the dedup check can
        // never pass and the loop has to bail out at the ceiling.
        let (fake, service) = service(FakeMealDb {
            random_ids: vec!["7", "7", "8"],
            ..Default::default()
        });
        let meals = service.featured(3).await.expect("featured");
        assert_eq!(fake.call_count(), 5 * 3);
        let ids: Vec<_> = meals.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"7") && ids.contains(&"8"));
    }

    #[tokio::test]
    async fn featured_zero_count_makes_no_calls() {
        let (fake, service) = service(FakeMealDb::default());
        let meals = service.featured(0).await.expect("featured");
        assert!(meals.is_empty());
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn random_meal_on_empty_upstream_is_not_found() {
        let (_, service) = service(FakeMealDb::default());
        let err = service.random_meal().await.unwrap_err();
        assert!(matches!(err, RecipeError::NotFound));
    }

    #[tokio::test]
    async fn search_matching_nothing_is_an_empty_list() {
        let (_, service) = service(FakeMealDb::default());
        let meals = service.search("zzz").await.expect("search");
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn letter_search_rejects_multi_character_input() {
        let (_, service) = service(FakeMealDb::default());
        for input in ["ab", "", "1", " "] {
            let err = service.search_by_letter(input).await.unwrap_err();
            assert!(matches!(err, RecipeError::InvalidLetter), "input {input:?}");
        }
    }

    #[tokio::test]
    async fn lookup_miss_is_none_not_an_error() {
        let (_, service) = service(FakeMealDb {
            lookup_missing: vec!["404"],
            ..Default::default()
        });
        let meal = service.meal_by_id("404").await.expect("lookup");
        assert!(meal.is_none());
    }

    #[tokio::test]
    async fn filter_drops_only_the_failing_entry() {
        let (_, service) = service(FakeMealDb {
            summaries: vec![summary("1"), summary("2"), summary("3")],
            lookup_fail: vec!["2"],
            ..Default::default()
        });
        let outcome = service.by_category("Beef").await.expect("filter");
        assert_eq!(outcome.meals.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].id, "2");
    }

    #[tokio::test]
    async fn filter_with_every_lookup_failing_is_empty_not_an_error() {
        let (_, service) = service(FakeMealDb {
            summaries: vec![summary("1"), summary("2")],
            lookup_fail: vec!["1", "2"],
            ..Default::default()
        });
        let outcome = service.by_area("Thai").await.expect("filter");
        assert!(outcome.meals.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[tokio::test]
    async fn filter_entry_without_id_is_skipped() {
        let (_, service) = service(FakeMealDb {
            summaries: vec![
                MealSummary {
                    id: None,
                    name: Some("Nameless".into()),
                    thumb: None,
                },
                summary("5"),
            ],
            ..Default::default()
        });
        let outcome = service.by_ingredient("Chicken").await.expect("filter");
        assert_eq!(outcome.meals.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
    }

    #[tokio::test]
    async fn list_names_keep_upstream_order() {
        let (_, service) = service(FakeMealDb::default());
        let names = service.category_names().await.expect("names");
        assert_eq!(names, vec!["Beef", "Dessert"]);
        let areas = service.area_names().await.expect("areas");
        assert_eq!(areas, vec!["Thai"]);
    }
}
