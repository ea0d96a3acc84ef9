use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::model::Meal;
use super::service::{RecipeError, RecipeService};

/// Serializes a stream of superseding searches (typeahead input) against
/// the service. Each call claims a fresh generation before suspending; a
/// response that resolves after a newer call has started is discarded as
/// `Ok(None)` instead of clobbering newer state. Late failures are dropped
/// the same way, so a stale error can never replace a fresh result either.
pub struct SearchSession {
    service: RecipeService,
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new(service: RecipeService) -> Self {
        Self {
            service,
            generation: AtomicU64::new(0),
        }
    }

    /// `Ok(None)` means "superseded, ignore"; only the newest in-flight
    /// search can produce `Ok(Some(..))` or an error.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<Meal>>, RecipeError> {
        let claimed = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.service.search(query).await;
        if self.generation.load(Ordering::SeqCst) != claimed {
            debug!(query, "discarding superseded search response");
            return Ok(None);
        }
        result.map(Some)
    }
}
