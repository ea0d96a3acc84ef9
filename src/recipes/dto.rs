use serde::{Deserialize, Serialize};

use super::model::Meal;
use super::service::FilterOutcome;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    #[serde(default = "default_featured_count")]
    pub count: usize,
}

fn default_featured_count() -> usize {
    3
}

/// Filter views keep rendering when single entries drop out; the skip count
/// lets the client tell a thinned-out result from a genuine zero-match.
#[derive(Debug, Serialize)]
pub struct FilterResult {
    pub meals: Vec<Meal>,
    pub skipped: usize,
}

impl From<FilterOutcome> for FilterResult {
    fn from(outcome: FilterOutcome) -> Self {
        Self {
            meals: outcome.meals,
            skipped: outcome.skipped.len(),
        }
    }
}

/// Typeahead reply. `superseded` marks a response that lost the race to a
/// newer query; clients drop it instead of rendering.
#[derive(Debug, Serialize)]
pub struct TypeaheadResult {
    pub superseded: bool,
    pub meals: Vec<Meal>,
}
