use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// How many numbered ingredient/measure slots the upstream schema carries.
pub const INGREDIENT_SLOTS: usize = 20;

/// Full meal record as returned by `random.php`, `search.php` and
/// `lookup.php`. Every field may be null, empty or missing; all three read
/// as "absent". The numbered `strIngredientN` / `strMeasureN` pairs land in
/// the flattened map and are read back by slot index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumb: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MealRecord {
    /// Trimmed, non-empty value of a suffixed field, or None.
    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.extra
            .get(&format!("{prefix}{index}"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn ingredient(&self, index: usize) -> Option<&str> {
        self.slot("strIngredient", index)
    }

    pub fn measure(&self, index: usize) -> Option<&str> {
        self.slot("strMeasure", index)
    }
}

/// Partial record from the `filter.php` endpoints: id, name and thumbnail
/// only. Full detail requires a follow-up lookup by id.
#[derive(Debug, Clone, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumb: Option<String>,
}

/// Category metadata record from `categories.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "idCategory")]
    pub id: Option<String>,
    #[serde(rename = "strCategory")]
    pub name: Option<String>,
    #[serde(rename = "strCategoryThumb")]
    pub thumb: Option<String>,
    #[serde(rename = "strCategoryDescription")]
    pub description: Option<String>,
}

/// Entry of the `list.php` enumeration endpoints. Which field is set
/// depends on the query (`c=list` fills the category, `a=list` the area).
#[derive(Debug, Clone, Deserialize)]
pub struct ListEntry {
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    pub meals: Option<Vec<MealRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct SummariesEnvelope {
    pub meals: Option<Vec<MealSummary>>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesEnvelope {
    pub categories: Option<Vec<CategoryRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    pub meals: Option<Vec<ListEntry>>,
}
