use serde::Serialize;

use crate::mealdb::{CategoryRecord, MealRecord, INGREDIENT_SLOTS};

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("record has no id")]
    MissingId,
}

/// Canonical recipe entity. Built fresh from one upstream record per
/// request and never mutated afterwards.
///
/// `ingredients` holds display strings in upstream slot order, each either
/// `"{measure} {ingredient}"` or the bare ingredient name; slots with no
/// ingredient are skipped, so the list never contains empty entries.
#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub category: String,
    pub area: String,
}

impl Meal {
    /// Normalize one upstream record. Fails when the record carries no
    /// usable id; callers drop such records instead of surfacing them.
    pub fn from_record(record: MealRecord) -> Result<Self, NormalizeError> {
        let id = record
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(NormalizeError::MissingId)?
            .to_string();

        let mut ingredients = Vec::new();
        for slot in 1..=INGREDIENT_SLOTS {
            let Some(ingredient) = record.ingredient(slot) else {
                continue;
            };
            match record.measure(slot) {
                Some(measure) => ingredients.push(format!("{measure} {ingredient}")),
                None => ingredients.push(ingredient.to_string()),
            }
        }

        Ok(Self {
            id,
            title: record.name.unwrap_or_default(),
            thumbnail: record.thumb.unwrap_or_default(),
            instructions: record.instructions.unwrap_or_default(),
            ingredients,
            category: record.category.unwrap_or_default(),
            area: record.area.unwrap_or_default(),
        })
    }
}

/// Canonical category with its browse metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub thumb: String,
    pub description: String,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id.unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            thumb: record.thumb.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
        }
    }
}
