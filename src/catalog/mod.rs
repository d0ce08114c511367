//! Catalog search and filtering.
//!
//! Works over recipe lists already fetched from the API:
//! - Free-text search across selected fields
//! - Filter groups (preparation time, category) with per-item counts
//! - Applying the user's filter selection

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::duration::DurationBucket;
use crate::models::{Recipe, RecipeField};

/// Fields searched when the caller does not pick any.
pub const DEFAULT_SEARCH_FIELDS: [RecipeField; 2] = [RecipeField::Title, RecipeField::Category];

pub const DURATION_GROUP_ID: &str = "tempo";
pub const CATEGORY_GROUP_ID: &str = "categoria";

/// One selectable option inside a filter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// A named set of filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    pub id: String,
    pub label: String,
    pub items: Vec<FilterItem>,
}

/// Selected item ids, keyed by group id.
pub type SelectedFilters = HashMap<String, HashSet<String>>;

/// A recipe together with its derived preparation time, for export.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(rename = "prepMinutes")]
    pub prep_minutes: Option<u64>,
    #[serde(rename = "durationBucket")]
    pub duration_bucket: DurationBucket,
}

/// Keep recipes whose fields contain `term`, case-insensitively.
///
/// A blank term keeps everything. Order is preserved.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    term: &str,
    fields: &[RecipeField],
) -> Vec<&'a Recipe> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return recipes.iter().collect();
    }

    let matches: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| {
            fields
                .iter()
                .any(|&field| recipe.field(field).to_lowercase().contains(&term))
        })
        .collect();

    debug!("Search {:?} matched {} of {} recipes", term, matches.len(), recipes.len());
    matches
}

/// Group recipes by preparation-time bucket.
pub fn bucket_recipes<'a, I>(recipes: I) -> BTreeMap<DurationBucket, Vec<&'a Recipe>>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut buckets: BTreeMap<DurationBucket, Vec<&Recipe>> = BTreeMap::new();
    for recipe in recipes {
        buckets.entry(recipe.duration_bucket()).or_default().push(recipe);
    }
    buckets
}

/// Preparation-time filter group. Empty buckets are left out.
pub fn duration_filter_group<'a, I>(recipes: I) -> FilterGroup
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let buckets = bucket_recipes(recipes);

    let items = DurationBucket::ALL
        .iter()
        .filter_map(|bucket| {
            let count = buckets.get(bucket).map(Vec::len)?;
            Some(FilterItem {
                id: bucket.id().to_string(),
                label: bucket.label().to_string(),
                count: Some(item_count(count)),
            })
        })
        .collect();

    FilterGroup {
        id: DURATION_GROUP_ID.to_string(),
        label: "Tempo de preparo".to_string(),
        items,
    }
}

/// Category filter group, one item per distinct category.
pub fn category_filter_group<'a, I>(recipes: I) -> FilterGroup
where
    I: IntoIterator<Item = &'a Recipe>,
{
    // id -> (first spelling seen, count)
    let mut seen: HashMap<String, (String, u32)> = HashMap::new();

    for recipe in recipes {
        let Some(id) = category_id(recipe) else {
            continue;
        };
        let label = recipe.field(RecipeField::Category).trim();
        seen.entry(id).or_insert_with(|| (label.to_string(), 0)).1 += 1;
    }

    let mut items: Vec<FilterItem> = seen
        .into_iter()
        .map(|(id, (label, count))| FilterItem {
            id,
            label,
            count: Some(count),
        })
        .collect();
    items.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));

    FilterGroup {
        id: CATEGORY_GROUP_ID.to_string(),
        label: "Categoria".to_string(),
        items,
    }
}

/// Filter counts cap at `u32::MAX`.
fn item_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn category_id(recipe: &Recipe) -> Option<String> {
    let id = recipe.field(RecipeField::Category).trim().to_lowercase();
    (!id.is_empty()).then_some(id)
}

/// Apply a filter selection: any item within a group, every group.
pub fn apply_filters<'a, I>(recipes: I, selected: &SelectedFilters) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    for group in selected.keys() {
        if group != DURATION_GROUP_ID && group != CATEGORY_GROUP_ID {
            warn!("Ignoring unknown filter group: {}", group);
        }
    }

    let durations = active(selected, DURATION_GROUP_ID);
    let categories = active(selected, CATEGORY_GROUP_ID);

    recipes
        .into_iter()
        .filter(|recipe| {
            durations.map_or(true, |ids| ids.contains(recipe.duration_bucket().id()))
        })
        .filter(|recipe| {
            categories.map_or(true, |ids| {
                category_id(recipe).is_some_and(|id| ids.contains(&id))
            })
        })
        .collect()
}

fn active<'s>(selected: &'s SelectedFilters, group: &str) -> Option<&'s HashSet<String>> {
    selected.get(group).filter(|ids| !ids.is_empty())
}

/// Number of selected items across all groups.
pub fn total_selected(selected: &SelectedFilters) -> usize {
    selected.values().map(HashSet::len).sum()
}

pub fn annotate(recipe: &Recipe) -> AnnotatedRecipe {
    let prep_minutes = recipe.prep_minutes();
    AnnotatedRecipe {
        recipe: recipe.clone(),
        prep_minutes,
        duration_bucket: DurationBucket::from_minutes(prep_minutes),
    }
}
