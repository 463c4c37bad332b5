//! # Recipe Catalog
//!
//! The fixed set of recipes shown on the Recipes tab, and the title search
//! that narrows it down.
//!
//! The catalog never changes at runtime. The filtered view is recomputed
//! from `(catalog, query)` on every keystroke and never stored, so there is
//! nothing to invalidate.

/// A single recipe card.
///
/// `time` and `difficulty` are display strings; nothing parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub time: String,
    pub difficulty: String,
    pub category: String,
}

impl Recipe {
    pub fn new(
        id: u32,
        title: &str,
        image: &str,
        time: &str,
        difficulty: &str,
        category: &str,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            image: image.to_string(),
            time: time.to_string(),
            difficulty: difficulty.to_string(),
            category: category.to_string(),
        }
    }

    /// True if `needle` (already lowercased) occurs anywhere in the title.
    fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

const IMAGE_BASE: &str = "https://cdn.poehali.dev/projects/9c6a889a-5a92-4de1-8238-c5da71033257/files";

/// Ordered, immutable collection of recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The recipes bundled with the app.
    pub fn builtin() -> Self {
        Self::new(vec![
            Recipe::new(
                1,
                "Pasta Carbonara",
                &format!("{IMAGE_BASE}/7468c85a-4868-4876-8d66-8258002e4486.jpg"),
                "30 min",
                "Medium",
                "Main dish",
            ),
            Recipe::new(
                2,
                "Fresh Salad",
                &format!("{IMAGE_BASE}/0a1937ee-53c7-4566-80e4-d0fb521ecd55.jpg"),
                "15 min",
                "Easy",
                "Salads",
            ),
            Recipe::new(
                3,
                "Vegetable Stew",
                &format!("{IMAGE_BASE}/6b394fd5-1473-4d86-992c-df24ce84a618.jpg"),
                "45 min",
                "Medium",
                "Main dish",
            ),
        ])
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes whose title contains `query`, ignoring case, in catalog order.
    ///
    /// The query is used as typed (no trimming). An empty query matches
    /// every recipe.
    pub fn filter(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.to_lowercase();
        self.recipes
            .iter()
            .filter(|recipe| recipe.title_contains(&needle))
            .collect()
    }
}
