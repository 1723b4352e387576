//! Food image catalog
//!
//! The model never supplies dish images; they are looked up here by name.

use std::collections::HashMap;

use tracing::debug;

use crate::config::FoodImagesConfig;

/// Placeholder for dishes with no catalog entry
pub const DEFAULT_FOOD_IMAGE: &str = "https://via.placeholder.com/400?text=Delicious+Food";

/// Built-in dishes and their images
const BUILTIN: &[(&str, &str)] = &[
    (
        "Vada Pav",
        "https://c.ndtvimg.com/2023-01/m9i5s47o_vada-pav_625x300_20_January_23.jpg",
    ),
    (
        "Pav Bhaji",
        "https://www.vegrecipesofindia.com/wp-content/uploads/2021/10/pav-bhaji-recipe-1.jpg",
    ),
    (
        "Bombil Fry",
        "https://www.archanaskitchen.com/images/archanaskitchen/1-Author/Kalyani__sweetspicy/Bombil_Fry_Recipe_Crispy_Bombay_Duck_Fry.jpg",
    ),
    (
        "Misal Pav",
        "https://www.cookwithmanali.com/wp-content/uploads/2015/11/Kolhapuri-Misal-Pav-500x500.jpg",
    ),
    (
        "Bhakarwadi",
        "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/01/bakarwadi-recipe.jpg",
    ),
    (
        "Sabudana Khichdi",
        "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/09/sabudana-khichdi-recipe.jpg",
    ),
    ("Naan Qalia", "https://i.ytimg.com/vi/i7N8ih_m-18/maxresdefault.jpg"),
    (
        "Puran Poli",
        "https://www.indianhealthyrecipes.com/wp-content/uploads/2022/02/puran-poli-recipe.jpg",
    ),
];

/// Dish name to image URL, matched case-insensitively on the whole name
#[derive(Debug, Clone)]
pub struct FoodImageCatalog {
    /// Keyed by lowercased dish name
    entries: HashMap<String, String>,
    default: String,
}

impl FoodImageCatalog {
    /// Catalog with the built-in dishes only
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, url)| (name.to_lowercase(), (*url).to_string()))
                .collect(),
            default: DEFAULT_FOOD_IMAGE.to_string(),
        }
    }

    /// Built-in dishes plus configured extras; extras win on a name clash
    pub fn from_config(config: &FoodImagesConfig) -> Self {
        debug!(extra = config.extra.len(), "FoodImageCatalog::from_config: called");
        let mut catalog = Self::builtin();
        for (name, url) in &config.extra {
            catalog.entries.insert(name.to_lowercase(), url.clone());
        }
        if !config.default.trim().is_empty() {
            catalog.default = config.default.clone();
        }
        catalog
    }

    /// Image for a dish, or the placeholder when the name is empty or unknown
    pub fn resolve(&self, name: &str) -> &str {
        if name.is_empty() {
            return &self.default;
        }
        self.entries
            .get(&name.to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

impl Default for FoodImageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
