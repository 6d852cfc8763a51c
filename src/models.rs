use serde::{Deserialize, Serialize};

/// Storage keys, stable across the app's lifetime.
pub const HISTORY_KEY: &str = "cal-history-v1";
pub const RECENTS_KEY: &str = "cal-recents-v1";
pub const FAVORITES_KEY: &str = "cal-favorites-v1";
pub const PREFS_KEY: &str = "cal-prefs-v1";

pub const RECENTS_CAP: usize = 10;
pub const MIN_TARGET_KCAL: u32 = 800;

/// Daily macro maxima, balanced for a 2000 kcal target.
pub const MAX_CARBS_G: f64 = 250.0;
pub const MAX_FAT_G: f64 = 70.0;
pub const MAX_PROTEIN_G: f64 = 75.0;

/// Per-100g nutrient values, normalized at the serde boundary.
///
/// The upstream food database spells the energy field either
/// `energy-kcal_100g` or `energy_kcal_100g`; both decode into the single
/// canonical field here. Same for `carbohydrates_100g` / `carbs_100g`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Nutriments {
    #[serde(
        rename = "energy-kcal_100g",
        alias = "energy_kcal_100g",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub energy_kcal_100g: Option<f64>,
    #[serde(alias = "carbs_100g", default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins_100g: Option<f64>,
}

impl Nutriments {
    pub fn kcal_100g(&self) -> Option<f64> {
        self.energy_kcal_100g
    }

    /// Carbohydrates per 100g, falling back to sugars when absent.
    pub fn carbs_100g(&self) -> Option<f64> {
        self.carbohydrates_100g.or(self.sugars_100g)
    }
}

/// One product as returned by the food-database endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriments: Option<Nutriments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriscore_grade: Option<String>,
}

fn default_quantity() -> u32 {
    100
}

/// One saved serving. `id` is a millisecond-epoch string; `quantity` is
/// grams and only ever mutated through the quantity endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: String,
    pub product_name: String,
    pub nutriments: Nutriments,
    pub timestamp: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriscore_grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub id: String,
    pub item: SearchResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub item: SearchResult,
}

fn default_language() -> String {
    "fr".to_string()
}

fn default_dark_mode() -> bool {
    true
}

fn default_target_kcal() -> u32 {
    2000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_target_kcal")]
    pub target_kcal: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: default_dark_mode(),
            language: default_language(),
            target_kcal: default_target_kcal(),
        }
    }
}

/// Quantity-scaled totals for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DayTotals {
    pub grams: u64,
    pub kcal: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub protein_g: f64,
}

#[derive(Debug, Serialize)]
pub struct MacroLimits {
    pub carbs_g: f64,
    pub fat_g: f64,
    pub protein_g: f64,
}

impl Default for MacroLimits {
    fn default() -> Self {
        Self {
            carbs_g: MAX_CARBS_G,
            fat_g: MAX_FAT_G,
            protein_g: MAX_PROTEIN_G,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    pub items: Vec<SavedItem>,
    pub totals: DayTotals,
    pub limits: MacroLimits,
    pub target_kcal: u32,
}

#[derive(Debug, Serialize)]
pub struct TrackingCell {
    pub date: String,
    pub in_month: bool,
    pub kcal: i64,
    pub pct: f64,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct TrackingRow {
    pub weekday: u8,
    pub cells: Vec<TrackingCell>,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub month: String,
    pub target_kcal: u32,
    pub weeks: Vec<String>,
    pub rows: Vec<TrackingRow>,
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorite: bool,
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Serialize)]
pub struct UpdatesResponse {
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutriments_accepts_both_energy_spellings() {
        let dashed: Nutriments =
            serde_json::from_str(r#"{"energy-kcal_100g": 52.0}"#).unwrap();
        assert_eq!(dashed.kcal_100g(), Some(52.0));

        let underscored: Nutriments =
            serde_json::from_str(r#"{"energy_kcal_100g": 52.0}"#).unwrap();
        assert_eq!(underscored.kcal_100g(), Some(52.0));
    }

    #[test]
    fn nutriments_carbs_fall_back_to_sugars() {
        let sugars_only: Nutriments =
            serde_json::from_str(r#"{"sugars_100g": 10.5}"#).unwrap();
        assert_eq!(sugars_only.carbs_100g(), Some(10.5));

        let both: Nutriments =
            serde_json::from_str(r#"{"carbohydrates_100g": 30.0, "sugars_100g": 10.5}"#)
                .unwrap();
        assert_eq!(both.carbs_100g(), Some(30.0));
    }

    #[test]
    fn saved_item_quantity_defaults_to_100() {
        let item: SavedItem = serde_json::from_str(
            r#"{"id": "1", "product_name": "Yaourt", "nutriments": {}, "timestamp": 0}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 100);
    }

    #[test]
    fn preferences_defaults() {
        let prefs = Preferences::default();
        assert!(prefs.dark_mode);
        assert_eq!(prefs.language, "fr");
        assert_eq!(prefs.target_kcal, 2000);
    }
}
