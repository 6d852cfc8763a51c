use crate::models::SearchResult;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_BASE: &str = "https://world.openfoodfacts.org";

const FIELDS: &str = "product_name,nutriments,nutriscore_grade";

/// Lookup failures. The UI collapses both variants into one short error
/// line; the distinction only drives the HTTP status we answer with.
#[derive(Debug)]
pub enum OffError {
    NotFound,
    Upstream(String),
}

impl fmt::Display for OffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffError::NotFound => write!(f, "no product found"),
            OffError::Upstream(detail) => write!(f, "food database unavailable: {detail}"),
        }
    }
}

impl std::error::Error for OffError {}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    products: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct ProductPage {
    #[serde(default)]
    product: Option<SearchResult>,
}

#[derive(Clone)]
pub struct OffClient {
    http: reqwest::Client,
    base: String,
}

impl OffClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// First product matching a free-text query. A non-2xx answer or an
    /// empty `products` array both read as not found.
    pub async fn search(&self, terms: &str) -> Result<SearchResult, OffError> {
        let url = format!("{}/cgi/search.pl", self.base);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("search_terms", terms),
                ("search_simple", "1"),
                ("json", "1"),
                ("page_size", "1"),
                ("fields", FIELDS),
            ])
            .send()
            .await
            .map_err(|err| OffError::Upstream(err.to_string()))?;
        if !response.status().is_success() {
            return Err(OffError::NotFound);
        }
        let page: SearchPage = response
            .json()
            .await
            .map_err(|err| OffError::Upstream(err.to_string()))?;
        page.products.into_iter().next().ok_or(OffError::NotFound)
    }

    /// Product behind an EAN barcode; absence of the `product` object is an
    /// error.
    pub async fn product_by_barcode(&self, ean: &str) -> Result<SearchResult, OffError> {
        let url = format!("{}/api/v2/product/{ean}.json", self.base);
        let response = self
            .http
            .get(&url)
            .query(&[("fields", FIELDS)])
            .send()
            .await
            .map_err(|err| OffError::Upstream(err.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(OffError::NotFound);
        }
        if !response.status().is_success() {
            return Err(OffError::Upstream(format!("HTTP {}", response.status())));
        }
        let page: ProductPage = response
            .json()
            .await
            .map_err(|err| OffError::Upstream(err.to_string()))?;
        page.product.ok_or(OffError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_page_decodes_first_product() {
        let raw = r#"{
            "count": 1,
            "products": [{
                "product_name": "Yaourt nature",
                "nutriments": {
                    "energy-kcal_100g": 61,
                    "fat_100g": 3.2,
                    "sugars_100g": 4.7,
                    "proteins_100g": 3.5
                },
                "nutriscore_grade": "b"
            }]
        }"#;
        let page: SearchPage = serde_json::from_str(raw).unwrap();
        let first = page.products.into_iter().next().unwrap();
        assert_eq!(first.product_name.as_deref(), Some("Yaourt nature"));
        let n = first.nutriments.unwrap();
        assert_eq!(n.kcal_100g(), Some(61.0));
        assert_eq!(n.carbs_100g(), Some(4.7));
    }

    #[test]
    fn product_page_without_product_is_none() {
        let page: ProductPage = serde_json::from_str(r#"{"status": 0}"#).unwrap();
        assert!(page.product.is_none());
    }
}
