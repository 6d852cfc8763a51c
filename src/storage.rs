use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("CALTRACK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("data")
}

/// Key-value persistence shim over per-key JSON files.
///
/// Every operation swallows the underlying I/O error and never propagates
/// it to the caller: a failed read is `None`, a failed write or remove is a
/// logged no-op. Callers must not assume same-tick completion.
#[derive(Debug, Clone)]
pub struct Shim {
    root: PathBuf,
}

impl Shim {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("storage read failed for {key}: {err}");
                None
            }
        }
    }

    pub async fn set_item(&self, key: &str, value: &str) {
        if let Err(err) = fs::write(self.path_for(key), value).await {
            error!("storage write failed for {key}: {err}");
        }
    }

    pub async fn remove_item(&self, key: &str) {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => error!("storage remove failed for {key}: {err}"),
        }
    }

    /// Reads and decodes one key; missing or corrupt payloads read as the
    /// type's default.
    pub async fn get_json<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.get_item(key).await else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to parse stored value for {key}: {err}");
                T::default()
            }
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(payload) => self.set_item(key, &payload).await,
            Err(err) => error!("failed to encode value for {key}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SavedItem;

    fn temp_shim(tag: &str) -> Shim {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("caltrack_shim_{tag}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Shim::new(dir)
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let shim = temp_shim("missing");
        assert_eq!(shim.get_item("nope").await, None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let shim = temp_shim("roundtrip");
        shim.set_item("k", "[1,2,3]").await;
        assert_eq!(shim.get_item("k").await.as_deref(), Some("[1,2,3]"));
        shim.remove_item("k").await;
        assert_eq!(shim.get_item("k").await, None);
    }

    #[tokio::test]
    async fn corrupt_json_reads_as_default() {
        let shim = temp_shim("corrupt");
        shim.set_item("list", "not json").await;
        let items: Vec<SavedItem> = shim.get_json("list").await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn saved_item_round_trip_preserves_fields() {
        let shim = temp_shim("item");
        let item = SavedItem {
            id: "1700000000000".to_string(),
            product_name: "Pomme".to_string(),
            nutriments: Default::default(),
            timestamp: 1_700_000_000_000,
            quantity: 150,
            nutriscore_grade: Some("a".to_string()),
        };
        shim.set_json("list", &vec![item.clone()]).await;
        let loaded: Vec<SavedItem> = shim.get_json("list").await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].product_name, item.product_name);
        assert_eq!(loaded[0].timestamp, item.timestamp);
        assert_eq!(loaded[0].quantity, item.quantity);
    }
}
