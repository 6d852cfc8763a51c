use crate::models::{
    FavoriteEntry, Preferences, RecentEntry, SavedItem, FAVORITES_KEY, HISTORY_KEY, PREFS_KEY,
    RECENTS_CAP, RECENTS_KEY,
};
use crate::storage::Shim;
use tokio::sync::{watch, Mutex};

#[derive(Debug, Clone, Default)]
pub struct StoreData {
    pub history: Vec<SavedItem>,
    pub recents: Vec<RecentEntry>,
    pub favorites: Vec<FavoriteEntry>,
    pub preferences: Preferences,
}

/// In-memory copy of everything persisted, with a watch channel that
/// notifies subscribers on every write. Consumers re-read on notification
/// instead of polling on a timer.
///
/// Writes are last-write-wins: two quantity edits landing in the same
/// instant clobber each other, which is accepted for a single local user.
/// Persistence is optimistic; a failed write is logged by the shim and the
/// in-memory update stands.
pub struct Store {
    shim: Shim,
    data: Mutex<StoreData>,
    revision: watch::Sender<u64>,
}

impl Store {
    pub async fn load(shim: Shim) -> Self {
        let data = StoreData {
            history: shim.get_json(HISTORY_KEY).await,
            recents: shim.get_json(RECENTS_KEY).await,
            favorites: shim.get_json(FAVORITES_KEY).await,
            preferences: shim.get_json(PREFS_KEY).await,
        };
        let (revision, _) = watch::channel(0);
        Self {
            shim,
            data: Mutex::new(data),
            revision,
        }
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    pub async fn history(&self) -> Vec<SavedItem> {
        self.data.lock().await.history.clone()
    }

    pub async fn recents(&self) -> Vec<RecentEntry> {
        self.data.lock().await.recents.clone()
    }

    pub async fn favorites(&self) -> Vec<FavoriteEntry> {
        self.data.lock().await.favorites.clone()
    }

    pub async fn preferences(&self) -> Preferences {
        self.data.lock().await.preferences.clone()
    }

    /// Prepends a serving to the history, newest first.
    pub async fn save_item(&self, item: SavedItem) {
        let mut data = self.data.lock().await;
        data.history.insert(0, item);
        self.shim.set_json(HISTORY_KEY, &data.history).await;
        self.notify();
    }

    pub async fn set_quantity(&self, id: &str, quantity: u32) -> Option<SavedItem> {
        let mut data = self.data.lock().await;
        let updated = {
            let item = data.history.iter_mut().find(|item| item.id == id)?;
            item.quantity = quantity;
            item.clone()
        };
        self.shim.set_json(HISTORY_KEY, &data.history).await;
        self.notify();
        Some(updated)
    }

    pub async fn remove_item(&self, id: &str) -> bool {
        let mut data = self.data.lock().await;
        let before = data.history.len();
        data.history.retain(|item| item.id != id);
        if data.history.len() == before {
            return false;
        }
        self.shim.set_json(HISTORY_KEY, &data.history).await;
        self.notify();
        true
    }

    /// Records a successful lookup, newest first, capped.
    pub async fn push_recent(&self, entry: RecentEntry) {
        let mut data = self.data.lock().await;
        data.recents.insert(0, entry);
        data.recents.truncate(RECENTS_CAP);
        self.shim.set_json(RECENTS_KEY, &data.recents).await;
        self.notify();
    }

    /// Toggles a favorite, matched by product name. Returns whether the
    /// entry is a favorite after the toggle.
    pub async fn toggle_favorite(&self, entry: FavoriteEntry) -> (bool, Vec<FavoriteEntry>) {
        let mut data = self.data.lock().await;
        let name = entry.item.product_name.clone();
        let exists = data
            .favorites
            .iter()
            .any(|fav| fav.item.product_name == name);
        if exists {
            data.favorites.retain(|fav| fav.item.product_name != name);
        } else {
            data.favorites.insert(0, entry);
        }
        self.shim.set_json(FAVORITES_KEY, &data.favorites).await;
        self.notify();
        (!exists, data.favorites.clone())
    }

    pub async fn set_preferences(&self, preferences: Preferences) -> Preferences {
        let mut data = self.data.lock().await;
        data.preferences = preferences;
        self.shim.set_json(PREFS_KEY, &data.preferences).await;
        self.notify();
        data.preferences.clone()
    }

    /// Drops everything, in memory and on disk.
    pub async fn clear_all(&self) {
        let mut data = self.data.lock().await;
        *data = StoreData::default();
        self.shim.remove_item(HISTORY_KEY).await;
        self.shim.remove_item(RECENTS_KEY).await;
        self.shim.remove_item(FAVORITES_KEY).await;
        self.shim.remove_item(PREFS_KEY).await;
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Nutriments, SearchResult};

    fn temp_store_shim(tag: &str) -> Shim {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("caltrack_store_{tag}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Shim::new(dir)
    }

    fn item(id: &str, name: &str) -> SavedItem {
        SavedItem {
            id: id.to_string(),
            product_name: name.to_string(),
            nutriments: Nutriments::default(),
            timestamp: 0,
            quantity: 100,
            nutriscore_grade: None,
        }
    }

    fn favorite(id: &str, name: &str) -> FavoriteEntry {
        FavoriteEntry {
            id: id.to_string(),
            item: SearchResult {
                product_name: Some(name.to_string()),
                nutriments: Some(Nutriments::default()),
                nutriscore_grade: None,
            },
        }
    }

    #[tokio::test]
    async fn writes_bump_revision_and_wake_subscribers() {
        let store = Store::load(temp_store_shim("rev")).await;
        let mut rx = store.subscribe();
        assert_eq!(store.revision(), 0);

        store.save_item(item("1", "Pomme")).await;
        assert_eq!(store.revision(), 1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn save_then_reload_round_trips() {
        let shim = temp_store_shim("reload");
        {
            let store = Store::load(shim.clone()).await;
            store.save_item(item("42", "Yaourt")).await;
        }
        let reloaded = Store::load(shim).await;
        let history = reloaded.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].product_name, "Yaourt");
        assert_eq!(history[0].quantity, 100);
    }

    #[tokio::test]
    async fn favorite_toggle_by_name_is_idempotent_under_double_invocation() {
        let store = Store::load(temp_store_shim("fav")).await;
        let (now_favorite, favorites) = store.toggle_favorite(favorite("1", "Pomme")).await;
        assert!(now_favorite);
        assert_eq!(favorites.len(), 1);

        // Same name under a different id still matches.
        let (now_favorite, favorites) = store.toggle_favorite(favorite("2", "Pomme")).await;
        assert!(!now_favorite);
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn recents_are_capped_newest_first() {
        let store = Store::load(temp_store_shim("recents")).await;
        for i in 0..12 {
            store
                .push_recent(RecentEntry {
                    id: i.to_string(),
                    item: SearchResult {
                        product_name: Some(format!("p{i}")),
                        ..Default::default()
                    },
                })
                .await;
        }
        let recents = store.recents().await;
        assert_eq!(recents.len(), RECENTS_CAP);
        assert_eq!(recents[0].item.product_name.as_deref(), Some("p11"));
    }

    #[tokio::test]
    async fn set_quantity_unknown_id_is_none() {
        let store = Store::load(temp_store_shim("qty")).await;
        assert!(store.set_quantity("missing", 50).await.is_none());
    }

    #[tokio::test]
    async fn clear_all_resets_everything() {
        let store = Store::load(temp_store_shim("clear")).await;
        store.save_item(item("1", "Pomme")).await;
        store
            .set_preferences(Preferences {
                target_kcal: 1800,
                ..Default::default()
            })
            .await;
        store.clear_all().await;
        assert!(store.history().await.is_empty());
        assert_eq!(store.preferences().await.target_kcal, 2000);
    }
}
