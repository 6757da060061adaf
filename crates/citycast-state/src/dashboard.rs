//! Dashboard controller: the single owner of selection, catalog, and fetch
//! state.
//!
//! Every mutation applies the pure selection transition first, persists on
//! acceptance, then re-evaluates the fetch trigger. The trigger is a pure
//! function of the ordered non-empty id list and the catalog-loaded flag: a
//! fetch is issued when that list changes, or when the catalog first becomes
//! available with a selection already present. `refresh` is the only path
//! that reissues an unchanged selection.

use citycast_api::{ApiClient, CatalogCity};
use citycast_core::error::NetworkError;
use citycast_core::prefs::{DisplayPrefs, PrefStore};

use crate::coordinator::{FetchCoordinator, FetchStatus, SlotWeather};
use crate::selection::SelectionState;

pub struct Dashboard {
    store: PrefStore,
    client: ApiClient,
    selection: SelectionState,
    coordinator: FetchCoordinator,
    catalog: Vec<CatalogCity>,
    catalog_loaded: bool,
    catalog_error: Option<NetworkError>,
    last_fetch_key: Option<Vec<String>>,
}

impl Dashboard {
    /// Build from persisted preferences, reconciling drifted records.
    pub fn new(store: PrefStore, client: ApiClient) -> Self {
        let selection = SelectionState::from_store(&store);

        Self {
            store,
            client,
            selection,
            coordinator: FetchCoordinator::new(),
            catalog: Vec::new(),
            catalog_loaded: false,
            catalog_error: None,
            last_fetch_key: None,
        }
    }

    /// Load the city catalog, sorted by display name.
    ///
    /// Any response, including an empty list, counts as loaded. A transport
    /// failure is recorded as a banner error and leaves the selection
    /// editable; a later retry can still succeed.
    pub async fn load_catalog(&mut self) {
        match self.client.catalog().await {
            Ok(mut cities) => {
                cities.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                self.catalog = cities;
                self.catalog_loaded = true;
                self.catalog_error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load city catalog: {}", e);
                self.catalog_error = Some(e);
            }
        }
        self.sync().await;
    }

    /// Assign a city to a slot, persist, and re-evaluate the fetch trigger.
    pub async fn set_slot(&mut self, index: usize, city_id: &str) -> bool {
        if !self.selection.set_slot(index, city_id) {
            return false;
        }
        self.store.save_selection(self.selection.slots());
        self.sync().await;
        true
    }

    /// Change the slot count, persist both records, and re-evaluate.
    pub async fn set_city_count(&mut self, count: usize) -> bool {
        if !self.selection.set_city_count(count) {
            return false;
        }
        self.store.save_city_count(count);
        self.store.save_selection(self.selection.slots());
        self.sync().await;
        true
    }

    /// Replace the display toggles and persist them. The fetch set is
    /// unaffected, so no trigger re-evaluation happens.
    pub fn set_display_prefs(&mut self, prefs: DisplayPrefs) {
        self.store.save_display_prefs(&prefs);
        self.selection.set_display_prefs(prefs);
    }

    /// User-initiated refresh: reissue with the current selection.
    pub async fn refresh(&mut self) {
        let key = self.selection.active_ids();
        if key.is_empty() {
            return;
        }
        self.last_fetch_key = Some(key.clone());
        self.coordinator.fetch(&self.client, &key).await;
    }

    /// Drop all persisted preferences and return to defaults.
    pub async fn reset(&mut self) {
        self.store.clear();
        self.selection = SelectionState::from_store(&self.store);
        self.sync().await;
    }

    /// Re-evaluate the fetch trigger after a state change.
    ///
    /// An unchanged id list is never refetched here; an empty list is
    /// recorded but issues no request, so re-selecting the same city after
    /// clearing every slot still counts as a change.
    async fn sync(&mut self) {
        if !self.catalog_loaded {
            return;
        }
        let key = self.selection.active_ids();
        if self.last_fetch_key.as_ref() == Some(&key) {
            return;
        }
        self.last_fetch_key = Some(key.clone());
        if key.is_empty() {
            return;
        }
        self.coordinator.fetch(&self.client, &key).await;
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn catalog(&self) -> &[CatalogCity] {
        &self.catalog
    }

    pub fn catalog_loaded(&self) -> bool {
        self.catalog_loaded
    }

    /// The general (non-per-city) catalog failure, if any.
    pub fn catalog_error(&self) -> Option<&NetworkError> {
        self.catalog_error.as_ref()
    }

    pub fn status(&self) -> FetchStatus {
        self.coordinator.status()
    }

    /// Weather for the slot at `index`, merged from the last completed fetch.
    pub fn result_for_slot(&self, index: usize) -> Option<SlotWeather> {
        self.coordinator.result_for_slot(index, self.selection.slots())
    }
}
