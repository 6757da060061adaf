//! Weather fetch coordination: status tracking, stale-response discard, and
//! per-slot result lookup.

use std::sync::Arc;

use parking_lot::Mutex;

use citycast_api::{ApiClient, CityFailure, CityWeather, WeatherBundle};

/// Lifecycle of the fetch loop. `Ready` and `Failed` are both re-entrant; a
/// new fetch returns to `Loading` from either. There is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Weather for one slot: the success payload, the per-city failure, or both
/// when the backend reports both for the same id. The payload takes display
/// precedence; the failure stays retrievable alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotWeather {
    pub data: Option<CityWeather>,
    pub error: Option<CityFailure>,
}

#[derive(Debug, Default)]
struct CoordinatorState {
    status: FetchStatus,
    last_result: Option<WeatherBundle>,
    latest_seq: u64,
}

/// Owns fetch-cycle state for the lifetime of the application.
///
/// Overlapping fetches are allowed; each request is tagged with a monotonic
/// sequence number and a response that is no longer the latest issued is
/// discarded, so the newest request always wins. The lock is only held for
/// short non-await sections.
#[derive(Debug, Clone, Default)]
pub struct FetchCoordinator {
    state: Arc<Mutex<CoordinatorState>>,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FetchStatus {
        self.state.lock().status.clone()
    }

    pub fn last_result(&self) -> Option<WeatherBundle> {
        self.state.lock().last_result.clone()
    }

    /// Issue one fetch cycle for the given ids.
    ///
    /// An empty id list issues no request and leaves the status untouched.
    /// On success the last result is replaced wholesale; on failure the
    /// status carries a readable message and the previous result is retained
    /// so stale data stays visible next to the surfaced error.
    pub async fn fetch(&self, client: &ApiClient, city_ids: &[String]) {
        if city_ids.is_empty() {
            tracing::debug!("Skipping weather fetch: no cities selected");
            return;
        }

        let seq = {
            let mut state = self.state.lock();
            state.latest_seq += 1;
            state.status = FetchStatus::Loading;
            state.latest_seq
        };

        let outcome = client.weather(city_ids).await;

        let mut state = self.state.lock();
        if seq != state.latest_seq {
            tracing::debug!(
                "Discarding stale weather response (seq {}, latest {})",
                seq,
                state.latest_seq
            );
            return;
        }

        match outcome {
            Ok(bundle) => {
                state.status = FetchStatus::Ready;
                state.last_result = Some(bundle);
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                state.status = FetchStatus::Failed(e.to_string());
            }
        }
    }

    /// Weather for the slot at `index` of `slots`.
    ///
    /// `None` when the slot is empty, out of range, or no completed fetch
    /// mentions its city.
    pub fn result_for_slot(&self, index: usize, slots: &[String]) -> Option<SlotWeather> {
        let city_id = slots.get(index).filter(|s| !s.is_empty())?;

        let state = self.state.lock();
        let bundle = state.last_result.as_ref()?;
        let data = bundle.city(city_id).cloned();
        let error = bundle.failure(city_id).cloned();

        if data.is_none() && error.is_none() {
            return None;
        }
        Some(SlotWeather { data, error })
    }

    /// Install a completed result directly (for testing the lookup logic).
    #[cfg(test)]
    fn install_result(&self, bundle: WeatherBundle) {
        let mut state = self.state.lock();
        state.status = FetchStatus::Ready;
        state.last_result = Some(bundle);
    }
}
