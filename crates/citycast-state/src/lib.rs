//! Dashboard state for Citycast.
//!
//! `selection` holds the pure in-memory state (city count, ordered slots,
//! display toggles), `coordinator` owns fetch-cycle status and results, and
//! `dashboard` glues both to the preference store and the API client.

pub mod coordinator;
pub mod dashboard;
pub mod selection;

pub use coordinator::{FetchCoordinator, FetchStatus, SlotWeather};
pub use dashboard::Dashboard;
pub use selection::SelectionState;
