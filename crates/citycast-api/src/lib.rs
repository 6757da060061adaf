//! HTTP client for the Citycast weather backend.
//!
//! Two endpoints: the city catalog and the multi-city weather forecast.
//! Wire shapes follow the backend's camelCase contract.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    CatalogCity, CityFailure, CityWeather, CurrentConditions, DailyPoint, HourlyPoint,
    WeatherBundle,
};
