use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One selectable city from the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCity {
    pub id: String,
    pub name: String,
}

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp_f: f64,
}

/// One point of the 24-hour forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub time: DateTime<Utc>,
    pub temp_f: f64,
}

/// One day of the 7-day forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub high_f: f64,
    pub low_f: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance_of_rain: Option<f64>,
}

/// Full forecast payload for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWeather {
    pub city_id: String,
    pub name: String,
    pub current: CurrentConditions,
    pub hourly24: Vec<HourlyPoint>,
    pub daily7: Vec<DailyPoint>,
    pub updated_at: DateTime<Utc>,
}

/// Per-city failure embedded in an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityFailure {
    pub city_id: String,
    pub message: String,
}

/// Response of one weather fetch cycle.
///
/// A city id appears in at most one of the two sets per cycle, but the
/// backend may report both a payload and an error for the same id (e.g. data
/// served from a stale cache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub cities: Vec<CityWeather>,
    #[serde(default)]
    pub errors: Vec<CityFailure>,
}

impl WeatherBundle {
    /// The success payload for a city id, if present.
    pub fn city(&self, city_id: &str) -> Option<&CityWeather> {
        self.cities.iter().find(|c| c.city_id == city_id)
    }

    /// The per-city failure for a city id, if present.
    pub fn failure(&self, city_id: &str) -> Option<&CityFailure> {
        self.errors.iter().find(|e| e.city_id == city_id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_bundle_deserializes_camel_case() {
        let json = r#"{
            "cities": [{
                "cityId": "athens-ga",
                "name": "Athens, GA",
                "current": {"tempF": 72.4, "humidity": 40},
                "hourly24": [{"time": "2026-08-06T12:00:00Z", "tempF": 71.0}],
                "daily7": [{"date": "2026-08-06", "highF": 80.1, "lowF": 61.2, "chanceOfRain": 20}],
                "updatedAt": "2026-08-06T12:05:00Z"
            }],
            "errors": [{"cityId": "nowhere", "message": "unknown city"}]
        }"#;

        let bundle: WeatherBundle = serde_json::from_str(json).unwrap();
        let city = bundle.city("athens-ga").unwrap();
        assert_eq!(city.name, "Athens, GA");
        assert!((city.current.temp_f - 72.4).abs() < f64::EPSILON);
        assert_eq!(city.daily7[0].chance_of_rain, Some(20.0));
        assert_eq!(bundle.failure("nowhere").unwrap().message, "unknown city");
        assert!(bundle.city("nowhere").is_none());
    }

    #[test]
    fn test_missing_errors_defaults_empty() {
        let json = r#"{"cities": []}"#;
        let bundle: WeatherBundle = serde_json::from_str(json).unwrap();
        assert!(bundle.errors.is_empty());
    }

    #[test]
    fn test_missing_rain_chance_is_none() {
        let json = r#"{"date": "2026-08-06", "highF": 80.0, "lowF": 60.0}"#;
        let day: DailyPoint = serde_json::from_str(json).unwrap();
        assert_eq!(day.chance_of_rain, None);
    }
}
