//! Text rendering for weather cards.
//!
//! One card per slot; every section is gated by its display toggle. A slot
//! whose city failed renders the failure message; a slot carrying both a
//! payload and a failure renders the payload with the failure noted beneath.

use chrono::Local;

use citycast_api::{DailyPoint, HourlyPoint};
use citycast_core::prefs::DisplayPrefs;
use citycast_state::SlotWeather;

pub fn render_slot(slot_no: usize, city_id: &str, slot: &SlotWeather, prefs: &DisplayPrefs) -> String {
    let mut out = String::new();

    let Some(data) = &slot.data else {
        let message = slot
            .error
            .as_ref()
            .map(|e| e.message.as_str())
            .unwrap_or("no data");
        out.push_str(&format!("City {}: {}\n  Error: {}\n", slot_no, city_id, message));
        return out;
    };

    if prefs.show_current_temp {
        out.push_str(&format!(
            "=== {} — {}°F ===\n",
            data.name,
            round(data.current.temp_f)
        ));
    } else {
        out.push_str(&format!("=== {} ===\n", data.name));
    }

    let updated = data
        .updated_at
        .with_timezone(&Local)
        .format("%b %-d, %-I:%M %p");
    out.push_str(&format!("Updated: {}\n", updated));

    if prefs.show_hourly_chart {
        out.push_str("Next 24 Hours:\n");
        out.push_str(&hourly_strip(&data.hourly24));
    }

    if prefs.show_daily_chart {
        out.push_str("Next 7 Days:\n");
        for day in &data.daily7 {
            out.push_str(&format!(
                "  {:<7} high {:>4}°F   low {:>4}°F\n",
                day_label(day),
                round(day.high_f),
                round(day.low_f)
            ));
        }
    }

    if prefs.show_daily_table {
        out.push_str("  Date     High     Low      Rain\n");
        for day in &data.daily7 {
            out.push_str(&format!(
                "  {:<8} {:>4}°F   {:>4}°F   {:>3}%\n",
                day_label(day),
                round(day.high_f),
                round(day.low_f),
                round(day.chance_of_rain.unwrap_or(0.0))
            ));
        }
    }

    if let Some(error) = &slot.error {
        out.push_str(&format!("  Note: {}\n", error.message));
    }

    out
}

fn hourly_strip(hours: &[HourlyPoint]) -> String {
    let mut out = String::new();
    for chunk in hours.chunks(6) {
        let line: Vec<String> = chunk
            .iter()
            .map(|p| {
                let label = p.time.with_timezone(&Local).format("%-I %p").to_string();
                format!("{:>5} {:>4}", label, format!("{}°", round(p.temp_f)))
            })
            .collect();
        out.push_str(&format!("  {}\n", line.join(" |")));
    }
    out
}

fn day_label(day: &DailyPoint) -> String {
    day.date.format("%b %-d").to_string()
}

fn round(value: f64) -> i64 {
    value.round() as i64
}
