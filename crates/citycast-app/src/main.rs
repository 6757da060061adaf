use std::io::{self, BufRead, Write};

use anyhow::Result;

use citycast_api::ApiClient;
use citycast_core::prefs::{DisplayPrefs, PrefStore};
use citycast_core::{AppError, Config};
use citycast_state::{Dashboard, FetchStatus};

mod render;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    citycast_core::init()?;

    let mut dashboard = startup()?;
    dashboard.load_catalog().await;
    print_dashboard(&dashboard);
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        if !dispatch(&mut dashboard, &line).await {
            break;
        }
    }

    Ok(())
}

/// Resolve configuration and build the dashboard from persisted preferences.
fn startup() -> Result<Dashboard, AppError> {
    let config = Config::load()?;
    let client = ApiClient::new(&config.api_base_url)?;
    let store = PrefStore::new(config.config_dir.join("prefs"));

    tracing::info!("Citycast started (API at {})", config.api_base_url);
    Ok(Dashboard::new(store, client))
}

/// Handle one command line. Returns false to exit the loop.
async fn dispatch(dashboard: &mut Dashboard, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] => {}
        ["quit" | "exit" | "q"] => return false,
        ["help"] => print_help(),
        ["cities"] => print_catalog(dashboard),
        ["refresh"] => {
            dashboard.refresh().await;
            print_dashboard(dashboard);
        }
        ["reset"] => {
            dashboard.reset().await;
            print_dashboard(dashboard);
        }
        ["set", slot, city_id] => match parse_slot(slot) {
            Some(index) => {
                if dashboard.set_slot(index, city_id).await {
                    print_dashboard(dashboard);
                } else {
                    println!("No such slot: {}", slot);
                }
            }
            None => println!("No such slot: {}", slot),
        },
        ["clear", slot] => match parse_slot(slot) {
            Some(index) => {
                if dashboard.set_slot(index, "").await {
                    print_dashboard(dashboard);
                } else {
                    println!("No such slot: {}", slot);
                }
            }
            None => println!("No such slot: {}", slot),
        },
        ["count", n] => {
            let accepted = match n.parse::<usize>() {
                Ok(count) => dashboard.set_city_count(count).await,
                Err(_) => false,
            };
            if accepted {
                print_dashboard(dashboard);
            } else {
                println!("City count must be between 1 and 6");
            }
        }
        ["show", section] | ["hide", section] => {
            let enable = parts[0] == "show";
            match toggled(dashboard.selection().display(), section, enable) {
                Some(prefs) => {
                    dashboard.set_display_prefs(prefs);
                    print_dashboard(dashboard);
                }
                None => println!("Unknown section: {} (current|hourly|daily|table)", section),
            }
        }
        _ => print_help(),
    }
    true
}

/// 1-based user slot number to 0-based index.
fn parse_slot(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1)
}

fn toggled(current: &DisplayPrefs, section: &str, enable: bool) -> Option<DisplayPrefs> {
    let mut prefs = current.clone();
    match section {
        "current" => prefs.show_current_temp = enable,
        "hourly" => prefs.show_hourly_chart = enable,
        "daily" => prefs.show_daily_chart = enable,
        "table" => prefs.show_daily_table = enable,
        _ => return None,
    }
    Some(prefs)
}

fn print_dashboard(dashboard: &Dashboard) {
    println!();
    if let Some(err) = dashboard.catalog_error() {
        println!("Error: {}", err.user_message());
    }
    match dashboard.status() {
        FetchStatus::Loading => println!("Loading weather data..."),
        FetchStatus::Failed(message) => println!("Error: {}", message),
        FetchStatus::Idle | FetchStatus::Ready => {}
    }

    let prefs = dashboard.selection().display().clone();
    for (i, city_id) in dashboard.selection().slots().iter().enumerate() {
        let slot_no = i + 1;
        if city_id.is_empty() {
            println!("City {}: (empty)", slot_no);
            continue;
        }
        match dashboard.result_for_slot(i) {
            Some(slot) => print!("{}", render::render_slot(slot_no, city_id, &slot, &prefs)),
            None => println!("City {}: {} (no data yet)", slot_no, city_id),
        }
    }
}

fn print_catalog(dashboard: &Dashboard) {
    if dashboard.catalog().is_empty() {
        println!("No cities available yet");
        return;
    }
    for city in dashboard.catalog() {
        let marker = if dashboard.selection().is_selected(&city.id) {
            "*"
        } else {
            " "
        };
        println!(" {} {:<16} {}", marker, city.id, city.name);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  set <slot> <city-id>    assign a city to a slot (1-based)");
    println!("  clear <slot>            empty a slot");
    println!("  count <1-6>             number of visible slots");
    println!("  show <section>          enable a card section (current|hourly|daily|table)");
    println!("  hide <section>          disable a card section");
    println!("  cities                  list the catalog (* marks selected)");
    println!("  refresh                 refetch the current selection");
    println!("  reset                   drop saved preferences");
    println!("  quit                    exit");
}
