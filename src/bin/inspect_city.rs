//! Print what the dashboard would show for one city, straight from the
//! provider. Handy for checking a service key and the city matching.
//!
//! Usage: `AIRDASH_SERVICE_KEY=... inspect_city [city]`

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use airdash::config::Config;
use airdash::{init_tracing, log_operation_end, log_operation_start, AirKoreaClient, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let city = std::env::args().nth(1).unwrap_or_else(|| "서울".to_string());

    let mut config = Config::default();
    config.api.service_key = std::env::var("AIRDASH_SERVICE_KEY").ok();
    init_tracing("warn");

    let client = AirKoreaClient::new(config.api.clone())?;
    let state = AppState::new(config, Arc::new(client));
    state.validate_city(&city)?;

    log_operation_start("inspect_city", Some(&city));
    let start_time = Instant::now();

    println!("Inspecting city: {}", city);

    // Stations
    let stations = state.stations_for_city(&city).await?;
    println!("\n=== STATIONS ({}) ===", stations.len());
    for station in &stations {
        println!(
            "  {} ({:.4}, {:.4}) {}",
            station.name, station.latitude, station.longitude, station.address
        );
    }

    // Readings of the first station
    if let Some(station) = stations.first() {
        let series = state.reading_series(&station.name).await?;
        println!(
            "\n=== READINGS: {} ({} rows, {} dropped) ===",
            station.name,
            series.len(),
            series.dropped()
        );
        for reading in series.readings() {
            println!(
                "  {}  PM10={:?} PM2.5={:?} O3={:?}",
                reading.timestamp, reading.pm10, reading.pm25, reading.o3
            );
        }

        if let Some(latest) = series.latest() {
            println!("\nLatest grades:");
            for pollutant in [airdash::Pollutant::Pm10, airdash::Pollutant::Pm25] {
                let value = latest.value(pollutant);
                let grade = state.classifier.classify(pollutant, value);
                println!(
                    "  {}: {:?} {} {}",
                    pollutant.display_name(),
                    value,
                    grade.label,
                    grade.icon
                );
            }
        }
    }

    // Forecast
    let today = state.today();
    let forecast = state.forecast_series(today).await?;
    println!(
        "\n=== FORECAST {} ({} bulletins, {} skipped) ===",
        today,
        forecast.entries().len(),
        forecast.skipped()
    );
    for entry in forecast.entries() {
        println!("  {} [{}] {}", entry.date, entry.grade_text, entry.summary_text);
    }

    log_operation_end("inspect_city", start_time, true);
    Ok(())
}
