use std::time::Duration;

use anyhow::{anyhow, bail};
use chrono::Utc;

use super::open_app;
use crate::query::PlantsQuery;
use crate::store::RemoteStore;
use crate::store::path::validate_key;
use crate::types::{UserPlant, collections};

const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(10);

/// Prints one snapshot of the plants mirror for the current session.
pub async fn run_plants(data_dir: &str, json: bool) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    let auth = app.auth();
    let logged_in = auth.is_authenticated();

    let query = PlantsQuery::start(app.remote.clone(), auth.subscribe())?;
    let mut rx = query.subscribe();
    let state = tokio::time::timeout(
        SNAPSHOT_TIMEOUT,
        rx.wait_for(|s| !s.loading && s.user_plants_ready),
    )
    .await
    .map_err(|_| anyhow!("Timed out waiting for plant data"))??
    .clone();
    query.stop().await;

    if let Some(error) = state.error() {
        eprintln!("warning: {error}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("Catalog ({}):", state.catalog.len());
    for plant in &state.catalog {
        let p = &plant.value;
        println!(
            "  {} ({}) - light: {}, watering: {}",
            p.name, p.species, p.requirements.light, p.requirements.watering
        );
    }

    if !logged_in {
        println!("My plants: log in to see your plants");
        return Ok(());
    }

    let now = Utc::now();
    println!("My plants ({}):", state.user_plants.len());
    for plant in &state.user_plants {
        let p = &plant.value;
        let watering = if p.needs_watering(now) {
            "needs water now".to_string()
        } else {
            format!("next watering {}", p.next_watering_at.format("%Y-%m-%d"))
        };
        println!("  {} - {}, {}", p.nickname, p.health.as_str(), watering);
    }
    Ok(())
}

/// Records a watering for one of the current user's plants.
pub fn run_water(data_dir: &str, plant_id: &str) -> anyhow::Result<()> {
    validate_key(plant_id)?;

    let app = open_app(data_dir)?;
    let Some(session) = app.auth().session() else {
        bail!("Not logged in. Run 'estufa session login' first.");
    };

    let path = format!("{}/{plant_id}", collections::USER_PLANTS);
    let record = app.remote.get(&path)?;
    if record.is_null() {
        bail!("No plant with id '{plant_id}'");
    }
    let mut plant: UserPlant = serde_json::from_value(record)?;
    if plant.user_id != session.id {
        bail!("Plant '{plant_id}' belongs to another user");
    }

    plant.record_watering(Utc::now());
    app.remote.set(&path, serde_json::to_value(&plant)?)?;

    println!(
        "Watered {}; next watering {}",
        plant.nickname,
        plant.next_watering_at.format("%Y-%m-%d")
    );
    Ok(())
}
