//! Fixed development data set.

use chrono::{DateTime, Duration, Utc};

use crate::types::{
    CATALOG_KIND, CatalogPlant, ClimateTargets, Greenhouse, GreenhouseStatus, GrowingRequirements,
    HealthStatus, SensorReadings, User, UserPlant,
};

pub fn users(now: DateTime<Utc>) -> Vec<User> {
    [
        ("Ana Souza", "ana@estufa.dev", "ana123"),
        ("Bruno Lima", "bruno@estufa.dev", "bruno123"),
        ("Carla Mendes", "carla@estufa.dev", "carla123"),
    ]
    .into_iter()
    .map(|(name, email, password)| User {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        created_at: now,
    })
    .collect()
}

pub fn catalog_plants(now: DateTime<Utc>) -> Vec<CatalogPlant> {
    vec![
        catalog_plant(
            "Manjericão",
            "Ocimum basilicum",
            "Erva aromática de crescimento rápido, muito usada na culinária.",
            ("Sol pleno", "A cada 2 dias", "18-30°C", "60-70%"),
            now,
        ),
        catalog_plant(
            "Samambaia",
            "Nephrolepis exaltata",
            "Folhagem pendente que prefere ambientes úmidos e sombreados.",
            ("Meia-sombra", "A cada 3 dias", "15-24°C", "70-80%"),
            now,
        ),
        catalog_plant(
            "Tomate-cereja",
            "Solanum lycopersicum var. cerasiforme",
            "Frutífera compacta, produtiva em vasos e estufas.",
            ("Sol pleno", "Diária", "20-28°C", "50-65%"),
            now,
        ),
    ]
}

fn catalog_plant(
    name: &str,
    species: &str,
    description: &str,
    (light, watering, temperature, humidity): (&str, &str, &str, &str),
    now: DateTime<Utc>,
) -> CatalogPlant {
    CatalogPlant {
        name: name.to_string(),
        species: species.to_string(),
        description: description.to_string(),
        kind: CATALOG_KIND.to_string(),
        requirements: GrowingRequirements {
            light: light.to_string(),
            watering: watering.to_string(),
            temperature: temperature.to_string(),
            humidity: humidity.to_string(),
        },
        created_at: now,
    }
}

/// Greenhouses without an owner; the seeder assigns `user_id` round-robin.
pub fn greenhouses(now: DateTime<Utc>) -> Vec<Greenhouse> {
    vec![
        Greenhouse {
            name: "Estufa Principal".to_string(),
            description: "Estufa de vidro no quintal, com irrigação por gotejamento.".to_string(),
            user_id: String::new(),
            targets: ClimateTargets {
                temperature: 24.0,
                humidity: 65.0,
                light: 80.0,
            },
            readings: SensorReadings {
                temperature: 25.3,
                humidity: 62.0,
                light: 76.0,
            },
            status: GreenhouseStatus::Active,
            created_at: now,
        },
        Greenhouse {
            name: "Estufa de Ervas".to_string(),
            description: "Mini estufa na varanda para ervas e temperos.".to_string(),
            user_id: String::new(),
            targets: ClimateTargets {
                temperature: 22.0,
                humidity: 60.0,
                light: 70.0,
            },
            readings: SensorReadings {
                temperature: 21.1,
                humidity: 58.5,
                light: 64.0,
            },
            status: GreenhouseStatus::Active,
            created_at: now,
        },
    ]
}

pub fn user_plant(
    user_id: &str,
    greenhouse_id: &str,
    catalog_plant_id: &str,
    now: DateTime<Utc>,
) -> UserPlant {
    let planted_at = now - Duration::days(30);
    let last_watered_at = now - Duration::days(1);
    let interval = 2;
    UserPlant {
        user_id: user_id.to_string(),
        greenhouse_id: greenhouse_id.to_string(),
        catalog_plant_id: catalog_plant_id.to_string(),
        nickname: "Manjericão da cozinha".to_string(),
        planted_at,
        last_watered_at,
        next_watering_at: last_watered_at + Duration::days(interval),
        watering_interval_days: interval as u32,
        health: HealthStatus::Healthy,
        created_at: now,
    }
}
