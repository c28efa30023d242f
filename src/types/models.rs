use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tag carried by every catalog record.
pub const CATALOG_KIND: &str = "catalogo";

/// A decoded remote record together with its store-generated key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<T> {
    pub id: String,
    #[serde(flatten)]
    pub value: T,
}

impl<T> Entry<T> {
    pub fn new(id: impl Into<String>, value: T) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingRequirements {
    #[serde(rename = "luz")]
    pub light: String,
    #[serde(rename = "rega")]
    pub watering: String,
    #[serde(rename = "temperaturaIdeal")]
    pub temperature: String,
    #[serde(rename = "umidadeIdeal")]
    pub humidity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPlant {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nomeCientifico")]
    pub species: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "requisitos")]
    pub requirements: GrowingRequirements,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "saudavel")]
    Healthy,
    #[serde(rename = "atencao")]
    NeedsAttention,
    #[serde(rename = "critico")]
    Critical,
}

impl HealthStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "saudavel",
            Self::NeedsAttention => "atencao",
            Self::Critical => "critico",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPlant {
    #[serde(rename = "usuarioId")]
    pub user_id: String,
    #[serde(rename = "estufaId")]
    pub greenhouse_id: String,
    #[serde(rename = "plantaCatalogoId")]
    pub catalog_plant_id: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
    #[serde(rename = "dataPlantio")]
    pub planted_at: DateTime<Utc>,
    #[serde(rename = "ultimaRega")]
    pub last_watered_at: DateTime<Utc>,
    #[serde(rename = "proximaRega")]
    pub next_watering_at: DateTime<Utc>,
    /// Days between waterings.
    #[serde(rename = "intervaloRega")]
    pub watering_interval_days: u32,
    #[serde(rename = "statusSaude")]
    pub health: HealthStatus,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}

impl UserPlant {
    #[must_use]
    pub fn needs_watering(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_watering_at
    }

    /// Marks the plant as watered at `at` and schedules the next watering.
    pub fn record_watering(&mut self, at: DateTime<Utc>) {
        self.last_watered_at = at;
        self.next_watering_at = at + Duration::days(i64::from(self.watering_interval_days));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GreenhouseStatus {
    #[serde(rename = "ativa")]
    Active,
    #[serde(rename = "inativa")]
    Inactive,
    #[serde(rename = "manutencao")]
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateTargets {
    #[serde(rename = "temperaturaIdeal")]
    pub temperature: f64,
    #[serde(rename = "umidadeIdeal")]
    pub humidity: f64,
    #[serde(rename = "luzIdeal")]
    pub light: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    #[serde(rename = "temperaturaAtual")]
    pub temperature: f64,
    #[serde(rename = "umidadeAtual")]
    pub humidity: f64,
    #[serde(rename = "luzAtual")]
    pub light: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greenhouse {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "usuarioId")]
    pub user_id: String,
    #[serde(rename = "configuracao")]
    pub targets: ClimateTargets,
    #[serde(rename = "leituras")]
    pub readings: SensorReadings,
    pub status: GreenhouseStatus,
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn plant() -> UserPlant {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        UserPlant {
            user_id: "U1".to_string(),
            greenhouse_id: "G1".to_string(),
            catalog_plant_id: "C1".to_string(),
            nickname: "Manjericão da janela".to_string(),
            planted_at: t,
            last_watered_at: t,
            next_watering_at: t + Duration::days(2),
            watering_interval_days: 2,
            health: HealthStatus::Healthy,
            created_at: t,
        }
    }

    #[test]
    fn test_user_plant_wire_names() {
        let value = serde_json::to_value(plant()).unwrap();

        assert_eq!(value["usuarioId"], "U1");
        assert_eq!(value["estufaId"], "G1");
        assert_eq!(value["plantaCatalogoId"], "C1");
        assert_eq!(value["intervaloRega"], 2);
        assert_eq!(value["statusSaude"], "saudavel");
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn test_record_watering_reschedules() {
        let mut p = plant();
        let later = p.next_watering_at + Duration::hours(5);
        assert!(p.needs_watering(later));

        p.record_watering(later);
        assert_eq!(p.last_watered_at, later);
        assert_eq!(p.next_watering_at, later + Duration::days(2));
        assert!(!p.needs_watering(later));
    }

    #[test]
    fn test_entry_flattens_record() {
        let entry = Entry::new("abc", plant());
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["id"], "abc");
        assert_eq!(value["apelido"], "Manjericão da janela");
    }
}
