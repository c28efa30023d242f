//! Development data population.
//!
//! Writes are strictly sequential: every user is written before the first
//! catalog plant, and so on, so greenhouse ownership follows the order of the
//! seeded user ids. Nothing is transactional; see [`SeedOptions`] for the
//! opt-in compensation.

pub mod data;

use std::fmt;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::store::{RemoteStore, push_record};
use crate::types::collections;

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// Remove the records already written when a later write fails.
    pub rollback_on_failure: bool,
}

/// Keys generated for the seeded records, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub user_ids: Vec<String>,
    pub catalog_plant_ids: Vec<String>,
    pub greenhouse_ids: Vec<String>,
    pub user_plant_ids: Vec<String>,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seeded {} users, {} catalog plants, {} greenhouses and {} user plant(s)",
            self.user_ids.len(),
            self.catalog_plant_ids.len(),
            self.greenhouse_ids.len(),
            self.user_plant_ids.len()
        )
    }
}

pub struct DatabaseSeeder<'a> {
    store: &'a dyn RemoteStore,
    options: SeedOptions,
}

impl<'a> DatabaseSeeder<'a> {
    pub fn new(store: &'a dyn RemoteStore) -> Self {
        Self::with_options(store, SeedOptions::default())
    }

    pub fn with_options(store: &'a dyn RemoteStore, options: SeedOptions) -> Self {
        Self { store, options }
    }

    /// Inserts the fixed data set. The first store error aborts the
    /// remaining steps.
    pub fn populate(&self) -> Result<SeedSummary> {
        let mut written = Vec::new();
        match self.write_all(&mut written) {
            Ok(summary) => {
                tracing::info!(
                    users = summary.user_ids.len(),
                    catalog_plants = summary.catalog_plant_ids.len(),
                    greenhouses = summary.greenhouse_ids.len(),
                    user_plants = summary.user_plant_ids.len(),
                    "database populated"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, written = written.len(), "populate aborted");
                if self.options.rollback_on_failure {
                    self.rollback(&written);
                }
                Err(e)
            }
        }
    }

    /// Empties the four collections, one after another.
    pub fn clear(&self) -> Result<()> {
        for collection in collections::ALL {
            self.store
                .set(collection, Value::Null)
                .map_err(|e| Error::Seed {
                    step: collection,
                    message: e.to_string(),
                })?;
        }
        tracing::info!("database cleared");
        Ok(())
    }

    fn write_all(&self, written: &mut Vec<String>) -> Result<SeedSummary> {
        let now = Utc::now();
        let mut summary = SeedSummary::default();

        for user in data::users(now) {
            let id = self.insert(collections::USERS, &user, written)?;
            summary.user_ids.push(id);
        }

        for plant in data::catalog_plants(now) {
            let id = self.insert(collections::CATALOG_PLANTS, &plant, written)?;
            summary.catalog_plant_ids.push(id);
        }

        for (mut greenhouse, owner) in data::greenhouses(now)
            .into_iter()
            .zip(summary.user_ids.iter().cycle())
        {
            greenhouse.user_id = owner.clone();
            let id = self.insert(collections::GREENHOUSES, &greenhouse, written)?;
            summary.greenhouse_ids.push(id);
        }

        let (Some(user_id), Some(greenhouse_id), Some(catalog_id)) = (
            summary.user_ids.first(),
            summary.greenhouse_ids.first(),
            summary.catalog_plant_ids.first(),
        ) else {
            return Err(Error::Seed {
                step: collections::USER_PLANTS,
                message: "no seeded user, greenhouse or catalog plant to link".to_string(),
            });
        };
        let link = data::user_plant(user_id, greenhouse_id, catalog_id, now);
        let id = self.insert(collections::USER_PLANTS, &link, written)?;
        summary.user_plant_ids.push(id);

        Ok(summary)
    }

    fn insert<T: Serialize>(
        &self,
        collection: &'static str,
        record: &T,
        written: &mut Vec<String>,
    ) -> Result<String> {
        let id = push_record(self.store, collection, record).map_err(|e| Error::Seed {
            step: collection,
            message: e.to_string(),
        })?;
        written.push(format!("{collection}/{id}"));
        Ok(id)
    }

    fn rollback(&self, written: &[String]) {
        for path in written.iter().rev() {
            if let Err(e) = self.store.set(path, Value::Null) {
                tracing::warn!(path = %path, error = %e, "rollback write failed");
            }
        }
        tracing::info!(removed = written.len(), "partial seed rolled back");
    }
}
