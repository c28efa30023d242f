use super::open_app;
use crate::seed::{DatabaseSeeder, SeedOptions};
use crate::types::collections;

pub fn run_db_populate(data_dir: &str, rollback_on_failure: bool) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    let seeder = DatabaseSeeder::with_options(
        app.remote.as_ref(),
        SeedOptions {
            rollback_on_failure,
        },
    );

    let summary = seeder.populate()?;
    println!("{summary}");
    if let Some(user_id) = summary.user_ids.first() {
        println!("First user id: {user_id}");
    }
    Ok(())
}

pub fn run_db_clear(data_dir: &str) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    DatabaseSeeder::new(app.remote.as_ref()).clear()?;
    println!("Cleared {}", collections::ALL.join(", "));
    Ok(())
}
