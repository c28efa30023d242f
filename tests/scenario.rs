//! End-to-end flows through the library: seed, log in, mirror plants.

use std::sync::Arc;
use std::time::Duration;

use estufa::auth::AuthContext;
use estufa::query::{PlantsQuery, PlantsState};
use estufa::seed::DatabaseSeeder;
use estufa::storage::{LocalStorage, MemoryLocalStorage, SqliteLocalStorage};
use estufa::store::{MemoryStore, RemoteStore, SqliteStore};
use estufa::theme::{ThemeContext, ThemeMode};
use estufa::types::{Session, SessionPatch, UserPlant, collections};
use tempfile::TempDir;
use tokio::sync::watch;

const WAIT: Duration = Duration::from_secs(5);

async fn wait_for(
    rx: &mut watch::Receiver<PlantsState>,
    f: impl FnMut(&PlantsState) -> bool,
) -> PlantsState {
    tokio::time::timeout(WAIT, rx.wait_for(f))
        .await
        .expect("timed out waiting for plants state")
        .expect("plants query stopped")
        .clone()
}

fn login_first_user(auth: &AuthContext, store: &dyn RemoteStore, user_id: &str) {
    let user = store
        .get(&format!("{}/{user_id}", collections::USERS))
        .unwrap();
    auth.login(Session::new(
        user_id,
        user["email"].as_str().unwrap(),
        user["nome"].as_str().unwrap(),
        user["senha"].as_str().map(str::to_string),
    ));
}

#[tokio::test]
async fn test_seeded_user_sees_exactly_one_plant() {
    let store = Arc::new(MemoryStore::new());
    let summary = DatabaseSeeder::new(store.as_ref()).populate().unwrap();

    let auth = AuthContext::new(Arc::new(MemoryLocalStorage::new()), "usuario");
    auth.restore();
    login_first_user(&auth, store.as_ref(), &summary.user_ids[0]);

    let query = PlantsQuery::start(store.clone(), auth.subscribe()).unwrap();
    let mut rx = query.subscribe();
    let state = wait_for(&mut rx, |s| !s.loading && s.user_plants_ready).await;

    assert_eq!(state.catalog.len(), 3);
    assert_eq!(state.user_plants.len(), 1);
    let plant = &state.user_plants[0].value;
    assert_eq!(plant.user_id, summary.user_ids[0]);
    assert_eq!(plant.greenhouse_id, summary.greenhouse_ids[0]);
    assert_eq!(plant.catalog_plant_id, summary.catalog_plant_ids[0]);

    query.stop().await;
    assert_eq!(store.listener_count(), 0);
}

#[tokio::test]
async fn test_switching_user_follows_session() {
    let store = Arc::new(MemoryStore::new());
    let summary = DatabaseSeeder::new(store.as_ref()).populate().unwrap();

    let auth = AuthContext::new(Arc::new(MemoryLocalStorage::new()), "usuario");
    auth.restore();
    login_first_user(&auth, store.as_ref(), &summary.user_ids[0]);

    let query = PlantsQuery::start(store.clone(), auth.subscribe()).unwrap();
    let mut rx = query.subscribe();
    wait_for(&mut rx, |s| s.user_plants.len() == 1).await;

    login_first_user(&auth, store.as_ref(), &summary.user_ids[1]);
    let state = wait_for(&mut rx, |s| s.user_plants_ready && s.user_plants.is_empty()).await;
    assert_eq!(state.catalog.len(), 3);

    auth.logout();
    let state = wait_for(&mut rx, |s| s.user_plants_ready && s.user_plants.is_empty()).await;
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_watering_update_reaches_mirror() {
    let store = Arc::new(MemoryStore::new());
    let summary = DatabaseSeeder::new(store.as_ref()).populate().unwrap();

    let auth = AuthContext::new(Arc::new(MemoryLocalStorage::new()), "usuario");
    auth.restore();
    login_first_user(&auth, store.as_ref(), &summary.user_ids[0]);

    let query = PlantsQuery::start(store.clone(), auth.subscribe()).unwrap();
    let mut rx = query.subscribe();
    let state = wait_for(&mut rx, |s| s.user_plants.len() == 1).await;
    let entry = &state.user_plants[0];

    let mut plant: UserPlant = entry.value.clone();
    let watered_at = plant.last_watered_at + chrono::Duration::days(1);
    plant.record_watering(watered_at);
    store
        .set(
            &format!("{}/{}", collections::USER_PLANTS, entry.id),
            serde_json::to_value(&plant).unwrap(),
        )
        .unwrap();

    let state = wait_for(&mut rx, |s| {
        s.user_plants
            .first()
            .is_some_and(|p| p.value.last_watered_at == watered_at)
    })
    .await;
    assert_eq!(
        state.user_plants[0].value.next_watering_at,
        watered_at + chrono::Duration::days(2)
    );
}

#[tokio::test]
async fn test_sqlite_backed_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let remote = Arc::new(SqliteStore::new(dir.path().join("remote.db")).unwrap());
    remote.initialize().unwrap();
    let summary = DatabaseSeeder::new(remote.as_ref()).populate().unwrap();

    let local = Arc::new(SqliteLocalStorage::new(dir.path().join("local.db")).unwrap());
    local.initialize().unwrap();

    {
        let auth = AuthContext::new(local.clone(), "usuario");
        auth.restore();
        login_first_user(&auth, remote.as_ref(), &summary.user_ids[0]);
        assert!(auth.update_session(&SessionPatch {
            name: Some("Ana S.".to_string()),
            ..Default::default()
        }));
    }

    let stored = local.get_item("usuario").unwrap().unwrap();
    assert!(!stored.contains("senha"));

    let auth = AuthContext::new(local.clone(), "usuario");
    assert!(auth.is_loading());
    auth.restore();
    let session = auth.session().unwrap();
    assert_eq!(session.id, summary.user_ids[0]);
    assert_eq!(session.name, "Ana S.");
    assert_eq!(session.password, None);

    let query = PlantsQuery::start(remote.clone(), auth.subscribe()).unwrap();
    let mut rx = query.subscribe();
    let state = wait_for(&mut rx, |s| !s.loading && s.user_plants_ready).await;
    assert_eq!(state.catalog.len(), 3);
    assert_eq!(state.user_plants.len(), 1);
    query.stop().await;
}

#[test]
fn test_theme_preference_shared_through_storage() {
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryLocalStorage::new());

    let theme = ThemeContext::with_storage(storage.clone(), "tema");
    assert_eq!(theme.mode(), ThemeMode::Light);
    theme.toggle_theme();

    let reopened = ThemeContext::with_storage(storage, "tema");
    assert!(reopened.is_dark());
    assert_eq!(reopened.colors(), ThemeMode::Dark.colors());
}
