use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::Keyspace;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, warn};

use crate::error::TripPlannerError;
use crate::services::TripRepository;
use crate::snapshot::TripSnapshot;

/// Persistent trip storage.
///
/// Snapshots are stored as JSON under `trip:{user}:{trip}`; each user has an
/// index of trip ids under `index:{user}`.
pub struct TripStore {
    _db: fjall::Database,
    store: Keyspace,
    index_lock: Mutex<()>,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn trip_key(user_id: &str, trip_id: &str) -> String {
    format!("trip:{user_id}:{trip_id}")
}

fn index_key(user_id: &str) -> String {
    format!("index:{user_id}")
}

fn check_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() || id.contains(':') {
        return Err(TripPlannerError::validation(format!("Invalid {kind} id '{id}'")).into());
    }
    Ok(())
}

/// Untyped failures from the database or the blocking pool become
/// [`TripPlannerError::Store`]
fn store_failure(err: anyhow::Error) -> anyhow::Error {
    if err.is::<TripPlannerError>() {
        return err;
    }
    TripPlannerError::store(format!("{err:#}")).into()
}

impl TripStore {
    /// Open (or create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let location = path.as_ref().display().to_string();
        let db = fjall::Database::builder(&path).open().map_err(|e| {
            TripPlannerError::store(format!("Failed to open trip store at {location}: {e}"))
        })?;
        let items = db
            .keyspace("trips", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| {
                TripPlannerError::store(format!("Failed to open trips keyspace at {location}: {e}"))
            })?;
        Ok(TripStore {
            _db: db,
            store: items,
            index_lock: Mutex::new(()),
        })
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        maybe_bytes
            .map(|bytes| {
                serde_json::from_slice(&bytes).with_context(|| format!("Corrupt entry at {key}"))
            })
            .transpose()
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = serde_json::to_vec(value)?;
        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }

    async fn trip_ids(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self
            .read::<Vec<String>>(&index_key(user_id))
            .await?
            .unwrap_or_default())
    }

    async fn save_snapshot(&self, user_id: &str, snapshot: &TripSnapshot) -> Result<()> {
        check_id("user", user_id)?;
        check_id("trip", &snapshot.trip_id)?;

        let _guard = self.index_lock.lock().await;
        self.write(&trip_key(user_id, &snapshot.trip_id), snapshot)
            .await?;

        let mut ids = self.trip_ids(user_id).await?;
        if !ids.contains(&snapshot.trip_id) {
            ids.push(snapshot.trip_id.clone());
            self.write(&index_key(user_id), &ids).await?;
        }
        debug!("Saved trip, user now has {} trips", ids.len());
        Ok(())
    }

    async fn load_snapshots(&self, user_id: &str) -> Result<Vec<TripSnapshot>> {
        check_id("user", user_id)?;

        let mut trips = Vec::new();
        for trip_id in self.trip_ids(user_id).await? {
            match self
                .read::<TripSnapshot>(&trip_key(user_id, &trip_id))
                .await
            {
                Ok(Some(mut snapshot)) => {
                    snapshot.migrate();
                    trips.push(snapshot);
                }
                Ok(None) => warn!("Trip {} is indexed but missing", trip_id),
                Err(e) => warn!("Skipping unreadable trip {}: {:#}", trip_id, e),
            }
        }
        debug!("Loaded {} trips", trips.len());
        Ok(trips)
    }

    async fn delete_snapshot(&self, user_id: &str, trip_id: &str) -> Result<()> {
        check_id("user", user_id)?;
        check_id("trip", trip_id)?;

        let _guard = self.index_lock.lock().await;
        let mut ids = self.trip_ids(user_id).await?;
        let before = ids.len();
        ids.retain(|id| id != trip_id);
        if ids.len() == before {
            return Err(TripPlannerError::not_found(format!("Trip {trip_id}")).into());
        }
        self.remove(&trip_key(user_id, trip_id)).await?;
        self.write(&index_key(user_id), &ids).await?;
        Ok(())
    }
}

#[async_trait]
impl TripRepository for TripStore {
    #[tracing::instrument(name = "save_trip", level = "debug", skip(self, snapshot), fields(trip_id = %snapshot.trip_id))]
    async fn save_trip(&self, user_id: &str, snapshot: &TripSnapshot) -> Result<()> {
        self.save_snapshot(user_id, snapshot).await.map_err(store_failure)
    }

    #[tracing::instrument(name = "load_trips", level = "debug", skip(self))]
    async fn load_trips(&self, user_id: &str) -> Result<Vec<TripSnapshot>> {
        self.load_snapshots(user_id).await.map_err(store_failure)
    }

    #[tracing::instrument(name = "delete_trip", level = "debug", skip(self))]
    async fn delete_trip(&self, user_id: &str, trip_id: &str) -> Result<()> {
        self.delete_snapshot(user_id, trip_id).await.map_err(store_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::TripDraft;
    use crate::models::ItemCandidate;
    use tempfile::TempDir;

    fn snapshot(trip_id: &str, city: &str) -> TripSnapshot {
        let draft = TripDraft::builder()
            .destination_city(city)
            .itinerary_item(ItemCandidate::new("Museum").with_cost(20.0))
            .build();
        TripSnapshot::capture(&draft, trip_id)
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = TripStore::open(temp_dir.path()).unwrap();

        store.save_trip("alice", &snapshot("t1", "Rome")).await.unwrap();
        store.save_trip("alice", &snapshot("t2", "Oslo")).await.unwrap();
        store.save_trip("bob", &snapshot("t1", "Lima")).await.unwrap();

        let trips = store.load_trips("alice").await.unwrap();
        let cities: Vec<_> = trips
            .iter()
            .map(|t| t.locations.destination_cities[0].as_str())
            .collect();
        assert_eq!(cities, ["Rome", "Oslo"]);

        store.delete_trip("alice", "t1").await.unwrap();
        let trips = store.load_trips("alice").await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].trip_id, "t2");
        assert_eq!(store.load_trips("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_saving_again_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = TripStore::open(temp_dir.path()).unwrap();

        store.save_trip("alice", &snapshot("t1", "Rome")).await.unwrap();
        store.save_trip("alice", &snapshot("t1", "Paris")).await.unwrap();

        let trips = store.load_trips("alice").await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].locations.destination_cities, ["Paris"]);
    }

    #[tokio::test]
    async fn test_unknown_user_and_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TripStore::open(temp_dir.path()).unwrap();

        assert!(store.load_trips("nobody").await.unwrap().is_empty());

        let missing = store.delete_trip("nobody", "t1").await.unwrap_err();
        assert!(matches!(
            missing.downcast_ref::<TripPlannerError>(),
            Some(TripPlannerError::NotFound { .. })
        ));

        let bad_id = store
            .save_trip("a:b", &snapshot("t1", "Rome"))
            .await
            .unwrap_err();
        assert!(matches!(
            bad_id.downcast_ref::<TripPlannerError>(),
            Some(TripPlannerError::Validation { .. })
        ));
    }

    #[test]
    fn test_open_on_a_file_is_a_store_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not-a-dir");
        std::fs::write(&file, b"plain file").unwrap();

        let err = TripStore::open(&file).err().unwrap();
        assert!(matches!(err, TripPlannerError::Store { .. }));
        assert!(err.to_string().contains("not-a-dir"));
    }

    #[test]
    fn test_untyped_failures_become_store_errors() {
        let wrapped = store_failure(anyhow::anyhow!("disk full"));
        assert!(matches!(
            wrapped.downcast_ref::<TripPlannerError>(),
            Some(TripPlannerError::Store { .. })
        ));

        let typed = store_failure(TripPlannerError::not_found("Trip t9").into());
        assert!(matches!(
            typed.downcast_ref::<TripPlannerError>(),
            Some(TripPlannerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_legacy_entry_is_migrated_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = TripStore::open(temp_dir.path()).unwrap();

        let legacy: serde_json::Value = serde_json::json!({
            "trip_id": "old",
            "number_of_people": 2,
            "is_per_person": true
        });
        store.write(&trip_key("carol", "old"), &legacy).await.unwrap();
        store
            .write(&index_key("carol"), &vec!["old".to_string()])
            .await
            .unwrap();

        let trips = store.load_trips("carol").await.unwrap();
        assert_eq!(trips[0].party.len(), 2);
        assert_eq!(trips[0].schema_version, crate::snapshot::CURRENT_SCHEMA_VERSION);
    }
}
