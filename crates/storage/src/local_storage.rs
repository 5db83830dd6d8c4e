use std::collections::VecDeque;

use gloo_storage::{Storage as _, errors::StorageError};
use ::log::warn;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use fitme_web_app::{OngoingWorkout, OngoingWorkoutRepository, Settings, SettingsRepository, log};

use crate::{Backend, UserData, domain, record};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(AsRefStr)]
enum Key {
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "ongoing workout")]
    OngoingWorkout,
    #[strum(serialize = "log")]
    Log,
}

fn user_key(user_id: domain::UserID) -> String {
    format!("user {}", *user_id)
}

fn get<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

fn set<T: Serialize>(key: &str, value: T) -> Result<(), StorageError> {
    gloo_storage::LocalStorage::set(key, value)
}

/// Persists the data of each user as one JSON document in the browser's
/// local storage.
pub struct LocalStorage;

impl Backend for LocalStorage {
    fn load(&self, user_id: domain::UserID) -> Result<Option<UserData>, domain::StorageError> {
        let Some(data) = get::<record::UserData>(&user_key(user_id))
            .map_err(|err| domain::StorageError::Other(err.into()))?
        else {
            return Ok(None);
        };
        let data = UserData::try_from(data).map_err(|err| {
            warn!("failed to read stored data of user {}: {err}", *user_id);
            domain::StorageError::Other(err.into())
        })?;
        Ok(Some(data))
    }

    fn save(&self, data: &UserData) -> Result<(), domain::StorageError> {
        set(&user_key(data.profile.id), record::UserData::from(data))
            .map_err(|err| domain::StorageError::Other(err.into()))
    }
}

pub struct UI;

impl SettingsRepository for UI {
    async fn read_settings(&self) -> Result<Settings, String> {
        get(Key::Settings.as_ref())
            .map(Option::unwrap_or_default)
            .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        set(Key::Settings.as_ref(), settings).map_err(|err| err.to_string())
    }
}

impl OngoingWorkoutRepository for UI {
    async fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String> {
        get::<Option<OngoingWorkout>>(Key::OngoingWorkout.as_ref())
            .map(Option::flatten)
            .map_err(|err| err.to_string())
    }

    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), String> {
        set(Key::OngoingWorkout.as_ref(), ongoing_workout).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        get(Key::Log.as_ref())
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        set(Key::Log.as_ref(), entries).map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(Key::Settings.as_ref(), "settings");
        assert_eq!(Key::OngoingWorkout.as_ref(), "ongoing workout");
        assert_eq!(Key::Log.as_ref(), "log");
        assert_eq!(
            user_key(domain::UserID::from(1)),
            "user 00000000-0000-0000-0000-000000000001"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use fitme_domain::{WorkoutInstanceRepository, WorkoutRepository};
        use fitme_web_app::log::Repository as _;
        use pretty_assertions::assert_eq;
        use wasm_bindgen_test::wasm_bindgen_test;

        use crate::{
            Repository,
            tests::data::{USER_ID, WORKOUT, scheduled},
        };

        use super::*;

        fn reset() {
            gloo_storage::LocalStorage::clear();
        }

        #[wasm_bindgen_test]
        async fn test_workouts() {
            reset();
            let repository = Repository::new(LocalStorage);

            let workout = repository
                .create_workout(*USER_ID, WORKOUT.name.clone(), WORKOUT.exercises.clone())
                .await
                .unwrap();
            let id = repository
                .create_workout_instance(*USER_ID, scheduled(3))
                .await
                .unwrap();

            assert_eq!(
                repository.read_workouts(*USER_ID).await.unwrap(),
                vec![workout]
            );
            assert_eq!(
                repository
                    .read_workout_instances(*USER_ID)
                    .await
                    .unwrap()
                    .iter()
                    .map(|i| i.id)
                    .collect::<Vec<_>>(),
                vec![id]
            );
        }

        #[wasm_bindgen_test]
        async fn test_corrupted_data() {
            reset();
            gloo_storage::LocalStorage::set(user_key(*USER_ID), "invalid").unwrap();
            assert!(matches!(
                Repository::new(LocalStorage).read_workouts(*USER_ID).await,
                Err(domain::ReadError::Storage(domain::StorageError::Other(_)))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_settings() {
            reset();
            assert_eq!(UI.read_settings().await.unwrap(), Settings::default());
            let settings = Settings {
                beep_volume: 20,
                ..Settings::default()
            };
            UI.write_settings(settings).await.unwrap();
            assert_eq!(UI.read_settings().await.unwrap(), settings);
        }

        #[wasm_bindgen_test]
        async fn test_ongoing_workout() {
            reset();
            assert_eq!(UI.read_ongoing_workout().await.unwrap(), None);
            UI.write_ongoing_workout(None).await.unwrap();
            assert_eq!(UI.read_ongoing_workout().await.unwrap(), None);
        }

        #[wasm_bindgen_test]
        fn test_log() {
            reset();
            for i in 0..=MAX_LOG_ENTRIES {
                Log.write_entry(log::Entry {
                    time: String::new(),
                    level: ::log::Level::Info,
                    message: i.to_string(),
                })
                .unwrap();
            }
            let entries = Log.read_entries().unwrap();
            assert_eq!(entries.len(), MAX_LOG_ENTRIES);
            assert_eq!(entries[0].message, MAX_LOG_ENTRIES.to_string());
        }
    }
}
