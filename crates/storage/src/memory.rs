use std::{cell::RefCell, collections::BTreeMap};

use crate::{Backend, UserData, domain};

/// Keeps all data in memory, e.g. for tests or a session without persistence.
#[derive(Default)]
pub struct InMemory {
    users: RefCell<BTreeMap<domain::UserID, UserData>>,
    offline: bool,
}

impl InMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that fails every access as if the connection was lost.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

impl Backend for InMemory {
    fn load(&self, user_id: domain::UserID) -> Result<Option<UserData>, domain::StorageError> {
        if self.offline {
            return Err(domain::StorageError::NoConnection);
        }
        Ok(self.users.borrow().get(&user_id).cloned())
    }

    fn save(&self, data: &UserData) -> Result<(), domain::StorageError> {
        if self.offline {
            return Err(domain::StorageError::NoConnection);
        }
        self.users
            .borrow_mut()
            .insert(data.profile.id, data.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    use crate::{
        Repository,
        tests::data::{COMPLETION, PROFILE, USER_ID, USER_ID_2, WORKOUT, at, scheduled},
    };
    use domain::{
        PointsService, ProfilePointsRepository, ProfileRepository, ProfileService,
        WorkoutInstanceRepository, WorkoutInstanceService, WorkoutRepository,
    };

    use super::*;

    fn service(day: u32) -> domain::Service<Repository<InMemory>, domain::FixedClock> {
        domain::Service::with_clock(
            Repository::new(InMemory::new()),
            domain::FixedClock(at(day, 9, 0)),
        )
    }

    #[tokio::test]
    async fn test_read_without_stored_data() {
        let repository = Repository::new(InMemory::new());
        assert_eq!(repository.read_workouts(*USER_ID).await.unwrap(), vec![]);
        assert_eq!(
            repository.read_profile(*USER_ID).await.unwrap(),
            domain::UserProfile::new(*USER_ID)
        );
        assert_eq!(repository.read_points(*USER_ID).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_users_are_separated() {
        let repository = Repository::new(InMemory::new());
        repository
            .create_workout(*USER_ID, WORKOUT.name.clone(), WORKOUT.exercises.clone())
            .await
            .unwrap();
        repository
            .create_workout_instance(*USER_ID, scheduled(3))
            .await
            .unwrap();

        assert_eq!(repository.read_workouts(*USER_ID).await.unwrap().len(), 1);
        assert_eq!(repository.read_workouts(*USER_ID_2).await.unwrap(), vec![]);
        assert_eq!(
            repository.read_workout_instances(*USER_ID_2).await.unwrap(),
            vec![]
        );
    }

    #[tokio::test]
    async fn test_workout_instances() {
        let repository = Repository::new(InMemory::new());
        let id = repository
            .create_workout_instance(*USER_ID, scheduled(3))
            .await
            .unwrap();
        assert!(!id.is_nil());

        let instance = repository
            .update_workout_instance_state(
                *USER_ID,
                id,
                domain::InstanceState::Completed(*COMPLETION),
            )
            .await
            .unwrap();
        assert_eq!(instance.id, id);
        assert_eq!(instance.status(), domain::Status::Completed);

        assert!(matches!(
            repository
                .update_workout_instance_state(*USER_ID, id, domain::InstanceState::Scheduled)
                .await,
            Err(domain::UpdateError::Transition(_))
        ));
        assert_eq!(
            repository.read_workout_instances(*USER_ID).await.unwrap(),
            vec![instance]
        );

        assert_eq!(
            repository.delete_workout_instance(*USER_ID, id).await.unwrap(),
            id
        );
        assert_eq!(
            repository.read_workout_instances(*USER_ID).await.unwrap(),
            vec![]
        );
    }

    #[tokio::test]
    async fn test_points_and_achievements() {
        let repository = Repository::new(InMemory::new());
        assert_eq!(repository.add_points(*USER_ID, 10.0).await.unwrap(), 10.0);
        assert_eq!(repository.add_points(*USER_ID, 2.5).await.unwrap(), 12.5);
        assert!(!repository.has_achievement(*USER_ID, "Rookie").await.unwrap());

        let achievement = domain::UnlockedAchievement {
            name: "Rookie".to_string(),
            unlocked_at: at(1, 10, 0),
        };
        repository
            .unlock_achievement(*USER_ID, achievement.clone())
            .await
            .unwrap();
        repository
            .unlock_achievement(
                *USER_ID,
                domain::UnlockedAchievement {
                    unlocked_at: at(2, 10, 0),
                    ..achievement.clone()
                },
            )
            .await
            .unwrap();

        assert!(repository.has_achievement(*USER_ID, "Rookie").await.unwrap());
        assert_eq!(
            repository.read_achievements(*USER_ID).await.unwrap(),
            vec![achievement]
        );
    }

    #[tokio::test]
    async fn test_profile() {
        let repository = Repository::new(InMemory::new());
        repository.add_points(*USER_ID, 3.0).await.unwrap();
        let profile = repository.replace_profile(PROFILE.clone()).await.unwrap();
        assert_eq!(profile.points, 3.0);
        assert_eq!(profile.weight, PROFILE.weight);

        let body_weight = domain::BodyWeight {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            weight: 81.5,
        };
        repository
            .append_body_weight(*USER_ID, body_weight)
            .await
            .unwrap();
        assert_eq!(
            repository.read_body_weight_history(*USER_ID).await.unwrap(),
            vec![body_weight]
        );
    }

    #[tokio::test]
    async fn test_offline() {
        let repository = Repository::new(InMemory::offline());
        assert!(matches!(
            repository.read_workout_instances(*USER_ID).await,
            Err(domain::ReadError::Storage(domain::StorageError::NoConnection))
        ));
        assert!(matches!(
            repository.add_points(*USER_ID, 1.0).await,
            Err(domain::UpdateError::Storage(domain::StorageError::NoConnection))
        ));
    }

    #[tokio::test]
    async fn test_failed_change_is_not_saved() {
        let repository = Repository::new(InMemory::new());
        repository
            .create_workout(*USER_ID, WORKOUT.name.clone(), WORKOUT.exercises.clone())
            .await
            .unwrap();
        assert!(
            repository
                .create_workout(*USER_ID, WORKOUT.name.clone(), vec![])
                .await
                .is_err()
        );
        assert_eq!(repository.read_workouts(*USER_ID).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_schedule_twice_on_same_day() {
        let service = service(1);
        let slot = domain::Slot {
            date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0),
        };
        service
            .schedule_workout(*USER_ID, &WORKOUT, slot)
            .await
            .unwrap();
        assert!(matches!(
            service
                .schedule_workout(
                    *USER_ID,
                    &WORKOUT,
                    domain::Slot {
                        time: NaiveTime::from_hms_opt(7, 0, 0),
                        ..slot
                    }
                )
                .await,
            Err(domain::CreateError::Conflict)
        ));
        assert_eq!(
            service.get_workout_instances(*USER_ID).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_complete_scheduled_workout() {
        let service = service(3);
        let instance = service
            .schedule_workout(
                *USER_ID,
                &WORKOUT,
                domain::Slot {
                    date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                    time: None,
                },
            )
            .await
            .unwrap();

        let finished = domain::FinishedWorkout {
            workout_id: Some(WORKOUT.id),
            name: WORKOUT.name.clone(),
            exercises: WORKOUT.exercises.clone(),
            completion: domain::Completion {
                completed_at: at(3, 19, 0),
                ..*COMPLETION
            },
        };
        let outcome = service
            .complete_workout(*USER_ID, Some(instance.id), finished)
            .await
            .unwrap();

        assert_eq!(outcome.instance.id, instance.id);
        assert!(outcome.points_earned > 0.0);
        assert_eq!(outcome.total_points, outcome.points_earned);
        assert_eq!(outcome.achievement, Some(&domain::ACHIEVEMENTS[0]));
        assert!(outcome.newly_unlocked);
        assert_eq!(
            service.get_points(*USER_ID).await.unwrap(),
            outcome.total_points
        );

        let agenda = service.get_agenda(*USER_ID).await.unwrap();
        let day = agenda
            .day(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap())
            .unwrap();
        assert!(day.scheduled.is_empty());
        assert_eq!(day.completed.len(), 1);
    }

    #[tokio::test]
    async fn test_complete_missed_workout() {
        let repository = Repository::new(InMemory::new());
        let id = repository
            .create_workout_instance(*USER_ID, scheduled(1))
            .await
            .unwrap();
        let service = domain::Service::with_clock(repository, domain::FixedClock(at(3, 9, 0)));
        let day_1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(service.get_agenda(*USER_ID).await.unwrap().has_missed(day_1));

        let finished = domain::FinishedWorkout {
            workout_id: Some(WORKOUT.id),
            name: WORKOUT.name.clone(),
            exercises: WORKOUT.exercises.clone(),
            completion: domain::Completion {
                completed_at: at(3, 10, 0),
                ..*COMPLETION
            },
        };
        assert!(
            service
                .complete_workout(*USER_ID, Some(id), finished)
                .await
                .is_err()
        );
        assert!(service.get_agenda(*USER_ID).await.unwrap().has_missed(day_1));
        assert_eq!(service.get_points(*USER_ID).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_muscles_worked_after_completion() {
        let service = service(3);
        service
            .complete_workout(
                *USER_ID,
                None,
                domain::FinishedWorkout {
                    workout_id: Some(WORKOUT.id),
                    name: WORKOUT.name.clone(),
                    exercises: WORKOUT.exercises.clone(),
                    completion: *COMPLETION,
                },
            )
            .await
            .unwrap();
        let muscles = service.get_muscles_worked(*USER_ID).await.unwrap();
        assert!(muscles.is_muscle_worked(domain::Muscle::Chest));
        assert!(muscles.is_muscle_worked(domain::Muscle::Hamstrings));
        assert!(!muscles.is_muscle_worked(domain::Muscle::Shoulders));
    }

    #[tokio::test]
    async fn test_change_body_weight() {
        let service = service(3);
        service.replace_profile(PROFILE.clone()).await.unwrap();
        let profile = service.change_body_weight(*USER_ID, 78.5).await.unwrap();
        assert_eq!(profile.weight, Some(78.5));
        assert_eq!(
            service.get_body_weight_history(*USER_ID).await.unwrap(),
            vec![domain::BodyWeight {
                date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                weight: 80.0,
            }]
        );
    }
}
