use log::{debug, error, info};

use crate::{
    Achievement, Agenda, BodyWeight, Clock, CreateError, DeleteError, Exercise, FinishedWorkout,
    InstanceState, MusclesWorked, Name, PointsInput, PointsService, ProfilePointsRepository,
    ProfileRepository, ProfileService, ReadError, Slot, Status, Summary, SystemClock,
    TransitionError, UnlockedAchievement, UpdateError, UserID, UserProfile, ValidationError,
    Workout, WorkoutID, WorkoutInstance, WorkoutInstanceID, WorkoutInstanceRepository,
    WorkoutInstanceService, WorkoutOutcome, WorkoutRepository, WorkoutService,
    achievement_for_points, aggregate, has_conflict, points,
};

pub struct Service<R, C = SystemClock> {
    repository: R,
    clock: C,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            clock: SystemClock,
        }
    }
}

impl<R, C: Clock> Service<R, C> {
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

fn validate_exercises(exercises: &[Exercise]) -> Result<(), ValidationError> {
    if exercises.is_empty() {
        Err(ValidationError::Other(
            "Workout must contain at least one exercise".into(),
        ))
    } else {
        Ok(())
    }
}

impl<R: WorkoutRepository, C: Clock> WorkoutService for Service<R, C> {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout(
        &self,
        user_id: UserID,
        name: Name,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, CreateError> {
        validate_exercises(&exercises)?;
        log_on_error!(
            self.repository.create_workout(user_id, name, exercises),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(
        &self,
        user_id: UserID,
        workout: Workout,
    ) -> Result<Workout, UpdateError> {
        validate_exercises(&workout.exercises).map_err(|err| UpdateError::Other(err.into()))?;
        log_on_error!(
            self.repository.replace_workout(user_id, workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(
        &self,
        user_id: UserID,
        id: WorkoutID,
    ) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(user_id, id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R, C> WorkoutInstanceService for Service<R, C>
where
    R: WorkoutInstanceRepository + ProfilePointsRepository,
    C: Clock,
{
    async fn get_workout_instances(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutInstance>, ReadError> {
        log_on_error!(
            self.repository.read_workout_instances(user_id),
            ReadError,
            "get",
            "workout instances"
        )
    }

    async fn schedule_workout(
        &self,
        user_id: UserID,
        workout: &Workout,
        slot: Slot,
    ) -> Result<WorkoutInstance, CreateError> {
        validate_exercises(&workout.exercises)?;
        if slot.date < self.clock.today() {
            return Err(ValidationError::Other("Date must not be in the past".into()).into());
        }

        let instances = self.get_workout_instances(user_id).await?;
        if has_conflict(&instances, slot.date) {
            info!(
                "rejected scheduling of {} on {}: a workout is already scheduled",
                workout.name, slot.date
            );
            return Err(CreateError::Conflict);
        }

        let instance = WorkoutInstance::scheduled(workout, slot);
        let id = log_on_error!(
            self.repository
                .create_workout_instance(user_id, instance.clone()),
            CreateError,
            "create",
            "workout instance"
        )?;
        Ok(WorkoutInstance { id, ..instance })
    }

    async fn complete_workout(
        &self,
        user_id: UserID,
        scheduled: Option<WorkoutInstanceID>,
        finished: FinishedWorkout,
    ) -> Result<WorkoutOutcome, CreateError> {
        let instance = if let Some(id) = scheduled {
            let instances = self.get_workout_instances(user_id).await?;
            if instances
                .iter()
                .any(|i| i.id == id && i.is_overdue(self.clock.today()))
            {
                info!("rejected completion of workout instance {}: already missed", *id);
                return Err(UpdateError::Transition(TransitionError {
                    from: Status::Missed,
                    to: Status::Completed,
                })
                .into());
            }
            log_on_error!(
                self.repository
                    .complete_workout_instance(user_id, id, finished),
                UpdateError,
                "complete",
                "workout instance"
            )?
        } else {
            let instance = WorkoutInstance::completed(finished);
            let id = log_on_error!(
                self.repository
                    .create_workout_instance(user_id, instance.clone()),
                CreateError,
                "create",
                "workout instance"
            )?;
            WorkoutInstance { id, ..instance }
        };

        let points_earned = points(&PointsInput::from(&instance));
        let total_points = self.award_points(user_id, points_earned).await?;
        let achievement = achievement_for_points(total_points);
        let newly_unlocked = match achievement {
            Some(achievement) => {
                PointsService::unlock_achievement(self, user_id, achievement).await?
            }
            None => false,
        };

        Ok(WorkoutOutcome {
            instance,
            points_earned,
            total_points,
            achievement,
            newly_unlocked,
        })
    }

    async fn delete_workout_instance(
        &self,
        user_id: UserID,
        id: WorkoutInstanceID,
    ) -> Result<WorkoutInstanceID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_instance(user_id, id),
            DeleteError,
            "delete",
            "workout instance"
        )
    }

    async fn record_missed_workouts(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutInstanceID>, UpdateError> {
        let instances = self.get_workout_instances(user_id).await?;
        let agenda = Agenda::new(&instances, self.clock.today());
        let mut missed = vec![];

        for instance in agenda
            .missed()
            .filter(|i| i.state == InstanceState::Scheduled)
        {
            log_on_error!(
                self.repository.update_workout_instance_state(
                    user_id,
                    instance.id,
                    InstanceState::Missed
                ),
                UpdateError,
                "mark",
                "workout instance as missed"
            )?;
            missed.push(instance.id);
        }

        if !missed.is_empty() {
            debug!("marked {} workout instances as missed", missed.len());
        }

        Ok(missed)
    }

    async fn get_agenda(&self, user_id: UserID) -> Result<Agenda, ReadError> {
        let instances = self.get_workout_instances(user_id).await?;
        Ok(Agenda::new(&instances, self.clock.today()))
    }

    async fn get_muscles_worked(&self, user_id: UserID) -> Result<MusclesWorked, ReadError> {
        let instances = self.get_workout_instances(user_id).await?;
        Ok(aggregate(&instances, self.clock.today()))
    }

    async fn get_summary(&self, user_id: UserID) -> Result<Summary, ReadError> {
        let instances = self.get_workout_instances(user_id).await?;
        Ok(Summary::new(&instances, self.clock.today()))
    }
}

impl<R: ProfilePointsRepository, C: Clock> PointsService for Service<R, C> {
    async fn get_points(&self, user_id: UserID) -> Result<f64, ReadError> {
        log_on_error!(
            self.repository.read_points(user_id),
            ReadError,
            "get",
            "points"
        )
    }

    async fn award_points(&self, user_id: UserID, delta: f64) -> Result<f64, UpdateError> {
        if delta.is_nan() || delta < 0.0 {
            return Err(UpdateError::Other(
                format!("invalid number of points: {delta}").into(),
            ));
        }
        let total = log_on_error!(
            self.repository.add_points(user_id, delta),
            UpdateError,
            "add",
            "points"
        )?;
        info!("awarded {delta:.1} points (total: {total:.1})");
        Ok(total)
    }

    async fn get_achievements(
        &self,
        user_id: UserID,
    ) -> Result<Vec<UnlockedAchievement>, ReadError> {
        log_on_error!(
            self.repository.read_achievements(user_id),
            ReadError,
            "get",
            "achievements"
        )
    }

    async fn unlock_achievement(
        &self,
        user_id: UserID,
        achievement: &'static Achievement,
    ) -> Result<bool, CreateError> {
        let unlocked = log_on_error!(
            self.repository.has_achievement(user_id, achievement.name),
            ReadError,
            "check",
            "achievement"
        )?;
        if unlocked {
            return Ok(false);
        }
        log_on_error!(
            self.repository.unlock_achievement(
                user_id,
                UnlockedAchievement {
                    name: achievement.name.to_string(),
                    unlocked_at: self.clock.now(),
                }
            ),
            CreateError,
            "unlock",
            "achievement"
        )?;
        info!("unlocked achievement {achievement}");
        Ok(true)
    }

    async fn current_achievement(
        &self,
        user_id: UserID,
    ) -> Result<Option<&'static Achievement>, ReadError> {
        Ok(achievement_for_points(self.get_points(user_id).await?))
    }
}

impl<R: ProfileRepository, C: Clock> ProfileService for Service<R, C> {
    async fn get_profile(&self, user_id: UserID) -> Result<UserProfile, ReadError> {
        log_on_error!(
            self.repository.read_profile(user_id),
            ReadError,
            "get",
            "profile"
        )
    }

    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError> {
        log_on_error!(
            self.repository.replace_profile(profile),
            UpdateError,
            "replace",
            "profile"
        )
    }

    async fn get_body_weight_history(
        &self,
        user_id: UserID,
    ) -> Result<Vec<BodyWeight>, ReadError> {
        log_on_error!(
            self.repository.read_body_weight_history(user_id),
            ReadError,
            "get",
            "body weight history"
        )
    }

    #[allow(clippy::float_cmp)]
    async fn change_body_weight(
        &self,
        user_id: UserID,
        weight: f32,
    ) -> Result<UserProfile, UpdateError> {
        let profile = self.get_profile(user_id).await?;

        if profile.weight == Some(weight) {
            return Err(UpdateError::Other("weight is unchanged".into()));
        }

        if let Some(previous) = profile.weight {
            log_on_error!(
                self.repository.append_body_weight(
                    user_id,
                    BodyWeight {
                        date: self.clock.today(),
                        weight: previous,
                    }
                ),
                UpdateError,
                "append",
                "body weight"
            )?;
        }

        self.replace_profile(UserProfile {
            weight: Some(weight),
            ..profile
        })
        .await
    }
}
