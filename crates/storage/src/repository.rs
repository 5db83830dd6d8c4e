use log::debug;

use crate::{Backend, UserData, domain};

/// Implements the domain repositories on top of a [`Backend`].
///
/// Every operation loads the user's data, applies the change and saves the
/// result. A failed change leaves the stored data untouched.
pub struct Repository<B> {
    backend: B,
}

impl<B: Backend> Repository<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read<T>(
        &self,
        user_id: domain::UserID,
        f: impl FnOnce(&UserData) -> T,
    ) -> Result<T, domain::ReadError> {
        let data = self
            .backend
            .load(user_id)?
            .unwrap_or_else(|| UserData::new(user_id));
        Ok(f(&data))
    }

    fn modify<T, E>(
        &self,
        user_id: domain::UserID,
        f: impl FnOnce(&mut UserData) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let mut data = self
            .backend
            .load(user_id)?
            .unwrap_or_else(|| {
                debug!("initializing data of user {}", *user_id);
                UserData::new(user_id)
            });
        let result = f(&mut data)?;
        self.backend.save(&data)?;
        Ok(result)
    }
}

impl<B: Backend> domain::WorkoutRepository for Repository<B> {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.read(user_id, |data| data.workouts.clone())
    }

    async fn create_workout(
        &self,
        user_id: domain::UserID,
        name: domain::Name,
        exercises: Vec<domain::Exercise>,
    ) -> Result<domain::Workout, domain::CreateError> {
        self.modify(user_id, |data| data.create_workout(name, exercises))
    }

    async fn replace_workout(
        &self,
        user_id: domain::UserID,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.modify(user_id, |data| data.replace_workout(workout))
    }

    async fn delete_workout(
        &self,
        user_id: domain::UserID,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.modify(user_id, |data| data.delete_workout(id))
    }
}

impl<B: Backend> domain::WorkoutInstanceRepository for Repository<B> {
    async fn read_workout_instances(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutInstance>, domain::ReadError> {
        self.read(user_id, |data| data.instances.clone())
    }

    async fn create_workout_instance(
        &self,
        user_id: domain::UserID,
        instance: domain::WorkoutInstance,
    ) -> Result<domain::WorkoutInstanceID, domain::CreateError> {
        self.modify(user_id, |data| Ok(data.create_workout_instance(instance)))
    }

    async fn update_workout_instance_state(
        &self,
        user_id: domain::UserID,
        id: domain::WorkoutInstanceID,
        state: domain::InstanceState,
    ) -> Result<domain::WorkoutInstance, domain::UpdateError> {
        self.modify(user_id, |data| data.update_workout_instance_state(id, state))
    }

    async fn complete_workout_instance(
        &self,
        user_id: domain::UserID,
        id: domain::WorkoutInstanceID,
        finished: domain::FinishedWorkout,
    ) -> Result<domain::WorkoutInstance, domain::UpdateError> {
        self.modify(user_id, |data| data.complete_workout_instance(id, finished))
    }

    async fn delete_workout_instance(
        &self,
        user_id: domain::UserID,
        id: domain::WorkoutInstanceID,
    ) -> Result<domain::WorkoutInstanceID, domain::DeleteError> {
        self.modify(user_id, |data| data.delete_workout_instance(id))
    }
}

impl<B: Backend> domain::ProfilePointsRepository for Repository<B> {
    async fn read_points(&self, user_id: domain::UserID) -> Result<f64, domain::ReadError> {
        self.read(user_id, |data| data.profile.points)
    }

    async fn add_points(
        &self,
        user_id: domain::UserID,
        delta: f64,
    ) -> Result<f64, domain::UpdateError> {
        self.modify(user_id, |data| Ok(data.add_points(delta)))
    }

    async fn read_achievements(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::UnlockedAchievement>, domain::ReadError> {
        self.read(user_id, |data| data.achievements.clone())
    }

    async fn has_achievement(
        &self,
        user_id: domain::UserID,
        name: &str,
    ) -> Result<bool, domain::ReadError> {
        self.read(user_id, |data| data.has_achievement(name))
    }

    async fn unlock_achievement(
        &self,
        user_id: domain::UserID,
        achievement: domain::UnlockedAchievement,
    ) -> Result<(), domain::CreateError> {
        self.modify(user_id, |data| {
            data.unlock_achievement(achievement);
            Ok(())
        })
    }
}

impl<B: Backend> domain::ProfileRepository for Repository<B> {
    async fn read_profile(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::UserProfile, domain::ReadError> {
        self.read(user_id, |data| data.profile.clone())
    }

    async fn replace_profile(
        &self,
        profile: domain::UserProfile,
    ) -> Result<domain::UserProfile, domain::UpdateError> {
        self.modify(profile.id, |data| Ok(data.replace_profile(profile)))
    }

    async fn read_body_weight_history(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::BodyWeight>, domain::ReadError> {
        self.read(user_id, |data| data.body_weight.clone())
    }

    async fn append_body_weight(
        &self,
        user_id: domain::UserID,
        body_weight: domain::BodyWeight,
    ) -> Result<domain::BodyWeight, domain::UpdateError> {
        self.modify(user_id, |data| Ok(data.append_body_weight(body_weight)))
    }
}

