use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Exercise, Name, ReadError, UpdateError, UserID};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        name: Name,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, user_id: UserID, workout: Workout)
    -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, user_id: UserID, id: WorkoutID)
    -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        name: Name,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, user_id: UserID, workout: Workout)
    -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, user_id: UserID, id: WorkoutID)
    -> Result<WorkoutID, DeleteError>;
}

/// Reusable template of exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    #[must_use]
    pub fn num_reps(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets * e.reps).sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
