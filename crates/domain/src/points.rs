use chrono::NaiveDateTime;

use crate::{Achievement, CreateError, ReadError, UpdateError, UserID, WorkoutInstance};

#[allow(async_fn_in_trait)]
pub trait PointsService {
    async fn get_points(&self, user_id: UserID) -> Result<f64, ReadError>;
    /// Add `delta` to the user's points and return the new total.
    async fn award_points(&self, user_id: UserID, delta: f64) -> Result<f64, UpdateError>;
    async fn get_achievements(
        &self,
        user_id: UserID,
    ) -> Result<Vec<UnlockedAchievement>, ReadError>;
    /// Unlock the achievement unless it was unlocked before.
    ///
    /// Returns whether the achievement was newly unlocked.
    async fn unlock_achievement(
        &self,
        user_id: UserID,
        achievement: &'static Achievement,
    ) -> Result<bool, CreateError>;
    async fn current_achievement(
        &self,
        user_id: UserID,
    ) -> Result<Option<&'static Achievement>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ProfilePointsRepository {
    async fn read_points(&self, user_id: UserID) -> Result<f64, ReadError>;
    async fn add_points(&self, user_id: UserID, delta: f64) -> Result<f64, UpdateError>;
    async fn read_achievements(
        &self,
        user_id: UserID,
    ) -> Result<Vec<UnlockedAchievement>, ReadError>;
    async fn has_achievement(&self, user_id: UserID, name: &str) -> Result<bool, ReadError>;
    /// Store the achievement, keeping an existing record untouched.
    async fn unlock_achievement(
        &self,
        user_id: UserID,
        achievement: UnlockedAchievement,
    ) -> Result<(), CreateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedAchievement {
    pub name: String,
    pub unlocked_at: NaiveDateTime,
}

impl UnlockedAchievement {
    #[must_use]
    pub fn achievement(&self) -> Option<&'static Achievement> {
        Achievement::by_name(&self.name)
    }
}

/// Result of completing a workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutOutcome {
    pub instance: WorkoutInstance,
    pub points_earned: f64,
    pub total_points: f64,
    pub achievement: Option<&'static Achievement>,
    /// Whether the achievement was unlocked by this workout.
    pub newly_unlocked: bool,
}
