use uuid::Uuid;

use fitme_domain as domain;

/// All data stored for a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    pub profile: domain::UserProfile,
    pub workouts: Vec<domain::Workout>,
    pub instances: Vec<domain::WorkoutInstance>,
    pub achievements: Vec<domain::UnlockedAchievement>,
    pub body_weight: Vec<domain::BodyWeight>,
}

impl UserData {
    #[must_use]
    pub fn new(user_id: domain::UserID) -> Self {
        Self {
            profile: domain::UserProfile::new(user_id),
            workouts: vec![],
            instances: vec![],
            achievements: vec![],
            body_weight: vec![],
        }
    }

    pub fn create_workout(
        &mut self,
        name: domain::Name,
        exercises: Vec<domain::Exercise>,
    ) -> Result<domain::Workout, domain::CreateError> {
        if self.workouts.iter().any(|w| w.name.matches(&name)) {
            return Err(domain::ValidationError::Conflict("name".to_string()).into());
        }
        let workout = domain::Workout {
            id: Uuid::new_v4().into(),
            name,
            exercises,
        };
        self.workouts.push(workout.clone());
        Ok(workout)
    }

    pub fn replace_workout(
        &mut self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        if self
            .workouts
            .iter()
            .any(|w| w.id != workout.id && w.name.matches(&workout.name))
        {
            return Err(domain::UpdateError::Conflict);
        }
        let Some(stored) = self.workouts.iter_mut().find(|w| w.id == workout.id) else {
            return Err(domain::UpdateError::Other("workout not found".into()));
        };
        *stored = workout.clone();
        Ok(workout)
    }

    pub fn delete_workout(
        &mut self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let len = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        if self.workouts.len() == len {
            return Err(domain::DeleteError::Other("workout not found".into()));
        }
        Ok(id)
    }

    pub fn create_workout_instance(
        &mut self,
        instance: domain::WorkoutInstance,
    ) -> domain::WorkoutInstanceID {
        let id = domain::WorkoutInstanceID::from(Uuid::new_v4());
        self.instances
            .push(domain::WorkoutInstance { id, ..instance });
        id
    }

    /// Change the state of an instance, refusing changes out of a terminal
    /// state.
    pub fn update_workout_instance_state(
        &mut self,
        id: domain::WorkoutInstanceID,
        state: domain::InstanceState,
    ) -> Result<domain::WorkoutInstance, domain::UpdateError> {
        let Some(instance) = self.instances.iter_mut().find(|i| i.id == id) else {
            return Err(domain::UpdateError::Other("workout instance not found".into()));
        };
        *instance = instance.clone().transition(state)?;
        Ok(instance.clone())
    }

    /// Complete a scheduled instance with the performed exercises.
    pub fn complete_workout_instance(
        &mut self,
        id: domain::WorkoutInstanceID,
        finished: domain::FinishedWorkout,
    ) -> Result<domain::WorkoutInstance, domain::UpdateError> {
        let Some(instance) = self.instances.iter_mut().find(|i| i.id == id) else {
            return Err(domain::UpdateError::Other("workout instance not found".into()));
        };
        *instance = instance.clone().complete(finished)?;
        Ok(instance.clone())
    }

    pub fn delete_workout_instance(
        &mut self,
        id: domain::WorkoutInstanceID,
    ) -> Result<domain::WorkoutInstanceID, domain::DeleteError> {
        let len = self.instances.len();
        self.instances.retain(|i| i.id != id);
        if self.instances.len() == len {
            return Err(domain::DeleteError::Other(
                "workout instance not found".into(),
            ));
        }
        Ok(id)
    }

    pub fn add_points(&mut self, delta: f64) -> f64 {
        self.profile.points += delta;
        self.profile.points
    }

    #[must_use]
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a.name == name)
    }

    /// Store the achievement if it is not yet stored.
    pub fn unlock_achievement(&mut self, achievement: domain::UnlockedAchievement) {
        if !self.has_achievement(&achievement.name) {
            self.achievements.push(achievement);
        }
    }

    pub fn replace_profile(&mut self, profile: domain::UserProfile) -> domain::UserProfile {
        self.profile = domain::UserProfile {
            points: self.profile.points,
            ..profile
        };
        self.profile.clone()
    }

    pub fn append_body_weight(&mut self, body_weight: domain::BodyWeight) -> domain::BodyWeight {
        self.body_weight.push(body_weight);
        body_weight
    }
}
