//! Serializable representation of the stored data.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{self, Property};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Muscle(#[from] domain::MuscleError),
    #[error(transparent)]
    Category(#[from] domain::CategoryError),
    #[error("completed workout instance without completion time")]
    MissingCompletion,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserData {
    pub profile: Profile,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub instances: Vec<WorkoutInstance>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub body_weight: Vec<BodyWeight>,
}

impl From<&crate::UserData> for UserData {
    fn from(value: &crate::UserData) -> Self {
        Self {
            profile: Profile::from(&value.profile),
            workouts: value.workouts.iter().map(Workout::from).collect(),
            instances: value.instances.iter().map(WorkoutInstance::from).collect(),
            achievements: value.achievements.iter().map(Achievement::from).collect(),
            body_weight: value.body_weight.iter().map(BodyWeight::from).collect(),
        }
    }
}

impl TryFrom<UserData> for crate::UserData {
    type Error = RecordError;

    fn try_from(value: UserData) -> Result<Self, Self::Error> {
        Ok(Self {
            profile: value.profile.into(),
            workouts: value
                .workouts
                .into_iter()
                .map(domain::Workout::try_from)
                .collect::<Result<_, _>>()?,
            instances: value
                .instances
                .into_iter()
                .map(domain::WorkoutInstance::try_from)
                .collect::<Result<_, _>>()?,
            achievements: value.achievements.into_iter().map(From::from).collect(),
            body_weight: value.body_weight.into_iter().map(From::from).collect(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub weight: Option<f32>,
    pub height: Option<f32>,
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Option<String>,
    pub step_goal: Option<u32>,
    pub calories_goal: Option<u32>,
    pub weight_goal: Option<f32>,
    #[serde(default)]
    pub points: f64,
    #[serde(default = "default_is_metric")]
    pub is_metric: bool,
}

fn default_is_metric() -> bool {
    true
}

impl From<&domain::UserProfile> for Profile {
    fn from(value: &domain::UserProfile) -> Self {
        Self {
            id: *value.id,
            weight: value.weight,
            height: value.height,
            date_of_birth: value.date_of_birth,
            sex: value.sex.map(|sex| sex.to_string()),
            step_goal: value.goals.step_goal,
            calories_goal: value.goals.calories_goal,
            weight_goal: value.goals.weight_goal,
            points: value.points,
            is_metric: value.unit_system == domain::UnitSystem::Metric,
        }
    }
}

impl From<Profile> for domain::UserProfile {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id.into(),
            weight: value.weight,
            height: value.height,
            date_of_birth: value.date_of_birth,
            sex: value.sex.as_deref().map(domain::Sex::from),
            goals: domain::Goals {
                step_goal: value.step_goal,
                calories_goal: value.calories_goal,
                weight_goal: value.weight_goal,
            },
            points: value.points,
            unit_system: value.is_metric.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub primary_muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    pub equipment: Option<String>,
    pub category: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub done: bool,
    pub video_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.clone(),
            primary_muscles: value
                .primary_muscles
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
            secondary_muscles: value
                .secondary_muscles
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
            equipment: value.equipment.clone(),
            category: value.category.name().to_string(),
            sets: value.sets,
            reps: value.reps,
            done: value.done,
            video_url: value.video_url.clone(),
            images: value.images.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = RecordError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            primary_muscles: value
                .primary_muscles
                .iter()
                .map(|m| domain::Muscle::try_from(m.as_str()))
                .collect::<Result<_, _>>()?,
            secondary_muscles: value
                .secondary_muscles
                .iter()
                .map(|m| domain::Muscle::try_from(m.as_str()))
                .collect::<Result<_, _>>()?,
            equipment: value.equipment,
            category: domain::Category::try_from(value.category.as_str())?,
            sets: value.sets,
            reps: value.reps,
            done: value.done,
            video_url: value.video_url,
            images: value.images,
        })
    }
}

fn exercises(exercises: Vec<Exercise>) -> Result<Vec<domain::Exercise>, RecordError> {
    exercises
        .into_iter()
        .map(domain::Exercise::try_from)
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = RecordError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            exercises: exercises(value.exercises)?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Scheduled,
    Completed,
    Missed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutInstance {
    pub id: Uuid,
    pub workout_id: Option<Uuid>,
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub status: Status,
    pub completed_at: Option<NaiveDateTime>,
    /// Seconds
    #[serde(default)]
    pub time_spent: u32,
    #[serde(default)]
    pub total_calories: f64,
}

impl From<&domain::WorkoutInstance> for WorkoutInstance {
    fn from(value: &domain::WorkoutInstance) -> Self {
        let completion = value.completion();
        Self {
            id: *value.id,
            workout_id: value.workout_id.map(|id| *id),
            name: value.name.to_string(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
            scheduled_date: value.slot.map(|s| s.date),
            scheduled_time: value.slot.and_then(|s| s.time),
            status: match value.state {
                domain::InstanceState::Scheduled => Status::Scheduled,
                domain::InstanceState::Completed(_) => Status::Completed,
                domain::InstanceState::Missed => Status::Missed,
            },
            completed_at: completion.map(|c| c.completed_at),
            time_spent: completion.map(|c| c.time_spent).unwrap_or_default(),
            total_calories: completion.map(|c| c.total_calories).unwrap_or_default(),
        }
    }
}

impl TryFrom<WorkoutInstance> for domain::WorkoutInstance {
    type Error = RecordError;

    fn try_from(value: WorkoutInstance) -> Result<Self, Self::Error> {
        let state = match value.status {
            Status::Scheduled => domain::InstanceState::Scheduled,
            Status::Missed => domain::InstanceState::Missed,
            Status::Completed => domain::InstanceState::Completed(domain::Completion {
                completed_at: value.completed_at.ok_or(RecordError::MissingCompletion)?,
                time_spent: value.time_spent,
                total_calories: value.total_calories,
            }),
        };
        Ok(Self {
            id: value.id.into(),
            workout_id: value.workout_id.map(domain::WorkoutID::from),
            name: domain::Name::new(&value.name)?,
            exercises: exercises(value.exercises)?,
            slot: value.scheduled_date.map(|date| domain::Slot {
                date,
                time: value.scheduled_time,
            }),
            state,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub name: String,
    pub unlocked_at: NaiveDateTime,
}

impl From<&domain::UnlockedAchievement> for Achievement {
    fn from(value: &domain::UnlockedAchievement) -> Self {
        Self {
            name: value.name.clone(),
            unlocked_at: value.unlocked_at,
        }
    }
}

impl From<Achievement> for domain::UnlockedAchievement {
    fn from(value: Achievement) -> Self {
        Self {
            name: value.name,
            unlocked_at: value.unlocked_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BodyWeight {
    pub date: NaiveDate,
    pub weight: f32,
}

impl From<&domain::BodyWeight> for BodyWeight {
    fn from(value: &domain::BodyWeight) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
        }
    }
}

impl From<BodyWeight> for domain::BodyWeight {
    fn from(value: BodyWeight) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::tests::data::{EXERCISE, PROFILE, USER_ID, WORKOUT, completed, scheduled};

    use super::*;

    #[test]
    fn test_user_data_try_from() {
        let mut data = crate::UserData::new(*USER_ID);
        data.profile = PROFILE.clone();
        data.workouts = vec![WORKOUT.clone()];
        data.instances = vec![
            domain::WorkoutInstance {
                id: 1.into(),
                ..scheduled(3)
            },
            domain::WorkoutInstance {
                id: 2.into(),
                ..completed()
            },
            domain::WorkoutInstance {
                id: 3.into(),
                ..scheduled(1).miss().unwrap()
            },
        ];
        data.body_weight = vec![domain::BodyWeight {
            date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            weight: 80.4,
        }];
        assert_eq!(
            crate::UserData::try_from(UserData::from(&data)),
            Ok(data)
        );
    }

    #[test]
    fn test_exercise_serde() {
        let obj = Exercise::from(&*EXERCISE);
        let serialized = json!(obj);
        assert_eq!(serialized["primary_muscles"], json!(["chest"]));
        assert_eq!(serialized["secondary_muscles"], json!(["shoulders", "triceps"]));
        assert_eq!(serialized["category"], json!("strength"));
        let deserialized: Exercise = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[test]
    fn test_exercise_try_from_unknown_muscle() {
        let record = Exercise {
            primary_muscles: vec!["wings".to_string()],
            ..Exercise::from(&*EXERCISE)
        };
        assert_eq!(
            domain::Exercise::try_from(record),
            Err(RecordError::Muscle(domain::MuscleError::Unknown(
                "wings".to_string()
            )))
        );
    }

    #[rstest]
    #[case(Status::Scheduled, "scheduled")]
    #[case(Status::Completed, "completed")]
    #[case(Status::Missed, "missed")]
    fn test_status_serde(#[case] status: Status, #[case] expected: &str) {
        assert_eq!(json!(status), json!(expected));
    }

    #[test]
    fn test_completed_instance_without_completion_time() {
        let record = WorkoutInstance {
            completed_at: None,
            ..WorkoutInstance::from(&completed())
        };
        assert_eq!(
            domain::WorkoutInstance::try_from(record),
            Err(RecordError::MissingCompletion)
        );
    }

    #[test]
    fn test_profile_defaults() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "weight": null,
            "height": null,
            "date_of_birth": null,
            "sex": null,
            "step_goal": null,
            "calories_goal": null,
            "weight_goal": null,
        }))
        .unwrap();
        assert_eq!(
            domain::UserProfile::from(profile),
            domain::UserProfile::new(*USER_ID)
        );
    }
}
