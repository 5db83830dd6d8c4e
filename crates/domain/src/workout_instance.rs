use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Agenda, CreateError, DeleteError, Exercise, MusclesWorked, Name, ReadError, Summary,
    UpdateError, UserID, ValidationError, Workout, WorkoutID, WorkoutOutcome,
};

pub const REMINDER_LEAD_TIME: TimeDelta = TimeDelta::minutes(15);

#[allow(async_fn_in_trait)]
pub trait WorkoutInstanceService {
    async fn get_workout_instances(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutInstance>, ReadError>;
    /// Schedule `workout` on the given slot.
    ///
    /// Only one scheduled workout is allowed per day, a second one is rejected
    /// with [`CreateError::Conflict`] before anything is written.
    async fn schedule_workout(
        &self,
        user_id: UserID,
        workout: &Workout,
        slot: Slot,
    ) -> Result<WorkoutInstance, CreateError>;
    /// Store a finished workout and award its points.
    ///
    /// If `scheduled` refers to a scheduled instance, that instance is
    /// transitioned to completed and keeps the performed exercises, otherwise
    /// a new completed instance is created. An instance whose day has passed
    /// is already missed and cannot be completed.
    async fn complete_workout(
        &self,
        user_id: UserID,
        scheduled: Option<WorkoutInstanceID>,
        finished: FinishedWorkout,
    ) -> Result<WorkoutOutcome, CreateError>;
    async fn delete_workout_instance(
        &self,
        user_id: UserID,
        id: WorkoutInstanceID,
    ) -> Result<WorkoutInstanceID, DeleteError>;
    /// Persist the missed state of scheduled workouts whose day has passed.
    ///
    /// Calling it repeatedly has no further effect. Reading the agenda does not
    /// depend on it, as missed workouts are derived when reconciling.
    async fn record_missed_workouts(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutInstanceID>, UpdateError>;
    async fn get_agenda(&self, user_id: UserID) -> Result<Agenda, ReadError>;
    async fn get_muscles_worked(&self, user_id: UserID) -> Result<MusclesWorked, ReadError>;
    async fn get_summary(&self, user_id: UserID) -> Result<Summary, ReadError>;

    fn validate_slot(
        &self,
        date: &str,
        time: &str,
        today: NaiveDate,
    ) -> Result<Slot, ValidationError> {
        let Ok(date) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") else {
            return Err(ValidationError::Other("Invalid date".into()));
        };
        if date < today {
            return Err(ValidationError::Other(
                "Date must not be in the past".into(),
            ));
        }
        let time = time.trim();
        if time.is_empty() {
            return Ok(Slot { date, time: None });
        }
        match NaiveTime::parse_from_str(time, "%H:%M") {
            Ok(time) => Ok(Slot {
                date,
                time: Some(time),
            }),
            Err(_) => Err(ValidationError::Other("Invalid time".into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutInstanceRepository {
    async fn read_workout_instances(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutInstance>, ReadError>;
    async fn create_workout_instance(
        &self,
        user_id: UserID,
        instance: WorkoutInstance,
    ) -> Result<WorkoutInstanceID, CreateError>;
    async fn update_workout_instance_state(
        &self,
        user_id: UserID,
        id: WorkoutInstanceID,
        state: InstanceState,
    ) -> Result<WorkoutInstance, UpdateError>;
    /// Complete a scheduled instance with the exercises as they were performed.
    async fn complete_workout_instance(
        &self,
        user_id: UserID,
        id: WorkoutInstanceID,
        finished: FinishedWorkout,
    ) -> Result<WorkoutInstance, UpdateError>;
    async fn delete_workout_instance(
        &self,
        user_id: UserID,
        id: WorkoutInstanceID,
    ) -> Result<WorkoutInstanceID, DeleteError>;
}

/// A single scheduled or performed occurrence of a workout.
///
/// The exercises are a copy of the workout's exercises at the time the
/// instance was created, later changes of the workout do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutInstance {
    pub id: WorkoutInstanceID,
    pub workout_id: Option<WorkoutID>,
    pub name: Name,
    pub exercises: Vec<Exercise>,
    pub slot: Option<Slot>,
    pub state: InstanceState,
}

impl WorkoutInstance {
    #[must_use]
    pub fn scheduled(workout: &Workout, slot: Slot) -> Self {
        Self {
            id: WorkoutInstanceID::nil(),
            workout_id: Some(workout.id),
            name: workout.name.clone(),
            exercises: workout.exercises.clone(),
            slot: Some(slot),
            state: InstanceState::Scheduled,
        }
    }

    #[must_use]
    pub fn completed(finished: FinishedWorkout) -> Self {
        Self {
            id: WorkoutInstanceID::nil(),
            workout_id: finished.workout_id,
            name: finished.name,
            exercises: finished.exercises,
            slot: None,
            state: InstanceState::Completed(finished.completion),
        }
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.state.status()
    }

    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        match &self.state {
            InstanceState::Completed(completion) => Some(completion),
            InstanceState::Scheduled | InstanceState::Missed => None,
        }
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completion().map(|c| c.completed_at)
    }

    #[must_use]
    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.slot.map(|s| s.date)
    }

    /// Date under which the instance appears in the calendar.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match &self.state {
            InstanceState::Completed(completion) => Some(completion.completed_at.date()),
            InstanceState::Scheduled | InstanceState::Missed => self.scheduled_date(),
        }
    }

    /// Whether the instance is still stored as scheduled although its day has
    /// passed, which makes it count as missed.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.state == InstanceState::Scheduled
            && self.scheduled_date().is_some_and(|date| date < today)
    }

    /// Whether both instances stem from the same workout, by reference if
    /// possible and by name otherwise.
    #[must_use]
    pub fn is_same_workout(&self, other: &WorkoutInstance) -> bool {
        match (self.workout_id, other.workout_id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name.matches(&other.name),
        }
    }

    /// Complete the instance, replacing the planned exercises by the
    /// performed ones.
    pub fn complete(self, finished: FinishedWorkout) -> Result<Self, TransitionError> {
        Ok(Self {
            exercises: finished.exercises,
            ..self.transition(InstanceState::Completed(finished.completion))?
        })
    }

    pub fn miss(self) -> Result<Self, TransitionError> {
        self.transition(InstanceState::Missed)
    }

    pub fn transition(self, state: InstanceState) -> Result<Self, TransitionError> {
        Ok(Self {
            state: self.state.transition(state)?,
            ..self
        })
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutInstanceID(Uuid);

impl WorkoutInstanceID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutInstanceID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutInstanceID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl Slot {
    #[must_use]
    pub fn date_time(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Point in time at which the user should be reminded of the workout.
    ///
    /// Slots without a time get no reminder.
    #[must_use]
    pub fn reminder_at(&self) -> Option<NaiveDateTime> {
        self.time
            .map(|time| self.date.and_time(time) - REMINDER_LEAD_TIME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub completed_at: NaiveDateTime,
    /// Seconds
    pub time_spent: u32,
    pub total_calories: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishedWorkout {
    pub workout_id: Option<WorkoutID>,
    pub name: Name,
    pub exercises: Vec<Exercise>,
    pub completion: Completion,
}

/// Lifecycle of a workout instance.
///
/// ```text
/// scheduled --complete--> completed
/// scheduled --miss------> missed
/// ```
///
/// Completed and missed are terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstanceState {
    Scheduled,
    Completed(Completion),
    Missed,
}

impl InstanceState {
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            InstanceState::Scheduled => Status::Scheduled,
            InstanceState::Completed(_) => Status::Completed,
            InstanceState::Missed => Status::Missed,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InstanceState::Scheduled)
    }

    pub fn transition(self, next: InstanceState) -> Result<InstanceState, TransitionError> {
        match (self, next) {
            (InstanceState::Scheduled, InstanceState::Completed(_) | InstanceState::Missed) => {
                Ok(next)
            }
            _ => Err(TransitionError {
                from: self.status(),
                to: next.status(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Scheduled,
    Completed,
    Missed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Status::Scheduled => "scheduled",
                Status::Completed => "completed",
                Status::Missed => "missed",
            }
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot change status from {from} to {to}")]
pub struct TransitionError {
    pub from: Status,
    pub to: Status,
}
