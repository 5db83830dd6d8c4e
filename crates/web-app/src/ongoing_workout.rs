use chrono::{NaiveDateTime, TimeDelta};
use fitme_domain::{self as domain, Workout, WorkoutSession};
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutService {
    async fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String>;
    async fn set_ongoing_workout(&self, ongoing_workout: Option<OngoingWorkout>)
    -> Result<(), String>;
    /// Discard the ongoing workout without recording it.
    async fn cancel_ongoing_workout(&self) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutRepository {
    async fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String>;
    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), String>;
}

/// Snapshot of a running workout session that survives a reload of the app.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingWorkout {
    pub workout_id: Option<u128>,
    pub start_time: NaiveDateTime,
    pub exercise_idx: usize,
    pub current_set: u32,
    pub done: bool,
    pub timer_state: TimerState,
    /// Sets and reps as performed, which may differ from the workout.
    #[serde(default)]
    pub exercises: Vec<ExerciseSets>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseSets {
    pub sets: u32,
    pub reps: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Unset,
    Active { target_time: NaiveDateTime },
    /// Remaining time in milliseconds
    Paused { time: i64 },
}

impl From<&WorkoutSession> for OngoingWorkout {
    fn from(session: &WorkoutSession) -> Self {
        Self {
            workout_id: session.workout_id.map(|id| id.as_u128()),
            start_time: session.start_time,
            exercise_idx: session.exercise_idx,
            current_set: session.current_set,
            done: session.is_done(),
            timer_state: match session.timer {
                domain::TimerState::Unset => TimerState::Unset,
                domain::TimerState::Active { target_time } => TimerState::Active { target_time },
            },
            exercises: session
                .exercises
                .iter()
                .map(|e| ExerciseSets {
                    sets: e.sets,
                    reps: e.reps,
                })
                .collect(),
        }
    }
}

impl OngoingWorkout {
    pub fn pause(&mut self, now: NaiveDateTime) {
        if let TimerState::Active { target_time } = self.timer_state {
            self.timer_state = TimerState::Paused {
                time: (target_time - now).num_milliseconds().max(0),
            };
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self.timer_state, TimerState::Paused { .. })
    }

    /// Continue the session of `workout` where the snapshot was taken.
    ///
    /// A paused timer is resumed at `now`. Returns `None` if the snapshot
    /// belongs to another workout or does not fit its exercises. Snapshots
    /// without sets and reps keep those of the workout.
    #[must_use]
    pub fn restore(&self, workout: &Workout, now: NaiveDateTime) -> Option<WorkoutSession> {
        if self.workout_id != Some(workout.id.as_u128()) {
            return None;
        }
        if self.exercise_idx >= workout.exercises.len().max(1) {
            return None;
        }
        if !self.exercises.is_empty() && self.exercises.len() != workout.exercises.len() {
            return None;
        }

        let mut session = WorkoutSession::start(workout, self.start_time);
        for (i, exercise) in session.exercises.iter_mut().enumerate() {
            exercise.done = self.done || i < self.exercise_idx;
            if let Some(sets) = self.exercises.get(i) {
                exercise.sets = sets.sets;
                exercise.reps = sets.reps;
            }
        }
        session.exercise_idx = self.exercise_idx;
        session.current_set = self.current_set;
        session.timer = match self.timer_state {
            TimerState::Unset => domain::TimerState::Unset,
            TimerState::Active { target_time } => domain::TimerState::Active { target_time },
            TimerState::Paused { time } => domain::TimerState::Active {
                target_time: now + TimeDelta::milliseconds(time),
            },
        };
        Some(session)
    }
}
