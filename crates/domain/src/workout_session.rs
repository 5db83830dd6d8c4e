use chrono::{NaiveDateTime, TimeDelta};

use crate::{Completion, Exercise, FinishedWorkout, Name, Workout, WorkoutID, estimate_calories};

pub const REST_BETWEEN_SETS: TimeDelta = TimeDelta::seconds(30);
pub const REST_BETWEEN_EXERCISES: TimeDelta = TimeDelta::seconds(60);
pub const ADDITIONAL_REST: TimeDelta = TimeDelta::seconds(10);

/// Live execution of a workout.
///
/// Timers are represented by their target time and evaluated against the
/// time passed in by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub workout_id: Option<WorkoutID>,
    pub name: Name,
    pub exercises: Vec<Exercise>,
    pub start_time: NaiveDateTime,
    pub exercise_idx: usize,
    /// Set of the current exercise that is performed next, starting at 1.
    pub current_set: u32,
    pub timer: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Unset,
    Active { target_time: NaiveDateTime },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    RestBetweenSets { next_set: u32 },
    NextExercise { name: String },
    AllExercisesDone,
}

impl WorkoutSession {
    #[must_use]
    pub fn start(workout: &Workout, now: NaiveDateTime) -> Self {
        Self {
            workout_id: Some(workout.id),
            name: workout.name.clone(),
            exercises: workout
                .exercises
                .iter()
                .map(|e| Exercise {
                    done: false,
                    ..e.clone()
                })
                .collect(),
            start_time: now,
            exercise_idx: 0,
            current_set: 1,
            timer: TimerState::Unset,
        }
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.exercise_idx)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.exercises.iter().all(|e| e.done)
    }

    /// Mark the current set as completed and start the following rest.
    pub fn complete_set(&mut self, now: NaiveDateTime) -> SessionEvent {
        let Some(exercise) = self.exercises.get_mut(self.exercise_idx) else {
            return SessionEvent::AllExercisesDone;
        };

        if exercise.done {
            return SessionEvent::AllExercisesDone;
        }

        if self.current_set < exercise.sets {
            self.current_set += 1;
            self.start_rest(now, REST_BETWEEN_SETS);
            return SessionEvent::RestBetweenSets {
                next_set: self.current_set,
            };
        }

        exercise.done = true;

        if self.exercise_idx + 1 < self.exercises.len() {
            self.exercise_idx += 1;
            self.current_set = 1;
            self.start_rest(now, REST_BETWEEN_EXERCISES);
            SessionEvent::NextExercise {
                name: self.exercises[self.exercise_idx].name.clone(),
            }
        } else {
            self.timer = TimerState::Unset;
            SessionEvent::AllExercisesDone
        }
    }

    fn start_rest(&mut self, now: NaiveDateTime, duration: TimeDelta) {
        self.timer = TimerState::Active {
            target_time: now + duration,
        };
    }

    pub fn skip_rest(&mut self) {
        self.timer = TimerState::Unset;
    }

    pub fn add_rest_time(&mut self, now: NaiveDateTime) {
        if let TimerState::Active { target_time } = self.timer {
            self.timer = TimerState::Active {
                target_time: target_time.max(now) + ADDITIONAL_REST,
            };
        }
    }

    /// Remaining rest in whole seconds, rounded up.
    #[must_use]
    pub fn rest_remaining(&self, now: NaiveDateTime) -> u32 {
        match self.timer {
            TimerState::Unset => 0,
            TimerState::Active { target_time } => {
                let millis = (target_time - now).num_milliseconds();
                u32::try_from((millis + 999) / 1000).unwrap_or_default()
            }
        }
    }

    #[must_use]
    pub fn is_resting(&self, now: NaiveDateTime) -> bool {
        self.rest_remaining(now) > 0
    }

    /// Elapsed time in seconds since the start of the session.
    #[must_use]
    pub fn elapsed(&self, now: NaiveDateTime) -> u32 {
        u32::try_from((now - self.start_time).num_seconds()).unwrap_or_default()
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        self.exercises
            .iter()
            .enumerate()
            .map(|(i, e)| {
                if e.done {
                    e.sets
                } else if i == self.exercise_idx {
                    self.current_set.saturating_sub(1).min(e.sets)
                } else {
                    0
                }
            })
            .sum()
    }

    /// Percentage of completed sets.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let num_sets = self.num_sets();
        if num_sets == 0 {
            return 0.0;
        }
        f64::from(self.completed_sets()) / f64::from(num_sets) * 100.0
    }

    /// End the session.
    ///
    /// The calories are estimated from the elapsed time and the body weight
    /// in kilograms. Without a known body weight no calories are estimated.
    #[must_use]
    pub fn finish(self, now: NaiveDateTime, body_weight: Option<f64>) -> FinishedWorkout {
        let time_spent = self.elapsed(now);
        let total_calories =
            estimate_calories(&self.exercises, time_spent, body_weight.unwrap_or_default());
        FinishedWorkout {
            workout_id: self.workout_id,
            name: self.name,
            exercises: self.exercises,
            completion: Completion {
                completed_at: now,
                time_spent,
                total_calories,
            },
        }
    }
}
