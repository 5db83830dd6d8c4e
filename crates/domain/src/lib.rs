#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod dashboard;
mod error;
mod exercise;
mod name;
mod points;
mod profile;
mod recovery;
mod schedule;
mod scoring;
mod service;
mod time;
mod workout;
mod workout_instance;
mod workout_session;

pub use dashboard::{Summary, weekly_activity};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use exercise::{Category, CategoryError, Exercise, ExerciseFilter, Muscle, MuscleError, Property};
pub use name::{Name, NameError};
pub use points::{
    PointsService, ProfilePointsRepository, UnlockedAchievement, WorkoutOutcome,
};
pub use profile::{
    BodyWeight, Goals, ProfileRepository, ProfileService, Sex, UnitSystem, UserID, UserProfile,
    weight_change_since_last_month,
};
pub use recovery::{
    HEALED_DAYS, HEALING_DAYS, LOOKBACK_DAYS, MuscleRecovery, MusclesWorked, RecoveryState,
    aggregate,
};
pub use schedule::{
    Agenda, CalendarMonth, DayView, MonthGrid, Reminder, has_conflict, month_grid, reconcile,
    upcoming_reminders,
};
pub use scoring::{
    ACHIEVEMENTS, Achievement, PointsInput, achievement_for_points, estimate_calories, points,
};
pub use service::Service;
pub use time::{
    Clock, FixedClock, SystemClock, days_ago, days_ago_label, days_between, end_of_day,
    format_clock, format_duration, in_days_label, is_same_day, start_of_day,
};
pub use workout::{Workout, WorkoutID, WorkoutRepository, WorkoutService};
pub use workout_instance::{
    Completion, FinishedWorkout, InstanceState, REMINDER_LEAD_TIME, Slot, Status,
    TransitionError, WorkoutInstance, WorkoutInstanceID, WorkoutInstanceRepository,
    WorkoutInstanceService,
};
pub use workout_session::{
    ADDITIONAL_REST, REST_BETWEEN_EXERCISES, REST_BETWEEN_SETS, SessionEvent, TimerState,
    WorkoutSession,
};
