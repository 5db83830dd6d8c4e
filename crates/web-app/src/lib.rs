#![warn(clippy::pedantic)]

pub mod log;
mod ongoing_workout;
mod service;
pub mod service_worker;
mod settings;

pub use ongoing_workout::{
    ExerciseSets, OngoingWorkout, OngoingWorkoutRepository, OngoingWorkoutService, TimerState,
};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, Theme};
