use std::{collections::BTreeMap, fmt};

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Deref;

use crate::{Muscle, WorkoutInstance, days_ago, days_between};

/// Number of calendar days before the reference day that are considered.
pub const LOOKBACK_DAYS: u64 = 7;
pub const HEALING_DAYS: f64 = 1.5;
pub const HEALED_DAYS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuscleRecovery {
    pub last_worked: NaiveDateTime,
    pub count: u32,
}

/// Muscles trained by completed workouts within the lookback window.
///
/// Muscles without any qualifying workout are not contained.
#[derive(Deref, Debug, Default, Clone, PartialEq, Eq)]
pub struct MusclesWorked(BTreeMap<Muscle, MuscleRecovery>);

/// Aggregate the primary muscles of all workouts completed between the start
/// of the day [`LOOKBACK_DAYS`] before `as_of` and the end of `as_of`.
#[must_use]
pub fn aggregate(instances: &[WorkoutInstance], as_of: NaiveDate) -> MusclesWorked {
    let first_day = days_ago(as_of, LOOKBACK_DAYS);
    let mut muscles: BTreeMap<Muscle, MuscleRecovery> = BTreeMap::new();

    for instance in instances {
        let Some(completed_at) = instance.completed_at() else {
            continue;
        };
        if !(first_day..=as_of).contains(&completed_at.date()) {
            continue;
        }
        for muscle in instance.exercises.iter().flat_map(|e| &e.primary_muscles) {
            muscles
                .entry(*muscle)
                .and_modify(|recovery| {
                    recovery.count += 1;
                    recovery.last_worked = recovery.last_worked.max(completed_at);
                })
                .or_insert(MuscleRecovery {
                    last_worked: completed_at,
                    count: 1,
                });
        }
    }

    MusclesWorked(muscles)
}

impl MusclesWorked {
    #[must_use]
    pub fn is_muscle_worked(&self, muscle: Muscle) -> bool {
        self.0.contains_key(&muscle)
    }

    #[must_use]
    pub fn is_muscle_healing(&self, muscle: Muscle, now: NaiveDateTime) -> bool {
        self.state(muscle, now) == RecoveryState::Healing
    }

    #[must_use]
    pub fn is_muscle_healed(&self, muscle: Muscle, now: NaiveDateTime) -> bool {
        self.state(muscle, now) == RecoveryState::Healed
    }

    #[must_use]
    pub fn days_since(&self, muscle: Muscle, now: NaiveDateTime) -> Option<f64> {
        self.0
            .get(&muscle)
            .map(|recovery| days_between(recovery.last_worked, now))
    }

    #[must_use]
    pub fn state(&self, muscle: Muscle, now: NaiveDateTime) -> RecoveryState {
        self.days_since(muscle, now)
            .map_or(RecoveryState::NotWorkedRecently, RecoveryState::from_days_since)
    }

    /// Remaining days until the muscle is healed, `None` if it is healed or
    /// was not worked recently.
    #[must_use]
    pub fn days_to_heal(&self, muscle: Muscle, now: NaiveDateTime) -> Option<f64> {
        let days_since = self.days_since(muscle, now)?;
        if days_since >= HEALED_DAYS {
            None
        } else {
            Some((HEALED_DAYS - days_since).max(0.0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecoveryState {
    WorkedRecently,
    Healing,
    Healed,
    NotWorkedRecently,
}

impl RecoveryState {
    #[must_use]
    pub fn from_days_since(days_since: f64) -> Self {
        if days_since >= HEALED_DAYS {
            RecoveryState::Healed
        } else if days_since >= HEALING_DAYS {
            RecoveryState::Healing
        } else {
            RecoveryState::WorkedRecently
        }
    }
}

impl fmt::Display for RecoveryState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecoveryState::WorkedRecently => "Worked Recently",
                RecoveryState::Healing => "Healing",
                RecoveryState::Healed => "Healed",
                RecoveryState::NotWorkedRecently => "Not Worked Recently",
            }
        )
    }
}
