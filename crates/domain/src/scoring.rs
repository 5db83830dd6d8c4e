use std::fmt;

use crate::{Exercise, WorkoutInstance};

pub const DURATION_WEIGHT: f64 = 0.0001;
pub const EXERCISE_WEIGHT: f64 = 0.5;
pub const SET_WEIGHT: f64 = 0.2;
pub const REP_WEIGHT: f64 = 0.1;
pub const CALORIE_WEIGHT: f64 = 0.1;

/// Achievement tiers in ascending order of their thresholds.
pub static ACHIEVEMENTS: [Achievement; 10] = [
    Achievement::new(1, "Rookie", "achievements/rookie.png", 0.0),
    Achievement::new(2, "Adventurer", "achievements/adventurer.png", 20_000.0),
    Achievement::new(3, "Warrior", "achievements/warrior.png", 50_000.0),
    Achievement::new(4, "Master", "achievements/master.png", 100_000.0),
    Achievement::new(5, "Hero", "achievements/hero.png", 200_000.0),
    Achievement::new(6, "Legend", "achievements/legend.png", 500_000.0),
    Achievement::new(7, "Champion", "achievements/champion.png", 1_000_000.0),
    Achievement::new(8, "Titan", "achievements/titan.png", 2_000_000.0),
    Achievement::new(9, "Ascendant", "achievements/ascendant.png", 5_000_000.0),
    Achievement::new(10, "Supreme", "achievements/supreme.png", 10_000_000.0),
];

/// Input of the scoring formula.
///
/// Missing values count as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointsInput<'a> {
    /// Seconds
    pub time_spent: Option<u32>,
    pub exercises: &'a [Exercise],
    pub total_calories: Option<f64>,
}

impl<'a> From<&'a WorkoutInstance> for PointsInput<'a> {
    fn from(instance: &'a WorkoutInstance) -> Self {
        let completion = instance.completion();
        Self {
            time_spent: completion.map(|c| c.time_spent),
            exercises: &instance.exercises,
            total_calories: completion.map(|c| c.total_calories),
        }
    }
}

/// Points earned for a completed workout.
///
/// The result is the sum of weighted terms for duration, number of
/// exercises, sets, reps and calories. Negative calories count as zero.
#[must_use]
pub fn points(input: &PointsInput) -> f64 {
    let duration = f64::from(input.time_spent.unwrap_or_default()) * DURATION_WEIGHT;
    #[allow(clippy::cast_precision_loss)]
    let exercises = input.exercises.len() as f64 * EXERCISE_WEIGHT;
    let sets = input
        .exercises
        .iter()
        .map(|e| f64::from(e.sets) * SET_WEIGHT)
        .sum::<f64>();
    let reps = input
        .exercises
        .iter()
        .map(|e| f64::from(e.reps) * REP_WEIGHT)
        .sum::<f64>();
    let calories = input.total_calories.unwrap_or_default().max(0.0) * CALORIE_WEIGHT;

    duration + exercises + sets + reps + calories
}

#[derive(Debug, PartialEq)]
pub struct Achievement {
    pub level: u8,
    pub name: &'static str,
    pub badge_url: &'static str,
    pub threshold: f64,
}

impl Achievement {
    const fn new(level: u8, name: &'static str, badge_url: &'static str, threshold: f64) -> Self {
        Self {
            level,
            name,
            badge_url,
            threshold,
        }
    }

    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|a| a.name == name)
    }

    /// The following tier, `None` for the highest one.
    #[must_use]
    pub fn next(&self) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|a| a.level == self.level + 1)
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Highest tier whose threshold is reached by `points`.
#[must_use]
pub fn achievement_for_points(points: f64) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().rev().find(|a| points >= a.threshold)
}

/// Estimated calories burned, based on the MET value of each exercise's
/// category, the body weight in kilograms and the elapsed time.
#[must_use]
pub fn estimate_calories(exercises: &[Exercise], elapsed_seconds: u32, body_weight: f64) -> f64 {
    let hours = f64::from(elapsed_seconds) / 3600.0;
    exercises
        .iter()
        .map(|e| e.category.met() * body_weight * hours)
        .sum()
}
