use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::{Goals, InstanceState, WorkoutInstance, days_ago};

/// Overview of a user's workouts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub workouts_done: usize,
    /// Seconds
    pub total_time_spent: u32,
    pub most_recent: Option<WorkoutInstance>,
    pub next_scheduled: Option<WorkoutInstance>,
    pub calories_today: f64,
}

impl Summary {
    #[must_use]
    pub fn new(instances: &[WorkoutInstance], today: NaiveDate) -> Self {
        let completed = instances
            .iter()
            .filter_map(|i| i.completion().map(|c| (i, c)))
            .collect::<Vec<_>>();

        Self {
            workouts_done: completed.len(),
            total_time_spent: completed
                .iter()
                .map(|(_, c)| c.time_spent)
                .fold(0, u32::saturating_add),
            most_recent: completed
                .iter()
                .max_by_key(|(_, c)| c.completed_at)
                .map(|(i, _)| (*i).clone()),
            next_scheduled: instances
                .iter()
                .filter(|i| i.state == InstanceState::Scheduled)
                .filter(|i| i.scheduled_date().is_some_and(|date| date >= today))
                .min_by_key(|i| i.slot)
                .cloned(),
            calories_today: completed
                .iter()
                .filter(|(_, c)| c.completed_at.date() == today)
                .map(|(_, c)| c.total_calories)
                .sum(),
        }
    }

    /// Percentage of the daily calories goal burned today, capped at 100.
    ///
    /// Without a goal the progress is 0.
    #[must_use]
    pub fn calories_progress(&self, goals: &Goals) -> f64 {
        match goals.calories_goal {
            Some(goal) if goal > 0 => {
                (self.calories_today.max(0.0) / f64::from(goal) * 100.0).min(100.0)
            }
            _ => 0.0,
        }
    }
}

/// Time spent on workouts on each day of the week containing `today`.
#[must_use]
pub fn weekly_activity(
    instances: &[WorkoutInstance],
    today: NaiveDate,
    first_weekday: Weekday,
) -> [(NaiveDate, u32); 7] {
    let offset = (today.weekday().num_days_from_monday() + 7
        - first_weekday.num_days_from_monday())
        % 7;
    let first_day = days_ago(today, u64::from(offset));
    let mut days = [(first_day, 0); 7];

    for (i, (date, time_spent)) in days.iter_mut().enumerate() {
        *date = first_day + TimeDelta::days(i64::try_from(i).unwrap_or_default());
        *time_spent = instances
            .iter()
            .filter_map(WorkoutInstance::completion)
            .filter(|c| c.completed_at.date() == *date)
            .map(|c| c.time_spent)
            .fold(0, u32::saturating_add);
    }

    days
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Completion, FinishedWorkout, Name, Slot, Workout, WorkoutInstanceID};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn completed(id: u128, day: u32, hour: u32, time_spent: u32, total_calories: f64) -> WorkoutInstance {
        WorkoutInstance {
            id: id.into(),
            ..WorkoutInstance::completed(FinishedWorkout {
                workout_id: None,
                name: Name::new("Workout").unwrap(),
                exercises: vec![],
                completion: Completion {
                    completed_at: date(day).and_hms_opt(hour, 0, 0).unwrap(),
                    time_spent,
                    total_calories,
                },
            })
        }
    }

    fn scheduled(id: u128, day: u32, hour: u32) -> WorkoutInstance {
        WorkoutInstance {
            id: id.into(),
            ..WorkoutInstance::scheduled(
                &Workout {
                    id: 1.into(),
                    name: Name::new("Workout").unwrap(),
                    exercises: vec![],
                },
                Slot {
                    date: date(day),
                    time: NaiveTime::from_hms_opt(hour, 0, 0),
                },
            )
        }
    }

    #[test]
    fn test_summary() {
        let instances = [
            completed(1, 8, 10, 1800, 200.0),
            completed(2, 10, 7, 600, 50.5),
            completed(3, 10, 19, 1200, 100.0),
            completed(4, 9, 10, 900, 80.0),
            scheduled(5, 9, 18),
            scheduled(6, 13, 18),
            scheduled(7, 11, 18),
            scheduled(8, 11, 6),
            scheduled(9, 12, 6).miss().unwrap(),
        ];
        let summary = Summary::new(&instances, date(10));
        assert_eq!(summary.workouts_done, 4);
        assert_eq!(summary.total_time_spent, 4500);
        assert_eq!(
            summary.most_recent.map(|i| i.id),
            Some(WorkoutInstanceID::from(3))
        );
        assert_eq!(
            summary.next_scheduled.map(|i| i.id),
            Some(WorkoutInstanceID::from(8))
        );
        assert_approx_eq!(summary.calories_today, 150.5);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::new(&[], date(10)), Summary::default());
    }

    #[test]
    fn test_weekly_activity() {
        let instances = [
            completed(1, 5, 10, 1800, 0.0),
            completed(2, 6, 10, 600, 0.0),
            completed(3, 8, 10, 300, 0.0),
            completed(4, 8, 18, 200, 0.0),
            completed(5, 12, 10, 900, 0.0),
            scheduled(6, 9, 10),
        ];
        // 2024-05-08 is a Wednesday
        assert_eq!(
            weekly_activity(&instances, date(8), Weekday::Sun),
            [
                (date(5), 1800),
                (date(6), 600),
                (date(7), 0),
                (date(8), 500),
                (date(9), 0),
                (date(10), 0),
                (date(11), 0),
            ]
        );
        assert_eq!(
            weekly_activity(&instances, date(8), Weekday::Mon)[0],
            (date(6), 600)
        );
        assert_eq!(
            weekly_activity(&instances, date(12), Weekday::Sun)[0],
            (date(12), 900)
        );
    }

    #[rstest]
    #[case(None, 250.0, 0.0)]
    #[case(Some(0), 250.0, 0.0)]
    #[case(Some(500), 0.0, 0.0)]
    #[case(Some(500), 250.0, 50.0)]
    #[case(Some(500), 500.0, 100.0)]
    #[case(Some(500), 800.0, 100.0)]
    fn test_calories_progress(
        #[case] calories_goal: Option<u32>,
        #[case] calories_today: f64,
        #[case] expected: f64,
    ) {
        let summary = Summary {
            calories_today,
            ..Summary::default()
        };
        let goals = Goals {
            calories_goal,
            ..Goals::default()
        };
        assert_approx_eq!(summary.calories_progress(&goals), expected);
    }
}
