use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fitme_domain as domain;

pub static USER_ID: std::sync::LazyLock<domain::UserID> =
    std::sync::LazyLock::new(|| domain::UserID::from(1));

pub static USER_ID_2: std::sync::LazyLock<domain::UserID> =
    std::sync::LazyLock::new(|| domain::UserID::from(2));

pub static PROFILE: std::sync::LazyLock<domain::UserProfile> =
    std::sync::LazyLock::new(|| domain::UserProfile {
        weight: Some(80.0),
        height: Some(180.0),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
        sex: Some(domain::Sex::Female),
        goals: domain::Goals {
            step_goal: Some(10000),
            calories_goal: Some(500),
            weight_goal: Some(75.0),
        },
        points: 120.5,
        unit_system: domain::UnitSystem::Imperial,
        ..domain::UserProfile::new(*USER_ID)
    });

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        secondary_muscles: [domain::Muscle::Shoulders, domain::Muscle::Triceps].into(),
        equipment: Some("barbell".to_string()),
        sets: 3,
        reps: 10,
        video_url: Some("https://example.org/bench-press.mp4".to_string()),
        images: vec!["bench-press/0.jpg".to_string(), "bench-press/1.jpg".to_string()],
        ..domain::Exercise::new(
            "Barbell Bench Press",
            domain::Category::Strength,
            &[domain::Muscle::Chest],
        )
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        sets: 2,
        reps: 8,
        ..domain::Exercise::new(
            "Romanian Deadlift",
            domain::Category::Powerlifting,
            &[domain::Muscle::Hamstrings, domain::Muscle::LowerBack],
        )
    });

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: 1.into(),
        name: domain::Name::new("Chest Day").unwrap(),
        exercises: vec![EXERCISE.clone(), EXERCISE_2.clone()],
    });

pub static COMPLETION: std::sync::LazyLock<domain::Completion> =
    std::sync::LazyLock::new(|| domain::Completion {
        completed_at: at(2, 18, 45),
        time_spent: 2700,
        total_calories: 250.0,
    });

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn scheduled(day: u32) -> domain::WorkoutInstance {
    domain::WorkoutInstance::scheduled(
        &WORKOUT,
        domain::Slot {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0),
        },
    )
}

pub fn completed() -> domain::WorkoutInstance {
    domain::WorkoutInstance::completed(domain::FinishedWorkout {
        workout_id: Some(WORKOUT.id),
        name: WORKOUT.name.clone(),
        exercises: WORKOUT.exercises.clone(),
        completion: *COMPLETION,
    })
}
