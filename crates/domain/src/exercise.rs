use std::{collections::BTreeSet, fmt, slice::Iter};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub primary_muscles: BTreeSet<Muscle>,
    pub secondary_muscles: BTreeSet<Muscle>,
    pub equipment: Option<String>,
    pub category: Category,
    pub sets: u32,
    pub reps: u32,
    pub done: bool,
    pub video_url: Option<String>,
    pub images: Vec<String>,
}

impl Exercise {
    #[must_use]
    pub fn new(name: &str, category: Category, primary_muscles: &[Muscle]) -> Self {
        Self {
            name: name.trim().to_string(),
            primary_muscles: primary_muscles.iter().copied().collect(),
            secondary_muscles: BTreeSet::new(),
            equipment: None,
            category,
            sets: 0,
            reps: 0,
            done: false,
            video_url: None,
            images: vec![],
        }
    }

    #[must_use]
    pub fn works(&self, muscle: Muscle) -> bool {
        self.primary_muscles.contains(&muscle) || self.secondary_muscles.contains(&muscle)
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Muscle {
    Abdominals,
    Abductors,
    Adductors,
    Biceps,
    Calves,
    Chest,
    Forearms,
    Glutes,
    Hamstrings,
    Lats,
    LowerBack,
    MiddleBack,
    Neck,
    Quadriceps,
    Shoulders,
    Traps,
    Triceps,
}

impl Property for Muscle {
    fn iter() -> Iter<'static, Muscle> {
        static MUSCLES: [Muscle; 17] = [
            Muscle::Abdominals,
            Muscle::Abductors,
            Muscle::Adductors,
            Muscle::Biceps,
            Muscle::Calves,
            Muscle::Chest,
            Muscle::Forearms,
            Muscle::Glutes,
            Muscle::Hamstrings,
            Muscle::Lats,
            Muscle::LowerBack,
            Muscle::MiddleBack,
            Muscle::Neck,
            Muscle::Quadriceps,
            Muscle::Shoulders,
            Muscle::Traps,
            Muscle::Triceps,
        ];
        MUSCLES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Muscle::Abdominals => "abdominals",
            Muscle::Abductors => "abductors",
            Muscle::Adductors => "adductors",
            Muscle::Biceps => "biceps",
            Muscle::Calves => "calves",
            Muscle::Chest => "chest",
            Muscle::Forearms => "forearms",
            Muscle::Glutes => "glutes",
            Muscle::Hamstrings => "hamstrings",
            Muscle::Lats => "lats",
            Muscle::LowerBack => "lower back",
            Muscle::MiddleBack => "middle back",
            Muscle::Neck => "neck",
            Muscle::Quadriceps => "quadriceps",
            Muscle::Shoulders => "shoulders",
            Muscle::Traps => "traps",
            Muscle::Triceps => "triceps",
        }
    }
}

impl TryFrom<&str> for Muscle {
    type Error = MuscleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_lowercase().replace(['_', '-'], " ");
        Muscle::iter()
            .find(|m| m.name() == value)
            .copied()
            .ok_or(MuscleError::Unknown(value))
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleError {
    #[error("Unknown muscle: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Strength,
    Stretching,
    Plyometrics,
    Strongman,
    Powerlifting,
    Cardio,
    OlympicWeightlifting,
}

impl Category {
    /// Metabolic equivalent of task, used to estimate burned calories.
    #[must_use]
    pub fn met(self) -> f64 {
        match self {
            Category::Strength => 5.0,
            Category::Stretching => 2.3,
            Category::Plyometrics => 8.0,
            Category::Strongman | Category::Powerlifting | Category::OlympicWeightlifting => 6.0,
            Category::Cardio => 7.0,
        }
    }
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORY: [Category; 7] = [
            Category::Strength,
            Category::Stretching,
            Category::Plyometrics,
            Category::Strongman,
            Category::Powerlifting,
            Category::Cardio,
            Category::OlympicWeightlifting,
        ];
        CATEGORY.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Stretching => "stretching",
            Category::Plyometrics => "plyometrics",
            Category::Strongman => "strongman",
            Category::Powerlifting => "powerlifting",
            Category::Cardio => "cardio",
            Category::OlympicWeightlifting => "olympic weightlifting",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = CategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_lowercase();
        Category::iter()
            .find(|c| c.name() == value)
            .copied()
            .ok_or(CategoryError::Unknown(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("Unknown category: {0}")]
    Unknown(String),
}

/// Filter for browsing the exercise library.
#[derive(Debug, Default, PartialEq)]
pub struct ExerciseFilter {
    pub name: String,
    pub muscles: BTreeSet<Muscle>,
    pub categories: BTreeSet<Category>,
    pub equipment: BTreeSet<String>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        let name = self.name.trim().to_lowercase();
        exercises
            .filter(|e| {
                e.name.to_lowercase().contains(&name)
                    && self.muscles.iter().all(|m| e.works(*m))
                    && (self.categories.is_empty() || self.categories.contains(&e.category))
                    && (self.equipment.is_empty()
                        || e.equipment
                            .as_ref()
                            .is_some_and(|eq| self.equipment.contains(eq)))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.muscles.is_empty()
            && self.categories.is_empty()
            && self.equipment.is_empty()
    }

    pub fn toggle_muscle(&mut self, muscle: Muscle) {
        if !self.muscles.remove(&muscle) {
            self.muscles.insert(muscle);
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }
}
