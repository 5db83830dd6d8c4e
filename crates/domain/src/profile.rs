use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use derive_more::Deref;
use uuid::Uuid;

use crate::{ReadError, UpdateError, ValidationError};

pub const POUNDS_PER_KILOGRAM: f32 = 2.20462;
pub const INCHES_PER_CENTIMETER: f32 = 0.393_701;

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self, user_id: UserID) -> Result<UserProfile, ReadError>;
    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError>;
    async fn get_body_weight_history(&self, user_id: UserID)
    -> Result<Vec<BodyWeight>, ReadError>;
    /// Set a new current weight and keep the previous one in the history.
    async fn change_body_weight(
        &self,
        user_id: UserID,
        weight: f32,
    ) -> Result<UserProfile, UpdateError>;

    fn validate_weight(&self, weight: &str, unit_system: UnitSystem) -> Result<f32, ValidationError> {
        match weight.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_weight) => {
                if parsed_weight > 0.0 {
                    Ok(unit_system.weight_to_kg(parsed_weight))
                } else {
                    Err(ValidationError::Other(
                        "Weight must be a positive decimal number".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Weight must be a decimal number".into(),
            )),
        }
    }

    fn validate_date_of_birth(
        &self,
        date: &str,
        today: NaiveDate,
    ) -> Result<NaiveDate, ValidationError> {
        match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
            Ok(parsed_date) => {
                if parsed_date <= today {
                    Ok(parsed_date)
                } else {
                    Err(ValidationError::Other(
                        "Date must not be in the future".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other("Invalid date".into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self, user_id: UserID) -> Result<UserProfile, ReadError>;
    /// Replace all fields except the points, which only change through the
    /// points store.
    async fn replace_profile(&self, profile: UserProfile) -> Result<UserProfile, UpdateError>;
    async fn read_body_weight_history(
        &self,
        user_id: UserID,
    ) -> Result<Vec<BodyWeight>, ReadError>;
    async fn append_body_weight(
        &self,
        user_id: UserID,
        body_weight: BodyWeight,
    ) -> Result<BodyWeight, UpdateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserID,
    /// Kilograms
    pub weight: Option<f32>,
    /// Centimeters
    pub height: Option<f32>,
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub goals: Goals,
    pub points: f64,
    pub unit_system: UnitSystem,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: UserID) -> Self {
        Self {
            id,
            weight: None,
            height: None,
            date_of_birth: None,
            sex: None,
            goals: Goals::default(),
            points: 0.0,
            unit_system: UnitSystem::default(),
        }
    }

    #[must_use]
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.date_of_birth?)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Goals {
    pub step_goal: Option<u32>,
    pub calories_goal: Option<u32>,
    /// Kilograms
    pub weight_goal: Option<f32>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        match value {
            "female" => Sex::Female,
            _ => Sex::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Sex::Female => "female",
                Sex::Male => "male",
            }
        )
    }
}

/// Units in which weights and heights are displayed and entered.
///
/// Values are always stored in metric units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    #[must_use]
    pub fn format_weight(self, kg: f32) -> String {
        match self {
            UnitSystem::Metric => format!("{kg:.1} kg"),
            UnitSystem::Imperial => format!("{:.0} lbs", (kg * POUNDS_PER_KILOGRAM).round()),
        }
    }

    #[must_use]
    pub fn format_height(self, cm: f32) -> String {
        match self {
            UnitSystem::Metric => format!("{cm:.0} cm"),
            UnitSystem::Imperial => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let inches = (cm * INCHES_PER_CENTIMETER).round().max(0.0) as u32;
                format!("{}' {}\"", inches / 12, inches % 12)
            }
        }
    }

    #[must_use]
    pub fn weight_to_kg(self, value: f32) -> f32 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => value / POUNDS_PER_KILOGRAM,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                UnitSystem::Metric => "metric",
                UnitSystem::Imperial => "imperial",
            }
        )
    }
}

impl From<bool> for UnitSystem {
    /// Convert an `is_metric` flag.
    fn from(is_metric: bool) -> Self {
        if is_metric {
            UnitSystem::Metric
        } else {
            UnitSystem::Imperial
        }
    }
}

/// A previous weight of the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyWeight {
    pub date: NaiveDate,
    pub weight: f32,
}

/// Difference between the current weight and the latest recorded weight of
/// the previous calendar month.
#[must_use]
pub fn weight_change_since_last_month(
    history: &[BodyWeight],
    current: f32,
    today: NaiveDate,
) -> Option<f32> {
    let last_month = today.checked_sub_months(Months::new(1))?;
    history
        .iter()
        .filter(|bw| bw.date.year() == last_month.year() && bw.date.month() == last_month.month())
        .max_by_key(|bw| bw.date)
        .map(|bw| current - bw.weight)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    struct Dummy;

    impl ProfileService for Dummy {
        async fn get_profile(&self, _: UserID) -> Result<UserProfile, ReadError> {
            unimplemented!()
        }
        async fn replace_profile(&self, _: UserProfile) -> Result<UserProfile, UpdateError> {
            unimplemented!()
        }
        async fn get_body_weight_history(&self, _: UserID) -> Result<Vec<BodyWeight>, ReadError> {
            unimplemented!()
        }
        async fn change_body_weight(&self, _: UserID, _: f32) -> Result<UserProfile, UpdateError> {
            unimplemented!()
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_user_id_nil() {
        assert!(UserID::nil().is_nil());
        assert_eq!(UserID::nil(), UserID::default());
        assert!(!UserID::from(7).is_nil());
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(date(1990, 5, 2)), Some(34))]
    #[case(Some(date(1990, 5, 3)), Some(33))]
    #[case(Some(date(2024, 6, 1)), None)]
    fn test_user_profile_age(#[case] date_of_birth: Option<NaiveDate>, #[case] expected: Option<u32>) {
        let profile = UserProfile {
            date_of_birth,
            ..UserProfile::new(1.into())
        };
        assert_eq!(profile.age(date(2024, 5, 2)), expected);
    }

    #[rstest]
    #[case(UnitSystem::Metric, 80.0, "80.0 kg")]
    #[case(UnitSystem::Imperial, 80.0, "176 lbs")]
    #[case(UnitSystem::Imperial, 70.5, "155 lbs")]
    fn test_unit_system_format_weight(
        #[case] unit_system: UnitSystem,
        #[case] kg: f32,
        #[case] expected: &str,
    ) {
        assert_eq!(unit_system.format_weight(kg), expected);
    }

    #[rstest]
    #[case(UnitSystem::Metric, 180.0, "180 cm")]
    #[case(UnitSystem::Imperial, 180.0, "5' 11\"")]
    fn test_unit_system_format_height(
        #[case] unit_system: UnitSystem,
        #[case] cm: f32,
        #[case] expected: &str,
    ) {
        assert_eq!(unit_system.format_height(cm), expected);
    }

    #[test]
    fn test_unit_system_from_is_metric() {
        assert_eq!(UnitSystem::from(true), UnitSystem::Metric);
        assert_eq!(UnitSystem::from(false), UnitSystem::Imperial);
    }

    #[rstest]
    #[case("72,5", UnitSystem::Metric, Ok(72.5))]
    #[case("220.462", UnitSystem::Imperial, Ok(100.0))]
    #[case("0", UnitSystem::Metric, Err("Weight must be a positive decimal number"))]
    #[case("heavy", UnitSystem::Metric, Err("Weight must be a decimal number"))]
    fn test_validate_weight(
        #[case] weight: &str,
        #[case] unit_system: UnitSystem,
        #[case] expected: Result<f32, &str>,
    ) {
        match (Dummy.validate_weight(weight, unit_system), expected) {
            (Ok(value), Ok(expected)) => assert_approx_eq!(value, expected, 0.001),
            (Err(err), Err(expected)) => assert_eq!(err.to_string(), expected),
            (result, expected) => panic!("{result:?} != {expected:?}"),
        }
    }

    #[rstest]
    #[case("1990-05-02", Ok(date(1990, 5, 2)))]
    #[case("2030-01-01", Err("Date must not be in the future"))]
    #[case("02.05.1990", Err("Invalid date"))]
    fn test_validate_date_of_birth(#[case] value: &str, #[case] expected: Result<NaiveDate, &str>) {
        assert_eq!(
            Dummy
                .validate_date_of_birth(value, date(2024, 5, 2))
                .map_err(|err| err.to_string()),
            expected.map_err(str::to_string)
        );
    }

    #[rstest]
    #[case(&[], date(2024, 5, 2), None)]
    #[case(
        &[
            BodyWeight { date: date(2024, 4, 3), weight: 82.0 },
            BodyWeight { date: date(2024, 4, 20), weight: 81.0 },
            BodyWeight { date: date(2024, 5, 1), weight: 79.0 },
        ],
        date(2024, 5, 2),
        Some(-1.0)
    )]
    #[case(
        &[BodyWeight { date: date(2023, 12, 28), weight: 78.0 }],
        date(2024, 1, 15),
        Some(2.0)
    )]
    #[case(
        &[BodyWeight { date: date(2023, 4, 28), weight: 78.0 }],
        date(2024, 5, 15),
        None
    )]
    fn test_weight_change_since_last_month(
        #[case] history: &[BodyWeight],
        #[case] today: NaiveDate,
        #[case] expected: Option<f32>,
    ) {
        assert_eq!(weight_change_since_last_month(history, 80.0, today), expected);
    }
}
