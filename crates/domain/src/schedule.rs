use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Weekday};
use derive_more::Deref;

use crate::{InstanceState, Name, WorkoutInstance, WorkoutInstanceID};

pub const GRID_ROWS: usize = 6;
pub const GRID_COLUMNS: usize = 7;

pub type MonthGrid = [[Option<NaiveDate>; GRID_COLUMNS]; GRID_ROWS];

/// Workout instances of a single calendar day.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DayView {
    pub scheduled: Vec<WorkoutInstance>,
    pub completed: Vec<WorkoutInstance>,
    pub missed: Vec<WorkoutInstance>,
}

impl DayView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty() && self.completed.is_empty() && self.missed.is_empty()
    }

    pub fn instances(&self) -> impl Iterator<Item = &WorkoutInstance> {
        self.scheduled
            .iter()
            .chain(self.completed.iter())
            .chain(self.missed.iter())
    }
}

#[derive(Deref, Debug, Default, Clone, PartialEq)]
pub struct Agenda(BTreeMap<NaiveDate, DayView>);

impl Agenda {
    /// Reconcile all instances of a user, separated by their stored status.
    #[must_use]
    pub fn new(instances: &[WorkoutInstance], today: NaiveDate) -> Self {
        let (completed, scheduled): (Vec<_>, Vec<_>) = instances
            .iter()
            .cloned()
            .partition(|i| matches!(i.state, InstanceState::Completed(_)));
        reconcile(&scheduled, &completed, today)
    }

    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayView> {
        self.0.get(&date)
    }

    /// Whether a workout is already scheduled on `date`.
    #[must_use]
    pub fn has_conflict(&self, date: NaiveDate) -> bool {
        self.0.get(&date).is_some_and(|day| !day.scheduled.is_empty())
    }

    #[must_use]
    pub fn has_completed(&self, date: NaiveDate) -> bool {
        self.0.get(&date).is_some_and(|day| !day.completed.is_empty())
    }

    #[must_use]
    pub fn has_missed(&self, date: NaiveDate) -> bool {
        self.0.get(&date).is_some_and(|day| !day.missed.is_empty())
    }

    pub fn missed(&self) -> impl Iterator<Item = &WorkoutInstance> {
        self.0.values().flat_map(|day| day.missed.iter())
    }
}

/// Group scheduled and completed instances by calendar day.
///
/// Scheduled instances are grouped by their scheduled date, completed ones by
/// the date of completion. A scheduled instance whose day lies before `today`
/// is reported as missed, unless a completed instance of the same workout
/// exists on that day. Stored instances are not changed.
#[must_use]
pub fn reconcile(
    scheduled: &[WorkoutInstance],
    completed: &[WorkoutInstance],
    today: NaiveDate,
) -> Agenda {
    let mut days: BTreeMap<NaiveDate, DayView> = BTreeMap::new();

    for instance in completed {
        if let Some(date) = instance.date() {
            days.entry(date).or_default().completed.push(instance.clone());
        }
    }

    for instance in scheduled {
        let Some(date) = instance.date() else {
            continue;
        };
        let day = days.entry(date).or_default();
        match instance.state {
            InstanceState::Completed(_) => day.completed.push(instance.clone()),
            InstanceState::Missed => day.missed.push(instance.clone()),
            InstanceState::Scheduled => {
                let done = completed.iter().any(|c| {
                    c.completed_at().is_some_and(|at| at.date() == date) && c.is_same_workout(instance)
                });
                if date < today && !done {
                    day.missed.push(instance.clone());
                } else {
                    day.scheduled.push(instance.clone());
                }
            }
        }
    }

    Agenda(days)
}

/// Whether a workout is already scheduled on `date`.
#[must_use]
pub fn has_conflict(instances: &[WorkoutInstance], date: NaiveDate) -> bool {
    instances
        .iter()
        .any(|i| i.state == InstanceState::Scheduled && i.scheduled_date() == Some(date))
}

/// Calendar grid of a month, with days outside of the month left empty.
///
/// Returns `None` for an invalid year or month.
#[must_use]
pub fn month_grid(year: i32, month: u32, first_weekday: Weekday) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (first.weekday().num_days_from_monday() + 7
        - first_weekday.num_days_from_monday())
        % 7;
    let mut grid: MonthGrid = [[None; GRID_COLUMNS]; GRID_ROWS];

    for (i, date) in first
        .iter_days()
        .take_while(|d| d.month() == month)
        .enumerate()
    {
        let cell = i + offset as usize;
        grid[cell / GRID_COLUMNS][cell % GRID_COLUMNS] = Some(date);
    }

    Some(grid)
}

/// Month displayed in the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth(NaiveDate);

impl CalendarMonth {
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.0.format("%B").to_string()
    }

    #[must_use]
    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }

    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// Months before the current one are not shown, as workouts cannot be
    /// scheduled in the past.
    #[must_use]
    pub fn can_go_back(&self, today: NaiveDate) -> bool {
        self.pred().is_some_and(|pred| pred >= Self::of(today))
    }

    #[must_use]
    pub fn grid(&self, first_weekday: Weekday) -> MonthGrid {
        month_grid(self.year(), self.month(), first_weekday).unwrap_or([[None; GRID_COLUMNS]; GRID_ROWS])
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub instance_id: WorkoutInstanceID,
    pub name: Name,
    pub at: NaiveDateTime,
}

/// Reminders for all scheduled workouts that have not started yet, ordered by
/// time.
///
/// A reminder that is already due, because the workout starts in less than
/// the lead time, is due immediately.
#[must_use]
pub fn upcoming_reminders(instances: &[WorkoutInstance], now: NaiveDateTime) -> Vec<Reminder> {
    let mut reminders = instances
        .iter()
        .filter(|i| i.state == InstanceState::Scheduled)
        .filter_map(|i| {
            let slot = i.slot?;
            let reminder_at = slot.reminder_at()?;
            (slot.date_time() > now).then(|| Reminder {
                instance_id: i.id,
                name: i.name.clone(),
                at: reminder_at.max(now),
            })
        })
        .collect::<Vec<_>>();
    reminders.sort_by_key(|r| r.at);
    reminders
}
