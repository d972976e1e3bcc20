//! Fight Camp Training Plan
//!
//! The plan for any date is a fixed function of its weekday:
//! - Mon: bag work + weigh-in
//! - Tue: cardio
//! - Wed: strength + weigh-in
//! - Thu: sparring
//! - Fri: technical bag work + weigh-in
//! - Sat: light cardio
//! - Sun: weigh-in + rest
//!
//! Logged history never feeds back into the plan. Completion marks live only
//! in the in-memory `PlanSession` and are dropped whenever the plan is
//! regenerated.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::WorkoutType;

pub const WEEKLY_PLAN_DAYS: u32 = 14;
pub const MONTH_GRID_CELLS: usize = 42;

// ---------------------------------------------------------------------------
/// Activity Kind: what a planned slot asks for
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Bagwork,
    Cardio,
    Strength,
    Sparring,
    /// Morning weigh-in
    Weight,
    Rest,
}

impl ActivityKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bagwork => "🥊",
            Self::Cardio => "🏃",
            Self::Strength => "💪",
            Self::Sparring => "🥋",
            Self::Weight => "⚖️",
            Self::Rest => "😴",
        }
    }

    /// Workout type to pre-select when logging this slot. Weigh-ins and rest are not workouts.
    pub fn loggable_type(&self) -> Option<WorkoutType> {
        match self {
            Self::Bagwork => Some(WorkoutType::Bagwork),
            Self::Cardio => Some(WorkoutType::Cardio),
            Self::Strength => Some(WorkoutType::Strength),
            Self::Sparring => Some(WorkoutType::Sparring),
            Self::Weight | Self::Rest => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub name: String,
    pub details: String,
    pub completed: bool,
}

/// Wording of the generated entries: full sentences for the two-week list,
/// abbreviations for the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStyle {
    Detailed,
    Compact,
}

// ---------------------------------------------------------------------------
/// Weekday Table
// ---------------------------------------------------------------------------

struct Slot {
    kind: ActivityKind,
    detailed: (&'static str, &'static str),
    compact: (&'static str, &'static str),
}

const WEIGH_IN: Slot = Slot {
    kind: ActivityKind::Weight,
    detailed: ("Weight Check", "Morning weigh-in"),
    compact: ("Weigh-in", ""),
};

static MONDAY: [Slot; 2] = [
    Slot {
        kind: ActivityKind::Bagwork,
        detailed: ("Heavy Bag", "6 rounds × 3 min"),
        compact: ("Heavy Bag", "6×3min"),
    },
    WEIGH_IN,
];

static TUESDAY: [Slot; 1] = [Slot {
    kind: ActivityKind::Cardio,
    detailed: ("Cardio", "5 mile run"),
    compact: ("Cardio", "5mi run"),
}];

static WEDNESDAY: [Slot; 2] = [
    Slot {
        kind: ActivityKind::Strength,
        detailed: ("Strength Training", "3×10 compound movements"),
        compact: ("Strength", "3×10"),
    },
    WEIGH_IN,
];

static THURSDAY: [Slot; 1] = [Slot {
    kind: ActivityKind::Sparring,
    detailed: ("Sparring", "8 rounds × 3 min"),
    compact: ("Sparring", "8×3min"),
}];

static FRIDAY: [Slot; 2] = [
    Slot {
        kind: ActivityKind::Bagwork,
        detailed: ("Technical Bag Work", "5 rounds × 3 min"),
        compact: ("Tech Bag", "5×3min"),
    },
    WEIGH_IN,
];

static SATURDAY: [Slot; 1] = [Slot {
    kind: ActivityKind::Cardio,
    detailed: ("Active Recovery", "3 mile easy run"),
    compact: ("Recovery", "3mi easy"),
}];

static SUNDAY: [Slot; 2] = [
    WEIGH_IN,
    Slot {
        kind: ActivityKind::Rest,
        detailed: ("Rest Day", "Recovery and meal prep"),
        compact: ("Rest", "Recovery"),
    },
];

fn slots(weekday: Weekday) -> &'static [Slot] {
    match weekday {
        Weekday::Mon => &MONDAY,
        Weekday::Tue => &TUESDAY,
        Weekday::Wed => &WEDNESDAY,
        Weekday::Thu => &THURSDAY,
        Weekday::Fri => &FRIDAY,
        Weekday::Sat => &SATURDAY,
        Weekday::Sun => &SUNDAY,
    }
}

/// Fresh, uncompleted activities for a weekday
pub fn activities_for(weekday: Weekday, style: PlanStyle) -> Vec<PlannedActivity> {
    slots(weekday)
        .iter()
        .map(|slot| {
            let (name, details) = match style {
                PlanStyle::Detailed => slot.detailed,
                PlanStyle::Compact => slot.compact,
            };
            PlannedActivity {
                kind: slot.kind,
                name: name.to_string(),
                details: details.to_string(),
                completed: false,
            }
        })
        .collect()
}

/// Share of completed activities as a whole percent; 0 for an empty day
pub fn completion_rate(activities: &[PlannedActivity]) -> u8 {
    if activities.is_empty() {
        return 0;
    }
    let completed = activities.iter().filter(|a| a.completed).count();
    ((completed as f64 / activities.len() as f64) * 100.0).round() as u8
}

// ---------------------------------------------------------------------------
/// Training Plan: date -> activities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    days: BTreeMap<NaiveDate, Vec<PlannedActivity>>,
}

impl TrainingPlan {
    /// Activities for `date`; empty when the date is outside the plan
    pub fn day(&self, date: NaiveDate) -> &[PlannedActivity] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<PlannedActivity>)> {
        self.days.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Flip the completion mark of one activity, returning its new state
    pub fn toggle(&mut self, date: NaiveDate, index: usize) -> Option<bool> {
        let activity = self.days.get_mut(&date)?.get_mut(index)?;
        activity.completed = !activity.completed;
        Some(activity.completed)
    }

    pub fn completion_rate(&self, date: NaiveDate) -> u8 {
        completion_rate(self.day(date))
    }
}

/// Plan for `days` consecutive dates starting at `start`
pub fn generate_plan(start: NaiveDate, days: u32, style: PlanStyle) -> TrainingPlan {
    let days = (0..days as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            (date, activities_for(date.weekday(), style))
        })
        .collect();
    TrainingPlan { days }
}

/// Two weeks forward from `today`
pub fn weekly_plan(today: NaiveDate) -> TrainingPlan {
    generate_plan(today, WEEKLY_PLAN_DAYS, PlanStyle::Detailed)
}

/// Every day of the month containing `anchor`
pub fn monthly_plan(anchor: NaiveDate) -> TrainingPlan {
    generate_plan(first_of_month(anchor), days_in_month(anchor), PlanStyle::Compact)
}

// ---------------------------------------------------------------------------
/// Calendar Helpers
// ---------------------------------------------------------------------------

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    // Day 1 + 31 always lands in the following month
    let next = first_of_month(first + Duration::days(31));
    (next - first).num_days() as u32
}

/// First day of the month `delta` months away from `anchor`'s month
pub fn shift_month(anchor: NaiveDate, delta: i32) -> NaiveDate {
    let mut month = first_of_month(anchor);
    for _ in 0..delta.unsigned_abs() {
        month = if delta > 0 {
            first_of_month(month + Duration::days(31))
        } else {
            first_of_month(month - Duration::days(1))
        };
    }
    month
}

pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from adjacent months
    pub in_month: bool,
    pub is_today: bool,
}

/// Six Sunday-first weeks covering a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn containing(anchor: NaiveDate, today: NaiveDate) -> Self {
        let first = first_of_month(anchor);
        let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);

        let cells = (0..MONTH_GRID_CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                CalendarCell {
                    date,
                    in_month: date.month() == first.month() && date.year() == first.year(),
                    is_today: date == today,
                }
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            cells,
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    /// "October 2026"
    pub fn title(&self) -> String {
        self.cells
            .iter()
            .find(|c| c.in_month)
            .map(|c| c.date.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
/// Plan Session: the calendar view's in-memory state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Weekly,
    Monthly,
}

/// Holds the generated plan and its completion marks for one viewing session.
/// Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct PlanSession {
    mode: ViewMode,
    today: NaiveDate,
    /// First day of the month shown in monthly mode
    month: NaiveDate,
    plan: TrainingPlan,
}

impl PlanSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::Weekly,
            today,
            month: first_of_month(today),
            plan: weekly_plan(today),
        }
    }

    pub fn for_today() -> Self {
        Self::new(local_today())
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn plan(&self) -> &TrainingPlan {
        &self.plan
    }

    /// Switch between the two-week list and the month grid
    pub fn toggle_view(&mut self) -> ViewMode {
        self.mode = match self.mode {
            ViewMode::Weekly => ViewMode::Monthly,
            ViewMode::Monthly => ViewMode::Weekly,
        };
        self.regenerate();
        self.mode
    }

    /// Move the month shown by `delta` months
    pub fn navigate_month(&mut self, delta: i32) {
        self.month = shift_month(self.month, delta);
        if self.mode == ViewMode::Monthly {
            self.regenerate();
        }
    }

    /// Rebuild the plan for a new `today`, e.g. when the view regains focus
    pub fn refresh(&mut self, today: NaiveDate) {
        self.today = today;
        self.regenerate();
    }

    pub fn toggle(&mut self, date: NaiveDate, index: usize) -> Option<bool> {
        self.plan.toggle(date, index)
    }

    pub fn completion_rate(&self, date: NaiveDate) -> u8 {
        self.plan.completion_rate(date)
    }

    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::containing(self.month, self.today)
    }

    fn regenerate(&mut self) {
        self.plan = match self.mode {
            ViewMode::Weekly => weekly_plan(self.today),
            ViewMode::Monthly => monthly_plan(self.month),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn kinds(activities: &[PlannedActivity]) -> Vec<ActivityKind> {
        activities.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_weekday_table() {
        use ActivityKind::*;
        assert_eq!(kinds(&activities_for(Weekday::Mon, PlanStyle::Detailed)), vec![Bagwork, Weight]);
        assert_eq!(kinds(&activities_for(Weekday::Tue, PlanStyle::Detailed)), vec![Cardio]);
        assert_eq!(kinds(&activities_for(Weekday::Wed, PlanStyle::Detailed)), vec![Strength, Weight]);
        assert_eq!(kinds(&activities_for(Weekday::Thu, PlanStyle::Detailed)), vec![Sparring]);
        assert_eq!(kinds(&activities_for(Weekday::Fri, PlanStyle::Detailed)), vec![Bagwork, Weight]);
        assert_eq!(kinds(&activities_for(Weekday::Sat, PlanStyle::Detailed)), vec![Cardio]);
        assert_eq!(kinds(&activities_for(Weekday::Sun, PlanStyle::Detailed)), vec![Weight, Rest]);
    }

    #[test]
    fn test_styles_share_kinds_but_not_wording() {
        let detailed = activities_for(Weekday::Mon, PlanStyle::Detailed);
        let compact = activities_for(Weekday::Mon, PlanStyle::Compact);
        assert_eq!(kinds(&detailed), kinds(&compact));
        assert_eq!(detailed[0].details, "6 rounds × 3 min");
        assert_eq!(compact[0].details, "6×3min");
        assert_eq!(compact[1].name, "Weigh-in");
        assert!(detailed.iter().chain(compact.iter()).all(|a| !a.completed));
    }

    #[test]
    fn test_generate_plan_is_deterministic_by_weekday() {
        let monday = date(2026, 10, 12);
        assert_eq!(monday.weekday(), Weekday::Mon);

        let plan = generate_plan(monday, 21, PlanStyle::Detailed);
        assert_eq!(plan.len(), 21);
        for offset in 0..21 {
            let day = monday + Duration::days(offset);
            assert_eq!(plan.day(day), activities_for(day.weekday(), PlanStyle::Detailed).as_slice());
        }
        assert_eq!(plan, generate_plan(monday, 21, PlanStyle::Detailed));
    }

    #[test]
    fn test_weekly_plan_covers_fourteen_days_from_today() {
        let today = date(2026, 10, 16);
        let plan = weekly_plan(today);
        let dates: Vec<NaiveDate> = plan.dates().collect();
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], today);
        assert_eq!(dates[13], today + Duration::days(13));
        assert!(plan.day(today - Duration::days(1)).is_empty());
    }

    #[test]
    fn test_monthly_plan_covers_month_only() {
        let plan = monthly_plan(date(2026, 2, 17));
        assert_eq!(plan.len(), 28);
        assert!(plan.dates().all(|d| d.month() == 2));

        assert_eq!(monthly_plan(date(2028, 2, 1)).len(), 29);
        assert_eq!(monthly_plan(date(2026, 12, 31)).len(), 31);
    }

    #[test]
    fn test_completion_rate() {
        let mut plan = weekly_plan(date(2026, 10, 12)); // Monday: bag work + weigh-in
        let monday = date(2026, 10, 12);
        let tuesday = date(2026, 10, 13);

        assert_eq!(plan.completion_rate(monday), 0);
        assert_eq!(plan.toggle(monday, 0), Some(true));
        assert_eq!(plan.completion_rate(monday), 50);
        assert_eq!(plan.toggle(monday, 1), Some(true));
        assert_eq!(plan.completion_rate(monday), 100);
        assert_eq!(plan.toggle(monday, 1), Some(false));
        assert_eq!(plan.completion_rate(monday), 50);

        assert_eq!(plan.toggle(tuesday, 0), Some(true));
        assert_eq!(plan.completion_rate(tuesday), 100);

        // Out of range
        assert_eq!(plan.toggle(tuesday, 5), None);
        assert_eq!(plan.toggle(date(2027, 1, 1), 0), None);
        assert_eq!(plan.completion_rate(date(2027, 1, 1)), 0);
    }

    #[test]
    fn test_completion_rate_rounds_to_nearest_percent() {
        let mut activities = activities_for(Weekday::Mon, PlanStyle::Detailed);
        activities.extend(activities_for(Weekday::Tue, PlanStyle::Detailed));
        assert_eq!(activities.len(), 3);
        activities[0].completed = true;
        assert_eq!(completion_rate(&activities), 33);
        activities[1].completed = true;
        assert_eq!(completion_rate(&activities), 67);
        assert_eq!(completion_rate(&[]), 0);
    }

    #[test]
    fn test_month_grid_shape() {
        let today = date(2026, 10, 16);
        for year in [2025, 2026, 2028] {
            for month in 1..=12 {
                let anchor = date(year, month, 15);
                let grid = MonthGrid::containing(anchor, today);

                assert_eq!(grid.cells.len(), 42);
                assert_eq!(grid.cells[0].date.weekday(), Weekday::Sun);
                assert!(grid.cells[0].date <= first_of_month(anchor));

                let in_month: Vec<NaiveDate> = grid
                    .cells
                    .iter()
                    .filter(|c| c.in_month)
                    .map(|c| c.date)
                    .collect();
                let unique: HashSet<NaiveDate> = in_month.iter().copied().collect();
                assert_eq!(in_month.len(), days_in_month(anchor) as usize);
                assert_eq!(unique.len(), in_month.len());
                for day in 1..=days_in_month(anchor) {
                    assert!(unique.contains(&date(year, month, day)));
                }

                // Consecutive days, six full weeks
                for pair in grid.cells.windows(2) {
                    assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
                }
                assert_eq!(grid.weeks().count(), 6);
            }
        }
    }

    #[test]
    fn test_month_grid_marks_adjacent_days_and_today() {
        // Feb 2026 starts on a Sunday
        let grid = MonthGrid::containing(date(2026, 2, 10), date(2026, 2, 14));
        assert_eq!(grid.cells[0].date, date(2026, 2, 1));
        assert!(grid.cells[0].in_month);
        assert!(!grid.cells[41].in_month);
        assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(grid.title(), "February 2026");

        // Aug 2026 starts on a Saturday: six leading July days
        let grid = MonthGrid::containing(date(2026, 8, 1), date(2026, 10, 16));
        assert_eq!(grid.cells[0].date, date(2026, 7, 26));
        assert!(grid.cells[..6].iter().all(|c| !c.in_month));
        assert!(grid.cells[6].in_month);
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(date(2026, 1, 31), 1), date(2026, 2, 1));
        assert_eq!(shift_month(date(2026, 12, 5), 1), date(2027, 1, 1));
        assert_eq!(shift_month(date(2026, 1, 5), -1), date(2025, 12, 1));
        assert_eq!(shift_month(date(2026, 10, 16), 14), date(2027, 12, 1));
        assert_eq!(shift_month(date(2026, 10, 16), 0), date(2026, 10, 1));
    }

    #[test]
    fn test_is_past() {
        let today = date(2026, 10, 16);
        assert!(is_past(date(2026, 10, 15), today));
        assert!(!is_past(today, today));
        assert!(!is_past(date(2026, 10, 17), today));
    }

    #[test]
    fn test_loggable_types() {
        assert_eq!(ActivityKind::Sparring.loggable_type(), Some(WorkoutType::Sparring));
        assert_eq!(ActivityKind::Weight.loggable_type(), None);
        assert_eq!(ActivityKind::Rest.loggable_type(), None);
    }

    #[test]
    fn test_session_marks_are_dropped_on_regenerate() {
        let today = date(2026, 10, 12);
        let mut session = PlanSession::new(today);
        assert_eq!(session.mode(), ViewMode::Weekly);
        assert_eq!(session.plan().len(), 14);

        session.toggle(today, 0);
        assert_eq!(session.completion_rate(today), 50);

        assert_eq!(session.toggle_view(), ViewMode::Monthly);
        assert_eq!(session.plan().len(), 31);
        assert_eq!(session.completion_rate(today), 0);
        assert_eq!(session.plan().day(today)[0].details, "6×3min");

        session.toggle(today, 0);
        session.navigate_month(1);
        assert_eq!(session.month(), date(2026, 11, 1));
        assert_eq!(session.plan().len(), 30);
        assert!(session.plan().day(today).is_empty());

        assert_eq!(session.toggle_view(), ViewMode::Weekly);
        assert_eq!(session.plan().day(today)[0].details, "6 rounds × 3 min");
        assert_eq!(session.completion_rate(today), 0);
    }

    #[test]
    fn test_session_refresh_moves_window() {
        let mut session = PlanSession::new(date(2026, 10, 12));
        session.refresh(date(2026, 10, 20));
        assert_eq!(session.plan().dates().next(), Some(date(2026, 10, 20)));
        assert_eq!(session.month_grid().month, 10);
    }
}
