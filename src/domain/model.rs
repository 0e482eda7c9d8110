use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Meal slots in one week: 7 days, two meals a day.
pub const SLOTS_PER_WEEK: usize = 14;
pub const DAYS_PER_WEEK: usize = SLOTS_PER_WEEK / 2;
pub const MAX_DISH_NAME_LEN: usize = 49;
/// Number of prior weeks consulted for duplicate suppression.
pub const MAX_HISTORY_WEEKS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tier priority order, used for slack redistribution and draws.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

/// The difficulty preference a week is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl Preference {
    /// Maps a user supplied label, falling back to `Mixed` for anything unrecognized.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Unrecognized difficulty preference '{}', using 'mixed'",
                label
            );
            Preference::Mixed
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Easy => "easy",
            Preference::Medium => "medium",
            Preference::Hard => "hard",
            Preference::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Preference::Easy),
            "medium" => Ok(Preference::Medium),
            "hard" => Ok(Preference::Hard),
            "mixed" => Ok(Preference::Mixed),
            other => Err(format!("unknown preference '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dish {
    pub name: String,
    pub difficulty: Difficulty,
}

impl Dish {
    /// Builds a dish from a raw name, trimming it and enforcing the name rules
    /// the history log relies on.
    pub fn new(name: &str, difficulty: Difficulty) -> std::result::Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("dish name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_DISH_NAME_LEN {
            return Err(format!(
                "dish name '{}' is longer than {} characters",
                name, MAX_DISH_NAME_LEN
            ));
        }
        if name.contains(',') {
            return Err(format!("dish name '{}' cannot contain a comma", name));
        }
        if name.contains(['\n', '\r']) {
            return Err("dish name cannot contain a line break".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            difficulty,
        })
    }
}

/// Ordered, non-empty dish list with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    pub fn new(dishes: Vec<Dish>) -> Result<Self> {
        if dishes.is_empty() {
            return Err(PlannerError::CatalogError {
                message: "catalog contains no dishes".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(dishes.len());
        for (index, dish) in dishes.iter().enumerate() {
            if !seen.insert(dish.name.as_str()) {
                return Err(PlannerError::InvalidDish {
                    index,
                    reason: format!("duplicate dish name '{}'", dish.name),
                });
            }
        }

        Ok(Self { dishes })
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn count_by_difficulty(&self, difficulty: Difficulty) -> usize {
        self.dishes
            .iter()
            .filter(|d| d.difficulty == difficulty)
            .count()
    }
}

/// Fourteen meal slots. Slots `2i` and `2i + 1` belong to day `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekPlan {
    slots: Vec<Option<String>>,
    partial: bool,
}

impl WeekPlan {
    pub fn from_slots(slots: Vec<Option<String>>) -> Result<Self> {
        if slots.len() != SLOTS_PER_WEEK {
            return Err(PlannerError::InvalidPlan {
                message: format!(
                    "expected {} slots, got {}",
                    SLOTS_PER_WEEK,
                    slots.len()
                ),
            });
        }
        Ok(Self {
            slots,
            partial: false,
        })
    }

    /// Fills slots in order with `names`; remaining slots stay empty.
    pub fn from_filled(names: Vec<String>) -> Result<Self> {
        if names.len() > SLOTS_PER_WEEK {
            return Err(PlannerError::InvalidPlan {
                message: format!(
                    "cannot place {} dishes into {} slots",
                    names.len(),
                    SLOTS_PER_WEEK
                ),
            });
        }
        let mut slots: Vec<Option<String>> = names.into_iter().map(Some).collect();
        slots.resize(SLOTS_PER_WEEK, None);
        Self::from_slots(slots)
    }

    /// A week reconstructed from fewer than 14 logged entries. It still
    /// blocks the dishes it does record.
    pub fn partial(records: Vec<Option<String>>) -> Result<Self> {
        let recorded = records.len();
        if recorded > SLOTS_PER_WEEK {
            return Err(PlannerError::InvalidPlan {
                message: format!(
                    "a week holds at most {} entries, got {}",
                    SLOTS_PER_WEEK, recorded
                ),
            });
        }
        let mut slots = records;
        slots.resize(SLOTS_PER_WEEK, None);
        Ok(Self {
            slots,
            partial: recorded < SLOTS_PER_WEEK,
        })
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == SLOTS_PER_WEEK
    }

    pub fn dishes(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|s| s.as_deref())
    }

    pub fn contains(&self, dish: &str) -> bool {
        self.dishes().any(|name| name == dish)
    }

    /// `(day number, first meal, second meal)` for days 1 through 7.
    pub fn days(&self) -> impl Iterator<Item = (usize, Option<&str>, Option<&str>)> {
        self.slots
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| (i + 1, pair[0].as_deref(), pair[1].as_deref()))
    }
}

/// The most recent prior weeks, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    weeks: Vec<WeekPlan>,
}

impl HistoryWindow {
    /// Keeps only the last `MAX_HISTORY_WEEKS` of `weeks`.
    pub fn new(mut weeks: Vec<WeekPlan>) -> Self {
        if weeks.len() > MAX_HISTORY_WEEKS {
            weeks.drain(..weeks.len() - MAX_HISTORY_WEEKS);
        }
        Self { weeks }
    }

    pub fn weeks(&self) -> &[WeekPlan] {
        &self.weeks
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl TierCounts {
    pub const fn new(easy: usize, medium: usize, hard: usize) -> Self {
        Self { easy, medium, hard }
    }

    pub fn get(&self, tier: Difficulty) -> usize {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn get_mut(&mut self, tier: Difficulty) -> &mut usize {
        match tier {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl fmt::Display for TierCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "easy={}, medium={}, hard={}",
            self.easy, self.medium, self.hard
        )
    }
}

/// Non-fatal conditions raised while generating a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlanWarning {
    TierShortage {
        tier: Difficulty,
        wanted: usize,
        available: usize,
    },
    InsufficientDishes {
        available: usize,
        required: usize,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::TierShortage {
                tier,
                wanted,
                available,
            } => write!(
                f,
                "Only {} eligible {} dishes for {} {} slots",
                available, tier, wanted, tier
            ),
            PlanWarning::InsufficientDishes {
                available,
                required,
            } => write!(
                f,
                "Only {} total unique dishes available, need {} ({} of {} slots filled)",
                available, required, available, required
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedWeek {
    pub plan: WeekPlan,
    pub targets: TierCounts,
    pub available: TierCounts,
    pub warnings: Vec<PlanWarning>,
}

impl GeneratedWeek {
    pub fn is_degraded(&self) -> bool {
        !self.plan.is_full()
    }
}

/// Everything the generator needs for one run.
#[derive(Debug, Clone)]
pub struct PlanInputs {
    pub catalog: Catalog,
    pub history: HistoryWindow,
    pub preference: Preference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_name_rules() {
        assert_eq!(
            Dish::new("  Pad Thai ", Difficulty::Medium).unwrap().name,
            "Pad Thai"
        );
        assert!(Dish::new("   ", Difficulty::Easy).is_err());
        assert!(Dish::new("Mac, cheese", Difficulty::Easy).is_err());
        assert!(Dish::new(&"x".repeat(MAX_DISH_NAME_LEN + 1), Difficulty::Easy).is_err());
        assert!(Dish::new(&"x".repeat(MAX_DISH_NAME_LEN), Difficulty::Easy).is_ok());
    }

    #[test]
    fn test_difficulty_parse_is_lenient_on_case() {
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("spicy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_unknown_preference_falls_back_to_mixed() {
        assert_eq!(Preference::from_label("medium"), Preference::Medium);
        assert_eq!(Preference::from_label("extreme"), Preference::Mixed);
        assert_eq!(Preference::from_label(""), Preference::Mixed);
        assert_eq!(Preference::from_label("  "), Preference::Mixed);
    }

    #[test]
    fn test_catalog_rejects_empty_and_duplicates() {
        assert!(matches!(
            Catalog::new(vec![]),
            Err(PlannerError::CatalogError { .. })
        ));

        let dup = vec![
            Dish::new("Soup", Difficulty::Easy).unwrap(),
            Dish::new("Soup", Difficulty::Hard).unwrap(),
        ];
        assert!(matches!(
            Catalog::new(dup),
            Err(PlannerError::InvalidDish { index: 1, .. })
        ));
    }

    #[test]
    fn test_week_plan_length_is_validated() {
        assert!(WeekPlan::from_slots(vec![None; 13]).is_err());
        assert!(WeekPlan::from_slots(vec![None; 15]).is_err());
        assert!(WeekPlan::from_slots(vec![None; SLOTS_PER_WEEK]).is_ok());
        assert!(WeekPlan::from_filled(vec!["a".to_string(); 15]).is_err());
    }

    #[test]
    fn test_from_filled_pads_with_empty_slots() {
        let plan = WeekPlan::from_filled(vec!["Soup".to_string(), "Salad".to_string()]).unwrap();
        assert_eq!(plan.slots().len(), SLOTS_PER_WEEK);
        assert_eq!(plan.filled_count(), 2);
        assert_eq!(plan.slot(1), Some("Salad"));
        assert_eq!(plan.slot(2), None);
        assert!(!plan.is_partial());
    }

    #[test]
    fn test_partial_week_keeps_recorded_dishes() {
        let plan = WeekPlan::partial(vec![Some("Soup".to_string()), None]).unwrap();
        assert!(plan.is_partial());
        assert!(plan.contains("Soup"));
        assert!(!plan.contains(""));
        assert_eq!(plan.slots().len(), SLOTS_PER_WEEK);
    }

    #[test]
    fn test_days_pair_consecutive_slots() {
        let names: Vec<String> = (0..SLOTS_PER_WEEK).map(|i| format!("D{}", i)).collect();
        let plan = WeekPlan::from_filled(names).unwrap();
        let days: Vec<_> = plan.days().collect();
        assert_eq!(days.len(), DAYS_PER_WEEK);
        assert_eq!(days[0], (1, Some("D0"), Some("D1")));
        assert_eq!(days[6], (7, Some("D12"), Some("D13")));
    }

    #[test]
    fn test_history_window_keeps_most_recent_two() {
        let week = |name: &str| WeekPlan::from_filled(vec![name.to_string()]).unwrap();
        let window = HistoryWindow::new(vec![week("old"), week("mid"), week("new")]);
        assert_eq!(window.len(), 2);
        assert!(window.weeks()[0].contains("mid"));
        assert!(window.weeks()[1].contains("new"));
    }
}
