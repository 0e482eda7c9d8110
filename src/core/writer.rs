use crate::domain::model::WeekPlan;
use chrono::{DateTime, SecondsFormat, Utc};

/// Opens every week record in the history log.
pub const PLAN_HEADER: &str = "New Weekly Plan";
pub const DAY_PREFIX: &str = "Day";

/// One `Day n: first, second` line per day. Empty slots render as nothing.
pub fn format_days(plan: &WeekPlan) -> String {
    let mut out = String::new();
    for (day, first, second) in plan.days() {
        out.push_str(&format!(
            "{} {}: {}, {}\n",
            DAY_PREFIX,
            day,
            first.unwrap_or_default(),
            second.unwrap_or_default()
        ));
    }
    out
}

/// The record appended to the history log for one generated week.
pub fn format_plan(plan: &WeekPlan, generated_at: DateTime<Utc>) -> String {
    format!(
        "\n{}: {}\n{}",
        PLAN_HEADER,
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        format_days(plan)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_plan_pairs_slots_by_day() {
        let names: Vec<String> = (1..=14).map(|i| format!("Dish {}", i)).collect();
        let plan = WeekPlan::from_filled(names).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 18, 30, 0).unwrap();

        let record = format_plan(&plan, at);
        let lines: Vec<&str> = record.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "New Weekly Plan: 2026-10-15T18:30:00Z");
        assert_eq!(lines[2], "Day 1: Dish 1, Dish 2");
        assert_eq!(lines[8], "Day 7: Dish 13, Dish 14");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_empty_slots_render_blank() {
        let plan = WeekPlan::from_filled(vec!["Soup".to_string()]).unwrap();
        let days = format_days(&plan);
        let lines: Vec<&str> = days.lines().collect();
        assert_eq!(lines[0], "Day 1: Soup, ");
        assert_eq!(lines[6], "Day 7: , ");
    }
}
