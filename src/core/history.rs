use crate::core::writer::{DAY_PREFIX, PLAN_HEADER};
use crate::domain::model::{HistoryWindow, WeekPlan, MAX_HISTORY_WEEKS, SLOTS_PER_WEEK};
use crate::utils::error::Result;
use std::collections::VecDeque;

/// Rebuilds the most recent weeks from the text of a history log.
///
/// Each `Day n: first, second` line contributes two entries. Entries are
/// grouped into weeks of `SLOTS_PER_WEEK` in writing order, and a
/// `New Weekly Plan` header also closes the week in progress. Only the last
/// `MAX_HISTORY_WEEKS` weeks are kept; a short week is kept as a partial plan.
/// Lines that are neither headers nor day entries are ignored.
pub fn read_history(log: &str) -> Result<HistoryWindow> {
    let mut recent: VecDeque<Vec<Option<String>>> = VecDeque::with_capacity(MAX_HISTORY_WEEKS + 1);
    let mut current: Vec<Option<String>> = Vec::with_capacity(SLOTS_PER_WEEK);

    for line in log.lines() {
        if line.trim_start().starts_with(PLAN_HEADER) {
            close_week(&mut recent, &mut current);
            continue;
        }

        let Some(entries) = day_entries(line) else {
            continue;
        };

        for entry in split_entries(entries) {
            if current.len() == SLOTS_PER_WEEK {
                close_week(&mut recent, &mut current);
            }
            current.push(entry);
        }
    }
    close_week(&mut recent, &mut current);

    let weeks = recent
        .into_iter()
        .map(WeekPlan::partial)
        .collect::<Result<Vec<_>>>()?;

    for week in weeks.iter().filter(|w| w.is_partial()) {
        tracing::debug!(
            "History contains a partial week with {} recorded dishes",
            week.filled_count()
        );
    }

    Ok(HistoryWindow::new(weeks))
}

/// True iff `dish` exactly matches a filled slot of any plan in `plans`.
pub fn is_dish_used(plans: &[WeekPlan], dish: &str) -> bool {
    plans.iter().any(|plan| plan.contains(dish))
}

fn close_week(recent: &mut VecDeque<Vec<Option<String>>>, current: &mut Vec<Option<String>>) {
    if current.is_empty() {
        return;
    }
    recent.push_back(std::mem::take(current));
    if recent.len() > MAX_HISTORY_WEEKS {
        recent.pop_front();
    }
}

/// The text after `Day <n>:`, or `None` for any other line.
fn day_entries(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(DAY_PREFIX)?;
    let (day, entries) = rest.split_once(':')?;
    let day = day.trim();
    if day.is_empty() || !day.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(entries)
}

fn split_entries(entries: &str) -> Vec<Option<String>> {
    let to_slot = |raw: &str| {
        let name = raw.trim();
        (!name.is_empty()).then(|| name.to_string())
    };

    match entries.split_once(',') {
        Some((first, second)) => vec![to_slot(first), to_slot(second)],
        None => vec![to_slot(entries)],
    }
}
