use crate::domain::model::{Difficulty, PlanWarning, Preference, TierCounts, SLOTS_PER_WEEK};

/// Starting per-tier counts for a preference. Every row sums to `SLOTS_PER_WEEK`.
pub fn initial_targets(preference: Preference) -> TierCounts {
    match preference {
        Preference::Easy => TierCounts::new(10, 4, 0),
        Preference::Medium => TierCounts::new(5, 6, 3),
        Preference::Hard => TierCounts::new(2, 5, 7),
        Preference::Mixed => TierCounts::new(5, 5, 4),
    }
}

/// Lowers every target that exceeds its pool size to the pool size.
pub fn clamp_to_supply(targets: &mut TierCounts, available: &TierCounts) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();
    for tier in Difficulty::ALL {
        let wanted = targets.get(tier);
        let supply = available.get(tier);
        if supply < wanted {
            tracing::warn!(
                "Only {} eligible {} dishes for {} slots, clamping target",
                supply,
                tier,
                wanted
            );
            *targets.get_mut(tier) = supply;
            warnings.push(PlanWarning::TierShortage {
                tier,
                wanted,
                available: supply,
            });
        }
    }
    warnings
}

/// Hands freed slots to tiers with spare supply, one at a time, always to the
/// first such tier in `Difficulty::ALL` order. Returns the slots that could
/// not be covered.
pub fn redistribute_slack(targets: &mut TierCounts, available: &TierCounts) -> usize {
    let mut slots_left = SLOTS_PER_WEEK.saturating_sub(targets.total());
    while slots_left > 0 {
        let Some(tier) = Difficulty::ALL
            .into_iter()
            .find(|&tier| available.get(tier) > targets.get(tier))
        else {
            break;
        };
        *targets.get_mut(tier) += 1;
        slots_left -= 1;
    }
    slots_left
}
