use crate::core::history::is_dish_used;
use crate::core::targets::{clamp_to_supply, initial_targets, redistribute_slack};
use crate::domain::model::{
    Catalog, Difficulty, Dish, GeneratedWeek, HistoryWindow, PlanWarning, Preference, TierCounts,
    WeekPlan, SLOTS_PER_WEEK,
};
use crate::utils::error::Result;
use rand::Rng;

/// Draws a week of dishes from a catalog, skipping anything eaten in the
/// history window.
pub struct WeekGenerator<'a> {
    catalog: &'a Catalog,
    history: &'a HistoryWindow,
}

/// Eligible dishes per tier, in catalog order.
#[derive(Debug, Default)]
struct TierPools<'a> {
    easy: Vec<&'a Dish>,
    medium: Vec<&'a Dish>,
    hard: Vec<&'a Dish>,
}

impl<'a> TierPools<'a> {
    fn tier_mut(&mut self, tier: Difficulty) -> &mut Vec<&'a Dish> {
        match tier {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    fn sizes(&self) -> TierCounts {
        TierCounts::new(self.easy.len(), self.medium.len(), self.hard.len())
    }
}

impl<'a> WeekGenerator<'a> {
    pub fn new(catalog: &'a Catalog, history: &'a HistoryWindow) -> Self {
        Self { catalog, history }
    }

    pub fn is_eligible(&self, dish: &Dish) -> bool {
        !is_dish_used(self.history.weeks(), &dish.name)
    }

    /// Pool sizes of eligible dishes per tier.
    pub fn eligible_counts(&self) -> TierCounts {
        self.eligible_pools().sizes()
    }

    fn eligible_pools(&self) -> TierPools<'a> {
        let mut pools = TierPools::default();
        for dish in self.catalog.dishes() {
            if self.is_eligible(dish) {
                pools.tier_mut(dish.difficulty).push(dish);
            }
        }
        pools
    }

    /// Generates one week. Shortages never fail: the plan is filled as far as
    /// the eligible dishes allow and the shortfall is reported in `warnings`.
    pub fn generate<R: Rng>(
        &self,
        preference: Preference,
        rng: &mut R,
    ) -> Result<GeneratedWeek> {
        let mut pools = self.eligible_pools();
        let available = pools.sizes();
        tracing::debug!(
            "Eligible dishes after excluding {} prior week(s): {}",
            self.history.len(),
            available
        );

        let mut targets = initial_targets(preference);
        let mut warnings = clamp_to_supply(&mut targets, &available);
        let unfilled = redistribute_slack(&mut targets, &available);

        if available.total() < SLOTS_PER_WEEK {
            let shortage = PlanWarning::InsufficientDishes {
                available: available.total(),
                required: SLOTS_PER_WEEK,
            };
            tracing::warn!("{}", shortage);
            warnings.push(shortage);
        }
        if unfilled > 0 {
            tracing::debug!("{} slot(s) left empty", unfilled);
        }
        tracing::debug!("Final targets for '{}': {}", preference, targets);

        let mut names = Vec::with_capacity(SLOTS_PER_WEEK);
        for tier in Difficulty::ALL {
            let pool = pools.tier_mut(tier);
            for _ in 0..targets.get(tier) {
                // Partial Fisher-Yates: uniform pick, then swap-remove.
                let pick = rng.random_range(0..pool.len());
                let dish = pool.swap_remove(pick);
                names.push(dish.name.clone());
            }
        }

        Ok(GeneratedWeek {
            plan: WeekPlan::from_filled(names)?,
            targets,
            available,
            warnings,
        })
    }
}
