use rand::Rng;

use crate::models::Category;

pub const PULL_COST: u64 = 150;

/// Rate constants for one reward category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PityRates {
    pub base_rate: f64,
    /// First pity value that gets a boosted rate.
    pub soft_pity_start: u32,
    pub increment: f64,
    pub rate_cap: f64,
    pub hard_pity: u32,
}

const UR_RATES: PityRates = PityRates {
    base_rate: 0.001,
    soft_pity_start: 81,
    increment: 0.0022,
    rate_cap: 0.1308,
    hard_pity: 140,
};

const SP_RATES: PityRates = PityRates {
    base_rate: 0.001,
    soft_pity_start: 91,
    increment: 0.0032,
    rate_cap: 0.1578,
    hard_pity: 140,
};

impl Category {
    pub fn rates(self) -> &'static PityRates {
        match self {
            Category::Ur => &UR_RATES,
            Category::Sp => &SP_RATES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PullOutcome {
    pub featured: bool,
    pub pity: u32,
}

impl PityRates {
    /// Probability that the next pull yields the featured reward.
    pub fn rate(&self, pity: u32) -> f64 {
        if pity < self.soft_pity_start {
            return self.base_rate;
        }
        let pulls_into_ramp = pity - self.soft_pity_start + 1;
        let rate = self.base_rate + pulls_into_ramp as f64 * self.increment;
        rate.min(self.rate_cap)
    }

    pub fn is_guaranteed(&self, pity: u32) -> bool {
        pity + 1 >= self.hard_pity
    }

    pub fn draw<R: Rng + ?Sized>(&self, pity: u32, rng: &mut R) -> PullOutcome {
        if self.is_guaranteed(pity) {
            return PullOutcome {
                featured: true,
                pity: 0,
            };
        }
        if rng.gen::<f64>() < self.rate(pity) {
            PullOutcome {
                featured: true,
                pity: 0,
            }
        } else {
            PullOutcome {
                featured: false,
                pity: pity + 1,
            }
        }
    }
}
