use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_SIMS: u32 = 10_000;
pub const MAX_NUM_SIMS: u32 = 1_000_000;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "UR")]
    Ur,
    #[serde(rename = "SP")]
    Sp,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Ur, Category::Sp];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Ur => write!(f, "UR"),
            Category::Sp => write!(f, "SP"),
        }
    }
}

/// Whether a banner is a first run of its featured reward or a repeat.
/// Only new releases hand out the free bonus tickets.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BannerTag {
    #[default]
    NewRelease,
    Rebanner,
}

impl fmt::Display for BannerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BannerTag::NewRelease => write!(f, "new release"),
            BannerTag::Rebanner => write!(f, "rebanner"),
        }
    }
}

/// One value per reward category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PerCategory<T> {
    pub ur: T,
    pub sp: T,
}

impl<T> PerCategory<T> {
    pub fn new(ur: T, sp: T) -> Self {
        Self { ur, sp }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Ur => &self.ur,
            Category::Sp => &self.sp,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Ur => &mut self.ur,
            Category::Sp => &mut self.sp,
        }
    }
}

/// Simulation request. Every field is optional and defaults to zero / empty,
/// except `num_sims` (10 000) and `parallel` (true).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub diamonds: u64,
    #[serde(default)]
    pub ur_tickets: u32,
    #[serde(default)]
    pub sp_tickets: u32,
    #[serde(default)]
    pub ur_pity: u32,
    #[serde(default)]
    pub sp_pity: u32,
    #[serde(default)]
    pub free_ur: u32,
    #[serde(default)]
    pub free_sp: u32,
    #[serde(default)]
    pub daily_income: u64,
    #[serde(default)]
    pub targeted_banners: Vec<TargetConfig>,
    #[serde(default = "default_num_sims")]
    pub num_sims: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            diamonds: 0,
            ur_tickets: 0,
            sp_tickets: 0,
            ur_pity: 0,
            sp_pity: 0,
            free_ur: 0,
            free_sp: 0,
            daily_income: 0,
            targeted_banners: Vec::new(),
            num_sims: default_num_sims(),
            seed: None,
            start_date: None,
            parallel: default_parallel(),
        }
    }
}

impl SimConfig {
    pub fn tickets(&self) -> PerCategory<u32> {
        PerCategory::new(self.ur_tickets, self.sp_tickets)
    }

    pub fn pity(&self) -> PerCategory<u32> {
        PerCategory::new(self.ur_pity, self.sp_pity)
    }

    pub fn free_tickets(&self) -> PerCategory<u32> {
        PerCategory::new(self.free_ur, self.free_sp)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TargetConfig {
    pub name: String,
    pub copies: u32,
}

fn default_num_sims() -> u32 {
    DEFAULT_NUM_SIMS
}

fn default_parallel() -> bool {
    true
}
