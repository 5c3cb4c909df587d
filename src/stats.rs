use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{BannerTag, Category};
use crate::schedule::{BannerResult, ResolvedTarget, TrialOutcome};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationReport {
    pub success_rate: f64,
    pub total_simulations: u32,
    pub seed: u64,
    pub start_date: NaiveDate,
    pub banner_statistics: Vec<BannerReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BannerReport {
    pub name: String,
    pub category: Category,
    pub banner_tag: BannerTag,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `None` when no trial reached the banner before it ended.
    pub statistics: Option<BannerStatistics>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BannerStatistics {
    pub samples: usize,
    pub duration_days: u64,
    pub success_rate: f64,
    pub avg_pulls: f64,
    pub median_pulls: f64,
    pub p10_pulls: f64,
    pub p50_pulls: f64,
    pub p90_pulls: f64,
    pub avg_diamonds: f64,
    pub median_diamonds: f64,
    pub p10_diamonds: f64,
    pub p50_diamonds: f64,
    pub p90_diamonds: f64,
    pub avg_remaining_diamonds: f64,
    pub median_remaining_diamonds: f64,
    pub avg_remaining_ur_tickets: f64,
    pub median_remaining_ur_tickets: f64,
    pub avg_remaining_sp_tickets: f64,
    pub median_remaining_sp_tickets: f64,
    pub total_diamonds_gained: f64,
    pub free_ur_tickets_gained: f64,
    pub free_sp_tickets_gained: f64,
    pub milestone_tickets_gained: f64,
    pub milestone_copies_rate: f64,
    pub avg_base_copies: f64,
}

/// Reduces finished trials into the report. Banners follow target order.
pub fn aggregate(
    outcomes: &[TrialOutcome],
    num_sims: u32,
    seed: u64,
    start_date: NaiveDate,
    targets: &[ResolvedTarget],
    catalog: &Catalog,
) -> SimulationReport {
    let successes = outcomes.iter().filter(|outcome| outcome.success).count();

    let mut grouped: HashMap<usize, Vec<&BannerResult>> = HashMap::new();
    for outcome in outcomes {
        for result in &outcome.banner_results {
            grouped.entry(result.banner).or_default().push(result);
        }
    }

    let banner_statistics = targets
        .iter()
        .map(|target| {
            let banner = catalog.get(target.banner);
            let samples = grouped
                .get(&target.banner)
                .map(Vec::as_slice)
                .unwrap_or_default();
            BannerReport {
                name: banner.name.clone(),
                category: banner.category,
                banner_tag: banner.tag,
                start_date: banner.start,
                end_date: banner.end,
                statistics: summarize_banner(samples, num_sims),
            }
        })
        .collect();

    SimulationReport {
        success_rate: rate(successes, num_sims),
        total_simulations: num_sims,
        seed,
        start_date,
        banner_statistics,
    }
}

fn summarize_banner(samples: &[&BannerResult], num_sims: u32) -> Option<BannerStatistics> {
    let first = samples.first()?;
    let column = |value: fn(&BannerResult) -> f64| -> Vec<f64> {
        let mut values: Vec<f64> = samples.iter().map(|result| value(result)).collect();
        values.sort_by(f64::total_cmp);
        values
    };

    let pulls = column(|r| r.pull.total_pulls as f64);
    let diamonds = column(|r| r.pull.diamonds_spent as f64);
    let remaining_diamonds = column(|r| r.remaining_diamonds as f64);
    let remaining_ur = column(|r| r.remaining_tickets.ur as f64);
    let remaining_sp = column(|r| r.remaining_tickets.sp as f64);
    let successes = samples.iter().filter(|result| result.pull.success).count();

    Some(BannerStatistics {
        samples: samples.len(),
        duration_days: first.duration_days,
        success_rate: rate(successes, num_sims),
        avg_pulls: mean(&pulls)?,
        median_pulls: median(&pulls)?,
        p10_pulls: percentile(&pulls, 10.0)?,
        p50_pulls: percentile(&pulls, 50.0)?,
        p90_pulls: percentile(&pulls, 90.0)?,
        avg_diamonds: mean(&diamonds)?,
        median_diamonds: median(&diamonds)?,
        p10_diamonds: percentile(&diamonds, 10.0)?,
        p50_diamonds: percentile(&diamonds, 50.0)?,
        p90_diamonds: percentile(&diamonds, 90.0)?,
        avg_remaining_diamonds: mean(&remaining_diamonds)?,
        median_remaining_diamonds: median(&remaining_diamonds)?,
        avg_remaining_ur_tickets: mean(&remaining_ur)?,
        median_remaining_ur_tickets: median(&remaining_ur)?,
        avg_remaining_sp_tickets: mean(&remaining_sp)?,
        median_remaining_sp_tickets: median(&remaining_sp)?,
        total_diamonds_gained: mean(&column(|r| r.diamonds_gained as f64))?,
        free_ur_tickets_gained: mean(&column(|r| r.bonus_tickets.ur as f64))?,
        free_sp_tickets_gained: mean(&column(|r| r.bonus_tickets.sp as f64))?,
        milestone_tickets_gained: mean(&column(|r| r.pull.milestone_tickets as f64))?,
        milestone_copies_rate: mean(&column(|r| r.pull.milestone_copies as f64))?,
        avg_base_copies: mean(&column(|r| r.pull.base_copies() as f64))?,
    })
}

fn rate(count: usize, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(sorted: &[f64]) -> Option<f64> {
    percentile(sorted, 50.0)
}

/// Linear interpolation between closest ranks over an ascending slice.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
