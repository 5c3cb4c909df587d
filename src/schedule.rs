use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::models::{BannerTag, Category, PerCategory, TargetConfig};
use crate::pull::{pull_banner, BannerPull, PullRequest};

/// A target bound to its catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub banner: usize,
    pub copies: u32,
}

/// Binds targets to catalog entries and orders them by start date, falling
/// back to catalog order for banners that start on the same day. Unknown
/// names are dropped; a repeated name keeps the last copy count.
pub fn resolve_targets(catalog: &Catalog, targets: &[TargetConfig]) -> Vec<ResolvedTarget> {
    let mut resolved: Vec<ResolvedTarget> = Vec::with_capacity(targets.len());
    for target in targets {
        let Some(banner) = catalog.position(&target.name) else {
            warn!(name = %target.name, "dropping target for unknown banner");
            continue;
        };
        match resolved.iter_mut().find(|entry| entry.banner == banner) {
            Some(existing) => existing.copies = target.copies,
            None => resolved.push(ResolvedTarget {
                banner,
                copies: target.copies,
            }),
        }
    }
    resolved.sort_by_key(|target| (catalog.get(target.banner).start, target.banner));
    resolved
}

/// Mutable resources of a single trial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialState {
    pub diamonds: u64,
    pub tickets: PerCategory<u32>,
    pub pity: PerCategory<u32>,
    pub current_date: NaiveDate,
}

/// One targeted banner with the income that accrues before pulling on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledBanner {
    pub banner: usize,
    pub category: Category,
    pub tag: BannerTag,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub target_copies: u32,
    pub duration_days: u64,
    pub diamonds_gained: u64,
    pub bonus_tickets: PerCategory<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerResult {
    pub banner: usize,
    pub duration_days: u64,
    pub pull: BannerPull,
    pub diamonds_gained: u64,
    pub bonus_tickets: PerCategory<u32>,
    pub remaining_diamonds: u64,
    pub remaining_tickets: PerCategory<u32>,
    pub remaining_pity: PerCategory<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialOutcome {
    pub success: bool,
    pub banner_results: Vec<BannerResult>,
    pub final_diamonds: u64,
    pub final_tickets: PerCategory<u32>,
}

/// Chronological plan for the targeted banners.
///
/// Dates, income and bonus tickets only depend on the calendar, so they are
/// worked out once; trials replay the plan and only differ in their draws.
#[derive(Clone, Debug)]
pub struct Schedule {
    steps: Vec<ScheduledBanner>,
}

impl Schedule {
    pub fn resolve(
        catalog: &Catalog,
        targets: &[ResolvedTarget],
        free_tickets: PerCategory<u32>,
        daily_income: u64,
        start_date: NaiveDate,
    ) -> Self {
        let mut steps = Vec::with_capacity(targets.len());
        let mut current_date = start_date;
        let mut last_end = start_date;

        for target in targets {
            let banner = catalog.get(target.banner);
            if banner.end < current_date {
                debug!(
                    name = %banner.name,
                    end = %banner.end,
                    current = %current_date,
                    "skipping banner that ended before it was reached"
                );
                continue;
            }

            let mut bonus_tickets: PerCategory<u32> = PerCategory::default();
            for (idx, other) in catalog.banners().iter().enumerate() {
                if idx == target.banner || other.tag != BannerTag::NewRelease {
                    continue;
                }
                if other.within(last_end, banner.start) {
                    let granted = bonus_tickets.get_mut(other.category);
                    *granted = granted.saturating_add(*free_tickets.get(other.category));
                }
            }
            if banner.tag == BannerTag::NewRelease {
                let granted = bonus_tickets.get_mut(banner.category);
                *granted = granted.saturating_add(*free_tickets.get(banner.category));
            }

            let mut diamonds_gained = 0u64;
            if banner.start > current_date {
                diamonds_gained =
                    days_between(current_date, banner.start).saturating_mul(daily_income);
                current_date = banner.start;
            }
            let effective_start = current_date.max(banner.start);
            let duration_days = days_between(effective_start, banner.end).max(1);
            diamonds_gained =
                diamonds_gained.saturating_add(duration_days.saturating_mul(daily_income));

            steps.push(ScheduledBanner {
                banner: target.banner,
                category: banner.category,
                tag: banner.tag,
                start: banner.start,
                end: banner.end,
                target_copies: target.copies,
                duration_days,
                diamonds_gained,
                bonus_tickets,
            });

            current_date = banner.end;
            last_end = banner.end;
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[ScheduledBanner] {
        &self.steps
    }

    pub fn run_trial<R: Rng + ?Sized>(&self, mut state: TrialState, rng: &mut R) -> TrialOutcome {
        let mut success = true;
        let mut banner_results = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            for category in Category::ALL {
                let held = state.tickets.get_mut(category);
                *held = held.saturating_add(*step.bonus_tickets.get(category));
            }
            state.diamonds = state.diamonds.saturating_add(step.diamonds_gained);
            state.current_date = state.current_date.max(step.start);

            let pull = pull_banner(
                PullRequest {
                    category: step.category,
                    diamonds: state.diamonds,
                    tickets: *state.tickets.get(step.category),
                    pity: *state.pity.get(step.category),
                    target_copies: step.target_copies,
                },
                rng,
            );

            state.diamonds = pull.diamonds_remaining;
            *state.tickets.get_mut(step.category) = pull.tickets_remaining;
            *state.pity.get_mut(step.category) = pull.final_pity;
            success &= pull.success;

            banner_results.push(BannerResult {
                banner: step.banner,
                duration_days: step.duration_days,
                pull,
                diamonds_gained: step.diamonds_gained,
                bonus_tickets: step.bonus_tickets,
                remaining_diamonds: state.diamonds,
                remaining_tickets: state.tickets,
                remaining_pity: state.pity,
            });

            state.current_date = step.end;
        }

        TrialOutcome {
            success,
            banner_results,
            final_diamonds: state.diamonds,
            final_tickets: state.tickets,
        }
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> u64 {
    (to - from).num_days().max(0) as u64
}
