use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::{Category, SimConfig, MAX_NUM_SIMS};
use crate::schedule::{resolve_targets, Schedule, TrialOutcome, TrialState};
use crate::stats::{aggregate, SimulationReport};

/// Runs every trial of one request against a shared, read-only schedule.
pub struct SimulationEngine<'a> {
    pub config: &'a SimConfig,
    pub catalog: &'a Catalog,
}

impl<'a> SimulationEngine<'a> {
    pub fn new(config: &'a SimConfig, catalog: &'a Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn run(&self) -> Result<SimulationReport> {
        validate_config(self.config)?;

        let targets = resolve_targets(self.catalog, &self.config.targeted_banners);
        let start_date = self.config.start_date.unwrap_or_else(today);
        let schedule = Schedule::resolve(
            self.catalog,
            &targets,
            self.config.free_tickets(),
            self.config.daily_income,
            start_date,
        );
        let seed = self.config.seed.unwrap_or_else(rand::random);

        info!(
            trials = self.config.num_sims,
            targets = targets.len(),
            scheduled = schedule.steps().len(),
            seed,
            %start_date,
            parallel = self.config.parallel,
            "starting simulation"
        );

        let initial = TrialState {
            diamonds: self.config.diamonds,
            tickets: self.config.tickets(),
            pity: self.config.pity(),
            current_date: start_date,
        };
        let outcomes = run_trials(
            &schedule,
            &initial,
            seed,
            self.config.num_sims,
            self.config.parallel,
        );

        let report = aggregate(
            &outcomes,
            self.config.num_sims,
            seed,
            start_date,
            &targets,
            self.catalog,
        );
        info!(success_rate = report.success_rate, "simulation finished");
        Ok(report)
    }
}

pub fn run_simulation(config: &SimConfig, catalog: &Catalog) -> Result<SimulationReport> {
    SimulationEngine::new(config, catalog).run()
}

/// Trial `n` draws from its own generator seeded with `seed + n`, so the
/// outcome list does not depend on how trials are spread over threads.
pub fn run_trials(
    schedule: &Schedule,
    initial: &TrialState,
    seed: u64,
    num_sims: u32,
    parallel: bool,
) -> Vec<TrialOutcome> {
    let run_one = |trial: u32| {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
        schedule.run_trial(initial.clone(), &mut rng)
    };
    if parallel {
        (0..num_sims).into_par_iter().map(&run_one).collect()
    } else {
        (0..num_sims).map(&run_one).collect()
    }
}

pub fn validate_config(config: &SimConfig) -> Result<()> {
    if config.num_sims == 0 {
        return Err(Error::SimulationsZero);
    }
    if config.num_sims > MAX_NUM_SIMS {
        return Err(Error::TooManySimulations {
            got: config.num_sims,
            max: MAX_NUM_SIMS,
        });
    }
    let pity = config.pity();
    for category in Category::ALL {
        let hard_pity = category.rates().hard_pity;
        let got = *pity.get(category);
        if got >= hard_pity {
            return Err(Error::InvalidPity {
                category,
                got,
                hard_pity,
            });
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
