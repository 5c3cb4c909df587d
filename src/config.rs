use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use crate::catalog::Catalog;
use crate::engine::validate_config;
use crate::error::{Error, Result};
use crate::models::{SimConfig, TargetConfig};

#[derive(Parser, Debug)]
#[command(name = "gacha-sim", version, about = "Monte Carlo banner pull planner")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulation and print the report
    Run(RunArgs),
    /// Print the resolved request without running it
    ShowConfig(RunArgs),
    /// List the banner catalog
    ListBanners(CatalogArgs),
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct CatalogArgs {
    #[arg(long, help = "Banner catalog (.toml or .json); defaults to the built-in schedule")]
    pub catalog: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
    #[arg(long, help = "Request file (.toml or .json); flags override its values")]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub diamonds: Option<u64>,
    #[arg(long)]
    pub ur_tickets: Option<u32>,
    #[arg(long)]
    pub sp_tickets: Option<u32>,
    #[arg(long)]
    pub ur_pity: Option<u32>,
    #[arg(long)]
    pub sp_pity: Option<u32>,
    #[arg(long, help = "Free UR tickets per new-release UR banner")]
    pub free_ur: Option<u32>,
    #[arg(long, help = "Free SP tickets per new-release SP banner")]
    pub free_sp: Option<u32>,
    #[arg(long)]
    pub daily_income: Option<u64>,
    #[arg(
        long = "target",
        value_name = "NAME:COPIES",
        help = "Targeted banner by name or 1-based catalog index; repeatable. \
                An all-digit NAME is always read as an index"
    )]
    pub targets: Vec<String>,
    #[arg(long)]
    pub sims: Option<u32>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Simulated start date; defaults to today")]
    pub start_date: Option<NaiveDate>,
    #[arg(long, help = "Run trials on the current thread only")]
    pub sequential: bool,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long, help = "Shorthand for --format summary")]
    pub summary: bool,
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    #[default]
    Human,
    Summary,
    Json,
}

pub enum Action {
    Run {
        config: SimConfig,
        catalog: Catalog,
        format: FormatArg,
    },
    ShowConfig {
        config: SimConfig,
        catalog: Catalog,
    },
    ListBanners {
        catalog: Catalog,
    },
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Cli(err.to_string()),
    })
}

pub fn build_action(args: Args) -> Result<Action> {
    match args.command {
        Command::Run(run) => {
            let catalog = load_catalog(&run.catalog)?;
            let (config, format) = build_config(&run, &catalog)?;
            Ok(Action::Run {
                config,
                catalog,
                format,
            })
        }
        Command::ShowConfig(run) => {
            let catalog = load_catalog(&run.catalog)?;
            let (config, _) = build_config(&run, &catalog)?;
            Ok(Action::ShowConfig { config, catalog })
        }
        Command::ListBanners(args) => Ok(Action::ListBanners {
            catalog: load_catalog(&args)?,
        }),
    }
}

/// Layers command-line flags over the optional request file.
pub fn build_config(run: &RunArgs, catalog: &Catalog) -> Result<(SimConfig, FormatArg)> {
    let mut config = match &run.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    if let Some(value) = run.diamonds {
        config.diamonds = value;
    }
    if let Some(value) = run.ur_tickets {
        config.ur_tickets = value;
    }
    if let Some(value) = run.sp_tickets {
        config.sp_tickets = value;
    }
    if let Some(value) = run.ur_pity {
        config.ur_pity = value;
    }
    if let Some(value) = run.sp_pity {
        config.sp_pity = value;
    }
    if let Some(value) = run.free_ur {
        config.free_ur = value;
    }
    if let Some(value) = run.free_sp {
        config.free_sp = value;
    }
    if let Some(value) = run.daily_income {
        config.daily_income = value;
    }
    if !run.targets.is_empty() {
        config.targeted_banners = run
            .targets
            .iter()
            .map(|entry| parse_target(entry, catalog))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(value) = run.sims {
        config.num_sims = value;
    }
    if run.seed.is_some() {
        config.seed = run.seed;
    }
    if run.start_date.is_some() {
        config.start_date = run.start_date;
    }
    if run.sequential {
        config.parallel = false;
    }

    validate_config(&config)?;

    let format = if run.summary {
        FormatArg::Summary
    } else {
        run.format.clone()
    };
    Ok((config, format))
}

/// Parses `NAME:COPIES`. The split happens at the last colon so names may
/// contain colons; an all-digit name is read as a 1-based catalog index.
pub fn parse_target(entry: &str, catalog: &Catalog) -> Result<TargetConfig> {
    let trimmed = entry.trim();
    let (name, copies) = trimmed
        .rsplit_once(':')
        .ok_or_else(|| Error::InvalidTargetEntry(trimmed.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidTargetEntry(trimmed.to_string()));
    }
    let copies: u32 = copies
        .trim()
        .parse()
        .map_err(|_| Error::InvalidCopies(trimmed.to_string()))?;

    let name = if name.chars().all(|c| c.is_ascii_digit()) {
        let index: usize = name
            .parse()
            .map_err(|_| Error::InvalidTargetEntry(trimmed.to_string()))?;
        if index == 0 || index > catalog.len() {
            return Err(Error::BannerIndexOutOfRange {
                index,
                len: catalog.len(),
            });
        }
        catalog.get(index - 1).name.clone()
    } else {
        name.to_string()
    };

    Ok(TargetConfig { name, copies })
}

pub fn load_catalog(args: &CatalogArgs) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    }
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    read_structured_file(path)
}

/// Reads a TOML or JSON file, picking the parser by extension.
pub(crate) fn read_structured_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}
