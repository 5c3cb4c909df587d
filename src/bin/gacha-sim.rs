use gacha_sim::config::{self, Action, FormatArg};
use gacha_sim::engine;
use gacha_sim::error::Result;
use gacha_sim::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = config::parse_args()?;
    match config::build_action(args)? {
        Action::Run {
            config,
            catalog,
            format,
        } => {
            let report = engine::run_simulation(&config, &catalog)?;
            let formatter = formatter_for(&format);
            print!("{}", formatter.write(&report)?);
        }
        Action::ShowConfig { config, catalog } => {
            print!("{}", output::describe_config(&config, &catalog)?);
        }
        Action::ListBanners { catalog } => {
            print!("{}", output::list_banners(&catalog)?);
        }
    }
    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
