use std::fmt::{self, Write};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::models::{Category, SimConfig};
use crate::stats::{BannerReport, BannerStatistics, SimulationReport};

pub trait Formatter {
    fn write(&self, report: &SimulationReport) -> Result<String>;
}

/// Per-banner breakdown with every statistic.
pub struct HumanFormatter;

/// One line per banner.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, report: &SimulationReport) -> Result<String> {
        render(|out| {
            write_metadata(out, report)?;
            writeln!(out, "Banners:")?;
            for banner in &report.banner_statistics {
                write_heading(out, banner)?;
                match &banner.statistics {
                    Some(stats) => write_statistics(out, stats)?,
                    None => writeln!(out, "  no data: banner ended before it was reached")?,
                }
            }
            Ok(())
        })
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, report: &SimulationReport) -> Result<String> {
        render(|out| {
            write_metadata(out, report)?;
            writeln!(out, "Summary:")?;
            for banner in &report.banner_statistics {
                match &banner.statistics {
                    Some(stats) => writeln!(
                        out,
                        "{}: {:.2}% success (avg pulls: {:.1}, p90 pulls: {:.1})",
                        banner.name, stats.success_rate, stats.avg_pulls, stats.p90_pulls
                    )?,
                    None => writeln!(out, "{}: no data", banner.name)?,
                }
            }
            Ok(())
        })
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, report: &SimulationReport) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(report).map_err(|err| Error::Encode(err.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

fn render<F>(build: F) -> Result<String>
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    build(&mut out).map_err(|err| Error::Encode(err.to_string()))?;
    Ok(out)
}

fn write_metadata(out: &mut String, report: &SimulationReport) -> fmt::Result {
    writeln!(out, "Metadata:")?;
    writeln!(out, "trials: {}", report.total_simulations)?;
    writeln!(out, "seed: {}", report.seed)?;
    writeln!(out, "start_date: {}", report.start_date)?;
    writeln!(out, "success_rate: {:.2}%", report.success_rate)
}

fn write_heading(out: &mut String, banner: &BannerReport) -> fmt::Result {
    writeln!(
        out,
        "{} ({}, {}) {} to {}",
        banner.name, banner.category, banner.banner_tag, banner.start_date, banner.end_date
    )
}

fn write_statistics(out: &mut String, stats: &BannerStatistics) -> fmt::Result {
    writeln!(out, "  duration: {} days", stats.duration_days)?;
    writeln!(out, "  success_rate: {:.2}%", stats.success_rate)?;
    writeln!(
        out,
        "  pulls: avg {:.1}, median {:.1}, p10 {:.1}, p50 {:.1}, p90 {:.1}",
        stats.avg_pulls, stats.median_pulls, stats.p10_pulls, stats.p50_pulls, stats.p90_pulls
    )?;
    writeln!(
        out,
        "  diamonds_spent: avg {:.0}, median {:.0}, p10 {:.0}, p50 {:.0}, p90 {:.0}",
        stats.avg_diamonds,
        stats.median_diamonds,
        stats.p10_diamonds,
        stats.p50_diamonds,
        stats.p90_diamonds
    )?;
    writeln!(out, "  base_copies: avg {:.2}", stats.avg_base_copies)?;
    writeln!(
        out,
        "  gained: {:.0} diamonds, {:.1} UR tickets, {:.1} SP tickets",
        stats.total_diamonds_gained, stats.free_ur_tickets_gained, stats.free_sp_tickets_gained
    )?;
    writeln!(
        out,
        "  milestones: {:.1} tickets, 200-pull copy {:.1}%",
        stats.milestone_tickets_gained,
        stats.milestone_copies_rate * 100.0
    )?;
    writeln!(
        out,
        "  remaining: {:.0} diamonds (median {:.0}), {:.1} UR tickets (median {:.1}), {:.1} SP tickets (median {:.1})",
        stats.avg_remaining_diamonds,
        stats.median_remaining_diamonds,
        stats.avg_remaining_ur_tickets,
        stats.median_remaining_ur_tickets,
        stats.avg_remaining_sp_tickets,
        stats.median_remaining_sp_tickets
    )
}

pub fn describe_config(config: &SimConfig, catalog: &Catalog) -> Result<String> {
    render(|out| write_config(out, config, catalog))
}

fn write_config(out: &mut String, config: &SimConfig, catalog: &Catalog) -> fmt::Result {
    match config.start_date {
        Some(date) => writeln!(out, "Start date: {}", date)?,
        None => writeln!(out, "Start date: today")?,
    }
    writeln!(out, "Trials: {}", config.num_sims)?;
    match config.seed {
        Some(seed) => writeln!(out, "Seed: {}", seed)?,
        None => writeln!(out, "Seed: random")?,
    }
    writeln!(
        out,
        "Mode: {}",
        if config.parallel { "parallel" } else { "sequential" }
    )?;
    writeln!(out, "Diamonds: {}", config.diamonds)?;
    writeln!(out, "Daily income: {}", config.daily_income)?;
    let (tickets, pity, free) = (config.tickets(), config.pity(), config.free_tickets());
    for category in Category::ALL {
        writeln!(
            out,
            "{}: {} tickets, pity {}, {} free per banner",
            category,
            tickets.get(category),
            pity.get(category),
            free.get(category)
        )?;
    }
    writeln!(out, "Targets:")?;
    for target in &config.targeted_banners {
        match catalog.position(&target.name) {
            Some(idx) => {
                let banner = catalog.get(idx);
                writeln!(
                    out,
                    "- {} x{} ({}, {} to {})",
                    target.name, target.copies, banner.category, banner.start, banner.end
                )?;
            }
            None => writeln!(out, "- {} x{} (not in catalog)", target.name, target.copies)?,
        }
    }
    Ok(())
}

pub fn list_banners(catalog: &Catalog) -> Result<String> {
    render(|out| {
        for (idx, banner) in catalog.banners().iter().enumerate() {
            writeln!(
                out,
                "{}. {} ({}, {}) {} to {}",
                idx + 1,
                banner.name,
                banner.category,
                banner.tag,
                banner.start,
                banner.end
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BannerTag;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn report() -> SimulationReport {
        SimulationReport {
            success_rate: 50.0,
            total_simulations: 2,
            seed: 3,
            start_date: date(1, 1),
            banner_statistics: vec![
                BannerReport {
                    name: "Opening Ace".to_string(),
                    category: Category::Ur,
                    banner_tag: BannerTag::NewRelease,
                    start_date: date(1, 5),
                    end_date: date(1, 19),
                    statistics: Some(BannerStatistics {
                        samples: 2,
                        duration_days: 14,
                        success_rate: 50.0,
                        avg_pulls: 75.5,
                        median_pulls: 75.5,
                        p10_pulls: 62.1,
                        p50_pulls: 75.5,
                        p90_pulls: 88.9,
                        avg_diamonds: 11_325.0,
                        median_diamonds: 11_325.0,
                        p10_diamonds: 9_315.0,
                        p50_diamonds: 11_325.0,
                        p90_diamonds: 13_335.0,
                        avg_remaining_diamonds: 75.0,
                        median_remaining_diamonds: 75.0,
                        avg_remaining_ur_tickets: 0.0,
                        median_remaining_ur_tickets: 0.0,
                        avg_remaining_sp_tickets: 1.0,
                        median_remaining_sp_tickets: 1.0,
                        total_diamonds_gained: 1_260.0,
                        free_ur_tickets_gained: 5.0,
                        free_sp_tickets_gained: 0.0,
                        milestone_tickets_gained: 7.0,
                        milestone_copies_rate: 0.0,
                        avg_base_copies: 0.5,
                    }),
                },
                BannerReport {
                    name: "Past Event".to_string(),
                    category: Category::Sp,
                    banner_tag: BannerTag::Rebanner,
                    start_date: date(1, 1),
                    end_date: date(1, 3),
                    statistics: None,
                },
            ],
        }
    }

    #[test]
    fn summary_lists_each_banner() {
        let expected = concat!(
            "Metadata:\n",
            "trials: 2\n",
            "seed: 3\n",
            "start_date: 2026-01-01\n",
            "success_rate: 50.00%\n",
            "Summary:\n",
            "Opening Ace: 50.00% success (avg pulls: 75.5, p90 pulls: 88.9)\n",
            "Past Event: no data\n",
        );
        assert_eq!(SummaryFormatter.write(&report()).unwrap(), expected);
    }

    #[test]
    fn human_output_includes_breakdown() {
        let output = HumanFormatter.write(&report()).unwrap();
        assert!(output.contains("Opening Ace (UR, new release) 2026-01-05 to 2026-01-19\n"));
        assert!(output.contains("  pulls: avg 75.5, median 75.5, p10 62.1, p50 75.5, p90 88.9\n"));
        assert!(output.contains("  gained: 1260 diamonds, 5.0 UR tickets, 0.0 SP tickets\n"));
        assert!(output.contains(
            "Past Event (SP, rebanner) 2026-01-01 to 2026-01-03\n  no data: banner ended before it was reached\n"
        ));
    }

    #[test]
    fn json_output_uses_date_strings() {
        let output = JsonFormatter.write(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["banner_statistics"][0]["start_date"], "2026-01-05");
        assert_eq!(value["banner_statistics"][0]["banner_tag"], "new-release");
        assert!(value["banner_statistics"][1]["statistics"].is_null());
    }

    #[test]
    fn render_maps_format_failures_to_encode_errors() {
        let err = render(|_| Err(fmt::Error)).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
        assert!(err.to_string().starts_with("failed to encode report"));
    }

    #[test]
    fn describe_config_lists_targets() {
        let catalog = Catalog::new(vec![crate::catalog::Banner {
            name: "Opening Ace".to_string(),
            category: Category::Ur,
            tag: BannerTag::NewRelease,
            start: date(1, 5),
            end: date(1, 19),
        }])
        .unwrap();
        let config = SimConfig {
            targeted_banners: vec![
                crate::models::TargetConfig {
                    name: "Opening Ace".to_string(),
                    copies: 2,
                },
                crate::models::TargetConfig {
                    name: "Nobody".to_string(),
                    copies: 1,
                },
            ],
            ..SimConfig::default()
        };
        let output = describe_config(&config, &catalog).unwrap();
        assert!(output.starts_with("Start date: today\nTrials: 10000\nSeed: random\n"));
        assert!(output.ends_with(concat!(
            "Targets:\n",
            "- Opening Ace x2 (UR, 2026-01-05 to 2026-01-19)\n",
            "- Nobody x1 (not in catalog)\n",
        )));
    }

    #[test]
    fn list_banners_numbers_from_one() {
        let catalog = Catalog::new(vec![crate::catalog::Banner {
            name: "Opening Ace".to_string(),
            category: Category::Ur,
            tag: BannerTag::NewRelease,
            start: date(1, 5),
            end: date(1, 19),
        }])
        .unwrap();
        assert_eq!(
            list_banners(&catalog).unwrap(),
            "1. Opening Ace (UR, new release) 2026-01-05 to 2026-01-19\n"
        );
    }
}
