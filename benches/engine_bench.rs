use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gacha_sim::catalog::Catalog;
use gacha_sim::engine::run_simulation;
use gacha_sim::models::{SimConfig, TargetConfig};

const TRIALS: u32 = 2_000;

fn build_config(catalog: &Catalog, targets: usize, parallel: bool) -> SimConfig {
    SimConfig {
        diamonds: 60_000,
        daily_income: 90,
        free_ur: 5,
        free_sp: 5,
        targeted_banners: catalog
            .banners()
            .iter()
            .take(targets)
            .map(|banner| TargetConfig {
                name: banner.name.clone(),
                copies: 1,
            })
            .collect(),
        num_sims: TRIALS,
        seed: Some(7),
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1),
        parallel,
        ..SimConfig::default()
    }
}

fn bench_engine(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("built-in catalog should parse");
    let mut group = c.benchmark_group("engine");

    for targets in [1, 4, catalog.len()] {
        for parallel in [false, true] {
            let mode = if parallel { "parallel" } else { "sequential" };
            let config = build_config(&catalog, targets, parallel);
            group.bench_with_input(
                BenchmarkId::new(mode, format!("{}x{}", TRIALS, targets)),
                &config,
                |b, config| {
                    b.iter(|| {
                        let report =
                            run_simulation(config, &catalog).expect("simulation should succeed");
                        black_box(report);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
