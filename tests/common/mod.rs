#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub const CATALOG: &str = r#"
[[banners]]
name = "Opening Ace"
category = "UR"
start = "2026-03-01"
end = "2026-03-15"

[[banners]]
name = "Side Story"
category = "SP"
tag = "rebanner"
start = "2026-03-15"
end = "2026-03-29"

[[banners]]
name = "Past Event"
category = "SP"
start = "2026-01-01"
end = "2026-01-14"
"#;

pub fn write_temp_file(contents: &str, extension: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    path.push(format!(
        "gacha-sim-{}-{}-{}.{}",
        std::process::id(),
        nanos,
        count,
        extension
    ));
    fs::write(&path, contents).expect("temp file write should succeed");
    path
}

pub fn catalog_path() -> String {
    write_temp_file(CATALOG, "toml")
        .to_str()
        .expect("temp path should be utf-8")
        .to_string()
}
