use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::read_structured_file;
use crate::error::{Error, Result};
use crate::models::{BannerTag, Category};

const BUILTIN_CATALOG: &str = include_str!("../data/banners.toml");

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Banner {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub tag: BannerTag,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Banner {
    /// Whether the whole banner runs inside `[from, to]`.
    pub fn within(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start >= from && self.end <= to
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    banners: Vec<Banner>,
}

/// Read-only banner table with a name index.
#[derive(Clone, Debug)]
pub struct Catalog {
    banners: Vec<Banner>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(banners: Vec<Banner>) -> Result<Self> {
        if banners.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        let mut index = HashMap::with_capacity(banners.len());
        for (idx, banner) in banners.iter().enumerate() {
            if banner.end < banner.start {
                return Err(Error::InvalidBannerDates(banner.name.clone()));
            }
            if index.insert(banner.name.clone(), idx).is_some() {
                return Err(Error::DuplicateBannerName(banner.name.clone()));
            }
        }
        Ok(Self { banners, index })
    }

    pub fn builtin() -> Result<Self> {
        let file: CatalogFile = toml::from_str(BUILTIN_CATALOG).map_err(|err| {
            Error::ConfigParse(format!("failed to parse built-in catalog: {}", err))
        })?;
        Self::new(file.banners)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file: CatalogFile = read_structured_file(path)?;
        Self::new(file.banners)
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    pub fn get(&self, idx: usize) -> &Banner {
        &self.banners[idx]
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
