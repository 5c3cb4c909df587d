use thiserror::Error;

use crate::models::Category;

#[derive(Error, Debug)]
pub enum Error {
    #[error("num_sims must be greater than 0")]
    SimulationsZero,
    #[error("num_sims must be at most {max} (got {got})")]
    TooManySimulations { got: u32, max: u32 },
    #[error("{category} pity must be below {hard_pity} (got {got})")]
    InvalidPity {
        category: Category,
        got: u32,
        hard_pity: u32,
    },
    #[error("invalid target entry '{0}': expected name:copies")]
    InvalidTargetEntry(String),
    #[error("invalid copies in '{0}'")]
    InvalidCopies(String),
    #[error("banner index {index} out of range (catalog has {len} banners)")]
    BannerIndexOutOfRange { index: usize, len: usize },
    #[error("banner catalog must not be empty")]
    EmptyCatalog,
    #[error("duplicate banner name '{0}'")]
    DuplicateBannerName(String),
    #[error("banner '{0}' ends before it starts")]
    InvalidBannerDates(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("failed to encode report: {0}")]
    Encode(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
