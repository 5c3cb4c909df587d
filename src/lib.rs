pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod output;
pub mod pull;
pub mod rates;
pub mod schedule;
pub mod stats;
