pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod injury_scraper;
pub mod matcher;
pub mod roster;
pub mod teams;
pub mod types;
pub mod utils;

pub use client::InjuredSuspendedClient;
pub use error::ScrapeError;
pub use types::{Championship, OutageType, Player, Position};
