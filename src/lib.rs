pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod store;

pub use error::{RankingError, RankingResult};
pub use ranking::{CancelHandle, RankingService, RequestContext};
