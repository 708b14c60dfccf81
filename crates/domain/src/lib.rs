#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod analysis;
mod attendance;
mod config;
mod error;
mod lookup;
mod metrics;
mod statistics;
mod strength;
mod workout;

pub use analysis::*;
pub use attendance::*;
pub use config::*;
pub use error::*;
pub use lookup::*;
pub use metrics::*;
pub use statistics::*;
pub use strength::*;
pub use workout::*;
