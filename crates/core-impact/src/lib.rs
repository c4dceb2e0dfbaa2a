pub mod calculator;
pub mod dataset;
pub mod equivalences;
pub mod error;
pub mod models;
pub mod stats;

pub use calculator::*;
pub use dataset::*;
pub use equivalences::equivalences;
pub use models::*;
