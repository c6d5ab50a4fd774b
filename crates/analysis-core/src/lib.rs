pub mod error;
pub mod format;
pub mod metric;
pub mod rules;
pub mod traits;
pub mod types;

pub use error::*;
pub use metric::Metric;
pub use traits::*;
pub use types::*;
