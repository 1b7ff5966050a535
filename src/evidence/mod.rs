//! Evidence gathering for proficiency assessment.
//!
//! Provides read-only probes over externally-owned sources:
//! - Coverage index (is the domain documented anywhere?)
//! - Mistake log (recorded gotchas mentioning the domain)
//! - Completed-work directory (stories by this agent in this domain)
//! - Brief repository (does a remedial brief already exist?)

mod aggregator;
mod matcher;
pub(crate) mod read;
mod types;

pub use aggregator::*;
pub use matcher::*;
pub use types::*;
