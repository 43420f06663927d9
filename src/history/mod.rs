//! Session history.
//!
//! Every session that ends, naturally or by being stopped, is recorded so
//! that past practice can be listed and summarized.

mod record;
mod storage;

pub use record::{HistorySummary, SessionRecord};
pub use storage::HistoryStorage;
