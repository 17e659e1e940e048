//! SQLite-backed persistence for rounds and the leaderboard.
//!
//! [`SqliteRoundStore`] implements the
//! [`RoundStore`](arena_application::RoundStore) port. Writes are retried on
//! lock contention according to [`RetryPolicy`].

mod retry;
mod rows;
mod schema;
mod sqlite_store;

pub use retry::RetryPolicy;
pub use schema::SUBMISSION_FORMAT;
pub use sqlite_store::{SqliteRoundStore, StoreOptions};
