//! Utility functions for identifiers and timestamps.

mod ids;
pub mod timestamps;

pub use ids::{commit_token, commit_token_with, generate_id, COMMIT_TOKEN_LEN};
pub use timestamps::{
    format_date, format_datetime, format_time, iso_timestamp, now_utc, Timestamp,
};
