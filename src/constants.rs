use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Hard cap on rows fetched for an AI-generated SELECT.
pub const MAX_CHAT_ROWS: usize = 50;

/// How many rows are serialized into the answer-formatting prompt.
pub const MAX_PROMPT_ROWS: usize = 5;
