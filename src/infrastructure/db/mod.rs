pub mod pool;
pub mod rows;
pub mod schema;

pub use pool::{Database, SqlDialect};
