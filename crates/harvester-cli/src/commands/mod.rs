//! Command implementations.

pub mod aggregate;
pub mod analyze;
pub mod fetch;
pub mod status;

pub use self::aggregate::execute_aggregate;
pub use self::analyze::execute_analyze;
pub use self::fetch::execute_fetch;
pub use self::status::execute_status;
