//! Command implementations
//!
//! Each module corresponds to one of the CLI flags.

pub mod clean;
pub mod send;
pub mod setup;

pub use clean::run as clean_run;
pub use send::run as send_run;
pub use setup::run as setup_run;
