//! Command implementations for mesh-cli

pub mod check;
pub mod device_id;
pub mod diff;
pub mod init;
pub mod migrate;

pub use check::run_check;
pub use device_id::run_device_id;
pub use diff::run_diff;
pub use init::run_init;
pub use migrate::run_migrate;
