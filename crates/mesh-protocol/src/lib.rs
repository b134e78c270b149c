//! Protocol-level primitives shared by meshsync components.
//!
//! Currently this is the device identity: a fixed-length digest of a
//! device's certificate, with a checked, human-friendly textual form.

pub mod device_id;
pub mod error;
mod luhn;

pub use device_id::{DEVICE_ID_LEN, DeviceId};
pub use error::{Error, Result};
