//! Clock adapters.
//!
//! `SystemClock` lives next to the port. `ManualClock` lets tests move time
//! forward to exercise entry expiry.

mod manual;

pub use manual::ManualClock;
