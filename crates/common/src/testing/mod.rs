//! Testing utilities and helpers
//!
//! - **[`mocks`]**: in-memory [`TokenIssuer`](crate::auth::TokenIssuer)
//! - Clock mocking is re-exported from [`crate::time`]
//!
//! Enabled for this crate's own tests and, for downstream crates, through
//! the `test-utils` feature.

pub mod mocks;

pub use mocks::MockTokenIssuer;

pub use crate::time::{Clock, MockClock, SystemClock};
