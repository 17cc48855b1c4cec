//! Session authentication
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   TokenStore    │  identity + token + expiry estimate
//! └────────┬────────┘
//!          │
//!          └──► TokenIssuer   (POST username, receive token)
//! ```
//!
//! One identity is active per store. Authenticating again replaces it.

pub mod token_store;
pub mod traits;
pub mod types;

pub use token_store::TokenStore;
pub use traits::TokenIssuer;
pub use types::{AuthError, SessionToken, TokenRequest, TokenResponse};
