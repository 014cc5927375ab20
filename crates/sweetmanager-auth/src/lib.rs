//! # SweetManager Auth
//!
//! Token handling for the SweetManager API.
//!
//! - [`role`]: the closed set of user roles ([`Role`])
//! - [`claims`]: the verified token payload ([`TokenClaim`]) and its wire form
//! - [`token`]: issuing and validating bearer tokens ([`TokenService`])
//!
//! # Example
//!
//! ```ignore
//! use sweetmanager_auth::{Role, TokenService};
//! use sweetmanager_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let token = tokens.issue(42, Role::Owner)?;
//!
//! match tokens.validate(&token) {
//!     Ok(claim) => println!("{} {}", claim.role, claim.subject_id),
//!     Err(e) => println!("rejected: {}", e),
//! }
//! ```

pub mod claims;
pub mod role;
pub mod token;

pub use claims::TokenClaim;
pub use role::{Role, UnknownRole};
pub use token::{TokenError, TokenService};
