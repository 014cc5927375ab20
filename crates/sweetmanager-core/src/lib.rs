//! # SweetManager Core
//!
//! Foundational types shared by every SweetManager crate:
//!
//! - [`errors`]: the application error type and its HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
