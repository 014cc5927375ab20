//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`anonymous`]: the set of routes reachable without a token
//! - [`auth`]: token authentication and the [`AuthContext`](auth::AuthContext) extractor
//! - [`role`]: per-endpoint role filtering
//!
//! # Authorization Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `authorize_request` validates the token and resolves the user in the
//!    store of the token's role, then attaches an `AuthContext`
//! 3. `require_roles` checks the context against the endpoint's roles
//! 4. Handler executes if all checks pass
//!
//! Anonymous routes skip steps 2 and 3.

pub mod anonymous;
pub mod auth;
pub mod role;
