//! Authentication and authorization
//!
//! - [`JwtService`] - token issue/verify, principal resolution
//! - [`CurrentUser`] - the authenticated principal
//! - [`extractor::AuthContext`] - request extractor (anonymous on failure)
//! - [`policy`] - pure role/ownership decision functions

pub mod extractor;
pub mod jwt;
pub mod policy;

pub use extractor::AuthContext;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use policy::{Denial, ListScope, UpdateGrant};
