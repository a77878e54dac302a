//! # stack-auth
//!
//! Authentication and authorization for the Stack document service.
//!
//! ## Modules
//!
//! - `jwt`: HS256 bearer token creation and validation
//! - `acl`: folder access resolution from ownership and share entries

pub mod acl;
pub mod jwt;

pub use acl::{AclChecker, AccessSource};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
