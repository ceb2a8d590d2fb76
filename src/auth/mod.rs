mod claims;
mod guard;
mod service;

pub use claims::{TokenClaims, inspect_token};
pub use guard::{require_auth, require_superuser};
pub use service::AuthService;
