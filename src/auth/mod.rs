//! Token-based access control for the generated routes.

pub mod gate;
pub mod middleware;

pub use gate::{AuthGate, Credential, Principal};
pub use middleware::require_credential;
