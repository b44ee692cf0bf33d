pub mod types;
pub mod loader;
pub mod sources;
pub mod validator;
pub mod resolved;

pub use types::*;
pub use loader::*;
pub use sources::*;
pub use validator::*;
pub use resolved::*;
