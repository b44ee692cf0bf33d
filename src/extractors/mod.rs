pub mod json;
pub mod token;

pub use json::ApiJson;
pub use token::PresentedToken;
