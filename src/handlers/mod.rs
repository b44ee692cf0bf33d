//! HTTP handlers for the generated CRUD routes, login/logout, and the API document.

pub mod auth;
pub mod docs;
pub mod entity;
