//! Response bodies shared by the fixed routes.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn message(text: impl Into<String>) -> Json<MessageBody> {
    Json(MessageBody { message: text.into() })
}
