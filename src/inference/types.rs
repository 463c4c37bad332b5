//! Wire types for the chat function endpoint.
//!
//! ```text
//! POST <endpoint>   {"message": "..."}
//! 200 OK            {"reply": "..."}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatFunctionRequest<'a> {
    pub message: &'a str,
}

/// `reply` is optional on the wire so a body without it parses and can be
/// rejected with a clear error instead of a serde message.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatFunctionResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

/// Error body the chat function returns alongside non-2xx statuses.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatFunctionError {
    pub error: String,
}
