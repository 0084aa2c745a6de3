//! Common response shapes.

use serde::Serialize;
use utoipa::ToSchema;

/// Simple message response with a success flag.
///
/// Used by operational endpoints (seeding, bulk writes) where the caller
/// needs an outcome summary rather than an entity body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
