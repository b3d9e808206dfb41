use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of every rejected request.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemovedBody {
    pub id: Uuid,
    pub message: String,
}
