//! Notifications the engine emits for transient UI feedback.
//!
//! The engine has no notion of time; a front-end decides how long an
//! error or success decoration stays visible.

use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// An evaluation or function application failed.
    Error { message: String },
    /// An operation completed; `message` may be empty.
    Success { message: String },
    /// Memory became zero or non-zero.
    MemoryChanged { active: bool },
}

impl EngineEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }
}

/// Callback receiving engine events.
pub type EventListener = Arc<dyn Fn(&EngineEvent) + Send + Sync>;
