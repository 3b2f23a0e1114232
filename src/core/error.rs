/// Error taxonomy for the console core and the single-message error strip

use thiserror::Error;

use crate::core::resource::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Engine could not be reached while setting up the session
    #[error("container engine unreachable: {0}")]
    EngineUnreachable(String),

    #[error("{operation} {kind} failed: {message}")]
    EngineCallFailed {
        kind: ResourceKind,
        operation: &'static str,
        message: String,
    },

    /// Input that does not apply to the current focus state
    #[error("invalid transition: {input} while {from}")]
    InvalidTransition {
        from: &'static str,
        input: &'static str,
    },

    #[error("row {index} out of range (list has {len} rows)")]
    OutOfRange { index: usize, len: usize },
}

impl ConsoleError {
    pub fn engine(kind: ResourceKind, operation: &'static str, err: impl std::fmt::Display) -> Self {
        ConsoleError::EngineCallFailed {
            kind,
            operation,
            message: err.to_string(),
        }
    }
}

pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;

/// Most recent engine failure. A new failure overwrites the previous one.
#[derive(Debug, Default, Clone)]
pub struct ErrorSlot {
    message: Option<String>,
}

impl ErrorSlot {
    pub fn set(&mut self, err: &ConsoleError) {
        self.message = Some(err.to_string());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_slot_overwrites() {
        let mut slot = ErrorSlot::default();
        assert_eq!(slot.message(), None);

        slot.set(&ConsoleError::engine(ResourceKind::Image, "remove", "conflict"));
        slot.set(&ConsoleError::engine(ResourceKind::Volume, "list", "timeout"));
        assert_eq!(slot.message(), Some("list volume failed: timeout"));

        slot.clear();
        assert_eq!(slot.message(), None);
    }
}
