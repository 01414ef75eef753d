//! Message types for prompt construction.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One message of a prompt.
///
/// Content is plain text: the stage engine mandates prose-only output and
/// sends prose-only prompts.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{Message, Role};
///
/// let message = Message {
///     role: Role::User,
///     content: "Hello!".to_string(),
/// };
///
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Shorthand for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Shorthand for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Shorthand for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
