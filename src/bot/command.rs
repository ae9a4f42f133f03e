use std::fmt;

/// Opaque token identifying where a reply must be delivered
///
/// For LINE this is the event's reply token. It is passed through untouched;
/// an empty or stale token is the reply API's problem, not ours.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ReplyTarget(String);

impl ReplyTarget {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ReplyTarget {
    // Tokens are single-use credentials; keep them short in logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "ReplyTarget({}…)", prefix)
    }
}

/// One inbound text message and where to answer it
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub reply_target: ReplyTarget,
    pub text: String,
}

impl CommandContext {
    pub fn new(reply_target: ReplyTarget, text: impl Into<String>) -> Self {
        Self {
            reply_target,
            text: text.into(),
        }
    }
}

/// The single literal command the bot answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerCommand {
    normalized: String,
}

impl TriggerCommand {
    pub fn new(literal: &str) -> Self {
        Self {
            normalized: normalize(literal),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// True when `text`, trimmed and case-folded, equals the command exactly
    pub fn matches(&self, text: &str) -> bool {
        normalize(text) == self.normalized
    }
}

impl Default for TriggerCommand {
    fn default() -> Self {
        Self::new("/aivi")
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
