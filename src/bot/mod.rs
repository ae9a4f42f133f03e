//! Command recognition and reply orchestration

mod command;
mod dispatcher;

pub use command::{CommandContext, ReplyTarget, TriggerCommand};
pub use dispatcher::{DispatchOutcome, Dispatcher};
