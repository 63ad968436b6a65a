// Lifecycle notifications: per-channel dispatch and the daily reminder batch.
pub mod dispatcher;
pub mod reminder;
pub mod templates;

pub use dispatcher::{dispatch, ChannelOutcome, DispatchResult, NotificationEvent, NotificationSummary};
pub use reminder::{run_reminder_batch, ReminderReport};
