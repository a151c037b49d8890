mod journal;
pub use journal::JournalHook;

mod view;
pub use view::{log_status, message_for};
