mod account;
mod appointment;
mod article;
mod contact;
mod mood_log;
mod reminder;
pub mod serde_helpers;
mod snapshot;

pub use account::Account;
pub use appointment::Appointment;
pub use article::Article;
pub use contact::ContactMessage;
pub use mood_log::MoodLog;
pub use reminder::Reminder;
pub use snapshot::UserSnapshot;
