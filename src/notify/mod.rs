pub mod channel;
pub mod slack;
pub mod console;

pub use channel::{create_channel, NotificationChannel};
pub use slack::SlackChannel;
pub use console::ConsoleChannel;
