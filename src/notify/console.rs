use async_trait::async_trait;
use console::style;
use crate::errors::ReporterError;
use super::channel::NotificationChannel;

/// Prints reports to stdout instead of delivering them.
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for ConsoleChannel {
    async fn send(&self, text: &str) -> Result<(), ReporterError> {
        println!("{}", style("── closed bugs report (dry run) ──").dim());
        print!("{}", text);
        Ok(())
    }

    fn channel_name(&self) -> &str { "console" }
}
