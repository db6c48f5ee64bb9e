//! Output notification for the shell
//!
//! Output goes through a trait so tests and other front ends can capture it.

/// Trait for handling shell output notifications
pub trait ShellNotifier: Send + Sync {
    /// Handle regular output
    fn on_output(&self, content: &str);

    /// Handle error output
    fn on_error(&self, content: &str);

    /// Handle a rendered query result with timing information
    fn on_result(&self, table: &str, matched: usize, duration_ms: u64);
}

/// Console notifier
#[derive(Debug, Default)]
pub struct DefaultNotifier;

impl DefaultNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ShellNotifier for DefaultNotifier {
    fn on_output(&self, content: &str) {
        if !content.is_empty() {
            println!("{content}");
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{content}");
    }

    fn on_result(&self, table: &str, matched: usize, duration_ms: u64) {
        if matched == 0 {
            println!("=> no matches ({duration_ms}ms)");
        } else {
            print!("{table}");
            println!("=> {matched} matches ({duration_ms}ms)");
        }
    }
}
