use std::sync::{Arc, Mutex};

/// Destination for user-facing messages
pub trait Out: Send + Sync {
    fn write(&self, message: &str);

    fn warn(&self, message: &str);
}

/// Console output: messages to stdout, warnings to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdOut;

impl Out for StdOut {
    fn write(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }
}

/// Records messages instead of printing them. Clones share the recording.
#[derive(Debug, Clone, Default)]
pub struct TestOut {
    messages: Arc<Mutex<Vec<String>>>,
    warnings: Arc<Mutex<Vec<String>>>,
}

impl TestOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Out for TestOut {
    fn write(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
