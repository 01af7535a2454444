use std::io::{self, BufRead, Write};

use async_trait::async_trait;

use common::session::UserInteraction;

/// Prompts and messages over stderr, answers over stdin. Keeps stdout
/// clean for node data so output stays pipeable.
#[derive(Debug, Default)]
pub struct TerminalInteraction;

impl TerminalInteraction {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserInteraction for TerminalInteraction {
    async fn confirm_discard(&self) -> bool {
        let answer = tokio::task::spawn_blocking(|| {
            eprint!("You have unsaved changes. Discard them? [y/N] ");
            let _ = io::stderr().flush();

            let mut line = String::new();
            match io::stdin().lock().read_line(&mut line) {
                Ok(_) => line,
                Err(_) => String::new(),
            }
        })
        .await
        .unwrap_or_default();

        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_error(&self, error: &dyn std::error::Error) {
        eprintln!("error: {}", error);
    }
}
