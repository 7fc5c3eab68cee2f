//! Terminal host for the notification channel
//!
//! Renders the orchestrator's notification stream on a terminal: error
//! dialogs go to stderr, confirmation prompts are answered from stdin, and
//! view transitions print a hint (the full app-selection view belongs to the
//! GUI shell, not this binary).

use std::io::Write;

use tokio::sync::mpsc;
use tracing::debug;

use patchbay_app::Notification;

/// Drain the notification stream until the orchestrator is dropped.
pub async fn run(mut rx: mpsc::UnboundedReceiver<Notification>) {
    while let Some(notification) = rx.recv().await {
        match notification {
            Notification::PropertyChanged(name) => {
                debug!("property changed: {}", name);
            }
            Notification::ErrorDialog { title, text, cause } => {
                eprintln!("error: {title}");
                eprintln!("  {text}");
                eprintln!("  cause: {cause}");
            }
            Notification::Confirm {
                title,
                text,
                ok_label,
                reply,
            } => {
                let answer = prompt(&title, &text, &ok_label).await;
                let _ = reply.send(answer);
            }
            Notification::ViewTransition { first_launch } => {
                debug!("view transition requested, first_launch={}", first_launch);
                println!("To change the tracked app, set `app_id` in config.toml and rerun.");
            }
        }
    }
}

async fn prompt(title: &str, text: &str, ok_label: &str) -> bool {
    println!("{title}");
    println!("{text}");
    print!("{ok_label}? [y/N] ");
    let _ = std::io::stdout().flush();

    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await;

    match line {
        Ok(Ok(line)) => parse_answer(&line),
        _ => false,
    }
}

/// "y"/"yes" (any case) accepts; everything else, including EOF, declines.
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("YES"));
        assert!(parse_answer("  yes  "));
        assert!(!parse_answer(""));
        assert!(!parse_answer("n\n"));
        assert!(!parse_answer("yep"));
    }
}
