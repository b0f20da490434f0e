// PIVCOR terminal chat client
// Talks to a running server through the widget protocol

use std::io::Write;

use pivcor_lib::models::{LEAD_MARKER_PREFIX, OPTIONS_PREFIX};
use pivcor_lib::services::widget::ChatWidget;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

fn print_help() {
    println!(
        r#"PIVCOR Chat v{}

USAGE:
    pivcor-chat [OPTIONS] [SERVER_URL]

OPTIONS:
    --help, -h      Print this help information
    --version, -v   Print version information

Type a message and press Enter. When options are listed, type a number to
pick one. An empty line or Ctrl+D quits. SERVER_URL defaults to {}."#,
        env!("CARGO_PKG_VERSION"),
        DEFAULT_SERVER
    );
}

/// Display text minus any trailing fragment that may still grow into a marker
fn settled(display: &str) -> &str {
    let marker = format!("\n\n{}", LEAD_MARKER_PREFIX);
    let tail: Vec<usize> = display
        .char_indices()
        .rev()
        .take(marker.len())
        .map(|(at, _)| at)
        .collect();
    // Longest pending fragment wins
    match tail.iter().rev().find(|&&at| marker.starts_with(&display[at..])) {
        Some(&at) => &display[..at],
        None => display,
    }
}

/// Map a numbered choice onto the listed options
fn resolve_choice(input: &str, options: &[String]) -> String {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| options.get(idx))
        .cloned()
        .unwrap_or_else(|| input.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::from_filename("../.env").or_else(|_| dotenvy::dotenv());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut server = DEFAULT_SERVER.to_string();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("pivcor-chat {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
            url => server = url.to_string(),
        }
    }

    let mut widget = ChatWidget::new(&server)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut options: Vec<String> = Vec::new();

    println!("Connected to {}. Say hi to start. 👋", server);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }
        let message = resolve_choice(&line, &options);

        let mut shown = 0usize;
        let result = widget
            .send(&message, |display| {
                // Options replies are rendered once complete
                if display.starts_with(OPTIONS_PREFIX) || OPTIONS_PREFIX.starts_with(display) {
                    return;
                }
                let visible = settled(display);
                if let Some(fresh) = visible.get(shown..) {
                    print!("{}", fresh);
                    let _ = std::io::stdout().flush();
                    shown = visible.len();
                }
            })
            .await;

        let turn = match result {
            Ok(turn) => turn,
            Err(e) => {
                eprintln!("\nFailed to send message. Please try again. ({})", e);
                continue;
            }
        };

        if turn.reply.options.is_empty() {
            if let Some(rest) = turn.reply.display.get(shown..) {
                print!("{}", rest);
            }
            println!();
        } else {
            println!("{}", turn.reply.display);
            for (i, option) in turn.reply.options.iter().enumerate() {
                println!("  [{}] {}", i + 1, option);
            }
        }
        if let Some(pending) = turn.submission {
            tokio::spawn(async move {
                if let Some(notice) = pending.notice().await {
                    eprintln!("\n! {}", notice);
                }
            });
        }
        options = turn.reply.options;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_choice() {
        let options = vec!["Web App Development".to_string(), "Headless E-Commerce".to_string()];
        assert_eq!(resolve_choice("2", &options), "Headless E-Commerce");
        assert_eq!(resolve_choice(" 1 ", &options), "Web App Development");
        assert_eq!(resolve_choice("3", &options), "3");
        assert_eq!(resolve_choice("0", &options), "0");
        assert_eq!(resolve_choice("Maria", &[]), "Maria");
    }

    #[test]
    fn test_settled_holds_back_marker_fragment() {
        assert_eq!(settled("Thanks!\n\nLEAD_"), "Thanks!");
        assert_eq!(settled("Thanks!\n"), "Thanks!");
        assert_eq!(settled("Thanks!\n\n"), "Thanks!");
        assert_eq!(settled("Thanks! 🚀"), "Thanks! 🚀");
        assert_eq!(settled("OK L"), "OK L");
    }
}
