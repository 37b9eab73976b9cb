//! Terminal chat against a running proxy.
//! Run with: cargo run --bin sentinel-chat -- [--copilot] [--url http://127.0.0.1:3000]

use anyhow::Context;
use risk_sentinel::client::{ChatSession, HttpChatTransport, Rejection, Role, SendOutcome, Widget};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_URL: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut widget = Widget::Floating;
    let mut url = std::env::var("SENTINEL_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--copilot" => widget = Widget::Copilot,
            "--url" => url = args.next().context("--url needs a value")?,
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let transport = HttpChatTransport::new(&url).context("building HTTP client")?;
    let session = ChatSession::new(widget, transport);

    for message in session.messages().await {
        println!("{}: {}", message.role, message.content);
    }
    print_suggestions(&session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(index) = line.trim().strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            match session.choose_suggestion(index.saturating_sub(1)).await {
                Some(choice) => println!("> {choice}"),
                None => {
                    println!("(no such suggestion)");
                    continue;
                }
            }
        } else {
            session.set_input(line).await;
        }

        match session.submit().await {
            SendOutcome::Replied(reply) => println!("{}: {}", Role::Assistant, reply.content),
            SendOutcome::Rejected(Rejection::EmptyInput) => {}
            SendOutcome::Rejected(Rejection::Pending) => println!("(still waiting for the last reply)"),
        }
    }

    Ok(())
}

async fn print_suggestions(session: &ChatSession<HttpChatTransport>) {
    let suggestions = session.visible_suggestions().await;
    if suggestions.is_empty() {
        return;
    }
    println!("Suggested questions:");
    for (i, s) in suggestions.iter().enumerate() {
        println!("  /{} {s}", i + 1);
    }
}
