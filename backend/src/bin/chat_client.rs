//! Command-line client for a running chat proxy
//! Sends one question and prints the streamed answer as it arrives.
//!
//! Usage: chat_client [--url URL] <question...>
//! The URL defaults to $CHAT_PROXY_URL, then http://127.0.0.1:8080/chat.

use futures_util::StreamExt;
use library_chat_proxy::chat::{ChatMessage, SseDecoder, SseEvent};
use serde_json::{json, Value};
use std::env;
use std::io::{self, Write};

const DEFAULT_URL: &str = "http://127.0.0.1:8080/chat";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut url = env::var("CHAT_PROXY_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    if args.first().map(String::as_str) == Some("--url") {
        if args.len() < 2 {
            return Err("--url needs a value".into());
        }
        url = args.remove(1);
        args.remove(0);
    }

    if args.is_empty() {
        eprintln!("Usage: chat_client [--url URL] <question...>");
        return Err("No question given".into());
    }
    let question = args.join(" ");

    let body = json!({ "messages": [ChatMessage::user(question)] });
    let response = reqwest::Client::new().post(&url).json(&body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(text);
        eprintln!("✗ Proxy returned {}: {}", status.as_u16(), message);
        return Err(format!("Request failed with status {}", status.as_u16()).into());
    }

    let mut decoder = SseDecoder::new();
    let mut stream = response.bytes_stream();
    let mut stdout = io::stdout();

    'relay: while let Some(chunk) = stream.next().await {
        for event in decoder.push(&chunk?) {
            match event {
                SseEvent::Delta(text) => {
                    print!("{}", text);
                    stdout.flush()?;
                }
                SseEvent::Done => break 'relay,
            }
        }
    }
    if let Some(SseEvent::Delta(text)) = decoder.finish() {
        print!("{}", text);
    }
    println!();

    Ok(())
}
