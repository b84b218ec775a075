//! Streamed completion decoding
//!
//! The upstream gateway streams OpenAI-style chunks as server-sent events:
//! `data: {"choices":[{"delta":{"content":"..."}}]}` lines terminated by
//! `data: [DONE]`. The proxy itself never decodes these; the decoder is used
//! by the command-line client and by tests that inspect relayed output.

use serde::Deserialize;

/// Stream termination marker
pub const SSE_DONE_SIGNAL: &str = "[DONE]";

/// A decoded event from the completion stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A piece of assistant text
    Delta(String),
    /// The upstream finished the completion
    Done,
}

#[derive(Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Incremental decoder for `data:` lines
///
/// Network chunks do not align with lines (or with UTF-8 boundaries), so a
/// partial trailing line is kept as raw bytes until the next `push`.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes and return every event completed by them
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(event) = decode_line(&String::from_utf8_lossy(&line)) {
                events.push(event);
            }
        }
        events
    }

    /// Decode whatever is left once the stream has ended
    pub fn finish(&mut self) -> Option<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        decode_line(&String::from_utf8_lossy(&rest))
    }
}

fn decode_line(line: &str) -> Option<SseEvent> {
    let line = line.trim_end_matches(['\n', '\r']);
    let data = line.strip_prefix("data:")?.trim_start();

    if data == SSE_DONE_SIGNAL {
        return Some(SseEvent::Done);
    }

    let chunk: CompletionChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::debug!(error = %e, "Skipping undecodable stream line");
            return None;
        }
    };

    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty())
        .map(SseEvent::Delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n\n",
            content
        )
    }

    #[test]
    fn test_decodes_deltas_and_done() {
        let mut decoder = SseDecoder::new();
        let input = format!("{}{}data: [DONE]\n\n", data("Hello"), data(" world"));

        let events = decoder.push(input.as_bytes());
        assert_eq!(
            events,
            vec![
                SseEvent::Delta("Hello".to_string()),
                SseEvent::Delta(" world".to_string()),
                SseEvent::Done,
            ]
        );
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let line = data("split");
        let (head, tail) = line.split_at(12);

        assert!(decoder.push(head.as_bytes()).is_empty());
        assert_eq!(
            decoder.push(tail.as_bytes()),
            vec![SseEvent::Delta("split".to_string())]
        );
    }

    #[test]
    fn test_skips_comments_and_role_only_chunks() {
        let mut decoder = SseDecoder::new();
        let input = concat!(
            ": keep-alive\n",
            "event: ping\n",
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n",
            "data: not json\n",
            "\n"
        );
        assert!(decoder.push(input.as_bytes()).is_empty());
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let line = data("📖");
        let bytes = line.as_bytes();
        let cut = line.find('📖').unwrap() + 2;

        assert!(decoder.push(&bytes[..cut]).is_empty());
        assert_eq!(
            decoder.push(&bytes[cut..]),
            vec![SseEvent::Delta("📖".to_string())]
        );
    }

    #[test]
    fn test_crlf_lines() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: [DONE]\r\n");
        assert_eq!(events, vec![SseEvent::Done]);
    }

    #[test]
    fn test_finish_flushes_last_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), Some(SseEvent::Done));
        assert_eq!(decoder.finish(), None);
    }
}
