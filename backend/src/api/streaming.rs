//! Streaming relay for Server-Sent Events (SSE)
//!
//! Forwards a chunk source to the HTTP response body as chunks arrive. The
//! relay knows nothing about the upstream client: any `Stream` of byte chunks
//! can be relayed, which is how the tests drive it.

use crate::error::ProxyError;
use async_stream::stream;
use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::Response,
};
use futures_util::{pin_mut, stream::Stream, StreamExt};

/// Build a `text/event-stream` response whose body relays `source`
///
/// # Arguments
/// * `source` - Upstream chunks, in arrival order
///
/// # Returns
/// * `Result<Response, ProxyError>` - SSE HTTP response or error
pub fn create_sse_response<S, E>(source: S) -> Result<Response, ProxyError>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(relay(source))
        .map_err(|e| ProxyError::Internal(format!("Failed to build SSE response: {}", e)))
}

/// Wrap `source` into a streaming body, one frame per chunk
pub fn relay<S, E>(source: S) -> Body
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    Body::from_stream(relay_stream(source))
}

fn relay_stream<S, E>(source: S) -> impl Stream<Item = Result<Bytes, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    stream! {
        let mut progress = RelayProgress::default();
        pin_mut!(source);

        while let Some(chunk) = source.next().await {
            match chunk {
                Ok(bytes) => {
                    progress.chunks += 1;
                    progress.bytes += bytes.len();
                    yield Ok(bytes);
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        chunks = progress.chunks,
                        "Upstream stream failed mid-relay"
                    );
                    progress.finished = true;
                    yield Err(e);
                    return;
                }
            }
        }

        progress.finished = true;
        tracing::debug!(
            chunks = progress.chunks,
            bytes = progress.bytes,
            "Relay complete"
        );
    }
}

/// Tracks relay progress; logs if the body is dropped before the source ends
#[derive(Default)]
struct RelayProgress {
    chunks: usize,
    bytes: usize,
    finished: bool,
}

impl Drop for RelayProgress {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(
                chunks = self.chunks,
                bytes = self.bytes,
                "Caller disconnected, relay stopped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io;
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::ReceiverStream;

    #[tokio::test]
    async fn test_relays_chunks_in_order() {
        let chunks = vec!["data: a\n\n", "data: b\n\n", "data: [DONE]\n\n"];
        let source = stream::iter(
            chunks
                .clone()
                .into_iter()
                .map(|c| Ok::<_, io::Error>(Bytes::from_static(c.as_bytes()))),
        );

        let mut body = relay(source).into_data_stream();
        let mut received = Vec::new();
        while let Some(frame) = body.next().await {
            received.push(frame.unwrap());
        }

        let expected: Vec<Bytes> = chunks
            .into_iter()
            .map(|c| Bytes::from_static(c.as_bytes()))
            .collect();
        assert_eq!(received, expected);
    }

    #[tokio::test]
    async fn test_first_chunk_arrives_before_source_completes() {
        let (tx, rx) = mpsc::channel::<Result<Bytes, io::Error>>(4);
        let mut body = relay(ReceiverStream::new(rx)).into_data_stream();

        tx.send(Ok(Bytes::from_static(b"first"))).await.unwrap();
        let first = body.next().await.unwrap().unwrap();
        assert_eq!(first, Bytes::from_static(b"first"));

        // The source is still open; send the rest and close it.
        tx.send(Ok(Bytes::from_static(b"second"))).await.unwrap();
        drop(tx);

        let second = body.next().await.unwrap().unwrap();
        assert_eq!(second, Bytes::from_static(b"second"));
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn test_source_error_ends_body() {
        let source = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            Ok(Bytes::from_static(b"never sent")),
        ]);

        let mut body = relay(source).into_data_stream();
        assert_eq!(
            body.next().await.unwrap().unwrap(),
            Bytes::from_static(b"partial")
        );
        assert!(body.next().await.unwrap().is_err());
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn test_dropping_body_releases_source() {
        let (tx, rx) = mpsc::channel::<Result<Bytes, io::Error>>(4);
        let mut body = relay(ReceiverStream::new(rx)).into_data_stream();

        tx.send(Ok(Bytes::from_static(b"hello"))).await.unwrap();
        body.next().await.unwrap().unwrap();
        drop(body);

        // The receiver went away with the body, so the producer sees a closed channel.
        tx.closed().await;
        assert!(tx.send(Ok(Bytes::from_static(b"late"))).await.is_err());
    }

    #[tokio::test]
    async fn test_sse_response_headers() {
        let source = stream::iter(vec![Ok::<_, io::Error>(Bytes::from_static(b"x"))]);
        let response = create_sse_response(source).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache"
        );
    }
}
