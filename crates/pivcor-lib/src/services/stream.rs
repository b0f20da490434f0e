// Reply Streaming
// Slices a computed reply into a paced stream of text chunks
//
// Pacing is presentational only: the reply is fully computed before the
// first chunk is produced.

use std::time::Duration;

use async_stream::try_stream;
use futures::Stream;
use thiserror::Error;
use tokio::time::Instant;

/// Default characters per chunk
pub const DEFAULT_CHUNK_CHARS: usize = 5;
/// Default pause between chunks (milliseconds)
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 20;

/// Streaming cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPacing {
    pub chunk_chars: usize,
    pub delay: Duration,
}

impl Default for StreamPacing {
    fn default() -> Self {
        Self {
            chunk_chars: DEFAULT_CHUNK_CHARS,
            delay: Duration::from_millis(DEFAULT_CHUNK_DELAY_MS),
        }
    }
}

impl StreamPacing {
    /// No pauses, whole reply in one chunk
    pub fn immediate() -> Self {
        Self {
            chunk_chars: usize::MAX,
            delay: Duration::ZERO,
        }
    }
}

/// Split `text` into chunks of at most `chunk_chars` characters
pub fn chunk_text(text: &str, chunk_chars: usize) -> Vec<String> {
    let size = chunk_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Stream failure; ends the response body abnormally
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("Reply exceeded the request-duration ceiling after {sent}/{total} chunks")]
    DeadlineExceeded { sent: usize, total: usize },
}

/// Stream `text` with the given pacing.
///
/// When `deadline` passes, the stream yields `DeadlineExceeded` and ends, so
/// the caller sees a failed turn rather than a short reply.
pub fn paced_stream(
    text: String,
    pacing: StreamPacing,
    deadline: Option<Instant>,
) -> impl Stream<Item = Result<String, StreamError>> + Send + 'static {
    try_stream! {
        let chunks = chunk_text(&text, pacing.chunk_chars);
        let total = chunks.len();

        for (i, chunk) in chunks.into_iter().enumerate() {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    log::warn!("[chat] Reply stream exceeded its deadline after {}/{} chunks", i, total);
                    Err::<(), _>(StreamError::DeadlineExceeded { sent: i, total })?;
                }
            }

            yield chunk;

            if i + 1 < total && !pacing.delay.is_zero() {
                tokio::time::sleep(pacing.delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn test_chunk_text_respects_char_boundaries() {
        let chunks = chunk_text("Hi 🚀 there", 3);
        assert_eq!(chunks, vec!["Hi ", "🚀 t", "her", "e"]);
        assert_eq!(chunks.concat(), "Hi 🚀 there");
    }

    #[test]
    fn test_chunk_text_zero_size() {
        assert_eq!(chunk_text("abc", 0), vec!["a", "b", "c"]);
        assert!(chunk_text("", 5).is_empty());
    }

    #[tokio::test]
    async fn test_paced_stream_reassembles() {
        let text = "OPTIONS:Hi!|Web App Development".to_string();
        let pacing = StreamPacing {
            chunk_chars: 4,
            delay: Duration::from_millis(1),
        };
        let chunks: Vec<String> = paced_stream(text.clone(), pacing, None)
            .map(|c| c.unwrap())
            .collect()
            .await;
        assert_eq!(chunks.concat(), text);
        assert_eq!(chunks.len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_stream_fails_at_deadline() {
        let pacing = StreamPacing {
            chunk_chars: 1,
            delay: Duration::from_millis(20),
        };
        let deadline = Instant::now() + Duration::from_millis(50);
        let items: Vec<Result<String, StreamError>> =
            paced_stream("abcdefghij".to_string(), pacing, Some(deadline))
                .collect()
                .await;

        let (last, sent) = items.split_last().unwrap();
        assert!(!sent.is_empty());
        assert!(sent.iter().all(|c| c.is_ok()));
        assert_eq!(
            last,
            &Err(StreamError::DeadlineExceeded {
                sent: sent.len(),
                total: 10
            })
        );
    }

    #[tokio::test]
    async fn test_immediate_pacing_single_chunk() {
        let chunks: Vec<Result<String, StreamError>> =
            paced_stream("hello".to_string(), StreamPacing::immediate(), None)
                .collect()
                .await;
        assert_eq!(chunks, vec![Ok("hello".to_string())]);
    }
}
