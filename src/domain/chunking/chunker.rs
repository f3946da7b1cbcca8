use super::error::ChunkingError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Terminal punctuation followed by whitespace closes a sentence
const SENTENCE_BOUNDARY_PATTERN: &str = r"[.!?]+\s+";

/// A bounded fragment of narration text destined for one synthesis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub content: String,
    pub byte_size: usize,
}

impl Chunk {
    fn new(index: usize, content: String) -> Self {
        Self {
            index,
            byte_size: content.len(),
            content,
        }
    }

    /// A chunk holding a single sentence that alone exceeds the bound
    pub fn is_oversized(&self, max_bytes: usize) -> bool {
        self.byte_size > max_bytes
    }
}

fn sentence_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(SENTENCE_BOUNDARY_PATTERN).expect("sentence boundary pattern is valid")
    })
}

/// Split text into trimmed sentence units, in order.
///
/// Trailing text without terminal punctuation is returned as the last sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for mat in sentence_boundary().find_iter(text) {
        let sentence = text[last_end..mat.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        last_end = mat.end();
    }

    let remaining = text[last_end..].trim();
    if !remaining.is_empty() {
        sentences.push(remaining);
    }

    sentences
}

/// Pack sentences greedily into chunks of at most `max_bytes` UTF-8 bytes.
///
/// Sentences inside a chunk are joined with a single space. A sentence that
/// alone exceeds `max_bytes` is emitted as its own chunk, unmodified; the
/// synthesis provider decides whether to accept it.
pub fn chunk(text: &str, max_bytes: usize) -> Result<Vec<Chunk>, ChunkingError> {
    if max_bytes == 0 {
        return Err(ChunkingError::InvalidMaxBytes);
    }

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        // +1 for the joining space
        if !current.is_empty() && current.len() + 1 + sentence.len() > max_bytes {
            let index = chunks.len();
            chunks.push(Chunk::new(index, std::mem::take(&mut current)));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
    }

    if !current.is_empty() {
        let index = chunks.len();
        chunks.push(Chunk::new(index, current));
    }

    tracing::debug!(
        text_length = text.len(),
        max_bytes = max_bytes,
        chunk_count = chunks.len(),
        oversized_count = chunks.iter().filter(|c| c.is_oversized(max_bytes)).count(),
        "Text split into chunks"
    );

    Ok(chunks)
}
