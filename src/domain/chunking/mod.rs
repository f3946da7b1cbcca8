pub mod chunker;
pub mod error;

pub use chunker::{chunk, split_sentences, Chunk};
pub use error::ChunkingError;
