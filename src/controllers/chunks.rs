use super::narration::{read_input, InputSource};
use crate::{
    domain::{chunking::Chunk, narration::plan_chunks},
    error::AppResult,
};

/// Dry run of the chunking step. Never touches a synthesis provider.
pub struct ChunksController {
    max_chunk_bytes: usize,
}

impl ChunksController {
    pub fn new(max_chunk_bytes: usize) -> Self {
        Self { max_chunk_bytes }
    }

    /// chunks - Show how a text would be split for synthesis
    pub async fn chunks(
        &self,
        input: &InputSource,
        max_bytes: Option<usize>,
    ) -> AppResult<Vec<Chunk>> {
        let text = read_input(input).await?;
        let max_bytes = max_bytes.unwrap_or(self.max_chunk_bytes);

        Ok(plan_chunks(&text, max_bytes)?)
    }
}
