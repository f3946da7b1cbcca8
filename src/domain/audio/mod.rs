pub mod error;
pub mod model;
pub mod stitcher;

pub use error::{StitchError, SynthesisError};
pub use model::{AudioBuffer, AudioFormat, AudioSegment, StitchedAudio};
pub use stitcher::AudioStitcher;
