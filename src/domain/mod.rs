pub mod audio;
pub mod chunking;
pub mod narration;
pub mod shared;
