pub mod audio_repository;
pub mod fs_audio_repository;
pub mod google_tts_repository;
pub mod openai_tts_repository;
pub mod tts_repository;

pub use audio_repository::{AudioRepository, PersistenceError};
pub use fs_audio_repository::FsAudioRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use tts_repository::TtsRepository;
