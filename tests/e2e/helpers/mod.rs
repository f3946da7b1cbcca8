use slownews_narrator::domain::audio::AudioFormat;
use slownews_narrator::domain::narration::{NarrationOptions, NarrationService};
use slownews_narrator::infrastructure::repositories::FsAudioRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;


use tts_mocks::MockTtsRepository;

pub struct TestContext {
    pub tts_repo: Arc<MockTtsRepository>,
    pub service: Arc<NarrationService>,
    output_dir: TempDir,
}

impl TestContext {
    pub fn new(tts_repo: MockTtsRepository) -> Self {
        Self::with_options(tts_repo, NarrationOptions::default())
    }

    pub fn with_options(tts_repo: MockTtsRepository, options: NarrationOptions) -> Self {
        let output_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tts_repo = Arc::new(tts_repo);
        let audio_repo = Arc::new(FsAudioRepository::new(output_dir.path().join("audio_files")));

        let service = Arc::new(NarrationService::new(
            tts_repo.clone(),
            audio_repo,
            NarrationOptions {
                format: AudioFormat::Mp3,
                ..options
            },
        ));

        Self {
            tts_repo,
            service,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.path().join("audio_files")
    }

    /// Write an input text file inside the temp dir
    pub fn write_input(&self, name: &str, text: &str) -> PathBuf {
        let path = self.output_dir.path().join(name);
        std::fs::write(&path, text).expect("Failed to write input file");
        path
    }
}

pub fn read_artifact(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("Failed to read artifact")
}
