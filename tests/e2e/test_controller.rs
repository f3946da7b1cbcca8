use crate::e2e::helpers;

use helpers::fixtures;
use helpers::tts_mocks::MockTtsRepository;
use helpers::TestContext;
use slownews_narrator::controllers::chunks::ChunksController;
use slownews_narrator::controllers::narration::{InputSource, NarrateRequest, NarrationController};
use slownews_narrator::domain::audio::AudioFormat;
use slownews_narrator::error::AppError;
use slownews_narrator::infrastructure::config::TtsProvider;

fn controller(ctx: &TestContext) -> NarrationController {
    NarrationController::new(ctx.service.clone(), AudioFormat::Mp3)
}

#[tokio::test]
async fn it_should_narrate_input_file_named_after_its_stem() {
    let ctx = TestContext::new(MockTtsRepository::new(100));
    let input = ctx.write_input("article_7.txt", "Bangkok traffic eased. Rain is expected.");

    let result = controller(&ctx)
        .narrate(NarrateRequest {
            input: InputSource::File(input),
            name: None,
            daily: false,
        })
        .await
        .unwrap();

    assert_eq!(result.path, ctx.output_dir().join("article_7.mp3"));
    assert!(result.path.exists());
}

#[tokio::test]
async fn it_should_name_daily_digests_by_date() {
    let ctx = TestContext::new(MockTtsRepository::new(100));
    let input = ctx.write_input("digest.txt", "Daily News Summary. Markets were calm.");

    let result = controller(&ctx)
        .narrate(NarrateRequest {
            input: InputSource::File(input),
            name: None,
            daily: true,
        })
        .await
        .unwrap();

    let file_name = result.path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(file_name.starts_with("daily_summary_"));
    assert!(file_name.ends_with(".mp3"));
}

#[tokio::test]
async fn it_should_map_missing_input_to_bad_request() {
    let ctx = TestContext::new(MockTtsRepository::new(100));

    let result = controller(&ctx)
        .narrate(NarrateRequest {
            input: InputSource::File(ctx.output_dir().join("missing.txt")),
            name: None,
            daily: false,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn it_should_map_total_failure_to_external_service_error() {
    let ctx = TestContext::new(MockTtsRepository::new(100).failing_on("Bangkok"));
    let input = ctx.write_input("story.txt", "Bangkok news.");

    let result = controller(&ctx)
        .narrate(NarrateRequest {
            input: InputSource::File(input),
            name: Some("story.mp3".to_string()),
            daily: false,
        })
        .await;

    match result {
        Err(err @ AppError::ExternalService(_)) => assert_eq!(err.exit_code(), 69),
        other => panic!("expected external service error, got {:?}", other),
    }
}

#[tokio::test]
async fn it_should_plan_chunks_with_override() {
    let ctx = TestContext::new(MockTtsRepository::new(100));
    let input = InputSource::File(ctx.write_input("plan.txt", "Hello world. This is a test."));
    let controller = ChunksController::new(ctx.service.max_chunk_bytes());

    let default_plan = controller.chunks(&input, None).await.unwrap();
    assert_eq!(default_plan.len(), 1);

    let small_plan = controller.chunks(&input, Some(15)).await.unwrap();
    let contents: Vec<&str> = small_plan.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["Hello world.", "This is a test."]);

    let invalid = controller.chunks(&input, Some(0)).await;
    assert!(matches!(invalid, Err(AppError::BadRequest(_))));
    assert!(ctx.tts_repo.calls().is_empty());
}

#[tokio::test]
async fn it_should_plan_chunks_without_a_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digest.txt");
    std::fs::write(&path, fixtures::daily_digest(3)).unwrap();

    let controller = ChunksController::new(TtsProvider::Google.max_input_bytes());
    let plan = controller.chunks(&InputSource::File(path), None).await.unwrap();

    assert_eq!(plan.len(), 1);
    assert!(plan[0].byte_size <= 5000);
    assert!(plan[0].content.starts_with("Daily News Summary"));
}
