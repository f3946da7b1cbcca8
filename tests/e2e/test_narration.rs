use crate::e2e::helpers;

use helpers::fixtures::{compiled_digest, daily_digest};
use helpers::tts_mocks::{mock_audio_bytes, MockTtsRepository};
use helpers::{read_artifact, TestContext};
use pretty_assertions::assert_eq;
use slownews_narrator::domain::audio::StitchError;
use slownews_narrator::domain::chunking::split_sentences;
use slownews_narrator::domain::narration::{
    NarrationOptions, NarrationServiceApi, NarrationServiceError,
};
use std::time::Duration;

#[tokio::test]
async fn it_should_narrate_text_into_one_artifact() {
    let ctx = TestContext::new(MockTtsRepository::new(15));

    let result = ctx
        .service
        .narrate("Hello world. This is a test.".to_string(), "story.mp3".to_string())
        .await
        .unwrap();

    assert_eq!(result.path, ctx.output_dir().join("story.mp3"));
    assert_eq!(result.chunk_count, 2);
    assert!(!result.is_partial());
    assert_eq!(ctx.tts_repo.calls(), vec!["Hello world.", "This is a test."]);

    let mut expected = mock_audio_bytes("Hello world.");
    expected.extend(mock_audio_bytes("This is a test."));
    assert_eq!(read_artifact(&result.path), expected);
    assert_eq!(result.audio_size_bytes, expected.len());
}

#[tokio::test]
async fn it_should_skip_failed_chunks_and_report_them() {
    let ctx = TestContext::new(MockTtsRepository::new(12).failing_on("FAIL"));

    let result = ctx
        .service
        .narrate(
            "Part one. FAIL two. Part three.".to_string(),
            "partial.mp3".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(result.chunk_count, 3);
    assert_eq!(result.skipped_chunks, vec![1]);
    assert!(result.is_partial());

    let mut expected = mock_audio_bytes("Part one.");
    expected.extend(mock_audio_bytes("Part three."));
    assert_eq!(read_artifact(&result.path), expected);
}

#[tokio::test]
async fn it_should_not_write_artifact_when_every_chunk_fails() {
    let ctx = TestContext::new(MockTtsRepository::new(12).failing_on("FAIL"));

    let result = ctx
        .service
        .narrate("FAIL one. FAIL two.".to_string(), "nothing.mp3".to_string())
        .await;

    match result {
        Err(NarrationServiceError::Synthesis(StitchError::AllChunksFailed { attempted, .. })) => {
            assert_eq!(attempted, 2);
        }
        other => panic!("expected total synthesis failure, got {:?}", other),
    }
    assert!(!ctx.output_dir().join("nothing.mp3").exists());
}

#[tokio::test]
async fn it_should_reject_empty_text() {
    let ctx = TestContext::new(MockTtsRepository::new(100));

    let result = ctx
        .service
        .narrate("<p>   </p>".to_string(), "empty.mp3".to_string())
        .await;

    assert!(matches!(result, Err(NarrationServiceError::Invalid(_))));
    assert!(ctx.tts_repo.calls().is_empty());
}

#[tokio::test]
async fn it_should_cap_chunks_at_provider_limit() {
    let ctx = TestContext::with_options(
        MockTtsRepository::new(400),
        NarrationOptions {
            max_chunk_bytes: Some(10_000),
            ..NarrationOptions::default()
        },
    );
    assert_eq!(ctx.service.max_chunk_bytes(), 400);

    let result = ctx
        .service
        .narrate(daily_digest(4), "daily.mp3".to_string())
        .await
        .unwrap();

    assert!(result.chunk_count > 1);
    assert!(!result.is_partial());
    for call in ctx.tts_repo.calls() {
        assert!(call.len() <= 400, "chunk of {} bytes sent", call.len());
        assert!(!call.contains("https://"), "URLs must be stripped");
        assert!(!call.contains('<'), "HTML must be stripped");
    }
}

#[tokio::test]
async fn it_should_pass_oversized_sentence_through_and_skip_it_on_rejection() {
    let ctx = TestContext::new(MockTtsRepository::new(30));
    let oversized = "This single sentence is much longer than thirty bytes.";
    let text = format!("Short start. {} Short end.", oversized);

    let result = ctx
        .service
        .narrate(text, "oversized.mp3".to_string())
        .await
        .unwrap();

    // Forwarded whole, then rejected by the provider like any other failure
    assert_eq!(
        ctx.tts_repo.calls(),
        vec!["Short start.", oversized, "Short end."]
    );
    assert_eq!(result.skipped_chunks, vec![1]);
}

#[tokio::test]
async fn it_should_keep_chunk_order_with_concurrent_synthesis() {
    // Shorter chunks finish first
    let repo = MockTtsRepository::new(400)
        .with_latency(|text| Duration::from_millis(200u64.saturating_sub(text.len() as u64)));
    let ctx = TestContext::with_options(
        repo,
        NarrationOptions {
            max_chunk_bytes: Some(80),
            max_in_flight: 4,
            ..NarrationOptions::default()
        },
    );
    let digest = daily_digest(5);
    let chunks = ctx.service.plan(&digest).unwrap();

    let result = ctx
        .service
        .narrate(digest, "daily_concurrent.mp3".to_string())
        .await
        .unwrap();

    let expected: Vec<u8> = chunks
        .iter()
        .flat_map(|c| mock_audio_bytes(&c.content))
        .collect();
    assert_eq!(result.chunk_count, chunks.len());
    assert!(!result.is_partial());
    assert_eq!(read_artifact(&result.path), expected);
}

#[tokio::test]
async fn it_should_time_out_without_writing_output() {
    let repo = MockTtsRepository::new(100).with_latency(|_| Duration::from_secs(2));
    let ctx = TestContext::with_options(
        repo,
        NarrationOptions {
            timeout: Some(Duration::from_millis(50)),
            ..NarrationOptions::default()
        },
    );

    let result = ctx
        .service
        .narrate("One sentence. Another one.".to_string(), "slow.mp3".to_string())
        .await;

    assert!(matches!(
        result,
        Err(NarrationServiceError::Synthesis(StitchError::Timeout(_)))
    ));
    assert!(!ctx.output_dir().join("slow.mp3").exists());
}

#[tokio::test]
async fn it_should_surface_persistence_failures() {
    let ctx = TestContext::new(MockTtsRepository::new(100));

    let result = ctx
        .service
        .narrate("Hello world.".to_string(), "../escape.mp3".to_string())
        .await;

    assert!(matches!(result, Err(NarrationServiceError::Persistence(_))));
}

#[tokio::test]
async fn it_should_pass_run_on_digest_sentences_through_and_skip_them() {
    let ctx = TestContext::with_options(
        MockTtsRepository::new(200),
        NarrationOptions {
            max_chunk_bytes: Some(200),
            ..NarrationOptions::default()
        },
    );
    let digest = compiled_digest(3);
    let chunks = ctx.service.plan(&digest).unwrap();

    let oversized: Vec<usize> = chunks
        .iter()
        .filter(|c| c.is_oversized(200))
        .map(|c| c.index)
        .collect();
    assert!(!oversized.is_empty());
    assert!(oversized.len() < chunks.len());
    // Each oversized chunk is one unsplit run-on sentence
    for c in chunks.iter().filter(|c| c.is_oversized(200)) {
        assert_eq!(split_sentences(&c.content).len(), 1);
    }

    let result = ctx
        .service
        .narrate(digest, "daily_compiled.mp3".to_string())
        .await
        .unwrap();

    assert_eq!(result.chunk_count, chunks.len());
    assert_eq!(result.skipped_chunks, oversized);
    assert!(result.path.exists());
}
