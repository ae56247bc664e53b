//! Primary/secondary binary policy

use sevenzip_engine::{OperationRequest, SevenZip, SevenZipError, Verb};

use crate::common::{fixtures, serial, FakeTool};

#[tokio::test]
async fn test_primary_success_skips_secondary() {
    let _guard = serial().await;
    let tool = FakeTool::new();
    tool.install("7z", fixtures::TEST_REPORT)
        .install("7za", fixtures::TEST_REPORT);

    tool.engine()
        .test(&OperationRequest::new("test.7z"), |_| {})
        .await
        .unwrap();

    assert!(tool.recorded_args("7z").is_some());
    assert!(tool.recorded_args("7za").is_none());
}

#[tokio::test]
async fn test_secondary_rescues_failed_primary() {
    let _guard = serial().await;
    let tool = FakeTool::new();
    tool.install("7z", &fixtures::broken_archive("primary broke"))
        .install("7za", fixtures::ADD_REPORT);

    let mut added = Vec::new();
    let args = tool
        .engine()
        .add(&OperationRequest::new("test.7z").files("README.md"), |files| {
            added.extend(files)
        })
        .await
        .unwrap();

    assert_eq!(added, vec!["README.md", "docs/guide.md"]);
    // both binaries receive the same argument vector
    assert_eq!(tool.recorded_args("7z"), Some(args.clone()));
    assert_eq!(tool.recorded_args("7za"), Some(args));
}

#[tokio::test]
async fn test_secondary_error_is_surfaced() {
    let _guard = serial().await;
    let tool = FakeTool::new();
    tool.install("7z", &fixtures::broken_archive("primary broke"))
        .install("7za", &fixtures::broken_archive("secondary broke"));

    let err = tool
        .engine()
        .extract(&OperationRequest::new("test.7z"), |_| {})
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "secondary broke");
}

#[tokio::test]
async fn test_missing_binaries_name_the_last_candidate() {
    let _guard = serial().await;
    let tool = FakeTool::new();

    let err = tool
        .engine()
        .test(&OperationRequest::new("test.7z"), |_| {})
        .await
        .unwrap_err();

    match err {
        SevenZipError::Spawn { binary, .. } => assert_eq!(binary, "7za"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_no_fallback_verb_surfaces_primary_error() {
    let _guard = serial().await;
    let tool = FakeTool::new();
    tool.install("7z", &fixtures::broken_archive("primary broke"))
        .install("7za", "echo 'Everything is Ok'");

    let mut config = tool.config();
    config.no_fallback = vec![Verb::Delete];
    let err = SevenZip::new(config)
        .delete(&OperationRequest::new("test.7z").files("a.txt"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "primary broke");
    assert!(tool.recorded_args("7za").is_none());
}

#[tokio::test]
async fn test_failed_attempt_does_not_leak_into_manifest() {
    let _guard = serial().await;
    let tool = FakeTool::new();
    let partial_then_fail = format!(
        "echo 'Type = zip'\necho '2001-01-01 00:00:00 ....A 1 1 stale.txt'\n{}",
        fixtures::broken_archive("primary broke")
    );
    tool.install("7z", &partial_then_fail)
        .install("7za", fixtures::LIST_REPORT);

    let mut streamed = Vec::new();
    let manifest = tool
        .engine()
        .list(&OperationRequest::new("test/zip.7z"), |rows| {
            streamed.extend(rows)
        })
        .await
        .unwrap();

    assert_eq!(manifest.archive_type.as_deref(), Some("7z"));
    assert_eq!(manifest.entries.len(), 3);
    assert!(manifest.entries.iter().all(|e| e.name != "stale.txt"));
    // progress already delivered during the failed attempt stays delivered
    assert_eq!(streamed.len(), 4);
    assert_eq!(streamed[0].name, "stale.txt");
}

#[tokio::test]
async fn test_empty_primary_name_rejects_without_spawning() {
    let _guard = serial().await;
    let tool = FakeTool::new();
    tool.install("7za", fixtures::TEST_REPORT);

    let mut config = tool.config();
    config.primary_binary = String::new();
    let err = SevenZip::new(config)
        .test(&OperationRequest::new("test.7z"), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, SevenZipError::InvalidInput { .. }));
    assert!(tool.recorded_args("7za").is_none());
}
