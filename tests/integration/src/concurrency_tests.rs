//! Per-call isolation and resource handling under concurrency

use std::sync::Arc;
use std::time::{Duration, Instant};

use xmlsec_core::ErrorKind;

use crate::test_utils::{init_logging, FakeTool};

const PARALLEL_CALLS: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_signs_get_their_own_output() {
    init_logging();
    let tool = FakeTool::new("printf 'signed:'; cat");
    let xmlsec = Arc::new(tool.xmlsec());

    let mut handles = Vec::with_capacity(PARALLEL_CALLS);
    for i in 0..PARALLEL_CALLS {
        let xmlsec = Arc::clone(&xmlsec);
        handles.push(tokio::spawn(async move {
            // Vary sizes so some calls outlive others
            let document = format!("<doc n=\"{}\">{}</doc>", i, "x".repeat(i * 4096));
            let out = xmlsec
                .sign(document.as_bytes(), "sp.key", "doc")
                .await
                .unwrap();
            (document, out)
        }));
    }

    for handle in handles {
        let (document, out) = handle.await.unwrap();
        assert_eq!(out, format!("signed:{}", document).into_bytes());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_failures_get_their_own_diagnostics() {
    init_logging();
    let tool = FakeTool::new(r#"doc=$(cat); echo "rejected $doc" >&2; exit 1"#);
    let xmlsec = Arc::new(tool.xmlsec());

    let mut handles = Vec::with_capacity(PARALLEL_CALLS);
    for i in 0..PARALLEL_CALLS {
        let xmlsec = Arc::clone(&xmlsec);
        handles.push(tokio::spawn(async move {
            let document = format!("<doc-{}/>", i);
            let err = xmlsec
                .verify(document.as_bytes(), "idp.crt", "doc")
                .await
                .unwrap_err();
            (document, err)
        }));
    }

    for handle in handles {
        let (document, err) = handle.await.unwrap();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.to_string(), format!("xmlsec: rejected {}", document));
    }
}

#[tokio::test]
async fn test_large_document_round_trips_through_pipes() {
    init_logging();
    let tool = FakeTool::new("cat");
    let document = vec![b'q'; 16 * 1024 * 1024];

    let out = tool
        .xmlsec()
        .decrypt(&document, "sp.key")
        .await
        .unwrap();
    assert_eq!(out.len(), document.len());
}

#[tokio::test]
async fn test_caller_deadline_bounds_a_hung_tool() {
    init_logging();
    let tool = FakeTool::new("exec sleep 30");
    let xmlsec = tool.xmlsec();

    let started = Instant::now();
    let result = tokio::time::timeout(
        Duration::from_millis(200),
        xmlsec.decrypt(b"<a/>", "sp.key"),
    )
    .await;

    assert!(result.is_err(), "hung tool should hit the deadline");
    assert!(started.elapsed() < Duration::from_secs(10));
}
