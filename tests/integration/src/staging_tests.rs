//! The transient template must not outlive an Encrypt call

use std::sync::Arc;

use tokio::task::JoinSet;
use xmlsec_core::ErrorKind;
use xmlsec_exec::algorithm::{AES256_CBC, RSA_1_5};
use xmlsec_exec::{EncryptedData, SessionKey};

use crate::test_utils::{init_logging, FakeTool};

/// Echo the template path (last argument) and its content while running.
const SHOW_TEMPLATE: &str = r#"for a in "$@"; do last="$a"; done
cat >/dev/null
echo "$last"
cat "$last""#;

#[tokio::test]
async fn test_template_removed_after_success() {
    init_logging();
    let tool = FakeTool::new(SHOW_TEMPLATE);
    let template = EncryptedData::new(AES256_CBC, RSA_1_5).with_id("ED_1");

    let out = tool
        .xmlsec()
        .encrypt(&template, b"<Assertion/>", "sp.crt", SessionKey::Aes256)
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    let (path, content) = out.split_once('\n').unwrap();

    assert!(std::path::Path::new(path).starts_with(tool.staging_dir()));
    assert_eq!(content.trim_end(), template.to_xml().unwrap().trim_end());
    assert!(tool.staged_files().is_empty());
}

#[tokio::test]
async fn test_template_removed_after_classified_failure() {
    init_logging();
    let tool = FakeTool::new(
        r#"for a in "$@"; do last="$a"; done
cat >/dev/null
echo "msg=self signed certificate in $last" >&2
exit 1"#,
    );

    let err = tool
        .xmlsec()
        .encrypt(&EncryptedData::default(), b"<Assertion/>", "sp.crt", "aes-128")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SelfSignedCertificate);
    assert!(err.to_string().contains(&tool.staging_dir().display().to_string()));
    assert!(tool.staged_files().is_empty());
}

#[tokio::test]
async fn test_template_removed_after_bare_exit_failure() {
    init_logging();
    let tool = FakeTool::new("cat >/dev/null; exit 1");

    let err = tool
        .xmlsec()
        .encrypt(&EncryptedData::default(), b"<Assertion/>", "sp.crt", "aes-128")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert!(tool.staged_files().is_empty());
}

#[tokio::test]
async fn test_template_removed_after_launch_failure() {
    init_logging();
    let tool = FakeTool::new("exit 0");
    let config = tool.config().with_binary("/nonexistent/bin/xmlsec1");

    let err = xmlsec_exec::XmlSec::new(config)
        .encrypt(&EncryptedData::default(), b"<Assertion/>", "sp.crt", "aes-128")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProcessLaunchFailure);
    assert!(tool.staged_files().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_encrypts_use_distinct_templates() {
    init_logging();
    let tool = FakeTool::new(
        r#"for a in "$@"; do last="$a"; done; cat >/dev/null; sleep 0.2; echo "$last""#,
    );
    let xmlsec = Arc::new(tool.xmlsec());
    let template = Arc::new(EncryptedData::default());

    let mut set = JoinSet::new();
    for _ in 0..8 {
        let xmlsec = Arc::clone(&xmlsec);
        let template = Arc::clone(&template);
        set.spawn(async move {
            xmlsec
                .encrypt(&template, b"<a/>", "sp.crt", "aes-128")
                .await
                .unwrap()
        });
    }

    let mut paths = Vec::new();
    while let Some(out) = set.join_next().await {
        paths.push(String::from_utf8(out.unwrap()).unwrap().trim().to_string());
    }
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 8);
    assert!(tool.staged_files().is_empty());
}
