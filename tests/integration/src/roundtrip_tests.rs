//! Round trips against an installed xmlsec1
//!
//! Ignored by default; run with `cargo test -- --ignored` on a host with
//! xmlsec1 and openssl on PATH.

use xmlsec_core::ErrorKind;
use xmlsec_exec::{EncryptedData, SessionKey, XmlSec};

use crate::test_utils::{init_logging, signature_template, without_declaration, Credentials};

#[tokio::test]
#[ignore = "requires xmlsec1 and openssl on PATH"]
async fn test_sign_then_verify() {
    init_logging();
    let Some(creds) = Credentials::generate() else {
        return;
    };
    let xmlsec = XmlSec::default();

    let document = signature_template("data-1", "Hello, World!");
    let signed = xmlsec
        .sign(&document, &creds.private_key, "Data")
        .await
        .unwrap();

    let signed_text = String::from_utf8_lossy(&signed);
    assert!(signed_text.contains("<SignatureValue>"));
    assert!(!signed_text.contains("<SignatureValue></SignatureValue>"));

    xmlsec
        .verify(&signed, &creds.certificate, "Data")
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires xmlsec1 and openssl on PATH"]
async fn test_verify_rejects_tampered_document() {
    init_logging();
    let Some(creds) = Credentials::generate() else {
        return;
    };
    let xmlsec = XmlSec::default();

    let signed = xmlsec
        .sign(
            &signature_template("data-1", "pay 10"),
            &creds.private_key,
            "Data",
        )
        .await
        .unwrap();
    let tampered = String::from_utf8(signed)
        .unwrap()
        .replace("pay 10", "pay 1000");

    let err = xmlsec
        .verify(tampered.as_bytes(), &creds.certificate, "Data")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert!(err.to_string().starts_with("xmlsec: "));
}

#[tokio::test]
#[ignore = "requires xmlsec1 and openssl on PATH"]
async fn test_verify_with_other_certificate_fails() {
    init_logging();
    let (Some(signer), Some(other)) = (Credentials::generate(), Credentials::generate()) else {
        return;
    };
    let xmlsec = XmlSec::default();

    let signed = xmlsec
        .sign(
            &signature_template("data-1", "Hello"),
            &signer.private_key,
            "Data",
        )
        .await
        .unwrap();

    assert!(xmlsec
        .verify(&signed, &other.certificate, "Data")
        .await
        .is_err());
}

#[tokio::test]
#[ignore = "requires xmlsec1 and openssl on PATH"]
async fn test_encrypt_then_decrypt() {
    init_logging();
    let Some(creds) = Credentials::generate() else {
        return;
    };
    let xmlsec = XmlSec::default();

    let document = b"<Assertion ID=\"a-1\"><Subject>alice</Subject></Assertion>";
    let mut template = EncryptedData::new(
        SessionKey::Aes128.data_encryption_method(),
        xmlsec_exec::algorithm::RSA_OAEP_MGF1P,
    );
    // No X509Data: the tool would otherwise validate the self-signed test
    // certificate's chain when decrypting
    if let Some(key_info) = template.key_info.as_mut() {
        if let Some(key) = key_info.encrypted_key.as_mut() {
            key.key_info = None;
        }
    }

    let encrypted = xmlsec
        .encrypt(&template, document, &creds.certificate, SessionKey::Aes128)
        .await
        .unwrap();
    let encrypted_text = String::from_utf8_lossy(&encrypted);
    assert!(encrypted_text.contains("EncryptedData"));
    assert!(!encrypted_text.contains("alice"));

    let decrypted = xmlsec
        .decrypt(&encrypted, &creds.private_key)
        .await
        .unwrap();
    assert_eq!(
        without_declaration(&decrypted),
        String::from_utf8_lossy(document)
    );
}
