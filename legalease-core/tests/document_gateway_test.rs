mod common;

use common::{document_json, TestBackend};
use legalease_core::models::DocumentType;
use legalease_core::upload::{UploadFile, UploadJob, UploadOutcome};
use legalease_core::{ClientError, DocumentGateway};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn lease_pdf() -> UploadFile {
    UploadFile::new("lease.pdf", "application/pdf", b"%PDF-1.4 lease".to_vec())
}

#[tokio::test]
async fn upload_flow_navigates_to_new_document() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("POST"))
        .and(path("/api/document/upload"))
        .and(header("authorization", "Bearer tok_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_json("doc_1")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let gateway = DocumentGateway::new(backend.client());
    let outcome = UploadJob::default().submit(&gateway, lease_pdf()).await;

    assert_eq!(outcome, UploadOutcome::Navigate("/result/doc_1".to_string()));
}

#[tokio::test]
async fn rejected_upload_surfaces_backend_message() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("POST"))
        .and(path("/api/document/upload"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": "Could not extract readable text from this PDF."
        })))
        .mount(&backend.server)
        .await;

    let err = DocumentGateway::new(backend.client())
        .upload(lease_pdf())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Upload("Could not extract readable text from this PDF.".to_string())
    );
}

#[tokio::test]
async fn invalid_file_never_reaches_backend() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("POST"))
        .and(path("/api/document/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_json("doc_x")))
        .expect(0)
        .mount(&backend.server)
        .await;

    let gateway = DocumentGateway::new(backend.client());
    let notes = UploadFile::new("notes.txt", "text/plain", b"hello".to_vec());
    let outcome = UploadJob::default().submit(&gateway, notes).await;

    assert_eq!(
        outcome,
        UploadOutcome::Retry {
            message: "Only PDF files are accepted.".to_string()
        }
    );
}

#[tokio::test]
async fn history_keeps_backend_order() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("GET"))
        .and(path("/api/document/history"))
        .and(header("authorization", "Bearer tok_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                { "id": "doc_2", "fileName": "nda.pdf", "documentType": "nda", "summary": "Mutual NDA", "createdAt": "2026-03-06T09:00:00" },
                { "id": "doc_1", "fileName": "lease.pdf", "documentType": "rental", "summary": "Lease", "createdAt": "2026-03-05T09:00:00" }
            ]
        })))
        .mount(&backend.server)
        .await;

    let documents = DocumentGateway::new(backend.client()).list().await.unwrap();

    let ids: Vec<_> = documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["doc_2", "doc_1"]);
    assert_eq!(documents[0].document_type, DocumentType::Nda);
    assert!(documents[0].risk_clauses.is_empty());
}

#[tokio::test]
async fn get_decodes_analysis() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("GET"))
        .and(path("/api/document/doc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_json("doc_1")))
        .mount(&backend.server)
        .await;

    let doc = DocumentGateway::new(backend.client()).get("doc_1").await.unwrap();

    assert_eq!(doc.file_name, "lease.pdf");
    assert_eq!(doc.risk_summary().high, 1);
    assert_eq!(doc.key_terms[0].term, "Monthly rent");
}

#[tokio::test]
async fn unknown_document_is_not_found() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("GET"))
        .and(path("/api/document/doc_404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Document not found." })),
        )
        .mount(&backend.server)
        .await;

    let err = DocumentGateway::new(backend.client())
        .get("doc_404")
        .await
        .unwrap_err();

    assert_eq!(err, ClientError::NotFound("Document not found.".to_string()));
}

#[tokio::test]
async fn delete_confirms_and_repeat_is_not_found() {
    let backend = TestBackend::signed_in("tok_1").await;
    Mock::given(method("DELETE"))
        .and(path("/api/document/doc_2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Document deleted successfully." })),
        )
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/document/doc_2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Document not found." })),
        )
        .mount(&backend.server)
        .await;

    let gateway = DocumentGateway::new(backend.client());
    let confirmation = gateway.delete("doc_2").await.unwrap();
    assert_eq!(confirmation.message, "Document deleted successfully.");

    assert!(gateway.delete("doc_2").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn expired_token_is_auth_error() {
    let backend = TestBackend::signed_in("tok_stale").await;
    Mock::given(method("GET"))
        .and(path("/api/document/history"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Token expired. Please login again." })),
        )
        .mount(&backend.server)
        .await;

    let err = DocumentGateway::new(backend.client()).list().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Auth("Token expired. Please login again.".to_string())
    );
    assert!(backend.store.is_authenticated());
}

#[tokio::test]
async fn document_ids_cannot_leave_the_document_collection() {
    let backend = TestBackend::signed_in("tok_1").await;
    for verb in ["GET", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "leaked" })))
            .expect(0)
            .mount(&backend.server)
            .await;
    }
    let gateway = DocumentGateway::new(backend.client());

    assert!(matches!(
        gateway.get("../auth/me").await,
        Err(ClientError::NotFound(_))
    ));
    assert!(matches!(
        gateway.delete("../auth/me").await,
        Err(ClientError::NotFound(_))
    ));

    let received = backend.server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 2);
    for request in received {
        assert_eq!(request.url.path(), "/api/document/..%2Fauth%2Fme");
    }
}

#[tokio::test]
async fn dot_ids_send_no_request() {
    let backend = TestBackend::signed_in("tok_1").await;
    let gateway = DocumentGateway::new(backend.client());

    for id in ["", ".", ".."] {
        assert_eq!(
            gateway.get(id).await.unwrap_err(),
            ClientError::NotFound("Document not found.".to_string())
        );
        assert!(matches!(
            gateway.delete(id).await,
            Err(ClientError::NotFound(_))
        ));
    }

    let received = backend.server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
