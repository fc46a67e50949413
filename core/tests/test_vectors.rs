//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or error kinds. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use drive_core::{
    ApiError, CreateFolder, Credentials, DriveClient, Folder, FolderId, HttpMethod, HttpRequest,
    HttpResponse, RenameFolder,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/v2/Drive/Folders";

fn client() -> DriveClient {
    DriveClient::new(BASE_URL, Credentials::new("vector-token", "vector-user"))
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_request(name: &str, req: &HttpRequest, case: &Value) {
    let expected = &case["expected_request"];
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );
    assert_eq!(req.header("api_token"), Some("vector-token"), "{name}: api_token");
    assert_eq!(req.header("user_id"), Some("vector-user"), "{name}: user_id");
    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn assert_error_kind(name: &str, err: &ApiError, kind: &str) {
    let matched = match kind {
        "NotFound" => matches!(err, ApiError::NotFound),
        "HttpError" => matches!(err, ApiError::HttpError { .. }),
        "Deserialization" => matches!(err, ApiError::Deserialization(_)),
        "MissingField" => matches!(err, ApiError::MissingField(_)),
        "Rejected" => matches!(err, ApiError::Rejected { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {kind}, got {err:?}");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_folders();
        assert_request(name, &req, &case);

        let result = c.parse_list_folders(simulated_response(&case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), kind.as_str().unwrap());
        } else {
            let expected: Vec<Folder> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateFolder = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_folder(&input).unwrap();
        assert_request(name, &req, &case);

        let result = c.parse_create_folder(simulated_response(&case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), kind.as_str().unwrap());
        } else {
            let expected: Folder = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[test]
fn rename_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/rename.json")) {
        let name = case["name"].as_str().unwrap();
        let id = FolderId::new(case["input_id"].as_str().unwrap());
        let input: RenameFolder = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_rename_folder(&id, &input).unwrap();
        assert_request(name, &req, &case);

        let result = c.parse_rename_folder(simulated_response(&case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), kind.as_str().unwrap());
        } else {
            let expected: Folder = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = FolderId::new(case["input_id"].as_str().unwrap());

        let req = c.build_delete_folder(&id);
        assert_request(name, &req, &case);

        let result = c.parse_delete_folder(simulated_response(&case));
        if let Some(kind) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), kind.as_str().unwrap());
        } else {
            assert!(result.is_ok(), "{name}: expected success, got {result:?}");
        }
    }
}
