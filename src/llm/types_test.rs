use super::*;

#[test]
fn from_bytes_encodes_standard_base64() {
    let img = ImagePayload::from_bytes(b"hello", "image/png");
    assert_eq!(img.data_base64, "aGVsbG8=");
    assert_eq!(img.mime_type, "image/png");
}

#[test]
fn from_data_url_strips_prefix() {
    let img = ImagePayload::from_data_url("data:image/png;base64,aGVsbG8=");
    assert_eq!(img.mime_type, "image/png");
    assert_eq!(img.data_base64, "aGVsbG8=");
}

#[test]
fn from_data_url_accepts_bare_base64() {
    let img = ImagePayload::from_data_url("aGVsbG8=");
    assert_eq!(img.mime_type, DEFAULT_IMAGE_MIME);
    assert_eq!(img.data_base64, "aGVsbG8=");
}

#[test]
fn data_url_round_trips_through_to_data_url() {
    let img = ImagePayload::from_bytes(b"x", "image/webp");
    assert_eq!(ImagePayload::from_data_url(&img.to_data_url()), img);
}

#[test]
fn mime_guess_by_extension() {
    assert_eq!(mime_for_path(Path::new("slide.PNG")), "image/png");
    assert_eq!(mime_for_path(Path::new("strip.jpeg")), "image/jpeg");
    assert_eq!(mime_for_path(Path::new("noext")), "image/jpeg");
}

#[test]
fn from_path_missing_file_errors() {
    let err = ImagePayload::from_path(Path::new("/definitely/not/here.jpg")).unwrap_err();
    assert!(matches!(err, LlmError::ImageRead(_)));
    assert_eq!(err.error_code(), "E_IMAGE_READ");
}

#[test]
fn from_path_reads_and_encodes() {
    let path = std::env::temp_dir().join(format!("quickmed-{}.png", uuid::Uuid::new_v4()));
    std::fs::write(&path, b"hello").unwrap();
    let img = ImagePayload::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(img.mime_type, "image/png");
    assert_eq!(img.data_base64, "aGVsbG8=");
}

#[test]
fn retryable_only_for_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("reset".into()).retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::EmptyResponse.retryable());
}
