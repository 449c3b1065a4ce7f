//! Method Bridge Integration Tests
//!
//! Tests for the copyContentToCache channel protocol, driven through JSON the
//! way a host would send it.

use cachecopy::bridge::{
    MethodBridge, MethodCall, MethodResult, ARG_URI, CODE_COPY_ERROR, CODE_INVALID_ARGUMENT,
    METHOD_COPY_CONTENT_TO_CACHE,
};
use cachecopy::{ContentMaterializer, MemoryResolver, TempfileAllocator};
use serde_json::{json, Value};
use tempfile::TempDir;

fn bridge(temp: &TempDir) -> MethodBridge<MemoryResolver, TempfileAllocator> {
    let materializer = ContentMaterializer::new(MemoryResolver::new(), TempfileAllocator::new());
    MethodBridge::new(materializer, temp.path())
}

fn handle_json(bridge: &MethodBridge<MemoryResolver, TempfileAllocator>, call: Value) -> Value {
    let call: MethodCall = serde_json::from_value(call).unwrap();
    serde_json::to_value(bridge.handle(&call)).unwrap()
}

#[test]
fn test_copy_content_to_cache_success() {
    let temp = TempDir::new().unwrap();
    let b = bridge(&temp);
    b.materializer()
        .resolver()
        .insert("content://media/external/audio/media/5", Some("audio/mp4"), b"ftypM4A ".to_vec());

    let reply = handle_json(
        &b,
        json!({
            "method": "copyContentToCache",
            "arguments": { "uri": "content://media/external/audio/media/5" }
        }),
    );

    assert_eq!(reply["status"], "success");
    let call = MethodCall::new(METHOD_COPY_CONTENT_TO_CACHE)
        .with_argument(ARG_URI, "content://media/external/audio/media/5");
    assert!(b.handle(&call).is_success());
    let path = std::path::PathBuf::from(reply["value"].as_str().unwrap());
    assert!(path.starts_with(temp.path()));
    assert_eq!(path.extension().unwrap(), "m4a");
    assert_eq!(std::fs::read(&path).unwrap(), b"ftypM4A ");
}

#[test]
fn test_missing_or_null_uri_is_invalid_argument() {
    let temp = TempDir::new().unwrap();
    let b = bridge(&temp);

    for arguments in [json!({}), json!({ "uri": null }), json!({ "uri": 42 })] {
        let reply = handle_json(
            &b,
            json!({ "method": "copyContentToCache", "arguments": arguments }),
        );

        assert_eq!(
            reply,
            json!({
                "status": "error",
                "code": "INVALID_ARGUMENT",
                "message": "URI is required"
            })
        );
    }
}

#[test]
fn test_empty_uri_is_invalid_argument() {
    let temp = TempDir::new().unwrap();
    let call = MethodCall::new(METHOD_COPY_CONTENT_TO_CACHE).with_argument(ARG_URI, "");

    match bridge(&temp).handle(&call) {
        MethodResult::Error { code, .. } => assert_eq!(code, CODE_INVALID_ARGUMENT),
        other => panic!("Expected error, got {:?}", other),
    }
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_unopenable_uri_is_copy_error() {
    let temp = TempDir::new().unwrap();
    let call = MethodCall::new(METHOD_COPY_CONTENT_TO_CACHE)
        .with_argument(ARG_URI, "content://media/external/audio/media/404");

    match bridge(&temp).handle(&call) {
        MethodResult::Error {
            code,
            message,
            details,
        } => {
            assert_eq!(code, CODE_COPY_ERROR);
            assert!(message.contains("content://media/external/audio/media/404"));
            assert_eq!(details.as_deref(), Some("SOURCE_UNAVAILABLE"));
        }
        other => panic!("Expected error, got {:?}", other),
    }
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_cache_dir_is_copy_error() {
    let temp = TempDir::new().unwrap();
    let gone = temp.path().join("gone");
    let materializer = ContentMaterializer::new(MemoryResolver::new(), TempfileAllocator::new());
    materializer
        .resolver()
        .insert("content://media/1", Some("audio/mpeg"), b"ID3".to_vec());
    let b = MethodBridge::new(materializer, &gone);
    assert_eq!(b.cache_dir(), gone.as_path());

    let call = MethodCall::new(METHOD_COPY_CONTENT_TO_CACHE).with_argument(ARG_URI, "content://media/1");
    let result = b.handle(&call);
    assert!(!result.is_success());

    match result {
        MethodResult::Error { code, message, .. } => {
            assert_eq!(code, CODE_COPY_ERROR);
            assert!(message.contains("Cache directory does not exist"));
        }
        other => panic!("Expected error, got {:?}", other),
    }
    assert!(!gone.exists());
}

#[test]
fn test_other_methods_are_not_implemented() {
    let temp = TempDir::new().unwrap();
    let b = bridge(&temp);

    let reply = handle_json(&b, json!({ "method": "getPlaylist" }));
    assert_eq!(reply, json!({ "status": "not_implemented" }));
}
