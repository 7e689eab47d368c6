use super::*;
use crate::preset::starter_document;

// =============================================================
// Keys
// =============================================================

#[test]
fn accepts_plain_keys() {
    for key in ["award", "award-2026", "gala_v2", "a.b"] {
        assert!(validate_key(key).is_ok(), "{key}");
    }
}

#[test]
fn rejects_path_like_keys() {
    for key in ["", "../etc", "a/b", ".hidden", "sp ace", "a\\b"] {
        let err = validate_key(key).unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_KEY", "{key}");
    }
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn create_then_read_returns_document() {
    let mut store = MemoryStore::new();
    let doc = starter_document();
    store.create("award", &doc).unwrap();
    assert_eq!(store.read("award").unwrap(), doc);
}

#[test]
fn create_twice_is_rejected() {
    let mut store = MemoryStore::new();
    store.create("award", &TemplateDocument::new()).unwrap();
    let err = store.create("award", &TemplateDocument::new()).unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));
    assert_eq!(err.error_code(), "E_ALREADY_EXISTS");
}

#[test]
fn read_missing_is_not_found() {
    let store = MemoryStore::new();
    let err = store.read("nope").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref k) if k == "nope"));
    assert_eq!(err.error_code(), "E_NOT_FOUND");
}

#[test]
fn update_requires_existing_key() {
    let mut store = MemoryStore::new();
    let err = store.update("award", &TemplateDocument::new()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    store.create("award", &TemplateDocument::new()).unwrap();
    let wide = TemplateDocument::with_page_size(1200.0, 850.0);
    store.update("award", &wide).unwrap();
    assert_eq!(store.read("award").unwrap(), wide);
}

#[test]
fn malformed_json_is_invalid() {
    let mut store = MemoryStore::new();
    store.insert_raw("broken", "{ not json");
    let err = store.read("broken").unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_DOCUMENT");
}

#[test]
fn list_is_sorted() {
    let mut store = MemoryStore::new();
    for key in ["zeta", "alpha", "mid"] {
        store.create(key, &TemplateDocument::new()).unwrap();
    }
    assert_eq!(store.list().unwrap(), vec!["alpha", "mid", "zeta"]);
}
