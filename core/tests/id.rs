use fiv_core::{
    version::{SavedDefaultVersion, UnversionedFull},
    AccessError, Id, INVALID_ID,
};

#[test]
fn invalid_id() {
    assert!(INVALID_ID.is_invalid());
    assert!(Id::<UnversionedFull>::INVALID.is_invalid());
    assert_eq!(Id::<SavedDefaultVersion>::default(), INVALID_ID);
}

#[test]
fn invalidate() {
    let mut id: Id = Id::from_raw_parts(3, *INVALID_ID.version());
    assert!(!id.is_invalid());
    assert_ne!(id, INVALID_ID);

    let copy = id;
    id.invalidate();
    assert!(id.is_invalid());
    assert_eq!(id, INVALID_ID);
    // only the local value is touched
    assert!(!copy.is_invalid());
}

#[test]
fn error_messages() {
    assert_ne!(AccessError::Unknown, AccessError::Stale);
    assert!(AccessError::Unknown.to_string().contains("unknown"));
    assert!(AccessError::Stale.to_string().contains("stale"));

    let boxed: Box<dyn std::error::Error> = Box::new(AccessError::Stale);
    assert_eq!(boxed.to_string(), AccessError::Stale.to_string());
}
