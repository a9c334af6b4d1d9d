use fiv_core::version::{DefaultVersion, Unversioned, Version};

#[test]
fn default_version_cycle() {
    let empty = DefaultVersion::EMPTY;
    assert!(empty.is_empty());

    let full = empty.mark_full();
    assert!(full.is_full());
    let saved = full.save();
    assert!(full.equals_saved(saved));

    let empty = full.mark_empty().unwrap();
    assert!(empty.is_empty());
    assert!(!empty.equals_saved(saved));

    let reused = empty.mark_full();
    assert!(reused.is_full());
    assert!(!reused.equals_saved(saved));
    assert!(reused.equals_saved(reused.save()));
}

#[test]
fn default_version_latest() {
    let a = DefaultVersion::EMPTY;
    let b = a.mark_full().mark_empty().unwrap();
    let c = b.mark_full().mark_empty().unwrap();

    assert_eq!(a.latest(c), c);
    assert_eq!(c.latest(a), c);
    assert_eq!(b.latest(b), b);
    assert!(c.latest(a).is_empty());
}

#[test]
fn unversioned_aba() {
    let full = Unversioned::EMPTY.mark_full();
    let saved = full.save();
    let empty = full.mark_empty().unwrap();
    assert!(!empty.equals_saved(saved));
    assert!(empty.mark_full().equals_saved(saved));
    assert!(!Unversioned::Full.is_exhausted());
    assert_eq!(Unversioned::Full.latest(Unversioned::Full), Unversioned::Empty);
}
