use std::sync::Arc;

use crate::indexing::LockRegistry;

#[test]
fn same_name_resolves_to_same_lock() {
    let registry = LockRegistry::new();
    let a = registry.get("repo");
    let b = registry.get("repo");
    assert!(Arc::ptr_eq(&a, &b));

    let other = registry.get("other");
    assert!(!Arc::ptr_eq(&a, &other));
}

#[test]
fn lock_is_exclusive_per_name() {
    let registry = LockRegistry::new();
    let lock = registry.get("repo");
    let guard = lock.lock().unwrap();

    let same = registry.get("repo");
    assert!(same.try_lock().is_err());
    assert!(registry.get("other").try_lock().is_ok());

    drop(guard);
    assert!(same.try_lock().is_ok());
}
