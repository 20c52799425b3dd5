// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn entity(name: &str) -> EntityId {
    EntityId::new(name)
}

fn proc_id(name: &str) -> ProcedureId {
    ProcedureId::from(name)
}

#[test]
fn register_and_find() {
    let mut registry = TransactionRegistry::new();
    registry.register(entity("amf-1"), proc_id("p1")).unwrap();
    registry.register(entity("amf-1"), proc_id("p2")).unwrap();

    let ids = registry.find(&entity("amf-1")).unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&proc_id("p1")));
    assert_eq!(registry.transaction_count(), 2);
    assert!(registry.find(&entity("amf-2")).is_none());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = TransactionRegistry::new();
    registry.register(entity("amf-1"), proc_id("p1")).unwrap();

    let err = registry
        .register(entity("amf-1"), proc_id("p1"))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateProcedure {
            entity: entity("amf-1"),
            id: proc_id("p1"),
        }
    );
    assert_eq!(registry.transaction_count(), 1);
}

#[test]
fn deregister_last_instance_drops_entity() {
    let mut registry = TransactionRegistry::new();
    registry.register(entity("amf-1"), proc_id("p1")).unwrap();
    registry.register(entity("amf-1"), proc_id("p2")).unwrap();

    assert!(registry.deregister(&entity("amf-1"), &proc_id("p1")));
    assert!(registry.contains(&entity("amf-1")));

    assert!(registry.deregister(&entity("amf-1"), &proc_id("p2")));
    assert!(!registry.contains(&entity("amf-1")));
    assert!(registry.is_empty());
}

#[test]
fn deregister_unknown_is_noop() {
    let mut registry = TransactionRegistry::new();
    assert!(!registry.deregister(&entity("amf-1"), &proc_id("p1")));

    registry.register(entity("amf-1"), proc_id("p1")).unwrap();
    assert!(!registry.deregister(&entity("amf-1"), &proc_id("p9")));
    assert_eq!(registry.len(), 1);
}

#[test]
fn remove_returns_outstanding_instances() {
    let mut registry = TransactionRegistry::new();
    registry.register(entity("amf-1"), proc_id("p1")).unwrap();
    registry.register(entity("amf-2"), proc_id("p2")).unwrap();

    let removed = registry.remove(&entity("amf-1")).unwrap();
    assert_eq!(removed.into_iter().collect::<Vec<_>>(), vec![proc_id("p1")]);
    assert_eq!(registry.entities(), vec![entity("amf-2")]);
    assert!(registry.remove(&entity("amf-1")).is_none());
}

#[test]
fn entities_are_listed_in_sorted_order() {
    let mut registry = TransactionRegistry::new();
    for name in ["amf-c", "amf-a", "amf-b"] {
        registry.register(entity(name), proc_id(name)).unwrap();
    }

    assert_eq!(
        registry.entities(),
        vec![entity("amf-a"), entity("amf-b"), entity("amf-c")]
    );
}
