use cascata_core::{
    Choice, Delivery, EngineError, HydrationRecord, Mode, SelectionEngine,
};

fn assigned_record() -> HydrationRecord {
    HydrationRecord {
        parent: Some(Choice::new("c1", "Electronics")),
        child: Some(Choice::new("s2", "Laptops")),
    }
}

#[test]
fn test_hydration_sets_both_levels_in_one_step() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.hydrate(assigned_record()).unwrap().unwrap();

    // Both halves are visible immediately, before any fetch has resolved,
    // because the record already knows the labels.
    let parent = engine.parent().unwrap();
    let child = engine.child().unwrap();
    assert_eq!((parent.id.as_str(), parent.label.as_str()), ("c1", "Electronics"));
    assert_eq!((child.id.as_str(), child.label.as_str()), ("s2", "Laptops"));
    assert_eq!(engine.mode(), Mode::Hydrating);
    assert_eq!(ticket.key().as_str(), "c1");
    assert!(engine.child_options().is_loading());
}

#[test]
fn test_hydration_fetch_does_not_touch_child() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.hydrate(assigned_record()).unwrap().unwrap();
    let options = vec![Choice::new("s1", "Phones"), Choice::new("s2", "Laptops")];
    assert_eq!(engine.absorb_options(&ticket, options), Delivery::Applied);

    assert_eq!(engine.child().unwrap().id.as_str(), "s2");
    assert!(!engine.child_needs_reselection());
}

#[test]
fn test_hydrated_child_absent_from_options_is_kept_and_flagged() {
    let mut engine = SelectionEngine::new();

    let record = HydrationRecord {
        parent: Some(Choice::new("c1", "Electronics")),
        child: Some(Choice::new("s9", "Discontinued")),
    };
    let ticket = engine.hydrate(record).unwrap().unwrap();

    // The freshest option list no longer carries s9.
    let options = vec![Choice::new("s1", "Phones"), Choice::new("s2", "Laptops")];
    engine.absorb_options(&ticket, options);

    let child = engine.child().unwrap();
    assert_eq!((child.id.as_str(), child.label.as_str()), ("s9", "Discontinued"));
    assert!(engine.child_needs_reselection());

    // Submission still carries the preserved key; nothing is silently
    // dropped on the user's behalf.
    let resolved = engine.resolve_submission().unwrap();
    assert_eq!(resolved.child_id.as_str(), "s9");
}

#[test]
fn test_hydration_fetch_failure_preserves_selections() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.hydrate(assigned_record()).unwrap().unwrap();
    assert_eq!(engine.fetch_failed(&ticket), Delivery::Applied);

    assert!(engine.child_options().is_stale());
    assert_eq!(engine.parent().unwrap().id.as_str(), "c1");
    assert_eq!(engine.child().unwrap().id.as_str(), "s2");
}

#[test]
fn test_hydrating_an_unassigned_record_does_nothing() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.hydrate(HydrationRecord::default()).unwrap();
    assert!(ticket.is_none());
    assert!(engine.parent().is_none());
    assert!(engine.child().is_none());
    assert_eq!(engine.mode(), Mode::Hydrating);
}

#[test]
fn test_hydrate_twice_is_invalid() {
    let mut engine = SelectionEngine::new();

    engine.hydrate(assigned_record()).unwrap();
    let err = engine.hydrate(assigned_record()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
}

#[test]
fn test_hydrate_after_user_edit_is_invalid() {
    let mut engine = SelectionEngine::new();

    engine.set_parent(Some(Choice::new("c2", "Clothing")));
    let err = engine.hydrate(assigned_record()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
}

#[test]
fn test_user_edit_after_hydration_reverts_to_reset_semantics() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.hydrate(assigned_record()).unwrap().unwrap();
    engine.absorb_options(&ticket, vec![Choice::new("s2", "Laptops")]);

    // Once the user changes the parent, the hydrated child no longer
    // enjoys preservation: this is an ordinary user edit.
    engine.set_parent(Some(Choice::new("c2", "Clothing")));
    assert!(engine.child().is_none());
    assert_eq!(engine.mode(), Mode::UserEditing);
}

#[test]
fn test_hydration_record_superseded_by_user_before_fetch_lands() {
    let mut engine = SelectionEngine::new();

    let hydration_ticket = engine.hydrate(assigned_record()).unwrap().unwrap();
    let user_ticket = engine.set_parent(Some(Choice::new("c2", "Clothing"))).unwrap();

    // The hydration fetch resolves late; the user's parent is
    // authoritative now.
    assert_eq!(
        engine.absorb_options(&hydration_ticket, vec![Choice::new("s2", "Laptops")]),
        Delivery::Discarded
    );
    let clothing = vec![Choice::new("s10", "Shirts")];
    assert_eq!(engine.absorb_options(&user_ticket, clothing), Delivery::Applied);
    assert_eq!(engine.child_options().choices()[0].id.as_str(), "s10");
}
