use cascata_core::{Choice, Delivery, DependentOptions, SelectionEngine};

fn sub(id: &str, label: &str) -> Choice {
    Choice::new(id, label)
}

#[test]
fn test_out_of_order_results_keep_only_the_newest_parent() {
    let mut engine = SelectionEngine::new();

    let t1 = engine.set_parent(Some(Choice::new("c1", "Electronics"))).unwrap();
    let t2 = engine.set_parent(Some(Choice::new("c2", "Clothing"))).unwrap();

    // c2's result arrives first and is applied.
    let clothing = vec![sub("s10", "Shirts"), sub("s11", "Shoes")];
    assert_eq!(engine.absorb_options(&t2, clothing.clone()), Delivery::Applied);

    // c1's result arrives late and is dropped on the floor.
    let electronics = vec![sub("s1", "Phones")];
    assert_eq!(engine.absorb_options(&t1, electronics), Delivery::Discarded);

    assert_eq!(engine.child_options(), &DependentOptions::Ready(clothing));
}

#[test]
fn test_late_result_after_parent_cleared_is_discarded() {
    let mut engine = SelectionEngine::new();

    let t1 = engine.set_parent(Some(Choice::new("c1", "Electronics"))).unwrap();
    engine.set_parent(None);

    assert_eq!(
        engine.absorb_options(&t1, vec![sub("s1", "Phones")]),
        Delivery::Discarded
    );
    assert_eq!(engine.child_options(), &DependentOptions::empty());
}

#[test]
fn test_authoritative_failure_marks_options_stale() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.set_parent(Some(Choice::new("c1", "Electronics"))).unwrap();
    assert_eq!(engine.fetch_failed(&ticket), Delivery::Applied);

    // Failed is distinguishable from "loaded fine, nothing exists".
    assert!(engine.child_options().is_stale());
    assert_ne!(engine.child_options(), &DependentOptions::Ready(Vec::new()));

    // The parent selection itself is untouched by the failure.
    assert_eq!(engine.parent().unwrap().id.as_str(), "c1");
}

#[test]
fn test_superseded_failure_is_ignored() {
    let mut engine = SelectionEngine::new();

    let t1 = engine.set_parent(Some(Choice::new("c1", "Electronics"))).unwrap();
    let t2 = engine.set_parent(Some(Choice::new("c2", "Clothing"))).unwrap();

    assert_eq!(engine.fetch_failed(&t1), Delivery::Discarded);
    assert!(engine.child_options().is_loading());

    let clothing = vec![sub("s10", "Shirts")];
    assert_eq!(engine.absorb_options(&t2, clothing.clone()), Delivery::Applied);
    assert_eq!(engine.child_options(), &DependentOptions::Ready(clothing));
}

#[test]
fn test_duplicate_delivery_of_a_settled_ticket_is_discarded() {
    let mut engine = SelectionEngine::new();

    let ticket = engine.set_parent(Some(Choice::new("c1", "Electronics"))).unwrap();
    assert_eq!(
        engine.absorb_options(&ticket, vec![sub("s1", "Phones")]),
        Delivery::Applied
    );
    assert_eq!(
        engine.absorb_options(&ticket, vec![sub("s2", "Laptops")]),
        Delivery::Discarded
    );
    assert_eq!(engine.child_options().choices()[0].id.as_str(), "s1");
}
