use pwsorder::reconcile;
use std::collections::HashSet;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_spec_scenario_stale_and_new() {
    // Pool réel : c.mp4 (ordonné), a.png et b.png (nouveaux) ;
    // z.png n'existe plus
    let present = names(&["c.mp4", "a.png", "b.png"]);
    let stored = names(&["c.mp4", "z.png"]);

    let result = reconcile(&present, &stored);

    assert_eq!(result.order, names(&["c.mp4", "a.png", "b.png"]));
    assert!(result.dirty);
}

#[test]
fn test_spec_scenario_delete_keeps_rest() {
    let present = names(&["b.png", "c.png"]);
    let stored = names(&["a.png", "b.png", "c.png"]);

    let result = reconcile(&present, &stored);

    assert_eq!(result.order, names(&["b.png", "c.png"]));
    assert!(result.dirty);
}

#[test]
fn test_idempotence() {
    let cases: Vec<(Vec<String>, Vec<String>)> = vec![
        (names(&["a", "b", "c"]), names(&["c", "a"])),
        (names(&["x"]), names(&["y", "z"])),
        (names(&["m", "n"]), Vec::new()),
        (Vec::new(), names(&["gone"])),
        (Vec::new(), Vec::new()),
        (names(&["a", "b"]), names(&["b", "b", "a", "ghost"])),
    ];

    for (present, stored) in cases {
        let first = reconcile(&present, &stored);
        let second = reconcile(&present, &first.order);

        assert_eq!(second.order, first.order, "order must be stable");
        assert!(!second.dirty, "second pass must never be dirty");
    }
}

#[test]
fn test_completeness() {
    let present = names(&["d", "a", "c", "b"]);
    let stored = names(&["b", "ghost1", "c", "ghost2"]);

    let result = reconcile(&present, &stored);

    let result_set: HashSet<&String> = result.order.iter().collect();
    let present_set: HashSet<&String> = present.iter().collect();
    assert_eq!(result_set, present_set);
    assert_eq!(result.order.len(), present.len());
}

#[test]
fn test_relative_order_preserved_for_kept_names() {
    let present = names(&["e", "c", "a", "d", "b"]);
    let stored = names(&["b", "x", "d", "a", "y"]);

    let result = reconcile(&present, &stored);

    // b, d, a gardent leur ordre relatif du stockage
    let pos = |n: &str| result.order.iter().position(|v| v == n).unwrap();
    assert!(pos("b") < pos("d"));
    assert!(pos("d") < pos("a"));
}

#[test]
fn test_missing_names_follow_present_enumeration_order() {
    // L'énumération du magasin arrive du plus récent au plus ancien ;
    // les nouveaux venus doivent suivre cet ordre en fin de liste
    let present = names(&["new_recent", "kept", "new_old"]);
    let stored = names(&["kept"]);

    let result = reconcile(&present, &stored);

    assert_eq!(result.order, names(&["kept", "new_recent", "new_old"]));
}
