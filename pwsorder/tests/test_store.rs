use pwsorder::OrderStore;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn create_test_store() -> (TempDir, OrderStore) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = OrderStore::new(temp_dir.path().join("order.json"));
    (temp_dir, store)
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_load_missing_file_is_empty() {
    let (_temp_dir, store) = create_test_store();

    assert!(store.load().is_empty());
}

#[test]
fn test_load_corrupt_file_is_empty() {
    let (_temp_dir, store) = create_test_store();

    fs::write(store.path(), b"{not json at all").unwrap();
    assert!(store.load().is_empty());

    // Un JSON valide mais d'un autre type est traité pareil
    fs::write(store.path(), b"{\"order\": 3}").unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn test_save_then_load_round_trip() {
    let (_temp_dir, store) = create_test_store();

    let order = names(&["b.png", "a.png"]);
    store.save(&order).unwrap();

    assert_eq!(store.load(), order);
}

#[test]
fn test_save_leaves_no_temp_file_behind() {
    let (temp_dir, store) = create_test_store();

    store.save(&names(&["a.png"])).unwrap();
    store.save(&names(&["b.png", "a.png"])).unwrap();

    let entries: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();

    assert_eq!(entries, vec!["order.json".to_string()]);
}

#[test]
fn test_reconciled_with_repairs_and_persists() {
    let (_temp_dir, store) = create_test_store();

    store.save(&names(&["c.mp4", "z.png"])).unwrap();

    let present = names(&["c.mp4", "a.png", "b.png"]);
    let order = store.reconciled_with(&present);

    assert_eq!(order, names(&["c.mp4", "a.png", "b.png"]));

    // L'ordre réparé doit avoir été réécrit pour stopper la dérive
    assert_eq!(store.load(), order);
}

#[test]
fn test_reconciled_with_clean_order_does_not_rewrite() {
    let (_temp_dir, store) = create_test_store();

    let order = names(&["a.png", "b.png"]);
    store.save(&order).unwrap();
    let mtime_before = fs::metadata(store.path()).unwrap().modified().unwrap();

    let result = store.reconciled_with(&order);
    assert_eq!(result, order);

    let mtime_after = fs::metadata(store.path()).unwrap().modified().unwrap();
    assert_eq!(mtime_before, mtime_after);
}

#[test]
fn test_apply_reorder_drops_unknown_names() {
    let (_temp_dir, store) = create_test_store();

    let present = names(&["a.png", "b.png"]);
    let order = store
        .apply_reorder(&names(&["ghost.png", "b.png", "a.png"]), &present)
        .unwrap();

    assert_eq!(order, names(&["b.png", "a.png"]));
    assert_eq!(store.load(), order);
}

#[test]
fn test_apply_reorder_appends_omitted_present_names() {
    let (_temp_dir, store) = create_test_store();

    let present = names(&["c.png", "a.png", "b.png"]);
    let order = store.apply_reorder(&names(&["b.png"]), &present).unwrap();

    // b.png en tête, le reste replacé dans l'ordre d'énumération
    assert_eq!(order, names(&["b.png", "c.png", "a.png"]));
}

#[test]
fn test_apply_reorder_result_is_permutation_of_present() {
    let (_temp_dir, store) = create_test_store();

    let present = names(&["a", "b", "c", "d"]);
    let proposed = names(&["d", "ghost", "a", "d", "z"]);

    let order = store.apply_reorder(&proposed, &present).unwrap();

    let order_set: HashSet<&String> = order.iter().collect();
    let present_set: HashSet<&String> = present.iter().collect();
    assert_eq!(order_set, present_set);
    assert_eq!(order.len(), present.len());
}

#[test]
fn test_remove_name_rewrites_order() {
    let (_temp_dir, store) = create_test_store();

    store.save(&names(&["a.png", "b.png", "c.png"])).unwrap();
    store.remove_name("a.png").unwrap();

    assert_eq!(store.load(), names(&["b.png", "c.png"]));
}

#[test]
fn test_remove_absent_name_is_noop() {
    let (_temp_dir, store) = create_test_store();

    store.remove_name("never.png").unwrap();

    // Pas d'occurrence : le fichier n'est même pas créé
    assert!(!store.path().exists());
}
