use super::*;

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k"), None);
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k");
    assert_eq!(store.get("k"), None);
}

#[test]
fn json_round_trip() {
    let store = MemoryStore::new();
    save_json(&store, "flag", &true);
    save_json(&store, "color", "#fff");
    assert_eq!(load_json::<bool>(&store, "flag"), Some(true));
    assert_eq!(load_json::<String>(&store, "color").as_deref(), Some("#fff"));
}

#[test]
fn load_json_missing_or_malformed_is_none() {
    let store = MemoryStore::new();
    assert_eq!(load_json::<bool>(&store, "absent"), None);
    store.set("bad", "{not json");
    assert_eq!(load_json::<bool>(&store, "bad"), None);
    store.set("wrong-type", "\"yes\"");
    assert_eq!(load_json::<bool>(&store, "wrong-type"), None);
}

#[test]
#[cfg(not(feature = "hydrate"))]
fn local_store_is_inert_outside_browser() {
    let store = LocalStore;
    store.set("k", "v");
    assert_eq!(store.get("k"), None);
    store.remove("k");
}
