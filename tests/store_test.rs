use camera_extrinsics_prior::io::{object_from_json, object_to_json, parse_extrinsics, read_prior_store, write_extrinsics};
use camera_extrinsics_prior::{CameraExtrinsicsPrior, ExtrinsicsError, Prior, PriorStore};
use nalgebra as na;

const RECORDS: &str = "3
a.jpg 1 2 3 1 0 0 0 1 0 0 0 1
b.jpg 4 5 6 0 1 0 -1 0 0 0 0 1
c.jpg 7 8 9 1 0 0 0 0 -1 0 1 0
";

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}_{}", std::process::id(), name))
}

#[test]
fn test_store_lookup_by_name() {
    let store = parse_extrinsics(RECORDS).unwrap().into_store();
    assert_eq!(store.len(), 3);
    assert!(store.contains("b.jpg"));
    assert_eq!(
        store.get("b.jpg").unwrap().position_vector(),
        Some(na::Vector3::new(4.0, 5.0, 6.0))
    );
    assert!(store.get("missing.jpg").is_none());
}

#[test]
fn test_duplicate_key_last_write_wins() {
    let text = "2\nx 1 1 1 1 0 0 0 1 0 0 0 1\nx 2 2 2 1 0 0 0 1 0 0 0 1\n";
    let store = parse_extrinsics(text).unwrap().into_store();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("x").unwrap().position[0].value(), Some(2.0));
}

#[test]
fn test_parsing_twice_gives_equal_stores() {
    let s0 = parse_extrinsics(RECORDS).unwrap().into_store();
    let s1 = parse_extrinsics(RECORDS).unwrap().into_store();
    assert_eq!(s0, s1);
}

#[test]
fn test_read_prior_store_from_file() {
    let path = temp_path("read_prior_store.txt");
    std::fs::write(&path, RECORDS).unwrap();
    let store = read_prior_store(&path).unwrap();
    assert_eq!(store.len(), 3);
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(
        read_prior_store("non_existent_path.txt"),
        Err(ExtrinsicsError::Io(_))
    ));
}

#[test]
fn test_write_then_read_back() {
    let mut store = parse_extrinsics(RECORDS).unwrap().into_store();
    let mut partial = CameraExtrinsicsPrior::default();
    partial.set_position(&na::Vector3::new(1.0, 1.0, 1.0));
    store.insert("partial.jpg", partial);

    let mut buf = Vec::new();
    let written = write_extrinsics(&mut buf, &store).unwrap();
    assert_eq!(written, 3);

    let back = parse_extrinsics(std::str::from_utf8(&buf).unwrap()).unwrap().into_store();
    assert!(!back.contains("partial.jpg"));
    for (image_id, prior) in back.iter() {
        assert_eq!(Some(prior), store.get(image_id));
    }
}

#[test]
fn test_store_json() {
    let mut store = PriorStore::new();
    let mut prior = CameraExtrinsicsPrior::default();
    prior.position[2] = Prior::new(0.0);
    store.insert("z.jpg", prior);

    let path = temp_path("store.json");
    let path_str = path.to_str().unwrap();
    object_to_json(path_str, &store).unwrap();
    let loaded: PriorStore = object_from_json(path_str).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, store);
    let z = loaded.get("z.jpg").unwrap();
    assert!(!z.position[0].is_set());
    assert_eq!(z.position[2].value(), Some(0.0));
}
