use mindmap_inference::{
    InferenceConfig, InferenceError, MindMapStore, SimilarityMode, CONFIG_ENV_VAR,
};
use mindmap_schemas::{Note, NoteId};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Adding notes rebuilds the graph each time
#[test]
fn test_add_note_recomputes_graph() {
    let mut store = MindMapStore::default();
    assert!(store.is_empty());
    assert!(store.nodes().is_empty());

    let first = store.add_note("The cell is the basic unit of life.");
    assert_eq!(store.nodes().len(), 1);
    assert_eq!(store.nodes()[0].val, 2);
    assert!(store.links().is_empty());

    let second = store.add_note("The cell membrane controls what enters and exits the cell.");
    assert_eq!(store.nodes().len(), 2);
    assert_eq!(store.links().len(), 1);
    assert_eq!(store.links()[0].source, first);
    assert_eq!(store.links()[0].target, second);

    store.add_note("Mitochondria are the powerhouse of the cell.");
    assert_eq!(store.len(), 3);
    assert_eq!(store.nodes().len(), 3);
    assert_eq!(store.links().len(), 3);
}

/// Generated ids are unique and carry the note prefix
#[test]
fn test_generated_ids() {
    let mut store = MindMapStore::default();
    let ids: Vec<NoteId> = (0..10).map(|i| store.add_note(format!("note {}", i))).collect();

    for id in &ids {
        assert!(id.as_str().starts_with("note_"));
    }
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_clear_all_empties_everything() {
    let mut store = MindMapStore::default();
    store.add_note("The cell is the basic unit of life.");
    store.add_note("Cell structure and function");

    store.clear_all();

    assert!(store.notes().is_empty());
    assert!(store.nodes().is_empty());
    assert!(store.links().is_empty());

    let snapshot = store.snapshot();
    assert!(snapshot.notes.is_empty());
    assert!(snapshot.nodes.is_empty());
    assert!(snapshot.links.is_empty());

    // The store is usable again after a clear
    store.add_note("Fresh start");
    assert_eq!(store.nodes().len(), 1);
}

#[test]
fn test_empty_note_content() {
    let mut store = MindMapStore::default();
    store.add_note("");
    store.add_note("   ");

    assert_eq!(store.nodes().len(), 2);
    assert!(store.links().is_empty());
    assert!(store.nodes().iter().all(|node| node.val == 2));
}

#[test]
fn test_import_then_add() {
    let mut store = MindMapStore::default();
    store
        .import_notes(vec![
            Note::new("a", "Energy storage overview notes", 100),
            Note::new("b", "Battery chemistry", 200),
        ])
        .unwrap();
    assert_eq!(store.nodes().len(), 2);

    let added = store.add_note("Energy storage costs");
    let added_note = store.notes().last().unwrap();
    assert_eq!(added_note.id, added);
    assert!(added_note.timestamp > 200);
    assert_eq!(store.graph().parent_of(&added).map(NoteId::as_str), Some("a"));
}

#[test]
fn test_failed_import_keeps_previous_graph() {
    let mut store = MindMapStore::default();
    store.add_note("The cell is the basic unit of life.");
    let before = store.snapshot();

    let result = store.import_notes(vec![Note::new("x", "late", 0)]);
    assert!(matches!(
        result,
        Err(InferenceError::NonMonotonicTimestamp { .. })
    ));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_snapshot_serializes_for_renderer() {
    let mut store = MindMapStore::default();
    store.add_note("The cell is the basic unit of life.");
    store.add_note("The cell membrane controls what enters and exits the cell.");

    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json["notes"].as_array().unwrap().len(), 2);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 2);

    let link = &json["links"][0];
    assert!(link["source"].is_string());
    assert!(link["target"].is_string());
    assert_eq!(link["value"], 2.0);
}

#[test]
fn test_config_file_drives_store() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r##"{{
            "similarity_threshold": 0.5,
            "palette": {{ "root_color": "#111111" }},
            "mode": "bucketed"
        }}"##
    )
    .unwrap();

    let config = InferenceConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.mode, SimilarityMode::Bucketed);

    let mut store = MindMapStore::new(&config);
    store.add_note("The cell is the basic unit of life.");
    store.add_note("The cell membrane controls what enters and exits the cell.");

    // 3/14 is below the raised threshold
    assert!(store.links().is_empty());
    assert!(store.nodes().iter().all(|node| node.color == "#111111"));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let result = InferenceConfig::from_json_file(&path);
    assert!(matches!(result, Err(InferenceError::ConfigRead { .. })));
}

#[test]
fn test_config_from_env() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "label_max_chars": 10 }}"#).unwrap();

    std::env::set_var(CONFIG_ENV_VAR, file.path());
    let config = InferenceConfig::from_env();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().label_max_chars, 10);
}
