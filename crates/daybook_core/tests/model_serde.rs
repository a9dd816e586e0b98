use daybook_core::{Note, Task};

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task {
        id: 7,
        title: "pack bags".to_string(),
        description: "before friday".to_string(),
        completed: true,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "pack bags");
    assert_eq!(json["description"], "before friday");
    assert_eq!(json["completed"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_optional_fields_default_on_deserialize() {
    let decoded: Task = serde_json::from_str(r#"{"id":1,"title":"bare"}"#).unwrap();
    assert_eq!(decoded.description, "");
    assert!(!decoded.completed);
}

#[test]
fn note_serialization_uses_camel_case_created_at() {
    let note = Note {
        id: 3,
        title: "journal".to_string(),
        content: "day one".to_string(),
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    assert!(json.get("created_at").is_none());

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn note_content_defaults_on_deserialize() {
    let decoded: Note =
        serde_json::from_str(r#"{"id":2,"title":"bare","createdAt":1}"#).unwrap();
    assert_eq!(decoded.content, "");
    assert_eq!(decoded.created_at, 1);
}
