//! Dataset loading and validation tests

use std::io::Write;

use ticketdesk::config::WorkflowConfig;
use ticketdesk::models::StatusId;
use ticketdesk::Dataset;

const BUNDLE: &str = r#"{
    "statuses": [
        {"id": 1, "name": "New"},
        {"id": 2, "name": "Resolved"}
    ],
    "categories": [{"id": 1, "name": "Network"}],
    "kinds": [{"id": 1, "name": "Incident"}],
    "users": [
        {"id": 1, "name": "Jean Dupont", "role": "technician"},
        {"id": 2, "name": "Admin", "role": "admin"}
    ],
    "tickets": [
        {
            "id": 1,
            "title": "Network issue",
            "description": "No WiFi on the second floor",
            "requester": "Alice Johnson",
            "status_id": 2,
            "category_id": 1,
            "kind_id": 1,
            "assignee_ids": [1],
            "created_at": "2024-01-15T08:00:00Z",
            "resolved_at": "2024-01-15T14:30:00Z"
        },
        {
            "id": 2,
            "title": "VPN issue",
            "requester": "Bob Smith",
            "status_id": 1,
            "category_id": 1,
            "kind_id": 1,
            "created_at": "2024-01-16T09:00:00Z"
        }
    ]
}"#;

#[test]
fn load_bundle_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BUNDLE.as_bytes()).unwrap();

    let dataset = Dataset::from_path(file.path()).unwrap();
    assert_eq!(dataset.tickets.len(), 2);
    assert_eq!(dataset.users.len(), 2);
    assert_eq!(dataset.taxonomy.statuses.len(), 2);
    assert!(dataset.validate().is_ok());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Dataset::from_path("/nonexistent/tickets.json").unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = Dataset::from_json_str("{not json").unwrap_err();
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
}

#[test]
fn workflow_policy_flags_terminal_statuses() {
    let mut dataset = Dataset::from_json_str(BUNDLE).unwrap();

    // The bundle carries no terminal flags of its own
    assert!(!dataset.taxonomy.is_terminal(StatusId(2)));

    dataset.apply_workflow(&WorkflowConfig::default());
    assert!(dataset.taxonomy.is_terminal(StatusId(2)));
    assert!(!dataset.taxonomy.is_terminal(StatusId(1)));
}

#[test]
fn omitted_sections_default_to_empty() {
    let dataset = Dataset::from_json_str(r#"{"tickets": []}"#).unwrap();
    assert!(dataset.taxonomy.statuses.is_empty());
    assert!(dataset.taxonomy.categories.is_empty());
    assert!(dataset.taxonomy.kinds.is_empty());
    assert!(dataset.users.is_empty());
    assert!(dataset.validate().is_ok());
}

#[test]
fn dangling_reference_is_rejected() {
    let mut dataset = Dataset::from_json_str(BUNDLE).unwrap();
    dataset.users.clear();

    let err = dataset.validate().unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}
