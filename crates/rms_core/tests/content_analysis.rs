use rms_core::db::open_db_in_memory;
use rms_core::{
    AnalysisInput, ContentListQuery, Gender, NewContentItem, NewProject, Page, ProjectService,
    ServiceError, SqliteContentService,
};
use rusqlite::Connection;
use serde_json::json;

fn create_project(conn: &Connection) -> i64 {
    ProjectService::sqlite(conn)
        .unwrap()
        .create_project(&NewProject::new("content host"))
        .unwrap()
        .id
}

#[test]
fn content_item_round_trips_open_metadata() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn);
    let service = SqliteContentService::sqlite(&conn).unwrap();

    let metadata = json!({
        "duration_s": 42.5,
        "tags": ["night", "rain"],
        "camera": {"lens": "35mm", "stabilized": true},
        "credits": null
    });
    let created = service
        .create_content_item(&NewContentItem {
            project_id,
            title: "Opening shot".to_string(),
            content_type: Some("video".to_string()),
            content_url: Some("s3://bucket/opening.mp4".to_string()),
            content_data: metadata.as_object().cloned(),
        })
        .unwrap();

    let loaded = service.get_content_item(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.content_type.as_deref(), Some("video"));
    assert_eq!(
        serde_json::Value::Object(loaded.content_data.unwrap()),
        metadata
    );
}

#[test]
fn content_item_requires_existing_project() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteContentService::sqlite(&conn).unwrap();

    let err = service
        .create_content_item(&NewContentItem {
            project_id: 12,
            title: "orphan".to_string(),
            ..NewContentItem::default()
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Project", id: 12 }));
}

#[test]
fn list_content_items_filters_by_project() {
    let conn = open_db_in_memory().unwrap();
    let first = create_project(&conn);
    let second = create_project(&conn);
    let service = SqliteContentService::sqlite(&conn).unwrap();

    for (project_id, title) in [(first, "a"), (second, "b"), (first, "c")] {
        service
            .create_content_item(&NewContentItem {
                project_id,
                title: title.to_string(),
                ..NewContentItem::default()
            })
            .unwrap();
    }

    let items = service
        .list_content_items(&ContentListQuery {
            project_id: Some(first),
            page: Page::default(),
        })
        .unwrap();
    let titles: Vec<_> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["a", "c"]);
}

#[test]
fn put_analysis_creates_then_updates_single_row() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn);
    let service = SqliteContentService::sqlite(&conn).unwrap();
    let item = service
        .create_content_item(&NewContentItem {
            project_id,
            title: "still".to_string(),
            ..NewContentItem::default()
        })
        .unwrap();

    let first = service
        .put_analysis(
            item.id,
            &AnalysisInput {
                gender_perspective: Some("female".to_string()),
                race_perspective: Some("South Indian".to_string()),
                ..AnalysisInput::default()
            },
        )
        .unwrap();
    assert_eq!(first.gender_perspective, Some(Gender::Female));

    let second = service
        .put_analysis(
            item.id,
            &AnalysisInput {
                religious_perspective: Some("Hindu".to_string()),
                analysis_notes: Some("revisited".to_string()),
                ..AnalysisInput::default()
            },
        )
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(second.gender_perspective, None);
    assert_eq!(second.race_perspective, None);
    assert_eq!(second.religious_perspective.as_deref(), Some("Hindu"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM philosophical_analyses;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(service.get_analysis(item.id).unwrap(), second);
}

#[test]
fn analysis_errors_are_typed() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn);
    let service = SqliteContentService::sqlite(&conn).unwrap();
    let item = service
        .create_content_item(&NewContentItem {
            project_id,
            title: "frame".to_string(),
            ..NewContentItem::default()
        })
        .unwrap();

    assert!(matches!(
        service.get_analysis(item.id),
        Err(ServiceError::AnalysisNotFound(id)) if id == item.id
    ));
    assert!(matches!(
        service.get_analysis(555),
        Err(ServiceError::NotFound { entity: "ContentItem", id: 555 })
    ));

    let err = service
        .put_analysis(
            item.id,
            &AnalysisInput {
                gender_perspective: Some("nonbinary-ish".to_string()),
                ..AnalysisInput::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidEnum(ref invalid) if invalid.kind == "gender"));

    let err = service
        .put_analysis(
            item.id,
            &AnalysisInput {
                race_perspective: Some("x".repeat(101)),
                ..AnalysisInput::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Constraint(_)));
}
