use rms_core::db::open_db_in_memory;
use rms_core::{
    run_in_transaction, NewProject, Page, Project, ProjectService, Rasa, ServiceError,
};

#[test]
fn created_project_reads_back_identically() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::sqlite(&conn).unwrap();

    let input = NewProject {
        title: "Test Project".to_string(),
        description: Some("Test Description".to_string()),
        expected_rasa: Some("karuna".to_string()),
        reference_links: Some(vec!["https://example.com/ref".to_string()]),
    };
    let created = service.create_project(&input).unwrap();
    assert!(created.id > 0);
    assert!(created.created_at > 0);
    assert_eq!(created.created_at, created.updated_at);

    let loaded = service.get_project(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.title, "Test Project");
    assert_eq!(loaded.description.as_deref(), Some("Test Description"));
    assert_eq!(loaded.expected_rasa, Rasa::Karuna);
    assert_eq!(
        loaded.reference_links,
        Some(vec!["https://example.com/ref".to_string()])
    );
    assert_eq!(loaded.creator_id, None);
}

#[test]
fn omitted_rasa_defaults_to_shringara() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::sqlite(&conn).unwrap();

    let created = service.create_project(&NewProject::new("defaults")).unwrap();
    assert_eq!(created.expected_rasa, Rasa::Shringara);
    assert_eq!(created.description, None);
    assert_eq!(created.reference_links, None);
}

#[test]
fn invalid_rasa_is_rejected_without_writing() {
    let mut conn = open_db_in_memory().unwrap();

    let input = NewProject {
        expected_rasa: Some("melancholy".to_string()),
        ..NewProject::new("bad rasa")
    };
    let err = run_in_transaction(&mut conn, |tx| -> Result<Project, ServiceError> {
        ProjectService::sqlite(tx)?.create_project(&input)
    })
    .unwrap_err();
    match err {
        ServiceError::InvalidEnum(invalid) => {
            assert_eq!(invalid.value, "melancholy");
            assert_eq!(invalid.valid_values.len(), 9);
        }
        other => panic!("unexpected error: {other}"),
    }

    let service = ProjectService::sqlite(&conn).unwrap();
    assert!(service.list_projects(Page::default()).unwrap().is_empty());
}

#[test]
fn blank_title_is_a_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::sqlite(&conn).unwrap();

    let err = service.create_project(&NewProject::new("   ")).unwrap_err();
    assert!(matches!(err, ServiceError::Constraint(ref violation) if violation.field == "title"));
}

#[test]
fn get_missing_project_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::sqlite(&conn).unwrap();

    let err = service.get_project(999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Project", id: 999 }));
    assert_eq!(err.to_string(), "Project with id 999 not found");
}

#[test]
fn list_returns_insertion_order_and_respects_window() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::sqlite(&conn).unwrap();

    for index in 1..=5 {
        service
            .create_project(&NewProject::new(format!("Project {index}")))
            .unwrap();
    }

    let titles = |page: Page| -> Vec<String> {
        service
            .list_projects(page)
            .unwrap()
            .into_iter()
            .map(|project| project.title)
            .collect()
    };

    assert_eq!(
        titles(Page::default()),
        ["Project 1", "Project 2", "Project 3", "Project 4", "Project 5"]
    );
    assert_eq!(titles(Page::new(Some(1), Some(2))), ["Project 2", "Project 3"]);
    assert_eq!(titles(Page::new(Some(4), Some(10))), ["Project 5"]);
    assert!(titles(Page::new(Some(10), None)).is_empty());
    assert!(titles(Page::new(None, Some(0))).is_empty());

    let first = titles(Page::new(Some(1), Some(3)));
    let second = titles(Page::new(Some(1), Some(3)));
    assert_eq!(first, second);
}
