use rms_core::db::open_db_in_memory;
use rms_core::{
    run_in_transaction, NewContentItem, NewProject, NewRating, Page, ProjectService, Rasa,
    Rating, RatingListQuery, ServiceError, SqliteContentService, SqliteRatingService,
};
use rusqlite::Connection;

fn create_project(conn: &Connection, title: &str) -> i64 {
    ProjectService::sqlite(conn)
        .unwrap()
        .create_project(&NewProject::new(title))
        .unwrap()
        .id
}

fn rating_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM ratings;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_rating_persists_and_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn, "Test Project");
    let service = SqliteRatingService::sqlite(&conn).unwrap();

    let mut input = NewRating::new(project_id, "shringara", 8);
    input.feedback = Some("Great content!".to_string());
    let rating = service.create_rating(&input).unwrap();

    assert!(rating.id > 0);
    assert_eq!(rating.project_id, Some(project_id));
    assert_eq!(rating.rasa, Rasa::Shringara);
    assert_eq!(rating.rating_value, Some(8));
    assert_eq!(rating.feedback.as_deref(), Some("Great content!"));
    assert_eq!(rating.user_id, None);
    assert!(rating.created_at > 0);
}

#[test]
fn missing_project_wins_over_every_other_input_problem() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteRatingService::sqlite(&conn).unwrap();

    for input in [
        NewRating::new(999, "SHRINGARA", 8),
        NewRating::new(999, "not-a-rasa", 8),
        NewRating::new(999, "SHRINGARA", 11),
        NewRating::new(999, "not-a-rasa", -4),
    ] {
        let err = service.create_rating(&input).unwrap_err();
        assert!(
            matches!(err, ServiceError::NotFound { entity: "Project", id: 999 }),
            "unexpected error: {err}"
        );
    }
    assert_eq!(rating_count(&conn), 0);
}

#[test]
fn rasa_is_checked_before_rating_value() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn, "ordering");
    let service = SqliteRatingService::sqlite(&conn).unwrap();

    let err = service
        .create_rating(&NewRating::new(project_id, "nope", 11))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidEnum(_)));
}

#[test]
fn out_of_range_rating_values_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn, "bounds");
    let service = SqliteRatingService::sqlite(&conn).unwrap();

    for value in [i64::MIN, -1, 0, 11, 100] {
        let err = service
            .create_rating(&NewRating::new(project_id, "HASYA", value))
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::Constraint(ref violation) if violation.field == "rating_value"),
            "value {value} should be rejected"
        );
    }
    for value in [1, 10] {
        service
            .create_rating(&NewRating::new(project_id, "HASYA", value))
            .unwrap();
    }
    assert_eq!(rating_count(&conn), 2);
}

#[test]
fn unknown_user_and_content_item_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn, "refs");
    let service = SqliteRatingService::sqlite(&conn).unwrap();

    let mut with_user = NewRating::new(project_id, "VEERA", 5);
    with_user.user_id = Some(7);
    let err = service.create_rating(&with_user).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "User", id: 7 }));

    let mut with_item = NewRating::new(project_id, "VEERA", 5);
    with_item.content_item_id = Some(3);
    let err = service.create_rating(&with_item).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "ContentItem", id: 3 }));
}

#[test]
fn rating_links_user_and_content_item_of_same_project() {
    let conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn, "linked");
    let other_project_id = create_project(&conn, "other");
    conn.execute(
        "INSERT INTO users (username, email, hashed_password) VALUES ('asha', 'asha@example.com', 'x');",
        [],
    )
    .unwrap();
    let user_id = conn.last_insert_rowid();

    let contents = SqliteContentService::sqlite(&conn).unwrap();
    let item = contents
        .create_content_item(&NewContentItem {
            project_id,
            title: "poster".to_string(),
            ..NewContentItem::default()
        })
        .unwrap();

    let service = SqliteRatingService::sqlite(&conn).unwrap();
    let mut input = NewRating::new(project_id, "adbhuta", 9);
    input.user_id = Some(user_id);
    input.content_item_id = Some(item.id);
    let rating = service.create_rating(&input).unwrap();
    assert_eq!(rating.user_id, Some(user_id));
    assert_eq!(rating.content_item_id, Some(item.id));

    let mut mismatched = NewRating::new(other_project_id, "adbhuta", 9);
    mismatched.content_item_id = Some(item.id);
    let err = service.create_rating(&mismatched).unwrap_err();
    assert!(matches!(err, ServiceError::Constraint(ref violation) if violation.field == "content_item_id"));
}

#[test]
fn list_ratings_filters_by_project_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let first = create_project(&conn, "first");
    let second = create_project(&conn, "second");
    let service = SqliteRatingService::sqlite(&conn).unwrap();

    service.create_rating(&NewRating::new(first, "SHRINGARA", 8)).unwrap();
    service.create_rating(&NewRating::new(second, "RAUDRA", 3)).unwrap();
    service.create_rating(&NewRating::new(first, "HASYA", 7)).unwrap();

    let filtered = service
        .list_ratings(&RatingListQuery {
            project_id: Some(first),
            page: Page::default(),
        })
        .unwrap();
    let values: Vec<_> = filtered.iter().map(|rating| rating.rating_value).collect();
    assert_eq!(values, [Some(8), Some(7)]);

    let all = service.list_ratings(&RatingListQuery::default()).unwrap();
    assert_eq!(all.len(), 3);

    let window = service
        .list_ratings(&RatingListQuery {
            project_id: None,
            page: Page::new(Some(1), Some(1)),
        })
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].rasa, Rasa::Raudra);
}

#[test]
fn failed_create_inside_unit_of_work_leaves_no_rating() {
    let mut conn = open_db_in_memory().unwrap();
    let project_id = create_project(&conn, "atomic");

    let result = run_in_transaction(&mut conn, |tx| -> Result<Rating, ServiceError> {
        let service = SqliteRatingService::sqlite(tx)?;
        service.create_rating(&NewRating::new(project_id, "KARUNA", 6))?;
        service.create_rating(&NewRating::new(project_id, "KARUNA", 60))
    });
    assert!(matches!(result, Err(ServiceError::Constraint(_))));
    assert_eq!(rating_count(&conn), 0);
}
