//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        application::{self, NewApplication},
        resolver::StatusResolver,
        student::{self, NewStudent},
    },
    entities,
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test student with sensible defaults.
///
/// # Defaults
/// * `email`: derived from the name, e.g. `"asha.rao@example.com"`
/// * `phone`: `"+1 555 0100"`
pub async fn create_test_student(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::student::Model> {
    student::create_student(
        db,
        NewStudent {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1 555 0100".to_string(),
            notes: None,
        },
    )
    .await
}

/// Creates an application through the normal path, so the student summary is
/// refreshed.
pub async fn create_test_application(
    db: &DatabaseConnection,
    resolver: &StatusResolver,
    student_id: i64,
    status: &str,
    intake: &str,
) -> Result<entities::application::Model> {
    let mutation = application::create_application(
        db,
        resolver,
        NewApplication {
            student_id,
            university_name: "Test University".to_string(),
            program_name: "Test Program".to_string(),
            intake: intake.to_string(),
            status: Some(status.to_string()),
            notes: None,
            external_id: None,
        },
    )
    .await?;
    Ok(mutation.record)
}

/// Inserts an application row directly, skipping validation and the summary
/// refresh. Use this for rows the public API would reject or to stage data
/// before calling a refresh by hand.
pub async fn insert_raw_application(
    db: &DatabaseConnection,
    student_id: i64,
    status: &str,
    intake: &str,
    is_deleted: bool,
) -> Result<entities::application::Model> {
    let now = chrono::Utc::now().naive_utc();
    let application = entities::application::ActiveModel {
        student_id: Set(student_id),
        university_name: Set("Raw University".to_string()),
        program_name: Set("Raw Program".to_string()),
        intake: Set(intake.to_string()),
        status: Set(status.to_string()),
        notes: Set(None),
        external_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        is_deleted: Set(is_deleted),
        deleted_at: Set(is_deleted.then_some(now)),
        ..Default::default()
    };
    application.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with one student and the default
/// vocabulary. Returns (db, resolver, student).
pub async fn setup_with_student()
-> Result<(DatabaseConnection, StatusResolver, entities::student::Model)> {
    let db = setup_test_db().await?;
    let student = create_test_student(&db, "Test Student").await?;
    Ok((db, StatusResolver::default(), student))
}
