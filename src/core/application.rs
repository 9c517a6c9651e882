//! Application business logic - Creating, updating and deleting applications.
//!
//! Every committed change is followed by a summary refresh of the owning
//! student. The refresh runs after the application write has committed, so a
//! failed refresh never undoes the write; it is logged and handed back in
//! [`Mutation::refresh`] so the caller can report the stale summary.

use crate::{
    core::{
        intake::is_valid_intake,
        resolver::StatusResolver,
        status::StatusVocabulary,
        student::get_student,
        summary::{RefreshOutcome, refresh_summary},
    },
    entities::{Application, SoftDelete, application},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{error, info};

/// Input for [`create_application`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewApplication {
    /// Owning student
    pub student_id: i64,
    /// University applied to
    pub university_name: String,
    /// Academic program
    pub program_name: String,
    /// Intake such as `"Jan 2026"`
    pub intake: String,
    /// Initial status, defaults to the vocabulary's least advanced status
    #[serde(default)]
    pub status: Option<String>,
    /// Additional notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Reference issued by the university
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Partial update for [`update_application`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationChanges {
    /// New university name
    pub university_name: Option<String>,
    /// New program name
    pub program_name: Option<String>,
    /// New intake
    pub intake: Option<String>,
    /// New status
    pub status: Option<String>,
    /// New notes
    pub notes: Option<String>,
}

/// A committed application write together with the summary refresh it
/// triggered.
#[derive(Debug)]
pub struct Mutation<T> {
    /// The record as committed
    pub record: T,
    /// Outcome of refreshing the owning student's summary
    pub refresh: Result<RefreshOutcome>,
}

impl<T> Mutation<T> {
    /// Whether the owning student's summary could not be brought up to date.
    pub const fn summary_is_stale(&self) -> bool {
        self.refresh.is_err()
    }
}

/// Lists a student's applications ordered by ID.
///
/// Soft deleted applications are only included when `include_deleted` is set.
pub async fn list_by_student<C>(
    db: &C,
    student_id: i64,
    include_deleted: bool,
) -> Result<Vec<application::Model>>
where
    C: ConnectionTrait,
{
    let query = if include_deleted {
        Application::find()
    } else {
        Application::find_live()
    };

    query
        .filter(application::Column::StudentId.eq(student_id))
        .order_by_asc(application::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a live application by ID.
pub async fn get_application(
    db: &DatabaseConnection,
    application_id: i64,
) -> Result<Option<application::Model>> {
    Application::find_live()
        .filter(application::Column::Id.eq(application_id))
        .one(db)
        .await
        .map_err(Into::into)
}

fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_status(vocabulary: &StatusVocabulary, status: &str) -> Result<String> {
    if !vocabulary.is_valid(status) {
        return Err(Error::InvalidStatus {
            status: status.to_string(),
            allowed: vocabulary.allowed_statuses(),
        });
    }
    Ok(status.to_string())
}

fn validate_intake(intake: &str) -> Result<String> {
    if !is_valid_intake(intake) {
        return Err(Error::InvalidIntake {
            intake: intake.to_string(),
        });
    }
    Ok(intake.trim().to_string())
}

async fn refresh_owner(
    db: &DatabaseConnection,
    resolver: &StatusResolver,
    student_id: i64,
) -> Result<RefreshOutcome> {
    let refresh = refresh_summary(db, resolver, student_id).await;
    if let Err(e) = &refresh {
        error!(student_id, "Student summary is stale after application change: {e}");
    }
    refresh
}

/// Creates an application and refreshes the owning student's summary.
///
/// # Errors
/// Returns an error if:
/// - The university or program name is empty
/// - The status is not in the vocabulary or the intake cannot be parsed
/// - The student does not exist or is deleted
/// - Another application, deleted or not, already has the external ID
/// - The insert fails
pub async fn create_application(
    db: &DatabaseConnection,
    resolver: &StatusResolver,
    new: NewApplication,
) -> Result<Mutation<application::Model>> {
    let university_name = require_text("University name", &new.university_name)?;
    let program_name = require_text("Program name", &new.program_name)?;
    let intake = validate_intake(&new.intake)?;
    let vocabulary = resolver.vocabulary();
    let status = match new.status.as_deref() {
        Some(status) => validate_status(vocabulary, status)?,
        None => vocabulary
            .default_status()
            .map(str::to_string)
            .ok_or_else(|| Error::Config {
                message: "Status vocabulary has no status for new applications".to_string(),
            })?,
    };

    if get_student(db, new.student_id).await?.is_none() {
        return Err(Error::StudentNotFound { id: new.student_id });
    }

    // Unique across all rows, deleted applications keep their reference
    if let Some(external_id) = new.external_id.as_deref() {
        let taken = Application::find()
            .filter(application::Column::ExternalId.eq(external_id))
            .one(db)
            .await?;
        if taken.is_some() {
            return Err(Error::Validation {
                message: format!("External ID '{external_id}' is already in use"),
            });
        }
    }

    let now = chrono::Utc::now().naive_utc();
    let application = application::ActiveModel {
        student_id: Set(new.student_id),
        university_name: Set(university_name),
        program_name: Set(program_name),
        intake: Set(intake),
        status: Set(status),
        notes: Set(new.notes),
        external_id: Set(new.external_id),
        created_at: Set(now),
        updated_at: Set(now),
        is_deleted: Set(false),
        deleted_at: Set(None),
        ..Default::default()
    };

    let record = application.insert(db).await?;
    info!(
        application_id = record.id,
        student_id = record.student_id,
        "Created application"
    );

    let refresh = refresh_owner(db, resolver, record.student_id).await;
    Ok(Mutation { record, refresh })
}

/// Applies `changes` to a live application and refreshes the owning student's
/// summary.
///
/// # Errors
/// Returns an error if:
/// - The application does not exist or is deleted
/// - A changed field fails the same validation as [`create_application`]
/// - The update fails
pub async fn update_application(
    db: &DatabaseConnection,
    resolver: &StatusResolver,
    application_id: i64,
    changes: ApplicationChanges,
) -> Result<Mutation<application::Model>> {
    let existing = get_application(db, application_id)
        .await?
        .ok_or(Error::ApplicationNotFound { id: application_id })?;

    let mut application: application::ActiveModel = existing.into();

    if let Some(name) = changes.university_name {
        application.university_name = Set(require_text("University name", &name)?);
    }
    if let Some(name) = changes.program_name {
        application.program_name = Set(require_text("Program name", &name)?);
    }
    if let Some(intake) = changes.intake {
        application.intake = Set(validate_intake(&intake)?);
    }
    if let Some(status) = changes.status {
        application.status = Set(validate_status(resolver.vocabulary(), &status)?);
    }
    if let Some(notes) = changes.notes {
        application.notes = Set(Some(notes));
    }
    application.updated_at = Set(chrono::Utc::now().naive_utc());

    let record = application.update(db).await?;
    info!(
        application_id,
        status = %record.status,
        "Updated application"
    );

    let refresh = refresh_owner(db, resolver, record.student_id).await;
    Ok(Mutation { record, refresh })
}

/// Soft deletes an application and refreshes the owning student's summary.
///
/// # Errors
/// Returns an error if the application does not exist or is already deleted.
pub async fn delete_application(
    db: &DatabaseConnection,
    resolver: &StatusResolver,
    application_id: i64,
) -> Result<Mutation<application::Model>> {
    let existing = get_application(db, application_id)
        .await?
        .ok_or(Error::ApplicationNotFound { id: application_id })?;

    let now = chrono::Utc::now().naive_utc();
    let mut application: application::ActiveModel = existing.into();
    application.is_deleted = Set(true);
    application.deleted_at = Set(Some(now));
    application.updated_at = Set(now);

    let record = application.update(db).await?;
    info!(application_id, "Soft deleted application");

    let refresh = refresh_owner(db, resolver, record.student_id).await;
    Ok(Mutation { record, refresh })
}
