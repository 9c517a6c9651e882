//! Student business logic - Creating, looking up and retiring students.
//!
//! Students are soft deleted: their rows and applications are kept but hidden
//! from every live lookup. The summary fields are written only through
//! [`save_summary`].

use crate::{
    core::resolver::StatusSummary,
    entities::{Application, SoftDelete, Student, application, student},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Deserialize;
use tracing::info;

/// Input for [`create_student`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Phone number including country code
    pub phone: String,
    /// Internal notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Finds a live student by ID.
pub async fn get_student<C>(db: &C, student_id: i64) -> Result<Option<student::Model>>
where
    C: ConnectionTrait,
{
    Student::find_live()
        .filter(student::Column::Id.eq(student_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a live student by email address.
pub async fn get_student_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<student::Model>> {
    Student::find_live()
        .filter(student::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all live students ordered by ID.
pub async fn get_all_active_students(db: &DatabaseConnection) -> Result<Vec<student::Model>> {
    Student::find_live()
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a student with an empty summary.
///
/// # Errors
/// Returns an error if:
/// - The name or phone is empty
/// - The email is not an address
/// - Any student, including a soft deleted one, already uses the email
pub async fn create_student(db: &DatabaseConnection, new: NewStudent) -> Result<student::Model> {
    let name = new.name.trim();
    let phone = new.phone.trim();
    let email = new.email.trim().to_lowercase();

    if name.is_empty() {
        return Err(Error::Validation {
            message: "Student name cannot be empty".to_string(),
        });
    }
    if phone.is_empty() {
        return Err(Error::Validation {
            message: "Student phone cannot be empty".to_string(),
        });
    }
    if !email.contains('@') {
        return Err(Error::Validation {
            message: format!("'{email}' is not a valid email address"),
        });
    }
    // Deleted students keep their email, the column is unique across all rows
    let taken = Student::find()
        .filter(student::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;
    if let Some(existing) = taken {
        let state = if existing.is_deleted { "a deleted" } else { "another" };
        return Err(Error::Validation {
            message: format!("Email '{email}' is already used by {state} student"),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let student = student::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email),
        phone: Set(phone.to_string()),
        highest_status: Set(None),
        highest_intake: Set(None),
        notes: Set(new.notes),
        created_at: Set(now),
        updated_at: Set(now),
        is_deleted: Set(false),
        deleted_at: Set(None),
        ..Default::default()
    };

    let student = student.insert(db).await?;
    info!(student_id = student.id, "Created student");
    Ok(student)
}

/// Writes a summary onto a student and stamps `updated_at`.
///
/// The three columns go out in a single UPDATE, so they change together or
/// not at all.
pub async fn save_summary<C>(
    db: &C,
    student: student::Model,
    summary: StatusSummary,
) -> Result<student::Model>
where
    C: ConnectionTrait,
{
    let mut student: student::ActiveModel = student.into();
    student.highest_status = Set(summary.highest_status);
    student.highest_intake = Set(summary.highest_intake);
    student.updated_at = Set(chrono::Utc::now().naive_utc());

    student.update(db).await.map_err(Into::into)
}

/// Soft deletes a student together with all of its applications.
///
/// # Errors
/// Returns an error if the student does not exist or is already deleted.
pub async fn delete_student(db: &DatabaseConnection, student_id: i64) -> Result<student::Model> {
    let txn = db.begin().await?;

    let student = get_student(&txn, student_id)
        .await?
        .ok_or(Error::StudentNotFound { id: student_id })?;

    let now = chrono::Utc::now().naive_utc();

    Application::update_many()
        .col_expr(application::Column::IsDeleted, Expr::value(true))
        .col_expr(application::Column::DeletedAt, Expr::value(now))
        .col_expr(application::Column::UpdatedAt, Expr::value(now))
        .filter(application::Column::StudentId.eq(student_id))
        .filter(application::Column::IsDeleted.eq(false))
        .exec(&txn)
        .await?;

    let mut student: student::ActiveModel = student.into();
    student.is_deleted = Set(true);
    student.deleted_at = Set(Some(now));
    student.updated_at = Set(now);
    let student = student.update(&txn).await?;

    txn.commit().await?;

    info!(student_id, "Soft deleted student and its applications");
    Ok(student)
}
