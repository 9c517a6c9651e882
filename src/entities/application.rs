//! Application entity - One university application belonging to a student.
//!
//! Each application has a `student_id`, university and program names, an intake
//! such as `"Jan 2026"`, and a status from the configured vocabulary.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    /// Unique identifier for the application
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the student this application belongs to
    pub student_id: i64,
    /// Name of the university applied to
    pub university_name: String,
    /// Name of the academic program
    pub program_name: String,
    /// Targeted intake period, free text like `"Jan 2026"` or `"September 2026"`
    pub intake: String,
    /// Current status, e.g. `"Offer Received"`
    pub status: String,
    /// Additional notes
    pub notes: Option<String>,
    /// Reference issued by the university, unique when present
    #[sea_orm(unique)]
    pub external_id: Option<String>,
    /// When the application was created
    pub created_at: DateTime,
    /// When the application was last modified
    pub updated_at: DateTime,
    /// Soft delete flag
    pub is_deleted: bool,
    /// When the application was soft deleted
    pub deleted_at: Option<DateTime>,
}

/// Defines relationships between Application and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each application belongs to one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::SoftDelete for Entity {
    fn deleted_column() -> Self::Column {
        Column::IsDeleted
    }
}

impl crate::core::resolver::ApplicationRecord for Model {
    fn status(&self) -> &str {
        &self.status
    }

    fn intake(&self) -> &str {
        &self.intake
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}
