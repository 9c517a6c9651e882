//! Student entity - A person tracked through one or more university applications.
//!
//! `highest_status` and `highest_intake` are denormalized from the student's
//! applications and are only ever written by the summary refresh.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique identifier for the student
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact email, unique across students
    #[sea_orm(unique)]
    pub email: String,
    /// Phone number including country code
    pub phone: String,
    /// Most advanced status among the student's eligible applications
    pub highest_status: Option<String>,
    /// Intake of the application that produced `highest_status`
    pub highest_intake: Option<String>,
    /// Internal notes
    pub notes: Option<String>,
    /// When the student was created
    pub created_at: DateTime,
    /// When the student (or its summary) was last modified
    pub updated_at: DateTime,
    /// Soft delete flag - if true, the student is hidden but data is preserved
    pub is_deleted: bool,
    /// When the student was soft deleted
    pub deleted_at: Option<DateTime>,
}

/// Defines relationships between Student and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One student has many applications
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::SoftDelete for Entity {
    fn deleted_column() -> Self::Column {
        Column::IsDeleted
    }
}
