//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod application;
pub mod student;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

// Re-export specific types to avoid conflicts
pub use application::{
    Column as ApplicationColumn, Entity as Application, Model as ApplicationModel,
};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};

/// Soft delete capability for entities that keep a deleted flag instead of
/// removing rows.
///
/// Anything that reads "live" rows goes through [`SoftDelete::find_live`], so
/// the filter is the same everywhere regardless of which table is queried.
pub trait SoftDelete: EntityTrait {
    /// The boolean column marking a row as deleted.
    fn deleted_column() -> Self::Column;

    /// `SELECT` restricted to rows that are not soft deleted.
    fn find_live() -> Select<Self> {
        Self::find().filter(Self::deleted_column().eq(false))
    }
}
