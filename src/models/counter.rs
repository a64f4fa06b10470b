//! Counter entity model
//!
//! Per-entity persisted sequences. Incremented atomically inside the
//! transaction that creates the row needing a fresh code.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    /// Unique identifier for the counter (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Entity the sequence belongs to (e.g. "employee"), unique
    pub entity: String,

    /// Last value handed out; 0 means nothing minted yet
    pub last_value: i32,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
