//! Salary entity model
//!
//! One row per employee per (year, month). Monetary amounts are doubles;
//! net pay is derived at presentation time and never stored.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Monthly salary entry for an employee
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Salary)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    /// Unique identifier for the salary entry (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub employee_id: Uuid,

    pub year: i32,

    /// Month of the entry, 1..=12
    pub month: i32,

    /// Base salary for the month
    pub salaire: f64,

    /// Bonus, defaults to 0
    pub prime: f64,

    /// Absence in working days, defaults to 0
    pub absence: f64,

    /// Advance already paid out, deducted from net pay
    pub avance: f64,

    pub date_avance: Option<Date>,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
