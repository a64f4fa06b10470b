//! # Counter Repository
//!
//! Persisted per-entity sequences. [`next_value`] is the single atomic
//! section of the application: one UPDATE increments the row in place, so
//! two concurrent creations can never observe the same value.

use crate::error::RepositoryError;
use crate::models::counter::{self, ActiveModel as CounterActiveModel, Entity as Counter};
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

/// Atomically increment and return the next value of the sequence for
/// `entity`, creating the counter row on first use.
///
/// Call this on the transaction that inserts the row needing the code, so
/// a failed insert rolls the increment back with it.
pub async fn next_value<C: ConnectionTrait>(
    conn: &C,
    entity: &str,
) -> Result<i32, RepositoryError> {
    for attempt in 0..2 {
        let result = Counter::update_many()
            .col_expr(
                counter::Column::LastValue,
                Expr::col(counter::Column::LastValue).add(1),
            )
            .col_expr(
                counter::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(counter::Column::Entity.eq(entity))
            .exec(conn)
            .await?;

        if result.rows_affected > 0 {
            let row = Counter::find()
                .filter(counter::Column::Entity.eq(entity))
                .one(conn)
                .await?
                .ok_or_else(|| {
                    RepositoryError::not_found(format!("Counter for entity '{}' vanished", entity))
                })?;
            return Ok(row.last_value);
        }

        // First use: seed the row at 1. A concurrent seeder may win the
        // unique index race, in which case the retry takes the UPDATE path.
        let now = Utc::now();
        let seeded = CounterActiveModel {
            id: Set(Uuid::new_v4()),
            entity: Set(entity.to_string()),
            last_value: Set(1),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(conn)
        .await;

        match seeded {
            Ok(row) => return Ok(row.last_value),
            Err(err) if attempt == 0 => {
                tracing::debug!(?err, entity, "Counter seed lost the race, retrying increment");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(RepositoryError::conflict(format!(
        "Could not obtain next value for counter '{}'",
        entity
    )))
}

/// Read-only access to counters
pub struct CounterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CounterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Last value handed out for `entity`, if the counter exists yet
    pub async fn current_value(&self, entity: &str) -> Result<Option<i32>, RepositoryError> {
        let row = Counter::find()
            .filter(counter::Column::Entity.eq(entity))
            .one(self.db)
            .await?;

        Ok(row.map(|counter| counter.last_value))
    }
}
