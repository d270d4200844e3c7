//! Unique token store.
//!
//! Generates candidate tokens from the OS CSPRNG and retries persistence on
//! uniqueness collisions, up to a fixed attempt budget. The database makes
//! the check-and-insert atomic; this loop adds no locking of its own.

use crate::error::StoreError;
use sea_orm::{DbErr, SqlErr};
use std::future::Future;

/// Collision-retry budget for a single allocation.
pub const MAX_ALLOCATE_ATTEMPTS: usize = 20;

const TOKEN_BYTES: usize = 24;

/// Generate a secure random token: 24 CSPRNG bytes as 48 lowercase hex chars.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).expect("Failed to generate random bytes");
    hex::encode(bytes)
}

/// Result of one create-if-absent attempt.
#[derive(Debug)]
pub enum InsertOutcome<T> {
    Inserted(T),
    Collision,
}

/// Fold a SeaORM insert result into an [`InsertOutcome`].
///
/// A unique-constraint violation means another caller holds the candidate
/// token; the allocation loop treats it as a signal to try a fresh candidate.
/// Every other database error aborts the loop.
pub fn classify_unique_violation<T>(result: Result<T, DbErr>) -> Result<InsertOutcome<T>, DbErr> {
    match result {
        Ok(record) => Ok(InsertOutcome::Inserted(record)),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Ok(InsertOutcome::Collision)
        }
        Err(err) => Err(err),
    }
}

/// Persist a record under a freshly generated unique token.
///
/// `factory` receives a candidate token and attempts the insert, reporting
/// collisions through [`InsertOutcome`]. Exhausting the attempt budget is a
/// fatal [`StoreError::AllocationExhausted`]: it indicates a broken random
/// source or an undersized token space, not a transient condition.
pub async fn allocate<T, F, Fut>(factory: F) -> Result<T, StoreError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<InsertOutcome<T>, DbErr>>,
{
    allocate_with(generate_token, factory).await
}

/// Allocation loop with an injected candidate generator.
pub async fn allocate_with<T, G, F, Fut>(mut generator: G, mut factory: F) -> Result<T, StoreError>
where
    G: FnMut() -> String,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<InsertOutcome<T>, DbErr>>,
{
    for attempt in 1..=MAX_ALLOCATE_ATTEMPTS {
        let candidate = generator();
        match factory(candidate).await? {
            InsertOutcome::Inserted(record) => return Ok(record),
            InsertOutcome::Collision => {
                tracing::debug!(attempt, "token candidate collided, retrying");
            }
        }
    }
    Err(StoreError::AllocationExhausted {
        attempts: MAX_ALLOCATE_ATTEMPTS,
    })
}
