//!
//! # Generic CRUD
//!
//! One parameterized set of create/read/update/delete operations shared by
//! every persisted entity with an integer id and created_at/updated_at
//! timestamps. Tasks and notes plug in through the [`Entity`] trait instead
//! of duplicating near-identical service code per table.
//!
//! All SQL is assembled with `sqlx::QueryBuilder` and bound parameters; no
//! user-supplied string ever lands in the query text.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::AppError;

/// A persisted entity the generic CRUD operations know how to handle.
///
/// Implementors describe their table and columns and how to bind their
/// payload types into an INSERT, a partial UPDATE, and an optional list
/// filter. The operations themselves never change per entity.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Table name. Must be a trusted constant, it is interpolated into SQL.
    const TABLE: &'static str;
    /// Column list for SELECT/RETURNING clauses.
    const COLUMNS: &'static str;

    /// Payload for `create`.
    type Create: Send + Sync;
    /// Partial payload for `update`; absent fields are left untouched.
    type Patch: Send + Sync;
    /// Optional equality filter for `list`.
    type Filter: Send + Sync;

    /// Appends `(columns...) VALUES (binds...)` for an INSERT.
    fn push_insert<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, payload: &'qb Self::Create);

    /// Appends `, column = bind` for every field present in the patch.
    /// Appending nothing is legal (an empty patch still bumps updated_at).
    fn push_set<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, patch: &'qb Self::Patch);

    /// Appends ` AND column = bind` conditions for the list filter.
    fn push_where<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, filter: &'qb Self::Filter);
}

/// Lists entities ordered by id (insertion order) within an offset/limit
/// window, optionally narrowed by the entity's equality filter.
pub async fn list<E: Entity>(
    pool: &PgPool,
    filter: &E::Filter,
    skip: i64,
    limit: i64,
) -> Result<Vec<E>, AppError> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM {} WHERE TRUE", E::COLUMNS, E::TABLE));
    E::push_where(&mut qb, filter);
    qb.push(" ORDER BY id OFFSET ");
    qb.push_bind(skip);
    qb.push(" LIMIT ");
    qb.push_bind(limit);

    let rows = qb.build_query_as::<E>().fetch_all(pool).await?;
    Ok(rows)
}

/// Fetches a single entity by id.
pub async fn get<E: Entity>(pool: &PgPool, id: i32) -> Result<Option<E>, AppError> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM {} WHERE id = ", E::COLUMNS, E::TABLE));
    qb.push_bind(id);

    let row = qb.build_query_as::<E>().fetch_optional(pool).await?;
    Ok(row)
}

/// Inserts a new entity and returns the full persisted row, so the caller
/// sees the server-assigned id and timestamps.
pub async fn create<E: Entity>(pool: &PgPool, payload: &E::Create) -> Result<E, AppError> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!("INSERT INTO {} ", E::TABLE));
    E::push_insert(&mut qb, payload);
    qb.push(format!(" RETURNING {}", E::COLUMNS));

    let row = qb.build_query_as::<E>().fetch_one(pool).await?;
    Ok(row)
}

/// Applies a field-level merge: only fields present in the patch are
/// written, updated_at is always refreshed. Returns `None` when the id does
/// not exist. An empty patch is a legal no-op that only touches updated_at.
pub async fn update<E: Entity>(
    pool: &PgPool,
    id: i32,
    patch: &E::Patch,
) -> Result<Option<E>, AppError> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("UPDATE {} SET updated_at = now()", E::TABLE));
    E::push_set(&mut qb, patch);
    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(format!(" RETURNING {}", E::COLUMNS));

    let row = qb.build_query_as::<E>().fetch_optional(pool).await?;
    Ok(row)
}

/// Deletes by id. Returns `true` if a row existed and was removed, `false`
/// if the id was already absent (idempotent-false, not an error).
pub async fn delete<E: Entity>(pool: &PgPool, id: i32) -> Result<bool, AppError> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("DELETE FROM {} WHERE id = ", E::TABLE));
    qb.push_bind(id);

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
