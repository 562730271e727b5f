//! PostgreSQL-backed `PatternRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{PatternPersistenceError, PatternRepository};
use crate::domain::{Comment, Pattern, PatternId, UserId};

use super::error_mapping::{DieselErrorTargets, map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow, NewPatternRow, PatternRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pattern_comments, patterns};

/// Diesel-backed pattern store.
///
/// Comments live in their own table and are attached on read, oldest first.
#[derive(Clone)]
pub struct DieselPatternRepository {
    pool: DbPool,
}

impl DieselPatternRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PatternPersistenceError {
    map_pool_error(error, PatternPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> PatternPersistenceError {
    map_diesel_error(
        error,
        &DieselErrorTargets {
            query: PatternPersistenceError::query,
            connection: PatternPersistenceError::connection,
            unique: None,
        },
    )
}

fn count_from_db(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn row_to_pattern(row: PatternRow, comments: Vec<CommentRow>) -> Pattern {
    let likes = u32::try_from(row.likes).unwrap_or_else(|_| {
        warn!(pattern_id = %row.id, likes = row.likes, "negative like counter; reading as zero");
        0
    });
    Pattern {
        id: PatternId::from_uuid(row.id),
        owner_id: row.owner_id.map(UserId::from_uuid),
        post: row.post,
        source: row.source,
        needles: row.needles,
        yarn: row.yarn,
        created_at: row.created_at,
        likes,
        comments: comments
            .into_iter()
            .map(|comment| Comment {
                body: comment.body,
                date: comment.created_at,
            })
            .collect(),
    }
}

/// Attach comments to each row, preserving row order.
async fn with_comments(
    conn: &mut AsyncPgConnection,
    rows: Vec<PatternRow>,
) -> Result<Vec<Pattern>, PatternPersistenceError> {
    let comments = CommentRow::belonging_to(&rows)
        .select(CommentRow::as_select())
        .order((pattern_comments::created_at.asc(), pattern_comments::id.asc()))
        .load(conn)
        .await
        .map_err(diesel_error)?;
    let grouped = comments.grouped_by(&rows);
    Ok(rows
        .into_iter()
        .zip(grouped)
        .map(|(row, comments)| row_to_pattern(row, comments))
        .collect())
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    row: Option<PatternRow>,
) -> Result<Option<Pattern>, PatternPersistenceError> {
    match row {
        Some(row) => Ok(with_comments(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

#[async_trait]
impl PatternRepository for DieselPatternRepository {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Pattern>, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = patterns::table
            .select(PatternRow::as_select())
            .order(patterns::created_at.desc())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        with_comments(&mut conn, rows).await
    }

    async fn insert(&self, pattern: &Pattern) -> Result<(), PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let likes = i32::try_from(pattern.likes)
            .map_err(|_| PatternPersistenceError::query("like counter out of range"))?;
        let new_row = NewPatternRow {
            id: *pattern.id.as_uuid(),
            owner_id: pattern.owner_id.map(|owner| *owner.as_uuid()),
            post: &pattern.post,
            source: &pattern.source,
            needles: pattern.needles,
            yarn: pattern.yarn.as_deref(),
            likes,
            created_at: pattern.created_at,
        };
        let comments: Vec<NewCommentRow<'_>> = pattern
            .comments
            .iter()
            .map(|comment| NewCommentRow {
                pattern_id: new_row.id,
                body: &comment.body,
                created_at: comment.date,
            })
            .collect();
        diesel::insert_into(patterns::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if !comments.is_empty() {
            diesel::insert_into(pattern_comments::table)
                .values(&comments)
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PatternId) -> Result<Option<Pattern>, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = patterns::table
            .find(*id.as_uuid())
            .select(PatternRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        load_one(&mut conn, row).await
    }

    async fn add_like(&self, id: &PatternId) -> Result<Option<Pattern>, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::update(patterns::table.find(*id.as_uuid()))
            .set(patterns::likes.eq(patterns::likes + 1))
            .returning(PatternRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        load_one(&mut conn, row).await
    }

    async fn add_comment(
        &self,
        id: &PatternId,
        comment: &Comment,
    ) -> Result<Option<Pattern>, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let inserted = diesel::insert_into(pattern_comments::table)
            .values(NewCommentRow {
                pattern_id: *id.as_uuid(),
                body: &comment.body,
                created_at: comment.date,
            })
            .execute(&mut conn)
            .await;
        match inserted {
            Ok(_) => {}
            // The pattern does not exist, or was deleted mid-request.
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                return Ok(None);
            }
            Err(err) => return Err(diesel_error(err)),
        }
        let row = patterns::table
            .find(*id.as_uuid())
            .select(PatternRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        load_one(&mut conn, row).await
    }

    async fn delete_owned(
        &self,
        id: &PatternId,
        owner: &UserId,
    ) -> Result<bool, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(
            patterns::table
                .filter(patterns::id.eq(*id.as_uuid()))
                .filter(patterns::owner_id.eq(*owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<u64, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = patterns::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(count_from_db(total))
    }

    async fn clear(&self) -> Result<u64, PatternPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(patterns::table)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
