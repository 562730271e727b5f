//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{pattern_comments, patterns, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub password_digest: String,
    pub token: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub password_digest: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = patterns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatternRow {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub post: String,
    pub source: String,
    pub needles: Option<f64>,
    pub yarn: Option<String>,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patterns)]
pub(crate) struct NewPatternRow<'a> {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub post: &'a str,
    pub source: &'a str,
    pub needles: Option<f64>,
    pub yarn: Option<&'a str>,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = pattern_comments)]
#[diesel(belongs_to(PatternRow, foreign_key = pattern_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub pattern_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pattern_comments)]
pub(crate) struct NewCommentRow<'a> {
    pub pattern_id: Uuid,
    pub body: &'a str,
    pub created_at: DateTime<Utc>,
}
