//! Durable user accounts.
//!
//! The only table the service writes to disk. Upserts go through a single
//! `INSERT ... ON CONFLICT` statement so insert-or-update is atomic.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{UpsertUser, User};

/// Insert a user, or overwrite every mutable column when the id exists.
/// `created_at` is only written on first insert.
pub fn upsert_user(
    conn: &Connection,
    user: &UpsertUser,
    now: DateTime<Utc>,
) -> Result<User, DatabaseError> {
    let stored = conn.query_row(
        "INSERT INTO users (id, email, first_name, last_name, profile_image_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
         ON CONFLICT(id) DO UPDATE SET
             email = excluded.email,
             first_name = excluded.first_name,
             last_name = excluded.last_name,
             profile_image_url = excluded.profile_image_url,
             updated_at = excluded.updated_at
         RETURNING id, email, first_name, last_name, profile_image_url, created_at, updated_at",
        params![
            user.id,
            user.email,
            user.first_name,
            user.last_name,
            user.profile_image_url,
            now,
        ],
        user_from_row,
    )?;
    Ok(stored)
}

/// Get a user by id.
pub fn get_user(conn: &Connection, id: &str) -> Result<Option<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, first_name, last_name, profile_image_url, created_at, updated_at
         FROM users WHERE id = ?1",
    )?;

    let user = stmt.query_row(params![id], user_from_row).optional()?;
    Ok(user)
}

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        profile_image_url: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
