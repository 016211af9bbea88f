use rusqlite::params;

use crate::db::models::{now_utc, User};
use crate::error::{AppError, AppResult};
use crate::state::DbPool;

/// Insert a new user. Fails on a duplicate username; callers can classify
/// the failure with [`is_duplicate_username`].
pub fn create_user(pool: &DbPool, username: &str, password_hash: &str) -> AppResult<User> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let user = User {
        id: uuid::Uuid::now_v7().to_string(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now_utc(),
    };

    tx.execute(
        "INSERT INTO users (id, username, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![user.id, user.username, user.password_hash, user.created_at],
    )?;
    tx.commit()?;

    Ok(user)
}

pub fn find_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    let conn = pool.get()?;
    let result = conn.query_row(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
        params![username],
        row_to_user,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_id(pool: &DbPool, id: &str) -> AppResult<Option<User>> {
    let conn = pool.get()?;
    let result = conn.query_row(
        "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
        params![id],
        row_to_user,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// True when an error came from the users.username unique index.
pub fn is_duplicate_username(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Database(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}
