use chrono::{Duration, Utc};
use rand::Rng;
use rusqlite::params;

use crate::db::models::{now_utc, Session};
use crate::error::AppResult;
use crate::state::DbPool;

/// Create a new session for a user.
pub fn create_session(pool: &DbPool, user_id: &str, hours: u64) -> AppResult<Session> {
    let conn = pool.get()?;

    let session = Session {
        id: uuid::Uuid::now_v7().to_string(),
        user_id: user_id.to_string(),
        token: generate_token(),
        expires_at: (Utc::now() + Duration::hours(hours as i64))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        created_at: now_utc(),
    };

    conn.execute(
        "INSERT INTO sessions (id, user_id, token, expires_at, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.id,
            session.user_id,
            session.token,
            session.expires_at,
            session.created_at
        ],
    )?;

    Ok(session)
}

/// Delete a session by token.
pub fn delete_session(pool: &DbPool, token: &str) -> AppResult<()> {
    let conn = pool.get()?;
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}
