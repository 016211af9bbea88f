//! Private per-user notes. Not shown on any public page.

use rusqlite::params;

use crate::db::models::{now_utc, Note};
use crate::error::AppResult;
use crate::state::DbPool;

pub fn create_note(pool: &DbPool, user_id: &str, body: &str) -> AppResult<Note> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let note = Note {
        id: uuid::Uuid::now_v7().to_string(),
        user_id: user_id.to_string(),
        body: body.to_string(),
        created_at: now_utc(),
    };

    tx.execute(
        "INSERT INTO notes (id, user_id, body, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![note.id, note.user_id, note.body, note.created_at],
    )?;
    tx.commit()?;

    Ok(note)
}

/// The user's notes, newest-first.
pub fn list_for_user(pool: &DbPool, user_id: &str) -> AppResult<Vec<Note>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, user_id, body, created_at FROM notes \
         WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(Note {
            id: row.get(0)?,
            user_id: row.get(1)?,
            body: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Delete a note; the owner gate mirrors posts. Returns whether a row went.
pub fn delete_note(pool: &DbPool, id: &str, user_id: &str) -> AppResult<bool> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;
    let changed = tx.execute(
        "DELETE FROM notes WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    tx.commit()?;
    Ok(changed == 1)
}
