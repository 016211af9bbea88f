use rusqlite::params;

use crate::db::models::{now_utc, Post};
use crate::error::AppResult;
use crate::state::DbPool;

/// Persist a new post owned by the given user. The author name is
/// denormalized onto the row at creation.
pub fn create_post(
    pool: &DbPool,
    user_id: &str,
    author: &str,
    title: &str,
    body: &str,
) -> AppResult<Post> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let now = now_utc();
    let post = Post {
        id: uuid::Uuid::now_v7().to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        author: author.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };

    tx.execute(
        "INSERT INTO posts (id, user_id, title, body, author, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            post.id,
            post.user_id,
            post.title,
            post.body,
            post.author,
            post.created_at,
            post.updated_at
        ],
    )?;
    tx.commit()?;

    Ok(post)
}

pub fn get_post(pool: &DbPool, id: &str) -> AppResult<Option<Post>> {
    let conn = pool.get()?;
    let result = conn.query_row(
        "SELECT id, user_id, title, body, author, created_at, updated_at \
         FROM posts WHERE id = ?1",
        params![id],
        row_to_post,
    );

    match result {
        Ok(post) => Ok(Some(post)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All posts newest-first. A search term filters to titles containing it.
pub fn list_posts(pool: &DbPool, search: Option<&str>) -> AppResult<Vec<Post>> {
    let conn = pool.get()?;

    let mut stmt;
    let rows = match search {
        Some(term) => {
            stmt = conn.prepare(
                "SELECT id, user_id, title, body, author, created_at, updated_at \
                 FROM posts WHERE title LIKE '%' || ?1 || '%' \
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            stmt.query_map(params![term], row_to_post)?
        }
        None => {
            stmt = conn.prepare(
                "SELECT id, user_id, title, body, author, created_at, updated_at \
                 FROM posts ORDER BY created_at DESC, rowid DESC",
            )?;
            stmt.query_map([], row_to_post)?
        }
    };

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Posts owned by one user, newest-first.
pub fn list_by_user(pool: &DbPool, user_id: &str) -> AppResult<Vec<Post>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, body, author, created_at, updated_at \
         FROM posts WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![user_id], row_to_post)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Update title and body. The owner check lives in the WHERE clause, so a
/// non-owner update is a no-op; returns whether a row changed.
pub fn update_post(
    pool: &DbPool,
    id: &str,
    user_id: &str,
    title: &str,
    body: &str,
) -> AppResult<bool> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;
    let changed = tx.execute(
        "UPDATE posts SET title = ?1, body = ?2, updated_at = ?3 \
         WHERE id = ?4 AND user_id = ?5",
        params![title, body, now_utc(), id, user_id],
    )?;
    tx.commit()?;
    Ok(changed == 1)
}

/// Delete a post (comments cascade). Same silent owner gate as update.
pub fn delete_post(pool: &DbPool, id: &str, user_id: &str) -> AppResult<bool> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;
    let changed = tx.execute(
        "DELETE FROM posts WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    tx.commit()?;
    Ok(changed == 1)
}

fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        author: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
