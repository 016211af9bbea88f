use rusqlite::params;

use crate::db::models::{display_date, now_utc, Comment};
use crate::error::AppResult;
use crate::state::DbPool;

/// Comment joined with its author's username for display.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: String,
}

impl CommentView {
    pub fn posted_on(&self) -> String {
        display_date(&self.created_at)
    }
}

pub fn create_comment(
    pool: &DbPool,
    post_id: &str,
    user_id: &str,
    body: &str,
) -> AppResult<Comment> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let comment = Comment {
        id: uuid::Uuid::now_v7().to_string(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        body: body.to_string(),
        created_at: now_utc(),
    };

    tx.execute(
        "INSERT INTO comments (id, post_id, user_id, body, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            comment.id,
            comment.post_id,
            comment.user_id,
            comment.body,
            comment.created_at
        ],
    )?;
    tx.commit()?;

    Ok(comment)
}

/// Comments on a post, oldest-first, with author usernames.
pub fn list_for_post(pool: &DbPool, post_id: &str) -> AppResult<Vec<CommentView>> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT c.id, u.username, c.body, c.created_at \
         FROM comments c JOIN users u ON u.id = c.user_id \
         WHERE c.post_id = ?1 \
         ORDER BY c.created_at ASC, c.rowid ASC",
    )?;
    let rows = stmt.query_map(params![post_id], |row| {
        Ok(CommentView {
            id: row.get(0)?,
            author: row.get(1)?,
            body: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users;
    use crate::forum::posts;

    #[test]
    fn comments_list_oldest_first_with_authors() {
        let pool = crate::db::test_pool();
        let alice = users::create_user(&pool, "alice", "hash").unwrap();
        let bob = users::create_user(&pool, "bob", "hash").unwrap();
        let post = posts::create_post(&pool, &alice.id, "alice", "t", "b").unwrap();

        create_comment(&pool, &post.id, &alice.id, "first").unwrap();
        create_comment(&pool, &post.id, &bob.id, "second").unwrap();

        let listed = list_for_post(&pool, &post.id).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].body, "first");
        assert_eq!(listed[0].author, "alice");
        assert_eq!(listed[1].body, "second");
        assert_eq!(listed[1].author, "bob");
    }

    #[test]
    fn comments_are_scoped_to_their_post() {
        let pool = crate::db::test_pool();
        let alice = users::create_user(&pool, "alice", "hash").unwrap();
        let p1 = posts::create_post(&pool, &alice.id, "alice", "one", "b").unwrap();
        let p2 = posts::create_post(&pool, &alice.id, "alice", "two", "b").unwrap();

        create_comment(&pool, &p1.id, &alice.id, "on one").unwrap();

        assert_eq!(list_for_post(&pool, &p1.id).unwrap().len(), 1);
        assert!(list_for_post(&pool, &p2.id).unwrap().is_empty());
    }

    #[test]
    fn deleting_post_removes_its_comments() {
        let pool = crate::db::test_pool();
        let alice = users::create_user(&pool, "alice", "hash").unwrap();
        let post = posts::create_post(&pool, &alice.id, "alice", "t", "b").unwrap();
        create_comment(&pool, &post.id, &alice.id, "gone soon").unwrap();

        posts::delete_post(&pool, &post.id, &alice.id).unwrap();
        assert!(list_for_post(&pool, &post.id).unwrap().is_empty());
    }

    #[test]
    fn comment_on_missing_post_is_rejected() {
        let pool = crate::db::test_pool();
        let alice = users::create_user(&pool, "alice", "hash").unwrap();
        assert!(create_comment(&pool, "missing-post", &alice.id, "hi").is_err());
    }
}
