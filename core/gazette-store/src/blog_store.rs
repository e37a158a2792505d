//! The blog store: posts, comments, and newsletter subscribers.

use crate::error::{StoreError, StoreResult};
use chrono::{SecondsFormat, Utc};
use gazette_types::{
    Comment, CommentStats, CommentStatus, ModerationComment, NewComment, NewPost, Post,
    PostStatus, PostSummary,
};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Maximum number of rows returned by a search.
const SEARCH_LIMIT: i64 = 20;

/// SQLite-backed store for all Gazette data.
///
/// One connection, shared behind a mutex; every request locks it for the
/// duration of its statement(s) and nothing else is shared between
/// requests.
#[derive(Clone)]
pub struct BlogStore {
    conn: Arc<Mutex<Connection>>,
}

impl BlogStore {
    /// Opens (or creates) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS authors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                excerpt TEXT NOT NULL,
                content TEXT NOT NULL,
                category TEXT NOT NULL,
                author_id INTEGER NOT NULL REFERENCES authors(id),
                status TEXT NOT NULL DEFAULT 'draft',
                published_at TEXT
            );

            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                post_id INTEGER NOT NULL REFERENCES posts(id),
                author_name TEXT NOT NULL,
                content TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS subscribers (
                email TEXT PRIMARY KEY
            );
            ",
        )?;
        tracing::debug!("database schema ensured");
        Ok(())
    }

    // ── Authors and posts ────────────────────────────────────────

    /// Inserts an author, returning its id.
    pub fn insert_author(&self, username: &str) -> StoreResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO authors (username) VALUES (?1)",
            params![username],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Inserts a post, returning its id. Used by seeding and tests;
    /// there is no public authoring route.
    pub fn insert_post(&self, post: &NewPost) -> StoreResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO posts (title, slug, excerpt, content, category, author_id, status, published_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.title,
                post.slug,
                post.excerpt,
                post.content,
                post.category,
                post.author_id,
                post.status.as_str(),
                post.published_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All published posts, newest publication date first.
    pub fn published_posts(&self) -> StoreResult<Vec<Post>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT p.id, p.title, p.slug, p.excerpt, p.content, p.category,
                    p.author_id, a.username, p.status, p.published_at
             FROM posts p
             LEFT JOIN authors a ON p.author_id = a.id
             WHERE p.status = 'published'
             ORDER BY p.published_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, Option<String>>(9)?,
            ))
        })?;

        let mut posts = Vec::new();
        for row in rows {
            let (id, title, slug, excerpt, content, category, author_id, author_name, status, published_at) = row?;
            let status: PostStatus = status
                .parse()
                .map_err(|e| StoreError::InvalidData(format!("post {id}: {e}")))?;
            posts.push(Post {
                id,
                title,
                slug,
                excerpt,
                content,
                category,
                author_id,
                author_name,
                status,
                published_at,
            });
        }
        Ok(posts)
    }

    /// Case-insensitive substring search over published posts' titles and
    /// bodies, newest first, capped at [`SEARCH_LIMIT`] rows.
    pub fn search_posts(&self, term: &str) -> StoreResult<Vec<PostSummary>> {
        let pattern = format!("%{term}%");
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, excerpt, category
             FROM posts
             WHERE status = 'published'
               AND (title LIKE ?1 OR content LIKE ?1)
             ORDER BY published_at DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![pattern, SEARCH_LIMIT], |row| {
            Ok(PostSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                slug: row.get(2)?,
                excerpt: row.get(3)?,
                category: row.get(4)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    // ── Comments ─────────────────────────────────────────────────

    /// Inserts a comment with the given initial status and returns the
    /// stored row. One insert, one read-back.
    pub fn insert_comment(
        &self,
        post_id: i64,
        submission: &NewComment,
        status: CommentStatus,
    ) -> StoreResult<Comment> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO comments (post_id, author_name, content, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                post_id,
                submission.author_name,
                submission.content,
                status.as_str(),
                created_at,
            ],
        )?;
        let id = conn.last_insert_rowid();
        comment_by_id(&conn, id)
    }

    /// Approved comments for one post, newest first.
    pub fn approved_comments(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, post_id, author_name, content, status, created_at
             FROM comments
             WHERE post_id = ?1 AND status = 'approved'
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![post_id], comment_row)?;
        collect_comments(rows)
    }

    /// Every comment joined with its post title, newest first. The
    /// moderation queue view.
    pub fn all_comments(&self) -> StoreResult<Vec<ModerationComment>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT c.id, c.post_id, c.author_name, c.content, c.status, c.created_at, p.title
             FROM comments c
             JOIN posts p ON c.post_id = p.id
             ORDER BY c.created_at DESC, c.id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((comment_row(row)?, row.get::<_, String>(6)?))
        })?;

        let mut comments = Vec::new();
        for row in rows {
            let (raw, post_title) = row?;
            comments.push(ModerationComment {
                comment: parse_comment(raw)?,
                post_title,
            });
        }
        Ok(comments)
    }

    /// Looks up a single comment.
    pub fn get_comment(&self, id: i64) -> StoreResult<Comment> {
        let conn = self.conn.lock().unwrap();
        comment_by_id(&conn, id)
    }

    /// Moves a comment to the given status and returns the updated row.
    pub fn update_comment_status(&self, id: i64, status: CommentStatus) -> StoreResult<Comment> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE comments SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("comment {id}")));
        }
        comment_by_id(&conn, id)
    }

    /// Removes a comment.
    pub fn delete_comment(&self, id: i64) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM comments WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("comment {id}")));
        }
        Ok(())
    }

    /// Comment counts grouped by status.
    pub fn comment_stats(&self) -> StoreResult<CommentStats> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM comments GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut stats = CommentStats::default();
        for row in rows {
            let (status, count) = row?;
            let status: CommentStatus = status
                .parse::<CommentStatus>()
                .map_err(|e| StoreError::InvalidData(e.to_string()))?;
            match status {
                CommentStatus::Pending => stats.pending = count,
                CommentStatus::Approved => stats.approved = count,
                CommentStatus::Rejected => stats.rejected = count,
            }
            stats.total += count;
        }
        Ok(stats)
    }

    // ── Newsletter ───────────────────────────────────────────────

    /// Records a newsletter subscription. Returns false when the address
    /// was already subscribed.
    pub fn subscribe(&self, email: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO subscribers (email) VALUES (?1)",
            params![email],
        )?;
        Ok(inserted > 0)
    }
}

type RawComment = (i64, i64, String, String, String, String);

fn comment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawComment> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn parse_comment(raw: RawComment) -> StoreResult<Comment> {
    let (id, post_id, author_name, content, status, created_at) = raw;
    let status: CommentStatus = status
        .parse()
        .map_err(|e| StoreError::InvalidData(format!("comment {id}: {e}")))?;
    Ok(Comment {
        id,
        post_id,
        author_name,
        content,
        status,
        created_at,
    })
}

fn collect_comments(
    rows: impl Iterator<Item = rusqlite::Result<RawComment>>,
) -> StoreResult<Vec<Comment>> {
    let mut comments = Vec::new();
    for row in rows {
        comments.push(parse_comment(row?)?);
    }
    Ok(comments)
}

fn comment_by_id(conn: &Connection, id: i64) -> StoreResult<Comment> {
    let raw = conn
        .query_row(
            "SELECT id, post_id, author_name, content, status, created_at
             FROM comments WHERE id = ?1",
            params![id],
            comment_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                StoreError::NotFound(format!("comment {id}"))
            }
            other => StoreError::Database(other),
        })?;
    parse_comment(raw)
}
