use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Author, BlogPost, NewBlogPost, PostChanges};

const POST_COLUMNS: &str = "id, author_first_name, author_last_name, title, content, created_at";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        author_first_name TEXT NOT NULL,
        author_last_name TEXT NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

/// Opens `target`, which is either `:memory:` or a file path. Missing parent
/// directories are created.
pub fn open(target: &str) -> rusqlite::Result<Connection> {
    if target == ":memory:" {
        return Connection::open_in_memory();
    }
    if let Some(parent) = std::path::Path::new(target).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }
    Connection::open(target)
}

pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;").ok();
    conn.execute_batch(SCHEMA)
}

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        author: Author { first_name: row.get(1)?, last_name: row.get(2)? },
        title: row.get(3)?,
        content: row.get(4)?,
        created: row.get(5)?,
    })
}

pub fn insert_post(conn: &Connection, post: &NewBlogPost) -> rusqlite::Result<BlogPost> {
    let stored = BlogPost {
        id: uuid::Uuid::new_v4().to_string(),
        author: post.author.clone(),
        title: post.title.clone(),
        content: post.content.clone(),
        created: chrono::Utc::now().to_rfc3339(),
    };
    conn.execute(
        "INSERT INTO posts (id, author_first_name, author_last_name, title, content, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            stored.id,
            stored.author.first_name,
            stored.author.last_name,
            stored.title,
            stored.content,
            stored.created
        ],
    )?;
    Ok(stored)
}

/// Inserts every post in one transaction: either all rows land or none do.
pub fn insert_many(conn: &mut Connection, posts: &[NewBlogPost]) -> rusqlite::Result<Vec<BlogPost>> {
    let tx = conn.transaction()?;
    let stored = posts
        .iter()
        .map(|post| insert_post(&tx, post))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    tx.commit()?;
    Ok(stored)
}

pub fn find_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<BlogPost>> {
    conn.query_row(
        &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
        [id],
        row_to_post,
    )
    .optional()
}

/// Any single stored post, oldest first.
pub fn find_one(conn: &Connection) -> rusqlite::Result<Option<BlogPost>> {
    conn.query_row(
        &format!("SELECT {POST_COLUMNS} FROM posts ORDER BY rowid LIMIT 1"),
        [],
        row_to_post,
    )
    .optional()
}

pub fn list_posts(conn: &Connection) -> rusqlite::Result<Vec<BlogPost>> {
    let mut stmt = conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts ORDER BY rowid"))?;
    let posts = stmt.query_map([], row_to_post)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(posts)
}

pub fn count_posts(conn: &Connection) -> rusqlite::Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get::<_, i64>(0))
        .map(|n| n as usize)
}

/// Applies `changes` to the post with `id`. Returns `false` when no such post
/// exists.
pub fn update_post(conn: &Connection, id: &str, changes: &PostChanges) -> rusqlite::Result<bool> {
    let first_name = changes.author.as_ref().map(|a| a.first_name.as_str());
    let last_name = changes.author.as_ref().map(|a| a.last_name.as_str());
    let updated = conn.execute(
        "UPDATE posts SET
            author_first_name = COALESCE(?1, author_first_name),
            author_last_name = COALESCE(?2, author_last_name),
            title = COALESCE(?3, title),
            content = COALESCE(?4, content)
         WHERE id = ?5",
        params![first_name, last_name, changes.title, changes.content, id],
    )?;
    Ok(updated > 0)
}

/// Returns `false` when no such post exists.
pub fn delete_post(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let deleted = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}

/// Drops every stored post and recreates the empty schema.
pub fn drop_database(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("DROP TABLE IF EXISTS posts;")?;
    conn.execute_batch(SCHEMA)
}
