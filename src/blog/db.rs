//! Database operations for blog posts and comments.

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    blog::{Comment, NewComment, Post, PostId, PostTitle},
};

/// Create a post stamped with `now` for both its creation and update times.
pub fn create_post(
    title: PostTitle,
    content: &str,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Post, Error> {
    connection
        .prepare(
            "INSERT INTO post (title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING id, title, content, created_at, updated_at",
        )?
        .query_row(
            (title.as_ref(), content, now.unix_timestamp()),
            map_post_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single post by ID.
pub fn get_post(post_id: PostId, connection: &Connection) -> Result<Post, Error> {
    connection
        .prepare(
            "SELECT id, title, content, created_at, updated_at FROM post WHERE id = :id;",
        )?
        .query_row(&[(":id", &post_id)], map_post_row)
        .map_err(|error| error.into())
}

/// Retrieve all posts, newest first.
pub fn get_all_posts(connection: &Connection) -> Result<Vec<Post>, Error> {
    connection
        .prepare(
            "SELECT id, title, content, created_at, updated_at FROM post
             ORDER BY created_at DESC, id DESC;",
        )?
        .query_map([], map_post_row)?
        .map(|maybe_post| maybe_post.map_err(|error| error.into()))
        .collect()
}

/// Replace a post's title and content and set its update time to `now`.
///
/// # Errors
/// Returns [Error::UpdateMissingPost] if the post doesn't exist.
pub fn update_post(
    post_id: PostId,
    title: PostTitle,
    content: &str,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Post, Error> {
    let rows_affected = connection.execute(
        "UPDATE post SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
        (title.as_ref(), content, now.unix_timestamp(), post_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingPost);
    }

    get_post(post_id, connection)
}

/// Delete a post by ID, along with its comments.
///
/// # Errors
/// Returns [Error::DeleteMissingPost] if the post doesn't exist.
pub fn delete_post(post_id: PostId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM post WHERE id = ?1", [post_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingPost);
    }

    Ok(())
}

/// Add a comment to a post.
///
/// # Errors
/// Returns [Error::PostNotFound] if `post_id` does not refer to a post.
pub fn create_comment(
    post_id: PostId,
    new_comment: NewComment,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Comment, Error> {
    connection
        .prepare(
            "INSERT INTO comment (post_id, author_name, content, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, post_id, author_name, content, created_at",
        )?
        .query_row(
            (
                post_id,
                &new_comment.author_name,
                &new_comment.content,
                now.unix_timestamp(),
            ),
            map_comment_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::PostNotFound,
            error => error.into(),
        })
}

/// Retrieve the comments on a post, oldest first.
pub fn get_comments_for_post(
    post_id: PostId,
    connection: &Connection,
) -> Result<Vec<Comment>, Error> {
    connection
        .prepare(
            "SELECT id, post_id, author_name, content, created_at FROM comment
             WHERE post_id = ?1 ORDER BY created_at ASC, id ASC;",
        )?
        .query_map([post_id], map_comment_row)?
        .map(|maybe_comment| maybe_comment.map_err(|error| error.into()))
        .collect()
}

/// Create the post table.
pub fn create_post_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS post (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );",
        (),
    )?;

    Ok(())
}

/// Create the comment table. Requires the post table.
pub fn create_comment_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS comment (
            id INTEGER PRIMARY KEY,
            post_id INTEGER NOT NULL,
            author_name TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            FOREIGN KEY(post_id) REFERENCES post(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_comment_post ON comment(post_id);",
    )?;

    Ok(())
}

fn timestamp_from_column(row: &Row, column: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let seconds: i64 = row.get(column)?;

    OffsetDateTime::from_unix_timestamp(seconds).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(error))
    })
}

fn map_post_row(row: &Row) -> Result<Post, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let content = row.get(2)?;
    let created_at = timestamp_from_column(row, 3)?;
    let updated_at = timestamp_from_column(row, 4)?;

    Ok(Post {
        id,
        title: PostTitle::new_unchecked(&raw_title),
        content,
        created_at,
        updated_at,
    })
}

fn map_comment_row(row: &Row) -> Result<Comment, rusqlite::Error> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        author_name: row.get(2)?,
        content: row.get(3)?,
        created_at: timestamp_from_column(row, 4)?,
    })
}
