//! JSON endpoints for blog posts and comments.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    blog::{
        NewComment, NewPost, PostId, PostTitle, PostWithComments, create_comment, create_post,
        delete_post, get_all_posts, get_comments_for_post, get_post, now_utc_seconds,
        update_post,
    },
};

/// The state needed for the blog endpoints.
#[derive(Debug, Clone)]
pub struct BlogState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BlogState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

pub async fn get_posts_endpoint(State(state): State<BlogState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_posts(&connection) {
        Ok(posts) => Json(posts).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Get a post with its comments.
pub async fn get_post_endpoint(
    State(state): State<BlogState>,
    Path(post_id): Path<PostId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let post = match get_post(post_id, &connection) {
        Ok(post) => post,
        Err(Error::NotFound) => return Error::PostNotFound.into_response(),
        Err(error) => return error.into_response(),
    };

    match get_comments_for_post(post_id, &connection) {
        Ok(comments) => Json(PostWithComments { post, comments }).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn create_post_endpoint(
    State(state): State<BlogState>,
    Json(new_post): Json<NewPost>,
) -> Response {
    let title = match new_post.title.parse::<PostTitle>() {
        Ok(title) => title,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_post(title, &new_post.content, now_utc_seconds(), &connection) {
        Ok(post) => (StatusCode::CREATED, Json(post)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn update_post_endpoint(
    State(state): State<BlogState>,
    Path(post_id): Path<PostId>,
    Json(new_post): Json<NewPost>,
) -> Response {
    let title = match new_post.title.parse::<PostTitle>() {
        Ok(title) => title,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_post(
        post_id,
        title,
        &new_post.content,
        now_utc_seconds(),
        &connection,
    ) {
        Ok(post) => Json(post).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Delete a post and its comments, responds with 204 on success.
pub async fn delete_post_endpoint(
    State(state): State<BlogState>,
    Path(post_id): Path<PostId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_post(post_id, &connection) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(Error::DeleteMissingPost) => Error::DeleteMissingPost.into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting post {post_id}: {error}");
            error.into_response()
        }
    }
}

pub async fn create_comment_endpoint(
    State(state): State<BlogState>,
    Path(post_id): Path<PostId>,
    Json(new_comment): Json<NewComment>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_comment(post_id, new_comment, now_utc_seconds(), &connection) {
        Ok(comment) => (StatusCode::CREATED, Json(comment)).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        blog::{Comment, NewComment, NewPost, Post, PostWithComments, get_comments_for_post},
        db::initialize,
        test_utils::{assert_status_ok, parse_json_body, parse_text_body},
    };

    use super::{
        BlogState, create_comment_endpoint, create_post_endpoint, delete_post_endpoint,
        get_post_endpoint, get_posts_endpoint, update_post_endpoint,
    };

    fn get_test_state() -> BlogState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        BlogState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn new_post(title: &str, content: &str) -> Json<NewPost> {
        Json(NewPost {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    fn new_comment(author_name: &str, content: &str) -> Json<NewComment> {
        Json(NewComment {
            author_name: author_name.to_owned(),
            content: content.to_owned(),
        })
    }

    async fn create_test_post(state: &BlogState) -> Post {
        let response =
            create_post_endpoint(State(state.clone()), new_post("First", "Hello")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        parse_json_body(response).await
    }

    #[tokio::test]
    async fn can_create_and_list_posts() {
        let state = get_test_state();
        let post = create_test_post(&state).await;

        let response = get_posts_endpoint(State(state)).await;

        assert_status_ok(&response);
        let posts: Vec<Post> = parse_json_body(response).await;
        assert_eq!(posts, vec![post]);
    }

    #[tokio::test]
    async fn create_post_fails_on_empty_title() {
        let state = get_test_state();

        let response = create_post_endpoint(State(state), new_post("  ", "Hello")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_text_body(response).await, "Post title cannot be empty");
    }

    #[tokio::test]
    async fn get_post_includes_comments() {
        let state = get_test_state();
        let post = create_test_post(&state).await;
        let response = create_comment_endpoint(
            State(state.clone()),
            Path(post.id),
            new_comment("Ann", "Nice post"),
        )
        .await;
        let comment: Comment = parse_json_body(response).await;

        let response = get_post_endpoint(State(state), Path(post.id)).await;

        assert_status_ok(&response);
        let body: PostWithComments = parse_json_body(response).await;
        assert_eq!(
            body,
            PostWithComments {
                post,
                comments: vec![comment],
            }
        );
    }

    #[tokio::test]
    async fn get_missing_post_returns_404() {
        let state = get_test_state();

        let response = get_post_endpoint(State(state), Path(1)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(parse_text_body(response).await, "Post not found");
    }

    #[tokio::test]
    async fn update_post_replaces_title_and_content() {
        let state = get_test_state();
        let post = create_test_post(&state).await;

        let response = update_post_endpoint(
            State(state),
            Path(post.id),
            new_post("Second", "Updated"),
        )
        .await;

        assert_status_ok(&response);
        let updated: Post = parse_json_body(response).await;
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title.as_ref(), "Second");
        assert_eq!(updated.content, "Updated");
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn update_post_fails_on_empty_title() {
        let state = get_test_state();
        let post = create_test_post(&state).await;

        let response =
            update_post_endpoint(State(state), Path(post.id), new_post("", "Updated")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_text_body(response).await, "Post title cannot be empty");
    }

    #[tokio::test]
    async fn update_missing_post_returns_404() {
        let state = get_test_state();

        let response =
            update_post_endpoint(State(state), Path(5), new_post("Second", "Updated")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_post_returns_204_and_removes_comments() {
        let state = get_test_state();
        let post = create_test_post(&state).await;
        create_comment_endpoint(
            State(state.clone()),
            Path(post.id),
            new_comment("Ann", "Nice post"),
        )
        .await;

        let response = delete_post_endpoint(State(state.clone()), Path(post.id)).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let comments =
            get_comments_for_post(post.id, &state.db_connection.lock().unwrap()).unwrap();
        assert!(comments.is_empty());
        let response = get_post_endpoint(State(state), Path(post.id)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_missing_post_returns_404() {
        let state = get_test_state();

        let response = delete_post_endpoint(State(state), Path(1)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn comment_on_missing_post_returns_404() {
        let state = get_test_state();

        let response =
            create_comment_endpoint(State(state), Path(8), new_comment("Ann", "Hello?")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(parse_text_body(response).await, "Post not found");
    }
}
