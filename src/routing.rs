//! Application router configuration.

use axum::{
    Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    blog::{
        create_comment_endpoint, create_post_endpoint, delete_post_endpoint, get_post_endpoint,
        get_posts_endpoint, update_post_endpoint,
    },
    category::{create_category_endpoint, get_categories_endpoint, get_category_endpoint},
    endpoints,
    report::get_monthly_report_endpoint,
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// The plain-text greeting served at the root path.
pub const WELCOME_MESSAGE: &str = "Welcome to the expense tracker! Try /blog/posts, \
    /transactions or /reports/monthly?year=2024&month=12";

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let expense_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(endpoints::CATEGORY, get(get_category_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::MONTHLY_REPORT, get(get_monthly_report_endpoint));

    let blog_routes = Router::new()
        .route(
            endpoints::POSTS,
            get(get_posts_endpoint).post(create_post_endpoint),
        )
        .route(
            endpoints::POST,
            get(get_post_endpoint)
                .put(update_post_endpoint)
                .delete(delete_post_endpoint),
        )
        .route(endpoints::POST_COMMENTS, post(create_comment_endpoint));

    Router::new()
        .route(endpoints::ROOT, get(get_welcome_message))
        .merge(expense_routes)
        .merge(blog_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_welcome_message() -> &'static str {
    WELCOME_MESSAGE
}

async fn get_404_not_found(uri: Uri) -> Response {
    tracing::debug!("no route for {uri}");
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
