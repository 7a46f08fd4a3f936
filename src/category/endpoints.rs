//! Category listing, lookup and creation endpoints.

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
    category::{
        CategoryId, CategoryName, NewCategory, create_category, get_all_categories, get_category,
    },
};

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every category.
pub async fn get_categories_endpoint(State(state): State<CategoryState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Get a single category, responds with 404 if it does not exist.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<CategoryId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_category(category_id, &connection) {
        Ok(category) => Json(category).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Create a category, responds with 201 and the new category on success.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Json(new_category): Json<NewCategory>,
) -> Response {
    let name = match new_category.name.parse::<CategoryName>() {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_category(name, &connection) {
        Ok(category) => {
            tracing::debug!("created category {category:?}");
            (StatusCode::CREATED, Json(category)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        category::{
            Category, CategoryName, NewCategory, create_category, create_category_table,
            get_category,
        },
        test_utils::{assert_status_ok, parse_json_body},
    };

    use super::{
        CategoryState, create_category_endpoint, get_categories_endpoint, get_category_endpoint,
    };

    fn get_category_state() -> CategoryState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_category_table(&connection).expect("Could not create category table");

        CategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let state = get_category_state();
        let want = Category {
            id: 1,
            name: CategoryName::new_unchecked("Food"),
        };

        let response = create_category_endpoint(
            State(state.clone()),
            Json(NewCategory {
                name: "Food".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let got: Category = parse_json_body(response).await;
        assert_eq!(got, want);
        assert_eq!(Ok(want), get_category(1, &state.db_connection.lock().unwrap()));
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let state = get_category_state();

        let response = create_category_endpoint(
            State(state),
            Json(NewCategory {
                name: " ".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_category_fails_on_duplicate_name() {
        let state = get_category_state();
        create_category(
            CategoryName::new_unchecked("Food"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let response = create_category_endpoint(
            State(state),
            Json(NewCategory {
                name: "Food".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn get_category_returns_not_found_for_missing_id() {
        let state = get_category_state();

        let response = get_category_endpoint(State(state), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_categories_lists_all() {
        let state = get_category_state();
        let want = {
            let connection = state.db_connection.lock().unwrap();
            vec![
                create_category(CategoryName::new_unchecked("Food"), &connection).unwrap(),
                create_category(CategoryName::new_unchecked("Travel"), &connection).unwrap(),
            ]
        };

        let response = get_categories_endpoint(State(state)).await;

        assert_status_ok(&response);
        let got: Vec<Category> = parse_json_body(response).await;
        assert_eq!(got, want);
    }
}
