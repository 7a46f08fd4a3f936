//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/blog/posts/{post_id}', use [format_endpoint].

/// The welcome message.
pub const ROOT: &str = "/";

/// List or create categories.
pub const CATEGORIES: &str = "/categories";
/// A single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// List or create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// Expense totals per category for one month, takes `?year=&month=`.
pub const MONTHLY_REPORT: &str = "/reports/monthly";

/// List or create blog posts.
pub const POSTS: &str = "/blog/posts";
/// Get, update or delete a single blog post.
pub const POST: &str = "/blog/posts/{post_id}";
/// Comment on a blog post.
pub const POST_COMMENTS: &str = "/blog/posts/{post_id}/comments";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with the next right brace,
/// e.g. '{post_id}' in '/blog/posts/{post_id}'. Only the first parameter is
/// replaced. If there is no closing brace the rest of the path is replaced.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end..]
    )
}
