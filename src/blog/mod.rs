//! A small blog: posts, and comments left on them.

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_comment, create_comment_table, create_post, create_post_table, delete_post,
    get_all_posts, get_comments_for_post, get_post, update_post,
};
pub use domain::{
    Comment, NewComment, NewPost, Post, PostId, PostTitle, PostWithComments, now_utc_seconds,
};
pub use endpoints::{
    create_comment_endpoint, create_post_endpoint, delete_post_endpoint, get_post_endpoint,
    get_posts_endpoint, update_post_endpoint,
};
