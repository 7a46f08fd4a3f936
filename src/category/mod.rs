//! Categories that group transactions, e.g. 'Food' or 'Salary'.

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_category, create_category_table, get_all_categories, get_category, get_category_names,
};
pub use domain::{Category, CategoryId, CategoryName, NewCategory};
pub use endpoints::{create_category_endpoint, get_categories_endpoint, get_category_endpoint};
