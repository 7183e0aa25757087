mod category_repo;
mod product_repo;

pub use category_repo::CategoryRepo;
pub use product_repo::{ProductPage, ProductRepo};
