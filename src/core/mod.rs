//! Application services and the context object that owns the live book.

pub mod book_manager;
pub mod services;
pub mod utils;

pub use book_manager::BookManager;
