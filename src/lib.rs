pub mod api;
pub mod db;
pub mod error;
pub mod journal;
pub mod models;
