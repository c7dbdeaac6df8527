// src/lib.rs

pub mod catalog;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod store;

pub use routes::create_router;
