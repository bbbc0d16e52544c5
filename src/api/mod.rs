//! API handlers for the Local Library REST endpoints

pub mod books;
pub mod catalog;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod stats;
