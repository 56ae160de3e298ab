//! HTTP request handlers

pub mod articles;
pub mod health;
