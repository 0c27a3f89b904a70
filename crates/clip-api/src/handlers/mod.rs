//! HTTP request handlers organized by domain

pub mod auth;
pub mod comments;
pub mod health;
pub mod notifications;
pub mod users;
pub mod videos;
