//! Entity ↔ model mappers

mod comment;
mod notification;
mod reaction;
mod report;
mod user;
mod video;
