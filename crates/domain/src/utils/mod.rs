//! Pure domain utilities

pub mod contact;
pub mod rating;
