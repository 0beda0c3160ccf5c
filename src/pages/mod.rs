pub mod auth;
pub mod dashboard;
pub mod page_model;
pub mod register;
