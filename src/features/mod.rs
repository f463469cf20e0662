pub mod auth;
pub mod reviews;
pub mod routes;
pub mod shared;
