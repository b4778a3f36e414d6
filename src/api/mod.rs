pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use routes::create_router;
