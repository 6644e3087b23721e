pub mod cookie;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod routes;
