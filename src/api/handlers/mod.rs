//! HTTP request handlers.

pub mod audit_handler;
pub mod directory_handler;
pub mod employee_handler;
pub mod operations_handler;
pub mod order_handler;
pub mod product_handler;
pub mod tag_handler;
pub mod user_handler;

pub use audit_handler::audit_routes;
pub use directory_handler::directory_routes;
pub use employee_handler::employee_routes;
pub use operations_handler::operations_routes;
pub use order_handler::order_routes;
pub use product_handler::product_routes;
pub use tag_handler::tag_routes;
pub use user_handler::user_routes;
