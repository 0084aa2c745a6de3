//! Shared types reused across handlers and services.

mod pagination;
mod response;

pub use pagination::{
    Paginated, PaginatedAuditRecords, PaginatedProducts, PaginationMeta, PaginationParams,
};
pub use response::MessageResponse;
