//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    audit_handler, directory_handler, employee_handler, operations_handler, order_handler,
    product_handler, tag_handler, user_handler,
};
use crate::domain::{
    AuditOp, AuditRecord, Employee, Order, OrderDetails, Party, PartyProfile, Product,
    ProductDetail, ShippingAddress, Tag, TagAssignment, User, UserPreferences,
};
use crate::services::{HealthReport, ProductBundle, SeedSummary};
use crate::types::{MessageResponse, PaginatedAuditRecords, PaginatedProducts, PaginationMeta};

/// OpenAPI documentation for the Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Audited storefront backend with soft deletes, bulk writes, and field encryption",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Product endpoints
        product_handler::list_products,
        product_handler::create_product,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::list_product_tags,
        product_handler::assign_tag,
        // Tag endpoints
        tag_handler::list_tags,
        tag_handler::create_tag,
        tag_handler::get_tag,
        tag_handler::delete_tag,
        // User endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::list_user_orders,
        // Order endpoints
        order_handler::list_orders,
        order_handler::create_order,
        order_handler::get_order,
        order_handler::delete_order,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::create_employee,
        employee_handler::get_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        employee_handler::list_reports,
        // Directory endpoints
        directory_handler::list_parties,
        directory_handler::get_party,
        directory_handler::create_directory_employee,
        directory_handler::create_directory_customer,
        // Audit endpoints
        audit_handler::list_audit_logs,
        // Operational endpoints
        operations_handler::operations_health,
        operations_handler::seed,
        operations_handler::paginated_products,
        operations_handler::product_report,
        operations_handler::bulk_inventory_update,
        operations_handler::bulk_price_update,
        operations_handler::purge_orders,
        operations_handler::newsletter_opt_in,
    ),
    components(
        schemas(
            // Domain types
            Product,
            ProductDetail,
            Tag,
            TagAssignment,
            User,
            UserPreferences,
            Order,
            OrderDetails,
            ShippingAddress,
            Employee,
            Party,
            PartyProfile,
            AuditRecord,
            AuditOp,
            // Request types
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            product_handler::AssignTagRequest,
            tag_handler::CreateTagRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            order_handler::CreateOrderRequest,
            employee_handler::CreateEmployeeRequest,
            employee_handler::UpdateEmployeeRequest,
            directory_handler::CreateDirectoryEmployeeRequest,
            directory_handler::CreateDirectoryCustomerRequest,
            operations_handler::InventoryUpdateRequest,
            operations_handler::PriceUpdateRequest,
            // Response types
            MessageResponse,
            PaginationMeta,
            PaginatedProducts,
            PaginatedAuditRecords,
            HealthReport,
            ProductBundle,
            SeedSummary,
        )
    ),
    tags(
        (name = "Products", description = "Product catalog management"),
        (name = "Tags", description = "Tagging and assignment"),
        (name = "Users", description = "User management with soft delete"),
        (name = "Orders", description = "Order placement and history"),
        (name = "Employees", description = "Employee hierarchy"),
        (name = "Directory", description = "Employee and customer registry"),
        (name = "Audit", description = "Append-only audit trail"),
        (name = "Operations", description = "Bulk writes, seeding, and reporting")
    )
)]
pub struct ApiDoc;
