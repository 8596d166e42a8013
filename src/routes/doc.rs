use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{
            AddToCartRequest, CartLineInput, CartLineView, CartView, CheckoutRequest,
            CheckoutResult, UpdateCartRequest,
        },
        categories::{CategoryList, CategoryRequest, CategoryRow},
        homepage::{
            ReorderSectionsRequest, SectionBlock, SectionCategory, SectionCategoryInput,
            SectionDetail, SectionGroup, SectionList, SectionOrderEntry, SectionRequest,
            SectionWithCategories,
        },
        menus::{
            MenuAlign, MenuItemNode, MenuItemRequest, MenuList, MenuOrderEntry, MenuRequest,
            MenuTree, ReorderMenuRequest,
        },
        orders::{
            BulkOrderAction, BulkOrderRequest, BulkOrderResult, OrderDetail, OrderList,
            UpdateOrderRequest,
        },
        product_models::{
            CreateProductModelRequest, ProductModelEditor, ProductModelList, ProductRef,
            UpdateDefinitionRequest, UpdateProductModelRequest,
        },
        products::{ProductList, ProductRequest},
        store::{HomePage, ModelSummary, ProductPage},
        style::{StyleView, UpdateStyleRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    error::FieldErrors,
    models::{
        Category, HomepageSection, Menu, MenuItem, Order, OrderItem, Product, ProductModel, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, health, store, style},
    style::StyleScope,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::me,
        store::home,
        store::product_page,
        store::menu,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_cart,
        cart::remove_from_cart,
        cart::clear_cart,
        cart::checkout_cod,
        style::get_style,
        style::update_style,
        admin::categories::list_categories,
        admin::categories::get_category,
        admin::categories::create_category,
        admin::categories::update_category,
        admin::categories::delete_category,
        admin::products::list_products,
        admin::products::get_product,
        admin::products::create_product,
        admin::products::update_product,
        admin::products::delete_product,
        admin::orders::list_orders,
        admin::orders::get_order,
        admin::orders::update_order,
        admin::orders::delete_order,
        admin::orders::cancel_order,
        admin::orders::mark_paid,
        admin::orders::mark_shipped,
        admin::orders::mark_completed,
        admin::orders::bulk_orders,
        admin::users::list_users,
        admin::users::get_user,
        admin::users::create_user,
        admin::users::update_user,
        admin::users::delete_user,
        admin::users::promote_user,
        admin::users::demote_user,
        admin::menus::list_menus,
        admin::menus::get_menu,
        admin::menus::create_menu,
        admin::menus::update_menu,
        admin::menus::delete_menu,
        admin::menus::add_item,
        admin::menus::update_item,
        admin::menus::delete_item,
        admin::menus::reorder_items,
        admin::product_models::list_models,
        admin::product_models::get_model,
        admin::product_models::create_model,
        admin::product_models::update_model,
        admin::product_models::update_definition,
        admin::product_models::delete_model,
        admin::homepage::list_sections,
        admin::homepage::get_section,
        admin::homepage::create_section,
        admin::homepage::update_section,
        admin::homepage::delete_section,
        admin::homepage::reorder_sections
    ),
    components(
        schemas(
            User,
            Category,
            Product,
            ProductModel,
            Order,
            OrderItem,
            Menu,
            MenuItem,
            HomepageSection,
            Meta,
            FieldErrors,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            CartLineInput,
            UpdateCartRequest,
            CartLineView,
            CartView,
            CheckoutRequest,
            CheckoutResult,
            CategoryRequest,
            CategoryRow,
            CategoryList,
            ProductRequest,
            ProductList,
            CreateProductModelRequest,
            UpdateProductModelRequest,
            UpdateDefinitionRequest,
            ProductRef,
            ProductModelEditor,
            ProductModelList,
            UpdateOrderRequest,
            BulkOrderAction,
            BulkOrderRequest,
            BulkOrderResult,
            OrderDetail,
            OrderList,
            CreateUserRequest,
            UpdateUserRequest,
            UserList,
            MenuRequest,
            MenuAlign,
            MenuItemRequest,
            MenuOrderEntry,
            ReorderMenuRequest,
            MenuItemNode,
            MenuTree,
            MenuList,
            SectionCategoryInput,
            SectionRequest,
            SectionOrderEntry,
            ReorderSectionsRequest,
            SectionCategory,
            SectionWithCategories,
            SectionDetail,
            SectionGroup,
            SectionBlock,
            SectionList,
            StyleScope,
            StyleView,
            UpdateStyleRequest,
            HomePage,
            ModelSummary,
            ProductPage,
            health::HealthData,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderDetail>,
            ApiResponse<OrderList>,
            ApiResponse<CartView>,
            ApiResponse<HomePage>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Store", description = "Storefront pages"),
        (name = "Cart", description = "Session cart and cash-on-delivery checkout"),
        (name = "Dashboard", description = "Card style editor"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
