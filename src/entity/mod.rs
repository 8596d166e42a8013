pub mod audit_logs;
pub mod cart_sessions;
pub mod categories;
pub mod home_card_styles;
pub mod homepage_section_categories;
pub mod homepage_sections;
pub mod menu_items;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod product_models;
pub mod products;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use cart_sessions::Entity as CartSessions;
pub use categories::Entity as Categories;
pub use home_card_styles::Entity as HomeCardStyles;
pub use homepage_section_categories::Entity as HomepageSectionCategories;
pub use homepage_sections::Entity as HomepageSections;
pub use menu_items::Entity as MenuItems;
pub use menus::Entity as Menus;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_models::Entity as ProductModels;
pub use products::Entity as Products;
pub use users::Entity as Users;
