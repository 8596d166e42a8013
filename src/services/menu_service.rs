use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::menus::{
        MenuItemNode, MenuItemRequest, MenuList, MenuRequest, MenuTree, ReorderMenuRequest,
    },
    entity::{
        menu_items::{self, Column as ItemCol, Entity as MenuItems},
        menus::{self, Column as MenuCol, Entity as Menus},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Menu, MenuItem},
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    state::AppState,
};

use super::now;

const DEFAULT_TARGET: &str = "_self";

pub async fn list_menus(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<MenuList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let finder = Menus::find()
        .order_by_asc(MenuCol::Name)
        .order_by_asc(MenuCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Menu::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Menus", MenuList { items }, Some(meta)))
}

pub async fn get_menu(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<MenuTree>> {
    ensure_admin(user)?;
    let menu = find_menu(state, id).await?;
    let tree = load_tree(state, menu, false).await?;
    Ok(ApiResponse::success("Menu", tree, None))
}

pub async fn create_menu(
    state: &AppState,
    user: &AuthUser,
    payload: MenuRequest,
) -> AppResult<ApiResponse<Menu>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let menu = menus::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name.trim().to_string()),
        location: Set(payload.location.trim().to_string()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user,
        "menu_create",
        "menus",
        serde_json::json!({ "menu_id": menu.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu created",
        Menu::from(menu),
        Some(Meta::empty()),
    ))
}

pub async fn update_menu(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: MenuRequest,
) -> AppResult<ApiResponse<Menu>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let existing = find_menu(state, id).await?;

    let mut active: menus::ActiveModel = existing.into();
    active.name = Set(payload.name.trim().to_string());
    active.location = Set(payload.location.trim().to_string());
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(now());
    let menu = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "menu_update",
        "menus",
        serde_json::json!({ "menu_id": menu.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Menu::from(menu),
        Some(Meta::empty()),
    ))
}

pub async fn delete_menu(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Menus::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "menu_delete",
        "menus",
        serde_json::json!({ "menu_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Appends the item after its siblings within `(menu, parent)`.
pub async fn add_item(
    state: &AppState,
    user: &AuthUser,
    menu_id: Uuid,
    payload: MenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;
    let menu = find_menu(state, menu_id).await?;
    let payload = payload.normalize();
    payload.validate()?;
    check_parent(state, menu.id, payload.parent_id, None).await?;

    let mut siblings = MenuItems::find()
        .select_only()
        .expr_as(Expr::col(ItemCol::Position).max(), "max_position")
        .filter(ItemCol::MenuId.eq(menu.id));
    siblings = match payload.parent_id {
        Some(parent_id) => siblings.filter(ItemCol::ParentId.eq(parent_id)),
        None => siblings.filter(ItemCol::ParentId.is_null()),
    };
    let max_position = siblings
        .into_tuple::<Option<i32>>()
        .one(&state.orm)
        .await?
        .flatten();
    let position = max_position.unwrap_or(0) + 1;

    let item = menu_items::ActiveModel {
        id: Set(Uuid::now_v7()),
        menu_id: Set(menu.id),
        parent_id: Set(payload.parent_id),
        title: Set(payload.title.trim().to_string()),
        url: Set(payload.url.trim().to_string()),
        position: Set(position),
        target: Set(target_or_default(payload.target)),
        visible: Set(payload.visible.unwrap_or(true)),
        icon: Set(payload.icon.filter(|i| !i.trim().is_empty())),
        align: Set(payload.align.unwrap_or_default().as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user,
        "menu_item_create",
        "menu_items",
        serde_json::json!({ "menu_id": menu.id, "item_id": item.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item added",
        MenuItem::from(item),
        Some(Meta::empty()),
    ))
}

pub async fn update_item(
    state: &AppState,
    user: &AuthUser,
    menu_id: Uuid,
    item_id: Uuid,
    payload: MenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;
    let item = find_item(state, menu_id, item_id).await?;
    let payload = payload.normalize();
    payload.validate()?;
    check_parent(state, menu_id, payload.parent_id, Some(item_id)).await?;

    let mut active: menu_items::ActiveModel = item.into();
    active.parent_id = Set(payload.parent_id);
    active.title = Set(payload.title.trim().to_string());
    active.url = Set(payload.url.trim().to_string());
    active.target = Set(target_or_default(payload.target));
    active.visible = Set(payload.visible.unwrap_or(true));
    active.icon = Set(payload.icon.filter(|i| !i.trim().is_empty()));
    if let Some(align) = payload.align {
        active.align = Set(align.as_str().to_string());
    }
    active.updated_at = Set(now());
    let item = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "menu_item_update",
        "menu_items",
        serde_json::json!({ "menu_id": menu_id, "item_id": item.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item updated",
        MenuItem::from(item),
        Some(Meta::empty()),
    ))
}

pub async fn delete_item(
    state: &AppState,
    user: &AuthUser,
    menu_id: Uuid,
    item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let item = find_item(state, menu_id, item_id).await?;
    MenuItems::delete_by_id(item.id).exec(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "menu_item_delete",
        "menu_items",
        serde_json::json!({ "menu_id": menu_id, "item_id": item_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Applies `[{id, position, parent_id}]` in one transaction. Ids from other menus are ignored.
pub async fn reorder_items(
    state: &AppState,
    user: &AuthUser,
    menu_id: Uuid,
    payload: ReorderMenuRequest,
) -> AppResult<ApiResponse<MenuTree>> {
    ensure_admin(user)?;
    let menu = find_menu(state, menu_id).await?;
    payload.validate()?;
    for entry in &payload.items {
        check_parent(state, menu.id, entry.parent_id, Some(entry.id)).await?;
    }

    let txn = state.orm.begin().await?;
    for entry in &payload.items {
        MenuItems::update_many()
            .col_expr(ItemCol::Position, Expr::value(entry.position))
            .col_expr(ItemCol::ParentId, Expr::value(entry.parent_id))
            .col_expr(ItemCol::UpdatedAt, Expr::value(now()))
            .filter(ItemCol::MenuId.eq(menu.id))
            .filter(ItemCol::Id.eq(entry.id))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    audit::record(
        &state.orm,
        user,
        "menu_reorder",
        "menu_items",
        serde_json::json!({ "menu_id": menu.id, "count": payload.items.len() }),
    )
    .await;

    let tree = load_tree(state, menu, false).await?;
    Ok(ApiResponse::success("Menu order saved", tree, Some(Meta::empty())))
}

/// Two-level tree of a menu, each level by position. `visible_only` drops hidden items.
pub async fn load_tree(
    state: &AppState,
    menu: menus::Model,
    visible_only: bool,
) -> AppResult<MenuTree> {
    let mut finder = MenuItems::find().filter(ItemCol::MenuId.eq(menu.id));
    if visible_only {
        finder = finder.filter(ItemCol::Visible.eq(true));
    }
    let items: Vec<MenuItem> = finder
        .order_by_asc(ItemCol::Position)
        .order_by_asc(ItemCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(MenuItem::from)
        .collect();

    Ok(MenuTree {
        menu: Menu::from(menu),
        items: build_tree(items),
    })
}

/// Groups items that are already sorted by position under their top-level parent.
pub fn build_tree(items: Vec<MenuItem>) -> Vec<MenuItemNode> {
    let (roots, children): (Vec<MenuItem>, Vec<MenuItem>) =
        items.into_iter().partition(|item| item.parent_id.is_none());
    roots
        .into_iter()
        .map(|root| {
            let kids = children
                .iter()
                .filter(|child| child.parent_id == Some(root.id))
                .cloned()
                .collect();
            MenuItemNode {
                item: root,
                children: kids,
            }
        })
        .collect()
}

async fn find_menu(state: &AppState, id: Uuid) -> AppResult<menus::Model> {
    match Menus::find_by_id(id).one(&state.orm).await? {
        Some(m) => Ok(m),
        None => Err(AppError::NotFound),
    }
}

/// 404 when the item does not exist or belongs to another menu.
async fn find_item(state: &AppState, menu_id: Uuid, item_id: Uuid) -> AppResult<menu_items::Model> {
    match MenuItems::find_by_id(item_id).one(&state.orm).await? {
        Some(item) if item.menu_id == menu_id => Ok(item),
        _ => Err(AppError::NotFound),
    }
}

async fn check_parent(
    state: &AppState,
    menu_id: Uuid,
    parent_id: Option<Uuid>,
    own_id: Option<Uuid>,
) -> AppResult<()> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    let valid = Some(parent_id) != own_id
        && MenuItems::find_by_id(parent_id)
            .one(&state.orm)
            .await?
            .is_some_and(|parent| parent.menu_id == menu_id);
    if !valid {
        return Err(AppError::Validation(FieldErrors::single(
            "parent_id",
            "The selected parent is invalid.",
        )));
    }
    Ok(())
}

fn target_or_default(target: Option<String>) -> String {
    target
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TARGET.to_string())
}
