use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub menu_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub target: String,
    pub visible: bool,
    pub icon: Option<String>,
    pub align: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menus::Entity",
        from = "Column::MenuId",
        to = "super::menus::Column::Id"
    )]
    Menus,
}

impl Related<super::menus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
