use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "homepage_sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::homepage_section_categories::Entity")]
    CategoryLinks,
}

impl Related<super::homepage_section_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
