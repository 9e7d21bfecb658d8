use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Total cook time in minutes, composed from hours and minutes inputs.
    pub time_to_cook_mins: i32,

    pub method: String,

    pub is_vegetarian: bool,

    pub is_vegan: bool,

    /// Soft-delete flag. Deleted rows stay in the table but are excluded
    /// from all normal reads.
    pub is_deleted: bool,

    /// RFC3339 timestamp, set at creation and refreshed on every update.
    pub last_modified: String,

    /// Id of the user who created the recipe. Never changes after insert.
    pub created_by_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ingredients::Entity")]
    Ingredients,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
