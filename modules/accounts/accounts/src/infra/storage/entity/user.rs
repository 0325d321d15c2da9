use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password: Option<String>,
    #[sea_orm(unique)]
    pub sso_id: Option<String>,
    pub company: String,
    pub department: String,
    pub created: OffsetDateTime,
    pub last_login: OffsetDateTime,
    pub logout_count: i64,
    pub active: bool,
    pub admin: bool,
    pub name: String,
    pub surname: String,
    pub gender: String,
    pub certificate: Vec<u8>,
    pub db_password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ownership::Entity")]
    Ownerships,
    #[sea_orm(has_many = "super::group::Entity")]
    OwnedGroups,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::ownership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ownerships.def()
    }
}
