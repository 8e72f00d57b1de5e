//! User account entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{RoleName, User, UserStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fullname: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub phone_number: Option<i64>,
    pub created_at: DateTimeUtc,
    pub status: String,
    pub last_login: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity together with its loaded roles.
    /// Role rows with names outside [`RoleName`] are skipped.
    pub fn into_user(self, roles: Vec<super::role::Model>) -> User {
        let mut roles: Vec<RoleName> = roles
            .into_iter()
            .filter_map(|role| role.name.parse::<RoleName>().ok())
            .collect();
        roles.sort();
        roles.dedup();

        User {
            id: self.id,
            fullname: self.fullname,
            username: self.username,
            password_hash: self.password,
            phone_number: self.phone_number,
            created_at: self.created_at,
            status: UserStatus::from(self.status.as_str()),
            last_login: self.last_login,
            roles,
        }
    }
}
