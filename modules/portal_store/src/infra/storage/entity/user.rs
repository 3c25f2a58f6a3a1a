use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Portal role of a user
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "worker")]
    Worker,
    #[sea_orm(string_value = "hr")]
    Hr,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Portal user account
#[derive(Clone, Debug, PartialEq, Eq, Default, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users_user")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,
    pub patronymic: Option<String>,

    /// Login, unique across all portals
    #[sea_orm(unique)]
    pub email: String,

    /// Password hash, never the plain password
    pub password: String,

    pub birth_date: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub avatar: String,
    pub role: Role,
    pub is_dismissed: bool,

    pub department_id: Option<Uuid>,
    pub portal_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::portal::Entity",
        from = "Column::PortalId",
        to = "super::portal::Column::Id"
    )]
    Portal,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::portal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portal.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            super::assign_id(&mut self.id);
            if self.created_at.is_not_set() {
                self.created_at = Set(chrono::Utc::now());
            }
            if self.avatar.is_not_set() {
                self.avatar = Set(super::DEFAULT_AVATAR.to_string());
            }
            if self.role.is_not_set() {
                self.role = Set(Role::Worker);
            }
            if self.is_dismissed.is_not_set() {
                self.is_dismissed = Set(false);
            }
        }
        Ok(self)
    }
}
