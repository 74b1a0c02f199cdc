//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub department_id: Option<i64>,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub present_address: String,
    pub permanent_address: String,
    pub date_of_birth: Option<String>,
    pub mobile_number: String,
    pub photo_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::subject_offerings::Entity")]
    SubjectOfferings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::subject_offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectOfferings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        crate::models::teachers::entities::Teacher {
            id: self.id,
            name: self.name,
            department_id: self.department_id,
            user_id: self.user_id,
            present_address: self.present_address,
            permanent_address: self.permanent_address,
            date_of_birth: super::parse_date(self.date_of_birth),
            mobile_number: self.mobile_number,
            photo_url: self.photo_url,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
