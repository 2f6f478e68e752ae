//! 联系我们留言实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_contact_message(self) -> crate::models::content::entities::ContactMessage {
        crate::models::content::entities::ContactMessage {
            id: self.id,
            full_name: self.full_name,
            phone_number: self.phone_number,
            message: self.message,
            is_read: self.is_read,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
