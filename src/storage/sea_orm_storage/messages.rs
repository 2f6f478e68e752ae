//! 联系留言、学生留言与家长意见存储操作

use super::{SeaOrmStorage, fetch_page};
use crate::entity::prelude::*;
use crate::entity::{contact_messages, parent_comments, teacher_contacts};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    academics::entities::TeacherContact,
    content::{
        entities::{ContactMessage, ParentComment},
        requests::{ContactRequest, ModerateRequest, ParentCommentRequest, TeacherContactRequest},
    },
    profiles::entities::Student,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_contact_message_impl(&self, req: ContactRequest) -> Result<ContactMessage> {
        let result = ContactMessageActiveModel {
            full_name: Set(req.full_name),
            phone_number: Set(req.phone_number),
            message: Set(req.message),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("保存留言失败: {e}")))?;

        Ok(result.into_contact_message())
    }

    pub async fn list_contact_messages_impl(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<ContactMessage>> {
        let select = ContactMessages::find()
            .order_by_asc(contact_messages::Column::IsRead)
            .order_by_desc(contact_messages::Column::CreatedAt);
        let (items, pagination) = fetch_page(&self.db, select, page, size, "留言").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_contact_message()).collect(),
            pagination,
        })
    }

    pub async fn mark_contact_message_read_impl(&self, id: i64) -> Result<bool> {
        let result = ContactMessages::update_many()
            .col_expr(contact_messages::Column::IsRead, Expr::value(true))
            .filter(contact_messages::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新留言状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_teacher_contact_impl(
        &self,
        teacher_id: i64,
        student: &Student,
        req: TeacherContactRequest,
    ) -> Result<TeacherContact> {
        let result = TeacherContactActiveModel {
            teacher_id: Set(teacher_id),
            student_id: Set(student.id),
            student_name: Set(student.full_name()),
            subject: Set(req.subject),
            message: Set(req.message),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("保存学生留言失败: {e}")))?;

        Ok(result.into_teacher_contact())
    }

    pub async fn list_teacher_contacts_impl(&self, teacher_id: i64) -> Result<Vec<TeacherContact>> {
        let result = TeacherContacts::find()
            .filter(teacher_contacts::Column::TeacherId.eq(teacher_id))
            .order_by_desc(teacher_contacts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生留言失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_teacher_contact()).collect())
    }

    /// 新意见默认未审核且隐藏
    pub async fn create_parent_comment_impl(
        &self,
        parent_id: i64,
        req: ParentCommentRequest,
    ) -> Result<ParentComment> {
        let result = ParentCommentActiveModel {
            parent_id: Set(parent_id),
            full_name: Set(req.full_name),
            student_name: Set(req.student_name),
            phone_number: Set(req.phone_number),
            subject: Set(req.subject.to_string()),
            comment: Set(req.comment),
            approved: Set(false),
            visible: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("保存家长意见失败: {e}")))?;

        Ok(result.into_parent_comment())
    }

    /// 仅返回已审核且可见的意见
    pub async fn list_public_parent_comments_impl(&self) -> Result<Vec<ParentComment>> {
        let result = ParentComments::find()
            .filter(parent_comments::Column::Approved.eq(true))
            .filter(parent_comments::Column::Visible.eq(true))
            .order_by_desc(parent_comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长意见失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_parent_comment()).collect())
    }

    pub async fn moderate_parent_comment_impl(
        &self,
        id: i64,
        moderation: ModerateRequest,
    ) -> Result<Option<ParentComment>> {
        let existing = ParentComments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长意见失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(approved) = moderation.approved {
            model.approved = Set(approved);
        }
        if let Some(visible) = moderation.visible {
            model.visible = Set(visible);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("审核家长意见失败: {e}")))?;

        Ok(Some(result.into_parent_comment()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::entities::CommentSubject;
    use crate::models::profiles::entities::{NewProfile, Profile};
    use crate::storage::sea_orm_storage::lessons::tests::add_user;

    #[tokio::test]
    async fn test_parent_comment_requires_approval_and_visibility() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let Profile::Parent(parent) = add_user(
            &storage,
            "dad",
            NewProfile::Parent {
                first_name: "Hamid".into(),
                last_name: "Naderi".into(),
            },
        )
        .await
        else {
            panic!("expected parent profile");
        };

        let comment = storage
            .create_parent_comment_impl(
                parent.id,
                ParentCommentRequest {
                    full_name: "Hamid Naderi".into(),
                    student_name: "Omid".into(),
                    phone_number: "09121112233".into(),
                    subject: CommentSubject::TeachingMethod,
                    comment: "Great teachers".into(),
                },
            )
            .await
            .expect("create");
        assert!(!comment.approved && !comment.visible);
        assert!(storage.list_public_parent_comments_impl().await.expect("list").is_empty());

        storage
            .moderate_parent_comment_impl(
                comment.id,
                ModerateRequest {
                    approved: Some(true),
                    visible: None,
                },
            )
            .await
            .expect("approve");
        assert!(storage.list_public_parent_comments_impl().await.expect("list").is_empty());

        storage
            .moderate_parent_comment_impl(
                comment.id,
                ModerateRequest {
                    approved: None,
                    visible: Some(true),
                },
            )
            .await
            .expect("show");
        let public = storage.list_public_parent_comments_impl().await.expect("list");
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].subject, CommentSubject::TeachingMethod);
    }

    #[tokio::test]
    async fn test_contact_messages_mark_read() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let message = storage
            .create_contact_message_impl(ContactRequest {
                full_name: "Visitor".into(),
                phone_number: "09120000000".into(),
                message: "Hello".into(),
            })
            .await
            .expect("create");
        assert!(storage.mark_contact_message_read_impl(message.id).await.expect("mark"));
        assert!(!storage.mark_contact_message_read_impl(message.id + 1).await.expect("mark"));

        let page = storage
            .list_contact_messages_impl(Some("abc"), 10)
            .await
            .expect("list");
        assert_eq!(page.pagination.page, 1);
        assert!(page.items[0].is_read);
    }
}
