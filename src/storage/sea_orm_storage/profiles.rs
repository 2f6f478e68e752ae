//! 教师、学生与家长资料存储操作

use super::{SeaOrmStorage, fetch_page};
use crate::entity::prelude::*;
use crate::entity::{parent_children, parents, students, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    profiles::{
        entities::{Parent, Student, Teacher},
        requests::UpdateTeacherRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    JoinType, QueryOrder, QuerySelect, RelationTrait, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(teachers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 教师详情页按英文姓名查找
    pub async fn get_teacher_by_full_name_en_impl(
        &self,
        full_name_en: &str,
    ) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(teachers::Column::FullNameEn.eq(full_name_en))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_impl(
        &self,
        page: Option<&str>,
        size: u64,
    ) -> Result<PaginatedResponse<Teacher>> {
        let select = Teachers::find().order_by_asc(teachers::Column::Id);
        let (items, pagination) = fetch_page(&self.db, select, page, size, "教师").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_teacher()).collect(),
            pagination,
        })
    }

    pub async fn list_all_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let result = Teachers::find()
            .order_by_asc(teachers::Column::FullName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 更新教师资料，英文姓名需保持唯一
    pub async fn update_teacher_impl(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Teacher> {
        let existing = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
            .ok_or_else(|| SchoolError::not_found(format!("教师不存在: {teacher_id}")))?;

        if let Some(ref full_name_en) = update.full_name_en
            && *full_name_en != existing.full_name_en
        {
            let taken = Teachers::find()
                .filter(teachers::Column::FullNameEn.eq(full_name_en))
                .one(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;
            if taken.is_some() {
                return Err(SchoolError::conflict(format!(
                    "英文姓名已被使用: {full_name_en}"
                )));
            }
        }

        let mut model = existing.into_active_model();
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(full_name_en) = update.full_name_en {
            model.full_name_en = Set(full_name_en);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(degree) = update.degree {
            model.degree = Set(Some(degree));
        }
        if let Some(years) = update.teaching_experience {
            model.teaching_experience = Set(years.max(0));
        }
        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新教师资料失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 开关教师的成绩录入权限
    pub async fn set_teacher_status_impl(&self, teacher_id: i64, status: bool) -> Result<bool> {
        let result = Teachers::update_many()
            .col_expr(teachers::Column::Status, Expr::value(status))
            .col_expr(
                teachers::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(teachers::Column::Id.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新教师状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计教师失败: {e}")))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生失败: {e}")))
    }

    pub async fn get_parent_by_user_id_impl(&self, user_id: i64) -> Result<Option<Parent>> {
        let result = Parents::find()
            .filter(parents::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长失败: {e}")))?;

        Ok(result.map(|m| m.into_parent()))
    }

    /// 家长名下的子女
    pub async fn list_children_impl(&self, parent_id: i64) -> Result<Vec<Student>> {
        let result = Students::find()
            .join(
                JoinType::InnerJoin,
                students::Relation::ParentChildren.def(),
            )
            .filter(parent_children::Column::ParentId.eq(parent_id))
            .order_by_asc(students::Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询子女失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    /// 关联家长与学生，重复关联不报错
    pub async fn link_parent_child_impl(&self, parent_id: i64, student_id: i64) -> Result<()> {
        let parent = Parents::find_by_id(parent_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询家长失败: {e}")))?;
        if parent.is_none() {
            return Err(SchoolError::not_found(format!("家长不存在: {parent_id}")));
        }

        let student = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;
        if student.is_none() {
            return Err(SchoolError::not_found(format!("学生不存在: {student_id}")));
        }

        let linked = ParentChildren::find()
            .filter(parent_children::Column::ParentId.eq(parent_id))
            .filter(parent_children::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询亲子关系失败: {e}")))?;
        if linked.is_some() {
            return Ok(());
        }

        ParentChildActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("关联子女失败: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::entities::{GradeLevel, NewProfile, Profile};
    use crate::models::users::entities::NewUser;

    async fn create(storage: &SeaOrmStorage, username: &str, profile: NewProfile) -> Profile {
        storage
            .create_user_with_profile_impl(
                NewUser {
                    username: username.to_string(),
                    password_hash: "hash".into(),
                    role: profile.role(),
                    is_staff: false,
                    phone_number: None,
                },
                profile,
            )
            .await
            .expect("create user")
            .1
    }

    #[tokio::test]
    async fn test_teacher_full_name_en_unique_on_update() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let first = create(
            &storage,
            "t1",
            NewProfile::Teacher {
                full_name: "Teacher One".into(),
                full_name_en: "teacher-one".into(),
            },
        )
        .await;
        create(
            &storage,
            "t2",
            NewProfile::Teacher {
                full_name: "Teacher Two".into(),
                full_name_en: "teacher-two".into(),
            },
        )
        .await;
        let Profile::Teacher(first) = first else {
            panic!("expected teacher profile");
        };

        let err = storage
            .update_teacher_impl(
                first.id,
                UpdateTeacherRequest {
                    full_name_en: Some("teacher-two".into()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("should conflict");
        assert!(matches!(err, SchoolError::Conflict(_)));

        let updated = storage
            .update_teacher_impl(
                first.id,
                UpdateTeacherRequest {
                    degree: Some("MSc".into()),
                    teaching_experience: Some(12),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.degree.as_deref(), Some("MSc"));
        assert_eq!(updated.teaching_experience, 12);
        assert_eq!(
            storage
                .get_teacher_by_full_name_en_impl("teacher-one")
                .await
                .expect("lookup")
                .map(|t| t.id),
            Some(first.id)
        );
    }

    #[tokio::test]
    async fn test_link_parent_child_is_idempotent() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let Profile::Parent(parent) = create(
            &storage,
            "mom",
            NewProfile::Parent {
                first_name: "Maryam".into(),
                last_name: "Hosseini".into(),
            },
        )
        .await
        else {
            panic!("expected parent profile");
        };
        let Profile::Student(child) = create(
            &storage,
            "kid",
            NewProfile::Student {
                first_name: "Nima".into(),
                last_name: "Hosseini".into(),
                grade_level: GradeLevel::Seventh,
            },
        )
        .await
        else {
            panic!("expected student profile");
        };

        storage
            .link_parent_child_impl(parent.id, child.id)
            .await
            .expect("link");
        storage
            .link_parent_child_impl(parent.id, child.id)
            .await
            .expect("relink");

        let children = storage.list_children_impl(parent.id).await.expect("children");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].first_name, "Nima");

        let err = storage
            .link_parent_child_impl(parent.id, child.id + 100)
            .await
            .expect_err("missing student");
        assert!(err.is_not_found());
    }
}
