//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{teachers, users::Column};
use crate::errors::{Result, SchoolError};
use crate::models::{
    profiles::entities::{NewProfile, Profile, StaffMember},
    users::entities::{NewUser, User, UserStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建用户并写入对应角色的资料行
    pub async fn create_user_with_profile_impl(
        &self,
        user: NewUser,
        profile: NewProfile,
    ) -> Result<(User, Profile)> {
        if user.role != profile.role() {
            return Err(SchoolError::validation(format!(
                "资料类型与用户角色不一致: {}",
                user.role
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Users::find()
            .filter(Column::Username.eq(&user.username))
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;
        if existing.is_some() {
            return Err(SchoolError::conflict(format!(
                "用户名已存在: {}",
                user.username
            )));
        }

        if let NewProfile::Teacher { full_name_en, .. } = &profile {
            let taken = Teachers::find()
                .filter(teachers::Column::FullNameEn.eq(full_name_en))
                .one(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;
            if taken.is_some() {
                return Err(SchoolError::conflict(format!(
                    "英文姓名已被使用: {full_name_en}"
                )));
            }
        }

        let now = chrono::Utc::now().timestamp();
        let created = UserActiveModel {
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            is_staff: Set(user.is_staff),
            phone_number: Set(user.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建用户失败: {e}")))?;

        let user_id = created.id;
        let profile = match profile {
            NewProfile::Admin {
                first_name,
                last_name,
                title,
                description,
            } => AdminProfileActiveModel {
                user_id: Set(user_id),
                first_name: Set(first_name),
                last_name: Set(last_name),
                title: Set(title),
                description: Set(description),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map(|m| Profile::Admin(m.into_admin_profile())),
            NewProfile::Teacher {
                full_name,
                full_name_en,
            } => TeacherActiveModel {
                user_id: Set(user_id),
                full_name: Set(full_name),
                full_name_en: Set(full_name_en),
                image_url: Set(None),
                description: Set(None),
                degree: Set(None),
                teaching_experience: Set(0),
                status: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map(|m| Profile::Teacher(m.into_teacher())),
            NewProfile::Student {
                first_name,
                last_name,
                grade_level,
            } => StudentActiveModel {
                user_id: Set(user_id),
                first_name: Set(first_name),
                last_name: Set(last_name),
                grade_level: Set(grade_level.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map(|m| Profile::Student(m.into_student())),
            NewProfile::Parent {
                first_name,
                last_name,
            } => ParentActiveModel {
                user_id: Set(user_id),
                first_name: Set(first_name),
                last_name: Set(last_name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map(|m| Profile::Parent(m.into_parent())),
        }
        .map_err(|e| SchoolError::database_operation(format!("创建用户资料失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((created.into_user(), profile))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新密码哈希，并递增令牌版本使此前签发的令牌全部失效
    pub async fn update_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .col_expr(Column::TokenVersion, Expr::cust("token_version + 1"))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计用户失败: {e}")))
    }

    /// 列出管理团队，没有管理员资料的职员以用户名展示
    pub async fn list_staff_impl(&self) -> Result<Vec<StaffMember>> {
        let rows = Users::find()
            .filter(Column::IsStaff.eq(true))
            .find_also_related(AdminProfiles)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询管理团队失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(user, profile)| match profile {
                Some(p) => StaffMember {
                    username: user.username,
                    first_name: p.first_name,
                    last_name: p.last_name,
                    title: p.title,
                    description: p.description,
                },
                None => StaffMember {
                    first_name: user.username.clone(),
                    username: user.username,
                    last_name: String::new(),
                    title: None,
                    description: None,
                },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::entities::GradeLevel;
    use crate::models::users::entities::UserRole;

    fn new_user(username: &str, role: UserRole) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role,
            is_staff: false,
            phone_number: Some("09120000000".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_with_profile() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let (user, profile) = storage
            .create_user_with_profile_impl(
                new_user("sara01", UserRole::Student),
                NewProfile::Student {
                    first_name: "Sara".into(),
                    last_name: "Karimi".into(),
                    grade_level: GradeLevel::Ninth,
                },
            )
            .await
            .expect("create");

        assert_eq!(user.role, UserRole::Student);
        assert!(user.is_active());
        match profile {
            Profile::Student(s) => {
                assert_eq!(s.user_id, user.id);
                assert_eq!(s.grade_level, GradeLevel::Ninth);
            }
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let parent = || NewProfile::Parent {
            first_name: "Ali".into(),
            last_name: "Rahimi".into(),
        };
        storage
            .create_user_with_profile_impl(new_user("ali", UserRole::Parent), parent())
            .await
            .expect("first");
        let err = storage
            .create_user_with_profile_impl(new_user("ali", UserRole::Parent), parent())
            .await
            .expect_err("second should conflict");
        assert!(matches!(err, SchoolError::Conflict(_)));
        assert_eq!(storage.count_users_impl().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_profile_role_mismatch_rejected() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let err = storage
            .create_user_with_profile_impl(
                new_user("mix", UserRole::Teacher),
                NewProfile::Parent {
                    first_name: "A".into(),
                    last_name: "B".into(),
                },
            )
            .await
            .expect_err("mismatch");
        assert!(matches!(err, SchoolError::Validation(_)));
        assert_eq!(storage.count_users_impl().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_staff_listing_falls_back_to_username() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let mut staff = new_user("principal", UserRole::Admin);
        staff.is_staff = true;
        storage
            .create_user_with_profile_impl(
                staff,
                NewProfile::Admin {
                    first_name: "Reza".into(),
                    last_name: "Moradi".into(),
                    title: Some("Principal".into()),
                    description: None,
                },
            )
            .await
            .expect("admin");
        let mut clerk = new_user("clerk", UserRole::Parent);
        clerk.is_staff = true;
        storage
            .create_user_with_profile_impl(
                clerk,
                NewProfile::Parent {
                    first_name: "C".into(),
                    last_name: "D".into(),
                },
            )
            .await
            .expect("clerk");

        let team = storage.list_staff_impl().await.expect("staff");
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].first_name, "Reza");
        assert_eq!(team[1].first_name, "clerk");
    }

    #[tokio::test]
    async fn test_password_change_bumps_token_version() {
        let storage = SeaOrmStorage::in_memory().await.expect("storage");
        let (user, _) = storage
            .create_user_with_profile_impl(
                new_user("maryam", UserRole::Parent),
                NewProfile::Parent {
                    first_name: "Maryam".into(),
                    last_name: "Ahmadi".into(),
                },
            )
            .await
            .expect("create");
        assert_eq!(user.token_version, 0);

        assert!(storage.update_password_impl(user.id, "new-hash").await.expect("update"));
        let stored = storage
            .get_user_by_id_impl(user.id)
            .await
            .expect("load")
            .expect("exists");
        assert_eq!(stored.password_hash, "new-hash");
        assert_eq!(stored.token_version, 1);

        assert!(!storage.update_password_impl(9999, "x").await.expect("update"));
    }
}
