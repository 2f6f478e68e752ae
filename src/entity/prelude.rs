//! 预导入模块，方便使用

pub use super::admin_profiles::{
    ActiveModel as AdminProfileActiveModel, Entity as AdminProfiles, Model as AdminProfileModel,
};
pub use super::articles::{
    ActiveModel as ArticleActiveModel, Entity as Articles, Model as ArticleModel,
};
pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords,
    Model as AttendanceRecordModel,
};
pub use super::blog_comments::{
    ActiveModel as BlogCommentActiveModel, Entity as BlogComments, Model as BlogCommentModel,
};
pub use super::contact_messages::{
    ActiveModel as ContactMessageActiveModel, Entity as ContactMessages,
    Model as ContactMessageModel,
};
pub use super::gallery_images::{
    ActiveModel as GalleryImageActiveModel, Entity as GalleryImages, Model as GalleryImageModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::lesson_students::{
    ActiveModel as LessonStudentActiveModel, Entity as LessonStudents, Model as LessonStudentModel,
};
pub use super::lessons::{ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel};
pub use super::news::{ActiveModel as NewsActiveModel, Entity as News, Model as NewsModel};
pub use super::parent_children::{
    ActiveModel as ParentChildActiveModel, Entity as ParentChildren, Model as ParentChildModel,
};
pub use super::parent_comments::{
    ActiveModel as ParentCommentActiveModel, Entity as ParentComments, Model as ParentCommentModel,
};
pub use super::parents::{ActiveModel as ParentActiveModel, Entity as Parents, Model as ParentModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teacher_contacts::{
    ActiveModel as TeacherContactActiveModel, Entity as TeacherContacts,
    Model as TeacherContactModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
