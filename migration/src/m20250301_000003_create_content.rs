use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 博客文章 ====================
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Articles::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Articles::Title).string().not_null())
                    .col(ColumnDef::new(Articles::Content).text().not_null())
                    .col(ColumnDef::new(Articles::Subject).string().not_null())
                    .col(
                        ColumnDef::new(Articles::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Articles::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Articles::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Articles::ReadMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Articles::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Articles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Articles::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Articles::Table, Articles::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 博客评论 ====================
        manager
            .create_table(
                Table::create()
                    .table(BlogComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlogComments::ArticleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogComments::AuthorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlogComments::Name).string().not_null())
                    .col(ColumnDef::new(BlogComments::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(BlogComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(BlogComments::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogComments::Visible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogComments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BlogComments::Table, BlogComments::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BlogComments::Table, BlogComments::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 新闻 ====================
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(News::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(News::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(News::Title).string().not_null())
                    .col(ColumnDef::new(News::Content).text().not_null())
                    .col(ColumnDef::new(News::Subject).string().not_null())
                    .col(ColumnDef::new(News::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(News::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(News::ReadMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(News::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(News::Special)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(News::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(News::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(News::Table, News::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 相册 ====================
        manager
            .create_table(
                Table::create()
                    .table(GalleryImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryImages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GalleryImages::Title).string().not_null())
                    .col(ColumnDef::new(GalleryImages::ImageUrl).string().not_null())
                    .col(
                        ColumnDef::new(GalleryImages::Status)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GalleryImages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 联系我们 ====================
        manager
            .create_table(
                Table::create()
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactMessages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactMessages::FullName).string().not_null())
                    .col(
                        ColumnDef::new(ContactMessages::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContactMessages::Message).text().not_null())
                    .col(
                        ColumnDef::new(ContactMessages::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ContactMessages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 家长意见 ====================
        manager
            .create_table(
                Table::create()
                    .table(ParentComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParentComments::ParentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParentComments::FullName).string().not_null())
                    .col(
                        ColumnDef::new(ParentComments::StudentName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentComments::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParentComments::Subject).string().not_null())
                    .col(ColumnDef::new(ParentComments::Comment).text().not_null())
                    .col(
                        ColumnDef::new(ParentComments::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ParentComments::Visible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ParentComments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentComments::Table, ParentComments::ParentId)
                            .to(Parents::Table, Parents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blog_comments_article_id")
                    .table(BlogComments::Table)
                    .col(BlogComments::ArticleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParentComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalleryImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Parents {
    #[sea_orm(iden = "parents")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Articles {
    #[sea_orm(iden = "articles")]
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    Subject,
    Slug,
    ImageUrl,
    Views,
    ReadMinutes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogComments {
    #[sea_orm(iden = "blog_comments")]
    Table,
    Id,
    ArticleId,
    AuthorId,
    Name,
    PhoneNumber,
    Comment,
    Approved,
    Visible,
    CreatedAt,
}

#[derive(DeriveIden)]
enum News {
    #[sea_orm(iden = "news")]
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    Subject,
    ImageUrl,
    Views,
    ReadMinutes,
    Status,
    Special,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GalleryImages {
    #[sea_orm(iden = "gallery_images")]
    Table,
    Id,
    Title,
    ImageUrl,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ContactMessages {
    #[sea_orm(iden = "contact_messages")]
    Table,
    Id,
    FullName,
    PhoneNumber,
    Message,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ParentComments {
    #[sea_orm(iden = "parent_comments")]
    Table,
    Id,
    ParentId,
    FullName,
    StudentName,
    PhoneNumber,
    Subject,
    Comment,
    Approved,
    Visible,
    CreatedAt,
}
