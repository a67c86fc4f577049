use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Posts::AuthorHandle).string().not_null())
                    .col(ColumnDef::new(Posts::AuthorEmail).string().not_null())
                    .col(ColumnDef::new(Posts::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::MarkdownSource).text().null())
                    .col(ColumnDef::new(Posts::SanitizedHtml).text().null())
                    .col(
                        ColumnDef::new(Posts::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Posts::LikeCount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // BIGSERIAL; listings order by it to keep insertion order.
                    .col(
                        ColumnDef::new(Posts::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Home feed reads newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_created_at")
                    .table(Posts::Table)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

// No foreign key to users: a post may outlive its author record.
#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    AuthorHandle,
    AuthorEmail,
    Title,
    Content,
    MarkdownSource,
    SanitizedHtml,
    LikeCount,
    CreatedAt,
    Seq,
}
