use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    SortOrder,
}

#[derive(DeriveIden)]
enum Packages {
    Table,
    SortOrder,
}

#[derive(DeriveIden)]
enum Inquiries {
    Table,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Public and admin listings order by sort_order
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_sort_order")
                    .table(Projects::Table)
                    .col(Projects::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_packages_sort_order")
                    .table(Packages::Table)
                    .col(Packages::SortOrder)
                    .to_owned(),
            )
            .await?;

        // Inbox ordering (newest first)
        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_created_at")
                    .table(Inquiries::Table)
                    .col(Inquiries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Dashboard count of NEW inquiries
        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_status")
                    .table(Inquiries::Table)
                    .col(Inquiries::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_sort_order").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_packages_sort_order").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_inquiries_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_inquiries_status").to_owned())
            .await?;

        Ok(())
    }
}
