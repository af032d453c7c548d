//! Create `website_hit_sequence` table.
//!
//! Rows are provisioned out of band; the service only increments
//! `sequence_count` of existing rows.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WebsiteHitSequence::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebsiteHitSequence::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WebsiteHitSequence::SequenceName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WebsiteHitSequence::SequenceCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .check(Expr::col(WebsiteHitSequence::SequenceCount).gte(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebsiteHitSequence::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WebsiteHitSequence { Table, Id, SequenceName, SequenceCount }
