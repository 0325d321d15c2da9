use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string())
                    .col(ColumnDef::new(Users::SsoId).string())
                    .col(ColumnDef::new(Users::Company).string().not_null())
                    .col(ColumnDef::new(Users::Department).string().not_null())
                    .col(
                        ColumnDef::new(Users::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::LastLogin)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::LogoutCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::Active).boolean().not_null())
                    .col(ColumnDef::new(Users::Admin).boolean().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Surname).string().not_null())
                    .col(ColumnDef::new(Users::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Users::Certificate).blob().not_null())
                    .col(ColumnDef::new(Users::DbPassword).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uk_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // NULLs do not collide, so users without SSO are unaffected.
        manager
            .create_index(
                Index::create()
                    .name("uk_users_sso_id")
                    .table(Users::Table)
                    .col(Users::SsoId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Name).string())
                    .col(ColumnDef::new(Groups::OwnerId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_owner")
                            .from(Groups::Table, Groups::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Views::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Views::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Views::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(Views::Name).string().not_null())
                    .col(ColumnDef::new(Views::Filters).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_views_group")
                            .from(Views::Table, Views::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ownerships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ownerships::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ownerships::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Ownerships::ViewId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ownerships_user")
                            .from(Ownerships::Table, Ownerships::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ownerships_view")
                            .from(Ownerships::Table, Ownerships::ViewId)
                            .to(Views::Table, Views::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uk_ownerships_user_view")
                    .table(Ownerships::Table)
                    .col(Ownerships::UserId)
                    .col(Ownerships::ViewId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ownerships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Views::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Password,
    SsoId,
    Company,
    Department,
    Created,
    LastLogin,
    LogoutCount,
    Active,
    Admin,
    Name,
    Surname,
    Gender,
    Certificate,
    DbPassword,
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    Name,
    OwnerId,
}

#[derive(DeriveIden)]
enum Views {
    Table,
    Id,
    GroupId,
    Name,
    Filters,
}

#[derive(DeriveIden)]
enum Ownerships {
    Table,
    Id,
    UserId,
    ViewId,
}
