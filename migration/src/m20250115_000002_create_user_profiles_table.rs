use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn user_profiles_table() -> TableCreateStatement {
    Table::create()
        .table(UserProfiles::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(UserProfiles::UserId)
                .big_integer()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(UserProfiles::Phone).string_len(20))
        .col(ColumnDef::new(UserProfiles::BirthDate).date())
        .col(ColumnDef::new(UserProfiles::Gender).string_len(20))
        .col(ColumnDef::new(UserProfiles::Bio).text())
        .col(ColumnDef::new(UserProfiles::Website).string_len(255))
        .col(ColumnDef::new(UserProfiles::AddressLine1).string_len(255))
        .col(ColumnDef::new(UserProfiles::AddressLine2).string_len(255))
        .col(ColumnDef::new(UserProfiles::City).string_len(100))
        .col(ColumnDef::new(UserProfiles::State).string_len(100))
        .col(ColumnDef::new(UserProfiles::PostalCode).string_len(20))
        .col(ColumnDef::new(UserProfiles::CountryCode).char_len(2))
        .col(
            ColumnDef::new(UserProfiles::Preferences)
                .json_binary()
                .not_null()
                .default(Expr::cust("'{}'::jsonb")),
        )
        .col(
            ColumnDef::new(UserProfiles::IsPublic)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(
            ColumnDef::new(UserProfiles::MarketingConsent)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(UserProfiles::Timezone)
                .string_len(64)
                .not_null()
                .default("UTC"),
        )
        .col(
            ColumnDef::new(UserProfiles::Locale)
                .string_len(10)
                .not_null()
                .default("en"),
        )
        .col(
            ColumnDef::new(UserProfiles::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(UserProfiles::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_profiles_user")
                .from(UserProfiles::Table, UserProfiles::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(user_profiles_table()).await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE user_profiles
                ADD CONSTRAINT chk_user_profiles_gender
                CHECK (gender IS NULL OR gender IN ('male', 'female', 'other', 'prefer_not_to_say'));
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_user_profiles_updated_at
                BEFORE UPDATE ON user_profiles
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS update_user_profiles_updated_at ON user_profiles",
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(UserProfiles::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    UserId,
    Phone,
    BirthDate,
    Gender,
    Bio,
    Website,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    CountryCode,
    Preferences,
    IsPublic,
    MarketingConsent,
    Timezone,
    Locale,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_go_away_with_their_user() {
        let sql = user_profiles_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(
            r#"CONSTRAINT "fk_user_profiles_user" FOREIGN KEY ("user_id") REFERENCES "users" ("id") ON DELETE CASCADE"#
        ));
    }
}
