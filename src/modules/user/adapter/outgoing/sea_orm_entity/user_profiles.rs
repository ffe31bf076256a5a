use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub phone: Option<String>,

    #[sea_orm(nullable)]
    pub birth_date: Option<Date>,

    /// `male` | `female` | `other` | `prefer_not_to_say`
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub gender: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub website: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub address_line1: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub address_line2: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub city: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub state: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub postal_code: Option<String>,

    #[sea_orm(column_type = "Char(Some(2))", nullable)]
    pub country_code: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub preferences: Json,

    pub is_public: bool,

    pub marketing_consent: bool,

    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub timezone: String,

    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub locale: String,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, Schema};

    #[test]
    fn test_deleting_user_cascades() {
        let backend = DbBackend::Postgres;
        let sql = backend
            .build(&Schema::new(backend).create_table_from_entity(Entity))
            .to_string();

        assert!(sql.contains(
            r#"FOREIGN KEY ("user_id") REFERENCES "users" ("id") ON DELETE CASCADE"#
        ));
    }
}
