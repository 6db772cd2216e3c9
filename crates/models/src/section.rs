use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const MAX_NAME_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub value: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("section name required".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ModelError::Validation(format!("section name longer than {MAX_NAME_LEN} bytes")));
    }
    Ok(())
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

/// Insert the document for `name`, or replace its value wholesale if one exists.
pub async fn upsert(db: &DatabaseConnection, name: &str, value: &Json) -> Result<(), ModelError> {
    validate_name(name)?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        value: Set(Some(value.clone())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Name)
                .update_columns([Column::Value, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Name)
        .all(db)
        .await
        .map_err(ModelError::from_db)
}
