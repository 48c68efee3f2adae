use chrono::Utc;
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{EngineError, ResultEngine, categories, expenses};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

/// Fields of a category an update may change.
///
/// `None` leaves the stored value untouched. For `description`, `Some(None)`
/// clears the column.
#[derive(Clone, Debug, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl Engine {
    /// Lists all categories, newest first, each with its current expense count.
    pub async fn list_categories(&self) -> ResultEngine<Vec<(categories::Model, u64)>> {
        let models = categories::Entity::find()
            .order_by_desc(categories::Column::CreatedAt)
            .order_by_desc(categories::Column::Id)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let count = expenses::Entity::find()
                .filter(expenses::Column::CategoryId.eq(model.id))
                .count(&self.database)
                .await?;
            out.push((model, count));
        }
        Ok(out)
    }

    /// Returns a category and its expenses, newest date first.
    pub async fn category(
        &self,
        id: i32,
    ) -> ResultEngine<(categories::Model, Vec<expenses::Model>)> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;

        let expenses = expenses::Entity::find()
            .filter(expenses::Column::CategoryId.eq(id))
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;

        Ok((model, expenses))
    }

    /// Creates a category. The name must be non-empty and not already taken.
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> ResultEngine<categories::Model> {
        let name = normalize_required_name(name, "category name")?;
        let description = normalize_optional_text(description);

        with_tx!(self, |db_tx| {
            if categories::Entity::find()
                .filter(categories::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(name));
            }

            let now = Utc::now();
            let active = categories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(description),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = active.insert(&db_tx).await?;
            tracing::debug!(id = model.id, "category created");
            Ok(model)
        })
    }

    /// Merge-patch update: only fields present in `patch` are written.
    ///
    /// An empty rename request is treated as absent; renaming onto another
    /// category's name fails with [`EngineError::ExistingKey`].
    pub async fn update_category(
        &self,
        id: i32,
        patch: CategoryPatch,
    ) -> ResultEngine<categories::Model> {
        let name = match patch.name.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        };
        let description = patch
            .description
            .map(|value| normalize_optional_text(value.as_deref()));

        with_tx!(self, |db_tx| {
            if categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Err(EngineError::KeyNotFound("category not exists".to_string()));
            }

            if let Some(new_name) = &name
                && categories::Entity::find()
                    .filter(categories::Column::Name.eq(new_name.as_str()))
                    .filter(categories::Column::Id.ne(id))
                    .one(&db_tx)
                    .await?
                    .is_some()
            {
                return Err(EngineError::ExistingKey(new_name.clone()));
            }

            let mut active = categories::ActiveModel {
                id: ActiveValue::Set(id),
                ..Default::default()
            };
            if let Some(value) = name {
                active.name = ActiveValue::Set(value);
            }
            if let Some(value) = description {
                active.description = ActiveValue::Set(value);
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            Ok(model)
        })
    }

    /// Deletes a category. The schema's `ON DELETE CASCADE` removes its
    /// expenses in the same statement; no application-side loop.
    pub async fn delete_category(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            if categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Err(EngineError::KeyNotFound("category not exists".to_string()));
            }

            categories::Entity::delete_by_id(id).exec(&db_tx).await?;
            tracing::debug!(id, "category deleted with its expenses");
            Ok(())
        })
    }
}
