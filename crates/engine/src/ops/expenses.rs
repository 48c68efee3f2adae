use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, categories, expenses};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

/// Fields of an expense an update may change.
///
/// `None` leaves the stored value untouched. For `description`, `Some(None)`
/// clears the column. A present `category_id` is validated against the
/// category table before anything is written.
#[derive(Clone, Debug, Default)]
pub struct ExpensePatch {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<Option<String>>,
    pub category_id: Option<i32>,
    pub date: Option<DateTime<Utc>>,
}

impl Engine {
    /// Lists all expenses, newest date first, with their category embedded.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<(expenses::Model, categories::Model)>> {
        let rows = expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (expense, category) in rows {
            let Some(category) = category else { continue };
            out.push((expense, category));
        }
        Ok(out)
    }

    /// Returns an expense with its category.
    pub async fn expense(&self, id: i32) -> ResultEngine<(expenses::Model, categories::Model)> {
        let (expense, category) = expenses::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))?;

        let category =
            category.ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        Ok((expense, category))
    }

    /// Creates an expense. The referenced category is resolved inside the same
    /// transaction as the insert, so a concurrent category delete fails the
    /// whole operation instead of leaving an orphan row.
    pub async fn create_expense(
        &self,
        title: &str,
        amount: f64,
        category_id: i32,
        description: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> ResultEngine<(expenses::Model, categories::Model)> {
        let title = normalize_required_name(title, "expense title")?;
        let description = normalize_optional_text(description);

        with_tx!(self, |db_tx| {
            let category = categories::Entity::find_by_id(category_id)
                .one(&db_tx)
                .await?
                .ok_or(EngineError::UnknownCategory(category_id))?;

            let now = Utc::now();
            let active = expenses::ActiveModel {
                id: ActiveValue::NotSet,
                title: ActiveValue::Set(title),
                amount: ActiveValue::Set(amount),
                description: ActiveValue::Set(description),
                category_id: ActiveValue::Set(category_id),
                date: ActiveValue::Set(date.unwrap_or(now)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            let model = active.insert(&db_tx).await?;
            Ok((model, category))
        })
    }

    /// Merge-patch update: only fields present in `patch` are written.
    pub async fn update_expense(
        &self,
        id: i32,
        patch: ExpensePatch,
    ) -> ResultEngine<(expenses::Model, categories::Model)> {
        let title = match patch.title.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        };
        let description = patch
            .description
            .map(|value| normalize_optional_text(value.as_deref()));

        with_tx!(self, |db_tx| {
            if expenses::Entity::find_by_id(id).one(&db_tx).await?.is_none() {
                return Err(EngineError::KeyNotFound("expense not exists".to_string()));
            }

            if let Some(category_id) = patch.category_id
                && categories::Entity::find_by_id(category_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::UnknownCategory(category_id));
            }

            let mut active = expenses::ActiveModel {
                id: ActiveValue::Set(id),
                ..Default::default()
            };
            if let Some(value) = title {
                active.title = ActiveValue::Set(value);
            }
            if let Some(value) = patch.amount {
                active.amount = ActiveValue::Set(value);
            }
            if let Some(value) = description {
                active.description = ActiveValue::Set(value);
            }
            if let Some(value) = patch.category_id {
                active.category_id = ActiveValue::Set(value);
            }
            if let Some(value) = patch.date {
                active.date = ActiveValue::Set(value);
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            let category = categories::Entity::find_by_id(model.category_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
            Ok((model, category))
        })
    }

    /// Deletes an expense. Deleting an id that does not exist is an error,
    /// not a no-op.
    pub async fn delete_expense(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            if expenses::Entity::find_by_id(id).one(&db_tx).await?.is_none() {
                return Err(EngineError::KeyNotFound("expense not exists".to_string()));
            }

            expenses::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
