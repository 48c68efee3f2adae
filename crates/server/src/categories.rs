//! Categories API endpoints.

use api_types::category::{
    CategoryCreate, CategoryDetail, CategorySummary, CategoryUpdate, CategoryView,
};
use api_types::expense::ExpenseRow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_category(category: engine::categories::Model) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        description: category.description,
        created_at: category.created_at.fixed_offset(),
        updated_at: category.updated_at.fixed_offset(),
    }
}

fn map_summary(category: engine::categories::Model, expense_count: u64) -> CategorySummary {
    CategorySummary {
        id: category.id,
        name: category.name,
        description: category.description,
        created_at: category.created_at.fixed_offset(),
        updated_at: category.updated_at.fixed_offset(),
        expense_count,
    }
}

fn map_expense_row(expense: engine::expenses::Model) -> ExpenseRow {
    ExpenseRow {
        id: expense.id,
        title: expense.title,
        amount: expense.amount,
        description: expense.description,
        category_id: expense.category_id,
        date: expense.date.fixed_offset(),
        created_at: expense.created_at.fixed_offset(),
        updated_at: expense.updated_at.fixed_offset(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategorySummary>>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(|(category, count)| map_summary(category, count))
        .collect();

    Ok(Json(categories))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryDetail>, ServerError> {
    let (category, expenses) = state.engine.category(id).await?;

    Ok(Json(CategoryDetail {
        id: category.id,
        name: category.name,
        description: category.description,
        created_at: category.created_at.fixed_offset(),
        updated_at: category.updated_at.fixed_offset(),
        expenses: expenses.into_iter().map(map_expense_row).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let Some(name) = payload.name else {
        return Err(ServerError::Generic("Name is required".to_string()));
    };

    let category = state
        .engine
        .create_category(&name, payload.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let patch = engine::CategoryPatch {
        name: payload.name,
        description: payload.description,
    };

    let category = state.engine.update_category(id, patch).await?;
    Ok(Json(map_category(category)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
