//! Expenses API endpoints.

use api_types::expense::{ExpenseCreate, ExpenseUpdate, ExpenseView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{ServerError, server::ServerState};

fn map_expense(expense: engine::expenses::Model, category: engine::categories::Model) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        amount: expense.amount,
        description: expense.description,
        category_id: expense.category_id,
        date: expense.date.fixed_offset(),
        created_at: expense.created_at.fixed_offset(),
        updated_at: expense.updated_at.fixed_offset(),
        category: api_types::category::CategoryView {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at.fixed_offset(),
            updated_at: category.updated_at.fixed_offset(),
        },
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(|(expense, category)| map_expense(expense, category))
        .collect();

    Ok(Json(expenses))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<ExpenseView>, ServerError> {
    let (expense, category) = state.engine.expense(id).await?;
    Ok(Json(map_expense(expense, category)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseCreate>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let (Some(title), Some(amount), Some(category_id)) =
        (payload.title, payload.amount, payload.category_id)
    else {
        return Err(ServerError::Generic(
            "Title, amount and categoryId are required".to_string(),
        ));
    };
    if amount <= 0.0 {
        return Err(ServerError::Generic(
            "Amount must be a positive number".to_string(),
        ));
    }

    let (expense, category) = state
        .engine
        .create_expense(
            &title,
            amount,
            category_id,
            payload.description.as_deref(),
            payload.date.map(|date| date.with_timezone(&Utc)),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(map_expense(expense, category))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseView>, ServerError> {
    if let Some(amount) = payload.amount
        && amount <= 0.0
    {
        return Err(ServerError::Generic(
            "Amount must be a positive number".to_string(),
        ));
    }

    let patch = engine::ExpensePatch {
        title: payload.title,
        amount: payload.amount,
        description: payload.description,
        category_id: payload.category_id,
        date: payload.date.map(|date| date.with_timezone(&Utc)),
    };

    let (expense, category) = state.engine.update_expense(id, patch).await?;
    Ok(Json(map_expense(expense, category)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
