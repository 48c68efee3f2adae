//! Request and response bodies shared by the server and its clients.
//!
//! Field names follow the wire format the web client consumes: camelCase,
//! `amount` as a JSON number, timestamps as ISO-8601 strings.

use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field from an explicit `null`.
///
/// With `#[serde(default, deserialize_with = "double_option")]` a missing
/// field deserializes to `None`, `null` to `Some(None)`, and a value to
/// `Some(Some(value))`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

pub mod category {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "double_option"
        )]
        pub description: Option<Option<String>>,
    }

    /// A category as returned by create/update and embedded in expenses.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }

    /// A listing row: the category plus its current expense count.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategorySummary {
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
        pub expense_count: u64,
    }

    /// A category with its expenses, newest date first.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryDetail {
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
        pub expenses: Vec<super::expense::ExpenseRow>,
    }

}

pub mod expense {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseCreate {
        pub title: Option<String>,
        pub amount: Option<f64>,
        pub description: Option<String>,
        pub category_id: Option<i32>,
        pub date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub title: Option<String>,
        pub amount: Option<f64>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "double_option"
        )]
        pub description: Option<Option<String>>,
        pub category_id: Option<i32>,
        pub date: Option<DateTime<FixedOffset>>,
    }

    /// An expense with its resolved category embedded.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: i32,
        pub title: String,
        pub amount: f64,
        pub description: Option<String>,
        pub category_id: i32,
        pub date: DateTime<FixedOffset>,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
        pub category: super::category::CategoryView,
    }

    /// An expense row without the embedded category, as nested under
    /// a category detail response.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseRow {
        pub id: i32,
        pub title: String,
        pub amount: f64,
        pub description: Option<String>,
        pub category_id: i32,
        pub date: DateTime<FixedOffset>,
        pub created_at: DateTime<FixedOffset>,
        pub updated_at: DateTime<FixedOffset>,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub message: String,
    }
}
