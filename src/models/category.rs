// src/models/category.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'categories' table in the database.
#[derive(Debug, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_date: Option<chrono::NaiveDateTime>,
}
