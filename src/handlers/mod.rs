// src/handlers/mod.rs

pub mod analytics;
pub mod attempts;
pub mod questions;
pub mod quizzes;
