// src/grading/mod.rs

pub mod grader;
pub mod matcher;

pub use grader::Grader;
pub use matcher::is_correct;
