// src/seed.rs

use sqlx::{SqlitePool, types::Json};

use crate::error::AppError;

struct SampleQuestion {
    text: &'static str,
    kind: &'static str,
    options: &'static [&'static str],
    correct: &'static [&'static str],
    feedback: &'static str,
    difficulty: i64,
    category: &'static str,
}

struct SampleQuiz {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    time_limit: i64,
    passing_score: f64,
    /// 1-based indexes into `SAMPLE_QUESTIONS`, in display order.
    questions: &'static [usize],
}

const SAMPLE_QUESTIONS: &[SampleQuestion] = &[
    SampleQuestion {
        text: "The Earth revolves around the Sun.",
        kind: "boolean",
        options: &["True", "False"],
        correct: &["True"],
        feedback: "The Earth completes one orbit around the Sun roughly every 365.25 days.",
        difficulty: 1,
        category: "Science",
    },
    SampleQuestion {
        text: "What is the capital of France?",
        kind: "single-choice",
        options: &["London", "Berlin", "Paris", "Lyon"],
        correct: &["Paris"],
        feedback: "Paris has been the capital of France since the 10th century.",
        difficulty: 1,
        category: "Geography",
    },
    SampleQuestion {
        text: "Water boils at 100 degrees Celsius at sea level.",
        kind: "boolean",
        options: &["True", "False"],
        correct: &["True"],
        feedback: "At standard atmospheric pressure water boils at 100 °C.",
        difficulty: 1,
        category: "Science",
    },
    SampleQuestion {
        text: "Which of these are primary colors?",
        kind: "multi-select",
        options: &["Red", "Green", "Blue", "Yellow", "Purple"],
        correct: &["Red", "Blue", "Yellow"],
        feedback: "In traditional color theory the primary colors are red, blue and yellow.",
        difficulty: 2,
        category: "General Knowledge",
    },
    SampleQuestion {
        text: "What is 12 × 8?",
        kind: "single-choice",
        options: &["86", "96", "106", "92"],
        correct: &["96"],
        feedback: "12 × 8 = 96.",
        difficulty: 1,
        category: "Mathematics",
    },
    SampleQuestion {
        text: "Which of these are planets in our solar system?",
        kind: "multi-select",
        options: &["Mars", "Jupiter", "Pluto", "Venus", "Moon", "Saturn"],
        correct: &["Mars", "Jupiter", "Venus", "Saturn"],
        feedback: "Pluto is a dwarf planet and the Moon is Earth's satellite.",
        difficulty: 3,
        category: "Science",
    },
    SampleQuestion {
        text: "What is the largest ocean on Earth?",
        kind: "single-choice",
        options: &["Atlantic Ocean", "Indian Ocean", "Pacific Ocean", "Arctic Ocean"],
        correct: &["Pacific Ocean"],
        feedback: "The Pacific covers about one third of the Earth's surface.",
        difficulty: 2,
        category: "Geography",
    },
];

const SAMPLE_QUIZZES: &[SampleQuiz] = &[
    SampleQuiz {
        name: "General Knowledge",
        description: "A little bit of everything",
        category: "General Knowledge",
        time_limit: 10,
        passing_score: 70.0,
        questions: &[1, 2, 3, 4, 5],
    },
    SampleQuiz {
        name: "Science Basics",
        description: "Test your knowledge of basic scientific facts",
        category: "Science",
        time_limit: 12,
        passing_score: 75.0,
        questions: &[1, 3, 6],
    },
    SampleQuiz {
        name: "World Geography",
        description: "How well do you know the world?",
        category: "Geography",
        time_limit: 15,
        passing_score: 70.0,
        questions: &[2, 7],
    },
];

/// Inserts sample questions and quizzes when the database has no questions yet.
/// Returns whether anything was inserted.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<bool, AppError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let mut question_ids = Vec::with_capacity(SAMPLE_QUESTIONS.len());
    for question in SAMPLE_QUESTIONS {
        let id = sqlx::query(
            r#"
            INSERT INTO questions
            (question_text, question_type, options, correct_answers, feedback, difficulty_level, category)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(question.text)
        .bind(question.kind)
        .bind(Json(question.options))
        .bind(Json(question.correct))
        .bind(question.feedback)
        .bind(question.difficulty)
        .bind(question.category)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        question_ids.push(id);
    }

    for quiz in SAMPLE_QUIZZES {
        let quiz_id = sqlx::query(
            r#"
            INSERT INTO quizzes (quiz_name, description, category, time_limit, passing_score)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(quiz.name)
        .bind(quiz.description)
        .bind(quiz.category)
        .bind(quiz.time_limit)
        .bind(quiz.passing_score)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for (position, index) in quiz.questions.iter().enumerate() {
            sqlx::query(
                "INSERT INTO quiz_questions (quiz_id, question_id, question_order) VALUES (?, ?, ?)",
            )
            .bind(quiz_id)
            .bind(question_ids[index - 1])
            .bind(position as i64 + 1)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        "Seeded {} sample questions and {} quizzes",
        SAMPLE_QUESTIONS.len(),
        SAMPLE_QUIZZES.len()
    );
    Ok(true)
}
