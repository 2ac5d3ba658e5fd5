// src/grading/matcher.rs

use crate::models::{attempt::UserAnswer, question::QuestionType};

/// Decides whether one submitted answer is correct for a question.
///
/// * `multi-select`: the submitted selections must equal the correct set once
///   both are sorted. Submission order is irrelevant; duplicates, omissions and
///   extra picks all fail. A lone string counts as a one-element selection.
/// * every other type: the answer must be a string literally contained in
///   `correct_answers`. Lists are not unwrapped.
///
/// An absent answer is never correct.
pub fn is_correct(
    question_type: &QuestionType,
    correct_answers: &[String],
    user_answer: Option<&UserAnswer>,
) -> bool {
    let Some(answer) = user_answer else {
        return false;
    };

    match question_type {
        QuestionType::MultiSelect => {
            let mut selected: Vec<&str> = match answer {
                UserAnswer::Text(choice) => vec![choice.as_str()],
                UserAnswer::Choices(choices) => choices.iter().map(String::as_str).collect(),
                UserAnswer::Other(_) => return false,
            };
            let mut expected: Vec<&str> = correct_answers.iter().map(String::as_str).collect();

            selected.sort_unstable();
            expected.sort_unstable();
            selected == expected
        }
        _ => match answer {
            UserAnswer::Text(choice) => correct_answers.iter().any(|c| c == choice),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn text(s: &str) -> UserAnswer {
        UserAnswer::Text(s.to_string())
    }

    fn choices(items: &[&str]) -> UserAnswer {
        UserAnswer::Choices(strings(items))
    }

    #[test]
    fn multi_select_ignores_submission_order() {
        let correct = strings(&["Red", "Blue", "Yellow"]);
        let permutations = [
            ["Red", "Blue", "Yellow"],
            ["Red", "Yellow", "Blue"],
            ["Blue", "Red", "Yellow"],
            ["Blue", "Yellow", "Red"],
            ["Yellow", "Red", "Blue"],
            ["Yellow", "Blue", "Red"],
        ];
        for submitted in permutations {
            assert!(is_correct(
                &QuestionType::MultiSelect,
                &correct,
                Some(&choices(&submitted))
            ));
        }
    }

    #[test]
    fn multi_select_rejects_missing_extra_and_duplicate() {
        let correct = strings(&["Red", "Blue", "Yellow"]);
        let kind = QuestionType::MultiSelect;

        assert!(!is_correct(&kind, &correct, Some(&choices(&["Red", "Blue"]))));
        assert!(!is_correct(
            &kind,
            &correct,
            Some(&choices(&["Red", "Blue", "Yellow", "Green"]))
        ));
        assert!(!is_correct(
            &kind,
            &correct,
            Some(&choices(&["Red", "Blue", "Yellow", "Yellow"]))
        ));
        assert!(!is_correct(
            &kind,
            &correct,
            Some(&choices(&["Red", "Blue", "Blue"]))
        ));
    }

    #[test]
    fn multi_select_wraps_a_single_string() {
        let kind = QuestionType::MultiSelect;
        assert!(is_correct(&kind, &strings(&["Mars"]), Some(&text("Mars"))));
        assert!(!is_correct(
            &kind,
            &strings(&["Mars", "Jupiter"]),
            Some(&text("Mars"))
        ));
    }

    #[test]
    fn multi_select_rejects_non_string_values() {
        let answer = UserAnswer::Other(serde_json::json!(["Mars", 3]));
        assert!(!is_correct(
            &QuestionType::MultiSelect,
            &strings(&["Mars"]),
            Some(&answer)
        ));
    }

    #[test]
    fn single_answer_uses_membership() {
        let correct = strings(&["Paris"]);
        assert!(is_correct(&QuestionType::SingleChoice, &correct, Some(&text("Paris"))));
        assert!(!is_correct(&QuestionType::SingleChoice, &correct, Some(&text("Lyon"))));
        assert!(!is_correct(&QuestionType::SingleChoice, &correct, Some(&text("paris"))));
    }

    #[test]
    fn single_answer_accepts_any_listed_literal() {
        let correct = strings(&["Paris", "Paris, France"]);
        assert!(is_correct(
            &QuestionType::SingleChoice,
            &correct,
            Some(&text("Paris, France"))
        ));
    }

    #[test]
    fn list_is_not_unwrapped_for_single_answer_types() {
        let correct = strings(&["True"]);
        assert!(!is_correct(&QuestionType::Boolean, &correct, Some(&choices(&["True"]))));
    }

    #[test]
    fn unknown_type_falls_back_to_membership() {
        let kind = QuestionType::Other("fill-in".to_string());
        assert!(is_correct(&kind, &strings(&["42"]), Some(&text("42"))));
        assert!(!is_correct(
            &kind,
            &strings(&["42"]),
            Some(&UserAnswer::Other(serde_json::json!(42)))
        ));
    }

    #[test]
    fn absent_answer_is_never_correct() {
        let correct = strings(&["True"]);
        for kind in [
            QuestionType::SingleChoice,
            QuestionType::Boolean,
            QuestionType::MultiSelect,
            QuestionType::Other("essay".to_string()),
        ] {
            assert!(!is_correct(&kind, &correct, None));
        }
    }
}
