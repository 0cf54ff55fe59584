use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_language() -> String {
    "English".to_string()
}

fn default_duration_minutes() -> i64 {
    10
}

fn default_marks_per_question() -> i64 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question_number: String, // Display label, e.g. "01"
    pub question_text: String,   // Rich text HTML
    pub options: Vec<String>,
    pub correct_option_index: i64, // Zero-based index into options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,

    pub category_key: String,
    pub subcategory_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>, // e.g. "January"
    #[serde(default = "default_language")]
    pub language: String,
    pub date: DateTime<Utc>,

    // The question count the admin typed. Display only; scoring always uses
    // questions.len().
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_info: Option<String>,

    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,

    // Quiz-wide weight. Per-question marks are deliberately not supported.
    #[serde(default = "default_marks_per_question")]
    pub marks_per_question: i64,

    // questions.len() * marks_per_question, fixed at creation time
    #[serde(default)]
    pub total_marks: i64,

    pub questions: Vec<QuizQuestion>,

    #[serde(default)]
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(
        title: &str,
        category_key: &str,
        subcategory_id: &str,
        marks_per_question: i64,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        let total_marks = questions.len() as i64 * marks_per_question;

        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            category_key: category_key.to_string(),
            subcategory_id: subcategory_id.to_string(),
            month: None,
            language: default_language(),
            date: Utc::now(),
            total_questions_count: None,
            description: None,
            participation_info: None,
            duration_minutes: default_duration_minutes(),
            marks_per_question,
            total_marks,
            questions,
            is_paid: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: i64) -> QuizQuestion {
        QuizQuestion {
            question_number: "01".to_string(),
            question_text: "Which option is correct?".to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_option_index: correct,
            explanation: None,
        }
    }

    #[test]
    fn test_new_quiz_computes_total_marks() {
        let quiz = Quiz::new("Daily GK", "upsc", "upsc_ias", 2, vec![question(0), question(1)]);

        assert_eq!(quiz.total_marks, 4);
        assert_eq!(quiz.marks_per_question, 2);
        assert_eq!(quiz.language, "English");
    }

    #[test]
    fn test_quiz_deserializes_with_defaults() {
        let json = serde_json::json!({
            "id": "quiz-1",
            "title": "Daily GK",
            "category_key": "upsc",
            "subcategory_id": "upsc_ias",
            "date": Utc::now(),
            "questions": [],
            "created_at": Utc::now(),
        });

        let quiz: Quiz = serde_json::from_value(json).unwrap();
        assert_eq!(quiz.marks_per_question, 1);
        assert_eq!(quiz.duration_minutes, 10);
        assert_eq!(quiz.language, "English");
        assert!(!quiz.is_paid);
    }
}
