use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::quiz_attempt::AnswerInput;

/* ----- Auth ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    // Strength rules are checked in the service, not here
    #[validate(length(min = 1))]
    pub password: String,

    // Whitelisted in the service; anything unknown becomes "user"
    pub role: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub gender: String,

    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,

    #[validate(length(min = 1, max = 20))]
    pub dob: String,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(length(min = 1, max = 300))]
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,

    #[validate(length(min = 1))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,

    #[validate(length(min = 1))]
    pub new_password: String,
}

/* ----- Quiz ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    pub answers: Vec<AnswerInput>,

    #[validate(range(min = 0))]
    pub time_taken_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestionInput {
    pub question_number: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: i64,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    pub month: Option<String>,
    pub language: Option<String>,
    pub date: Option<DateTime<Utc>>,

    // The "No.of.ques" the admin typed; display only
    pub total_questions_count: Option<i64>,

    pub description: Option<String>,
    pub participation_info: Option<String>,

    pub duration_minutes: Option<i64>,

    #[validate(range(min = 1))]
    pub marks_per_question: Option<i64>,

    pub is_paid: Option<bool>,

    pub questions: Vec<QuizQuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    pub month: Option<String>,
    pub language: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub total_questions_count: Option<i64>,
    pub description: Option<String>,
    pub participation_info: Option<String>,
    pub duration_minutes: Option<i64>,

    #[validate(range(min = 1))]
    pub marks_per_question: Option<i64>,

    pub is_paid: Option<bool>,
    pub questions: Option<Vec<QuizQuestionInput>>,
}

/* ----- Taxonomy ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub logo: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub logo: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubcategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub logo: Option<String>,
    pub description: Option<String>,
}

/* ----- Current affairs ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    pub excerpt: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub month: Option<String>,
    pub scope: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,

    // Stored in the detail collection, not on the listing record
    pub body: Option<String>,
    pub content_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    pub excerpt: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub month: Option<String>,
    pub scope: Option<String>,
    pub image: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub content_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleListQuery {
    pub q: Option<String>,
    pub month: Option<String>,
    pub lang: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ArticleListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(5, 200)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/* ----- E-books ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEbookRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    pub thumbnail: Option<String>,

    #[validate(url)]
    pub pdf_url: String,

    pub description: Option<String>,
    pub languages: Option<Vec<String>>,
    pub validity: Option<String>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEbookRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    pub thumbnail: Option<String>,

    #[validate(url)]
    pub pdf_url: Option<String>,

    pub description: Option<String>,
    pub languages: Option<Vec<String>>,
    pub validity: Option<String>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EbookListQuery {
    pub lang: Option<String>,
    pub q: Option<String>,
}

/* ----- Previous papers ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePaperRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(url)]
    pub pdf_url: String,

    pub logo: Option<String>,
    pub month: Option<String>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePaperRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    #[validate(url)]
    pub pdf_url: Option<String>,

    pub logo: Option<String>,
    pub month: Option<String>,
    pub is_paid: Option<bool>,
}

/* ----- Pages & media ----- */

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertPageRequest {
    #[validate(length(min = 1, max = 100))]
    pub slug: String,

    pub language: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub title: String,

    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMediaRequest {
    #[validate(url)]
    pub url: String,

    pub filename: Option<String>,
    pub kind: Option<String>, // image | pdf | video | other
    pub size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "Str0ng!pass".to_string(),
            role: None,
            gender: "female".to_string(),
            phone_number: "9999999999".to_string(),
            dob: "1990-01-01".to_string(),
            state: "Telangana".to_string(),
            address: "1 Main Road".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_time_taken_rejected() {
        let request = SubmitQuizRequest {
            answers: vec![],
            time_taken_seconds: -5,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_marks_per_question_must_be_positive() {
        let request = CreateQuizRequest {
            title: "Daily GK".to_string(),
            month: None,
            language: None,
            date: None,
            total_questions_count: None,
            description: None,
            participation_info: None,
            duration_minutes: None,
            marks_per_question: Some(0),
            is_paid: None,
            questions: vec![],
        };
        assert!(request.validate().is_err());
    }
}
