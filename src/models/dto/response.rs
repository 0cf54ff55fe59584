use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    article::Article,
    ebook::Ebook,
    quiz::{Quiz, QuizQuestion},
    user::{User, UserRole},
};

/* ----- Auth ----- */

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub gender: String,
    pub phone_number: String,
    pub dob: String,
    pub state: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            gender: user.gender,
            phone_number: user.phone_number,
            dob: user.dob,
            state: user.state,
            address: user.address,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserDto,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/* ----- Quiz ----- */

/// Question view handed to a quiz taker. Does not have the answer key or the
/// explanation fields at all, so they cannot leak.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedQuestion {
    pub question_number: String,
    pub question_text: String,
    pub options: Vec<String>,
}

impl From<QuizQuestion> for SanitizedQuestion {
    fn from(question: QuizQuestion) -> Self {
        SanitizedQuestion {
            question_number: question.question_number,
            question_text: question.question_text,
            options: question.options,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SanitizedQuiz {
    pub id: String,
    pub title: String,
    pub category_key: String,
    pub subcategory_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub language: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_info: Option<String>,
    pub duration_minutes: i64,
    pub marks_per_question: i64,
    pub total_marks: i64,
    pub questions: Vec<SanitizedQuestion>,
}

impl From<Quiz> for SanitizedQuiz {
    fn from(quiz: Quiz) -> Self {
        SanitizedQuiz {
            id: quiz.id,
            title: quiz.title,
            category_key: quiz.category_key,
            subcategory_id: quiz.subcategory_id,
            month: quiz.month,
            language: quiz.language,
            date: quiz.date,
            description: quiz.description,
            participation_info: quiz.participation_info,
            duration_minutes: quiz.duration_minutes,
            marks_per_question: quiz.marks_per_question,
            total_marks: quiz.total_marks,
            questions: quiz.questions.into_iter().map(SanitizedQuestion::from).collect(),
        }
    }
}

/// List card: everything except the heavy/answer-bearing fields.
#[derive(Debug, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub category_key: String,
    pub subcategory_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub language: String,
    pub date: DateTime<Utc>,
    pub duration_minutes: i64,
    pub marks_per_question: i64,
    pub total_marks: i64,
    pub is_paid: bool,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        QuizSummary {
            id: quiz.id,
            title: quiz.title,
            category_key: quiz.category_key,
            subcategory_id: quiz.subcategory_id,
            month: quiz.month,
            language: quiz.language,
            date: quiz.date,
            duration_minutes: quiz.duration_minutes,
            marks_per_question: quiz.marks_per_question,
            total_marks: quiz.total_marks,
            is_paid: quiz.is_paid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizMeta {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_info: Option<String>,
    pub duration_minutes: i64,
    pub total_marks: i64,
    pub total_questions: i64,
}

impl From<Quiz> for QuizMeta {
    fn from(quiz: Quiz) -> Self {
        QuizMeta {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            participation_info: quiz.participation_info,
            duration_minutes: quiz.duration_minutes,
            total_marks: quiz.total_marks,
            total_questions: quiz.questions.len() as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitQuizResponse {
    pub score: i64,
    pub max_score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub percentage: i64,
    pub rank: Option<i64>,
    pub total_participants: i64,
    pub is_guest: bool,
}

/* ----- Taxonomy ----- */

#[derive(Debug, Serialize)]
pub struct SubcategoryTile {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryWithSubs {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subcategories: Vec<SubcategoryTile>,
}

#[derive(Debug, Serialize)]
pub struct LandingTile {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryLanding {
    pub category: crate::models::domain::taxonomy::Category,
    pub tiles: Vec<LandingTile>,
}

/* ----- Current affairs ----- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthFacet {
    pub key: String,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub meta: ListMeta,
    pub articles: Vec<Article>,
    pub months: Vec<MonthFacet>,
}

#[derive(Debug, Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub body: String,
    pub content_url: String,
}

#[derive(Debug, Serialize)]
pub struct Breadcrumbs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecentPost {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetailResponse {
    pub article: ArticleView,
    pub breadcrumbs: Breadcrumbs,
    pub recent_posts: Vec<RecentPost>,
    pub months: Vec<MonthFacet>,
}

/* ----- E-books ----- */

#[derive(Debug, Serialize)]
pub struct EbookListItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub languages: Vec<String>,
    pub validity: String,
    pub is_paid: bool,
    pub pdf_url: String,
}

impl From<Ebook> for EbookListItem {
    fn from(ebook: Ebook) -> Self {
        EbookListItem {
            id: ebook.id,
            title: ebook.title,
            thumbnail: ebook.thumbnail,
            languages: ebook.languages,
            validity: ebook.validity,
            is_paid: ebook.is_paid,
            pdf_url: ebook.pdf_url,
        }
    }
}

/* ----- Previous papers ----- */

#[derive(Debug, Serialize)]
pub struct PaperSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub category_key: String,
    pub subcategory_id: String,
}

impl From<crate::models::domain::paper::PreviousPaper> for PaperSummary {
    fn from(paper: crate::models::domain::paper::PreviousPaper) -> Self {
        PaperSummary {
            id: paper.id,
            title: paper.title,
            logo: paper.logo,
            created_at: paper.created_at,
            month: paper.month,
            category_key: paper.category_key,
            subcategory_id: paper.subcategory_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PapersListResponse {
    pub papers: Vec<crate::models::domain::paper::PreviousPaper>,
    pub recent_papers: Vec<PaperSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_with_answers() -> Quiz {
        Quiz::new(
            "Daily GK",
            "upsc",
            "upsc_ias",
            1,
            vec![QuizQuestion {
                question_number: "01".to_string(),
                question_text: "Pick one".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                correct_option_index: 1,
                explanation: Some("B is right".to_string()),
            }],
        )
    }

    #[test]
    fn test_sanitized_quiz_strips_answer_key() {
        let sanitized = SanitizedQuiz::from(quiz_with_answers());
        let json = serde_json::to_string(&sanitized).unwrap();

        assert!(!json.contains("correct_option_index"));
        assert!(!json.contains("explanation"));
        assert!(json.contains("question_text"));
    }

    #[test]
    fn test_quiz_meta_counts_live_questions() {
        let mut quiz = quiz_with_answers();
        // A stale typed count must never win over the real question list
        quiz.total_questions_count = Some(50);

        let meta = QuizMeta::from(quiz);
        assert_eq!(meta.total_questions, 1);
    }

    #[test]
    fn test_user_dto_has_no_password_hash() {
        let user = User::test_user("jane@example.com");
        let dto = UserDto::from(user);
        let json = serde_json::to_string(&dto).unwrap();

        assert!(!json.contains("password"));
        assert!(json.contains("jane@example.com"));
    }

    #[test]
    fn test_month_facet_shape() {
        let facet = MonthFacet {
            key: "2025-02".to_string(),
            label: "February 2025".to_string(),
            count: 3,
        };
        let json = serde_json::to_value(&facet).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["label"], "February 2025");
    }
}
