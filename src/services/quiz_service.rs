use std::sync::Arc;

use crate::{
    auth::CallerIdentity,
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz::{Quiz, QuizQuestion},
            Category, QuizAttempt, Subcategory,
        },
        dto::{
            request::{
                CreateCategoryRequest, CreateQuizRequest, CreateSubcategoryRequest,
                SubmitQuizRequest, UpdateCategoryRequest, UpdateQuizRequest,
            },
            response::{QuizMeta, QuizSummary, SanitizedQuiz, SubmitQuizResponse},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository, TaxonomyRepository},
    services::quiz_attempt_service::QuizAttemptService,
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        taxonomy: Arc<dyn TaxonomyRepository>,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            taxonomy,
        }
    }

    async fn get_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))
    }

    /* ----- Catalogue ----- */

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.taxonomy.list_categories().await
    }

    pub async fn list_subcategories(&self, category_key: &str) -> AppResult<Vec<Subcategory>> {
        self.taxonomy.list_subcategories(category_key).await
    }

    pub async fn list_quizzes(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<Vec<QuizSummary>> {
        let quizzes = self
            .quizzes
            .list_by_subcategory(category_key, subcategory_id, month)
            .await?;
        Ok(quizzes.into_iter().map(QuizSummary::from).collect())
    }

    pub async fn quiz_meta(&self, quiz_id: &str) -> AppResult<QuizMeta> {
        let quiz = self.get_quiz(quiz_id).await?;
        Ok(QuizMeta::from(quiz))
    }

    /* ----- Taking a quiz ----- */

    /// The quiz with the answer key stripped. Safe for anonymous callers.
    pub async fn start_quiz(&self, quiz_id: &str) -> AppResult<SanitizedQuiz> {
        let quiz = self.get_quiz(quiz_id).await?;
        Ok(SanitizedQuiz::from(quiz))
    }

    /// Score a submission and, for signed-in callers, persist it and compute
    /// its rank among all attempts on the same quiz.
    ///
    /// Rank = attempts with a strictly better score, plus attempts with the
    /// same score and a strictly lower time, plus one. The counts run after
    /// our own insert, so concurrent submitters are counted when the store
    /// has already made them visible; strict comparisons keep the freshly
    /// inserted attempt from counting against itself. The reported rank is a
    /// snapshot taken now and is never revised as later attempts land.
    pub async fn submit_quiz(
        &self,
        quiz_id: &str,
        request: SubmitQuizRequest,
        identity: CallerIdentity,
    ) -> AppResult<SubmitQuizResponse> {
        let quiz = self.get_quiz(quiz_id).await?;

        let breakdown = QuizAttemptService::grade(&quiz, &request.answers);

        match identity {
            CallerIdentity::Guest => {
                // Scored but never persisted; participant count is informational
                let total_participants = self.attempts.count_for_quiz(quiz_id).await?;

                Ok(SubmitQuizResponse {
                    score: breakdown.score,
                    max_score: breakdown.max_score,
                    total_questions: breakdown.total_questions,
                    correct_answers: breakdown.correct_answers,
                    wrong_answers: breakdown.wrong_answers,
                    percentage: breakdown.percentage,
                    rank: None,
                    total_participants,
                    is_guest: true,
                })
            }
            CallerIdentity::Authenticated(user_id) => {
                let attempt = QuizAttempt::new(
                    &user_id,
                    quiz_id,
                    breakdown.score,
                    breakdown.total_questions,
                    breakdown.correct_answers,
                    breakdown.wrong_answers,
                    request.time_taken_seconds,
                    request.answers,
                );

                // Everything after the insert fails the whole call on error;
                // a response must never carry a rank we could not verify.
                self.attempts.insert(attempt).await?;

                let better_score = self
                    .attempts
                    .count_better_score(quiz_id, breakdown.score)
                    .await?;
                let same_score_faster = self
                    .attempts
                    .count_same_score_faster(quiz_id, breakdown.score, request.time_taken_seconds)
                    .await?;
                let total_participants = self.attempts.count_for_quiz(quiz_id).await?;

                Ok(SubmitQuizResponse {
                    score: breakdown.score,
                    max_score: breakdown.max_score,
                    total_questions: breakdown.total_questions,
                    correct_answers: breakdown.correct_answers,
                    wrong_answers: breakdown.wrong_answers,
                    percentage: breakdown.percentage,
                    rank: Some(better_score + same_score_faster + 1),
                    total_participants,
                    is_guest: false,
                })
            }
        }
    }

    /// Full quiz including answers and explanations. Handlers gate this
    /// behind authentication.
    pub async fn quiz_solutions(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.get_quiz(quiz_id).await
    }

    /* ----- Admin: taxonomy ----- */

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        if self.taxonomy.find_category(&request.id).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Category with id '{}' already exists",
                request.id
            )));
        }

        let category = Category::new(&request.id, &request.title, request.logo, request.description);
        self.taxonomy.create_category(category).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> AppResult<Category> {
        let mut category = self
            .taxonomy
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id '{}' not found", id)))?;

        if let Some(title) = request.title {
            category.title = title;
        }
        if let Some(logo) = request.logo {
            category.logo = Some(logo);
        }
        if let Some(description) = request.description {
            category.description = Some(description);
        }

        self.taxonomy.update_category(category).await
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.taxonomy.delete_category(id).await
    }

    pub async fn create_subcategory(
        &self,
        category_key: &str,
        request: CreateSubcategoryRequest,
    ) -> AppResult<Subcategory> {
        if self.taxonomy.find_category(category_key).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                category_key
            )));
        }

        let subcategory = Subcategory::new(
            &request.id,
            category_key,
            &request.title,
            request.logo,
            request.description,
        );
        self.taxonomy.create_subcategory(subcategory).await
    }

    pub async fn update_subcategory(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> AppResult<Subcategory> {
        let mut subcategory = self
            .taxonomy
            .find_subcategory(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subcategory with id '{}' not found", id)))?;

        if let Some(title) = request.title {
            subcategory.title = title;
        }
        if let Some(logo) = request.logo {
            subcategory.logo = Some(logo);
        }
        if let Some(description) = request.description {
            subcategory.description = Some(description);
        }

        self.taxonomy.update_subcategory(subcategory).await
    }

    pub async fn delete_subcategory(&self, id: &str) -> AppResult<()> {
        self.taxonomy.delete_subcategory(id).await
    }

    /* ----- Admin: quizzes ----- */

    pub async fn create_quiz(
        &self,
        category_key: &str,
        subcategory_id: &str,
        request: CreateQuizRequest,
    ) -> AppResult<Quiz> {
        if !self
            .taxonomy
            .subcategory_exists(subcategory_id, category_key)
            .await?
        {
            return Err(AppError::NotFound(
                "Invalid category/subcategory".to_string(),
            ));
        }

        let questions: Vec<QuizQuestion> = request
            .questions
            .into_iter()
            .map(|q| QuizQuestion {
                question_number: q.question_number,
                question_text: q.question_text,
                options: q.options,
                correct_option_index: q.correct_option_index,
                explanation: q.explanation,
            })
            .collect();

        // The typed question count is saved for display, but marks always
        // come from the real question list.
        let marks_per_question = request.marks_per_question.unwrap_or(1);
        let mut quiz = Quiz::new(
            &request.title,
            category_key,
            subcategory_id,
            marks_per_question,
            questions,
        );

        quiz.month = request.month;
        if let Some(language) = request.language {
            quiz.language = language;
        }
        if let Some(date) = request.date {
            quiz.date = date;
        }
        quiz.total_questions_count = request.total_questions_count;
        quiz.description = request.description;
        quiz.participation_info = request.participation_info;
        if let Some(duration) = request.duration_minutes {
            quiz.duration_minutes = duration;
        }
        if let Some(is_paid) = request.is_paid {
            quiz.is_paid = is_paid;
        }

        self.quizzes.create(quiz).await
    }

    pub async fn update_quiz(&self, id: &str, request: UpdateQuizRequest) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz(id).await?;

        if let Some(title) = request.title {
            quiz.title = title;
        }
        if let Some(month) = request.month {
            quiz.month = Some(month);
        }
        if let Some(language) = request.language {
            quiz.language = language;
        }
        if let Some(date) = request.date {
            quiz.date = date;
        }
        if let Some(count) = request.total_questions_count {
            quiz.total_questions_count = Some(count);
        }
        if let Some(description) = request.description {
            quiz.description = Some(description);
        }
        if let Some(info) = request.participation_info {
            quiz.participation_info = Some(info);
        }
        if let Some(duration) = request.duration_minutes {
            quiz.duration_minutes = duration;
        }
        if let Some(marks) = request.marks_per_question {
            quiz.marks_per_question = marks;
        }
        if let Some(is_paid) = request.is_paid {
            quiz.is_paid = is_paid;
        }
        if let Some(questions) = request.questions {
            quiz.questions = questions
                .into_iter()
                .map(|q| QuizQuestion {
                    question_number: q.question_number,
                    question_text: q.question_text,
                    options: q.options,
                    correct_option_index: q.correct_option_index,
                    explanation: q.explanation,
                })
                .collect();
        }

        self.quizzes.update(quiz).await
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        self.quizzes.delete(id).await
    }
}
