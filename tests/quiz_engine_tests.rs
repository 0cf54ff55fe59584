use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use prepdesk_server::{
    auth::CallerIdentity,
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz::{Quiz, QuizQuestion},
            quiz_attempt::AnswerInput,
            Category, QuizAttempt, Subcategory,
        },
        dto::request::SubmitQuizRequest,
    },
    repositories::{QuizAttemptRepository, QuizRepository, TaxonomyRepository},
    services::quiz_service::QuizService,
};

/* ----- In-memory store implementations behind the same traits ----- */

struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
        }
    }

    async fn put(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list_by_subcategory(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes
            .values()
            .filter(|q| q.category_key == category_key && q.subcategory_id == subcategory_id)
            .filter(|q| month.is_none() || q.month.as_deref() == month)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.put(quiz.clone()).await;
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if !quizzes.contains_key(&quiz.id) {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        quizzes
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }
}

/// Append-only attempt store with the strict-comparison count queries the
/// engine's rank formula relies on. `fail_counts` simulates a store whose
/// post-insert queries break.
struct InMemoryAttemptRepository {
    attempts: RwLock<Vec<QuizAttempt>>,
    fail_counts: bool,
}

impl InMemoryAttemptRepository {
    fn new() -> Self {
        Self {
            attempts: RwLock::new(Vec::new()),
            fail_counts: false,
        }
    }

    fn failing_counts() -> Self {
        Self {
            attempts: RwLock::new(Vec::new()),
            fail_counts: true,
        }
    }

    async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryAttemptRepository {
    async fn insert(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.attempts.write().await.push(attempt.clone());
        Ok(attempt)
    }

    async fn count_better_score(&self, quiz_id: &str, score: i64) -> AppResult<i64> {
        if self.fail_counts {
            return Err(AppError::DatabaseError("count query failed".to_string()));
        }
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.quiz_id == quiz_id && a.score > score)
            .count() as i64)
    }

    async fn count_same_score_faster(
        &self,
        quiz_id: &str,
        score: i64,
        time_taken_seconds: i64,
    ) -> AppResult<i64> {
        if self.fail_counts {
            return Err(AppError::DatabaseError("count query failed".to_string()));
        }
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| {
                a.quiz_id == quiz_id
                    && a.score == score
                    && a.time_taken_seconds < time_taken_seconds
            })
            .count() as i64)
    }

    async fn count_for_quiz(&self, quiz_id: &str) -> AppResult<i64> {
        if self.fail_counts {
            return Err(AppError::DatabaseError("count query failed".to_string()));
        }
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.quiz_id == quiz_id)
            .count() as i64)
    }
}

struct InMemoryTaxonomyRepository {
    categories: RwLock<HashMap<String, Category>>,
    subcategories: RwLock<HashMap<String, Subcategory>>,
}

impl InMemoryTaxonomyRepository {
    fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            subcategories: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TaxonomyRepository for InMemoryTaxonomyRepository {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let mut items: Vec<Category> = self.categories.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }

    async fn find_category(&self, id: &str) -> AppResult<Option<Category>> {
        Ok(self.categories.read().await.get(id).cloned())
    }

    async fn create_category(&self, category: Category) -> AppResult<Category> {
        self.categories
            .write()
            .await
            .insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> AppResult<Category> {
        self.categories
            .write()
            .await
            .insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.categories
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Category with id '{}' not found", id)))
    }

    async fn list_subcategories(&self, category_key: &str) -> AppResult<Vec<Subcategory>> {
        let mut items: Vec<Subcategory> = self
            .subcategories
            .read()
            .await
            .values()
            .filter(|s| s.category_key == category_key)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }

    async fn list_all_subcategories(&self) -> AppResult<Vec<Subcategory>> {
        let mut items: Vec<Subcategory> =
            self.subcategories.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }

    async fn find_subcategory(&self, id: &str) -> AppResult<Option<Subcategory>> {
        Ok(self.subcategories.read().await.get(id).cloned())
    }

    async fn subcategory_exists(&self, id: &str, category_key: &str) -> AppResult<bool> {
        Ok(self
            .subcategories
            .read()
            .await
            .get(id)
            .is_some_and(|s| s.category_key == category_key))
    }

    async fn create_subcategory(&self, subcategory: Subcategory) -> AppResult<Subcategory> {
        self.subcategories
            .write()
            .await
            .insert(subcategory.id.clone(), subcategory.clone());
        Ok(subcategory)
    }

    async fn update_subcategory(&self, subcategory: Subcategory) -> AppResult<Subcategory> {
        self.subcategories
            .write()
            .await
            .insert(subcategory.id.clone(), subcategory.clone());
        Ok(subcategory)
    }

    async fn delete_subcategory(&self, id: &str) -> AppResult<()> {
        self.subcategories
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Subcategory with id '{}' not found", id)))
    }
}

/* ----- Fixtures ----- */

fn question(correct: i64) -> QuizQuestion {
    QuizQuestion {
        question_number: "01".to_string(),
        question_text: "Pick the right option".to_string(),
        options: vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ],
        correct_option_index: correct,
        explanation: Some("Because it is".to_string()),
    }
}

fn quiz_with(marks_per_question: i64, corrects: &[i64]) -> Quiz {
    Quiz::new(
        "Weekly Current Affairs",
        "upsc",
        "upsc_ias",
        marks_per_question,
        corrects.iter().map(|&c| question(c)).collect(),
    )
}

fn answers(pairs: &[(i64, i64)]) -> Vec<AnswerInput> {
    pairs
        .iter()
        .map(|&(question_index, selected_option)| AnswerInput {
            question_index,
            selected_option,
        })
        .collect()
}

fn submit(pairs: &[(i64, i64)], time_taken_seconds: i64) -> SubmitQuizRequest {
    SubmitQuizRequest {
        answers: answers(pairs),
        time_taken_seconds,
    }
}

struct Harness {
    service: QuizService,
    attempts: Arc<InMemoryAttemptRepository>,
    quizzes: Arc<InMemoryQuizRepository>,
}

fn harness() -> Harness {
    harness_with_attempts(InMemoryAttemptRepository::new())
}

fn harness_with_attempts(attempts: InMemoryAttemptRepository) -> Harness {
    let quizzes = Arc::new(InMemoryQuizRepository::new());
    let attempts = Arc::new(attempts);
    let taxonomy = Arc::new(InMemoryTaxonomyRepository::new());

    Harness {
        service: QuizService::new(quizzes.clone(), attempts.clone(), taxonomy),
        attempts,
        quizzes,
    }
}

fn user(id: &str) -> CallerIdentity {
    CallerIdentity::Authenticated(id.to_string())
}

/* ----- startQuiz ----- */

#[actix_rt::test]
async fn start_quiz_strips_answers_and_explanations() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    let sanitized = h.service.start_quiz(&quiz_id).await.unwrap();
    let json = serde_json::to_string(&sanitized).unwrap();

    assert_eq!(sanitized.questions.len(), 3);
    assert!(!json.contains("correct_option_index"));
    assert!(!json.contains("explanation"));
}

#[actix_rt::test]
async fn start_quiz_unknown_id_is_not_found() {
    let h = harness();

    let err = h.service.start_quiz("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

/* ----- submitQuiz scoring ----- */

#[actix_rt::test]
async fn submit_scores_weighted_marks() {
    let h = harness();
    let quiz = quiz_with(2, &[0, 1, 2, 3]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    // 3 correct, 1 wrong on a 4-question quiz worth 2 marks each
    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0), (1, 1), (2, 2), (3, 1)], 60), user("u1"))
        .await
        .unwrap();

    assert_eq!(result.score, 6);
    assert_eq!(result.max_score, 8);
    assert_eq!(result.total_questions, 4);
    assert_eq!(result.correct_answers, 3);
    assert_eq!(result.wrong_answers, 1);
    assert_eq!(result.percentage, 75);
}

#[actix_rt::test]
async fn submit_absorbs_out_of_range_indices() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2, 3, 0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    // Index 99 on a 5-question quiz: counted wrong, not rejected
    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(99, 0), (0, 0)], 30), user("u1"))
        .await
        .unwrap();

    assert_eq!(result.correct_answers, 1);
    assert_eq!(result.wrong_answers, 1);
    assert_eq!(result.score, 1);
}

#[actix_rt::test]
async fn submit_unknown_quiz_is_not_found_and_persists_nothing() {
    let h = harness();

    let err = h
        .service
        .submit_quiz("missing", submit(&[(0, 0)], 10), user("u1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(h.attempts.len().await, 0);
}

#[actix_rt::test]
async fn submit_counts_partition_over_submitted_answers() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2, 3, 0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    // Fewer answers than questions
    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0), (1, 2)], 45), user("u1"))
        .await
        .unwrap();

    assert_eq!(result.correct_answers + result.wrong_answers, 2);
    assert_eq!(result.total_questions, 5);
    assert!(result.score >= 0 && result.score <= result.max_score);
}

#[actix_rt::test]
async fn scoring_uses_live_questions_not_typed_count() {
    let h = harness();
    let mut quiz = quiz_with(1, &[0, 1]);
    // Admin typed 50 questions; only 2 exist
    quiz.total_questions_count = Some(50);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0), (1, 1)], 20), user("u1"))
        .await
        .unwrap();

    assert_eq!(result.total_questions, 2);
    assert_eq!(result.max_score, 2);
    assert_eq!(result.percentage, 100);
}

/* ----- Guest path ----- */

#[actix_rt::test]
async fn guest_submission_is_scored_but_never_persisted() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0), (1, 1)], 30), CallerIdentity::Guest)
        .await
        .unwrap();

    assert!(result.is_guest);
    assert_eq!(result.rank, None);
    assert_eq!(result.score, 2);
    assert_eq!(h.attempts.len().await, 0);
}

#[actix_rt::test]
async fn guest_sees_current_participant_count() {
    let h = harness();
    let quiz = quiz_with(1, &[0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    h.service
        .submit_quiz(&quiz_id, submit(&[(0, 0)], 10), user("u1"))
        .await
        .unwrap();

    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0)], 10), CallerIdentity::Guest)
        .await
        .unwrap();

    assert_eq!(result.total_participants, 1);
    assert_eq!(h.attempts.len().await, 1);
}

/* ----- Ranking ----- */

#[actix_rt::test]
async fn first_submitter_ranks_first() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2, 3, 0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    let result = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0), (1, 1)], 100), user("u1"))
        .await
        .unwrap();

    assert_eq!(result.rank, Some(1));
    assert_eq!(result.total_participants, 1);
    assert!(!result.is_guest);
}

#[actix_rt::test]
async fn higher_score_outranks_earlier_lower_score() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2, 3, 0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    let low = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0), (1, 0)], 60), user("u1"))
        .await
        .unwrap();
    assert_eq!(low.score, 1);
    assert_eq!(low.rank, Some(1));

    let high = h
        .service
        .submit_quiz(
            &quiz_id,
            submit(&[(0, 0), (1, 1), (2, 2), (3, 3)], 90),
            user("u2"),
        )
        .await
        .unwrap();

    assert_eq!(high.score, 4);
    // One better-scoring attempt exists? No: ours is the best
    assert_eq!(high.rank, Some(1));
    assert_eq!(high.total_participants, 2);
}

#[actix_rt::test]
async fn equal_score_faster_time_wins_tie_break() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2, 3, 0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    // User X: 4 correct in 120s
    let x = h
        .service
        .submit_quiz(
            &quiz_id,
            submit(&[(0, 0), (1, 1), (2, 2), (3, 3)], 120),
            user("x"),
        )
        .await
        .unwrap();
    assert_eq!(x.score, 4);
    assert_eq!(x.rank, Some(1));

    // User Y submits later: same score, 90s
    let y = h
        .service
        .submit_quiz(
            &quiz_id,
            submit(&[(0, 0), (1, 1), (2, 2), (3, 3)], 90),
            user("y"),
        )
        .await
        .unwrap();

    assert_eq!(y.score, 4);
    assert_eq!(y.rank, Some(1));
    assert_eq!(y.total_participants, 2);

    // X's stored response still says rank 1: the rank is a snapshot taken at
    // submission time, never revised. A fresh computation for X's attempt
    // would now be 2.
    assert_eq!(x.rank, Some(1));
    let recomputed_for_x = h.attempts.count_better_score(&quiz_id, 4).await.unwrap()
        + h.attempts
            .count_same_score_faster(&quiz_id, 4, 120)
            .await
            .unwrap()
        + 1;
    assert_eq!(recomputed_for_x, 2);
}

#[actix_rt::test]
async fn rank_counts_both_better_scores_and_faster_ties() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1, 2, 3, 0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    // 5 correct in 100s
    h.service
        .submit_quiz(
            &quiz_id,
            submit(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 0)], 100),
            user("a"),
        )
        .await
        .unwrap();
    // 3 correct in 50s
    h.service
        .submit_quiz(
            &quiz_id,
            submit(&[(0, 0), (1, 1), (2, 2)], 50),
            user("b"),
        )
        .await
        .unwrap();

    // 3 correct in 80s: one better score, one same-score-faster
    let c = h
        .service
        .submit_quiz(
            &quiz_id,
            submit(&[(0, 0), (1, 1), (2, 2)], 80),
            user("c"),
        )
        .await
        .unwrap();

    assert_eq!(c.rank, Some(3));
    assert_eq!(c.total_participants, 3);
}

#[actix_rt::test]
async fn ranks_are_scoped_to_the_quiz() {
    let h = harness();
    let quiz_a = quiz_with(1, &[0]);
    let quiz_b = quiz_with(1, &[0]);
    let (id_a, id_b) = (quiz_a.id.clone(), quiz_b.id.clone());
    h.quizzes.put(quiz_a).await;
    h.quizzes.put(quiz_b).await;

    // A perfect, fast attempt on quiz A must not affect quiz B's ranking
    h.service
        .submit_quiz(&id_a, submit(&[(0, 0)], 5), user("a"))
        .await
        .unwrap();

    let b = h
        .service
        .submit_quiz(&id_b, submit(&[(0, 1)], 500), user("b"))
        .await
        .unwrap();

    assert_eq!(b.rank, Some(1));
    assert_eq!(b.total_participants, 1);
}

#[actix_rt::test]
async fn attempt_record_keeps_verbatim_responses() {
    let h = harness();
    let quiz = quiz_with(1, &[0, 1]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    h.service
        .submit_quiz(&quiz_id, submit(&[(1, 1), (99, 2)], 42), user("u1"))
        .await
        .unwrap();

    let stored = h.attempts.all().await;
    assert_eq!(stored.len(), 1);
    let attempt = &stored[0];
    assert_eq!(attempt.user_id, "u1");
    assert_eq!(attempt.quiz_id, quiz_id);
    assert_eq!(attempt.time_taken_seconds, 42);
    assert_eq!(
        attempt.user_responses,
        answers(&[(1, 1), (99, 2)])
    );
}

/* ----- Failure semantics ----- */

#[actix_rt::test]
async fn failed_rank_query_fails_the_whole_call() {
    let h = harness_with_attempts(InMemoryAttemptRepository::failing_counts());
    let quiz = quiz_with(1, &[0]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    // The insert succeeds, the count queries break: the engine must fail
    // closed rather than answer with a made-up rank.
    let err = h
        .service
        .submit_quiz(&quiz_id, submit(&[(0, 0)], 10), user("u1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DatabaseError(_)));
    assert_eq!(h.attempts.len().await, 1);
}

/* ----- Solutions ----- */

#[actix_rt::test]
async fn solutions_expose_the_full_answer_key() {
    let h = harness();
    let quiz = quiz_with(1, &[2]);
    let quiz_id = quiz.id.clone();
    h.quizzes.put(quiz).await;

    let solutions = h.service.quiz_solutions(&quiz_id).await.unwrap();

    assert_eq!(solutions.questions[0].correct_option_index, 2);
    assert!(solutions.questions[0].explanation.is_some());
}
