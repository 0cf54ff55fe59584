use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One submitted answer, kept verbatim for audit/replay. Both indices come
/// from the client and may be out of range; scoring absorbs that as a wrong
/// answer instead of rejecting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerInput {
    pub question_index: i64,
    pub selected_option: i64,
}

/// A scored submission. Append-only: the engine never mutates or deletes one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,

    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,

    // Caller-supplied, trusted as-is; ranking tie-breaker only
    pub time_taken_seconds: i64,

    pub user_responses: Vec<AnswerInput>,

    pub created_at: DateTime<Utc>,
}

impl QuizAttempt {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: &str,
        quiz_id: &str,
        score: i64,
        total_questions: i64,
        correct_answers: i64,
        wrong_answers: i64,
        time_taken_seconds: i64,
        user_responses: Vec<AnswerInput>,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            total_questions,
            correct_answers,
            wrong_answers,
            time_taken_seconds,
            user_responses,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_round_trip_preserves_responses() {
        let attempt = QuizAttempt::new(
            "user-1",
            "quiz-1",
            6,
            4,
            3,
            1,
            120,
            vec![
                AnswerInput { question_index: 0, selected_option: 2 },
                AnswerInput { question_index: 99, selected_option: 0 },
            ],
        );

        let json = serde_json::to_string(&attempt).expect("attempt should serialize");
        let parsed: QuizAttempt = serde_json::from_str(&json).expect("attempt should deserialize");

        assert_eq!(parsed.score, 6);
        assert_eq!(parsed.time_taken_seconds, 120);
        assert_eq!(parsed.user_responses.len(), 2);
        assert_eq!(parsed.user_responses[1].question_index, 99);
    }
}
