use crate::models::domain::quiz::{Quiz, QuizQuestion};
use crate::models::domain::quiz_attempt::AnswerInput;

/// How a single submitted answer was judged. `Invalid` covers answers whose
/// question index points at nothing; externally it counts as wrong, never as
/// a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Invalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub score: i64,
    pub max_score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub percentage: i64,
}

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Grade a submission. Pure function of the quiz and the answers: no
    /// store access, no clock, so repeated calls give identical results.
    ///
    /// The live question list is the only ground truth. Weights come from the
    /// quiz-wide marks_per_question; max score is recomputed here rather than
    /// read from the stored total_marks.
    pub fn grade(quiz: &Quiz, answers: &[AnswerInput]) -> ScoreBreakdown {
        // Unset (0) means the default weight of 1
        let points_per_question = if quiz.marks_per_question == 0 {
            1
        } else {
            quiz.marks_per_question
        };
        let total_questions = quiz.questions.len() as i64;
        let max_score = total_questions * points_per_question;

        let mut score = 0;
        let mut correct_answers = 0;
        let mut wrong_answers = 0;

        for answer in answers {
            match Self::judge(&quiz.questions, answer) {
                AnswerOutcome::Correct => {
                    score += points_per_question;
                    correct_answers += 1;
                }
                AnswerOutcome::Wrong | AnswerOutcome::Invalid => {
                    wrong_answers += 1;
                }
            }
        }

        ScoreBreakdown {
            score,
            max_score,
            total_questions,
            correct_answers,
            wrong_answers,
            percentage: Self::percentage(score, max_score),
        }
    }

    fn judge(questions: &[QuizQuestion], answer: &AnswerInput) -> AnswerOutcome {
        let Ok(index) = usize::try_from(answer.question_index) else {
            return AnswerOutcome::Invalid;
        };

        match questions.get(index) {
            None => AnswerOutcome::Invalid,
            Some(question) if question.correct_option_index == answer.selected_option => {
                AnswerOutcome::Correct
            }
            Some(_) => AnswerOutcome::Wrong,
        }
    }

    /// Integer percentage; an empty quiz scores 0 rather than dividing by zero.
    pub fn percentage(score: i64, max_score: i64) -> i64 {
        if max_score > 0 {
            (score as f64 / max_score as f64 * 100.0).round() as i64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: i64) -> QuizQuestion {
        QuizQuestion {
            question_number: "01".to_string(),
            question_text: "Pick one".to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
            correct_option_index: correct,
            explanation: None,
        }
    }

    fn quiz(marks_per_question: i64, corrects: &[i64]) -> Quiz {
        Quiz::new(
            "Daily GK",
            "upsc",
            "upsc_ias",
            marks_per_question,
            corrects.iter().map(|&c| question(c)).collect(),
        )
    }

    fn answer(question_index: i64, selected_option: i64) -> AnswerInput {
        AnswerInput {
            question_index,
            selected_option,
        }
    }

    #[test]
    fn test_weighted_scoring_example() {
        // 4 questions at 2 marks each; 3 correct, 1 wrong => 6/8, 75%
        let quiz = quiz(2, &[0, 1, 2, 3]);
        let answers = vec![answer(0, 0), answer(1, 1), answer(2, 2), answer(3, 0)];

        let breakdown = QuizAttemptService::grade(&quiz, &answers);

        assert_eq!(breakdown.score, 6);
        assert_eq!(breakdown.max_score, 8);
        assert_eq!(breakdown.correct_answers, 3);
        assert_eq!(breakdown.wrong_answers, 1);
        assert_eq!(breakdown.percentage, 75);
    }

    #[test]
    fn test_grading_is_deterministic() {
        let quiz = quiz(1, &[0, 1, 2]);
        let answers = vec![answer(0, 0), answer(1, 0), answer(2, 2)];

        let first = QuizAttemptService::grade(&quiz, &answers);
        let second = QuizAttemptService::grade(&quiz, &answers);

        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_question_index_counts_as_wrong() {
        let quiz = quiz(1, &[0, 1, 2, 3, 0]);
        let answers = vec![answer(99, 0), answer(-1, 0), answer(0, 0)];

        let breakdown = QuizAttemptService::grade(&quiz, &answers);

        assert_eq!(breakdown.correct_answers, 1);
        assert_eq!(breakdown.wrong_answers, 2);
        assert_eq!(breakdown.score, 1);
    }

    #[test]
    fn test_correct_plus_wrong_equals_submitted_count() {
        let quiz = quiz(1, &[0, 1, 2, 3, 0]);
        // Fewer answers than questions is allowed
        let answers = vec![answer(0, 0), answer(1, 3)];

        let breakdown = QuizAttemptService::grade(&quiz, &answers);

        assert_eq!(
            breakdown.correct_answers + breakdown.wrong_answers,
            answers.len() as i64
        );
        assert_eq!(breakdown.total_questions, 5);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        let quiz = quiz(3, &[1, 1]);
        // Same question answered twice still accumulates; bounds hold for
        // well-formed one-answer-per-question submissions
        let answers = vec![answer(0, 1), answer(1, 1)];

        let breakdown = QuizAttemptService::grade(&quiz, &answers);

        assert!(breakdown.score >= 0);
        assert!(breakdown.score <= breakdown.max_score);
        assert_eq!(breakdown.score, 6);
        assert_eq!(breakdown.percentage, 100);
    }

    #[test]
    fn test_empty_quiz_has_zero_percentage() {
        let quiz = quiz(1, &[]);
        let breakdown = QuizAttemptService::grade(&quiz, &[answer(0, 0)]);

        assert_eq!(breakdown.max_score, 0);
        assert_eq!(breakdown.percentage, 0);
        assert_eq!(breakdown.wrong_answers, 1);
    }

    #[test]
    fn test_no_answers_scores_zero() {
        let quiz = quiz(2, &[0, 1]);
        let breakdown = QuizAttemptService::grade(&quiz, &[]);

        assert_eq!(breakdown.score, 0);
        assert_eq!(breakdown.correct_answers, 0);
        assert_eq!(breakdown.wrong_answers, 0);
        assert_eq!(breakdown.percentage, 0);
    }

    #[test]
    fn test_percentage_rounds_to_integer() {
        // 1 of 3 correct => 33.33...% -> 33
        assert_eq!(QuizAttemptService::percentage(1, 3), 33);
        // 2 of 3 => 66.67% -> 67
        assert_eq!(QuizAttemptService::percentage(2, 3), 67);
    }
}
