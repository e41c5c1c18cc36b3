use crate::quiz::Question;

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_answer: String,
}

/// One user's pass through a fixed sequence of questions.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Scores `chosen_index` against the current question and moves on by one.
    /// An index outside the options counts as a wrong answer.
    /// Returns `None` once the session is complete.
    pub fn submit_answer(&mut self, chosen_index: usize) -> Option<AnswerOutcome> {
        let question = self.questions.get(self.current_index)?;

        let is_correct = chosen_index == question.correct_idx();
        let outcome = AnswerOutcome {
            is_correct,
            correct_answer: question.correct_answer().to_string(),
        };

        if is_correct {
            self.score += 1;
        }
        self.current_index += 1;

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::tests::sample_bank;

    fn wrong_index(question: &Question) -> usize {
        (question.correct_idx() + 1) % 4
    }

    #[test]
    fn new_session_starts_at_the_first_question() {
        let bank = sample_bank(3);
        let session = Session::new(bank.clone());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_question(), Some(&bank[0]));
        assert!(!session.is_complete());
    }

    #[test]
    fn correct_answer_scores_and_advances_once() {
        let mut session = Session::new(sample_bank(3));
        let correct = session.current_question().unwrap().correct_idx();

        let outcome = session.submit_answer(correct).unwrap();
        assert!(outcome.is_correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn wrong_answer_advances_without_scoring() {
        let mut session = Session::new(sample_bank(3));
        let first = session.current_question().unwrap().clone();

        let outcome = session.submit_answer(wrong_index(&first)).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_answer, first.answers()[first.correct_idx()]);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn feedback_names_the_answered_question_not_the_next_one() {
        let mut session = Session::new(sample_bank(5));
        for _ in 0..5 {
            let active = session.current_question().unwrap().clone();
            let outcome = session.submit_answer(wrong_index(&active)).unwrap();
            assert_eq!(outcome.correct_answer, active.correct_answer());
        }
    }

    #[test]
    fn out_of_range_choice_counts_as_wrong() {
        let mut session = Session::new(sample_bank(2));
        let outcome = session.submit_answer(17).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn completes_after_exactly_k_answers() {
        let k = 7;
        let mut session = Session::new(sample_bank(k));
        for step in 0..k {
            assert!(!session.is_complete());
            let choice = if step % 2 == 0 {
                session.current_question().unwrap().correct_idx()
            } else {
                wrong_index(session.current_question().unwrap())
            };
            session.submit_answer(choice).unwrap();
        }

        assert!(session.is_complete());
        assert_eq!(session.current_question(), None);
        assert_eq!(session.current_index(), k);
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn answering_a_complete_session_changes_nothing() {
        let mut session = Session::new(sample_bank(1));
        session.submit_answer(0).unwrap();
        let (index, score) = (session.current_index(), session.score());

        assert_eq!(session.submit_answer(0), None);
        assert_eq!(session.submit_answer(3), None);
        assert_eq!(session.current_index(), index);
        assert_eq!(session.score(), score);
    }
}
