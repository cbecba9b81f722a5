//! Multiple-choice quiz progression.
//!
//! A submission is scored immediately, then the session holds on the answered
//! question for [`FEEDBACK_DELAY`] so the presentation layer can show which
//! option was right. During that window further submissions are refused.
//! The move to the next question (or to the result) happens when the delay
//! elapses through [`TimeStep::advance`] or is skipped with
//! [`QuizSession::skip_delay`].

use std::time::Duration;

use crate::clock::{Deferred, TimeStep};
use crate::error::SessionError;
use crate::progress::Progress;
use crate::rewards::{Celebration, PointsSink};

pub const POINTS_PER_CORRECT: u32 = 10;
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);
/// Final scores strictly above this earn a large celebration.
pub const CELEBRATION_THRESHOLD: u32 = 10;
pub const MAX_TIER: u32 = 3;

/// A question with an opaque display payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Question<T> {
    pub payload: T,
    pub correct_answer: usize,
}

impl<T> Question<T> {
    pub fn new(payload: T, correct_answer: usize) -> Self {
        Self {
            payload,
            correct_answer,
        }
    }
}

/// What the learner picked for a question and whether it was right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub selected: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// The current question was already answered and is waiting to advance.
    Locked,
    /// The quiz is over.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub tier: u32,
    pub celebrate: bool,
}

/// Star tier for a final score: one star per correct answer, at most three.
pub fn reward_tier(score: u32) -> u32 {
    (score / POINTS_PER_CORRECT).min(MAX_TIER)
}

#[derive(Debug)]
pub struct QuizSession<T, P: PointsSink> {
    questions: Vec<Question<T>>,
    index: usize,
    score: u32,
    completed: bool,
    credited: bool,
    feedback: Vec<Option<Feedback>>,
    pending_advance: Deferred,
    celebrations: Vec<Celebration>,
    sink: P,
}

impl<T, P: PointsSink> QuizSession<T, P> {
    pub fn new(questions: Vec<Question<T>>, sink: P) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptySteps { kind: "quiz" });
        }
        let feedback = vec![None; questions.len()];
        Ok(Self {
            questions,
            index: 0,
            score: 0,
            completed: false,
            credited: false,
            feedback,
            pending_advance: Deferred::idle(),
            celebrations: Vec::new(),
            sink,
        })
    }

    pub fn submit(&mut self, selected: usize) -> SubmitOutcome {
        if self.completed {
            log::debug!("quiz submit ignored: already completed");
            return SubmitOutcome::Finished;
        }
        if self.pending_advance.is_pending() {
            log::debug!("quiz submit ignored: question {} locked", self.index);
            return SubmitOutcome::Locked;
        }

        let correct = selected == self.questions[self.index].correct_answer;
        self.feedback[self.index] = Some(Feedback { selected, correct });
        if correct {
            self.score += POINTS_PER_CORRECT;
            self.celebrations.push(Celebration::Small);
        }
        self.pending_advance = Deferred::new(FEEDBACK_DELAY);
        log::debug!(
            "quiz question {} answered with {} ({}), score {}",
            self.index,
            selected,
            if correct { "correct" } else { "incorrect" },
            self.score
        );

        if correct {
            SubmitOutcome::Correct
        } else {
            SubmitOutcome::Incorrect
        }
    }

    /// Performs the pending transition without waiting for the feedback delay.
    pub fn skip_delay(&mut self) {
        if self.pending_advance.fire_now() {
            self.finish_question();
        }
    }

    pub fn restart(&mut self) {
        self.pending_advance.cancel();
        self.index = 0;
        self.score = 0;
        self.completed = false;
        self.credited = false;
        self.feedback.iter_mut().for_each(|f| *f = None);
        self.celebrations.clear();
        log::debug!("quiz restarted");
    }

    fn finish_question(&mut self) {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
        } else {
            self.complete();
        }
    }

    fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.index = self.questions.len();

        let result = self.evaluate();
        if result.celebrate {
            self.celebrations.push(Celebration::Large);
        }
        if !self.credited {
            self.credited = true;
            self.sink.credit_points(self.score);
        }
        log::info!(
            "quiz completed with score {} (tier {})",
            result.score,
            result.tier
        );
    }

    fn evaluate(&self) -> QuizResult {
        QuizResult {
            score: self.score,
            tier: reward_tier(self.score),
            celebrate: self.score > CELEBRATION_THRESHOLD,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::from_index(self.index, self.questions.len())
    }

    /// Index of the current question, or `len()` once finished.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question<T>> {
        self.questions.get(self.index)
    }

    pub fn questions(&self) -> &[Question<T>] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn feedback(&self, index: usize) -> Option<Feedback> {
        self.feedback.get(index).copied().flatten()
    }

    /// Feedback for the question on screen, present while its answer is shown.
    pub fn current_feedback(&self) -> Option<Feedback> {
        self.feedback(self.index)
    }

    /// True while an answered question waits for its transition.
    pub fn is_locked(&self) -> bool {
        self.pending_advance.is_pending()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Final tier and celebration flag, once the quiz is over.
    pub fn result(&self) -> Option<QuizResult> {
        self.completed.then(|| self.evaluate())
    }

    pub fn drain_celebrations(&mut self) -> Vec<Celebration> {
        std::mem::take(&mut self.celebrations)
    }
}

impl<T, P: PointsSink> TimeStep for QuizSession<T, P> {
    fn advance(&mut self, elapsed: Duration) {
        if self.pending_advance.elapse(elapsed) {
            self.finish_question();
        }
    }
}
