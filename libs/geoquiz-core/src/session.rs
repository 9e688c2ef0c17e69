//! Quiz session state machine.
//!
//! One [`SessionController`] owns the live [`GameState`] for one player.
//! Controllers are plain instances, so tests and embedders can run several
//! independent sessions side by side.

use crate::matching;
use crate::questions;
use crate::types::{
    Answer, AnswerTarget, GameMode, GameSession, GameState, Point, Question,
};
use chrono::Utc;

/// Drives one quiz session: question queue, scoring, the capital follow-up
/// flow and per-region answer tracking.
///
/// Invalid calls (submitting with no active question, answering a capital
/// that was never asked) are no-ops rather than errors, so a racing UI can
/// never corrupt the session.
#[derive(Debug, Default)]
pub struct SessionController {
    state: GameState,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot of the live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current score, 0 when no session is running.
    pub fn score(&self) -> u32 {
        self.state
            .current_session
            .as_ref()
            .map_or(0, |session| session.score)
    }

    /// Whether a session is running with a question still open.
    pub fn is_session_active(&self) -> bool {
        self.state.current_session.is_some() && self.state.current_question.is_some()
    }

    /// Start a fresh session for `mode`, discarding any in-progress one.
    pub fn start_new_session(&mut self, mode: GameMode) {
        self.start_session_with(mode, questions::generate_questions(mode));
    }

    /// Start a session with an explicit question sequence. A generator can
    /// legitimately produce no questions (empty catalog); that case leaves
    /// the controller idle instead of opening an unanswerable session.
    pub fn start_session_with(&mut self, mode: GameMode, questions: Vec<Question>) {
        let mut queue: std::collections::VecDeque<Question> = questions.into();
        let Some(first) = queue.pop_front() else {
            tracing::warn!(mode = mode.as_str(), "no questions available, session not started");
            return;
        };
        self.state = GameState {
            current_mode: Some(mode),
            current_session: Some(GameSession::new(mode, queue.len() + 1, Utc::now())),
            current_question: Some(first),
            question_queue: queue,
            ..GameState::default()
        };
    }

    /// Evaluate a map answer for the current question.
    ///
    /// Point targets (cities) are judged by click proximity and ignore the
    /// region key; region targets are judged by key membership. On a correct
    /// answer in a capital-asking mode the queue holds while the capital
    /// prompt is open.
    pub fn submit_location_answer(
        &mut self,
        clicked_region_key: Option<&str>,
        click_point: Option<Point>,
    ) {
        if self.state.awaiting_capital_input {
            return;
        }
        let Some(question) = self.state.current_question.clone() else {
            return;
        };
        if self.state.current_session.is_none() {
            return;
        }

        let correct = match &question.location.target {
            AnswerTarget::Point { coordinates, .. } => click_point
                .is_some_and(|p| matching::is_near_point(p, *coordinates, matching::CLICK_TOLERANCE)),
            AnswerTarget::Region { region_keys } => {
                clicked_region_key.is_some_and(|key| region_keys.iter().any(|k| k == key))
            }
        };

        // Highlight bookkeeping covers every key the location owns, so a
        // multi-path river lights up as a whole.
        let bucket = if correct {
            &mut self.state.answered_regions.correct
        } else {
            &mut self.state.answered_regions.incorrect
        };
        for key in question.location.region_keys() {
            if !bucket.contains(key) {
                bucket.push(key.clone());
            }
        }

        let needs_capital =
            correct && question.mode.asks_capital() && question.location.capital.is_some();

        let Some(session) = self.state.current_session.as_mut() else {
            return;
        };
        session.answers.push(Answer {
            question: question.clone(),
            location_correct: correct,
            capital_correct: None,
            user_click: click_point,
            user_capital_text: None,
            timestamp: Utc::now(),
        });
        if correct {
            session.score += 1;
        }

        self.state.last_answer_correct = Some(correct);
        self.state.correct_location = Some(question.location);

        if needs_capital {
            self.state.awaiting_capital_input = true;
        } else {
            self.advance_queue();
        }
    }

    /// Evaluate the capital follow-up for the current question. No-op unless
    /// a capital prompt is actually open.
    pub fn submit_capital_answer(&mut self, text: &str) {
        if !self.state.awaiting_capital_input {
            return;
        }
        let Some(question) = self.state.current_question.as_ref() else {
            return;
        };
        let Some(capital) = question.location.capital.clone() else {
            return;
        };
        let correct = matching::compare_text(text, &capital);

        let Some(session) = self.state.current_session.as_mut() else {
            return;
        };
        let last_index = session.answers.len().saturating_sub(1);
        session.attach_capital_result(last_index, correct, text);
        if correct {
            session.score += 1;
        }

        self.state.awaiting_capital_input = false;
        self.state.last_answer_correct = Some(correct);
        self.advance_queue();
    }

    /// End the current session early, stamping its end time. Live fields are
    /// reset but the ended session stays readable for recording.
    pub fn end_session(&mut self) {
        let Some(mut session) = self.state.current_session.take() else {
            return;
        };
        if session.end_time.is_none() {
            session.end_time = Some(Utc::now());
        }
        self.state = GameState {
            current_session: Some(session),
            ..GameState::default()
        };
    }

    /// Unconditional reset to the idle state, discarding everything.
    pub fn clear_session(&mut self) {
        self.state = GameState::default();
    }

    /// Hand off the finished session by value, leaving the controller idle
    /// for that slot. Returns `None` while a session is still in progress.
    pub fn take_completed_session(&mut self) -> Option<GameSession> {
        if self
            .state
            .current_session
            .as_ref()
            .is_some_and(GameSession::is_complete)
        {
            self.state.current_session.take()
        } else {
            None
        }
    }

    /// Pop the next question, or complete the session when the queue is
    /// empty. Last-answer feedback is left in place across the advance.
    fn advance_queue(&mut self) {
        match self.state.question_queue.pop_front() {
            Some(next) => self.state.current_question = Some(next),
            None => {
                self.state.current_question = None;
                if let Some(session) = self.state.current_session.as_mut() {
                    session.end_time = Some(Utc::now());
                }
            }
        }
    }
}
