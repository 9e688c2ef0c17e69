//! Core types for the geography quiz engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Quiz variant selecting which catalogs feed a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Federal states and neighboring countries, with capital follow-ups.
    Regions,
    /// Cities and rivers, location-only.
    Places,
}

impl GameMode {
    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Places => "places",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "regions" => Some(Self::Regions),
            "places" => Some(Self::Places),
            _ => None,
        }
    }

    /// Number of questions sampled from the catalogs per session.
    pub fn questions_per_session(&self) -> usize {
        match self {
            Self::Regions => 10,
            Self::Places => 15,
        }
    }

    /// Whether a correct location answer is followed by a capital prompt.
    pub fn asks_capital(&self) -> bool {
        matches!(self, Self::Regions)
    }
}

/// A point in the map's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What counts as hitting a location on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerTarget {
    /// Clickable map region(s). Rivers may span several paths.
    Region { region_keys: Vec<String> },
    /// A marker position checked by click proximity.
    Point { region_key: String, coordinates: Point },
}

/// A quizzable location from one of the fixed catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    pub target: AnswerTarget,
}

impl Location {
    /// All map region keys belonging to this location.
    pub fn region_keys(&self) -> &[String] {
        match &self.target {
            AnswerTarget::Region { region_keys } => region_keys,
            AnswerTarget::Point { region_key, .. } => std::slice::from_ref(region_key),
        }
    }
}

/// A single quiz question. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub location: Location,
    pub mode: GameMode,
}

/// Recorded outcome for one question.
///
/// Created with the location fields set; the capital fields are attached
/// later via [`GameSession::attach_capital_result`] if the question had a
/// capital follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question: Question,
    pub location_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_click: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_capital_text: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Answer {
    /// Correct answer events contributed by this answer (0, 1 or 2: one for
    /// the location click, one for the capital if it was asked and right).
    pub fn correct_events(&self) -> u32 {
        u32::from(self.location_correct) + u32::from(self.capital_correct == Some(true))
    }

    /// Total answer events (location click plus capital prompt if asked).
    pub fn total_events(&self) -> u32 {
        1 + u32::from(self.capital_correct.is_some())
    }
}

/// One played (or in-progress) quiz run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub mode: GameMode,
    pub score: u32,
    pub total_questions: usize,
    pub answers: Vec<Answer>,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new(mode: GameMode, total_questions: usize, start_time: DateTime<Utc>) -> Self {
        Self {
            mode,
            score: 0,
            total_questions,
            answers: Vec::new(),
            start_time,
            end_time: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }

    /// Attach the capital result to the answer at `index`.
    pub fn attach_capital_result(&mut self, index: usize, correct: bool, user_text: &str) {
        if let Some(answer) = self.answers.get_mut(index) {
            answer.capital_correct = Some(correct);
            answer.user_capital_text = Some(user_text.to_string());
        }
    }
}

/// Region keys answered so far in the current session, for map highlighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnsweredRegions {
    pub correct: Vec<String>,
    pub incorrect: Vec<String>,
}

/// Live state of one quiz session, owned by a
/// [`SessionController`](crate::session::SessionController).
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub current_mode: Option<GameMode>,
    pub current_session: Option<GameSession>,
    pub current_question: Option<Question>,
    pub question_queue: VecDeque<Question>,
    pub awaiting_capital_input: bool,
    pub last_answer_correct: Option<bool>,
    pub correct_location: Option<Location>,
    pub answered_regions: AnsweredRegions,
}

/// Historical rollup for one game mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeStatistics {
    pub sessions_played: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub success_rate: f64,
    pub best_score: u32,
}

impl ModeStatistics {
    // Capital follow-ups can push correct answers past the question count,
    // so the rate may legitimately exceed 100.
    fn is_valid(&self) -> bool {
        self.success_rate.is_finite() && self.success_rate >= 0.0
    }
}

/// A location with a below-100% success rate in the last recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakArea {
    pub location_id: String,
    pub location_name: String,
    pub success_rate: f64,
}

/// Aggregated historical performance, persisted as an opaque blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_sessions: u32,
    pub by_mode: BTreeMap<GameMode, ModeStatistics>,
    pub weak_areas: Vec<WeakArea>,
}

impl Default for Statistics {
    fn default() -> Self {
        let mut by_mode = BTreeMap::new();
        by_mode.insert(GameMode::Regions, ModeStatistics::default());
        by_mode.insert(GameMode::Places, ModeStatistics::default());
        Self {
            total_sessions: 0,
            by_mode,
            weak_areas: Vec::new(),
        }
    }
}

impl Statistics {
    /// Range checks for data loaded from persistence. Shape errors are
    /// already caught by deserialization; this guards the numeric invariants.
    pub fn is_valid(&self) -> bool {
        self.by_mode.values().all(ModeStatistics::is_valid)
            && self.weak_areas.iter().all(|area| {
                area.success_rate.is_finite() && (0.0..=100.0).contains(&area.success_rate)
            })
    }
}

/// User-facing quiz settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub timer_enabled: bool,
    pub timer_duration_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            timer_duration_secs: 30,
        }
    }
}

impl Settings {
    /// Range checks for data loaded from persistence.
    pub fn is_valid(&self) -> bool {
        self.timer_duration_secs > 0 && self.timer_duration_secs <= 300
    }
}
