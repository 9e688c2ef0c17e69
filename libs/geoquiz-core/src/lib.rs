//! Core geography quiz engine shared by the app frontends.
//!
//! Provides:
//! - Location catalogs (federal states, neighboring countries, cities, rivers)
//! - Question generation (shuffled, per-mode sample sizes)
//! - The quiz session state machine with the capital follow-up flow
//! - Answer matching (diacritic-folding text compare, click proximity)
//! - Statistics aggregation and weak-area ranking
//! - Forgiving key-value persistence for settings and statistics

pub mod catalog;
pub mod error;
pub mod matching;
pub mod questions;
pub mod session;
pub mod statistics;
pub mod storage;
pub mod types;

pub use error::{Result, StorageError};
pub use matching::{compare_text, distance, is_near_point, normalize_text, CLICK_TOLERANCE};
pub use questions::generate_questions;
pub use session::SessionController;
pub use statistics::StatisticsTracker;
pub use storage::{FileStorage, MemoryStorage, Storage, SETTINGS_KEY, STATISTICS_KEY};
pub use types::{
    Answer, AnswerTarget, AnsweredRegions, GameMode, GameSession, GameState, Location,
    ModeStatistics, Point, Question, Settings, Statistics, WeakArea,
};
