//! Question sequence generation: catalog selection, shuffle, sampling.

use crate::catalog;
use crate::types::{GameMode, Location, Question};
use rand::seq::SliceRandom;

/// All catalog locations that feed the given mode.
pub fn locations_for_mode(mode: GameMode) -> Vec<Location> {
    let (a, b) = match mode {
        GameMode::Regions => (catalog::federal_states(), catalog::neighboring_countries()),
        GameMode::Places => (catalog::cities(), catalog::rivers()),
    };
    a.iter().chain(b).cloned().collect()
}

/// Build a freshly shuffled question sequence for `mode`, truncated to the
/// mode's sample size. Each call draws a new random order; an empty pool
/// yields an empty sequence.
pub fn generate_questions(mode: GameMode) -> Vec<Question> {
    sample_questions(mode, locations_for_mode(mode))
}

fn sample_questions(mode: GameMode, mut locations: Vec<Location>) -> Vec<Question> {
    locations.shuffle(&mut rand::thread_rng());
    locations.truncate(mode.questions_per_session());
    locations
        .into_iter()
        .map(|location| Question { location, mode })
        .collect()
}
