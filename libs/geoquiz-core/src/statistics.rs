//! Historical performance aggregation.

use crate::types::{GameSession, Statistics, WeakArea};

/// Owns the aggregated [`Statistics`] and folds completed sessions into them.
///
/// Each `record_session` call represents exactly one completed session;
/// recording the same session twice double-counts by design.
#[derive(Debug, Default)]
pub struct StatisticsTracker {
    stats: Statistics,
}

impl StatisticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously persisted statistics.
    pub fn from_saved(stats: Statistics) -> Self {
        Self { stats }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Fold one completed session into the rollups.
    pub fn record_session(&mut self, session: &GameSession) {
        let correct: u32 = session.answers.iter().map(|a| a.correct_events()).sum();

        let entry = self.stats.by_mode.entry(session.mode).or_default();
        entry.sessions_played += 1;
        entry.total_questions += session.total_questions as u32;
        entry.correct_answers += correct;
        entry.success_rate = if entry.total_questions > 0 {
            f64::from(entry.correct_answers) / f64::from(entry.total_questions) * 100.0
        } else {
            0.0
        };
        entry.best_score = entry.best_score.max(session.score);

        self.stats.total_sessions += 1;
        // Weak areas rank only the incoming session's locations; cheap, and
        // always reflects the most recent run.
        self.stats.weak_areas = weak_areas(session);
    }

    /// Back to first-run defaults.
    pub fn reset(&mut self) {
        self.stats = Statistics::default();
    }
}

/// Per-location success rates for one session, worst first, 100% filtered
/// out, capped at ten entries.
fn weak_areas(session: &GameSession) -> Vec<WeakArea> {
    struct Tally {
        id: String,
        name: String,
        correct: u32,
        total: u32,
    }

    let mut tallies: Vec<Tally> = Vec::new();
    for answer in &session.answers {
        let location = &answer.question.location;
        let index = match tallies.iter().position(|t| t.id == location.id) {
            Some(index) => index,
            None => {
                tallies.push(Tally {
                    id: location.id.clone(),
                    name: location.name.clone(),
                    correct: 0,
                    total: 0,
                });
                tallies.len() - 1
            }
        };
        let tally = &mut tallies[index];
        tally.correct += answer.correct_events();
        tally.total += answer.total_events();
    }

    let mut areas: Vec<WeakArea> = tallies
        .into_iter()
        .map(|t| WeakArea {
            location_id: t.id,
            location_name: t.name,
            success_rate: if t.total > 0 {
                f64::from(t.correct) / f64::from(t.total) * 100.0
            } else {
                0.0
            },
        })
        .filter(|area| area.success_rate < 100.0)
        .collect();
    areas.sort_by(|a, b| a.success_rate.total_cmp(&b.success_rate));
    areas.truncate(10);
    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Answer, AnswerTarget, GameMode, Location, Question};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn answer(id: &str, location_correct: bool, capital_correct: Option<bool>) -> Answer {
        Answer {
            question: Question {
                location: Location {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                    capital: capital_correct.map(|_| "Hauptstadt".to_string()),
                    target: AnswerTarget::Region {
                        region_keys: vec![format!("DE-{}", id.to_uppercase())],
                    },
                },
                mode: GameMode::Regions,
            },
            location_correct,
            capital_correct,
            user_click: None,
            user_capital_text: None,
            timestamp: Utc::now(),
        }
    }

    fn session(score: u32, answers: Vec<Answer>) -> GameSession {
        let mut session = GameSession::new(GameMode::Regions, answers.len(), Utc::now());
        session.score = score;
        session.answers = answers;
        session.end_time = Some(Utc::now());
        session
    }

    #[test]
    fn records_mode_rollups() {
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(
            3,
            vec![
                answer("by", true, Some(true)),
                answer("he", true, None),
                answer("sn", false, None),
            ],
        ));

        let stats = tracker.statistics();
        assert_eq!(stats.total_sessions, 1);
        let regions = &stats.by_mode[&GameMode::Regions];
        assert_eq!(regions.sessions_played, 1);
        assert_eq!(regions.total_questions, 3);
        assert_eq!(regions.correct_answers, 3);
        assert_eq!(regions.success_rate, 100.0);
        assert_eq!(regions.best_score, 3);
    }

    #[test]
    fn best_score_tracks_the_maximum_over_sessions() {
        let mut tracker = StatisticsTracker::new();
        for score in [2, 5, 3] {
            tracker.record_session(&session(score, vec![answer("by", true, None)]));
        }

        let stats = tracker.statistics();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.by_mode[&GameMode::Regions].best_score, 5);
        assert_eq!(stats.by_mode[&GameMode::Regions].sessions_played, 3);
    }

    #[test]
    fn success_rate_survives_empty_sessions() {
        let mut tracker = StatisticsTracker::new();
        let mut empty = GameSession::new(GameMode::Places, 0, Utc::now());
        empty.end_time = Some(Utc::now());
        tracker.record_session(&empty);

        let places = &tracker.statistics().by_mode[&GameMode::Places];
        assert_eq!(places.total_questions, 0);
        assert_eq!(places.success_rate, 0.0);
    }

    #[test]
    fn weak_areas_exclude_perfect_locations() {
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(
            3,
            vec![
                answer("by", true, Some(true)), // perfect, filtered out
                answer("he", true, Some(false)), // 50%
                answer("sn", false, None),       // 0%
            ],
        ));

        let weak = &tracker.statistics().weak_areas;
        assert_eq!(weak.len(), 2);
        assert_eq!(weak[0].location_id, "sn");
        assert_eq!(weak[0].success_rate, 0.0);
        assert_eq!(weak[1].location_id, "he");
        assert_eq!(weak[1].success_rate, 50.0);
    }

    #[test]
    fn weak_areas_are_capped_at_ten() {
        let answers = (0..14)
            .map(|i| answer(&format!("l{i}"), false, None))
            .collect();
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(0, answers));

        let weak = &tracker.statistics().weak_areas;
        assert_eq!(weak.len(), 10);
        assert!(weak
            .windows(2)
            .all(|pair| pair[0].success_rate <= pair[1].success_rate));
    }

    #[test]
    fn weak_areas_reflect_only_the_latest_session() {
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(0, vec![answer("by", false, None)]));
        tracker.record_session(&session(0, vec![answer("he", false, None)]));

        let weak = &tracker.statistics().weak_areas;
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].location_id, "he");
    }

    #[test]
    fn repeated_answers_for_one_location_merge_into_one_tally() {
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(
            1,
            vec![answer("by", true, None), answer("by", false, None)],
        ));

        let weak = &tracker.statistics().weak_areas;
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].success_rate, 50.0);
    }

    #[test]
    fn reset_restores_first_run_defaults() {
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(2, vec![answer("by", true, Some(true))]));
        tracker.reset();
        assert_eq!(tracker.statistics(), &Statistics::default());
    }

    #[test]
    fn from_saved_resumes_previous_counts() {
        let mut tracker = StatisticsTracker::new();
        tracker.record_session(&session(2, vec![answer("by", true, None)]));
        let saved = tracker.statistics().clone();

        let mut resumed = StatisticsTracker::from_saved(saved);
        resumed.record_session(&session(1, vec![answer("he", true, None)]));
        assert_eq!(resumed.statistics().total_sessions, 2);
    }
}
