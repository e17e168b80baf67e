//! Score tracking.
//!
//! Stored in `SimulationEngine`, NOT as an ECS entity. Every mutation is
//! followed by `render` in the same step, so the widget never shows a
//! stale total.

use popshot_core::constants::SCORE_TEXT_PREFIX;
use popshot_core::services::ScoreDisplay;

/// Running score for the current session.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    /// Points so far. Never decreases within a session.
    pub total: u64,
    /// Targets destroyed so far.
    pub hits: u32,
}

impl ScoreTracker {
    /// Add `points` to the total.
    pub fn add(&mut self, points: u64) {
        self.total = self.total.saturating_add(points);
    }

    /// Count one destroyed target worth `points`.
    pub fn record_hit(&mut self, points: u64) {
        self.hits = self.hits.saturating_add(1);
        self.add(points);
    }

    /// Text shown on the score widget.
    pub fn text(&self) -> String {
        format!("{SCORE_TEXT_PREFIX}{}", self.total)
    }

    /// Push the current total to the widget.
    pub fn render(&self, display: &mut dyn ScoreDisplay) {
        display.set_text(&self.text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LastText(Option<String>);

    impl ScoreDisplay for LastText {
        fn set_text(&mut self, text: &str) {
            self.0 = Some(text.to_string());
        }
    }

    #[test]
    fn test_add_and_render() {
        let mut score = ScoreTracker::default();
        let mut display = LastText(None);

        score.render(&mut display);
        assert_eq!(display.0.as_deref(), Some("Score: 0"));

        score.add(10);
        score.add(10);
        score.render(&mut display);
        assert_eq!(score.total, 20);
        assert_eq!(display.0.as_deref(), Some("Score: 20"));
    }

    #[test]
    fn test_add_saturates() {
        let mut score = ScoreTracker {
            total: u64::MAX - 5,
            hits: 0,
        };
        score.add(10);
        assert_eq!(score.total, u64::MAX);
    }

    #[test]
    fn test_record_hit_counts_and_saturates() {
        let mut score = ScoreTracker::default();
        score.record_hit(10);
        score.record_hit(10);
        assert_eq!((score.total, score.hits), (20, 2));

        let mut score = ScoreTracker {
            total: 0,
            hits: u32::MAX,
        };
        score.record_hit(10);
        assert_eq!(score.hits, u32::MAX);
        assert_eq!(score.total, 10);
    }
}
