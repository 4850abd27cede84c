//! Score tracker for the active level

/// Result of applying one scoring event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u32,
    pub goal: u32,
    pub goal_reached: bool,
}

/// Running count for the active (module, level)
///
/// The score is clamped to the goal, so `score <= goal` always holds.
#[derive(Debug, Default, Clone)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` toward `goal`
    pub fn apply(&mut self, amount: u32, goal: u32) -> ScoreUpdate {
        self.score = self.score.saturating_add(amount).min(goal);
        ScoreUpdate {
            score: self.score,
            goal,
            goal_reached: self.score >= goal,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_reached_exactly_at_threshold() {
        let mut tracker = ScoreTracker::new();
        for i in 1..5 {
            let update = tracker.apply(1, 5);
            assert_eq!(update.score, i);
            assert!(!update.goal_reached);
        }
        assert!(tracker.apply(1, 5).goal_reached);
    }

    #[test]
    fn test_score_clamps_to_goal() {
        let mut tracker = ScoreTracker::new();
        tracker.apply(3, 5);
        let update = tracker.apply(4, 5);
        assert_eq!(update.score, 5);
        assert!(update.goal_reached);
    }

    #[test]
    fn test_reset() {
        let mut tracker = ScoreTracker::new();
        tracker.apply(2, 5);
        tracker.reset();
        assert_eq!(tracker.score(), 0);
    }
}
