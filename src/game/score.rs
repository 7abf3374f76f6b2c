//! Score bookkeeping for a play-through.

/// Correct / possible shot counters plus the list of wrongly shot target
/// words. Counters only ever grow during a play-through; a new play-through
/// starts with [`ScoreBoard::reset`].
#[derive(Debug, Default)]
pub struct ScoreBoard {
    total_correct: u32,
    total_possible: u32,
    missed: Vec<String>,
}

impl ScoreBoard {
    /// Starts a fresh play-through over a set with `possible` distractors.
    pub fn reset(&mut self, possible: u32) {
        self.total_correct = 0;
        self.total_possible = possible;
        self.missed.clear();
    }

    /// A distractor was shot down.
    pub fn record_correct(&mut self) {
        self.total_correct += 1;
    }

    /// A target word was shot by mistake.
    pub fn record_miss(&mut self, word: &str) {
        self.missed.push(word.to_string());
    }

    pub fn correct(&self) -> u32 {
        self.total_correct
    }

    pub fn possible(&self) -> u32 {
        self.total_possible
    }

    /// True when no target word was ever shot.
    pub fn flawless(&self) -> bool {
        self.missed.is_empty()
    }

    /// Percentage score in [0, 100], rounded to the nearest integer. An empty
    /// set (zero possible shots) scores 0 rather than dividing by zero.
    pub fn percent(&self) -> u32 {
        if self.total_possible == 0 {
            return 0;
        }
        let pct = self.total_correct as f64 / self.total_possible as f64 * 100.0;
        pct.round().clamp(0.0, 100.0) as u32
    }

    /// Missed words with duplicates removed, first-seen order preserved
    /// (for the review screen).
    pub fn unique_missed(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for word in &self.missed {
            if !seen.contains(&word.as_str()) {
                seen.push(word);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_of_ten_scores_seventy() {
        let mut board = ScoreBoard::default();
        board.reset(10);
        for _ in 0..7 {
            board.record_correct();
        }
        assert_eq!(board.percent(), 70);
    }

    #[test]
    fn zero_possible_scores_zero_without_division_fault() {
        let mut board = ScoreBoard::default();
        board.reset(0);
        assert_eq!(board.percent(), 0);
    }

    #[test]
    fn percent_is_clamped_to_one_hundred() {
        let mut board = ScoreBoard::default();
        board.reset(2);
        for _ in 0..5 {
            board.record_correct();
        }
        assert_eq!(board.percent(), 100);
    }

    #[test]
    fn percent_rounds_to_nearest_integer() {
        let mut board = ScoreBoard::default();
        board.reset(3);
        board.record_correct();
        // 1/3 -> 33.33 -> 33
        assert_eq!(board.percent(), 33);
        board.record_correct();
        // 2/3 -> 66.67 -> 67
        assert_eq!(board.percent(), 67);
    }

    #[test]
    fn flawless_flips_on_first_miss() {
        let mut board = ScoreBoard::default();
        board.reset(4);
        assert!(board.flawless());
        board.record_miss("apple");
        assert!(!board.flawless());
    }

    #[test]
    fn unique_missed_dedupes_preserving_order() {
        let mut board = ScoreBoard::default();
        board.reset(4);
        board.record_miss("pear");
        board.record_miss("apple");
        board.record_miss("pear");
        assert_eq!(board.unique_missed(), vec!["pear", "apple"]);
    }

    #[test]
    fn reset_clears_counters_and_misses() {
        let mut board = ScoreBoard::default();
        board.reset(10);
        board.record_correct();
        board.record_miss("x");
        board.reset(5);
        assert_eq!(board.correct(), 0);
        assert_eq!(board.possible(), 5);
        assert!(board.flawless());
    }
}
