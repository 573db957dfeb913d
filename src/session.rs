use std::fmt;

/// Result of one counted practice turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => f.write_str("OK"),
            Outcome::Miss => f.write_str("wrong"),
        }
    }
}

/// Running tally of a practice session. Lives only in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    turns: u32,
    correct: u32,
}

impl PracticeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one turn.
    pub fn record(&mut self, hit: bool) -> Outcome {
        self.turns += 1;
        if hit {
            self.correct += 1;
            Outcome::Hit
        } else {
            Outcome::Miss
        }
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn misses(&self) -> u32 {
        self.turns - self.correct
    }

    /// Percentage of correct turns, `None` before the first counted turn.
    pub fn accuracy(&self) -> Option<f64> {
        (self.turns > 0).then(|| f64::from(self.correct) / f64::from(self.turns) * 100.0)
    }

    /// Per-turn feedback line.
    pub fn feedback(&self, outcome: Outcome) -> String {
        format!(
            "  {outcome}\thits={}\tmisses={}",
            self.correct,
            self.misses()
        )
    }

    /// Closing line, `None` if nothing was counted.
    pub fn summary(&self) -> Option<String> {
        self.accuracy()
            .map(|pct| format!("{} exercises. {pct:.1}% correct.", self.turns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = PracticeSession::new();
        assert_eq!(session.turns(), 0);
        assert_eq!(session.accuracy(), None);
        assert_eq!(session.summary(), None);
    }

    #[test]
    fn tally_counts_hits_and_misses() {
        let mut session = PracticeSession::new();
        assert_eq!(session.record(true), Outcome::Hit);
        assert_eq!(session.record(false), Outcome::Miss);
        assert_eq!(session.record(true), Outcome::Hit);

        assert_eq!(session.turns(), 3);
        assert_eq!(session.correct(), 2);
        assert_eq!(session.misses(), 1);
        assert_eq!(
            session.summary().as_deref(),
            Some("3 exercises. 66.7% correct.")
        );
    }

    #[test]
    fn feedback_shows_cumulative_counts() {
        let mut session = PracticeSession::new();
        let outcome = session.record(false);
        assert_eq!(session.feedback(outcome), "  wrong\thits=0\tmisses=1");

        let outcome = session.record(true);
        assert_eq!(session.feedback(outcome), "  OK\thits=1\tmisses=1");
    }

    #[test]
    fn perfect_and_zero_scores() {
        let mut perfect = PracticeSession::new();
        perfect.record(true);
        assert_eq!(
            perfect.summary().as_deref(),
            Some("1 exercises. 100.0% correct.")
        );

        let mut zero = PracticeSession::new();
        zero.record(false);
        assert_eq!(zero.summary().as_deref(), Some("1 exercises. 0.0% correct."));
    }
}
