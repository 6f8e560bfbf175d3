use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Progress thresholds that trigger a one-time celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Milestone {
    Quarter,
    Half,
    ThreeQuarters,
    Complete,
}

impl Milestone {
    /// Ascending by threshold.
    pub const ALL: [Milestone; 4] = [
        Self::Quarter,
        Self::Half,
        Self::ThreeQuarters,
        Self::Complete,
    ];

    pub fn threshold(&self) -> u8 {
        match self {
            Self::Quarter => 25,
            Self::Half => 50,
            Self::ThreeQuarters => 75,
            Self::Complete => 100,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Quarter => "Great start! A quarter of your return is done.",
            Self::Half => "Halfway there! Keep going.",
            Self::ThreeQuarters => "Almost done! Just a few sections left.",
            Self::Complete => "All sections complete! Your return is ready to submit.",
        }
    }
}

impl From<Milestone> for u8 {
    fn from(milestone: Milestone) -> Self {
        milestone.threshold()
    }
}

impl TryFrom<u8> for Milestone {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|m| m.threshold() == value)
            .ok_or_else(|| format!("{value} is not a milestone threshold"))
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.threshold())
    }
}

/// Remembers which milestones have fired so each fires at most once.
///
/// When one update crosses several thresholds only the highest fires; the
/// lower ones are marked as passed and never fire afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneNotifier {
    fired: BTreeSet<Milestone>,
}

impl MilestoneNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self, milestone: Milestone) -> bool {
        self.fired.contains(&milestone)
    }

    /// Milestone to celebrate for `progress`, if any.
    pub fn evaluate(&mut self, progress: u8) -> Option<Milestone> {
        let reached = Milestone::ALL
            .into_iter()
            .rev()
            .find(|m| progress >= m.threshold() && !self.fired.contains(m))?;

        self.fired
            .extend(Milestone::ALL.into_iter().filter(|m| *m <= reached));
        Some(reached)
    }

    /// Forget every fired milestone, e.g. after the filing is reset.
    pub fn clear(&mut self) {
        self.fired.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nothing_fires_below_first_threshold() {
        let mut notifier = MilestoneNotifier::new();

        assert_eq!(notifier.evaluate(0), None);
        assert_eq!(notifier.evaluate(24), None);
    }

    #[test]
    fn quarter_fires_once_at_thirty_percent() {
        let mut notifier = MilestoneNotifier::new();

        assert_eq!(notifier.evaluate(30), Some(Milestone::Quarter));
        assert_eq!(notifier.evaluate(30), None);
        assert_eq!(notifier.evaluate(40), None);
    }

    #[test]
    fn jump_fires_only_the_highest() {
        let mut notifier = MilestoneNotifier::new();

        assert_eq!(notifier.evaluate(100), Some(Milestone::Complete));
        assert!(Milestone::ALL.iter().all(|m| notifier.has_fired(*m)));
        assert_eq!(notifier.evaluate(100), None);
    }

    #[test]
    fn skipped_lower_thresholds_never_fire_later() {
        let mut notifier = MilestoneNotifier::new();
        notifier.evaluate(60);

        // progress can drop only through a reset of the wizard; the notifier
        // still treats 25 as passed.
        assert_eq!(notifier.evaluate(30), None);
        assert_eq!(notifier.evaluate(80), Some(Milestone::ThreeQuarters));
    }

    #[test]
    fn sequential_progress_fires_each_in_turn() {
        let mut notifier = MilestoneNotifier::new();
        let fired: Vec<_> = [10, 26, 50, 74, 75, 99, 100]
            .into_iter()
            .filter_map(|p| notifier.evaluate(p))
            .collect();

        assert_eq!(
            fired,
            vec![
                Milestone::Quarter,
                Milestone::Half,
                Milestone::ThreeQuarters,
                Milestone::Complete
            ]
        );
    }

    #[test]
    fn clear_allows_refiring() {
        let mut notifier = MilestoneNotifier::new();
        notifier.evaluate(50);

        notifier.clear();

        assert_eq!(notifier.evaluate(50), Some(Milestone::Half));
    }

    #[test]
    fn serializes_as_threshold_list() {
        let mut notifier = MilestoneNotifier::new();
        notifier.evaluate(55);

        let json = serde_json::to_string(&notifier).unwrap();
        assert_eq!(json, "[25,50]");

        let back: MilestoneNotifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notifier);
    }
}
