//! Win/loss/draw counts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::core::{MatchStatus, Side};

/// Result of one simulated match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub seed: u64,
    pub status: MatchStatus,
    /// Side of the winner, if any.
    pub winner: Option<Side>,
    /// Turn counter when the match stopped.
    pub turns: u32,
}

/// Counts over a batch, from contender A's point of view.
///
/// Tallies of disjoint batches add up to the tally of their union.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTally {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Matches stopped by the turn cap.
    pub unfinished: u32,
    /// Sum of final turn counters.
    pub turns: u64,
}

impl MatchTally {
    /// Tally of a single match.
    pub fn from_report(report: &MatchReport) -> Self {
        let mut tally = Self::default();
        tally.record(report);
        tally
    }

    pub fn record(&mut self, report: &MatchReport) {
        self.games += 1;
        self.turns += u64::from(report.turns);
        match (report.status, report.winner) {
            (MatchStatus::Winner(_), Some(Side::A)) => self.wins += 1,
            (MatchStatus::Winner(_), _) => self.losses += 1,
            (MatchStatus::Draw, _) => self.draws += 1,
            (MatchStatus::Ongoing, _) => self.unfinished += 1,
        }
    }

    fn rate(&self, count: u32) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.games) * 100.0
        }
    }

    /// Percentage of games won by A.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn avg_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.turns as f64 / f64::from(self.games)
        }
    }
}

impl Add for MatchTally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            games: self.games + other.games,
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            draws: self.draws + other.draws,
            unfinished: self.unfinished + other.unfinished,
            turns: self.turns + other.turns,
        }
    }
}

impl AddAssign for MatchTally {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for MatchTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for MatchTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:-^30}", "Summary")?;
        writeln!(f, "Total Games:     {:>6}", self.games)?;
        writeln!(f, "Wins:            {:>6} ({:.2}%)", self.wins, self.win_rate())?;
        writeln!(f, "Losses:          {:>6} ({:.2}%)", self.losses, self.loss_rate())?;
        writeln!(f, "Ties:            {:>6} ({:.2}%)", self.draws, self.draw_rate())?;
        if self.unfinished > 0 {
            writeln!(f, "Unfinished:      {:>6}", self.unfinished)?;
        }
        writeln!(f, "Avg Turns:       {:>6.1}", self.avg_turns())?;
        write!(f, "{}", "-".repeat(30))
    }
}
