//! Leaf scoring.
//!
//! Finished matches score by outcome from the searching contender's point of
//! view: +1 for its win, -1 for the opponent's win, +0.2 for a draw. Ongoing
//! positions are scored by a [`LeafEvaluator`].

use crate::core::{ContenderId, DuelError, MatchStatus, Move, Result, Snapshot};
use crate::nn::{FeatureEncoder, ValueEstimator};

/// Score of a win for the searching contender.
pub const WIN_SCORE: f64 = 1.0;
/// Score of a win for the opponent.
pub const LOSS_SCORE: f64 = -1.0;
/// Score of a draw.
pub const DRAW_SCORE: f64 = 0.2;

/// Outcome score of a finished match, `None` while it is ongoing.
#[must_use]
pub fn outcome_score(status: MatchStatus, perspective: ContenderId) -> Option<f64> {
    match status {
        MatchStatus::Ongoing => None,
        MatchStatus::Draw => Some(DRAW_SCORE),
        MatchStatus::Winner(id) if id == perspective => Some(WIN_SCORE),
        MatchStatus::Winner(_) => Some(LOSS_SCORE),
    }
}

/// Scores ongoing positions.
pub trait LeafEvaluator: Send + Sync {
    /// Score of an ongoing `snapshot` reached by `mv`, for `perspective`.
    fn evaluate(&self, snapshot: &Snapshot, mv: Option<Move>, perspective: ContenderId) -> f64;

    /// The score every ongoing position gets, if it never depends on the
    /// position. Lets rollouts skip capturing snapshots.
    fn constant_score(&self) -> Option<f64> {
        None
    }
}

/// Full leaf score: the outcome if the match is over, else the evaluator.
pub fn leaf_score<V: LeafEvaluator + ?Sized>(
    evaluator: &V,
    snapshot: &Snapshot,
    mv: Option<Move>,
    perspective: ContenderId,
) -> f64 {
    outcome_score(snapshot.status, perspective)
        .unwrap_or_else(|| evaluator.evaluate(snapshot, mv, perspective))
}

/// Ongoing positions are worth nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutcomeEvaluator;

impl LeafEvaluator for OutcomeEvaluator {
    fn evaluate(&self, _snapshot: &Snapshot, _mv: Option<Move>, _perspective: ContenderId) -> f64 {
        0.0
    }

    fn constant_score(&self) -> Option<f64> {
        Some(0.0)
    }
}

/// Scores ongoing positions with a value estimator over projected features.
///
/// Only positions where the searching contender is to move are estimated;
/// every other ongoing position scores 0.
#[derive(Clone, Debug)]
pub struct LearnedEvaluator<N: ValueEstimator> {
    encoder: FeatureEncoder,
    estimator: N,
}

impl<N: ValueEstimator> LearnedEvaluator<N> {
    /// Pair an estimator with the default encoder.
    ///
    /// Fails if the estimator expects a different number of features.
    pub fn new(estimator: N) -> Result<Self> {
        Self::with_encoder(FeatureEncoder::new(), estimator)
    }

    pub fn with_encoder(encoder: FeatureEncoder, estimator: N) -> Result<Self> {
        if let Some(expected) = estimator.input_len() {
            if expected != encoder.len() {
                return Err(DuelError::config(format!(
                    "value estimator expects {expected} features, encoder produces {}",
                    encoder.len()
                )));
            }
        }
        Ok(Self { encoder, estimator })
    }

    #[must_use]
    pub fn estimator(&self) -> &N {
        &self.estimator
    }
}

impl<N: ValueEstimator> LeafEvaluator for LearnedEvaluator<N> {
    fn evaluate(&self, snapshot: &Snapshot, mv: Option<Move>, perspective: ContenderId) -> f64 {
        if snapshot.active_id != perspective {
            return 0.0;
        }
        f64::from(self.estimator.estimate(&self.encoder.encode(snapshot, mv)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Hand, Material};
    use crate::core::{Contender, GameRng, Match, MatchMode, ResourcePool, Side};
    use crate::nn::{EncodedState, LinearValue, ZeroValue, FEATURE_LEN};

    fn snapshot(active: Side) -> Snapshot {
        let card = Card::new(CardId::new(Material::Bricks, 0), 1, "Wall", "fence +3").unwrap();
        let mut hand = Hand::new(8);
        hand.place(card);
        let a = Contender::new(ContenderId::new(1), "A", 30, 10, ResourcePool::uniform(2, 5))
            .with_hand(hand.clone());
        let b = Contender::new(ContenderId::new(2), "B", 30, 10, ResourcePool::uniform(2, 5))
            .with_hand(hand);
        Snapshot::capture(&Match::from_parts(MatchMode::CpuOnly, 1, a, b, active, GameRng::new(0)))
    }

    /// Always 0.5.
    struct Half;

    impl ValueEstimator for Half {
        fn estimate(&self, _encoded: &EncodedState) -> f32 {
            0.5
        }
    }

    #[test]
    fn test_outcome_scores() {
        let me = ContenderId::new(1);
        let them = ContenderId::new(2);
        assert_eq!(outcome_score(MatchStatus::Ongoing, me), None);
        assert_eq!(outcome_score(MatchStatus::Winner(me), me), Some(1.0));
        assert_eq!(outcome_score(MatchStatus::Winner(them), me), Some(-1.0));
        assert_eq!(outcome_score(MatchStatus::Draw, me), Some(0.2));
    }

    #[test]
    fn test_leaf_score_prefers_outcome() {
        let mut snap = snapshot(Side::A);
        let me = ContenderId::new(1);
        assert_eq!(leaf_score(&OutcomeEvaluator, &snap, None, me), 0.0);

        let learned = LearnedEvaluator::new(Half).unwrap();
        assert_eq!(leaf_score(&learned, &snap, None, me), 0.5);

        snap.status = MatchStatus::Winner(ContenderId::new(2));
        assert_eq!(leaf_score(&learned, &snap, None, me), -1.0);
    }

    #[test]
    fn test_learned_only_on_own_turn() {
        let learned = LearnedEvaluator::new(Half).unwrap();
        let me = ContenderId::new(1);
        assert_eq!(learned.evaluate(&snapshot(Side::A), None, me), 0.5);
        assert_eq!(learned.evaluate(&snapshot(Side::B), None, me), 0.0);
        assert_eq!(learned.constant_score(), None);
    }

    #[test]
    fn test_learned_checks_width() {
        assert!(LearnedEvaluator::new(ZeroValue).is_ok());
        assert!(LearnedEvaluator::new(LinearValue::new(vec![0.0; FEATURE_LEN], 0.0)).is_ok());
        let err = LearnedEvaluator::new(LinearValue::new(vec![0.0; 3], 0.0)).unwrap_err();
        assert!(matches!(err, DuelError::Configuration(_)));
    }
}
