use blokus_core::{Placement, PlayerId};
use blokus_engine::{GameConfig, Position};
use blokus_eval::{evaluate, EvalWeights};

use crate::{rank, successor};

/// One-ply search: every legal placement scored by the position it leaves.
pub struct GreedySearch {
    pub weights: EvalWeights,
}

impl GreedySearch {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn find_best_move(
        &self,
        position: &Position,
        config: &GameConfig,
        player: PlayerId,
    ) -> Option<(Placement, f32)> {
        self.find_top_moves(position, config, player, 1)
            .into_iter()
            .next()
    }

    /// Best `n` placements, best first.
    pub fn find_top_moves(
        &self,
        position: &Position,
        config: &GameConfig,
        player: PlayerId,
        n: usize,
    ) -> Vec<(Placement, f32)> {
        if n == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(Placement, f32)> = position
            .legal_moves(player)
            .filter_map(|placement| {
                let next = successor(position, player, &placement)?;
                Some((placement, evaluate(&next, player, config, &self.weights)))
            })
            .collect();

        scored.sort_by(|a, b| rank((a.1, &a.0), (b.1, &b.0)));
        scored.truncate(n);
        scored
    }
}

impl Default for GreedySearch {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blokus_core::{Coord, PieceId, PieceSet};

    fn duo() -> (GameConfig, Position) {
        let config = GameConfig::duo();
        let position = Position::from_config(&config).unwrap();
        (config, position)
    }

    #[test]
    fn test_opening_returns_legal_move() {
        let (config, position) = duo();
        let search = GreedySearch::default();
        let (mv, _) = search
            .find_best_move(&position, &config, PlayerId(0))
            .expect("expected a move");
        assert!(position.check(PlayerId(0), &mv).is_ok());
        assert!(position.legal_moves(PlayerId(0)).any(|candidate| candidate == mv));
    }

    #[test]
    fn test_best_move_matches_max_score() {
        let (config, position) = duo();
        let search = GreedySearch::default();

        let mut best_score = f32::NEG_INFINITY;
        for mv in position.legal_moves(PlayerId(0)) {
            let next = successor(&position, PlayerId(0), &mv).unwrap();
            best_score = best_score.max(evaluate(&next, PlayerId(0), &config, &search.weights));
        }

        let (_, score) = search
            .find_best_move(&position, &config, PlayerId(0))
            .expect("expected a move");
        assert!((score - best_score).abs() < 0.0001);
    }

    #[test]
    fn test_top_moves_sorted_and_limited() {
        let (config, position) = duo();
        let search = GreedySearch::default();
        let top = search.find_top_moves(&position, &config, PlayerId(0), 5);
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(search
            .find_top_moves(&position, &config, PlayerId(0), 0)
            .is_empty());
    }

    #[test]
    fn test_prefers_larger_piece_on_equal_terms() {
        // only the monomino and the domino, and nothing else differs much
        let mut config = GameConfig::duo();
        config.inventory = PieceSet::first(2);
        let position = Position::from_config(&config).unwrap();
        let weights = EvalWeights {
            mobility: 0.0,
            frontier: 0.0,
            territory: 0.0,
            blocked_frontier: 0.0,
            placed_area: 0.0,
            remaining_area: 0.0,
            ..EvalWeights::default()
        };
        let (mv, score) = GreedySearch::new(weights)
            .find_best_move(&position, &config, PlayerId(0))
            .unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(mv, Placement::new(PieceId(1), 0, Coord::ORIGIN));
    }

    #[test]
    fn test_no_moves_for_empty_inventory() {
        let mut config = GameConfig::duo();
        config.inventory = PieceSet::EMPTY;
        let position = Position::from_config(&config).unwrap();
        assert!(GreedySearch::default()
            .find_best_move(&position, &config, PlayerId(0))
            .is_none());
    }
}
