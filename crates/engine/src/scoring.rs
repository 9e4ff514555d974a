//! Final scoring per game mode.

use blokus_core::{PieceId, PlayerId};
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, GameMode};
use crate::position::Position;

/// Bonus for placing every piece.
pub const ALL_PLACED_BONUS: i32 = 15;
/// Extra bonus when the monomino went down last.
pub const MONOMINO_LAST_BONUS: i32 = 5;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FinalScores {
    /// Indexed by player id.
    pub scores: Vec<i32>,
    /// Best first.
    pub ranking: Vec<PlayerId>,
    /// None on a tie for first, and in cooperative modes.
    pub winner: Option<PlayerId>,
    /// Share of board cells covered, 0.0..=1.0.
    pub coverage: f32,
}

impl FinalScores {
    pub fn score(&self, player: PlayerId) -> Option<i32> {
        self.scores.get(player.index()).copied()
    }
}

/// Score of one player under the standard area rule.
pub fn area_score(position: &Position, player: PlayerId) -> i32 {
    let Some(seat) = position.player(player) else {
        return 0;
    };
    let placed = position.board().placed_area(player) as i32;
    let remaining = position.remaining_area(player) as i32;
    let mut score = placed - remaining;
    if seat.remaining.is_empty() && seat.has_moved {
        score += ALL_PLACED_BONUS;
        if seat.last_piece == Some(PieceId::MONOMINO) {
            score += MONOMINO_LAST_BONUS;
        }
    }
    score
}

/// Target cells owned by `player`.
pub fn target_score(position: &Position, config: &GameConfig, player: PlayerId) -> i32 {
    let board = position.board();
    config
        .target
        .iter()
        .filter(|&&cell| board.owner(cell) == Some(player))
        .count() as i32
}

/// Scores for every seated player; valid for any position, terminal or not.
pub fn score_position(position: &Position, config: &GameConfig) -> FinalScores {
    let board = position.board();
    let ids: Vec<PlayerId> = position.players().iter().map(|p| p.id).collect();
    let uncovered = board.remaining_empty_count() as i32;

    let scores: Vec<i32> = ids
        .iter()
        .map(|&id| match config.mode {
            GameMode::Duo | GameMode::FourPlayer => area_score(position, id),
            GameMode::TotalAllocation => -uncovered,
            GameMode::Challenge => target_score(position, config, id),
        })
        .collect();

    let mut ranking = ids.clone();
    ranking.sort_by(|&a, &b| {
        scores[b.index()]
            .cmp(&scores[a.index()])
            .then_with(|| board.placed_area(b).cmp(&board.placed_area(a)))
            .then_with(|| a.cmp(&b))
    });

    let winner = match config.mode {
        GameMode::TotalAllocation => None,
        _ => ranking.first().copied().filter(|&top| {
            scores
                .iter()
                .filter(|&&s| s == scores[top.index()])
                .count()
                == 1
        }),
    };

    let cells = board.cell_count();
    let coverage = if cells == 0 {
        0.0
    } else {
        (cells as f32 - uncovered as f32) / cells as f32
    };

    FinalScores {
        scores,
        ranking,
        winner,
        coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blokus_core::{Coord, PieceSet, Placement};

    fn mono(at: (i16, i16)) -> Placement {
        Placement::new(PieceId::MONOMINO, 0, Coord::from(at))
    }

    #[test]
    fn test_opening_scores() {
        let config = GameConfig::duo();
        let pos = Position::from_config(&config).unwrap();
        let s = score_position(&pos, &config);
        assert_eq!(s.scores, vec![-89, -89]);
        assert_eq!(s.ranking, vec![PlayerId(0), PlayerId(1)]);
        assert_eq!(s.winner, None);
        assert_eq!(s.coverage, 0.0);
    }

    #[test]
    fn test_area_score_after_move() {
        let config = GameConfig::duo();
        let mut pos = Position::from_config(&config).unwrap();
        pos.play(&mono((0, 0))).unwrap();
        let s = score_position(&pos, &config);
        assert_eq!(s.scores, vec![1 - 88, -89]);
        assert_eq!(s.winner, Some(PlayerId(0)));
        assert_eq!(s.ranking[0], PlayerId(0));
    }

    #[test]
    fn test_all_placed_bonus() {
        let mut config = GameConfig::duo();
        config.inventory = PieceSet::from_bits(1);
        let mut pos = Position::from_config(&config).unwrap();
        pos.play(&mono((0, 0))).unwrap();
        assert_eq!(
            area_score(&pos, PlayerId(0)),
            1 + ALL_PLACED_BONUS + MONOMINO_LAST_BONUS
        );
        assert_eq!(area_score(&pos, PlayerId(1)), -1);
    }

    #[test]
    fn test_total_allocation_is_shared() {
        let config = GameConfig::total_allocation(2);
        let mut pos = Position::from_config(&config).unwrap();
        pos.play(&mono((0, 0))).unwrap();
        let s = score_position(&pos, &config);
        assert_eq!(s.scores, vec![-399, -399]);
        assert_eq!(s.winner, None);
        assert_eq!(s.ranking, vec![PlayerId(0), PlayerId(1)]);
        assert!((s.coverage - 1.0 / 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_challenge_counts_target_cells() {
        let config = GameConfig::challenge(vec![Coord::new(0, 0), Coord::new(1, 1)]);
        let mut pos = Position::from_config(&config).unwrap();
        pos.play(&mono((0, 0))).unwrap();
        let s = score_position(&pos, &config);
        assert_eq!(s.scores, vec![1, 0]);
        assert_eq!(s.winner, Some(PlayerId(0)));
    }
}
