use blokus_core::{Coord, PieceId, PieceSet, Placement, PlayerId};
use blokus_engine::{
    new_game, Game, GameConfig, GameError, GameMode, GameStatus, Rejection,
};

const A: PlayerId = PlayerId(0);
const B: PlayerId = PlayerId(1);

fn mono(row: i16, col: i16) -> Placement {
    Placement::new(PieceId::MONOMINO, 0, Coord::new(row, col))
}

fn domino(row: i16, col: i16) -> Placement {
    Placement::new(PieceId(1), 0, Coord::new(row, col))
}

mod duo_opening {
    use super::*;

    #[test]
    fn test_first_moves_and_corner_rule() {
        let mut game = new_game(GameConfig::duo()).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);

        game.apply_move(A, mono(0, 0)).unwrap();
        assert_eq!(game.board_snapshot().owner(Coord::new(0, 0)), Some(A));

        game.apply_move(B, mono(13, 13)).unwrap();
        assert_eq!(game.board_snapshot().owner(Coord::new(13, 13)), Some(B));

        assert_eq!(
            game.apply_move(A, domino(0, 1)),
            Err(GameError::IllegalMove(Rejection::EdgeContact))
        );

        game.apply_move(A, domino(1, 1)).unwrap();
        let board = game.board_snapshot();
        assert_eq!(board.owner(Coord::new(1, 1)), Some(A));
        assert_eq!(board.owner(Coord::new(1, 2)), Some(A));
        assert_eq!(board.placed_area(A), 3);
        assert_eq!(game.active_player(), Some(B));
    }

    #[test]
    fn test_first_move_must_cover_start_cell() {
        let mut game = new_game(GameConfig::duo()).unwrap();
        assert_eq!(
            game.apply_move(A, mono(13, 13)),
            Err(GameError::IllegalMove(Rejection::MissingStartCell))
        );
        assert_eq!(
            game.apply_move(A, mono(6, 6)),
            Err(GameError::IllegalMove(Rejection::MissingStartCell))
        );
    }

    #[test]
    fn test_used_piece_is_unavailable() {
        let mut game = new_game(GameConfig::duo()).unwrap();
        game.apply_move(A, mono(0, 0)).unwrap();
        game.apply_move(B, mono(13, 13)).unwrap();
        assert_eq!(
            game.apply_move(A, mono(1, 1)),
            Err(GameError::IllegalMove(Rejection::PieceUnavailable))
        );
    }

    #[test]
    fn test_every_legal_move_is_accepted() {
        let game = new_game(GameConfig::duo()).unwrap();
        for placement in game.legal_moves(A) {
            let mut copy = game.clone();
            assert!(game.is_legal(A, &placement), "{placement}");
            assert_eq!(copy.apply_move(A, placement), Ok(()), "{placement}");
        }
    }
}

mod rejections {
    use super::*;

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut game = new_game(GameConfig::duo()).unwrap();
        game.apply_move(A, mono(0, 0)).unwrap();
        let board = game.board_snapshot();
        let status = game.status();
        let history = game.move_history().to_vec();

        let attempts = [
            (B, mono(0, 0)),
            (B, domino(13, 13)),
            (A, domino(1, 1)),
            (B, Placement::new(PieceId(10), 0, Coord::new(13, 10))),
            (B, Placement::new(PieceId(30), 0, Coord::new(13, 13))),
        ];
        for (player, placement) in attempts {
            assert!(game.apply_move(player, placement).is_err());
            assert_eq!(game.board_snapshot(), board);
            assert_eq!(game.status(), status);
            assert_eq!(game.move_history(), &history[..]);
        }
    }

    #[test]
    fn test_anchor_at_coordinate_limit_is_out_of_bounds() {
        let mut game = new_game(GameConfig::duo()).unwrap();
        let x = Placement::new(PieceId(18), 0, Coord::new(0, i16::MAX));
        assert!(!game.is_legal(A, &x));
        assert_eq!(
            game.apply_move(A, x),
            Err(GameError::IllegalMove(Rejection::OutOfBounds))
        );
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn test_wrong_turn_and_not_in_progress() {
        let mut config = GameConfig::duo();
        config.inventory = PieceSet::from_bits(1);
        let mut game = new_game(config).unwrap();
        assert_eq!(
            game.apply_move(B, mono(13, 13)),
            Err(GameError::WrongTurn {
                expected: A,
                got: B
            })
        );
        game.apply_move(A, mono(0, 0)).unwrap();
        game.apply_move(B, mono(13, 13)).unwrap();
        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(
            game.apply_move(A, mono(1, 1)),
            Err(GameError::NotInProgress)
        );
    }

    #[test]
    fn test_invalid_configuration() {
        let mut config = GameConfig::four_player();
        config.width = 40;
        assert!(matches!(
            new_game(config),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
}

mod inventory {
    use super::*;

    #[test]
    fn test_empty_inventory_has_no_placements() {
        let mut config = GameConfig::duo();
        config.inventory = PieceSet::EMPTY;
        let mut game = Game::new(config).unwrap();
        game.start().unwrap();
        assert_eq!(game.legal_moves(A).count(), 0);
        assert_eq!(game.legal_moves(B).count(), 0);
        assert_eq!(game.status(), GameStatus::Finished);
    }
}

mod terminal {
    use super::*;

    #[test]
    fn test_boxed_in_board_finishes() {
        // two I5s close off their owners' rows on a 5x5 board
        let mut config = GameConfig::duo();
        config.width = 5;
        config.height = 5;
        config.start_cells = vec![vec![Coord::new(0, 0)], vec![Coord::new(4, 4)]];
        config.inventory = [PieceId::MONOMINO, PieceId(10)].into_iter().collect();
        let mut game = new_game(config).unwrap();

        game.apply_move(A, Placement::new(PieceId(10), 0, Coord::new(0, 0)))
            .unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        game.apply_move(B, Placement::new(PieceId(10), 0, Coord::new(4, 0)))
            .unwrap();

        assert_eq!(game.status(), GameStatus::Finished);
        assert!(game.position().is_terminal());
        let scores = game.final_scores().unwrap();
        assert_eq!(scores.scores, vec![4, 4]);
        assert_eq!(scores.winner, None);
        assert!((scores.coverage - 10.0 / 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_skipped_player_does_not_end_game() {
        // both players open on the same corner, so B never gets a move
        let mut config = GameConfig::duo();
        config.start_cells[1] = vec![Coord::new(0, 0)];
        let mut game = new_game(config).unwrap();

        game.apply_move(A, mono(0, 0)).unwrap();
        assert_eq!(game.active_player(), Some(A));
        assert!(game.position().players()[1].out_of_moves);
        assert_eq!(game.legal_moves(B).count(), 0);

        game.apply_move(A, domino(1, 1)).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.active_player(), Some(A));
    }
}

mod modes {
    use super::*;

    #[test]
    fn test_four_player_turn_order() {
        let mut game = new_game(GameConfig::four_player()).unwrap();
        let corners = [(0, 0), (0, 19), (19, 19), (19, 0)];
        for (i, &(row, col)) in corners.iter().enumerate() {
            let player = PlayerId(i as u8);
            assert_eq!(game.active_player(), Some(player));
            game.apply_move(player, mono(row, col)).unwrap();
        }
        assert_eq!(game.active_player(), Some(A));
        assert_eq!(game.config().mode, GameMode::FourPlayer);
    }

    #[test]
    fn test_total_allocation_any_corner() {
        let mut game = new_game(GameConfig::total_allocation(2)).unwrap();
        game.apply_move(A, mono(19, 0)).unwrap();
        game.apply_move(B, mono(0, 19)).unwrap();
        assert_eq!(game.board_snapshot().remaining_empty_count(), 398);
    }

    #[test]
    fn test_challenge_scores_target() {
        let target = vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(13, 13)];
        let mut config = GameConfig::challenge(target);
        config.inventory = PieceSet::first(2);
        let mut game = new_game(config).unwrap();
        game.apply_move(A, domino(0, 0)).unwrap();
        game.apply_move(B, mono(13, 13)).unwrap();
        game.apply_move(A, mono(1, 2)).unwrap();
        game.apply_move(B, domino(12, 11)).unwrap();
        assert_eq!(game.status(), GameStatus::Finished);
        let scores = game.final_scores().unwrap();
        assert_eq!(scores.scores, vec![2, 1]);
        assert_eq!(scores.winner, Some(A));
    }
}
