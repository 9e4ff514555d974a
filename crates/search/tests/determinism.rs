use blokus_core::{PieceSet, PlayerId};
use blokus_engine::{new_game, Game, GameConfig, GameMode, GameStatus};
use blokus_eval::EvalWeights;
use blokus_search::{suggest_move, SearchBudget};

fn play_out(mut game: Game, budget: SearchBudget, max_moves: usize) -> Game {
    let weights = EvalWeights::for_mode(game.config().mode);
    for _ in 0..max_moves {
        let Some(player) = game.active_player() else {
            break;
        };
        let mv = suggest_move(&game, player, &budget, &weights).expect("active player has a move");
        assert!(game.is_legal(player, &mv), "{mv}");
        game.apply_move(player, mv).unwrap();
    }
    game
}

#[test]
fn same_state_same_suggestion() {
    let game = new_game(GameConfig::duo()).unwrap();
    let game = play_out(game, SearchBudget::greedy(), 4);
    let weights = EvalWeights::default();
    for budget in [SearchBudget::greedy(), SearchBudget::new(2, 4, 1_500)] {
        let player = game.active_player().unwrap();
        let first = suggest_move(&game, player, &budget, &weights);
        let second = suggest_move(&game.clone(), player, &budget, &weights);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}

#[test]
fn suggestion_does_not_touch_the_game() {
    let game = new_game(GameConfig::duo()).unwrap();
    let before = game.board_snapshot();
    let _ = suggest_move(&game, PlayerId(0), &SearchBudget::new(2, 3, 500), &EvalWeights::default());
    assert_eq!(game.board_snapshot(), before);
    assert!(game.move_history().is_empty());
}

#[test]
fn greedy_self_play_finishes() {
    let mut config = GameConfig::duo();
    config.inventory = PieceSet::first(12);
    let game = new_game(config).unwrap();
    let game = play_out(game, SearchBudget::greedy(), 100);
    assert_eq!(game.status(), GameStatus::Finished);
    let scores = game.final_scores().unwrap();
    assert_eq!(scores.scores.len(), 2);
    assert_eq!(scores.ranking.len(), 2);
}

#[test]
fn identical_games_play_identically() {
    let config = GameConfig::for_mode(GameMode::FourPlayer);
    let a = play_out(new_game(config.clone()).unwrap(), SearchBudget::greedy(), 12);
    let b = play_out(new_game(config).unwrap(), SearchBudget::greedy(), 12);
    assert_eq!(a.move_history(), b.move_history());
    assert_eq!(a.board_snapshot(), b.board_snapshot());
}

#[test]
fn wrong_player_gets_nothing() {
    let game = new_game(GameConfig::duo()).unwrap();
    assert!(suggest_move(&game, PlayerId(1), &SearchBudget::default(), &EvalWeights::default()).is_none());
}
