//! Text encoding of stored games.

use crate::storage::{Serializer, StorageError};
use strictly_reversi::Game;
use tracing::instrument;

/// JSON codec for [`Game`] records.
///
/// The board is a 64-character row-major string and the status keeps its
/// variant tag, so `Active` and `Passed` for the same color stay distinct:
///
/// ```text
/// {"owner":"Black","board":"...........","status":{"Passed":"White"}}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GameSerializer;

impl Serializer<Game> for GameSerializer {
    #[instrument(skip(self, value))]
    fn serialize(&self, value: &Game) -> Result<String, StorageError> {
        Ok(serde_json::to_string(value)?)
    }

    #[instrument(skip(self, text), fields(len = text.len()))]
    fn deserialize(&self, text: &str) -> Result<Game, StorageError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageErrorKind;
    use strictly_reversi::{Board, Color, GameStatus, Position};

    fn round_trip(game: &Game) -> Game {
        let text = GameSerializer.serialize(game).expect("serialize");
        GameSerializer.deserialize(&text).expect("deserialize")
    }

    #[test]
    fn test_fresh_game_round_trip() {
        let game = Game::new(Color::White);
        assert_eq!(round_trip(&game), game);
    }

    #[test]
    fn test_played_game_round_trip() {
        let game = Game::new(Color::Black)
            .play(Position::new(26))
            .and_then(|g| g.play(Position::new(18)))
            .expect("two legal plies");
        assert_eq!(round_trip(&game), game);
    }

    #[test]
    fn test_terminal_games_round_trip() {
        for status in [GameStatus::Won(Color::White), GameStatus::Drawn] {
            let game = Game::from_parts(Color::Black, Board::initial(), status);
            assert_eq!(round_trip(&game), game);
        }
    }

    #[test]
    fn test_passed_tag_survives() {
        let game = Game::from_parts(Color::Black, Board::initial(), GameStatus::Passed(Color::White));
        let text = GameSerializer.serialize(&game).expect("serialize");
        assert!(text.contains("Passed"));
        assert_eq!(round_trip(&game).status(), GameStatus::Passed(Color::White));
    }

    #[test]
    fn test_garbage_is_a_codec_error() {
        let err = GameSerializer.deserialize("not a game").expect_err("garbage");
        assert_eq!(err.kind, StorageErrorKind::Codec);
        let err = GameSerializer
            .deserialize(r#"{"owner":"Black","board":"BW","status":"Drawn"}"#)
            .expect_err("short board");
        assert_eq!(err.kind, StorageErrorKind::Codec);
    }
}
