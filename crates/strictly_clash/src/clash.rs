//! Play sessions.
//!
//! A [`Clash`] pairs a [`Game`] with the [`Side`] of whoever is driving it.
//! Local clashes keep everything in memory; remote clashes mirror a record
//! in [`GameStorage`] that both participants read and write. Every operation
//! takes `&self` and returns a new `Clash`, so a failed operation leaves the
//! caller's session exactly as it was.

use crate::storage::{GameStorage, StorageError, StorageErrorKind};
use crate::{ClashError, Name, Side};
use std::time::Duration;
use strictly_reversi::{Color, Game, Position};
use tracing::{debug, info, instrument};

/// Lifecycle state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClashState {
    /// Nothing started yet.
    NotStarted,
    /// Both sides share this process.
    Local {
        /// Current game.
        game: Game,
        /// The acting side.
        side: Side,
    },
    /// The canonical game lives in storage under `name`.
    Remote {
        /// Record name.
        name: Name,
        /// Last synchronized view, possibly stale.
        game: Game,
        /// The acting side.
        side: Side,
    },
}

/// A play session bound to a store of games.
#[derive(Debug, Clone)]
pub struct Clash {
    storage: GameStorage,
    state: ClashState,
}

impl Clash {
    /// Creates an unstarted session on `storage`.
    pub fn new(storage: GameStorage) -> Self {
        Self {
            storage,
            state: ClashState::NotStarted,
        }
    }

    fn with_state(&self, state: ClashState) -> Self {
        Self {
            storage: self.storage.clone(),
            state,
        }
    }

    /// Unstarted session sharing this session's storage.
    pub fn unstarted(&self) -> Self {
        self.with_state(ClashState::NotStarted)
    }

    /// Starts a new game owned by `owner`.
    ///
    /// With a `name` the game is created in storage and the session is
    /// remote; without one it is local.
    ///
    /// # Errors
    ///
    /// [`ClashError::Storage`] if a record named `name` already exists.
    #[instrument(skip(self))]
    pub fn new_game(&self, name: Option<Name>, owner: Color) -> Result<Self, ClashError> {
        let game = Game::new(owner);
        let side = Side::of(owner);

        let state = match name {
            Some(name) => {
                self.storage.create(&name, &game)?;
                info!(%name, ?owner, "Remote game created");
                ClashState::Remote { name, game, side }
            }
            None => {
                info!(?owner, "Local game created");
                ClashState::Local { game, side }
            }
        };
        Ok(self.with_state(state))
    }

    /// Joins the stored game `name` as the opponent of its owner.
    ///
    /// # Errors
    ///
    /// [`ClashError::GameNotFound`] if there is no such record.
    #[instrument(skip(self))]
    pub fn join(&self, name: Name) -> Result<Self, ClashError> {
        let game = self.storage.read(&name)?.ok_or(ClashError::GameNotFound)?;
        let side = Side::of(game.owner().other());
        info!(%name, color = ?side.color, "Joined remote game");
        Ok(self.with_state(ClashState::Remote { name, game, side }))
    }

    /// Plays `pos` for the side to move.
    ///
    /// A remote session may only move when its own color holds the turn in
    /// the local view; the new game is then written back to storage.
    ///
    /// # Errors
    ///
    /// - [`ClashError::NotStarted`] before `new_game`/`join`.
    /// - [`ClashError::Game`] if the rules reject the move.
    /// - [`ClashError::OutOfTurn`] for a remote move on the opponent's turn.
    /// - [`ClashError::Storage`] if the record cannot be updated.
    #[instrument(skip(self), fields(state = self.label()))]
    pub fn play(&self, pos: Position) -> Result<Self, ClashError> {
        match &self.state {
            ClashState::NotStarted => Err(ClashError::NotStarted),
            ClashState::Local { game, side } => Ok(self.with_state(ClashState::Local {
                game: game.play(pos)?,
                side: *side,
            })),
            ClashState::Remote { name, game, side } => {
                let next = game.play(pos)?;
                if game.turn() != Some(side.color) {
                    debug!(color = ?side.color, turn = ?game.turn(), "Rejected out-of-turn move");
                    return Err(ClashError::OutOfTurn);
                }
                self.persist(name, &next)?;
                Ok(self.with_state(ClashState::Remote {
                    name: name.clone(),
                    game: next,
                    side: *side,
                }))
            }
        }
    }

    /// Passes the turn.
    ///
    /// # Errors
    ///
    /// As [`Clash::play`], minus the turn ownership check.
    #[instrument(skip(self), fields(state = self.label()))]
    pub fn pass(&self) -> Result<Self, ClashError> {
        match &self.state {
            ClashState::NotStarted => Err(ClashError::NotStarted),
            ClashState::Local { game, side } => Ok(self.with_state(ClashState::Local {
                game: game.pass()?,
                side: *side,
            })),
            ClashState::Remote { name, game, side } => {
                let next = game.pass()?;
                self.persist(name, &next)?;
                Ok(self.with_state(ClashState::Remote {
                    name: name.clone(),
                    game: next,
                    side: *side,
                }))
            }
        }
    }

    /// Turns legal-move highlighting on or off for this side.
    ///
    /// # Errors
    ///
    /// [`ClashError::NotStarted`] before `new_game`/`join`.
    #[instrument(skip(self))]
    pub fn targets(&self, enabled: bool) -> Result<Self, ClashError> {
        let state = match &self.state {
            ClashState::NotStarted => return Err(ClashError::NotStarted),
            ClashState::Local { game, side } => ClashState::Local {
                game: game.clone(),
                side: Side::new(side.color, enabled),
            },
            ClashState::Remote { name, game, side } => ClashState::Remote {
                name: name.clone(),
                game: game.clone(),
                side: Side::new(side.color, enabled),
            },
        };
        Ok(self.with_state(state))
    }

    /// Reloads a remote game from storage.
    ///
    /// # Errors
    ///
    /// - [`ClashError::GameNotFound`] if the record was deleted.
    /// - [`ClashError::NoChange`] if the record matches the local view.
    /// - [`ClashError::UnsupportedOnLocal`] on a local session.
    #[instrument(skip(self), fields(state = self.label()))]
    pub fn refresh(&self) -> Result<Self, ClashError> {
        let (name, _, _) = self.remote_parts()?;
        let fresh = self.storage.read(name)?;
        self.reconcile(fresh)
    }

    /// [`Clash::refresh`] after waiting `delay`, for polling loops that want
    /// to give the opponent time to move. The read runs on a blocking thread.
    ///
    /// # Errors
    ///
    /// Same as [`Clash::refresh`].
    #[instrument(skip(self), fields(state = self.label()))]
    pub async fn refresh_after(&self, delay: Duration) -> Result<Self, ClashError> {
        let (name, _, _) = self.remote_parts()?;
        tokio::time::sleep(delay).await;

        let storage = self.storage.clone();
        let name = name.clone();
        let fresh = tokio::task::spawn_blocking(move || storage.read(&name))
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Backend, format!("Storage read task failed: {}", e))
            })??;
        self.reconcile(fresh)
    }

    fn reconcile(&self, fresh: Option<Game>) -> Result<Self, ClashError> {
        let (name, game, side) = self.remote_parts()?;
        let fresh = fresh.ok_or(ClashError::GameNotFound)?;
        if fresh == *game {
            return Err(ClashError::NoChange);
        }
        debug!(%name, status = ?fresh.status(), "Remote game changed");
        Ok(self.with_state(ClashState::Remote {
            name: name.clone(),
            game: fresh,
            side: *side,
        }))
    }

    /// Ends the session and returns an unstarted one.
    ///
    /// When the owner of a remote game finishes, the record is deleted. The
    /// other side leaves the record alone.
    ///
    /// # Errors
    ///
    /// - [`ClashError::NotStarted`] before `new_game`/`join`.
    /// - [`ClashError::Storage`] if the owner's delete fails.
    #[instrument(skip(self), fields(state = self.label()))]
    pub fn finish(&self) -> Result<Self, ClashError> {
        match &self.state {
            ClashState::NotStarted => return Err(ClashError::NotStarted),
            ClashState::Local { .. } => {}
            ClashState::Remote { name, game, side } => {
                if side.color == game.owner() {
                    self.storage.delete(name)?;
                    info!(%name, "Remote game deleted by owner");
                }
            }
        }
        Ok(self.unstarted())
    }

    /// True when this side can act now: it holds the turn, or the game is
    /// over. Always false before a game starts.
    pub fn new_available(&self) -> bool {
        match (self.game(), self.side()) {
            (Some(game), Some(side)) => game.turn().is_none_or(|turn| turn == side.color),
            _ => false,
        }
    }

    /// Current game, if started.
    pub fn game(&self) -> Option<&Game> {
        match &self.state {
            ClashState::NotStarted => None,
            ClashState::Local { game, .. } | ClashState::Remote { game, .. } => Some(game),
        }
    }

    /// Acting side, if started.
    pub fn side(&self) -> Option<Side> {
        match &self.state {
            ClashState::NotStarted => None,
            ClashState::Local { side, .. } | ClashState::Remote { side, .. } => Some(*side),
        }
    }

    /// Record name of a remote session.
    pub fn name(&self) -> Option<&Name> {
        match &self.state {
            ClashState::Remote { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> &ClashState {
        &self.state
    }

    /// True once a game is started or joined.
    pub fn is_running(&self) -> bool {
        !matches!(self.state, ClashState::NotStarted)
    }

    /// True for sessions backed by storage.
    pub fn is_remote(&self) -> bool {
        matches!(self.state, ClashState::Remote { .. })
    }

    fn remote_parts(&self) -> Result<(&Name, &Game, &Side), ClashError> {
        match &self.state {
            ClashState::NotStarted => Err(ClashError::NotStarted),
            ClashState::Local { .. } => Err(ClashError::UnsupportedOnLocal),
            ClashState::Remote { name, game, side } => Ok((name, game, side)),
        }
    }

    fn persist(&self, name: &Name, game: &Game) -> Result<(), ClashError> {
        self.storage.update(name, game)?;
        debug!(%name, status = ?game.status(), "Remote game persisted");
        Ok(())
    }

    fn label(&self) -> &'static str {
        match self.state {
            ClashState::NotStarted => "not_started",
            ClashState::Local { .. } => "local",
            ClashState::Remote { .. } => "remote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;
    use strictly_reversi::GameStatus;

    fn clash() -> Clash {
        Clash::new(Arc::new(MemoryStorage::<Name, Game>::new()))
    }

    fn pos(s: &str) -> Position {
        s.parse().expect("valid position")
    }

    #[test]
    fn test_not_started_rejects_everything() {
        let c = clash();
        assert_eq!(c.play(pos("4C")).unwrap_err(), ClashError::NotStarted);
        assert_eq!(c.pass().unwrap_err(), ClashError::NotStarted);
        assert_eq!(c.targets(true).unwrap_err(), ClashError::NotStarted);
        assert_eq!(c.refresh().unwrap_err(), ClashError::NotStarted);
        assert_eq!(c.finish().unwrap_err(), ClashError::NotStarted);
        assert!(!c.new_available());
        assert!(!c.is_running());
    }

    #[test]
    fn test_local_game_plays_both_sides() {
        let c = clash().new_game(None, Color::Black).expect("local game");
        assert!(!c.is_remote());

        let c = c.play(pos("4C")).expect("black moves");
        let c = c.play(pos("3C")).expect("white moves in the same session");
        assert_eq!(
            c.game().map(Game::status),
            Some(GameStatus::Active(Color::Black))
        );
    }

    #[test]
    fn test_local_refresh_unsupported() {
        let c = clash().new_game(None, Color::Black).expect("local game");
        assert_eq!(c.refresh().unwrap_err(), ClashError::UnsupportedOnLocal);
    }

    #[test]
    fn test_targets_only_touches_side() {
        let c = clash().new_game(None, Color::White).expect("local game");
        let on = c.targets(true).expect("toggle");
        assert_eq!(on.side(), Some(Side::new(Color::White, true)));
        assert_eq!(on.game(), c.game());
        assert_eq!(c.side().map(|s| s.show_targets), Some(false));
    }

    #[test]
    fn test_failed_play_keeps_session() {
        let c = clash().new_game(None, Color::Black).expect("local game");
        let err = c.play(pos("1A")).unwrap_err();
        assert_eq!(err, ClashError::Game(strictly_reversi::GameError::IllegalMove(pos("1A"))));
        assert_eq!(c.game(), Some(&Game::new(Color::Black)));
    }

    #[test]
    fn test_local_finish_resets() {
        let c = clash().new_game(None, Color::Black).expect("local game");
        let done = c.finish().expect("finish");
        assert!(!done.is_running());
    }
}
