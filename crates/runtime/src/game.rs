//! Multi-level game sequencing.
//!
//! A [`GameManager`] owns the roster and an ordered list of levels, forwards
//! rule checks and turn actions to the current level, keeps per-player
//! scoring up to date from the returned interaction results, and advances
//! the cursor when a level is won. The roster cap and name uniqueness are
//! enforced here, above the engine.

use tracing::info;

use warren_content::LevelLoader;
use warren_core::{
    Actor, GameConfig, InteractionResult, Level, LevelError, LevelStatus, Point,
};

/// Whole-game outcome, as opposed to the per-level [`LevelStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Roster violations: the external cap the engine itself does not police.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("a game allows at most {max} players, got {got}")]
    TooManyPlayers { max: usize, got: usize },

    #[error("actor name {name:?} is used twice")]
    DuplicateName { name: String },

    #[error("{name:?} is not a player")]
    NotAPlayer { name: String },

    #[error("{name:?} is not an adversary")]
    NotAnAdversary { name: String },
}

/// Error raised by game-level operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("level description failed to load: {0}")]
    Content(#[from] anyhow::Error),

    #[error("a game needs at least one level")]
    NoLevels,

    #[error("the game is already over")]
    GameOver,

    #[error("no actor named {name:?} in this game")]
    UnknownActor { name: String },
}

/// Owns the roster and the ordered levels; the "current level" is the one
/// every rule-check call is forwarded to.
pub struct GameManager {
    players: Vec<Actor>,
    adversaries: Vec<Actor>,
    levels: Vec<Level>,
    current: usize,
    finished: Option<GameStatus>,
}

impl GameManager {
    /// Starts a game: validates the roster, then places every actor into
    /// the first level.
    pub fn new(
        levels: Vec<Level>,
        players: Vec<Actor>,
        adversaries: Vec<Actor>,
    ) -> Result<Self, GameError> {
        if levels.is_empty() {
            return Err(GameError::NoLevels);
        }
        validate_roster(&players, &adversaries)?;

        let mut manager = Self {
            players,
            adversaries,
            levels,
            current: 0,
            finished: None,
        };
        manager.enter_level(0)?;
        Ok(manager)
    }

    /// Starts a game from RON level descriptions, in order.
    pub fn from_descriptions(
        descriptions: &[&str],
        players: Vec<Actor>,
        adversaries: Vec<Actor>,
    ) -> Result<Self, GameError> {
        let levels = descriptions
            .iter()
            .map(|description| LevelLoader::from_str(description))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels, players, adversaries)
    }

    fn enter_level(&mut self, index: usize) -> Result<(), GameError> {
        self.current = index;
        self.levels[index].place_actors(self.players.clone(), self.adversaries.clone())?;
        info!(level = index, "entered level");
        Ok(())
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    /// Zero-based index of the level currently in play.
    pub fn level_index(&self) -> usize {
        self.current
    }

    /// The roster with up-to-date scoring counters.
    pub fn players(&self) -> &[Actor] {
        &self.players
    }

    pub fn adversaries(&self) -> &[Actor] {
        &self.adversaries
    }

    pub fn status(&self) -> GameStatus {
        self.finished.unwrap_or(GameStatus::Playing)
    }

    fn roster_actor(&self, name: &str) -> Result<Actor, GameError> {
        self.players
            .iter()
            .chain(self.adversaries.iter())
            .find(|actor| actor.name() == name)
            .cloned()
            .ok_or_else(|| GameError::UnknownActor {
                name: name.to_owned(),
            })
    }

    /// Forwards a legality check to the current level.
    pub fn check_valid_move(&self, name: &str, destination: Point) -> bool {
        self.roster_actor(name)
            .map(|actor| self.levels[self.current].check_valid_move(&actor, destination))
            .unwrap_or(false)
    }

    /// Applies a player's move on the current level and settles scoring.
    pub fn player_move(
        &mut self,
        name: &str,
        destination: Point,
    ) -> Result<InteractionResult, GameError> {
        if self.finished.is_some() {
            return Err(GameError::GameOver);
        }
        let actor = self.roster_actor(name)?;
        if !actor.is_player() {
            return Err(RosterError::NotAPlayer {
                name: name.to_owned(),
            }
            .into());
        }

        let outcome = self.levels[self.current].player_action(&actor, destination)?;
        match outcome {
            InteractionResult::FoundKey => {
                self.bump(name, |p| p.keys_found += 1);
                info!(player = name, "found the key");
            }
            InteractionResult::Exit => {
                self.bump(name, |p| p.exits_reached += 1);
                info!(player = name, "reached the exit");
            }
            InteractionResult::RemovePlayer => {
                self.bump(name, |p| p.times_ejected += 1);
                info!(player = name, "was ejected");
            }
            _ => {}
        }

        self.settle_level()?;
        Ok(outcome)
    }

    /// Applies an adversary's move on the current level; an ejected victim
    /// is scored against the roster.
    pub fn adversary_move(
        &mut self,
        name: &str,
        destination: Point,
    ) -> Result<InteractionResult, GameError> {
        if self.finished.is_some() {
            return Err(GameError::GameOver);
        }
        let actor = self.roster_actor(name)?;
        if actor.is_player() {
            return Err(RosterError::NotAnAdversary {
                name: name.to_owned(),
            }
            .into());
        }

        let live_before: Vec<String> = self.levels[self.current]
            .live_players()
            .map(|player| player.name().to_owned())
            .collect();

        let outcome = self.levels[self.current].adversary_action(&actor, destination)?;

        if outcome == InteractionResult::RemovePlayer {
            let level = &self.levels[self.current];
            let victims: Vec<String> = live_before
                .into_iter()
                .filter(|victim| level.live_players().all(|p| p.name() != victim.as_str()))
                .collect();
            for victim in &victims {
                self.bump(victim, |p| p.times_ejected += 1);
                info!(player = victim.as_str(), by = name, "was ejected");
            }
        }

        self.settle_level()?;
        Ok(outcome)
    }

    fn bump(&mut self, name: &str, update: impl FnOnce(&mut warren_core::PlayerProgress)) {
        if let Some(Actor::Player { progress, .. }) = self
            .players
            .iter_mut()
            .find(|actor| actor.name() == name)
        {
            update(progress);
        }
    }

    /// Advances past a finished level: the next level starts with the full
    /// roster re-placed, a lost level ends the game.
    fn settle_level(&mut self) -> Result<(), GameError> {
        match self.levels[self.current].status() {
            LevelStatus::Active => Ok(()),
            LevelStatus::Won => {
                info!(level = self.current, "level won");
                if self.current + 1 < self.levels.len() {
                    self.enter_level(self.current + 1)
                } else {
                    self.finished = Some(GameStatus::Won);
                    info!("game won");
                    Ok(())
                }
            }
            LevelStatus::Lost => {
                info!(level = self.current, "level lost");
                self.finished = Some(GameStatus::Lost);
                Ok(())
            }
        }
    }
}

fn validate_roster(players: &[Actor], adversaries: &[Actor]) -> Result<(), RosterError> {
    if players.is_empty() {
        return Err(RosterError::NoPlayers);
    }
    if players.len() > GameConfig::MAX_PLAYERS {
        return Err(RosterError::TooManyPlayers {
            max: GameConfig::MAX_PLAYERS,
            got: players.len(),
        });
    }
    for player in players {
        if !player.is_player() {
            return Err(RosterError::NotAPlayer {
                name: player.name().to_owned(),
            });
        }
    }
    for adversary in adversaries {
        if adversary.is_player() {
            return Err(RosterError::NotAnAdversary {
                name: adversary.name().to_owned(),
            });
        }
    }

    let mut seen: Vec<&str> = Vec::new();
    for actor in players.iter().chain(adversaries) {
        if seen.contains(&actor.name()) {
            return Err(RosterError::DuplicateName {
                name: actor.name().to_owned(),
            });
        }
        seen.push(actor.name());
    }
    Ok(())
}
