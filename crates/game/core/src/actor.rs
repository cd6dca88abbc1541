use std::fmt;

use strum::Display;

use crate::entity::EntityType;

/// The two adversary breeds. Their movement rules are identical inside the
/// engine; drivers differentiate them when choosing moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdversaryKind {
    Ghost,
    Zombie,
}

/// Per-player scoring counters.
///
/// The engine never mutates these; the sequencer that owns the roster
/// updates them from returned interaction results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProgress {
    pub keys_found: u32,
    pub exits_reached: u32,
    pub times_ejected: u32,
}

/// A participant in a level: player-controlled or AI-controlled.
///
/// Identity is the name. Two actors sharing a name are the same actor, and
/// names are unique within a game; every registry lookup in the engine goes
/// through [`Actor::name`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actor {
    Player {
        name: String,
        progress: PlayerProgress,
    },
    Adversary {
        name: String,
        kind: AdversaryKind,
    },
}

impl Actor {
    pub fn player(name: impl Into<String>) -> Self {
        Self::Player {
            name: name.into(),
            progress: PlayerProgress::default(),
        }
    }

    pub fn ghost(name: impl Into<String>) -> Self {
        Self::Adversary {
            name: name.into(),
            kind: AdversaryKind::Ghost,
        }
    }

    pub fn zombie(name: impl Into<String>) -> Self {
        Self::Adversary {
            name: name.into(),
            kind: AdversaryKind::Zombie,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Actor::Player { name, .. } | Actor::Adversary { name, .. } => name,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Actor::Player { .. })
    }

    pub fn adversary_kind(&self) -> Option<AdversaryKind> {
        match self {
            Actor::Player { .. } => None,
            Actor::Adversary { kind, .. } => Some(*kind),
        }
    }

    /// The tag this actor projects onto the tile it occupies.
    pub fn entity_type(&self) -> EntityType {
        match self {
            Actor::Player { .. } => EntityType::Player,
            Actor::Adversary {
                kind: AdversaryKind::Ghost,
                ..
            } => EntityType::Ghost,
            Actor::Adversary {
                kind: AdversaryKind::Zombie,
                ..
            } => EntityType::Zombie,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Player { name, .. } => write!(f, "player {name:?}"),
            Actor::Adversary { name, kind } => write!(f, "{kind} {name:?}"),
        }
    }
}
