//! Append-only move traces.
//!
//! A trace is a JSON-lines stream: one snapshot of the level's full state
//! (explicit actor positions plus the two monotone flags), then one line
//! per applied turn. Replay rebuilds the level from the snapshot through
//! the engine's full-state construction form, re-applies every turn, and
//! insists each outcome matches what was recorded. Later snapshot lines
//! act as checkpoints and are verified the same way.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use warren_core::{Actor, InteractionResult, Level, LevelBuilder, LevelError, Point};

/// One applied turn: who moved where, and what came of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub actor: String,
    pub destination: Point,
    pub outcome: InteractionResult,
}

/// Full level state at a point in time, sufficient for the engine's
/// reconstruction form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub players: Vec<(Actor, Point)>,
    pub adversaries: Vec<(Actor, Point)>,
    pub exit_unlocked: bool,
    pub level_exited: bool,
}

impl SnapshotRecord {
    /// Captures the live registries and flags of a level.
    pub fn capture(level: &Level) -> Self {
        let located = |actor: &Actor| {
            level
                .find_actor(actor.name())
                .map(|position| (actor.clone(), position))
        };
        Self {
            players: level.live_players().filter_map(&located).collect(),
            adversaries: level.live_adversaries().filter_map(&located).collect(),
            exit_unlocked: level.exit_unlocked(),
            level_exited: level.level_exited(),
        }
    }
}

/// One line of a trace stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceEvent {
    Snapshot(SnapshotRecord),
    Turn(TurnRecord),
}

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("trace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("trace line {line} is malformed: {source}")]
    Malformed {
        line: usize,
        source: serde_json::Error,
    },

    #[error("trace does not begin with a snapshot")]
    MissingSnapshot,

    #[error("replaying {actor:?} -> {destination} produced {got}, trace says {want}")]
    OutcomeMismatch {
        actor: String,
        destination: Point,
        got: InteractionResult,
        want: InteractionResult,
    },

    #[error("checkpoint after {turns} turns does not match the replayed state")]
    CheckpointMismatch { turns: usize },

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Appends trace events to any sink, one JSON document per line.
pub struct TraceWriter<W: Write> {
    sink: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn snapshot(&mut self, snapshot: &SnapshotRecord) -> Result<(), TraceError> {
        self.event(&TraceEvent::Snapshot(snapshot.clone()))
    }

    pub fn turn(&mut self, turn: &TurnRecord) -> Result<(), TraceError> {
        self.event(&TraceEvent::Turn(turn.clone()))
    }

    pub fn event(&mut self, event: &TraceEvent) -> Result<(), TraceError> {
        let line = serde_json::to_string(event)?;
        writeln!(self.sink, "{line}")?;
        Ok(())
    }

    /// Hands the sink back, flushed.
    pub fn into_inner(mut self) -> Result<W, TraceError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Reads a full trace stream; blank lines are ignored.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceEvent>, TraceError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| TraceError::Malformed {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Replays a trace against a freshly built level.
///
/// `builder` supplies the level's components and items (as of the leading
/// snapshot); the snapshot itself supplies actor positions and flags. Every
/// recorded turn must reproduce its recorded outcome, and every checkpoint
/// snapshot must match the replayed state exactly.
pub fn replay(builder: LevelBuilder, events: &[TraceEvent]) -> Result<Level, TraceError> {
    let mut events = events.iter();
    let Some(TraceEvent::Snapshot(opening)) = events.next() else {
        return Err(TraceError::MissingSnapshot);
    };
    let mut level = builder.build_restored(
        opening.players.clone(),
        opening.adversaries.clone(),
        opening.exit_unlocked,
        opening.level_exited,
    )?;

    let mut turns = 0usize;
    for event in events {
        match event {
            TraceEvent::Turn(turn) => {
                let actor = level
                    .live_players()
                    .chain(level.live_adversaries())
                    .find(|actor| actor.name() == turn.actor)
                    .cloned()
                    .ok_or_else(|| LevelError::ActorNotLive {
                        name: turn.actor.clone(),
                    })?;

                let got = if actor.is_player() {
                    level.player_action(&actor, turn.destination)?
                } else {
                    level.adversary_action(&actor, turn.destination)?
                };
                if got != turn.outcome {
                    return Err(TraceError::OutcomeMismatch {
                        actor: turn.actor.clone(),
                        destination: turn.destination,
                        got,
                        want: turn.outcome,
                    });
                }
                turns += 1;
            }
            TraceEvent::Snapshot(checkpoint) => {
                if SnapshotRecord::capture(&level) != *checkpoint {
                    return Err(TraceError::CheckpointMismatch { turns });
                }
            }
        }
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_through_json_lines() {
        let snapshot = SnapshotRecord {
            players: vec![(Actor::player("ada"), Point::new(1, 1))],
            adversaries: vec![(Actor::ghost("casper"), Point::new(3, 1))],
            exit_unlocked: false,
            level_exited: false,
        };
        let turn = TurnRecord {
            actor: "ada".to_owned(),
            destination: Point::new(2, 1),
            outcome: InteractionResult::None,
        };

        let mut writer = TraceWriter::new(Vec::new());
        writer.snapshot(&snapshot).expect("encode snapshot");
        writer.turn(&turn).expect("encode turn");
        let bytes = writer.into_inner().expect("flush");

        let events = read_trace(bytes.as_slice()).expect("well-formed stream");
        assert_eq!(
            events,
            vec![TraceEvent::Snapshot(snapshot), TraceEvent::Turn(turn)]
        );
    }

    #[test]
    fn malformed_lines_report_their_line_number() {
        let stream = b"{\"turn\":{\"actor\":\"ada\"\n" as &[u8];
        let error = read_trace(stream).expect_err("truncated JSON");
        assert!(matches!(error, TraceError::Malformed { line: 1, .. }));
    }

    #[test]
    fn a_trace_must_open_with_a_snapshot() {
        let turn = TraceEvent::Turn(TurnRecord {
            actor: "ada".to_owned(),
            destination: Point::new(2, 1),
            outcome: InteractionResult::None,
        });
        let error = replay(Level::builder(), &[turn]).expect_err("no snapshot");
        assert!(matches!(error, TraceError::MissingSnapshot));
    }

    use warren_core::{Item, Room};

    fn level_builder() -> LevelBuilder {
        let mut builder = Level::builder();
        builder.add_room(Room::open(Point::ORIGIN, 5, 5).expect("valid extent"));
        builder.add_item(Item::key(Point::new(3, 0)));
        builder.add_item(Item::exit(Point::new(4, 4)));
        builder
    }

    #[test]
    fn recorded_games_replay_to_the_same_state() {
        // Play a short game, recording as we go.
        let mut level = level_builder()
            .build_restored(
                vec![(Actor::player("ada"), Point::new(1, 0))],
                vec![(Actor::ghost("casper"), Point::new(0, 4))],
                false,
                false,
            )
            .expect("positions are free");
        let ada = Actor::player("ada");
        let ghost = Actor::ghost("casper");

        let mut writer = TraceWriter::new(Vec::new());
        writer
            .snapshot(&SnapshotRecord::capture(&level))
            .expect("encode");

        let script: Vec<(Actor, Point)> = vec![
            (ada.clone(), Point::new(3, 0)),
            (ghost.clone(), Point::new(1, 4)),
            (ada.clone(), Point::new(3, 2)),
        ];
        for (actor, destination) in script {
            let outcome = if actor.is_player() {
                level.player_action(&actor, destination).expect("legal")
            } else {
                level.adversary_action(&actor, destination).expect("legal")
            };
            writer
                .turn(&TurnRecord {
                    actor: actor.name().to_owned(),
                    destination,
                    outcome,
                })
                .expect("encode");
        }
        // Closing checkpoint.
        writer
            .snapshot(&SnapshotRecord::capture(&level))
            .expect("encode");

        let bytes = writer.into_inner().expect("flush");
        let events = read_trace(bytes.as_slice()).expect("well-formed stream");

        let replayed = replay(level_builder(), &events).expect("faithful replay");
        assert_eq!(replayed, level);
        assert!(replayed.exit_unlocked(), "key pickup replayed");
    }

    #[test]
    fn tampered_outcomes_fail_the_replay() {
        let level = level_builder()
            .build_restored(
                vec![(Actor::player("ada"), Point::new(1, 0))],
                Vec::new(),
                false,
                false,
            )
            .expect("positions are free");

        let events = vec![
            TraceEvent::Snapshot(SnapshotRecord::capture(&level)),
            TraceEvent::Turn(TurnRecord {
                actor: "ada".to_owned(),
                destination: Point::new(3, 0),
                // The key tile yields FoundKey, not a plain step.
                outcome: InteractionResult::None,
            }),
        ];
        let error = replay(level_builder(), &events).expect_err("outcome lies");
        assert!(matches!(error, TraceError::OutcomeMismatch { .. }));
    }
}
