//! Deterministic adversary move selection.
//!
//! Candidates are the four orthogonal neighbours; legality stays with the
//! engine (`check_valid_move` is the single source of truth), and selection
//! is a pure scoring pass: the candidate minimising Manhattan distance to
//! the nearest live player wins, ties going to the first candidate in
//! scan order. Given the same level state, the same move is always chosen.

use tracing::debug;

use warren_core::{Actor, AdversaryKind, Level, Point};

/// Picks the next move for an adversary, or `None` when it has no legal
/// move (or no players remain to chase).
///
/// Zombies are room-bound: hall cells are never selected for them. Ghosts
/// roam anywhere the engine allows.
pub fn plan_move(level: &Level, adversary: &Actor) -> Option<Point> {
    let kind = adversary.adversary_kind()?;
    let position = level.find_actor(adversary.name())?;

    let targets: Vec<Point> = level
        .live_players()
        .filter_map(|player| level.find_actor(player.name()))
        .collect();
    if targets.is_empty() {
        return None;
    }

    let mut best: Option<(Point, u32)> = None;
    for candidate in position.neighbors() {
        if !level.check_valid_move(adversary, candidate) {
            continue;
        }
        if kind == AdversaryKind::Zombie && level.in_hall(candidate) {
            continue;
        }

        let score = targets
            .iter()
            .map(|target| candidate.manhattan_distance(*target))
            .min()
            .unwrap_or(u32::MAX);
        debug!(
            adversary = adversary.name(),
            candidate = %candidate,
            score,
            "scored candidate"
        );

        // Strictly-less keeps the first best candidate: stable ordering.
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((candidate, score));
        }
    }

    let choice = best.map(|(candidate, _)| candidate);
    debug!(adversary = adversary.name(), choice = ?choice, "selected move");
    choice
}
