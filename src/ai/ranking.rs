//! Ranking candidate attacks.

use std::cmp::Reverse;

use tracing::warn;

use super::attack::{AttackInfo, AttackPossibility};
use crate::battle::BattleQuery;
use crate::core::BattleHex;

/// Evaluate every candidate and return them best first.
///
/// Candidates with equal `attack_value` keep their input order. Candidates
/// that cannot be evaluated (a unit is gone) are logged and dropped.
pub fn rank_attacks(
    query: &dyn BattleQuery,
    candidates: impl IntoIterator<Item = (AttackInfo, BattleHex)>,
) -> Vec<AttackPossibility> {
    let mut ranked: Vec<_> = candidates
        .into_iter()
        .filter_map(|(attack, tile)| match AttackPossibility::evaluate(query, &attack, tile) {
            Ok(possibility) => Some(possibility),
            Err(err) => {
                warn!(%err, %tile, "Skipping attack candidate");
                None
            }
        })
        .collect();

    ranked.sort_by_key(|possibility| Reverse(possibility.attack_value()));
    ranked
}
