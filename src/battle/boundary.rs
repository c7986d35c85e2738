//! State-mutation boundaries.
//!
//! Effects apply their changes through a `StateBoundary`. The boundary
//! decides what committing means:
//!
//! - `ServerBoundary` commits to the authoritative `BattleState` and queues
//!   every committed batch in an outbox for network sync.
//! - `RecordingBoundary` plays the batches forward on a private hypothetical
//!   copy and records them, so they can be inspected or replayed later.
//!
//! Both collect the diagnostics effects report through `complain` and log
//! them as errors.

use tracing::error;

use super::packets::ChangeBatch;
use super::query::BattleQuery;
use crate::core::BattleState;
use crate::error::ApplyError;

/// Where effects send their change batches.
pub trait StateBoundary {
    /// Current view of the battle, including everything committed so far.
    fn battle(&self) -> &dyn BattleQuery;

    /// Commit a batch atomically.
    fn apply(&mut self, batch: ChangeBatch) -> Result<(), ApplyError>;

    /// Report an apply-stage failure.
    fn complain(&mut self, message: &str);

    /// Commit a batch, reporting a failure through `complain`.
    ///
    /// Returns true if the batch was committed.
    fn commit(&mut self, batch: ChangeBatch) -> bool {
        match self.apply(batch) {
            Ok(()) => true,
            Err(err) => {
                self.complain(&format!("Change batch rejected: {err}"));
                false
            }
        }
    }
}

/// Boundary that commits to the authoritative battle.
pub struct ServerBoundary<'a> {
    state: &'a mut BattleState,
    outbox: Vec<ChangeBatch>,
    diagnostics: Vec<String>,
}

impl<'a> ServerBoundary<'a> {
    /// Wrap the authoritative battle state.
    pub fn new(state: &'a mut BattleState) -> Self {
        Self {
            state,
            outbox: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The battle being mutated.
    #[must_use]
    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Batches committed so far, waiting to be sent to clients.
    #[must_use]
    pub fn outbox(&self) -> &[ChangeBatch] {
        &self.outbox
    }

    /// Take the queued batches, leaving the outbox empty.
    pub fn drain_outbox(&mut self) -> Vec<ChangeBatch> {
        std::mem::take(&mut self.outbox)
    }

    /// Complaints received so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

impl StateBoundary for ServerBoundary<'_> {
    fn battle(&self) -> &dyn BattleQuery {
        &*self.state
    }

    fn apply(&mut self, batch: ChangeBatch) -> Result<(), ApplyError> {
        self.state.apply_batch(&batch)?;
        self.outbox.push(batch);
        Ok(())
    }

    fn complain(&mut self, message: &str) {
        error!(complaint = message, "Server boundary complaint");
        self.diagnostics.push(message.to_owned());
    }
}

/// Boundary that records batches against a hypothetical copy of the battle.
#[derive(Clone, Debug)]
pub struct RecordingBoundary {
    state: BattleState,
    recorded: Vec<ChangeBatch>,
    diagnostics: Vec<String>,
}

impl RecordingBoundary {
    /// Start recording from the current state of `battle`.
    #[must_use]
    pub fn new(battle: &BattleState) -> Self {
        Self {
            state: battle.hypothetical(),
            recorded: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The hypothetical battle with all recorded batches applied.
    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Recorded batches in commit order.
    #[must_use]
    pub fn recorded(&self) -> &[ChangeBatch] {
        &self.recorded
    }

    /// Complaints received so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Replay the recorded batches onto another battle, in order.
    ///
    /// Stops at the first batch that does not apply.
    pub fn replay_onto(&self, target: &mut BattleState) -> Result<(), ApplyError> {
        for batch in &self.recorded {
            target.apply_batch(batch)?;
        }
        Ok(())
    }

    /// Consume the boundary, keeping the recorded batches.
    #[must_use]
    pub fn into_recorded(self) -> Vec<ChangeBatch> {
        self.recorded
    }
}

impl StateBoundary for RecordingBoundary {
    fn battle(&self) -> &dyn BattleQuery {
        &self.state
    }

    fn apply(&mut self, batch: ChangeBatch) -> Result<(), ApplyError> {
        self.state.apply_batch(&batch)?;
        self.recorded.push(batch);
        Ok(())
    }

    fn complain(&mut self, message: &str) {
        error!(complaint = message, "Recording boundary complaint");
        self.diagnostics.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::battle::ChangePacket;
    use crate::core::{BattleConfig, BattleHex, BattleSide, PlayerColor, SideMap, UnitId};
    use crate::units::{CreatureDefinition, CreatureId, CreatureRegistry};

    fn battle() -> BattleState {
        let mut registry = CreatureRegistry::new();
        registry.register(CreatureDefinition::new(CreatureId::new(1), "Gremlin", 1).with_health(4));
        let mut state = BattleState::new(
            BattleConfig::default(),
            Arc::new(registry),
            SideMap::new(|side| PlayerColor::new(side.index() as u8)),
        );
        state
            .add_unit(CreatureId::new(1), 10, BattleSide::Attacker, BattleHex::new(1, 0))
            .unwrap();
        state
    }

    #[test]
    fn test_server_commits_and_queues() {
        let mut state = battle();
        let mut boundary = ServerBoundary::new(&mut state);

        assert!(boundary.commit(ChangeBatch::single(ChangePacket::UnitRemoved { id: UnitId::new(0) })));

        assert_eq!(boundary.outbox().len(), 1);
        assert!(boundary.battle().unit(UnitId::new(0)).is_none());
        assert_eq!(boundary.drain_outbox().len(), 1);
        assert!(boundary.outbox().is_empty());
    }

    #[test]
    fn test_rejected_batch_is_a_complaint() {
        let mut state = battle();
        let mut boundary = ServerBoundary::new(&mut state);

        assert!(!boundary.commit(ChangeBatch::single(ChangePacket::UnitRemoved { id: UnitId::new(5) })));

        assert!(boundary.outbox().is_empty());
        assert_eq!(boundary.diagnostics().len(), 1);
        assert!(boundary.diagnostics()[0].contains("Unit(5)"));
    }

    #[test]
    fn test_recording_leaves_original_untouched() {
        let mut state = battle();
        let mut boundary = RecordingBoundary::new(&state);

        assert!(boundary.commit(ChangeBatch::single(ChangePacket::UnitRemoved { id: UnitId::new(0) })));

        assert!(boundary.state().unit(UnitId::new(0)).is_none());
        assert!(state.unit(UnitId::new(0)).is_some());

        boundary.replay_onto(&mut state).unwrap();
        assert!(state.unit(UnitId::new(0)).is_none());
    }
}
