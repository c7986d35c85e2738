//! Change packets - the only channel for mutating battle state.
//!
//! Effects never touch units directly. They describe what should happen as
//! `ChangePacket`s, group them into a `ChangeBatch` per logical step, and
//! hand the batch to a state boundary. A batch is committed atomically and
//! is also the unit of replication: it encodes to bytes and replays
//! deterministically on any state holding the same creature registry.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BattleHex, BattleSide, UnitId};
use crate::error::PacketError;
use crate::units::{CreatureId, TimedStatus, UnitInfo};

/// Everything needed to create a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUnitInfo {
    /// Id of the new unit (taken from the battle's next free id).
    pub id: UnitId,
    /// Creature type.
    pub creature: CreatureId,
    /// Stack size.
    pub count: i64,
    /// Side the unit fights for.
    pub side: BattleSide,
    /// Hex to place it on.
    pub position: BattleHex,
    /// Created by a spell rather than present from the start.
    pub summoned: bool,
}

/// One state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangePacket {
    /// Place a new unit.
    UnitCreated(NewUnitInfo),
    /// Take a unit off the battlefield.
    UnitRemoved { id: UnitId },
    /// Replace a unit's mutable state.
    UnitChanged(UnitInfo),
    /// Attach timed statuses to a unit.
    StatusAdded { id: UnitId, statuses: Vec<TimedStatus> },
}

impl ChangePacket {
    /// Unit the packet is about.
    #[must_use]
    pub fn unit_id(&self) -> UnitId {
        match self {
            ChangePacket::UnitCreated(info) => info.id,
            ChangePacket::UnitRemoved { id } => *id,
            ChangePacket::UnitChanged(info) => info.id,
            ChangePacket::StatusAdded { id, .. } => *id,
        }
    }
}

/// Ordered packets committed as one step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBatch {
    packets: SmallVec<[ChangePacket; 2]>,
}

impl ChangeBatch {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch holding a single packet.
    #[must_use]
    pub fn single(packet: ChangePacket) -> Self {
        let mut batch = Self::new();
        batch.push(packet);
        batch
    }

    /// Append a packet.
    pub fn push(&mut self, packet: ChangePacket) {
        self.packets.push(packet);
    }

    /// Iterate over packets in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangePacket> {
        self.packets.iter()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Number of packets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// Encode for the wire.
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a batch received from the wire.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl FromIterator<ChangePacket> for ChangeBatch {
    fn from_iter<I: IntoIterator<Item = ChangePacket>>(iter: I) -> Self {
        Self {
            packets: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ChangeBatch {
    type Item = ChangePacket;
    type IntoIter = smallvec::IntoIter<[ChangePacket; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.into_iter()
    }
}
