//! Boundary events delivered by the external physics/spatial layer.
//!
//! The simulation core never does collision math of its own: it consumes
//! discrete "overlap began / overlap ended" notifications tagged with what
//! was touched. Everything spatial beyond these events is out of scope.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ConsumableId};

/// What an agent came into contact with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapTarget {
    /// An arena boundary wall.
    Wall,
    /// A sustained consumable (food or water patch).
    Consumable(ConsumableId),
    /// Another creature, same or opposite species.
    Creature(AgentId),
}

/// Whether the contact started or stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPhase {
    /// The two bodies began touching this tick.
    Began,
    /// The two bodies stopped touching this tick.
    Ended,
}

/// One discrete contact notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapEvent {
    /// The agent this event belongs to.
    pub agent: AgentId,
    /// What the agent touched.
    pub target: OverlapTarget,
    /// Began or ended.
    pub phase: OverlapPhase,
}
