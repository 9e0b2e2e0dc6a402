use super::action::{CloudState, PbxState};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowFlags {
    pub allow_concurrent_calls: bool,
}

/// A complete state machine for the cloud call-flow engine.
///
/// `states` keeps the initial state first, then every other node in diagram order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudFlow {
    pub description: String,
    pub states: IndexMap<String, CloudState>,
    pub initial_state: String,
    pub flags: FlowFlags,
}

impl CloudFlow {
    pub fn initial(&self) -> Option<&CloudState> {
        self.states.get(&self.initial_state)
    }

    /// The provider payload as a JSON value.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// The PBX flavour of the state machine, before it is flattened into dialplan XML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PbxFlow {
    pub description: String,
    pub extension: String,
    pub context: String,
    pub states: IndexMap<String, PbxState>,
    pub initial_state: String,
}

impl PbxFlow {
    pub fn initial(&self) -> Option<&PbxState> {
        self.states.get(&self.initial_state)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
