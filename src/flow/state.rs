use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The target-side action family a state performs. Serialised as the state's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    SayPlay,
    Gather,
    Hangup,
    Connect,
    RecordVoice,
    SendMessage,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SayPlay => "say-play",
            ActionKind::Gather => "gather",
            ActionKind::Hangup => "hangup",
            ActionKind::Connect => "connect",
            ActionKind::RecordVoice => "record-voice",
            ActionKind::SendMessage => "send-message",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Implemented by the per-target action payloads.
pub trait Action: Serialize {
    fn kind(&self) -> ActionKind;
}

/// Named outcomes of a state mapped to the next state id, or `None` when the outcome leads
/// nowhere. Every outcome a node type defines is present, even when unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transitions(IndexMap<String, Option<String>>);

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, outcome: &str, target: Option<&str>) -> Self {
        self.0
            .insert(outcome.to_string(), target.map(str::to_string));
        self
    }

    /// The resolved target of `outcome`; `None` both for unknown and for unresolved outcomes.
    pub fn get(&self, outcome: &str) -> Option<&str> {
        self.0.get(outcome).and_then(|t| t.as_deref())
    }

    pub fn defines(&self, outcome: &str) -> bool {
        self.0.contains_key(outcome)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Resolved targets in outcome order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.values().filter_map(|t| t.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One compiled step of a flow, keyed by the id of the node it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State<A> {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub name: String,
    pub transitions: Transitions,
    pub properties: A,
}

impl<A: Action> State<A> {
    pub fn new(name: impl Into<String>, transitions: Transitions, action: A) -> Self {
        Self {
            kind: action.kind(),
            name: name.into(),
            transitions,
            properties: action,
        }
    }
}
