use super::state::{Action, ActionKind, State};
use crate::diagram::InputMode;
use serde::Serialize;

/// Action parameters understood by the cloud call-flow engine. Timeouts are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CloudAction {
    Say {
        say: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        voice: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Play {
        play: String,
    },
    Gather {
        timeout: u32,
        finish_on_key: String,
        num_digits: u32,
        input: InputMode,
    },
    Connect {
        timeout: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
    },
    Hangup {
        reason: String,
    },
    Record {
        max_length: u32,
        finish_on_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        play_beep: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        recording_status_callback: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        recording_status_callback_method: Option<String>,
    },
    SendMessage {
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
}

impl Action for CloudAction {
    fn kind(&self) -> ActionKind {
        match self {
            CloudAction::Say { .. } | CloudAction::Play { .. } => ActionKind::SayPlay,
            CloudAction::Gather { .. } => ActionKind::Gather,
            CloudAction::Connect { .. } => ActionKind::Connect,
            CloudAction::Hangup { .. } => ActionKind::Hangup,
            CloudAction::Record { .. } => ActionKind::RecordVoice,
            CloudAction::SendMessage { .. } => ActionKind::SendMessage,
        }
    }
}

/// Action parameters for the PBX dialplan. Timeouts are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PbxAction {
    Say {
        say: String,
    },
    Play {
        play: String,
    },
    Gather {
        timeout: u32,
        finish_on_key: String,
        min_digits: u32,
        max_digits: u32,
    },
    Connect {
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
    Hangup {
        reason: String,
    },
    Record {
        max_length: u32,
        finish_on_key: String,
        play_beep: bool,
    },
    SendMessage {
        #[serde(skip_serializing_if = "Option::is_none")]
        to: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
}

impl Action for PbxAction {
    fn kind(&self) -> ActionKind {
        match self {
            PbxAction::Say { .. } | PbxAction::Play { .. } => ActionKind::SayPlay,
            PbxAction::Gather { .. } => ActionKind::Gather,
            PbxAction::Connect { .. } => ActionKind::Connect,
            PbxAction::Hangup { .. } => ActionKind::Hangup,
            PbxAction::Record { .. } => ActionKind::RecordVoice,
            PbxAction::SendMessage { .. } => ActionKind::SendMessage,
        }
    }
}

pub type CloudState = State<CloudAction>;
pub type PbxState = State<PbxAction>;
