use crate::defaults::DEFAULTS;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Strongly typed properties, one variant per recognised node type.
///
/// The editor stores properties as an open JSON bag. They are validated and defaulted once, when
/// the node is built, so translators never deal with missing or mistyped fields.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    AnswerCall,
    PlayMessage(PlayMessage),
    GatherInput(GatherInput),
    ForwardToPhone(ForwardToPhone),
    HangUp(HangUp),
    Recording(Recording),
    SendSms(SendSms),
    IvrMenu(IvrMenuProperties),
    /// Any type the compiler has no dedicated translation for. The raw bag is kept so later
    /// passes can still look at fields such as `extension`.
    Other(Map<String, Value>),
}

impl NodeKind {
    /// Parses a raw property bag for the given type tag. Never fails.
    pub fn from_properties(node_id: &str, node_type: &str, properties: &Map<String, Value>) -> Self {
        let props = Props(properties);
        match node_type {
            "answer-call" => NodeKind::AnswerCall,
            "play-message" | "play-audio-tts" => NodeKind::PlayMessage(PlayMessage::parse(&props)),
            "gather-input" => NodeKind::GatherInput(GatherInput::parse(node_id, &props)),
            "forward-to-phone" => NodeKind::ForwardToPhone(ForwardToPhone::parse(&props)),
            "hang-up" | "hang-up-call" => NodeKind::HangUp(HangUp::parse(&props)),
            "start-call-recording" => {
                NodeKind::Recording(Recording::parse(RecordingMode::Call, &props))
            }
            "voicemail-recording" | "record-voice" | "record-voicemail" => {
                NodeKind::Recording(Recording::parse(RecordingMode::Voicemail, &props))
            }
            "send-sms" | "send-message" => NodeKind::SendSms(SendSms::parse(&props)),
            "ivr-menu" => NodeKind::IvrMenu(IvrMenuProperties::parse(node_id, &props)),
            _ => NodeKind::Other(properties.clone()),
        }
    }

    /// The type tag used when a node is built directly from a kind.
    pub fn canonical_type(&self) -> &'static str {
        match self {
            NodeKind::AnswerCall => "answer-call",
            NodeKind::PlayMessage(_) => "play-audio-tts",
            NodeKind::GatherInput(_) => "gather-input",
            NodeKind::ForwardToPhone(_) => "forward-to-phone",
            NodeKind::HangUp(_) => "hang-up-call",
            NodeKind::Recording(r) => match r.mode {
                RecordingMode::Call => "start-call-recording",
                RecordingMode::Voicemail => "voicemail-recording",
            },
            NodeKind::SendSms(_) => "send-sms",
            NodeKind::IvrMenu(_) => "ivr-menu",
            NodeKind::Other(_) => "unknown-passthrough",
        }
    }
}

/// What a play node should say or play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Tts(String),
    Audio(String),
    /// The message type was missing, unrecognised, or its payload was empty.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayMessage {
    pub message: Message,
    pub voice: Option<String>,
    pub language: String,
}

impl PlayMessage {
    fn parse(props: &Props) -> Self {
        let message = match props.text("messageType").as_deref() {
            Some("tts") => props.text("messageText").map_or(Message::None, Message::Tts),
            Some("audio") => props.text("audioFile").map_or(Message::None, Message::Audio),
            _ => Message::None,
        };
        Self {
            message,
            voice: props.text("voice"),
            language: props
                .text("language")
                .unwrap_or_else(|| DEFAULTS.speech.language.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Dtmf,
    Speech,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherInput {
    pub input: InputMode,
    pub min_digits: u32,
    pub max_digits: u32,
    pub timeout_secs: u32,
    pub finish_on_key: String,
    pub menu_options: Vec<RawMenuOption>,
}

impl GatherInput {
    fn parse(node_id: &str, props: &Props) -> Self {
        let defaults = DEFAULTS.gather;
        let input = match props.text("inputType").as_deref() {
            Some("speech") => InputMode::Speech,
            _ => InputMode::Dtmf,
        };
        Self {
            input,
            min_digits: props.positive("minDigits").unwrap_or(defaults.min_digits),
            max_digits: props.positive("maxDigits").unwrap_or(defaults.max_digits),
            timeout_secs: props.positive("timeout").unwrap_or(defaults.timeout_secs),
            finish_on_key: props
                .text("finishOnKey")
                .unwrap_or_else(|| defaults.finish_on_key.to_string()),
            menu_options: parse_menu_options(node_id, props.0.get("menuOptions")),
        }
    }

    /// A gather node carrying menu options is a candidate anchor for an IVR menu.
    pub fn has_menu(&self) -> bool {
        !self.menu_options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardToPhone {
    pub phone_number: Option<String>,
    pub caller_id: Option<String>,
    pub timeout_secs: u32,
}

impl ForwardToPhone {
    fn parse(props: &Props) -> Self {
        Self {
            phone_number: props.text("phoneNumber"),
            caller_id: props.text("callerId"),
            timeout_secs: props
                .positive("timeout")
                .unwrap_or(DEFAULTS.forward.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HangUp {
    pub reason: String,
}

impl HangUp {
    fn parse(props: &Props) -> Self {
        Self {
            reason: props
                .text("reason")
                .unwrap_or_else(|| DEFAULTS.hang_up.reason.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
    /// Records the live call (`start-call-recording`).
    Call,
    /// Records a message left by the caller.
    Voicemail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub mode: RecordingMode,
    pub max_duration_secs: u32,
    pub finish_on_key: String,
    pub play_beep: bool,
}

impl Recording {
    fn parse(mode: RecordingMode, props: &Props) -> Self {
        let defaults = DEFAULTS.recording;
        Self {
            mode,
            max_duration_secs: props
                .positive("maxDuration")
                .unwrap_or(defaults.max_duration_secs),
            finish_on_key: props
                .text("finishOnKey")
                .unwrap_or_else(|| defaults.finish_on_key.to_string()),
            play_beep: props.flag("playBeep").unwrap_or(defaults.play_beep),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    pub phone_number: Option<String>,
    pub message: Option<String>,
}

impl SendSms {
    fn parse(props: &Props) -> Self {
        Self {
            phone_number: props.text("phoneNumber"),
            message: props.text("message"),
        }
    }
}

/// Properties of an explicit `ivr-menu` node.
///
/// Fields stay optional here: their defaults depend on the deployment (menu name, extension)
/// and are filled in by the menu extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IvrMenuProperties {
    pub extension: Option<String>,
    pub context: Option<String>,
    pub greet_long: Option<String>,
    pub greet_short: Option<String>,
    pub timeout_ms: Option<u32>,
    pub exit_action: Option<String>,
    pub direct_dial: Option<bool>,
    pub ring_back: Option<String>,
    pub caller_id_name_prefix: Option<String>,
    pub enabled: Option<bool>,
    pub description: Option<String>,
    pub menu_options: Vec<RawMenuOption>,
}

impl IvrMenuProperties {
    fn parse(node_id: &str, props: &Props) -> Self {
        Self {
            extension: props.text("extension"),
            context: props.text("context"),
            greet_long: props.text("greetLong"),
            greet_short: props.text("greetShort"),
            timeout_ms: props.positive("timeout"),
            exit_action: props.text("exitAction"),
            direct_dial: props.flag("directDial"),
            ring_back: props.text("ringBack"),
            caller_id_name_prefix: props.text("callerIdNamePrefix"),
            enabled: props.flag("enabled"),
            description: props.text("description"),
            menu_options: parse_menu_options(node_id, props.0.get("menuOptions")),
        }
    }
}

/// One entry of a `menuOptions` list.
///
/// Two shapes exist in the wild: `{key, label, value}` from gather nodes and
/// `{option, destination, order, description, enabled}` from explicit menu nodes. Both are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMenuOption {
    pub key: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub option: Option<String>,
    pub destination: Option<String>,
    pub order: Option<u32>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

impl RawMenuOption {
    fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let props = Props(object);
        Self {
            key: props.text("key"),
            label: props.text("label"),
            value: props.text("value"),
            option: props.text("option"),
            destination: props.text("destination"),
            order: props.integer("order"),
            description: props.text("description"),
            enabled: props.flag("enabled"),
        }
    }

    /// True when an edge label selects this option.
    pub fn matches_label(&self, label: &str) -> bool {
        [&self.value, &self.key, &self.label]
            .into_iter()
            .any(|candidate| candidate.as_deref() == Some(label))
    }
}

/// Parses a `menuOptions` property that is either a JSON array or a JSON-encoded string.
///
/// Malformed input is logged and treated as "no options"; it never fails the compile.
pub fn parse_menu_options(node_id: &str, raw: Option<&Value>) -> Vec<RawMenuOption> {
    let items = match raw {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(text)) if text.trim().is_empty() => Vec::new(),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                warn!(node_id, found = %json_type(&other), "menuOptions is not a JSON array, ignoring it");
                Vec::new()
            }
            Err(e) => {
                let excerpt: String = text.chars().take(200).collect();
                warn!(node_id, error = %e, raw = %excerpt, "Failed to parse menuOptions as JSON");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };
    items.iter().map(RawMenuOption::from_value).collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lenient accessors over a raw property bag.
///
/// Empty strings and non-positive numbers count as unset, matching how the editor treats them.
struct Props<'a>(&'a Map<String, Value>);

impl Props<'_> {
    fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn number(&self, key: &str) -> Option<f64> {
        let number = match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.filter(|n| n.is_finite())
    }

    fn positive(&self, key: &str) -> Option<u32> {
        self.number(key)
            .filter(|n| *n > 0.0)
            .map(|n| n.round().min(u32::MAX as f64) as u32)
    }

    fn integer(&self, key: &str) -> Option<u32> {
        self.number(key)
            .filter(|n| *n >= 0.0)
            .map(|n| n.round().min(u32::MAX as f64) as u32)
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn gather_defaults_apply_to_missing_fields() {
        let kind = NodeKind::from_properties("g", "gather-input", &Map::new());
        let NodeKind::GatherInput(gather) = kind else {
            panic!("expected gather-input");
        };
        assert_eq!(gather.timeout_secs, 5);
        assert_eq!(gather.finish_on_key, "#");
        assert_eq!(gather.max_digits, 10);
        assert!(!gather.has_menu());
    }

    #[test]
    fn menu_options_accept_encoded_strings() {
        let raw = json!(r#"[{"key":"1","label":"Sales","value":"1001"}]"#);
        let options = parse_menu_options("g", Some(&raw));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].key.as_deref(), Some("1"));
        assert!(options[0].matches_label("1001"));
        assert!(options[0].matches_label("Sales"));
    }

    #[test]
    fn malformed_menu_options_are_empty() {
        let raw = json!("{not json");
        assert!(parse_menu_options("g", Some(&raw)).is_empty());
        let object = json!(r#"{"key":"1"}"#);
        assert!(parse_menu_options("g", Some(&object)).is_empty());
    }

    #[test]
    fn numeric_keys_are_stringified() {
        let raw = json!([{ "key": 2, "order": 0 }]);
        let options = parse_menu_options("g", Some(&raw));
        assert_eq!(options[0].key.as_deref(), Some("2"));
        assert_eq!(options[0].order, Some(0));
    }

    #[test]
    fn play_message_without_payload_has_no_message() {
        let kind = NodeKind::from_properties(
            "p",
            "play-audio-tts",
            &bag(json!({ "messageType": "tts", "messageText": "" })),
        );
        let NodeKind::PlayMessage(play) = kind else {
            panic!("expected play message");
        };
        assert_eq!(play.message, Message::None);
        assert_eq!(play.language, "en-US");
    }

    #[test]
    fn recording_honours_explicit_false_beep() {
        let kind = NodeKind::from_properties(
            "r",
            "voicemail-recording",
            &bag(json!({ "playBeep": false, "maxDuration": "60" })),
        );
        let NodeKind::Recording(recording) = kind else {
            panic!("expected recording");
        };
        assert!(!recording.play_beep);
        assert_eq!(recording.max_duration_secs, 60);
        assert_eq!(recording.mode, RecordingMode::Voicemail);
    }

    #[test]
    fn unknown_types_keep_their_bag() {
        let kind = NodeKind::from_properties("c", "conditions", &bag(json!({ "extension": "2000" })));
        assert_eq!(kind, NodeKind::Other(bag(json!({ "extension": "2000" }))));
    }
}
