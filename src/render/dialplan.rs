use crate::flow::{PbxAction, PbxFlow};
use std::fmt::{self, Write};
use uuid::Uuid;

const RECORDING_PATH: &str =
    "/var/lib/freeswitch/recordings/${uuid}_${strftime(%Y%m%d_%H%M%S)}.wav";

/// Builds the `destination_number` condition for a phone number or extension.
///
/// Formatting characters are stripped and the result must match either with an optional
/// leading `+` or as the bare sequence: `+1 (555) 123-4567` → `^\+?15551234567$|^15551234567$`.
pub fn destination_pattern(number: &str) -> String {
    let normalized: String = number
        .chars()
        .filter(|c| !matches!(c, '+' | '-' | '(' | ')' | '.') && !c.is_whitespace())
        .collect();
    let escaped = regex::escape(&normalized);
    format!(r"^\+?{0}$|^{0}$", escaped)
}

/// A single dialplan line inside the extension's condition block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialplanAction {
    Application {
        name: &'static str,
        data: Option<String>,
    },
    Comment(String),
}

impl DialplanAction {
    fn app(name: &'static str) -> Self {
        DialplanAction::Application { name, data: None }
    }

    fn app_with(name: &'static str, data: String) -> Self {
        DialplanAction::Application {
            name,
            data: Some(data),
        }
    }

    /// The dialplan line for one compiled state. Transitions are not representable here and
    /// are dropped: states run in sequence.
    pub fn from_state(action: &PbxAction, domain: &str) -> Self {
        match action {
            PbxAction::Say { say } => DialplanAction::app_with("speak", format!("flite|kal|{}", say)),
            PbxAction::Play { play } => DialplanAction::app_with("playback", play.clone()),
            PbxAction::Gather {
                timeout,
                finish_on_key,
                min_digits,
                max_digits,
            } => DialplanAction::app_with(
                "play_and_get_digits",
                format!(
                    "{} {} 3 {} {} silence_stream://1000 silence_stream://1000 gathered_digits",
                    min_digits, max_digits, timeout, finish_on_key
                ),
            ),
            PbxAction::Record { max_length, .. } => DialplanAction::app_with(
                "record",
                format!("{} {} 200 5", RECORDING_PATH, max_length),
            ),
            PbxAction::Connect { to: Some(to) } => {
                DialplanAction::app_with("bridge", format!("user/{}@{}", to, domain))
            }
            PbxAction::Connect { to: None } => {
                DialplanAction::Comment("connect without a destination number".to_string())
            }
            PbxAction::SendMessage { to, body } => DialplanAction::app_with(
                "sms",
                format!(
                    "{}|{}",
                    to.as_deref().unwrap_or_default(),
                    body.as_deref().unwrap_or_default()
                ),
            ),
            PbxAction::Hangup { .. } => DialplanAction::app("hangup"),
        }
    }
}

/// A complete single-extension dialplan document. `Display` renders the XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialplan {
    pub context: String,
    pub extension_name: String,
    pub destination_number: String,
    pub uuid: Uuid,
    pub actions: Vec<DialplanAction>,
}

impl Dialplan {
    /// Flattens a PBX flow into one extension: `answer`, a short pause, every state in order,
    /// then `hangup`.
    pub fn from_flow(flow: &PbxFlow, name: &str, domain: &str) -> Self {
        let mut actions = vec![
            DialplanAction::app("answer"),
            DialplanAction::app_with("sleep", "1000".to_string()),
        ];
        actions.extend(
            flow.states
                .values()
                .map(|state| DialplanAction::from_state(&state.properties, domain)),
        );
        actions.push(DialplanAction::app("hangup"));

        Self {
            context: flow.context.clone(),
            extension_name: name.to_string(),
            destination_number: flow.extension.clone(),
            uuid: extension_uuid(&flow.context, name, &flow.extension),
            actions,
        }
    }

    pub fn to_xml(&self) -> String {
        self.to_string()
    }
}

/// Name-based so recompiling the same flow yields the same extension uuid.
fn extension_uuid(context: &str, name: &str, number: &str) -> Uuid {
    let key = format!("callflow:{}:{}:{}", context, name, number);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}

impl fmt::Display for Dialplan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
        )?;
        writeln!(f, r#"<document type="freeswitch/xml">"#)?;
        writeln!(
            f,
            r#"  <section name="dialplan" description="IVR Dialplan">"#
        )?;
        writeln!(f, r#"    <context name="{}">"#, Escaped(&self.context))?;
        writeln!(
            f,
            r#"      <extension name="{}" continue="false" uuid="{}">"#,
            Escaped(&self.extension_name),
            self.uuid
        )?;
        writeln!(
            f,
            r#"        <condition field="destination_number" expression="{}">"#,
            Escaped(&destination_pattern(&self.destination_number))
        )?;
        for action in &self.actions {
            match action {
                DialplanAction::Application { name, data: None } => {
                    writeln!(f, r#"          <action application="{}"/>"#, name)?
                }
                DialplanAction::Application {
                    name,
                    data: Some(data),
                } => writeln!(
                    f,
                    r#"          <action application="{}" data="{}"/>"#,
                    name,
                    Escaped(data)
                )?,
                DialplanAction::Comment(text) => {
                    writeln!(f, "          <!-- {} -->", text.replace("--", "- -"))?
                }
            }
        }
        writeln!(f, "        </condition>")?;
        writeln!(f, "      </extension>")?;
        writeln!(f, "    </context>")?;
        writeln!(f, "  </section>")?;
        write!(f, "</document>")
    }
}

/// Attribute-safe XML escaping.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                other => f.write_char(other)?,
            }
        }
        Ok(())
    }
}
