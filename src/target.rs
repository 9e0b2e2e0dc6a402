use crate::flow::{CloudFlow, IvrMenu, PbxFlow};
use crate::render::MenuRows;
use std::fmt;
use std::str::FromStr;

/// The deployment targets the compiler can produce artifacts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// JSON state machine for the cloud call-flow engine.
    Cloud,
    /// Dialplan XML for the PBX.
    PbxDialplan,
    /// Relational IVR-menu rows for the PBX.
    PbxMenu,
    /// IVR-menu rows when the diagram contains a menu pattern, dialplan XML otherwise.
    PbxAuto,
}

/// PBX dialplan context a flow is installed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialplanContext {
    /// Internal extensions.
    #[default]
    Default,
    /// Inbound calls to full phone numbers.
    Public,
}

impl DialplanContext {
    /// Short (3 to 4 digit) extensions live in `default`, anything else in `public`.
    pub fn for_destination(number: &str) -> Self {
        let is_extension =
            (3..=4).contains(&number.len()) && number.bytes().all(|b| b.is_ascii_digit());
        if is_extension {
            DialplanContext::Default
        } else {
            DialplanContext::Public
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DialplanContext::Default => "default",
            DialplanContext::Public => "public",
        }
    }
}

impl fmt::Display for DialplanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DialplanContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(DialplanContext::Default),
            "public" => Ok(DialplanContext::Public),
            other => Err(format!("unknown dialplan context '{}'", other)),
        }
    }
}

/// Inbound routing for a PBX deployment: the number or extension that reaches the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    pub destination: String,
    pub context: DialplanContext,
}

impl Routing {
    /// Routing with the context chosen from the destination's shape.
    pub fn for_destination(destination: impl Into<String>) -> Self {
        let destination = destination.into();
        let context = DialplanContext::for_destination(&destination);
        Self {
            destination,
            context,
        }
    }
}

/// A finished, target-specific compile result.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Cloud(CloudFlow),
    Dialplan { flow: PbxFlow, xml: String },
    Menu { menu: IvrMenu, rows: MenuRows },
}
