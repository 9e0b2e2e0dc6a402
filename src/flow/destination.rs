use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const APP_PREFIX: &str = "menu-exec-app:";

/// Where an IVR menu sends the caller.
///
/// The PBX stores these as `menu-exec-app:{app} {args}` strings. Building them only through
/// `Display` keeps every producer on the same format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// `menu-exec-app:transfer {extension} XML {context}`
    Transfer { extension: String, context: String },
    /// `menu-exec-app:bridge user/{number}@{domain}`
    Bridge { number: String, domain: String },
    /// `menu-exec-app:hangup`
    Hangup,
    /// A value supplied verbatim by an explicit menu node that is none of the above.
    Custom(String),
}

impl Destination {
    pub fn transfer(extension: impl Into<String>, context: impl Into<String>) -> Self {
        Destination::Transfer {
            extension: extension.into(),
            context: context.into(),
        }
    }

    pub fn bridge(number: impl Into<String>, domain: impl Into<String>) -> Self {
        Destination::Bridge {
            number: number.into(),
            domain: domain.into(),
        }
    }

    /// Reads an instruction string, recognising the known shapes and keeping anything else
    /// verbatim as `Custom`. Converting the result back with `to_string` reproduces `text`.
    pub fn from_instruction(text: &str) -> Self {
        Destination::parse_known(text)
            .filter(|d| d.to_string() == text)
            .unwrap_or_else(|| Destination::Custom(text.to_string()))
    }

    fn parse_known(text: &str) -> Option<Self> {
        let command = text.strip_prefix(APP_PREFIX)?;
        if command == "hangup" {
            return Some(Destination::Hangup);
        }
        if let Some(args) = command.strip_prefix("transfer ") {
            let parts: Vec<&str> = args.split(' ').collect();
            if let [extension, "XML", context] = parts.as_slice() {
                return Some(Destination::transfer(*extension, *context));
            }
            return None;
        }
        let target = command.strip_prefix("bridge user/")?;
        let (number, domain) = target.rsplit_once('@')?;
        Some(Destination::bridge(number, domain))
    }
}

impl FromStr for Destination {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Destination::from_instruction(s))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Transfer { extension, context } => {
                write!(f, "{}transfer {} XML {}", APP_PREFIX, extension, context)
            }
            Destination::Bridge { number, domain } => {
                write!(f, "{}bridge user/{}@{}", APP_PREFIX, number, domain)
            }
            Destination::Hangup => write!(f, "{}hangup", APP_PREFIX),
            Destination::Custom(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
