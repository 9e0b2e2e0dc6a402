use super::destination::Destination;
use serde::Serialize;

/// Which part of the diagram a menu descriptor was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "nodeId", rename_all = "kebab-case")]
pub enum MenuOrigin {
    /// An explicit `ivr-menu` node.
    ExplicitNode(String),
    /// A `gather-input` node carrying menu options.
    GatherInput(String),
    /// No menu pattern was found; the descriptor holds defaults only.
    None,
}

/// A structured, digit-routed IVR menu for the PBX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IvrMenu {
    pub origin: MenuOrigin,
    pub extension: String,
    pub context: String,
    pub greet_long: String,
    pub greet_short: String,
    pub timeout_ms: u32,
    pub exit_action: Option<Destination>,
    pub direct_dial: bool,
    pub ring_back: String,
    pub caller_id_name_prefix: String,
    pub enabled: bool,
    pub description: String,
    pub options: Vec<MenuOption>,
}

impl IvrMenu {
    /// False when extraction found no menu and the caller should emit a dialplan instead.
    pub fn is_found(&self) -> bool {
        self.origin != MenuOrigin::None
    }

    pub fn option(&self, digit: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.digit == digit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuOption {
    pub digit: String,
    pub destination: Destination,
    pub order: u32,
    pub description: String,
    pub enabled: bool,
}
