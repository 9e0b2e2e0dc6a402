//! Relational rows for the PBX's IVR-menu tables.
//!
//! The PBX stores every column as text, so booleans become `"true"`/`"false"` and numbers are
//! rendered in decimal.

use crate::flow::{IvrMenu, MenuOption};
use serde::Serialize;

/// One row of the menu header table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IvrMenuRow {
    pub ivr_menu_name: String,
    pub ivr_menu_extension: String,
    pub ivr_menu_context: String,
    pub ivr_menu_greet_long: String,
    pub ivr_menu_greet_short: String,
    pub ivr_menu_timeout: String,
    pub ivr_menu_exit_action: String,
    pub ivr_menu_direct_dial: String,
    pub ivr_menu_ring_back: String,
    pub ivr_menu_caller_id_name_prefix: String,
    pub ivr_menu_enabled: String,
    pub ivr_menu_description: String,
}

/// One row of the menu option table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IvrMenuOptionRow {
    pub ivr_menu_option_digits: String,
    pub ivr_menu_option_action: String,
    pub ivr_menu_option_order: String,
    pub ivr_menu_option_description: String,
    pub ivr_menu_option_enabled: String,
}

impl From<&MenuOption> for IvrMenuOptionRow {
    fn from(option: &MenuOption) -> Self {
        Self {
            ivr_menu_option_digits: option.digit.clone(),
            ivr_menu_option_action: option.destination.to_string(),
            ivr_menu_option_order: option.order.to_string(),
            ivr_menu_option_description: option.description.clone(),
            ivr_menu_option_enabled: option.enabled.to_string(),
        }
    }
}

/// The header row plus one option row per menu option, in menu order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRows {
    pub menu: IvrMenuRow,
    pub options: Vec<IvrMenuOptionRow>,
}

impl MenuRows {
    pub fn from_menu(menu: &IvrMenu, name: &str) -> Self {
        let header = IvrMenuRow {
            ivr_menu_name: name.to_string(),
            ivr_menu_extension: menu.extension.clone(),
            ivr_menu_context: menu.context.clone(),
            ivr_menu_greet_long: menu.greet_long.clone(),
            ivr_menu_greet_short: menu.greet_short.clone(),
            ivr_menu_timeout: menu.timeout_ms.to_string(),
            ivr_menu_exit_action: menu
                .exit_action
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            ivr_menu_direct_dial: menu.direct_dial.to_string(),
            ivr_menu_ring_back: menu.ring_back.clone(),
            ivr_menu_caller_id_name_prefix: menu.caller_id_name_prefix.clone(),
            ivr_menu_enabled: menu.enabled.to_string(),
            ivr_menu_description: menu.description.clone(),
        };
        Self {
            menu: header,
            options: menu.options.iter().map(IvrMenuOptionRow::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
