use crate::defaults::DEFAULTS;
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;

/// Deployment settings the translators need but the diagram does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// SIP domain used in `user/{number}@{domain}` bridge strings.
    pub pbx_domain: String,
    /// Number presented as `from` by the cloud engine for outbound legs and SMS.
    pub caller_id: Option<String>,
    /// Base URL for recording status callbacks on the cloud engine.
    pub webhook_base_url: Option<String>,
    pub default_extension: String,
    pub description: String,
    pub default_voice: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pbx_domain: "localhost".to_string(),
            caller_id: None,
            webhook_base_url: None,
            default_extension: DEFAULTS.menu.extension.to_string(),
            description: "IVR Flow generated from Workflow Builder".to_string(),
            default_voice: DEFAULTS.speech.voice.to_string(),
        }
    }
}

impl CompileOptions {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads options from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// `{base}/api/webhooks/recording-status`, or `None` without a configured base URL.
    pub fn recording_callback(&self) -> Option<String> {
        self.webhook_base_url.as_ref().map(|base| {
            format!(
                "{}/api/webhooks/recording-status",
                base.trim_end_matches('/')
            )
        })
    }
}
