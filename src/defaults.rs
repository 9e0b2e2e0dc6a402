//! Fallback values applied when a node leaves a property unset.
//!
//! Every translator and the menu extractor read their defaults from [`DEFAULTS`], so a default
//! only ever lives in one place.

/// Defaults for `gather-input` nodes.
#[derive(Debug, Clone, Copy)]
pub struct GatherDefaults {
    pub timeout_secs: u32,
    pub finish_on_key: &'static str,
    pub min_digits: u32,
    pub max_digits: u32,
}

/// Defaults for `forward-to-phone` nodes.
#[derive(Debug, Clone, Copy)]
pub struct ForwardDefaults {
    pub timeout_secs: u32,
}

/// Defaults for the recording node family.
#[derive(Debug, Clone, Copy)]
pub struct RecordingDefaults {
    pub max_duration_secs: u32,
    pub finish_on_key: &'static str,
    pub play_beep: bool,
}

/// Defaults for `hang-up` nodes.
#[derive(Debug, Clone, Copy)]
pub struct HangUpDefaults {
    pub reason: &'static str,
}

/// Defaults for spoken prompts.
#[derive(Debug, Clone, Copy)]
pub struct SpeechDefaults {
    pub language: &'static str,
    pub voice: &'static str,
    pub cloud_greeting: &'static str,
    pub pbx_greeting: &'static str,
    pub placeholder: &'static str,
}

/// Defaults for IVR menus, explicit or derived from a `gather-input` node.
#[derive(Debug, Clone, Copy)]
pub struct MenuDefaults {
    pub extension: &'static str,
    pub context: &'static str,
    pub timeout_ms: u32,
    pub greeting: &'static str,
    pub exit_extension: &'static str,
    pub ring_back: &'static str,
    pub short_greeting_len: usize,
}

/// The full default table, one entry per node family.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub gather: GatherDefaults,
    pub forward: ForwardDefaults,
    pub recording: RecordingDefaults,
    pub hang_up: HangUpDefaults,
    pub speech: SpeechDefaults,
    pub menu: MenuDefaults,
}

pub const DEFAULTS: Defaults = Defaults {
    gather: GatherDefaults {
        timeout_secs: 5,
        finish_on_key: "#",
        min_digits: 1,
        max_digits: 10,
    },
    forward: ForwardDefaults { timeout_secs: 30 },
    recording: RecordingDefaults {
        max_duration_secs: 300,
        finish_on_key: "#",
        play_beep: true,
    },
    hang_up: HangUpDefaults {
        reason: "Call completed",
    },
    speech: SpeechDefaults {
        language: "en-US",
        voice: "alice",
        cloud_greeting: "Welcome!",
        pbx_greeting: "Welcome to our IVR system!",
        placeholder: "Processing...",
    },
    menu: MenuDefaults {
        extension: "1000",
        context: "default",
        timeout_ms: 3000,
        greeting: "Welcome!",
        exit_extension: "0",
        ring_back: "tone_stream://%(500,500,480,620);loops=25",
        short_greeting_len: 100,
    },
};
