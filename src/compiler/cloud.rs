use super::translate::Translator;
use crate::config::CompileOptions;
use crate::defaults::DEFAULTS;
use crate::diagram::{
    ForwardToPhone, GatherInput, HangUp, Message, PlayMessage, Recording, RecordingMode, SendSms,
};
use crate::flow::CloudAction;

/// Editor voice names that carry no provider-specific meaning.
const GENERIC_VOICES: [&str; 4] = ["default", "male", "female", "neutral"];

/// Translates nodes into the cloud engine's action vocabulary. Timeouts are in seconds.
pub struct CloudTranslator<'a> {
    options: &'a CompileOptions,
}

impl<'a> CloudTranslator<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self { options }
    }

    /// Maps an editor voice to a provider voice. Generic names and missing values use the
    /// configured default; anything else is assumed to be a provider voice already.
    pub fn voice(&self, requested: Option<&str>) -> String {
        match requested {
            Some(voice) if !GENERIC_VOICES.contains(&voice) => voice.to_string(),
            _ => self.options.default_voice.clone(),
        }
    }

    fn say(&self, text: impl Into<String>) -> CloudAction {
        CloudAction::Say {
            say: text.into(),
            voice: Some(self.voice(None)),
            language: None,
        }
    }
}

impl Translator for CloudTranslator<'_> {
    type Action = CloudAction;

    fn answer_call(&self) -> CloudAction {
        CloudAction::Say {
            say: DEFAULTS.speech.cloud_greeting.to_string(),
            voice: Some(self.voice(None)),
            language: Some(DEFAULTS.speech.language.to_string()),
        }
    }

    fn play_message(&self, play: &PlayMessage) -> Option<CloudAction> {
        match &play.message {
            Message::Tts(text) => Some(CloudAction::Say {
                say: text.clone(),
                voice: Some(self.voice(play.voice.as_deref())),
                language: Some(play.language.clone()),
            }),
            Message::Audio(file) => Some(CloudAction::Play { play: file.clone() }),
            Message::None => None,
        }
    }

    fn gather_input(&self, gather: &GatherInput) -> CloudAction {
        CloudAction::Gather {
            timeout: gather.timeout_secs,
            finish_on_key: gather.finish_on_key.clone(),
            num_digits: gather.max_digits,
            input: gather.input,
        }
    }

    fn forward_to_phone(&self, forward: &ForwardToPhone) -> CloudAction {
        CloudAction::Connect {
            timeout: forward.timeout_secs,
            to: forward.phone_number.clone(),
            from: forward
                .caller_id
                .clone()
                .or_else(|| self.options.caller_id.clone()),
        }
    }

    fn hang_up(&self, hang_up: &HangUp) -> CloudAction {
        CloudAction::Hangup {
            reason: hang_up.reason.clone(),
        }
    }

    fn recording(&self, recording: &Recording) -> CloudAction {
        let callback = self.options.recording_callback();
        let method = callback.as_ref().map(|_| "POST".to_string());
        let play_beep = match recording.mode {
            // Live call recording is silent for the caller.
            RecordingMode::Call => None,
            RecordingMode::Voicemail => Some(recording.play_beep),
        };
        CloudAction::Record {
            max_length: recording.max_duration_secs,
            finish_on_key: recording.finish_on_key.clone(),
            play_beep,
            recording_status_callback: callback,
            recording_status_callback_method: method,
        }
    }

    fn send_sms(&self, sms: &SendSms) -> CloudAction {
        CloudAction::SendMessage {
            to: sms.phone_number.clone(),
            from: self.options.caller_id.clone(),
            body: sms.message.clone(),
        }
    }

    fn passthrough(&self, node_type: &str) -> CloudAction {
        self.say(format!("Executing {}", node_type))
    }

    fn silent(&self) -> CloudAction {
        self.say(DEFAULTS.speech.placeholder)
    }
}
