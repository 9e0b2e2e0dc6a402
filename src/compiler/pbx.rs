use super::translate::Translator;
use crate::defaults::DEFAULTS;
use crate::diagram::{ForwardToPhone, GatherInput, HangUp, Message, PlayMessage, Recording, SendSms};
use crate::flow::PbxAction;

/// Translates nodes into the PBX action vocabulary. Timeouts are in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PbxTranslator;

impl Translator for PbxTranslator {
    type Action = PbxAction;

    fn answer_call(&self) -> PbxAction {
        PbxAction::Say {
            say: DEFAULTS.speech.pbx_greeting.to_string(),
        }
    }

    fn play_message(&self, play: &PlayMessage) -> Option<PbxAction> {
        match &play.message {
            Message::Tts(text) => Some(PbxAction::Say { say: text.clone() }),
            Message::Audio(file) => Some(PbxAction::Play { play: file.clone() }),
            Message::None => None,
        }
    }

    fn gather_input(&self, gather: &GatherInput) -> PbxAction {
        PbxAction::Gather {
            timeout: gather.timeout_secs.saturating_mul(1000),
            finish_on_key: gather.finish_on_key.clone(),
            min_digits: gather.min_digits.min(gather.max_digits),
            max_digits: gather.max_digits,
        }
    }

    fn forward_to_phone(&self, forward: &ForwardToPhone) -> PbxAction {
        PbxAction::Connect {
            to: forward.phone_number.clone(),
        }
    }

    fn hang_up(&self, hang_up: &HangUp) -> PbxAction {
        PbxAction::Hangup {
            reason: hang_up.reason.clone(),
        }
    }

    fn recording(&self, recording: &Recording) -> PbxAction {
        PbxAction::Record {
            max_length: recording.max_duration_secs,
            finish_on_key: recording.finish_on_key.clone(),
            play_beep: recording.play_beep,
        }
    }

    fn send_sms(&self, sms: &SendSms) -> PbxAction {
        PbxAction::SendMessage {
            to: sms.phone_number.clone(),
            body: sms.message.clone(),
        }
    }

    fn passthrough(&self, node_type: &str) -> PbxAction {
        PbxAction::Say {
            say: format!("Processing {}", node_type),
        }
    }

    fn silent(&self) -> PbxAction {
        PbxAction::Say {
            say: DEFAULTS.speech.placeholder.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::InputMode;

    #[test]
    fn gather_timeout_is_in_milliseconds_and_bounds_are_ordered() {
        let gather = GatherInput {
            input: InputMode::Dtmf,
            min_digits: 6,
            max_digits: 4,
            timeout_secs: 5,
            finish_on_key: "#".to_string(),
            menu_options: Vec::new(),
        };
        assert_eq!(
            PbxTranslator.gather_input(&gather),
            PbxAction::Gather {
                timeout: 5000,
                finish_on_key: "#".to_string(),
                min_digits: 4,
                max_digits: 4,
            }
        );
    }
}
