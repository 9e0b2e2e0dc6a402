//! Tests for IVR-menu detection, extraction and target selection.
mod common;
use callflow::prelude::*;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_gather_menu_routes_digit_to_bridge() {
    let compiler = compiler_for(create_gather_menu_diagram());
    let menu = compiler.extract_menu("2000", "default");

    assert_eq!(menu.origin, MenuOrigin::GatherInput("menu".to_string()));
    assert_eq!(menu.options.len(), 1);
    let option = &menu.options[0];
    assert_eq!(option.digit, "1");
    assert_eq!(
        option.destination.to_string(),
        format!("menu-exec-app:bridge user/+15551234567@{}", TEST_DOMAIN)
    );
    assert_eq!(option.description, "Sales");
    assert_eq!(option.order, 1);
    assert!(option.enabled);

    assert_eq!(menu.extension, "2000");
    assert_eq!(menu.timeout_ms, 7000);
    assert_eq!(
        menu.exit_action.as_ref().map(ToString::to_string).as_deref(),
        Some("menu-exec-app:transfer 0 XML default")
    );
    assert_eq!(menu.ring_back, "tone_stream://%(500,500,480,620);loops=25");
    assert_eq!(menu.description, "IVR Menu: Test Flow");
}

#[test]
fn test_answer_call_on_path_provides_greeting() {
    let menu = compiler_for(create_gather_menu_diagram()).extract_menu("2000", "default");
    assert_eq!(menu.greet_long, "Welcome to our IVR system!");
    assert_eq!(menu.greet_short, "Welcome!");
}

#[test]
fn test_tts_greeting_is_truncated_for_short_form() {
    let long_text = "Thank you for calling. ".repeat(10);
    let diagram = Diagram::new(
        vec![
            node("intro", "play-audio-tts", json!({ "messageType": "tts", "messageText": long_text.as_str() })),
            node("menu", "gather-input", json!({ "menuOptions": [{ "key": "1", "label": "Support" }] })),
        ],
        vec![edge("intro", "menu")],
    );
    let menu = compiler_for(diagram).extract_menu("2000", "default");

    assert_eq!(menu.greet_long, long_text);
    assert_eq!(menu.greet_short.chars().count(), 100);
    assert!(long_text.starts_with(&menu.greet_short));
}

#[test]
fn test_unreachable_anchor_uses_default_greeting() {
    let diagram = Diagram::new(
        vec![
            node("intro", "play-audio-tts", json!({ "messageType": "audio", "audioFile": "intro.wav" })),
            node("menu", "gather-input", json!({ "menuOptions": [{ "key": "1" }] })),
        ],
        vec![],
    );
    let menu = compiler_for(diagram).extract_menu("2000", "default");
    assert_eq!(menu.greet_long, "Welcome!");
    assert_eq!(menu.greet_short, "Welcome!");
}

#[test]
fn test_unmatched_options_route_back_to_menu() {
    let diagram = Diagram::new(
        vec![node(
            "menu",
            "gather-input",
            json!({ "menuOptions": [{ "label": "Sales" }, { "key": "9", "label": "Billing", "value": "b" }] }),
        )],
        vec![],
    );
    let menu = compiler_for(diagram).extract_menu("3000", "default");

    assert_eq!(menu.options[0].digit, "1");
    assert_eq!(menu.options[1].digit, "9");
    for option in &menu.options {
        assert_eq!(option.destination, Destination::transfer("3000", "default"));
    }
}

#[test]
fn test_option_edges_resolve_through_pass_through_nodes() {
    let diagram = Diagram::new(
        vec![
            node("menu", "gather-input", json!({ "menuOptions": [
                { "key": "1", "value": "hangup" },
                { "key": "2", "value": "queue" },
                { "key": "3", "value": "loop" }
            ] })),
            node("notice", "play-audio-tts", json!({ "messageType": "tts", "messageText": "Goodbye" })),
            node("bye", "hang-up-call", json!({})),
            node("q", "call-queue", json!({ "extension": "7000" })),
            node("l1", "play-audio-tts", json!({})),
            node("l2", "play-audio-tts", json!({})),
        ],
        vec![
            labeled("menu", "notice", "hangup"),
            edge("notice", "bye"),
            labeled("menu", "q", "queue"),
            labeled("menu", "l1", "loop"),
            edge("l1", "l2"),
            edge("l2", "l1"),
        ],
    );
    let menu = compiler_for(diagram).extract_menu("2000", "default");

    assert_eq!(menu.options[0].destination, Destination::Hangup);
    assert_eq!(menu.options[1].destination, Destination::transfer("7000", "default"));
    assert_eq!(menu.options[2].destination, Destination::transfer("1000", "default"));
}

#[test]
fn test_explicit_menu_round_trips_its_properties() {
    let menu = compiler_for(create_explicit_menu_diagram()).extract_menu("2000", "public");

    assert_eq!(menu.origin, MenuOrigin::ExplicitNode("ivr".to_string()));
    assert_eq!(menu.extension, "5000");
    assert_eq!(menu.context, "default");
    assert_eq!(menu.greet_long, "Welcome to Acme. Press 1 for sales.");
    assert_eq!(menu.greet_short, "Press 1 for sales.");
    assert_eq!(menu.timeout_ms, 4000);
    assert_eq!(menu.exit_action, Some(Destination::Hangup));

    let first = &menu.options[0];
    assert_eq!(first.digit, "1");
    assert_eq!(first.destination, Destination::transfer("1001", "default"));
    assert_eq!(first.description, "Sales");
    assert_eq!(first.order, 1);

    let second = &menu.options[1];
    assert_eq!(second.destination.to_string(), "voicemail:default:1002");
    assert_eq!(second.order, 5);
    assert_eq!(second.description, "Option 2");
    assert!(!second.enabled);
}

#[test]
fn test_explicit_menu_defaults_missing_fields() {
    let diagram = Diagram::new(vec![node("ivr", "ivr-menu", json!({}))], vec![]);
    let menu = compiler_for(diagram).extract_menu("2000", "public");

    assert_eq!(menu.extension, "2000");
    assert_eq!(menu.context, "public");
    assert_eq!(menu.greet_long, "");
    assert_eq!(menu.timeout_ms, 3000);
    assert_eq!(menu.exit_action, None);
    assert!(menu.enabled);
    assert!(!menu.direct_dial);
    assert!(menu.options.is_empty());
    assert!(menu.is_found());
}

#[test]
fn test_explicit_menu_wins_over_gather_input() {
    let mut diagram = create_gather_menu_diagram();
    diagram.nodes.push(node("ivr", "ivr-menu", json!({ "extension": "6000" })));
    let menu = compiler_for(diagram).extract_menu("2000", "default");

    assert_eq!(menu.origin, MenuOrigin::ExplicitNode("ivr".to_string()));
    assert_eq!(menu.extension, "6000");
}

#[test]
fn test_malformed_menu_options_mean_no_menu() {
    let diagram = Diagram::new(
        vec![node("menu", "gather-input", json!({ "menuOptions": "{not json" }))],
        vec![],
    );
    let compiler = compiler_for(diagram);
    let menu = compiler.extract_menu("2000", "default");

    assert_eq!(menu.origin, MenuOrigin::None);
    assert!(!menu.is_found());
    assert!(menu.options.is_empty());
    assert_eq!(menu.greet_long, "Welcome!");
}

#[test]
fn test_auto_target_prefers_menu_and_falls_back_to_dialplan() {
    let routing = Routing::for_destination("2000");

    let with_menu = compiler_for(create_gather_menu_diagram());
    match with_menu.compile_for(Target::PbxAuto, Some(&routing)) {
        Ok(Artifact::Menu { menu, rows }) => {
            assert!(menu.is_found());
            assert_eq!(rows.options.len(), 1);
        }
        other => panic!("expected a menu artifact, got {:?}", other),
    }

    let without_menu = compiler_for(create_forward_diagram());
    match without_menu.compile_for(Target::PbxAuto, Some(&routing)) {
        Ok(Artifact::Dialplan { flow, xml }) => {
            assert_eq!(flow.extension, "2000");
            assert!(xml.contains("<document type=\"freeswitch/xml\">"));
        }
        other => panic!("expected a dialplan artifact, got {:?}", other),
    }
}

#[test]
fn test_menu_target_returns_descriptor_even_without_pattern() {
    let compiler = compiler_for(create_forward_diagram());
    match compiler.compile_for(Target::PbxMenu, None) {
        Ok(Artifact::Menu { menu, rows }) => {
            assert_eq!(menu.origin, MenuOrigin::None);
            assert_eq!(rows.menu.ivr_menu_extension, "1000");
            assert_eq!(
                rows.menu.ivr_menu_exit_action,
                "menu-exec-app:transfer 0 XML default"
            );
            assert_eq!(
                rows.menu.ivr_menu_ring_back,
                "tone_stream://%(500,500,480,620);loops=25"
            );
            assert_eq!(
                menu.exit_action,
                Some(Destination::transfer("0", "default"))
            );
            assert!(rows.options.is_empty());
        }
        other => panic!("expected a menu artifact, got {:?}", other),
    }
}

#[test]
fn test_play_message_nodes_are_not_greetings() {
    let diagram = Diagram::new(
        vec![
            node("hold", "play-message", json!({ "messageType": "tts", "messageText": "Please hold" })),
            node("welcome", "play-audio-tts", json!({ "messageType": "tts", "messageText": "Welcome to Acme" })),
            node("menu", "gather-input", json!({ "menuOptions": [{ "key": "1", "label": "Sales" }] })),
        ],
        vec![edge("hold", "welcome"), edge("welcome", "menu")],
    );
    let menu = compiler_for(diagram).extract_menu("2000", "default");

    assert_eq!(menu.greet_long, "Welcome to Acme");
    assert_eq!(menu.greet_short, "Welcome to Acme");
}

#[test]
fn test_explicit_option_description_uses_option_or_position() {
    let diagram = Diagram::new(
        vec![node(
            "ivr",
            "ivr-menu",
            json!({ "menuOptions": [
                { "key": "5", "destination": "menu-exec-app:hangup" },
                { "option": "7", "destination": "menu-exec-app:hangup" }
            ] }),
        )],
        vec![],
    );
    let menu = compiler_for(diagram).extract_menu("2000", "default");

    assert_eq!(menu.options[0].digit, "5");
    assert_eq!(menu.options[0].description, "Option 1");
    assert_eq!(menu.options[1].digit, "7");
    assert_eq!(menu.options[1].description, "Option 7");
}
