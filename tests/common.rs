//! Common test utilities for building diagrams and compilers.
use callflow::prelude::*;
use serde_json::{Map, Value, json};

pub const TEST_DOMAIN: &str = "pbx.example.com";

/// Builds a node from its editor type tag and a JSON object of properties.
#[allow(dead_code)]
pub fn node(id: &str, node_type: &str, properties: Value) -> Node {
    let properties = properties.as_object().cloned().unwrap_or_else(Map::new);
    Node::new(id, node_type, &properties)
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> Edge {
    Edge::new(format!("{}-{}", source, target), source, target)
}

#[allow(dead_code)]
pub fn labeled(source: &str, target: &str, label: &str) -> Edge {
    edge(source, target).labeled(label)
}

/// Options pointing at a test PBX domain, everything else default.
#[allow(dead_code)]
pub fn test_options() -> CompileOptions {
    CompileOptions {
        pbx_domain: TEST_DOMAIN.to_string(),
        ..CompileOptions::default()
    }
}

#[allow(dead_code)]
pub fn compiler_for(diagram: Diagram) -> Compiler {
    Compiler::builder(diagram)
        .named("Test Flow")
        .with_options(test_options())
        .build()
}

/// A single `answer-call` node and no edges.
#[allow(dead_code)]
pub fn create_answer_only_diagram() -> Diagram {
    Diagram::new(vec![node("answer", "answer-call", json!({}))], vec![])
}

/// `answer -> greeting -> menu`, where the gather node routes "1001" to a forward node.
///
/// Logic: pressing 1 bridges to +15551234567.
#[allow(dead_code)]
pub fn create_gather_menu_diagram() -> Diagram {
    Diagram::new(
        vec![
            node("answer", "answer-call", json!({})),
            node(
                "greeting",
                "play-audio-tts",
                json!({ "messageType": "tts", "messageText": "Thanks for calling Acme." }),
            ),
            node(
                "menu",
                "gather-input",
                json!({
                    "timeout": 7,
                    "menuOptions": r#"[{"key":"1","label":"Sales","value":"1001"}]"#
                }),
            ),
            node("sales", "forward-to-phone", json!({ "phoneNumber": "+15551234567" })),
        ],
        vec![
            edge("answer", "greeting"),
            edge("greeting", "menu"),
            labeled("menu", "sales", "1001"),
        ],
    )
}

/// A forward node whose "Success" and "Busy" outcomes lead to two different hang-ups.
#[allow(dead_code)]
pub fn create_forward_diagram() -> Diagram {
    Diagram::new(
        vec![
            node("forward", "forward-to-phone", json!({ "phoneNumber": "+15550001111" })),
            node("done", "hang-up-call", json!({ "reason": "Answered" })),
            node("busy", "hang-up-call", json!({ "reason": "Line busy" })),
        ],
        vec![
            labeled("forward", "done", "Success"),
            labeled("forward", "busy", "Busy"),
        ],
    )
}

/// An explicit `ivr-menu` node with every field set.
#[allow(dead_code)]
pub fn create_explicit_menu_diagram() -> Diagram {
    Diagram::new(
        vec![node(
            "ivr",
            "ivr-menu",
            json!({
                "extension": "5000",
                "context": "default",
                "greetLong": "Welcome to Acme. Press 1 for sales.",
                "greetShort": "Press 1 for sales.",
                "timeout": 4000,
                "exitAction": "menu-exec-app:hangup",
                "menuOptions": [
                    { "option": "1", "destination": "menu-exec-app:transfer 1001 XML default", "description": "Sales" },
                    { "option": "2", "destination": "voicemail:default:1002", "order": 5, "enabled": false }
                ]
            }),
        )],
        vec![],
    )
}

/// The same shape the browser editor exports.
#[allow(dead_code)]
pub fn create_editor_json() -> String {
    json!({
        "nodes": [
            { "id": "n1", "type": "workflow-node", "position": { "x": 0, "y": 0 },
              "data": { "type": "answer-call", "properties": {} } },
            { "id": "n2", "type": "workflow-node", "position": { "x": 0, "y": 120 },
              "data": { "type": "play-audio-tts", "properties": { "messageType": "tts", "messageText": "Hello", "voice": "female" } } },
            { "id": "n3", "type": "workflow-node", "position": { "x": 0, "y": 240 },
              "data": { "type": "hang-up-call", "properties": {} } }
        ],
        "edges": [
            { "id": "e1", "source": "n1", "target": "n2" },
            { "id": "e2", "source": "n2", "target": "n3", "data": { "label": "next" } }
        ]
    })
    .to_string()
}
