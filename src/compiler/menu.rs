//! Detection of IVR-menu patterns and extraction of a menu descriptor.
//!
//! Two patterns are recognised, in order of precedence: an explicit `ivr-menu` node, then the
//! first `gather-input` node carrying menu options. Extraction is total. When neither pattern is
//! present the descriptor's origin is [`MenuOrigin::None`] and callers fall back to a dialplan.

use crate::config::CompileOptions;
use crate::defaults::DEFAULTS;
use crate::diagram::{Diagram, GatherInput, IvrMenuProperties, Message, Node, NodeKind};
use crate::flow::{Destination, IvrMenu, MenuOption, MenuOrigin};
use crate::graph::Graph;
use ahash::AHashSet;
use serde_json::Value;
use tracing::{debug, warn};

/// Only TTS/audio prompts of this editor type count as menu greetings; `play-message` does not.
const GREETING_PLAY_TYPE: &str = "play-audio-tts";

pub struct MenuExtractor<'a> {
    graph: Graph<'a>,
    options: &'a CompileOptions,
    name: &'a str,
}

impl<'a> MenuExtractor<'a> {
    pub fn new(diagram: &'a Diagram, options: &'a CompileOptions, name: &'a str) -> Self {
        Self {
            graph: diagram.graph(),
            options,
            name,
        }
    }

    /// Extracts the menu that answers on `extension` in `context`.
    pub fn extract(&self, extension: &str, context: &str) -> IvrMenu {
        let nodes = &self.graph.diagram().nodes;

        let explicit = nodes.iter().find_map(|node| match &node.kind {
            NodeKind::IvrMenu(props) => Some((node, props)),
            _ => None,
        });
        if let Some((node, props)) = explicit {
            debug!(node_id = %node.id, "Using explicit ivr-menu node");
            return self.from_menu_node(node, props, extension, context);
        }

        let anchor = nodes.iter().find_map(|node| match &node.kind {
            NodeKind::GatherInput(gather) if gather.has_menu() => Some((node, gather)),
            _ => None,
        });
        if let Some((node, gather)) = anchor {
            debug!(node_id = %node.id, options = gather.menu_options.len(), "Using gather-input node as menu anchor");
            return self.from_gather_node(node, gather, extension, context);
        }

        debug!("No menu pattern found");
        self.fallback(extension, context)
    }

    fn from_menu_node(
        &self,
        node: &Node,
        props: &IvrMenuProperties,
        extension: &str,
        context: &str,
    ) -> IvrMenu {
        let options = props
            .menu_options
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let position = index as u32 + 1;
                let digit = raw
                    .option
                    .clone()
                    .or_else(|| raw.key.clone())
                    .unwrap_or_else(|| position.to_string());
                let destination = raw
                    .destination
                    .as_deref()
                    .or(raw.value.as_deref())
                    .unwrap_or_default();
                MenuOption {
                    destination: Destination::from_instruction(destination),
                    order: raw.order.unwrap_or(position),
                    description: raw
                        .description
                        .clone()
                        .or_else(|| raw.label.clone())
                        .unwrap_or_else(|| match &raw.option {
                            Some(option) => format!("Option {}", option),
                            None => format!("Option {}", position),
                        }),
                    enabled: raw.enabled.unwrap_or(true),
                    digit,
                }
            })
            .collect();

        IvrMenu {
            origin: MenuOrigin::ExplicitNode(node.id.clone()),
            extension: props
                .extension
                .clone()
                .unwrap_or_else(|| extension.to_string()),
            context: props.context.clone().unwrap_or_else(|| context.to_string()),
            greet_long: props.greet_long.clone().unwrap_or_default(),
            greet_short: props.greet_short.clone().unwrap_or_default(),
            timeout_ms: props.timeout_ms.unwrap_or(DEFAULTS.menu.timeout_ms),
            exit_action: props
                .exit_action
                .as_deref()
                .map(Destination::from_instruction),
            direct_dial: props.direct_dial.unwrap_or(false),
            ring_back: props.ring_back.clone().unwrap_or_default(),
            caller_id_name_prefix: props.caller_id_name_prefix.clone().unwrap_or_default(),
            enabled: props.enabled.unwrap_or(true),
            description: props
                .description
                .clone()
                .unwrap_or_else(|| self.default_description()),
            options,
        }
    }

    fn from_gather_node(
        &self,
        node: &'a Node,
        gather: &GatherInput,
        extension: &str,
        context: &str,
    ) -> IvrMenu {
        let (greet_long, greet_short) = self.greetings(node);
        let edges = self.graph.outgoing_edges(&node.id);

        let options = gather
            .menu_options
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let position = index as u32 + 1;
                let digit = raw.key.clone().unwrap_or_else(|| position.to_string());
                let edge = edges.iter().find(|edge| {
                    edge.label
                        .as_deref()
                        .is_some_and(|label| raw.matches_label(label))
                });
                let destination = match edge {
                    Some(edge) => self.resolve_destination(&edge.target),
                    None => {
                        debug!(node_id = %node.id, %digit, "No edge for menu option, routing back to the menu");
                        Destination::transfer(extension, DEFAULTS.menu.context)
                    }
                };
                MenuOption {
                    destination,
                    order: position,
                    description: raw
                        .label
                        .clone()
                        .unwrap_or_else(|| format!("Option {}", digit)),
                    enabled: true,
                    digit,
                }
            })
            .collect();

        IvrMenu {
            origin: MenuOrigin::GatherInput(node.id.clone()),
            extension: extension.to_string(),
            context: context.to_string(),
            greet_long,
            greet_short,
            timeout_ms: gather.timeout_secs.saturating_mul(1000),
            exit_action: Some(Destination::transfer(
                DEFAULTS.menu.exit_extension,
                DEFAULTS.menu.context,
            )),
            direct_dial: false,
            ring_back: DEFAULTS.menu.ring_back.to_string(),
            caller_id_name_prefix: String::new(),
            enabled: true,
            description: self.default_description(),
            options,
        }
    }

    fn fallback(&self, extension: &str, context: &str) -> IvrMenu {
        IvrMenu {
            origin: MenuOrigin::None,
            extension: extension.to_string(),
            context: context.to_string(),
            greet_long: DEFAULTS.menu.greeting.to_string(),
            greet_short: DEFAULTS.menu.greeting.to_string(),
            timeout_ms: DEFAULTS.menu.timeout_ms,
            exit_action: Some(Destination::transfer(
                DEFAULTS.menu.exit_extension,
                DEFAULTS.menu.context,
            )),
            direct_dial: false,
            ring_back: DEFAULTS.menu.ring_back.to_string(),
            caller_id_name_prefix: String::new(),
            enabled: true,
            description: self.default_description(),
            options: Vec::new(),
        }
    }

    /// Long and short greeting taken from the first greeting-capable node on the path from the
    /// start node to the menu anchor.
    fn greetings(&self, anchor: &Node) -> (String, String) {
        let path = self
            .graph
            .start_node()
            .map(|start| self.graph.find_path(&start.id, &anchor.id))
            .unwrap_or_default();

        let greeting = path
            .iter()
            .filter_map(|id| self.graph.node(id))
            .find_map(|node| match &node.kind {
                NodeKind::PlayMessage(play) if node.type_name() == GREETING_PLAY_TYPE => {
                    Some(match &play.message {
                        Message::Tts(text) => (
                            text.clone(),
                            text.chars().take(DEFAULTS.menu.short_greeting_len).collect(),
                        ),
                        Message::Audio(file) => (file.clone(), file.clone()),
                        Message::None => (String::new(), String::new()),
                    })
                }
                NodeKind::AnswerCall => Some((
                    DEFAULTS.speech.pbx_greeting.to_string(),
                    DEFAULTS.speech.cloud_greeting.to_string(),
                )),
                _ => None,
            });

        let (long, short) = greeting.unwrap_or_default();
        let or_default = |greeting: String| {
            if greeting.is_empty() {
                DEFAULTS.menu.greeting.to_string()
            } else {
                greeting
            }
        };
        (or_default(long), or_default(short))
    }

    /// Follows pass-through nodes from `node_id` until a node that decides where the caller
    /// ends up. Cycles and dead ends route to the default extension.
    fn resolve_destination(&self, node_id: &'a str) -> Destination {
        let fallback = || Destination::transfer(&self.options.default_extension, DEFAULTS.menu.context);
        let mut visited: AHashSet<&'a str> = AHashSet::new();
        let mut current = node_id;

        loop {
            if !visited.insert(current) {
                warn!(node_id = current, "Cycle while resolving menu destination");
                return fallback();
            }
            let Some(node) = self.graph.node(current) else {
                return fallback();
            };
            match &node.kind {
                NodeKind::ForwardToPhone(forward) => {
                    return match &forward.phone_number {
                        Some(number) => Destination::bridge(number, &self.options.pbx_domain),
                        None => fallback(),
                    };
                }
                NodeKind::HangUp(_) => return Destination::Hangup,
                NodeKind::PlayMessage(_) | NodeKind::GatherInput(_) => {
                    match self.graph.default_transition(current) {
                        Some(next) => current = next,
                        None => return fallback(),
                    }
                }
                NodeKind::IvrMenu(menu) => {
                    return Destination::transfer(
                        menu.extension.as_deref().unwrap_or(&self.options.default_extension),
                        DEFAULTS.menu.context,
                    );
                }
                NodeKind::Other(props) => {
                    let extension = match props.get("extension") {
                        Some(Value::String(s)) if !s.is_empty() => s.clone(),
                        Some(Value::Number(n)) => n.to_string(),
                        _ => self.options.default_extension.clone(),
                    };
                    return Destination::transfer(extension, DEFAULTS.menu.context);
                }
                _ => return fallback(),
            }
        }
    }

    fn default_description(&self) -> String {
        format!("IVR Menu: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Edge;
    use serde_json::{Map, json};

    fn node(id: &str, node_type: &str, properties: Value) -> Node {
        Node::new(id, node_type, properties.as_object().unwrap_or(&Map::new()))
    }

    #[test]
    fn pass_through_cycles_fall_back_to_the_default_extension() {
        let diagram = Diagram::new(
            vec![
                node("p1", "play-audio-tts", json!({})),
                node("p2", "play-audio-tts", json!({})),
            ],
            vec![Edge::new("e1", "p1", "p2"), Edge::new("e2", "p2", "p1")],
        );
        let options = CompileOptions::default();
        let extractor = MenuExtractor::new(&diagram, &options, "Loop");
        assert_eq!(
            extractor.resolve_destination("p1"),
            Destination::transfer("1000", "default")
        );
    }

    #[test]
    fn ivr_menu_targets_transfer_in_the_default_context() {
        let diagram = Diagram::new(
            vec![node("sub", "ivr-menu", json!({ "extension": "4000", "context": "public" }))],
            vec![],
        );
        let options = CompileOptions::default();
        let extractor = MenuExtractor::new(&diagram, &options, "Sub");
        assert_eq!(
            extractor.resolve_destination("sub"),
            Destination::transfer("4000", "default")
        );
    }

    #[test]
    fn other_nodes_transfer_to_their_extension() {
        let diagram = Diagram::new(
            vec![node("q", "queue", json!({ "extension": 2001 }))],
            vec![],
        );
        let options = CompileOptions::default();
        let extractor = MenuExtractor::new(&diagram, &options, "Queue");
        assert_eq!(
            extractor.resolve_destination("q"),
            Destination::transfer("2001", "default")
        );
    }
}
