use crate::diagram::{ForwardToPhone, GatherInput, HangUp, Node, NodeKind, PlayMessage, Recording, SendSms};
use crate::flow::{Action, State, Transitions};
use crate::graph::Graph;

/// Per-target translation of typed node properties into that target's action vocabulary.
///
/// Implementors only decide the action payload. Which edge becomes which transition is shared by
/// every target and lives in [`transitions_for`].
pub trait Translator {
    type Action: Action;

    fn answer_call(&self) -> Self::Action;
    /// `None` when the node carries no usable message; the node then becomes a silent step.
    fn play_message(&self, play: &PlayMessage) -> Option<Self::Action>;
    fn gather_input(&self, gather: &GatherInput) -> Self::Action;
    fn forward_to_phone(&self, forward: &ForwardToPhone) -> Self::Action;
    fn hang_up(&self, hang_up: &HangUp) -> Self::Action;
    fn recording(&self, recording: &Recording) -> Self::Action;
    fn send_sms(&self, sms: &SendSms) -> Self::Action;
    /// Placeholder for node types without a dedicated translation.
    fn passthrough(&self, node_type: &str) -> Self::Action;
    /// Placeholder for a play node with nothing to play.
    fn silent(&self) -> Self::Action;
}

/// Outcome names of a forward node, paired with the edge label that selects each one.
pub const FORWARD_OUTCOMES: [(&str, &str); 5] = [
    ("answered", "Success"),
    ("no_answer", "No Answer"),
    ("busy", "Busy"),
    ("declined", "Decline"),
    ("failed", "Error"),
];

/// Resolves every outcome the node's type defines against the node's outgoing edges.
///
/// Outcomes without a matching edge are kept with a `None` target.
pub fn transitions_for(node: &Node, graph: &Graph<'_>) -> Transitions {
    let id = node.id.as_str();
    match &node.kind {
        NodeKind::GatherInput(_) => Transitions::new()
            .with("next", graph.default_transition(id))
            .with("timeout", graph.resolve_transition(id, "timeout")),
        NodeKind::ForwardToPhone(_) => FORWARD_OUTCOMES
            .iter()
            .fold(Transitions::new(), |transitions, (outcome, label)| {
                transitions.with(outcome, graph.resolve_transition(id, label))
            }),
        NodeKind::HangUp(_) => Transitions::new(),
        NodeKind::Recording(_) => {
            Transitions::new().with("recording_complete", graph.default_transition(id))
        }
        NodeKind::SendSms(_) => Transitions::new()
            .with("sent", graph.default_transition(id))
            .with("failed", graph.resolve_transition(id, "Failure")),
        NodeKind::AnswerCall
        | NodeKind::PlayMessage(_)
        | NodeKind::IvrMenu(_)
        | NodeKind::Other(_) => Transitions::new().with("next", graph.default_transition(id)),
    }
}

/// Translates one node into a state of the translator's target.
pub fn translate_node<T: Translator>(translator: &T, node: &Node, graph: &Graph<'_>) -> State<T::Action> {
    let action = match &node.kind {
        NodeKind::AnswerCall => translator.answer_call(),
        NodeKind::PlayMessage(play) => translator
            .play_message(play)
            .unwrap_or_else(|| translator.silent()),
        NodeKind::GatherInput(gather) => translator.gather_input(gather),
        NodeKind::ForwardToPhone(forward) => translator.forward_to_phone(forward),
        NodeKind::HangUp(hang_up) => translator.hang_up(hang_up),
        NodeKind::Recording(recording) => translator.recording(recording),
        NodeKind::SendSms(sms) => translator.send_sms(sms),
        NodeKind::IvrMenu(_) | NodeKind::Other(_) => translator.passthrough(node.type_name()),
    };
    State::new(node.id.as_str(), transitions_for(node, graph), action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Diagram, Edge};
    use serde_json::{Map, json};

    fn node(id: &str, node_type: &str) -> Node {
        Node::new(id, node_type, &Map::new())
    }

    #[test]
    fn every_defined_outcome_is_present_without_edges() {
        let diagram = Diagram::new(
            vec![node("f", "forward-to-phone"), node("s", "send-sms"), node("h", "hang-up")],
            vec![],
        );
        let graph = diagram.graph();

        let forward = transitions_for(&diagram.nodes[0], &graph);
        assert_eq!(
            forward.outcomes().collect::<Vec<_>>(),
            vec!["answered", "no_answer", "busy", "declined", "failed"]
        );
        assert_eq!(forward.targets().count(), 0);

        let sms = transitions_for(&diagram.nodes[1], &graph);
        assert!(sms.defines("sent") && sms.defines("failed"));
        assert!(transitions_for(&diagram.nodes[2], &graph).is_empty());
    }

    #[test]
    fn gather_timeout_uses_its_labelled_edge() {
        let diagram = Diagram::new(
            vec![node("g", "gather-input"), node("a", "hang-up"), node("b", "hang-up")],
            vec![
                Edge::new("e1", "g", "a"),
                Edge::new("e2", "g", "b").labeled("timeout"),
            ],
        );
        let transitions = transitions_for(&diagram.nodes[0], &diagram.graph());
        assert_eq!(
            serde_json::to_value(&transitions).unwrap(),
            json!({ "next": "a", "timeout": "b" })
        );
    }
}
