//! # Callflow - IVR Diagram Compiler
//!
//! **Callflow** turns call flows drawn as node-and-edge diagrams in a visual editor into
//! executable telephony flows for two very different engines: a JSON state machine for a cloud
//! call-flow service, and dialplan XML or relational IVR-menu rows for a PBX.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Diagram**: Parse the editor's JSON with `Diagram::from_editor_json`, or implement
//!     `IntoDiagram` for your own format. Node properties are validated into typed `NodeKind`s here.
//! 2.  **Build a Compiler**: Use `Compiler::builder` with the diagram, a display name and
//!     `CompileOptions` (PBX domain, caller id, webhook base URL).
//! 3.  **Compile**: Call `compile_for` with a `Target`. The result is an `Artifact` holding the
//!     structured flow together with its rendered form.
//!
//! Only two conditions fail a compile: a diagram without nodes and a diagram without a start
//! node. Everything else (unknown node types, dangling edges, malformed menu options) degrades
//! into defaults and is reported through `tracing`.
//!
//! ## Quick Start
//!
//! ```rust
//! use callflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = r#"{
//!         "nodes": [
//!             {"id": "start", "type": "workflow-node", "data": {"type": "answer-call", "properties": {}}},
//!             {"id": "bye", "type": "workflow-node", "data": {"type": "hang-up-call", "properties": {"reason": "Done"}}}
//!         ],
//!         "edges": [{"id": "e1", "source": "start", "target": "bye"}]
//!     }"#;
//!
//!     let diagram = Diagram::from_editor_json(json)?;
//!     let compiler = Compiler::builder(diagram).named("Support Line").build();
//!
//!     // Cloud state machine
//!     let flow = compiler.compile_cloud()?;
//!     assert_eq!(flow.initial_state, "start");
//!
//!     // PBX dialplan answering on extension 2000
//!     let routing = Routing::for_destination("2000");
//!     if let Artifact::Dialplan { xml, .. } = compiler.compile_for(Target::PbxDialplan, Some(&routing))? {
//!         assert!(xml.contains(r#"<context name="default">"#));
//!     }
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod config;
pub mod defaults;
pub mod diagram;
pub mod error;
pub mod flow;
pub mod graph;
pub mod prelude;
pub mod render;
pub mod target;
