use crate::config::CompileOptions;
use crate::diagram::Diagram;
use crate::error::CompileError;
use crate::flow::{CloudFlow, FlowFlags, IvrMenu, PbxFlow, State};
use crate::graph::Graph;
use crate::render::{Dialplan, MenuRows};
use crate::target::{Artifact, DialplanContext, Routing, Target};
use indexmap::IndexMap;
use std::iter;
use tracing::{debug, info};

mod cloud;
mod menu;
mod pbx;
pub mod translate;

pub use cloud::CloudTranslator;
pub use menu::MenuExtractor;
pub use pbx::PbxTranslator;
use translate::{Translator, translate_node};

/// Compiles one diagram into any of the supported targets.
///
/// Holds no state between calls. Every method is a pure function of the diagram, the flow name
/// and the options, so compiling twice gives identical output.
pub struct Compiler {
    diagram: Diagram,
    name: String,
    options: CompileOptions,
}

pub struct CompilerBuilder {
    diagram: Diagram,
    name: String,
    options: CompileOptions,
}

impl CompilerBuilder {
    pub fn new(diagram: Diagram) -> Self {
        Self {
            diagram,
            name: "Untitled Flow".to_string(),
            options: CompileOptions::default(),
        }
    }

    /// Display name used for the dialplan extension, menu rows and descriptions.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            diagram: self.diagram,
            name: self.name,
            options: self.options,
        }
    }
}

impl Compiler {
    pub fn builder(diagram: Diagram) -> CompilerBuilder {
        CompilerBuilder::new(diagram)
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles the diagram into the cloud engine's state machine.
    ///
    /// The start state comes first in `states`, followed by every other node in diagram order.
    pub fn compile_cloud(&self) -> Result<CloudFlow, CompileError> {
        let graph = self.diagram.graph();
        let start = start_node_id(&graph)?;
        let translator = CloudTranslator::new(&self.options);

        let ordered = iter::once(start).chain(
            self.diagram
                .nodes
                .iter()
                .map(|n| n.id.as_str())
                .filter(|id| *id != start),
        );
        let states = assemble(&translator, &graph, ordered);
        info!(name = %self.name, states = states.len(), initial_state = start, "Compiled cloud flow");

        Ok(CloudFlow {
            description: self.options.description.clone(),
            states,
            initial_state: start.to_string(),
            flags: FlowFlags {
                allow_concurrent_calls: false,
            },
        })
    }

    /// Compiles the diagram into the PBX state machine, before dialplan rendering.
    ///
    /// Without routing the flow answers on the configured default extension in `default`.
    pub fn compile_pbx(&self, routing: Option<&Routing>) -> Result<PbxFlow, CompileError> {
        let graph = self.diagram.graph();
        let start = start_node_id(&graph)?;
        let states = assemble(
            &PbxTranslator,
            &graph,
            self.diagram.nodes.iter().map(|n| n.id.as_str()),
        );
        let (extension, context) = self.routing_or_default(routing);
        info!(name = %self.name, states = states.len(), %extension, %context, "Compiled PBX flow");

        Ok(PbxFlow {
            description: self.options.description.clone(),
            extension,
            context: context.to_string(),
            states,
            initial_state: start.to_string(),
        })
    }

    /// Extracts the IVR menu answering on `extension` in `context`. Never fails; check
    /// [`IvrMenu::is_found`] before deploying the result.
    pub fn extract_menu(&self, extension: &str, context: &str) -> IvrMenu {
        let menu =
            MenuExtractor::new(&self.diagram, &self.options, &self.name).extract(extension, context);
        info!(name = %self.name, origin = ?menu.origin, options = menu.options.len(), "Extracted IVR menu");
        menu
    }

    /// Compiles and renders the artifact for `target`.
    pub fn compile_for(
        &self,
        target: Target,
        routing: Option<&Routing>,
    ) -> Result<Artifact, CompileError> {
        if self.diagram.is_empty() {
            return Err(CompileError::EmptyWorkflow);
        }
        debug!(name = %self.name, ?target, "Compiling");

        match target {
            Target::Cloud => self.compile_cloud().map(Artifact::Cloud),
            Target::PbxDialplan => self.dialplan_artifact(routing),
            Target::PbxMenu => Ok(self.menu_artifact(self.menu_for(routing))),
            Target::PbxAuto => {
                let menu = self.menu_for(routing);
                if menu.is_found() {
                    Ok(self.menu_artifact(menu))
                } else {
                    debug!(name = %self.name, "No menu pattern, falling back to dialplan");
                    self.dialplan_artifact(routing)
                }
            }
        }
    }

    fn dialplan_artifact(&self, routing: Option<&Routing>) -> Result<Artifact, CompileError> {
        let flow = self.compile_pbx(routing)?;
        let xml = Dialplan::from_flow(&flow, &self.name, &self.options.pbx_domain).to_xml();
        Ok(Artifact::Dialplan { flow, xml })
    }

    fn menu_for(&self, routing: Option<&Routing>) -> IvrMenu {
        let (extension, context) = self.routing_or_default(routing);
        self.extract_menu(&extension, context.as_str())
    }

    fn menu_artifact(&self, menu: IvrMenu) -> Artifact {
        let rows = MenuRows::from_menu(&menu, &self.name);
        Artifact::Menu { menu, rows }
    }

    fn routing_or_default(&self, routing: Option<&Routing>) -> (String, DialplanContext) {
        match routing {
            Some(routing) => (routing.destination.clone(), routing.context),
            None => (self.options.default_extension.clone(), DialplanContext::Default),
        }
    }
}

fn start_node_id<'a>(graph: &Graph<'a>) -> Result<&'a str, CompileError> {
    if graph.diagram().is_empty() {
        return Err(CompileError::EmptyWorkflow);
    }
    graph
        .start_node()
        .map(|node| node.id.as_str())
        .ok_or(CompileError::NoStartNode)
}

fn assemble<'a, T: Translator>(
    translator: &T,
    graph: &Graph<'a>,
    ids: impl Iterator<Item = &'a str>,
) -> IndexMap<String, State<T::Action>> {
    ids.filter_map(|id| graph.node(id))
        .map(|node| {
            let state = translate_node(translator, node, graph);
            debug!(node_id = %node.id, node_type = %node.type_name(), kind = %state.kind, "Translated node");
            (node.id.clone(), state)
        })
        .collect()
}
