//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load a diagram, compile it and inspect the result.
//!
//! # Example
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/diagram.json")?;
//! let diagram = Diagram::from_editor_json(&json)?;
//!
//! let compiler = Compiler::builder(diagram)
//!     .named("Main Menu")
//!     .with_options(CompileOptions::from_file("path/to/callflow.json")?)
//!     .build();
//!
//! match compiler.compile_for(Target::PbxAuto, None)? {
//!     Artifact::Menu { rows, .. } => println!("{} menu options", rows.options.len()),
//!     Artifact::Dialplan { xml, .. } => println!("{}", xml),
//!     Artifact::Cloud(flow) => println!("{:?}", flow.to_json()?),
//! }
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{Compiler, CompilerBuilder};
pub use crate::config::CompileOptions;
pub use crate::target::{Artifact, DialplanContext, Routing, Target};

// Input model
pub use crate::diagram::{Diagram, Edge, IntoDiagram, Node, NodeKind};

// Compiled flows
pub use crate::flow::{CloudFlow, Destination, IvrMenu, MenuOption, MenuOrigin, PbxFlow, Transitions};
pub use crate::render::{Dialplan, MenuRows};

// Error types
pub use crate::error::{CompileError, ConfigError, DiagramConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
