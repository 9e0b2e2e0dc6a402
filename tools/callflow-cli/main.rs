use callflow::prelude::*;
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Deployment target selected on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetCli {
    Cloud,
    Dialplan,
    Menu,
    Auto,
}

impl From<TargetCli> for Target {
    fn from(target: TargetCli) -> Self {
        match target {
            TargetCli::Cloud => Target::Cloud,
            TargetCli::Dialplan => Target::PbxDialplan,
            TargetCli::Menu => Target::PbxMenu,
            TargetCli::Auto => Target::PbxAuto,
        }
    }
}

/// Compiles an IVR diagram exported by the workflow editor into a telephony flow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the diagram JSON file
    diagram_path: String,

    /// The artifact to produce
    #[arg(short, long, value_enum, default_value = "cloud")]
    target: TargetCli,

    /// Display name of the flow
    #[arg(short, long, default_value = "Untitled Flow")]
    name: String,

    /// Phone number or extension the PBX flow answers on
    #[arg(long)]
    number: Option<String>,

    /// Optional path to a JSON file with compile options
    #[arg(short, long)]
    config: Option<String>,

    /// SIP domain used for bridged calls
    #[arg(long, env = "CALLFLOW_PBX_DOMAIN")]
    domain: Option<String>,

    /// Caller id presented on outbound legs and messages
    #[arg(long, env = "CALLFLOW_CALLER_ID")]
    caller_id: Option<String>,

    /// Base URL receiving recording status callbacks
    #[arg(long, env = "CALLFLOW_WEBHOOK_BASE_URL")]
    webhook_base_url: Option<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => CompileOptions::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => CompileOptions::default(),
    };
    if let Some(domain) = cli.domain {
        options.pbx_domain = domain;
    }
    if cli.caller_id.is_some() {
        options.caller_id = cli.caller_id;
    }
    if cli.webhook_base_url.is_some() {
        options.webhook_base_url = cli.webhook_base_url;
    }

    let json = fs::read_to_string(&cli.diagram_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read diagram file '{}': {}",
            &cli.diagram_path, e
        ))
    });
    let diagram = Diagram::from_editor_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load diagram: {}", e)));

    let compiler = Compiler::builder(diagram)
        .named(cli.name)
        .with_options(options)
        .build();
    let routing = cli.number.map(Routing::for_destination);

    let artifact = compiler
        .compile_for(cli.target.into(), routing.as_ref())
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));

    let output = match artifact {
        Artifact::Cloud(flow) => to_pretty_json(&flow),
        Artifact::Dialplan { xml, .. } => xml,
        Artifact::Menu { rows, .. } => to_pretty_json(&rows),
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output) {
        exit_with_error(&format!("Failed to write output: {}", e));
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialise output: {}", e)))
}

/// Logs go to stderr so stdout only ever carries the artifact. `RUST_LOG` overrides the level.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_writer(io::stderr).with_target(true);

    if let Err(e) = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
    {
        eprintln!("Failed to initialize tracing: {}", e);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
