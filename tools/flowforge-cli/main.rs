use clap::{Parser, Subcommand};
use flowforge::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Validate and compile visual workflow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Editor configuration (tools, properties, schemas) as JSON
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a graph document for incomplete nodes
    Validate {
        /// Path to the graph or export bundle JSON file
        graph_path: PathBuf,
    },
    /// Compile a graph document into its workflow definition
    Compile {
        graph_path: PathBuf,
        /// Write the definition here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Fail unless exactly one node has no incoming edge
        #[arg(long)]
        strict: bool,
    },
    /// Write a timestamped export bundle (logic + graph) into a directory
    Bundle {
        graph_path: PathBuf,
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Validate { graph_path } => run_validate(config, graph_path),
        Command::Compile {
            graph_path,
            out,
            strict,
        } => run_compile(config, graph_path, out, strict),
        Command::Bundle { graph_path, dir } => run_bundle(config, graph_path, dir),
    }
}

fn load_document(config: &EditorConfig, graph_path: &Path) -> GraphDocument {
    let value = ExportBundle::read_file(graph_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read graph: {}", e)));
    let rules = ConnectionRules {
        allow_self_loops: config.allow_self_loops,
    };
    import_graph(value, rules)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to import graph: {}", e)))
}

fn run_validate(config: EditorConfig, graph_path: PathBuf) {
    let document = load_document(&config, &graph_path);
    let schemas = SchemaCatalog::new(config.schemas.clone());
    let properties: Vec<PropertyOption> = config.properties.iter().map(|p| p.normalized()).collect();

    match Validator::new(&schemas, &properties)
        .with_start_type(&config.start_type)
        .validate(&document)
    {
        Ok(()) => println!(
            "Document is complete: {} node(s), {} edge(s)",
            document.len(),
            document.edge_count()
        ),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn run_compile(config: EditorConfig, graph_path: PathBuf, out: Option<PathBuf>, strict: bool) {
    let document = load_document(&config, &graph_path);
    let schemas = SchemaCatalog::new(config.schemas.clone());
    let properties: Vec<PropertyOption> = config.properties.iter().map(|p| p.normalized()).collect();

    let compile_start = Instant::now();
    let definition = Compiler::builder(&document)
        .with_schemas(&schemas)
        .with_properties(&properties)
        .with_start_type(&config.start_type)
        .strict_entry(strict)
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let compile_duration = compile_start.elapsed();

    let json = serde_json::to_string_pretty(&definition)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize definition: {}", e)));
    match out {
        Some(path) => {
            fs::write(&path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Could not write '{}': {}", path.display(), e))
            });
            println!("  -> Wrote workflow definition to '{}'", path.display());
        }
        None => println!("{}", json),
    }
    eprintln!(
        "Compiled {} step(s) in {:?}, start node: {}",
        definition.nodes.len(),
        compile_duration,
        definition.start_node_id.as_deref().unwrap_or("<none>")
    );
}

fn run_bundle(config: EditorConfig, graph_path: PathBuf, dir: PathBuf) {
    let mut editor = FlowEditor::new(config);
    if !editor.import_file(&graph_path) {
        report_notices(&mut editor);
        std::process::exit(1);
    }

    let Some(bundle) = editor.get_export_data() else {
        report_notices(&mut editor);
        std::process::exit(1);
    };
    let path = bundle
        .write_to_dir(&dir, &editor.config().export_prefix)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("  -> Wrote export bundle to '{}'", path.display());
}

fn report_notices(editor: &mut FlowEditor) {
    for notice in editor.take_notices() {
        match notice.node_id {
            Some(ref node) => eprintln!("{} (node {})", notice, node),
            None => eprintln!("{}", notice),
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
