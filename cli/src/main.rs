//! Chronosense CLI — build an investigation graph from the command line and
//! generate attack hypotheses for it.

mod ollama;

use chronosense::{
    classify, summary, BackendMode, ChronosenseConfig, GraphStore, HypothesisBackend,
    InvestigationSession, PromptFocus, ReasoningBackend,
};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use ollama::OllamaBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "chronosense", version, about = "Chronosense DFIR investigation graph CLI")]
struct Cli {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(long, global = true, env = "CHRONOSENSE_CONFIG")]
    config: Option<PathBuf>,

    /// Hypothesis backend, overriding the configured mode
    #[arg(long, global = true)]
    backend: Option<BackendChoice>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendChoice {
    Heuristic,
    Ollama,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FocusChoice {
    Investigation,
    Assessment,
    Malware,
    Network,
}

impl From<FocusChoice> for PromptFocus {
    fn from(choice: FocusChoice) -> Self {
        match choice {
            FocusChoice::Investigation => PromptFocus::Investigation,
            FocusChoice::Assessment => PromptFocus::Assessment,
            FocusChoice::Malware => PromptFocus::Malware,
            FocusChoice::Network => PromptFocus::Network,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify artifacts without building a graph
    Classify {
        /// Artifact strings
        #[arg(required = true)]
        artifacts: Vec<String>,
    },
    /// Build a graph from artifacts and links, then generate hypotheses
    Analyze {
        /// Artifact to add (repeatable)
        #[arg(short, long = "artifact", required = true)]
        artifacts: Vec<String>,

        /// Link as A,B or A,B,RELATIONSHIP (repeatable)
        #[arg(short, long = "link")]
        links: Vec<String>,

        /// Question put to an external reasoner
        #[arg(long, default_value = "investigation")]
        focus: FocusChoice,

        /// Also print the prompt an external reasoner would receive
        #[arg(long)]
        show_prompt: bool,
    },
    /// Show which hypothesis backend would be used
    Status,
    /// Start an interactive investigation shell
    Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Classify { artifacts } => run_classify(artifacts, &cli.format),
        Commands::Analyze {
            artifacts,
            links,
            focus,
            show_prompt,
        } => run_analyze(&cli, artifacts, links, (*focus).into(), *show_prompt).await,
        Commands::Status => run_status(&cli).await,
        Commands::Shell => run_shell(&cli).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ChronosenseConfig> {
    let mut config = match &cli.config {
        Some(path) => ChronosenseConfig::load(path)?,
        None => ChronosenseConfig::default(),
    };
    match cli.backend {
        Some(BackendChoice::Heuristic) => config.backend.mode = BackendMode::Heuristic,
        Some(BackendChoice::Ollama) => config.backend.mode = BackendMode::External,
        None => {}
    }
    Ok(config)
}

async fn build_backend(config: &ChronosenseConfig) -> anyhow::Result<HypothesisBackend> {
    let candidate: Option<Arc<dyn ReasoningBackend>> = match config.backend.mode {
        BackendMode::External => {
            info!(
                "Probing Ollama at {} (model {})",
                config.backend.api_base_url, config.backend.model
            );
            Some(Arc::new(OllamaBackend::new(&config.backend)?))
        }
        BackendMode::Heuristic => None,
    };

    let backend = HypothesisBackend::select(&config.backend, candidate).await;
    if config.backend.mode == BackendMode::External && !backend.info().available {
        warn!("Ollama is not reachable; hypotheses will come from the heuristic engine");
    }
    Ok(backend)
}

/// Trimmed artifact argument of a shell command; empty input is rejected
fn parse_artifact(input: &str) -> anyhow::Result<&str> {
    let artifact = input.trim();
    if artifact.is_empty() {
        anyhow::bail!("missing artifact, expected :add <artifact>");
    }
    Ok(artifact)
}

/// Parse `A,B` or `A,B,RELATIONSHIP`
fn parse_link(link: &str) -> anyhow::Result<(String, String, Option<String>)> {
    let parts: Vec<&str> = link.splitn(3, ',').map(str::trim).collect();
    match parts.as_slice() {
        [a, b] => Ok((a.to_string(), b.to_string(), None)),
        [a, b, rel] if !rel.is_empty() => Ok((a.to_string(), b.to_string(), Some(rel.to_string()))),
        _ => anyhow::bail!("invalid link '{}', expected A,B or A,B,RELATIONSHIP", link),
    }
}

fn run_classify(artifacts: &[String], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = artifacts
                .iter()
                .map(|a| {
                    let kind = classify(a);
                    serde_json::json!({
                        "artifact": a,
                        "kind": kind,
                        "description": kind.describe(a),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            println!("artifact,kind,description");
            for a in artifacts {
                let kind = classify(a);
                println!(
                    "{},{},{}",
                    format_csv_value(a),
                    kind.as_str(),
                    format_csv_value(&kind.describe(a))
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Artifact", "Kind", "Description"]);
            for a in artifacts {
                let kind = classify(a);
                table.add_row(vec![
                    a.clone(),
                    format!("{} {}", kind.glyph(), kind.label()),
                    kind.describe(a),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

async fn run_analyze(
    cli: &Cli,
    artifacts: &[String],
    links: &[String],
    focus: PromptFocus,
    show_prompt: bool,
) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let mut store = GraphStore::with_config(&config.graph);

    for artifact in artifacts {
        store.add_node(artifact.as_str())?;
    }
    for link in links {
        let (a, b, relationship) = parse_link(link)?;
        debug!("Linking {} <-> {} ({:?})", a, b, relationship);
        match relationship {
            Some(rel) => store.add_edge(&a, &b, rel)?,
            None => store.connect(&a, &b)?,
        };
    }

    let description = summary::machine_description(&store);
    let prompt = focus.prompt(&store);
    let backend = build_backend(&config).await?;
    let analysis = backend.analyze_with_prompt(&description, &prompt).await;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "graph": store.snapshot(),
                "statistics": store.statistics(),
                "description": description,
                "prompt": prompt,
                "backend": backend.info(),
                "analysis": analysis,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            println!("a,b,relationship");
            for edge in store.snapshot().edges {
                println!(
                    "{},{},{}",
                    format_csv_value(&edge.a),
                    format_csv_value(&edge.b),
                    format_csv_value(edge.relationship.as_str())
                );
            }
        }
        OutputFormat::Table => {
            println!("{}", summary::human_summary(&store));
            println!();
            if show_prompt {
                println!("{}", prompt);
            } else {
                println!("{}", description);
            }
            println!();
            println!("{}", analysis.render());
        }
    }

    Ok(())
}

async fn run_status(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let backend = build_backend(&config).await?;
    let info = backend.info();

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        _ => {
            println!("Backend:     {}", info.backend);
            println!("Mode:        {:?}", info.mode);
            println!("Available:   {}", info.available);
            if let Some(model) = &info.model {
                println!("Model:       {}", model);
            }
            if let Some(max_tokens) = info.max_tokens {
                println!("Max tokens:  {}", max_tokens);
            }
            if let Some(temperature) = info.temperature {
                println!("Temperature: {}", temperature);
            }
        }
    }
    Ok(())
}

async fn run_shell(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let backend = build_backend(&config).await?;
    let session = InvestigationSession::new(GraphStore::with_config(&config.graph), backend);

    println!("Chronosense Investigation Shell");
    println!("Type :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("chronosense> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (command, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();

        let outcome: anyhow::Result<()> = match command {
            ":quit" | ":exit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :add <artifact>          — Add an artifact");
                println!("  :link <a>,<b>[,<rel>]    — Link two artifacts");
                println!("  :remove <artifact>       — Remove an artifact and its links");
                println!("  :clear                   — Reset the investigation");
                println!("  :summary                 — Show the graph summary");
                println!("  :describe                — Show the backend description");
                println!("  :analyze [focus]         — Generate hypotheses (investigation, assessment, malware, network)");
                println!("  :quit                    — Exit shell");
                Ok(())
            }
            ":add" => match parse_artifact(rest) {
                Ok(artifact) => session
                    .add_artifact(artifact)
                    .await
                    .map(|id| println!("Added {} as {}", artifact, id))
                    .map_err(Into::into),
                Err(e) => Err(e),
            },
            ":link" => match parse_link(rest) {
                Ok((a, b, rel)) => session
                    .link(&a, &b, rel.as_deref())
                    .await
                    .map(|_| println!("Linked {} <-> {}", a, b))
                    .map_err(Into::into),
                Err(e) => Err(e),
            },
            ":remove" => session
                .remove_artifact(rest)
                .await
                .map(|node| println!("Removed {}", node.artifact))
                .map_err(Into::into),
            ":clear" => {
                session.clear().await;
                println!("Graph cleared");
                Ok(())
            }
            ":summary" => {
                println!("{}", session.summary().await);
                Ok(())
            }
            ":describe" => {
                println!("{}", session.description().await);
                Ok(())
            }
            ":analyze" => match parse_focus(rest) {
                Ok(focus) => session
                    .analyze_focused(focus)
                    .await
                    .map(|analysis| println!("{}", analysis.render()))
                    .map_err(Into::into),
                Err(e) => Err(e),
            },
            other => Err(anyhow::anyhow!("unknown command '{}', try :help", other)),
        };

        if let Err(e) = outcome {
            eprintln!("Error: {}", e);
        }
    }

    println!("Bye!");
    Ok(())
}

/// Optional focus argument of `:analyze`
fn parse_focus(input: &str) -> anyhow::Result<PromptFocus> {
    if input.is_empty() {
        return Ok(PromptFocus::default());
    }
    <FocusChoice as clap::ValueEnum>::from_str(input, true)
        .map(Into::into)
        .map_err(|_| anyhow::anyhow!("unknown focus '{}'", input))
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
