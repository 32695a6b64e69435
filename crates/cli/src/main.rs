use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::CounselConfig;
use counsel_knowledge::{JsonKnowledgeStore, KnowledgeStore, LegalRight, NewRecord};
use counsel_matcher::ChatEngine;
use serde_json::json;
use std::path::PathBuf;

mod chat;
mod config;

#[derive(Parser)]
#[command(name = "counsel")]
#[command(about = "Answers everyday legal questions from a curated knowledge base", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./counsel.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Knowledge file (overrides the config file)
    #[arg(long, global = true, env = "COUNSEL_KNOWLEDGE")]
    knowledge: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask(AskArgs),

    /// Interactive conversation on stdin
    Chat,

    /// Suggest questions, from one category or at random
    Suggest(SuggestArgs),

    /// List categories
    Categories(JsonFlag),

    /// Find records mentioning a term
    Search(SearchArgs),

    /// Browse the Legal Rights Hub
    Rights(RightsArgs),

    /// Append a record to the knowledge file
    Add(AddArgs),

    /// Validate the knowledge file
    Check,
}

#[derive(Args)]
struct AskArgs {
    /// Question text
    query: Vec<String>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SuggestArgs {
    /// Category id; random questions when omitted
    #[arg(long)]
    category: Option<u32>,

    /// Maximum number of questions
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct JsonFlag {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Term matched against question, answer and keywords
    term: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RightsArgs {
    /// Show one right in full
    id: Option<u32>,

    /// Only rights of this category id
    #[arg(long)]
    category: Option<u32>,

    /// Term matched against title, description and details
    #[arg(long)]
    search: Option<String>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    category: u32,

    #[arg(long)]
    question: String,

    #[arg(long)]
    answer: String,

    /// Comma-separated keywords
    #[arg(long, default_value = "")]
    keywords: String,

    #[arg(long, default_value_t = 0)]
    priority: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Ask(args) => args.json,
        Commands::Suggest(args) => args.json,
        Commands::Categories(args) => args.json,
        Commands::Search(args) => args.json,
        Commands::Rights(args) => args.json,
        _ => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let cfg = CounselConfig::resolve(cli.config.as_deref(), cli.knowledge.clone())?;
    let store = JsonKnowledgeStore::new(&cfg.knowledge);

    match cli.command {
        Commands::Ask(args) => run_ask(args, store).await?,
        Commands::Chat => {
            let engine = load_engine(store).await;
            chat::run(&engine, cfg.suggestions).await?;
        }
        Commands::Suggest(args) => run_suggest(args, store, &cfg).await?,
        Commands::Categories(args) => run_categories(args, store).await?,
        Commands::Search(args) => run_search(args, store).await?,
        Commands::Rights(args) => run_rights(args, store).await?,
        Commands::Add(args) => run_add(args, store).await?,
        Commands::Check => run_check(store).await?,
    }

    Ok(())
}

/// Engine over the store; a failed first load still serves fallback answers
async fn load_engine(store: JsonKnowledgeStore) -> ChatEngine<JsonKnowledgeStore> {
    let engine = ChatEngine::new(store);
    if let Err(err) = engine.reload().await {
        log::warn!("Serving without a knowledge base: {err}");
    }
    engine
}

async fn run_ask(args: AskArgs, store: JsonKnowledgeStore) -> Result<()> {
    let engine = load_engine(store).await;
    let query = args.query.join(" ");
    let response = engine.respond(Some(&query));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.text);
    }
    Ok(())
}

async fn run_suggest(args: SuggestArgs, store: JsonKnowledgeStore, cfg: &CounselConfig) -> Result<()> {
    let limit = args.limit.unwrap_or(cfg.suggestions);
    let engine = load_engine(store).await;
    let questions = match args.category {
        Some(category_id) => engine
            .suggested_questions(category_id, limit)
            .await
            .context("Cannot read category questions")?,
        None => engine.random_suggestions(limit),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "questions": questions }))?);
    } else {
        for question in &questions {
            println!("{question}");
        }
    }
    Ok(())
}

async fn run_categories(args: JsonFlag, store: JsonKnowledgeStore) -> Result<()> {
    let categories = store.categories().await.context("Cannot read categories")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        for category in &categories {
            if category.description.is_empty() {
                println!("{:>3}  {}", category.id, category.name);
            } else {
                println!("{:>3}  {} - {}", category.id, category.name, category.description);
            }
        }
    }
    Ok(())
}

async fn run_search(args: SearchArgs, store: JsonKnowledgeStore) -> Result<()> {
    let records = store.search(&args.term).await.context("Search failed")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("#{} [priority {}] {}", record.id, record.priority, record.question);
        }
        if records.is_empty() {
            println!("No records mention '{}'.", args.term);
        }
    }
    Ok(())
}

async fn run_rights(args: RightsArgs, store: JsonKnowledgeStore) -> Result<()> {
    if let Some(id) = args.id {
        let right = store
            .right(id)
            .await
            .context("Cannot read legal rights")?
            .with_context(|| format!("No legal right with id {id}"))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&right)?);
        } else {
            print_right_details(&right);
        }
        return Ok(());
    }

    let mut rights = match (&args.search, args.category) {
        (Some(term), _) => store.search_rights(term).await,
        (None, Some(category_id)) => store.rights_by_category(category_id).await,
        (None, None) => store.rights().await,
    }
    .context("Cannot read legal rights")?;
    if let (Some(_), Some(category_id)) = (&args.search, args.category) {
        rights.retain(|r| r.category_id == category_id);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rights)?);
    } else if rights.is_empty() {
        println!("No legal rights found.");
    } else {
        for right in &rights {
            if right.description.is_empty() {
                println!("#{} {}", right.id, right.title);
            } else {
                println!("#{} {} - {}", right.id, right.title, right.description);
            }
        }
    }
    Ok(())
}

fn print_right_details(right: &LegalRight) {
    println!("{}", right.title);
    if !right.description.is_empty() {
        println!("\n{}", right.description);
    }
    if !right.details.is_empty() {
        println!("\n{}", right.details);
    }
    if let Some(source) = &right.source {
        println!("\nSource: {source}");
    }
}

async fn run_add(args: AddArgs, store: JsonKnowledgeStore) -> Result<()> {
    let record = store
        .add_record(NewRecord {
            category_id: args.category,
            question: args.question,
            answer: args.answer,
            keywords: args.keywords,
            priority: args.priority,
        })
        .await
        .with_context(|| format!("Cannot add record to {}", store.path().display()))?;
    println!("Added record #{}", record.id);
    Ok(())
}

async fn run_check(store: JsonKnowledgeStore) -> Result<()> {
    let document = store
        .load_document()
        .await
        .with_context(|| format!("Invalid knowledge file {}", store.path().display()))?;
    println!(
        "{}: {} categories, {} records, {} rights",
        store.path().display(),
        document.categories.len(),
        document.records.len(),
        document.rights.len()
    );
    Ok(())
}
