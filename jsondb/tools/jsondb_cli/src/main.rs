// FICHIER : jsondb/tools/jsondb_cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::{json, Value};
use std::path::PathBuf;

use jsondb::json_db::collections::Document;
use jsondb::json_db::query::{
    create_collection, delete_all_from, delete_from, insert_into, select_from, update, Filter,
};
use jsondb::utils::{init_logging, json};
use jsondb::{CollectionsManager, JsonDbConfig, JsonDbError, QueryEngine, StorageEngine};

#[derive(Parser)]
#[command(
    name = "jsondb_cli",
    version,
    about = "Outil d'administration pour la base documentaire jsondb"
)]
struct Cli {
    #[arg(long, env = "JSONDB_ROOT", help = "Dossier racine de la base")]
    root: PathBuf,

    #[arg(long, env = "JSONDB_LOG_DIR", help = "Dossier des logs JSON journaliers")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Les arguments JSON acceptent un littéral ou `@chemin/vers/fichier.json`.
#[derive(Subcommand)]
enum Commands {
    CreateCollection {
        name: String,
    },
    Insert {
        collection: String,
        document: String,
    },
    Select {
        collection: String,
        #[arg(long)]
        filter: Option<String>,
    },
    Update {
        collection: String,
        values: String,
        #[arg(long)]
        filter: Option<String>,
    },
    Delete {
        collection: String,
        #[arg(long)]
        filter: String,
    },
    DeleteAll {
        collection: String,
    },
    ListCollections,
    DropCollection {
        name: String,
    },
    /// Soumet un descripteur `{"type": ..., ...}` lu depuis un fichier.
    Submit {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_dir.as_deref());

    let storage = StorageEngine::open(JsonDbConfig::new(&cli.root))
        .await
        .with_context(|| format!("Ouverture de la racine {:?}", cli.root))?;
    let mgr = CollectionsManager::new(&storage);

    match run(&mgr, cli.command).await {
        Ok(output) => {
            println!("{}", json::stringify_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(code = e.code(), "{}", e);
            eprintln!(
                "{}",
                json::stringify_pretty(&json!({ "error": e.code(), "message": e }))?
            );
            std::process::exit(1);
        }
    }
}

async fn run(mgr: &CollectionsManager<'_>, command: Commands) -> jsondb::Result<Value> {
    let engine = QueryEngine::new(mgr);

    let outcome = match command {
        // --- GESTION DES COLLECTIONS ---
        Commands::CreateCollection { name } => engine.submit(create_collection(name)).await?,
        Commands::ListCollections => return Ok(json!(mgr.list_collections().await?)),
        Commands::DropCollection { name } => {
            let dropped = mgr.drop_collection(&name).await?;
            return Ok(json!({ "dropped": dropped }));
        }

        // --- REQUÊTES ---
        Commands::Insert {
            collection,
            document,
        } => {
            let document = parse_document(&document)?;
            engine.submit(insert_into(collection, document)).await?
        }
        Commands::Select { collection, filter } => {
            let filter = parse_filter(filter.as_deref())?;
            engine.submit(select_from(collection).where_(filter)).await?
        }
        Commands::Update {
            collection,
            values,
            filter,
        } => {
            let values = parse_document(&values)?;
            let filter = parse_filter(filter.as_deref())?;
            engine
                .submit(update(collection).to(values).where_(filter))
                .await?
        }
        Commands::Delete { collection, filter } => {
            let filter = parse_document(&filter)?;
            engine.submit(delete_from(collection).where_(filter)).await?
        }
        Commands::DeleteAll { collection } => engine.submit(delete_all_from(collection)).await?,
        Commands::Submit { file } => {
            let content = std::fs::read_to_string(&file)?;
            let descriptor: Value = serde_json::from_str(&content)?;
            engine.submit(descriptor).await?
        }
    };

    Ok(serde_json::to_value(outcome)?)
}

fn read_json_arg(raw: &str) -> jsondb::Result<String> {
    match raw.strip_prefix('@') {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(raw.to_string()),
    }
}

fn parse_document(raw: &str) -> jsondb::Result<Document> {
    let content = read_json_arg(raw)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        other => Err(JsonDbError::InvalidQuery(format!(
            "un objet JSON est attendu, reçu : {}",
            other
        ))),
    }
}

fn parse_filter(raw: Option<&str>) -> jsondb::Result<Filter> {
    match raw {
        Some(raw) => Ok(Filter::new(parse_document(raw)?)),
        None => Ok(Filter::all()),
    }
}
