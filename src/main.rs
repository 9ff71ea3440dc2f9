use clap::{Parser, Subcommand};
use rolodex::seed::demo_contacts;
use rolodex::{
    Contact, ContactId, ContactSource, MatchMode, MatcherConfig, SearchConfig, SearchHit,
    SearchPipeline, SearchState, StorageManager,
};
use rolodex_search::DEFAULT_DEBOUNCE_MS;
use rolodex_similarity::{DEFAULT_NAME_THRESHOLD, DEFAULT_PHONE_THRESHOLD};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// A contact book with typo-tolerant live search
#[derive(Parser, Debug)]
#[command(name = "rolodex")]
#[command(about = "A contact book with typo-tolerant live search", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Quiet period before a typed query is searched
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Minimum name similarity for a match
    #[arg(long, default_value_t = DEFAULT_NAME_THRESHOLD)]
    name_threshold: f32,

    /// Minimum phone number similarity for a match
    #[arg(long, default_value_t = DEFAULT_PHONE_THRESHOLD)]
    phone_threshold: f32,

    /// Matching mode: fuzzy or substring
    #[arg(long, default_value = "fuzzy")]
    mode: MatchMode,

    /// Load the demo address book if the store is empty
    #[arg(long)]
    seed: bool,

    /// Maximum rows printed per result list
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        relationship: String,
    },
    /// Change fields of an existing contact
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        relationship: Option<String>,
    },
    /// Show one contact
    Show { id: u64 },
    /// Number of contacts
    Count,
    /// All contacts in name order
    List,
    /// Run one query through the search pipeline
    Search { query: String },
    /// Type-ahead search: every line read from stdin replaces the query
    Interactive,
    /// Create, list or delete backups
    Backup {
        #[arg(long)]
        list: bool,
        #[arg(long, value_name = "NAME")]
        delete: Option<String>,
    },
    /// Replace the collection with a backup
    Restore { name: String },
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    contact: &'a Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
}

struct Output {
    json: bool,
    limit: usize,
}

impl Output {
    fn contact(&self, contact: &Contact) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(contact)?);
        } else {
            println!("id:           {}", contact.id);
            println!("name:         {}", contact.name);
            println!("phone:        {}", contact.phone_number);
            println!("email:        {}", contact.email);
            println!("relationship: {}", contact.relationship);
        }
        Ok(())
    }

    fn hits(&self, hits: &[SearchHit]) -> anyhow::Result<()> {
        let shown = &hits[..hits.len().min(self.limit)];
        if self.json {
            let rows: Vec<Row> = shown
                .iter()
                .map(|hit| Row {
                    contact: &hit.contact,
                    score: hit.score,
                })
                .collect();
            println!("{}", serde_json::to_string(&rows)?);
            return Ok(());
        }

        for hit in shown {
            let score = hit.score.map(|s| format!("{:.3}", s)).unwrap_or_default();
            println!(
                "{:>5}  {:<24} {:<20} {}",
                hit.contact.id, hit.contact.name, hit.contact.phone_number, score
            );
        }
        if hits.len() > shown.len() {
            println!("       ... {} more", hits.len() - shown.len());
        }
        Ok(())
    }

    fn state(&self, state: &SearchState) -> anyhow::Result<()> {
        match state {
            SearchState::Ready(results) => {
                if !self.json {
                    println!("-- {} result(s) for {:?}", results.len(), results.query);
                }
                self.hits(&results.hits)
            }
            SearchState::Degraded { reason, .. } => {
                println!("-- search unavailable: {}", reason);
                Ok(())
            }
        }
    }
}

fn search_config(args: &Args) -> anyhow::Result<SearchConfig> {
    let config = SearchConfig {
        debounce_ms: args.debounce_ms,
        matcher: MatcherConfig {
            name_threshold: args.name_threshold,
            phone_threshold: args.phone_threshold,
            mode: args.mode,
            ..MatcherConfig::default()
        },
        ..SearchConfig::default()
    };
    config.validate()?;
    Ok(config)
}

async fn interactive(
    storage: &StorageManager,
    config: SearchConfig,
    output: Output,
) -> anyhow::Result<()> {
    let pipeline = SearchPipeline::spawn(storage, config)?;
    let mut results = pipeline.observe_results();
    let initial = results.borrow_and_update().clone();
    output.state(&initial)?;

    let printer = tokio::spawn(async move {
        while results.changed().await.is_ok() {
            let state = results.borrow_and_update().clone();
            if let Err(e) = output.state(&state) {
                eprintln!("output error: {}", e);
            }
        }
    });

    eprintln!("Type to search, an empty line lists everyone, Ctrl-D quits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        pipeline.set_query(line);
    }

    let stats = pipeline.stats();
    info!(
        passes = stats.passes_started,
        superseded = stats.passes_superseded,
        scored = stats.contacts_scored,
        "Interactive session finished"
    );
    drop(pipeline);
    printer.await.ok();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Rolodex v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);

    let config = search_config(&args)?;
    let storage = StorageManager::open(&args.data_dir)?;

    if args.seed && storage.all().is_empty() {
        storage.insert_many(demo_contacts())?;
        storage.sync()?;
        info!("Seeded {} demo contacts", storage.all().len());
    }

    let output = Output {
        json: args.json,
        limit: args.limit,
    };

    match args.command {
        Command::Add {
            name,
            phone,
            email,
            relationship,
        } => {
            let contact = Contact::new(name, phone)
                .with_email(email)
                .with_relationship(relationship);
            let id = storage.insert(contact)?;
            storage.sync()?;
            println!("Added contact {}", id);
        }
        Command::Update {
            id,
            name,
            phone,
            email,
            relationship,
        } => {
            let mut contact = storage.get_by_id(ContactId(id))?;
            if let Some(name) = name {
                contact.name = name;
            }
            if let Some(phone) = phone {
                contact.phone_number = phone;
            }
            if let Some(email) = email {
                contact.email = email;
            }
            if let Some(relationship) = relationship {
                contact.relationship = relationship;
            }
            storage.update(contact)?;
            storage.sync()?;
            println!("Updated contact {}", id);
        }
        Command::Show { id } => {
            output.contact(&storage.get_by_id(ContactId(id))?)?;
        }
        Command::Count => {
            println!("{}", storage.count()?);
        }
        Command::List => {
            let pipeline = SearchPipeline::spawn(&storage, config)?;
            output.state(&pipeline.current())?;
        }
        Command::Search { query } => {
            let pipeline = SearchPipeline::spawn(&storage, config)?;
            let state = pipeline.search(query).await?;
            output.state(&state)?;
        }
        Command::Interactive => {
            interactive(&storage, config, output).await?;
        }
        Command::Backup { list, delete } => {
            if let Some(name) = delete {
                if storage.delete_backup(&name)? {
                    println!("Deleted backup {}", name);
                } else {
                    println!("No backup named {}", name);
                }
            } else if list {
                for backup in storage.list_backups()? {
                    println!(
                        "{}  {:>8} bytes  {}",
                        backup.name,
                        backup.size,
                        backup.creation_time.unwrap_or_default()
                    );
                }
            } else {
                let backup = storage.create_backup()?;
                println!("Created backup {} ({} bytes)", backup.name, backup.size);
            }
        }
        Command::Restore { name } => {
            let restored = storage.restore_backup(&name)?;
            println!("Restored {} contacts from {}", restored, name);
        }
    }

    Ok(())
}
