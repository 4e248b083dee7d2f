use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::classifier::Classifier;
use crate::enrich::{Enricher, PayloadRefs, parse_payload};
use crate::locator::{FileCache, LookupCache, MemoryCache, SessionLocator, present};
use crate::models::{ExtractOptions, OutputFormat};
use crate::notify::{NotifyConfig, render_notification};
use crate::pipeline::render_entry;
use crate::utils::environment::debug_from_env;
use crate::utils::{Settings, logging};

#[derive(Parser)]
#[command(name = "session-enricher")]
#[command(version = "0.1.0")]
#[command(about = "Enrich Claude Code hook payloads with session context", long_about = None)]
pub struct Cli {
    /// Emit diagnostic traces on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the user inputs of a session (payload on stdin unless a session flag is given)
    Extract {
        #[command(flatten)]
        extract: ExtractArgs,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Read a hook payload on stdin and print it with project_name and user_inputs merged in
    Enrich {
        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// Read a hook payload on stdin and print the notification text for it
    Render {
        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// Print the log file a session resolves to
    Resolve {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Output shaping
    #[arg(long, value_enum, default_value_t = OutputFormat::Basic)]
    pub format: OutputFormat,

    /// Maximum number of entries (0 = unlimited)
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Newest entries first
    #[arg(long)]
    pub reverse: bool,

    /// Accepted for compatibility; entries are always fenced
    #[arg(long)]
    pub include_multiline: bool,
}

impl ExtractArgs {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            format: self.format,
            limit: self.limit,
            reverse: self.reverse,
            include_multiline: self.include_multiline,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    #[arg(long)]
    pub session_id: Option<String>,

    #[arg(long)]
    pub transcript_path: Option<String>,
}

impl SessionArgs {
    fn refs(&self) -> PayloadRefs {
        PayloadRefs {
            session_id: present(self.session_id.as_deref()).map(str::to_string),
            transcript_path: present(self.transcript_path.as_deref()).map(str::to_string),
        }
    }

    fn is_empty(&self) -> bool {
        self.session_id.is_none() && self.transcript_path.is_none()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug || debug_from_env());
    let settings = Settings::from_env()?;

    match &cli.command {
        Commands::Extract { extract, session } => run_extract(&settings, extract, session),
        Commands::Enrich { extract } => run_enrich(&settings, extract),
        Commands::Render { extract } => run_render(&settings, extract),
        Commands::Resolve { session } => run_resolve(&settings, session),
    }
}

fn build_enricher(settings: &Settings) -> Enricher<Box<dyn LookupCache>> {
    let cache: Box<dyn LookupCache> = match &settings.cache_dir {
        Some(dir) => Box::new(FileCache::new(dir)),
        None => Box::new(MemoryCache::new()),
    };
    Enricher::new(
        SessionLocator::new(&settings.projects_dir, cache),
        Classifier::new(settings.max_text_length),
        settings.unknown_project.clone(),
    )
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("Failed to read hook payload from stdin")?;
    Ok(buffer)
}

fn run_extract(settings: &Settings, args: &ExtractArgs, session: &SessionArgs) -> Result<()> {
    let refs = if session.is_empty() {
        PayloadRefs::from_payload(&parse_payload(&read_stdin()?)?)
    } else {
        session.refs()
    };

    let options = args.options();
    let mut enricher = build_enricher(settings);
    let resolved = enricher.resolve(&refs);
    let entries = enricher.user_inputs(resolved.as_ref(), &refs, &options);

    let mut stdout = io::stdout().lock();
    for entry in &entries {
        writeln!(stdout, "{}", render_entry(entry, options.format, options.include_multiline))?;
    }
    Ok(())
}

fn run_enrich(settings: &Settings, args: &ExtractArgs) -> Result<()> {
    let raw = read_stdin()?;
    let enriched = build_enricher(settings).enrich(&raw, &args.options())?;
    println!("{}", serde_json::to_string(&enriched).context("Failed to serialize payload")?);
    Ok(())
}

fn run_render(settings: &Settings, args: &ExtractArgs) -> Result<()> {
    let payload = parse_payload(&read_stdin()?)?;
    let enriched = build_enricher(settings).enrich_payload(payload, &args.options());
    println!("{}", render_notification(&enriched, &NotifyConfig::from(settings)));
    Ok(())
}

fn run_resolve(settings: &Settings, session: &SessionArgs) -> Result<()> {
    let refs = session.refs();
    match build_enricher(settings).resolve(&refs) {
        Some(resolved) => {
            println!("{}\t{}", resolved.path.display(), resolved.variant);
            Ok(())
        }
        None => bail!("No session log found"),
    }
}
