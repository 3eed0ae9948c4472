use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mfm_cli::api::EmojisResponse;
use mfm_cli::config::Settings;
use mfm_cli::logging::{self, LogConfig};
use mfm_cli::server_config::determine_instance_url;
use mfm_cli::source::{MisskeySource, StaticSource};
use mfm_cli::terminal::{print_lines, SpanHost, IMAGE_PLACEHOLDER};
use mfm_engine::error::parse_instance;
use mfm_engine::{attach, legacy_encode, pre_transform, resolve, EmojiCatalog, EmojiRegistry, EmojiSource, SegmentRenderer};
use mfm_types::{Account, CustomEmoji, ExternalEmoji, LoadState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// mfm - render Misskey Flavored Markdown posts in the terminal
#[derive(Parser)]
#[command(name = "mfm")]
#[command(about = "Render Misskey Flavored Markdown and emoji shortcodes")]
#[command(version)]
struct Cli {
    /// Instance whose custom emoji are used (host or URL)
    #[arg(long, short, global = true)]
    instance: Option<String>,

    /// Log to stderr instead of the configured log file
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Don't touch the network; custom emoji come from --emoji-file
    #[arg(long, global = true)]
    offline: bool,

    /// JSON file with custom emoji, as returned by /api/emojis (implies --offline)
    #[arg(long, value_name = "FILE", global = true)]
    emoji_file: Option<PathBuf>,

    /// Emoji from another server, usable for this call only
    #[arg(long = "external", value_name = "NAME=URL", global = true)]
    external: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HTML-ish fragment for a post (reads stdin without TEXT)
    PreTransform { text: Option<String> },
    /// Print the segment list as JSON
    Render {
        text: Option<String>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the flattened HTML encoding with inline <img> tags
    Legacy { text: Option<String> },
    /// Resolve one shortcode
    Resolve { token: String },
    /// Render a post with colors and emoji
    Show {
        text: Option<String>,
        /// Leave markup unformatted
        #[arg(long)]
        plain: bool,
    },
    /// List the instance's emoji by category
    Catalog {
        #[arg(long, value_enum, default_value_t = CatalogSet::Custom)]
        set: CatalogSet,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogSet {
    Default,
    Custom,
}

// Load environment variables from .env file
fn load_env() {
    let _ = dotenv::dotenv();
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mfm=debug,mfm_cli=debug,mfm_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// The argument, or all of stdin minus one trailing newline
fn read_text(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read post text from stdin")?;
    if input.ends_with('\n') {
        input.pop();
    }
    Ok(input)
}

fn parse_external(values: &[String]) -> Result<Vec<ExternalEmoji>> {
    values
        .iter()
        .map(|value| match value.split_once('=') {
            Some((name, url)) if !name.is_empty() && !url.is_empty() => Ok(ExternalEmoji::new(name, url)),
            _ => bail!("Invalid --external value '{}', expected NAME=URL", value),
        })
        .collect()
}

/// Accepts either `{ "emojis": [...] }` or a bare array
fn load_emoji_file(path: &Path) -> Result<Vec<CustomEmoji>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read emoji file {}", path.display()))?;
    if let Ok(response) = serde_json::from_str::<EmojisResponse>(&json) {
        return Ok(response.emojis);
    }
    serde_json::from_str(&json).with_context(|| format!("Failed to parse emoji file {}", path.display()))
}

async fn open_catalog(cli: &Cli, settings: &Settings) -> Result<Arc<EmojiCatalog>> {
    let (url, origin) = determine_instance_url(cli.instance.clone(), settings);
    let instance = parse_instance(&url)?;
    log::info!("Using instance {} (from {})", instance, origin.describe());

    let source: Arc<dyn EmojiSource> = if cli.offline || cli.emoji_file.is_some() {
        let custom = match &cli.emoji_file {
            Some(path) => load_emoji_file(path)?,
            None => Vec::new(),
        };
        Arc::new(StaticSource::new(custom))
    } else {
        Arc::new(MisskeySource::new(settings.http_timeout()))
    };

    let registry = EmojiRegistry::new(source);
    let catalog = registry.register(&Account::new("mfm", instance.clone()));
    let status = catalog.ready().await;

    if status.custom.state == LoadState::Failed {
        eprintln!("warning: custom emoji for {} could not be loaded", instance);
    }
    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env();

    let settings = Settings::new().context("Failed to load settings")?;

    if cli.verbose {
        init_tracing();
    } else {
        logging::init_logging(&LogConfig::from_settings(&settings.log))?;
    }

    let external = parse_external(&cli.external)?;
    let style = settings.text_style();

    match &cli.command {
        Command::PreTransform { text } => {
            println!("{}", pre_transform(&read_text(text.clone())?));
        }
        Command::Render { text, compact } => {
            let text = read_text(text.clone())?;
            let catalog = open_catalog(&cli, &settings).await?;
            let segments = SegmentRenderer::new(text).render(&style, Some(&*catalog), &external);
            let json = if *compact {
                serde_json::to_string(&segments)?
            } else {
                serde_json::to_string_pretty(&segments)?
            };
            println!("{}", json);
        }
        Command::Legacy { text } => {
            let text = read_text(text.clone())?;
            let catalog = open_catalog(&cli, &settings).await?;
            println!("{}", legacy_encode(&text, Some(&*catalog), &external));
        }
        Command::Resolve { token } => {
            let catalog = open_catalog(&cli, &settings).await?;
            let resolved = resolve(token, Some(&*catalog), &external);
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Command::Show { text, plain } => {
            let text = read_text(text.clone())?;
            let catalog = open_catalog(&cli, &settings).await?;
            let segments = SegmentRenderer::new(text).render(&style, Some(&*catalog), &external);

            let mut host = if *plain { SpanHost::plain() } else { SpanHost::new() };
            attach(&segments, &mut host);
            let images = host.images().to_vec();
            let styled = host.layout();

            let stdout = io::stdout();
            let colored = stdout.is_terminal();
            print_lines(&mut stdout.lock(), &styled.lines, colored)?;

            if !styled.links.is_empty() || !images.is_empty() {
                println!();
            }
            for (i, link) in styled.links.iter().enumerate() {
                println!("[{}] {} {}", i + 1, link.kind.as_str(), link.value);
            }
            for image in images {
                if let Some(url) = image.url {
                    println!("{} {}", IMAGE_PLACEHOLDER, url);
                }
            }
        }
        Command::Catalog { set, category } => {
            let catalog = open_catalog(&cli, &settings).await?;
            let listing: Vec<(String, Vec<String>)> = match set {
                CatalogSet::Default => catalog
                    .categorized_default()
                    .into_iter()
                    .map(|(name, emojis)| {
                        (name, emojis.iter().map(|e| format!(":{}: {}", e.name, e.glyph)).collect())
                    })
                    .collect(),
                CatalogSet::Custom => catalog
                    .categorized_custom()
                    .into_iter()
                    .map(|(name, emojis)| {
                        (name, emojis.iter().map(|e| format!(":{}: {}", e.name, e.url)).collect())
                    })
                    .collect(),
            };

            for (name, entries) in listing {
                if category.as_ref().is_some_and(|wanted| *wanted != name) {
                    continue;
                }
                println!("{} ({})", name, entries.len());
                for entry in entries {
                    println!("  {}", entry);
                }
            }
        }
    }

    Ok(())
}
