//! qrpayload command-line entrypoint

use anyhow::Context;
use clap::{Parser, Subcommand};
use qrpayload::theme::{FileStore, MemoryElement, MemorySignal, MemoryStore, MemoryToggle};
use qrpayload::{
    ContentType, FieldMap, KeyValueStore, QrPayloadConfig, ThemeController, ThemeElements,
    format, format_active, logging, template,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "qrpayload",
    version,
    about = "Format QR code content payloads and manage the UI theme preference"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrpayload.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (e.g. debug, qrpayload=trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format the payload for a content type and print it
    Format {
        /// Content type (text, wifi, vcard, mecard, event, bitcoin, geo, social, app, email, sms, phone)
        content_type: String,

        /// Field value as field-id=value (repeatable)
        #[arg(short = 'f', long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,

        /// JSON/TOML/YAML file mapping field ids to values; --field entries win
        #[arg(long, value_name = "PATH")]
        fields_file: Option<PathBuf>,

        /// Print {"type", "payload"} JSON instead of the raw payload
        #[arg(long)]
        json: bool,

        /// Also render the payload as a PNG QR image
        #[cfg(feature = "render")]
        #[arg(long, value_name = "PATH")]
        png: Option<PathBuf>,

        /// Also print the QR symbol to the terminal
        #[cfg(feature = "render")]
        #[arg(long)]
        terminal: bool,
    },

    /// List content types and the field ids each one reads
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the theme against the persisted override, optionally toggling it
    Theme {
        /// Report the system appearance preference as dark
        #[arg(long)]
        system_dark: bool,

        /// Perform one user toggle and persist the result
        #[arg(long)]
        toggle: bool,

        /// JSON file holding the persisted override (overrides config)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QrPayloadConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init(&config.logging)?;

    match cli.command {
        Command::Format {
            content_type,
            fields,
            fields_file,
            json,
            #[cfg(feature = "render")]
            png,
            #[cfg(feature = "render")]
            terminal,
        } => {
            let mut values = match fields_file {
                Some(path) => FieldMap::from_file(&path)?,
                None => FieldMap::new(),
            };
            for assignment in &fields {
                values.insert_assignment(assignment)?;
            }

            let payload = match content_type.parse::<ContentType>() {
                Ok(kind) => format(kind, &values),
                Err(_) => {
                    warn!(%content_type, "Unknown content type, emitting fallback payload");
                    format_active(&content_type, &values)
                }
            };

            if json {
                let output = json!({ "type": content_type, "payload": payload });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{payload}");
            }

            #[cfg(feature = "render")]
            if png.is_some() || terminal {
                let renderer = qrpayload::QrRenderer::from_options(&config.render)?;
                if let Some(path) = png {
                    renderer
                        .save_png(&payload, &path)
                        .with_context(|| format!("writing {}", path.display()))?;
                }
                if terminal {
                    println!("{}", renderer.render_terminal(&payload)?);
                }
            }
        }
        Command::Types { json } => list_types(json)?,
        Command::Theme {
            system_dark,
            toggle,
            store,
            json,
        } => run_theme(&config, system_dark, toggle, store, json)?,
    }

    Ok(())
}

fn list_types(json: bool) -> anyhow::Result<()> {
    if json {
        let entries: Vec<_> = ContentType::ALL
            .iter()
            .map(|kind| {
                let fields: Vec<_> = kind.fields().map(|field| field.id()).collect();
                json!({ "type": kind.as_str(), "fields": fields })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for kind in ContentType::ALL {
        let fields: Vec<_> = kind.fields().map(|field| field.id()).collect();
        println!("{:<8} {}", kind, fields.join(", "));
    }
    println!();
    println!(
        "social platforms: {}, custom",
        table_keys(template::SOCIAL_PROFILES)
    );
    println!(
        "app platforms:    {}, custom",
        table_keys(template::APP_STORES)
    );
    Ok(())
}

fn table_keys(table: &[(&str, &str)]) -> String {
    table
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_theme(
    config: &QrPayloadConfig,
    system_dark: bool,
    toggle: bool,
    store_path: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let store: Arc<dyn KeyValueStore> = match store_path.or_else(|| config.theme.store_path.clone())
    {
        Some(path) => {
            info!(path = %path.display(), "Using theme store");
            Arc::new(FileStore::new(path))
        }
        None => {
            warn!("No theme store configured, override will not persist");
            Arc::new(MemoryStore::new())
        }
    };

    let root = Arc::new(MemoryElement::new());
    let toggle_control = Arc::new(MemoryToggle::new());
    let elements = ThemeElements {
        root: root.clone(),
        toggle: Some(toggle_control.clone()),
        icon_light: Some(Arc::new(MemoryElement::new())),
        icon_dark: Some(Arc::new(MemoryElement::new())),
    };
    let signal = Arc::new(MemorySignal::new(system_dark));

    let controller =
        ThemeController::attach(elements, Arc::clone(&store), Some(signal), &config.theme)
            .context("theme controller failed to attach")?;
    let mut changes = controller.subscribe();

    if toggle {
        toggle_control.click();
    }
    while let Ok(change) = changes.try_recv() {
        info!(theme = %change.theme, "Theme changed");
    }

    let theme = controller.current();
    let persisted = store.get(&config.theme.storage_key)?;
    controller.detach();

    if json {
        let output = json!({
            "theme": theme,
            "override": persisted,
            "system_dark": system_dark,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{theme}");
    }
    Ok(())
}
