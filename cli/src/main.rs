use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use luagen_compiler::{
    converters::{generate_all, write_all, EventEnumConverter, EventFieldsConverter},
    legacy::{read_legacy_set, resync_assets},
    translations::{compile_translations, render_translations, I18nLayout},
    utils::{read_json, read_text, write_text},
};
use luagen_luahelp::LuaHelp;
use luagen_poeditor::{sync_to_disk, PoEditorClient};

mod config;
mod error;

use config::Config;
use error::CliError;

#[derive(Parser)]
#[command(name = "luagen")]
#[command(about = "Generate Lua translation tables and LuaHelp event annotations", long_about = None)]
struct Cli {
    /// Config file (defaults to `luagen.toml` when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the mirrored exports into the translations table and term key alias
    Translations {
        /// Directory holding `languages.json`, `terms.json` and `exports/`
        #[arg(long)]
        i18n_dir: Option<PathBuf>,

        /// Output `.lua` table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the term key alias
        #[arg(long)]
        termkeys_output: Option<PathBuf>,
    },

    /// Generate event annotation files from LuaHelp
    Events {
        /// LuaHelp text file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pre-parsed LuaHelp AST as JSON, instead of `--input`
        #[arg(long, conflicts_with = "input")]
        ast: Option<PathBuf>,

        /// Directory the generated files are written to
        #[arg(short, long)]
        meta_dir: Option<PathBuf>,
    },

    /// Compile legacy `key = [[value]]` asset files into the translations table
    Legacy {
        #[arg(long)]
        assets_dir: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite every asset file in the layout of the base language
    Resync {
        #[arg(long)]
        assets_dir: Option<PathBuf>,

        #[arg(long)]
        base_lang: Option<String>,
    },

    /// Mirror the POEditor project into the i18n directory
    Fetch {
        #[arg(long)]
        i18n_dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Translations { i18n_dir, output, termkeys_output } => {
            let layout = I18nLayout::new(i18n_dir.unwrap_or(config.i18n.dir));
            let output = output.unwrap_or(config.translations.output);
            let termkeys_output = termkeys_output.unwrap_or(config.translations.termkeys_output);

            let compiled = compile_translations(&layout, &config.translations.term_alias, &config.translations.options)?;

            write_text(&output, &compiled.translations)?;
            info!("Generated {} translations.", compiled.language_count);
            write_text(&termkeys_output, &compiled.term_keys)?;
            info!("Wrote {} term keys.", compiled.term_count);
            Ok(())
        }

        Commands::Events { input, ast, meta_dir } => {
            let meta_dir = meta_dir.unwrap_or_else(|| config.events.meta_dir.clone());
            let ast = match ast {
                Some(path) => read_json::<LuaHelp>(&path)?,
                None => read_luahelp(&input.unwrap_or_else(|| config.events.input.clone()))?,
            };

            let fields = EventFieldsConverter::new(config.events.names.clone(), config.events.override_table());
            let enums = EventEnumConverter { names: config.events.names.clone() };

            let files = generate_all(&ast, &[&fields, &enums])?;
            for path in write_all(&meta_dir, &files)? {
                info!("Wrote {}", path.display());
            }
            info!("Wrote output to files.");
            Ok(())
        }

        Commands::Legacy { assets_dir, output } => {
            let assets_dir = assets_dir.unwrap_or(config.legacy.assets_dir);
            let output = output.unwrap_or(config.legacy.output);

            let set = read_legacy_set(&assets_dir)?;
            write_text(&output, &render_translations(&set))?;
            info!("Generated {} translations.", set.languages.len());
            Ok(())
        }

        Commands::Resync { assets_dir, base_lang } => {
            let assets_dir = assets_dir.unwrap_or(config.legacy.assets_dir);
            let base_lang = base_lang.unwrap_or(config.legacy.base_lang);

            let written = resync_assets(&assets_dir, &base_lang)?;
            info!("Resynced {} languages against {}.", written.len(), base_lang);
            Ok(())
        }

        Commands::Fetch { i18n_dir } => {
            // Token check happens before any request
            let client = PoEditorClient::from_env(config.poeditor)?;
            let layout = I18nLayout::new(i18n_dir.unwrap_or(config.i18n.dir));

            let summary = sync_to_disk(&client, &layout)?;
            info!(
                "Fetched {} terms and {} languages into {}",
                summary.terms,
                summary.languages.len(),
                layout.root.display()
            );
            Ok(())
        }
    }
}

fn read_luahelp(path: &Path) -> Result<LuaHelp, CliError> {
    info!("Parsing LuaHelp...");
    let text = read_text(path)?;
    let ast = luagen_luahelp::parse(&text).map_err(luagen_compiler::GenError::from)?;
    Ok(ast)
}
