use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scribe_core::{
    Config, KeyResult, KeyboardEngine, LayoutKind, LexiconTable, MemoryCursor, StaticCommandService,
};
use scribe_languages::{
    create_keyboard_engine, create_keyboard_engine_with_service, parse_script, ActionResult,
    Language,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Drive the Scribe keyboard core from a terminal")]
#[command(version)]
struct Cli {
    /// Keyboard language
    #[arg(short, long, value_enum, default_value_t = Language::English)]
    language: Language,

    /// Keyboard configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lexicon file (TOML or JSON) replacing the built-in table
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Command data file (TOML) replacing the built-in demo data
    #[arg(long)]
    commands: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match Config::load_toml(path) {
        Ok(config) => {
            debug!(path = %path.display(), "config loaded");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config; using defaults");
            Config::default()
        }
    }
}

fn build_keyboard(cli: &Cli) -> Result<KeyboardEngine<MemoryCursor>> {
    let config = load_config(cli.config.as_deref());

    let mut keyboard = match &cli.commands {
        Some(path) => {
            let service = StaticCommandService::load(path)?;
            create_keyboard_engine_with_service(cli.language, Arc::new(service), config)?
        }
        None => create_keyboard_engine(cli.language, config)?,
    };

    if let Some(path) = &cli.lexicon {
        let table = LexiconTable::load(path)?;
        keyboard.set_lexicon(Arc::new(table));
    }

    keyboard.attach_cursor(MemoryCursor::new());
    Ok(keyboard)
}

fn layout_name(layout: LayoutKind) -> &'static str {
    match layout {
        LayoutKind::Letters => "letters",
        LayoutKind::Symbols => "symbols",
        LayoutKind::SymbolsShifted => "symbols (shifted)",
    }
}

fn print_state(keyboard: &KeyboardEngine<MemoryCursor>) {
    let ctx = keyboard.context();
    let marker = &keyboard.config().cursor_marker;

    if let Some(cursor) = keyboard.cursor() {
        let (before, after) = cursor.text().split_at(cursor.cursor());
        println!("  text:    {:?}", format!("{}{}{}", before, marker, after));
    }
    if ctx.has_command_bar() {
        println!("  command: {}", ctx.command_bar.display_text(marker));
    }

    let shift = if ctx.is_shift_locked {
        "caps lock"
    } else if ctx.is_shifted {
        "shift"
    } else {
        "-"
    };
    println!("  layout:  {} / {}", layout_name(ctx.active_layout), shift);

    if !ctx.suggestions.words.is_empty() {
        println!("  words:   {}", ctx.suggestions.words.join("  "));
    }
    if !ctx.emoji_buttons.is_empty() {
        println!("  emoji:   {}", ctx.emoji_buttons.join("  "));
    }
    if let Some(category) = &ctx.suggestions.grammatical_category {
        println!("  type:    {}", category);
    }
    if let Some(annotation) = &ctx.annotation {
        println!("  last:    {}", annotation);
    }
    if let Some(status) = &ctx.status_message {
        println!("  message: {}", status);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut keyboard = build_keyboard(&cli)?;
    let table = keyboard.lexicon();

    println!("scribe ({}) - type a key script per line, Ctrl-D to exit", table.language());
    println!("actions: <del> <shift> <enter> <mode> <space> <cmd> <translate> <conjugate> <plural> <cancel> <emoji N>");
    print_state(&keyboard);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        let actions = match parse_script(&line) {
            Ok(actions) => actions,
            Err(e) => {
                eprintln!("error: {:#}", e);
                continue;
            }
        };

        for action in actions {
            match action.apply(&mut keyboard) {
                ActionResult::Key(KeyResult::Ignored(reason)) => {
                    println!("  ignored: {:?} ({:?})", action, reason)
                }
                ActionResult::Transition(false) => {
                    println!("  ignored: {:?} in {:?}", action, keyboard.mode())
                }
                _ => {}
            }
        }
        print_state(&keyboard);
    }

    keyboard.end_session();
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
