//! # fontkeys Main Entry Point
//!
//! Headless driver for the keyboard engine: taps the requested keys, then
//! prints the composed text and optionally the final layout as JSON.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use fontkeys::cmd_args::CommandLineArgs;
use fontkeys::config::{get_config_path, KeyboardConfig};
use fontkeys::{CommittedText, KeyboardViewModel, Language, Owner, TextCommand, TextSink};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing_subscriber();

    let args = CommandLineArgs::parse();
    let config_path = args
        .config()
        .map(str::to_string)
        .unwrap_or_else(get_config_path);
    let mut config = KeyboardConfig::load(&config_path)?;
    if let Some(language) = args.language() {
        config.language = language.parse::<Language>()?;
    }
    tracing::debug!("Starting with {:?}", config);

    let mut keyboard = KeyboardViewModel::new(config.design, config.language);

    let text = Rc::new(RefCell::new(CommittedText::new()));
    let owner = Owner::new();
    let sink = Rc::clone(&text);
    let _subscription = keyboard
        .text_commands()
        .subscribe(&owner, move |command: &TextCommand| {
            sink.borrow_mut().apply(command)
        });

    for label in args.taps() {
        let id = keyboard.find_key(label).with_context(|| {
            format!(
                "No key '{}' on the {:?} keyboard (available: {})",
                label,
                keyboard.mode(),
                keyboard.glyphs().join(" ")
            )
        })?;
        keyboard.tap(id);
    }

    if args.layout_json() {
        let snapshot = keyboard.snapshot(args.screen_width());
        let json = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize keyboard layout")?;
        println!("{json}");
    }

    println!("{}", text.borrow().text());
    Ok(())
}

fn init_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(format!(
            "{}_LOG_LEVEL",
            env!("CARGO_PKG_NAME").to_uppercase()
        )))
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();
}
