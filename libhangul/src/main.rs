use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::debug;

use libhangul::{
    create_ime_engine, jamo, HangulConfig, HangulEditor, ImeEngine, KeyEvent, KeyboardLayout,
};

#[derive(Parser)]
#[command(name = "libhangul")]
#[command(about = "Hangul input composition for on-screen keyboards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to <config dir>/libhangul/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compose final clusters such as ㄺ and ㅄ
    #[arg(long, global = true)]
    compound_finals: bool,

    /// Key layout for character keys
    #[arg(long, global = true, value_enum)]
    layout: Option<LayoutArg>,

    /// Single input for quick testing (same as `compose <INPUT>`)
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL mode
    Repl,
    /// Type keys and print the resulting text
    Compose {
        /// Keys to type (Latin letters for dubeolsik, or jamo)
        input: String,
        /// Print the field after every key
        #[arg(long)]
        trace: bool,
    },
    /// Show the keystrokes that type some Hangul text
    Decompose {
        /// Hangul text
        text: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum LayoutArg {
    Dubeolsik,
    Jamo,
}

impl From<LayoutArg> for KeyboardLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Dubeolsik => KeyboardLayout::Dubeolsik,
            LayoutArg::Jamo => KeyboardLayout::Jamo,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("libhangul").join("config.toml"))
}

/// Load the config file (explicit path must exist, default path is optional)
/// and apply command line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<HangulConfig> {
    let mut config = match &cli.config {
        Some(path) => HangulConfig::load_toml(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => {
                debug!(path = %path.display(), "using default config");
                HangulConfig::load_toml(&path)?
            }
            None => HangulConfig::default(),
        },
    };

    if cli.compound_finals {
        config.compound_finals = true;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout.into();
    }
    Ok(config)
}

fn key_for(ch: char) -> KeyEvent {
    if ch == ' ' {
        KeyEvent::Space
    } else {
        KeyEvent::Char(ch)
    }
}

/// Field text with the in-progress syllable wrapped in brackets.
fn render_field(ime: &ImeEngine<HangulEditor>) -> String {
    let context = ime.context();
    if context.preedit_text.is_empty() {
        return context.text.clone();
    }
    let (before, after) = context.text.split_at(context.cursor);
    let before = before
        .strip_suffix(context.preedit_text.as_str())
        .unwrap_or(before);
    format!("{}[{}]{}", before, context.preedit_text, after)
}

fn run_compose(config: HangulConfig, input: &str, trace: bool) {
    let mut ime = create_ime_engine(config);
    for ch in input.chars() {
        ime.process_key(key_for(ch));
        if trace {
            println!("{:?} -> {}", ch, render_field(&ime));
        }
    }
    ime.commit();
    println!("{}", ime.text());
}

fn run_decompose(text: &str) {
    let strokes: String = jamo::keystrokes(text).into_iter().collect();
    println!("jamo: {}", strokes);
    println!("keys: {}", KeyboardLayout::keys_for(text));
}

fn run_config(config: &HangulConfig) -> anyhow::Result<()> {
    let text = config
        .to_toml_string()
        .context("serializing configuration")?;
    print!("{}", text);
    Ok(())
}

fn run_repl(config: HangulConfig) -> anyhow::Result<()> {
    let mut ime = create_ime_engine(config);

    println!("libhangul REPL ({}) - type keys and press Enter", ime.editor().layout().name());
    println!("Example: gksrmf for 한글");
    println!("Commands: :bs :toggle :commit :clear :quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match line.trim_end_matches(['\r', '\n']) {
            "" => {}
            ":quit" | ":q" => break,
            ":bs" => {
                ime.process_key(KeyEvent::Backspace);
            }
            ":toggle" => {
                ime.process_key(KeyEvent::ToggleLanguage);
            }
            ":commit" => {
                ime.commit();
            }
            ":clear" => ime.clear(),
            keys => {
                for ch in keys.chars() {
                    ime.process_key(key_for(ch));
                }
            }
        }
        writeln!(
            stdout,
            "{} {}",
            ime.context().auxiliary_text,
            render_field(&ime)
        )?;
        stdout.flush()?;
    }

    ime.commit();
    if !ime.text().is_empty() {
        println!("{}", ime.text());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Repl) => run_repl(config)?,
        Some(Commands::Compose { input, trace }) => run_compose(config, &input, trace),
        Some(Commands::Decompose { text }) => run_decompose(&text),
        Some(Commands::Config) => run_config(&config)?,
        None => {
            // A bare argument composes it; no arguments starts the REPL
            if let Some(input) = cli.input {
                run_compose(config, &input, false);
            } else {
                run_repl(config)?;
            }
        }
    }
    Ok(())
}
