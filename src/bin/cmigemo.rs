use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use migemo::settings::{self, Settings};
use migemo::{Dialect, Migemo, OperatorKind};

#[derive(Parser)]
#[command(name = "cmigemo", about = "Expand romaji into Japanese search patterns")]
struct Cli {
    /// Write JSON trace events to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct EngineArgs {
    /// Settings TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Dictionary directory (overrides the settings file)
    #[arg(short = 'd', long)]
    dict_dir: Option<PathBuf>,
    /// Pattern flavour: pcre, egrep, vim or emacs
    #[arg(long)]
    dialect: Option<Dialect>,
    /// Do not match line breaks between characters
    #[arg(short, long)]
    no_newline: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a pattern for each word (reads stdin when no word is given)
    Query {
        #[command(flatten)]
        engine: EngineArgs,
        /// Romaji words
        words: Vec<String>,
    },
    /// Show the operator fragments in effect
    Operators {
        #[command(flatten)]
        engine: EngineArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.log_dir.is_some() || std::env::var_os("RUST_LOG").is_some() {
        migemo::trace_init::init_tracing(cli.log_dir.as_deref());
    }

    match cli.command {
        Command::Query { engine, words } => query(&engine, &words),
        Command::Operators { engine, json } => operators(&engine, json),
        Command::SettingsExport => {
            print!("{}", settings::default_toml());
            Ok(())
        }
        Command::SettingsValidate { file } => {
            let s = Settings::load(&file).with_context(|| format!("{}", file.display()))?;
            println!(
                "OK: dictionary.dir={:?}, operators.dialect={}",
                s.dictionary.dir, s.operators.dialect
            );
            Ok(())
        }
    }
}

fn settings_from(args: &EngineArgs) -> anyhow::Result<Settings> {
    let mut s = match &args.config {
        Some(path) => {
            Settings::load(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(dir) = &args.dict_dir {
        s.dictionary.dir = dir.clone();
    }
    if let Some(dialect) = args.dialect {
        s.operators.dialect = dialect;
    }
    if args.no_newline {
        s.operators.newline = false;
    }
    Ok(s)
}

fn open_engine(args: &EngineArgs) -> anyhow::Result<Migemo> {
    let settings = settings_from(args)?;
    let mut migemo = Migemo::try_new()?;
    migemo.apply_settings(&settings)?;
    Ok(migemo)
}

fn query(args: &EngineArgs, words: &[String]) -> anyhow::Result<()> {
    let mut migemo = open_engine(args)?;
    if !migemo.is_loaded() {
        bail!("no dictionary loaded (use --dict-dir or [dictionary] dir)");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut emit = |migemo: &mut Migemo, word: &str| -> anyhow::Result<()> {
        if let Some(pattern) = migemo.query(word)? {
            out.write_all(&pattern)?;
        }
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    };

    if words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                emit(&mut migemo, word)?;
            }
        }
    } else {
        for word in words {
            emit(&mut migemo, word.as_str())?;
        }
    }
    Ok(())
}

fn operators(args: &EngineArgs, json: bool) -> anyhow::Result<()> {
    let migemo = open_engine(args)?;
    let mut rows = Vec::with_capacity(OperatorKind::ALL.len());
    for kind in OperatorKind::ALL {
        let frag = String::from_utf8_lossy(migemo.operator(kind)?).into_owned();
        rows.push((kind, frag));
    }

    if json {
        let map: serde_json::Map<String, serde_json::Value> = rows
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (kind, frag) in rows {
            println!("{:<15} {frag}", kind.to_string());
        }
    }
    Ok(())
}
