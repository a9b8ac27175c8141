use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use guide_core::command::{Command, HELP};
use guide_core::core::state::ViewState;
use guide_core::core::types::KeyScheme;
use guide_core::highlight::JavaHighlighter;
use guide_core::persistence::JsonFileStore;
use guide_core::render::{Palette, Renderer};
use guide_core::{Config, GuideEngine};
use std::fs::File;
use std::io::{self, stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

/// Study guide with search and saved progress.
#[derive(Parser, Debug)]
#[command(name = "guide", version)]
struct Cli {
    /// Directory holding progress.json and guide.log
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON catalog to use instead of the built-in topics
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Prefix progress keys with the topic id so equal section ids don't share state
    #[arg(long)]
    namespace_keys: bool,

    /// Initial search text
    #[arg(long)]
    search: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Log debug records
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = match &self.data_dir {
            Some(dir) => Config::new(dir),
            None => Config::default(),
        };
        config.catalog_path = self.catalog.clone();
        if self.namespace_keys {
            config.key_scheme = KeyScheme::TopicQualified;
        }
        config
    }
}

/// Writes one line per record to a file, keeping the screen clean.
struct FileLogger {
    file: Mutex<File>,
    level: log::LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logging(config: &Config, verbose: bool) -> io::Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Truncates the previous session's log.
    let file = File::create(&path)?;
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let logger = FileLogger {
        file: Mutex::new(file),
        level,
    };
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    log::set_max_level(level);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    if let Err(e) = init_logging(&config, cli.verbose) {
        eprintln!("[ERROR] Could not open log file '{}': {}", config.log_path().display(), e);
        return ExitCode::FAILURE;
    }
    log::info!("--- Study guide starting, data in '{}' ---", config.data_dir.display());

    let engine = match GuideEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = ViewState::new().set_search(cli.search.as_deref().unwrap_or(""));
    if cli.dark {
        state = state.toggle_theme();
    }
    let colors = !cli.no_color && stdout().is_tty();

    match run(engine.with_state(state), colors) {
        Ok(()) => {
            log::info!("Shutting down.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut engine: GuideEngine<JsonFileStore>, colors: bool) -> io::Result<()> {
    let highlighter = JavaHighlighter::new();
    let mut status = String::from(HELP);
    let mut lines = stdin().lock().lines();

    loop {
        draw(&engine, &highlighter, colors, &status)?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        log::debug!("Input '{}'", line);

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                status = e.to_string();
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        status = match command.to_action(&engine.view()) {
            Ok(Some(action)) => match engine.dispatch(action) {
                Ok(()) => String::new(),
                Err(e) => e.to_string(),
            },
            Ok(None) => HELP.to_string(),
            Err(e) => e.to_string(),
        };
    }

    println!("\nProgress saved to '{}'", engine.port().path().display());
    Ok(())
}

fn draw(
    engine: &GuideEngine<JsonFileStore>,
    highlighter: &JavaHighlighter,
    colors: bool,
    status: &str,
) -> io::Result<()> {
    let view = engine.view();
    let palette = if colors {
        Palette::for_theme(view.state.theme())
    } else {
        Palette::monochrome()
    };
    let mut out = stdout().lock();
    if colors {
        execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    Renderer::new(palette, highlighter).render(&mut out, &view)?;
    if !status.is_empty() {
        writeln!(out, "\n{}", status)?;
    }
    write!(out, "\n> ")?;
    out.flush()
}
