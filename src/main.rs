use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lightedit::config::SettingsStore;
use lightedit::display::OffscreenDisplay;
use lightedit::geometry::PixelSize;
use lightedit::input::{
    resolve_pointer, resolve_shortcut, InputContext, KeyChord, PointerEvent,
};
use lightedit::session::{BatchPrompt, Intent, IntentOutcome, Session};
use lightedit::state::SessionState;
use lightedit::storage::FsImageStore;

type CliSession = Session<FsImageStore, BatchPrompt, OffscreenDisplay>;

#[derive(Parser)]
#[command(name = "lightedit", about = "Quick single-image edits: rotate, crop, undo")]
#[command(version)]
struct Cli {
    /// Image to open; without it the most recently opened file is reopened
    file: Option<PathBuf>,

    /// Viewport used for fitting and rendering, as WIDTHxHEIGHT
    #[arg(long, default_value = "1146x600", value_parser = parse_viewport)]
    viewport: PixelSize,

    /// Steps applied in order: an intent (`rotate-right`, `crop-grow`,
    /// `open=PATH`, `tool=pen`), a key (`key:ctrl+s`, `key:a`) or a pointer
    /// event (`press:X,Y`, `release:X,Y`)
    #[arg(long = "do", value_name = "STEP")]
    steps: Vec<Step>,

    /// Write the last rendered viewport frame to this PNG
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,

    /// Answer yes to save and delete confirmations
    #[arg(short, long)]
    yes: bool,

    /// Target used when a step asks for save-as
    #[arg(long, value_name = "PATH")]
    save_as: Option<PathBuf>,

    /// Settings file to use instead of the XDG config location
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Intent(Intent),
    Key(KeyChord),
    Pointer(PointerEvent),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        if let Some(chord) = s.strip_prefix("key:") {
            return chord.parse().map(Step::Key).map_err(|err| format!("{err}"));
        }
        if let Some(point) = s.strip_prefix("press:") {
            let (x, y) = parse_xy(point)?;
            return Ok(Step::Pointer(PointerEvent::Press { x, y }));
        }
        if let Some(point) = s.strip_prefix("release:") {
            let (x, y) = parse_xy(point)?;
            return Ok(Step::Pointer(PointerEvent::Release { x, y }));
        }
        s.parse().map(Step::Intent).map_err(|err| format!("{err}"))
    }
}

fn parse_xy(value: &str) -> Result<(i32, i32), String> {
    let invalid = || format!("expected X,Y, got `{value}`");
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

fn parse_viewport(value: &str) -> Result<PixelSize, String> {
    let invalid = || format!("expected WIDTHxHEIGHT, got `{value}`");
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let size = PixelSize::new(
        width.trim().parse().map_err(|_| invalid())?,
        height.trim().parse().map_err(|_| invalid())?,
    );
    if size.is_empty() {
        return Err(format!("viewport must have a non-zero size, got `{value}`"));
    }
    Ok(size)
}

fn resolve_step(session: &CliSession, step: &Step) -> Option<Intent> {
    match step {
        Step::Intent(intent) => Some(intent.clone()),
        Step::Key(chord) => resolve_shortcut(
            chord.key,
            chord.modifiers,
            InputContext {
                crop_active: session.state() == SessionState::Cropping,
            },
        ),
        Step::Pointer(event) => resolve_pointer(
            *event,
            session.state() == SessionState::PointerCropping,
        ),
    }
}

fn run_intent(session: &mut CliSession, intent: Intent) -> Result<()> {
    let label = intent.label();
    match session.handle(intent) {
        IntentOutcome::Applied => tracing::info!(intent = label, "applied"),
        IntentOutcome::Ignored => tracing::info!(intent = label, "ignored"),
        IntentOutcome::Failed(message) => bail!("{label} failed: {message}"),
    }
    Ok(())
}

fn print_summary(session: &CliSession) {
    let Some(document) = session.document() else {
        println!("No file open");
        return;
    };
    let properties = document.properties();
    println!("File:        {}", document.path().display());
    println!("Dimensions:  {}x{}", properties.width, properties.height);
    println!("Mode:        {}", properties.mode.label());
    println!("Unsaved:     {}", if document.is_dirty() { "yes" } else { "no" });
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    lightedit::logging::init(cli.verbose);

    let settings_store = cli
        .settings
        .clone()
        .map(SettingsStore::at)
        .unwrap_or_else(SettingsStore::from_env);
    let mut session = Session::new(
        FsImageStore,
        BatchPrompt::new(cli.yes, cli.save_as.clone()),
        OffscreenDisplay::new(cli.viewport),
        settings_store,
    );

    match cli.file.clone() {
        Some(path) => run_intent(&mut session, Intent::Open(Some(path)))?,
        None => {
            if let IntentOutcome::Failed(message) = session.start() {
                tracing::warn!(%message, "could not reopen most recent file");
            }
        }
    }

    for step in &cli.steps {
        match resolve_step(&session, step) {
            Some(intent) => run_intent(&mut session, intent)?,
            None => tracing::info!(?step, "step does nothing in the current state"),
        }
    }

    if let Some(preview) = &cli.preview {
        let frame = session
            .display()
            .frame()
            .context("nothing was rendered; no preview to write")?;
        frame
            .save(preview)
            .with_context(|| format!("writing preview to {}", preview.display()))?;
        tracing::info!(path = %preview.display(), "preview written");
    }

    print_summary(&session);
    Ok(())
}
