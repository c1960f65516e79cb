use popup_editor::config::EditorConfig;
use popup_editor::error::EditorError;
use popup_editor::manifest::Manifest;
use popup_editor::value::Value;
use popup_editor::{ControlEvent, EditorDescriptor, EditorRegistry, Stage, TrackEvent};
use std::path::PathBuf;

const USAGE: &str = "usage: popup-editor [--config <file>] <manifest.yaml|json> [name=value ...]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct Args {
    config: Option<PathBuf>,
    manifest: PathBuf,
    changes: Vec<(String, String)>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut config = None;
    let mut manifest = None;
    let mut changes = Vec::new();

    while let Some(arg) = raw.next() {
        if arg == "--config" {
            config = Some(PathBuf::from(raw.next().ok_or(USAGE)?));
        } else if manifest.is_none() {
            manifest = Some(PathBuf::from(arg));
        } else {
            let (name, value) = arg
                .split_once('=')
                .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
            changes.push((name.to_string(), value.to_string()));
        }
    }

    Ok(Args {
        config,
        manifest: manifest.ok_or(USAGE)?,
        changes,
    })
}

fn run() -> Result<(), EditorError> {
    let args = parse_args(std::env::args().skip(1)).map_err(EditorError::Config)?;
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let manifest = Manifest::load(&args.manifest)?;

    let mut registry = EditorRegistry::new();
    registry.register(EditorDescriptor::popup(&config));
    let mut session = registry.create_session(&config.name, Stage::new("media"), config.clone())?;

    let object = TrackEvent::new("track-event-1", config.name.as_str(), manifest).into_handle();
    session.open(object.clone())?;

    for (name, raw) in &args.changes {
        let value = Value::from(raw.as_str());
        // the icon picker commits on keyup rather than change
        let event = if name == "icon" {
            ControlEvent::Settle(value)
        } else {
            ControlEvent::Change(value)
        };
        for event in session.handle_control_event(name, event) {
            tracing::info!(?event, "panel event");
        }
    }

    let snapshot = serde_json::json!({
        "values": object.borrow().option_values(),
        "panel": session.panel(),
        "blinks": session.host().media().blinks,
        "tooltips": session.host().tooltips(),
    });
    let rendered = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::other)?;
    println!("{rendered}");

    session.close();
    Ok(())
}
