//! `selectbar` replays a session script against the headless host and prints
//! the resulting annotations and toolbar placement.

use anyhow::Result;
use clap::Parser;
use core_actions::{SelectionToolbar, ToolbarOptions};
use core_config::load_from;
use core_events::{Event, EventHooks, EventQueue, QUEUE_OVERFLOWS, TracingEventHooks};
use core_model::headless::{HeadlessTextView, HeadlessWindow};
use core_model::{FloatingWindow, Point};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::Ordering;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod script;

use script::Script;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "selectbar", version, about = "Selection toolbar session replay")]
struct Args {
    /// Session script (TOML) to replay.
    pub script: PathBuf,
    /// Optional configuration file path (overrides discovery of `selectbar.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

type Toolbar = SelectionToolbar<HeadlessTextView, HeadlessWindow>;

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("selectbar.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "selectbar.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Drain the queue through the toolbar. Returns `false` once a handler asked to quit.
fn drain(toolbar: &mut Toolbar, queue: &mut EventQueue, hooks: &dyn EventHooks) -> bool {
    while let Some(event) = queue.pop() {
        hooks.pre_handle(&event);
        let result = toolbar.handle(&event);
        hooks.post_handle(&event);
        if result.quit {
            return false;
        }
    }
    true
}

fn replay(script: &Script, toolbar: &mut Toolbar) {
    let mut queue = EventQueue::new();
    let hooks = TracingEventHooks;
    let attach_at = Point::new(script.view.x, script.view.y);
    for (index, step) in script.steps.iter().enumerate() {
        if let Some(event) = step.apply(toolbar.text_view_mut(), attach_at) {
            queue.post(event);
        }
        if !drain(toolbar, &mut queue, &hooks) {
            info!(target: "runtime", step = index, "replay_stopped");
            return;
        }
    }
}

fn report(toolbar: &Toolbar) {
    let text = toolbar.text_view().text();
    println!("state: {:?}", toolbar.state());
    match toolbar.range() {
        Some(range) => println!("range: {range}"),
        None => println!("range: none"),
    }
    match toolbar.last_anchor() {
        Some(anchor) => println!(
            "anchor: ({}, {}) {:?}",
            anchor.point.x, anchor.point.y, anchor.side
        ),
        None => println!("anchor: none"),
    }
    let window = toolbar.window();
    println!(
        "window: visible={} position=({}, {})",
        window.is_visible(),
        window.position().x,
        window.position().y
    );
    for span in text.spans() {
        println!(
            "span {} [{},{}) {:?} {:?}",
            span.id.0,
            span.range.start,
            span.range.end,
            span.kind,
            text.slice(span.range.clone())
        );
    }
    let m = toolbar.metrics();
    println!(
        "metrics: shows={} moves={} dismissals={} skipped={} applied={} cleared={}",
        m.shows, m.moves, m.dismissals, m.skipped, m.styles_applied, m.styles_cleared
    );
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let script = Script::load(&args.script)?;
    info!(
        target: "runtime.startup",
        script = %args.script.display(),
        steps = script.steps.len(),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let options = ToolbarOptions::new(script.text_view(), script.window());
    let mut toolbar = SelectionToolbar::new(options, &config);
    replay(&script, &mut toolbar);
    report(&toolbar);

    let mut queue = EventQueue::new();
    queue.post(Event::Shutdown);
    drain(&mut toolbar, &mut queue, &TracingEventHooks);
    info!(
        target: "runtime",
        queue_overflows = QUEUE_OVERFLOWS.load(Ordering::Relaxed),
        "shutdown"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Config;
    use core_state::OverlayState;
    use core_text::{AnnotationKind, CharacterStyle};
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> Toolbar {
        let script = Script::parse(source).unwrap();
        let options = ToolbarOptions::new(script.text_view(), script.window());
        let mut toolbar = SelectionToolbar::new(options, &Config::default());
        replay(&script, &mut toolbar);
        toolbar
    }

    #[test]
    fn replay_applies_styles_and_places_toolbar() {
        let toolbar = run(r#"
text = "The quick brown fox jumps over the lazy dog"
[view]
y = 200
[window]
content_width = 900
content_height = 150

[[steps]]
kind = "select"
start = 5
end = 10

[[steps]]
kind = "select"
start = 0
end = 3

[[steps]]
kind = "button"
name = "bold"

[[steps]]
kind = "frame"
"#);
        assert_eq!(toolbar.state(), OverlayState::Showing);
        assert_eq!(toolbar.window().position(), Point::new(-488, -151));
        let spans = toolbar.text_view().text().spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 0..3);
        assert_eq!(spans[0].kind, AnnotationKind::Character(CharacterStyle::Bold));
    }

    #[test]
    fn unselect_step_hides_toolbar() {
        let toolbar = run(r#"
text = "hello world"
[[steps]]
kind = "select"
start = 0
end = 5
[[steps]]
kind = "unselect"
"#);
        assert_eq!(toolbar.state(), OverlayState::Hidden);
        assert!(!toolbar.window().is_visible());
    }
}
