//! Host RSVP player: plays a UTF-8 text file to stdout at a paced
//! rate, persisting the reading position in a sidecar file so a later
//! run resumes where this one stopped.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use veloread_core::{
    app::{PlayerApp, PlayerConfig, TickResult},
    document::DocumentId,
    progress::PROGRESS_DEBOUNCE_MS,
    render::Screen,
    source::ProgressStore,
};

#[path = "main/progress_file.rs"]
mod progress_file;
#[path = "main/text_catalog.rs"]
mod text_catalog;

use progress_file::FileProgressStore;
use text_catalog::TextFileProvider;

const TICK_SLEEP_MS: u64 = 10;

const USAGE: &str = "usage: veloread <file> [--wpm N] [--group 1|2|3] [--start-page N]";

struct Args {
    path: PathBuf,
    wpm: Option<u16>,
    group_size: Option<u8>,
    start_page: Option<u32>,
}

fn parse_args() -> Result<Args, String> {
    let mut path = None;
    let mut wpm = None;
    let mut group_size = None;
    let mut start_page = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--wpm" => wpm = Some(parse_value(&arg, args.next())?),
            "--group" => group_size = Some(parse_value(&arg, args.next())?),
            "--start-page" => start_page = Some(parse_value(&arg, args.next())?),
            "--help" | "-h" => return Err(String::from(USAGE)),
            other if path.is_none() && !other.starts_with('-') => {
                path = Some(PathBuf::from(other));
            }
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    let path = path.ok_or_else(|| String::from("missing input file"))?;
    Ok(Args {
        path,
        wpm,
        group_size,
        start_page,
    })
}

fn parse_value<T: core::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value.parse().map_err(|_| format!("invalid value for {flag}: {value}"))
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            if message != USAGE {
                eprintln!("{USAGE}");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), std::io::Error> {
    let provider = TextFileProvider::open(&args.path)?;
    let mut store = FileProgressStore::new(&args.path);
    let meta = store.load_meta();
    let id = DocumentId::new(args.path.display().to_string());

    let mut config = PlayerConfig::default();
    if let Some(wpm) = args.wpm {
        config.wpm = wpm;
    }
    if let Some(group_size) = args.group_size {
        config.group_size = group_size;
    }

    let mut app = PlayerApp::new(provider, config);
    let epoch = Instant::now();

    app.select_document(id.clone(), meta, 0);
    if let Some(page) = args.start_page {
        app.set_start_page(page, 0);
    }

    let mut started = false;
    loop {
        let now_ms = epoch.elapsed().as_millis() as u64;

        if app.tick(now_ms) == TickResult::RenderRequested {
            app.with_screen(render_screen);
        }

        while let Some(checkpoint) = app.take_due_progress(now_ms) {
            // Fire-and-forget: a failed write is superseded by the
            // next debounce cycle.
            if store.persist(&id, checkpoint).is_err() {
                warn!("progress write failed page={}", checkpoint.page);
            }
        }

        if !started && app.is_ready() {
            app.play(now_ms);
            started = true;
            info!(
                "playback started index={} wpm={}",
                app.current_index(),
                app.config().wpm
            );
        }

        if started && !app.is_playing() {
            break;
        }

        thread::sleep(Duration::from_millis(TICK_SLEEP_MS));
    }

    // The last position may still be sitting in the debounce window.
    let final_ms = epoch.elapsed().as_millis() as u64 + PROGRESS_DEBOUNCE_MS;
    while let Some(checkpoint) = app.take_due_progress(final_ms) {
        let _ = store.persist(&id, checkpoint);
    }

    info!("end of document");
    Ok(())
}

fn render_screen(screen: Screen<'_>) {
    match screen {
        Screen::Empty => {}
        Screen::Processing => debug!("document processing"),
        Screen::Reading {
            window,
            preview,
            position,
            page,
            page_count,
            ..
        } => {
            println!("{window}");
            if let Some(preview) = preview {
                debug!("next: {preview}");
            }
            debug!(
                "position {}/{} page {}/{}",
                position.0, position.1, page, page_count
            );
        }
    }
}
