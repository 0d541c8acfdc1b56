//! Command dispatch and handlers.

pub mod collect;
pub mod render;

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::cassette::session::{RecordingSession, DEFAULT_CASSETTE_ROOT};
use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::{Error, Result};

/// Environment variable that turns on recording for `collect`.
///
/// Its value is the cassette root; an empty value or `1` selects
/// [`DEFAULT_CASSETTE_ROOT`].
pub const RECORD_ENV: &str = "IMPORT_GRAPH_RECORD";

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error for structural failures only. Per-module collection
/// errors are logged.
pub fn dispatch(command: &Command) -> Result<()> {
    match command {
        Command::Collect { output, test, color_scheme, config } => {
            let options = collect::CollectOptions {
                output: *output,
                test: *test,
                color_scheme: color_scheme.as_deref(),
                config: config.as_deref(),
            };
            with_context(|ctx| {
                let stdin = io::stdin().lock();
                let mut stdout = BufWriter::new(io::stdout().lock());
                let errors = collect::run_with_context(ctx, &options, stdin, &mut stdout)?;
                stdout.flush()?;
                if !errors.is_empty() {
                    tracing::warn!("{} collection errors", errors.len());
                }
                Ok(())
            })
        }
        Command::Render { color_scheme, color } => {
            let stdin = io::stdin().lock();
            let mut stdout = BufWriter::new(io::stdout().lock());
            render::run(color_scheme.as_deref(), *color, stdin, &mut stdout)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Runs `f` with a live context, recording when [`RECORD_ENV`] is set.
fn with_context(f: impl FnOnce(&ServiceContext) -> Result<()>) -> Result<()> {
    let Ok(root) = env::var(RECORD_ENV) else {
        let ctx = ServiceContext::live().map_err(|e| Error::Config(e.to_string()))?;
        return f(&ctx);
    };

    let root = if root.is_empty() || root == "1" { DEFAULT_CASSETTE_ROOT.to_string() } else { root };
    let session = RecordingSession::new_in(Path::new(&root)).map_err(Error::Config)?;
    let ctx = ServiceContext::recording(&session).map_err(|e| Error::Config(e.to_string()))?;

    let result = f(&ctx);

    // The context holds recorder references until dropped.
    drop(ctx);
    let dir = session.finish().map_err(Error::Config)?;
    eprintln!("Recording saved to: {}", dir.display());
    result
}
