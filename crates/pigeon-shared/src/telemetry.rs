//! Structured (bunyan JSON) logging for native builds

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Folder trace files are created in, relative to the working directory
pub const TRACE_FOLDER: &str = "traces";

/// Where [`init_tracing`] sends log output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDestination {
    /// A new timestamped file in [`TRACE_FOLDER`]
    File,
    Stdout,
    /// Spans are still created but output is thrown away
    Discard,
}

/// Compose the filter and bunyan layers into one subscriber
///
/// `RUST_LOG` takes precedence over `default_env_filter_directive`, which
/// uses the `EnvFilter` directive syntax
pub fn get_subscriber<Sink, S>(
    name: String,
    default_env_filter_directive: S,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    S: AsRef<str>,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_env_filter_directive));
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Register a subscriber as global default. Fails if called a second time.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("failed to set logger")?;
    set_global_default(subscriber).context("failed to set subscriber")?;
    Ok(())
}

/// Sets up the global subscriber, returning the path of the trace file if
/// one was created
pub fn init_tracing(
    name: &str,
    default_env_filter_directive: &str,
    destination: TraceDestination,
) -> anyhow::Result<Option<PathBuf>> {
    let name = name.to_string();
    match destination {
        TraceDestination::File => {
            let (file, path) = create_trace_file(&name)?;
            init_subscriber(get_subscriber(name, default_env_filter_directive, file))?;
            Ok(Some(path))
        }
        TraceDestination::Stdout => {
            init_subscriber(get_subscriber(
                name,
                default_env_filter_directive,
                std::io::stdout,
            ))?;
            Ok(None)
        }
        TraceDestination::Discard => {
            init_subscriber(get_subscriber(
                name,
                default_env_filter_directive,
                std::io::sink,
            ))?;
            Ok(None)
        }
    }
}

fn trace_file_name(app_name: &str, now: chrono::NaiveDateTime) -> String {
    format!("{}_{app_name}.log", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Returns a handle to the file created and the file path
pub fn create_trace_file(app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    create_trace_file_in(Path::new(TRACE_FOLDER), app_name)
}

fn create_trace_file_in(folder: &Path, app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    create_dir_all(folder).with_context(|| format!("failed to create trace folder: {folder:?}"))?;
    let file_path = folder.join(trace_file_name(app_name, chrono::Local::now().naive_local()));
    let file = File::create(&file_path)
        .with_context(|| format!("failed to create trace file: {file_path:?}"))?;
    Ok((file, file_path))
}
