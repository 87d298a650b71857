use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::error::PipError;

/// Where log lines end up.
///
/// The popover draws over the whole alternate screen, so writing to stderr
/// would tear the UI; without a log file, output is discarded.
#[derive(Clone, Debug)]
pub enum LogTarget {
    File(Arc<Mutex<File>>),
    Discard,
}

impl LogTarget {
    pub fn file(path: &Path) -> Result<Self, PipError> {
        let file = File::create(path)?;
        Ok(LogTarget::File(Arc::new(Mutex::new(file))))
    }
}

pub struct TargetWriter {
    target: LogTarget,
}

impl Write for TargetWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.target {
            LogTarget::File(file) => match file.lock() {
                Ok(mut file) => file.write(buf),
                Err(_) => Err(io::Error::other("log file lock poisoned")),
            },
            LogTarget::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.target {
            LogTarget::File(file) => match file.lock() {
                Ok(mut file) => file.flush(),
                Err(_) => Err(io::Error::other("log file lock poisoned")),
            },
            LogTarget::Discard => Ok(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    target: LogTarget,
}

impl SubscriberMakeWriter {
    pub fn new(target: LogTarget) -> Self {
        Self { target }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = TargetWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TargetWriter {
            target: self.target.clone(),
        }
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(log_file: Option<&Path>, level: Level) -> Result<(), PipError> {
    let target = match log_file {
        Some(path) => LogTarget::file(path)?,
        None => LogTarget::Discard,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter::new(target))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
