//! # Print Hand-off
//!
//! Printing belongs to the host. The bill commands render the invoice as
//! text and pass it to a [`PrintSink`]; success or failure is all they see.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Somewhere a rendered invoice can be sent.
pub trait PrintSink: Send + Sync {
    fn print(&self, document: &str) -> io::Result<()>;
}

/// Writes documents to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutPrinter;

impl PrintSink for StdoutPrinter {
    fn print(&self, document: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(document.as_bytes())?;
        out.flush()
    }
}

/// Writes documents to any writer (a file, a pipe to `lp`).
#[derive(Debug)]
pub struct WriterPrinter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterPrinter<W> {
    pub fn new(writer: W) -> Self {
        WriterPrinter {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> PrintSink for WriterPrinter<W> {
    fn print(&self, document: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(document.as_bytes())?;
        writer.flush()
    }
}

/// Keeps every printed document in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrinter {
    pages: Arc<Mutex<Vec<String>>>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> Vec<String> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl PrintSink for MemoryPrinter {
    fn print(&self, document: &str) -> io::Result<()> {
        self.pages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(document.to_string());
        Ok(())
    }
}
