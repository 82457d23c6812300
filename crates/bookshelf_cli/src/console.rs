//! Line-oriented prompts over any reader/writer pair.
//!
//! # Invariants
//! - A record form returns every field or nothing; closing input or an
//!   interrupt midway drops the fields collected so far.
//! - Input bytes that are not UTF-8 are decoded lossily, never fatal.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Interrupt state shared between the console and the Ctrl-C handler.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<InterruptState>);

#[derive(Debug, Default)]
struct InterruptState {
    armed: AtomicBool,
    raised: AtomicBool,
}

impl Interrupt {
    /// Records an interrupt for the active record form.
    ///
    /// Returns `false` when no form is collecting input.
    pub fn raise(&self) -> bool {
        if !self.0.armed.load(Ordering::SeqCst) {
            return false;
        }
        self.0.raised.store(true, Ordering::SeqCst);
        true
    }

    fn arm(&self) {
        self.0.raised.store(false, Ordering::SeqCst);
        self.0.armed.store(true, Ordering::SeqCst);
    }

    fn disarm(&self) {
        self.0.armed.store(false, Ordering::SeqCst);
        self.0.raised.store(false, Ordering::SeqCst);
    }

    fn take(&self) -> bool {
        self.0.raised.swap(false, Ordering::SeqCst)
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
    interrupt: Interrupt,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interrupt: Interrupt::default(),
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints `label` and reads one line without its line ending.
    ///
    /// Returns `None` once input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Collects one value per label as a single unit.
    ///
    /// Returns `None` when input closes or an interrupt arrives before the
    /// last field is complete.
    pub fn form<const N: usize>(&mut self, labels: [&str; N]) -> io::Result<Option<[String; N]>> {
        self.interrupt.arm();
        let collected = self.collect(labels);
        self.interrupt.disarm();
        collected
    }

    fn collect<const N: usize>(&mut self, labels: [&str; N]) -> io::Result<Option<[String; N]>> {
        let mut values = Vec::with_capacity(N);
        for label in labels {
            let value = self.prompt(label)?;
            if self.interrupt.take() {
                return Ok(None);
            }
            match value {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        Ok(values.try_into().ok())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
