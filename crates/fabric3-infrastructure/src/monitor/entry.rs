//! Monitor entries
//!
//! An entry is rendered as `[LEVEL timestamp] [runtime] message`, where the
//! message is the template with each `{}` replaced by the next argument.
//! Rendering writes into a buffer reserved up front and truncates at its
//! capacity.

use std::fmt::{self, Display, Write};

use chrono::{DateTime, Local};

use super::level::MonitorLevel;

/// A reusable slot of the monitor ring buffer
#[derive(Debug)]
pub struct MonitorEventEntry {
    sequence: u64,
    destination_index: usize,
    buffer: Vec<u8>,
    capacity: usize,
}

impl MonitorEventEntry {
    /// Create an entry reserving `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            sequence: 0,
            destination_index: 0,
            buffer: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Ring sequence claimed for the entry
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Set the claimed sequence
    pub fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    /// Destination the entry is routed to
    pub fn destination_index(&self) -> usize {
        self.destination_index
    }

    /// Route the entry
    pub fn set_destination_index(&mut self, index: usize) {
        self.destination_index = index;
    }

    /// Rendered bytes
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Buffer to render into
    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }

    /// Bytes reserved
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empty the buffer, keeping its allocation
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Appends to a byte buffer up to a fixed length
struct Bounded<'a> {
    buffer: &'a mut Vec<u8>,
    capacity: usize,
}

impl Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.capacity.saturating_sub(self.buffer.len());
        if s.len() <= room {
            self.buffer.extend_from_slice(s.as_bytes());
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buffer.extend_from_slice(&s.as_bytes()[..end]);
        }
        Ok(())
    }
}

/// Render an entry into `buffer`, at most `capacity` bytes
#[allow(clippy::too_many_arguments)]
pub fn write_entry(
    level: MonitorLevel,
    timestamp: DateTime<Local>,
    pattern: &str,
    runtime: &str,
    template: &str,
    args: &[&dyn Display],
    buffer: &mut Vec<u8>,
    capacity: usize,
) {
    let mut out = Bounded { buffer, capacity };
    // formatting into a Bounded never fails unless the pattern is invalid
    if write!(out, "[{level} {}] [{runtime}] ", timestamp.format(pattern)).is_err() {
        let _ = write!(out, "[{level}] [{runtime}] ");
    }

    let mut args = args.iter();
    let mut rest = template;
    while let Some(position) = rest.find("{}") {
        let _ = out.write_str(&rest[..position]);
        match args.next() {
            Some(arg) => {
                let _ = write!(out, "{arg}");
            }
            None => {
                let _ = out.write_str("{}");
            }
        }
        rest = &rest[position + 2..];
    }
    let _ = out.write_str(rest);
}
