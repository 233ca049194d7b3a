// src/ring_buffer.rs
//! Bounded in-memory capture of triggered reports.
//!
//! [`ReportBuffer`] is a [`ReportSink`] that keeps the most recent reports
//! in a fixed-size ring with FIFO eviction, so a validation loop that emits
//! thousands of warnings cannot grow memory without bound.
//!
//! - Fixed capacity, allocated once
//! - Per-entry byte cap on the rendered text
//! - `RwLock`: concurrent readers, exclusive writers
//! - Clones share the same buffer
//!
//! # Example
//!
//! ```rust
//! use error_criteria::{ErrorCriteria, HandlerBuilder, ReportBuffer};
//!
//! let criteria = ErrorCriteria::from_builder(HandlerBuilder::new().colors(false));
//! let mut reports = ReportBuffer::new(16, 512);
//!
//! let errors = [criteria.limit(12, Some(0), Some(10))];
//! let halt = criteria.dispatch(&errors, &mut reports);
//!
//! assert_eq!(halt.map(|code| code.value()), Some(105));
//! let recent = reports.get_recent(1);
//! assert_eq!(&*recent[0].rendered, "Error: Value must be between 0 and 10. Given value: 12.");
//! ```

use crate::logging::{ReportSink, TriggerLog, truncate_with_indicator};
use crate::ErrorCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One captured report.
///
/// Text is held in `Arc<str>` so reading entries back only bumps refcounts.
#[derive(Clone, Debug)]
pub struct ReportEntry {
    /// Code of the reported error
    pub code: ErrorCode,
    /// Whether the error was critical
    pub critical: bool,
    /// Message as stored in the error
    pub message: Arc<str>,
    /// Full rendered report, prefix and trace included
    pub rendered: Arc<str>,
}

struct Ring {
    entries: Box<[Option<ReportEntry>]>,
    tail: usize,
    head: usize,
    len: usize,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            entries: std::iter::repeat_with(|| None)
                .take(capacity)
                .collect::<Box<[Option<ReportEntry>]>>(),
            tail: 0,
            head: 0,
            len: 0,
        }
    }

    fn push(&mut self, entry: ReportEntry) -> Option<ReportEntry> {
        let evicted = self.entries[self.tail].replace(entry);
        self.tail = (self.tail + 1) % self.entries.len();

        if self.len < self.entries.len() {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % self.entries.len();
        }

        evicted
    }

    fn iter(&self) -> impl DoubleEndedIterator<Item = &ReportEntry> {
        let head = self.head;
        let cap = self.entries.len();

        (0..self.len).filter_map(move |i| self.entries[(head + i) % cap].as_ref())
    }

    fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

/// Ring buffer of recent reports.
pub struct ReportBuffer {
    ring: Arc<RwLock<Ring>>,
    max_entries: usize,
    max_entry_bytes: usize,
    evictions: Arc<AtomicU64>,
}

impl ReportBuffer {
    /// Keep at most `max_entries` reports (at least one), each rendered
    /// into at most `max_entry_bytes` bytes.
    pub fn new(max_entries: usize, max_entry_bytes: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            ring: Arc::new(RwLock::new(Ring::new(max_entries))),
            max_entries,
            max_entry_bytes,
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    fn read_ring(&self) -> RwLockReadGuard<'_, Ring> {
        match self.ring.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[inline]
    fn write_ring(&self) -> RwLockWriteGuard<'_, Ring> {
        match self.ring.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Capture one report, evicting the oldest if full.
    pub fn record(&self, log: &TriggerLog<'_>) {
        let entry = self.create_entry(log);
        if self.write_ring().push(entry).is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn create_entry(&self, log: &TriggerLog<'_>) -> ReportEntry {
        let rendered = log.render();
        ReportEntry {
            code: log.code(),
            critical: log.is_critical(),
            message: Arc::from(
                truncate_with_indicator(log.message(), self.max_entry_bytes).as_ref(),
            ),
            rendered: Arc::from(truncate_with_indicator(&rendered, self.max_entry_bytes).as_ref()),
        }
    }

    /// The `count` most recent entries, newest first.
    pub fn get_recent(&self, count: usize) -> Vec<ReportEntry> {
        self.read_ring().iter().rev().take(count).cloned().collect()
    }

    /// All entries, newest first.
    pub fn get_all(&self) -> Vec<ReportEntry> {
        self.read_ring().iter().rev().cloned().collect()
    }

    /// Entries matching `predicate`, oldest first.
    pub fn get_filtered<F>(&self, predicate: F) -> Vec<ReportEntry>
    where
        F: Fn(&ReportEntry) -> bool,
    {
        self.read_ring().iter().filter(|e| predicate(e)).cloned().collect()
    }

    /// Captured warnings and criticals for `code`, oldest first.
    pub fn get_by_code(&self, code: ErrorCode) -> Vec<ReportEntry> {
        self.get_filtered(|entry| entry.code == code)
    }

    /// Number of entries held.
    #[inline]
    pub fn len(&self) -> usize {
        self.read_ring().len
    }

    /// Whether nothing has been captured since creation or the last clear.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total evictions since creation.
    #[inline]
    pub fn eviction_count(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Drop every entry. The eviction counter is kept.
    pub fn clear(&self) {
        self.write_ring().clear();
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Whether the next report will evict.
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_entries
    }
}

impl Clone for ReportBuffer {
    fn clone(&self) -> Self {
        Self {
            ring: Arc::clone(&self.ring),
            max_entries: self.max_entries,
            max_entry_bytes: self.max_entry_bytes,
            evictions: Arc::clone(&self.evictions),
        }
    }
}

impl ReportSink for ReportBuffer {
    fn report(&mut self, log: &TriggerLog<'_>) {
        self.record(log);
    }
}
