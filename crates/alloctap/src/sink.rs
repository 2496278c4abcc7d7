use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::output::AllocRecord;

/// Destination for allocation records emitted by taps.
///
/// A tap adds no locking of its own: records arrive from whichever thread
/// allocates, so implementations must be safe for concurrent writers.
pub trait RecordSink: Send + Sync {
    fn record(&self, record: AllocRecord);
}

/// Writes one line per allocation to stderr.
///
/// This is the default sink for [`TapSource`](crate::TapSource) and
/// [`TapAlloc`](crate::TapAlloc).
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl RecordSink for ConsoleSink {
    fn record(&self, record: AllocRecord) {
        eprintln!("[alloctap] {record}");
    }
}

/// Forwards records over a channel, for consumers that aggregate elsewhere
/// or assert on the exact record stream.
pub struct ChannelSink {
    tx: Sender<AllocRecord>,
}

impl ChannelSink {
    /// Creates an unbounded sink together with its receiving half.
    pub fn unbounded() -> (Self, Receiver<AllocRecord>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl RecordSink for ChannelSink {
    fn record(&self, record: AllocRecord) {
        // A disconnected receiver just means nobody is listening anymore.
        let _ = self.tx.try_send(record);
    }
}

/// Running totals across every record seen.
#[derive(Debug, Default)]
pub struct StatsSink {
    bytes_total: AtomicU64,
    count_total: AtomicU64,
}

impl StatsSink {
    pub const fn new() -> Self {
        Self {
            bytes_total: AtomicU64::new(0),
            count_total: AtomicU64::new(0),
        }
    }

    /// Total bytes requested across all records.
    pub fn bytes_total(&self) -> u64 {
        self.bytes_total.load(Ordering::Relaxed)
    }

    /// Number of records seen.
    pub fn count_total(&self) -> u64 {
        self.count_total.load(Ordering::Relaxed)
    }
}

impl RecordSink for StatsSink {
    fn record(&self, record: AllocRecord) {
        self.bytes_total
            .fetch_add(record.bytes as u64, Ordering::Relaxed);
        self.count_total.fetch_add(1, Ordering::Relaxed);
    }
}

/// Writes each record as one JSON object per line.
#[cfg(feature = "json")]
pub struct JsonLinesSink<W: std::io::Write + Send> {
    writer: std::sync::Mutex<W>,
}

#[cfg(feature = "json")]
impl<W: std::io::Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: std::sync::Mutex::new(writer),
        }
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(feature = "json")]
impl<W: std::io::Write + Send> RecordSink for JsonLinesSink<W> {
    fn record(&self, record: AllocRecord) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *writer, &record).is_ok() {
            let _ = writer.write_all(b"\n");
        }
    }
}
