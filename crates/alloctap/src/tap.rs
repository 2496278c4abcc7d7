use std::alloc::Layout;
use std::ptr::NonNull;

use crate::output::AllocRecord;
use crate::sink::{ConsoleSink, RecordSink};
use crate::source::{AllocFailure, MemorySource};

const CONSOLE: ConsoleSink = ConsoleSink;

/// Decorator that reports every allocation before forwarding it to a
/// delegate [`MemorySource`].
///
/// The tap owns no memory and keeps no per-request state: every call is a
/// synchronous forward with a single reporting side effect. Allocation
/// failures from the delegate propagate unchanged, and deallocations are
/// forwarded without a record.
///
/// The delegate is borrowed, so it necessarily outlives the tap. Equality
/// sees through the decorator: two taps wrapping equal delegates compare
/// equal, which lets regions migrate between them.
///
/// # Examples
///
/// ```
/// use std::alloc::Layout;
/// use alloctap::{system, ChannelSink, MemorySource, TapSource};
///
/// let (sink, records) = ChannelSink::unbounded();
/// let tap = TapSource::with_sink(system(), &sink);
///
/// let layout = Layout::from_size_align(16, 8).unwrap();
/// let region = tap.allocate(layout).unwrap();
/// unsafe { tap.deallocate(region.cast(), layout) };
///
/// let record = records.try_recv().unwrap();
/// assert_eq!(record.bytes, 16);
/// assert!(records.try_recv().is_err()); // deallocate is silent
/// ```
pub struct TapSource<'a> {
    delegate: &'a dyn MemorySource,
    sink: &'a dyn RecordSink,
}

impl<'a> TapSource<'a> {
    /// Wraps `delegate`, reporting allocations to stderr.
    pub const fn new(delegate: &'a dyn MemorySource) -> Self {
        Self {
            delegate,
            sink: &CONSOLE,
        }
    }

    /// Wraps `delegate`, reporting allocations to `sink`.
    pub const fn with_sink(delegate: &'a dyn MemorySource, sink: &'a dyn RecordSink) -> Self {
        Self { delegate, sink }
    }

    /// The source this tap forwards to.
    pub fn delegate(&self) -> &'a dyn MemorySource {
        self.delegate
    }
}

impl MemorySource for TapSource<'_> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocFailure> {
        self.sink.record(AllocRecord::new(layout));

        self.delegate.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.delegate.deallocate(ptr, layout) }
    }

    fn backing(&self) -> &dyn MemorySource {
        self.delegate.backing()
    }
}
