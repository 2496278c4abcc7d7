use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use crate::output::AllocRecord;
use crate::sink::{ConsoleSink, RecordSink};

thread_local! {
    // Set while a sink call is in flight, so allocations made by the sink
    // itself are passed through unreported instead of recursing.
    static IN_SINK: Cell<bool> = const { Cell::new(false) };
}

const CONSOLE: ConsoleSink = ConsoleSink;

/// [`GlobalAlloc`] wrapper that reports every allocation's size before
/// forwarding it to the inner allocator.
///
/// This is the process-wide install path: plain containers don't take a
/// [`MemorySource`](crate::MemorySource), but routing the global allocator
/// through a tap makes their growth allocations observable.
///
/// ```rust,ignore
/// #[global_allocator]
/// static GLOBAL: alloctap::TapAlloc = alloctap::TapAlloc::system();
///
/// fn main() {
///     let mut ints = Vec::new();
///     ints.push(42);   // growth allocation reported to stderr
///     ints.push(1729); // within capacity, nothing reported
/// }
/// ```
///
/// Deallocations are forwarded without a record, mirroring
/// [`TapSource`](crate::TapSource).
pub struct TapAlloc<A: GlobalAlloc = System> {
    inner: A,
    sink: &'static dyn RecordSink,
}

impl TapAlloc<System> {
    /// Taps the system allocator, reporting to stderr.
    pub const fn system() -> Self {
        Self::new(System)
    }
}

impl<A: GlobalAlloc> TapAlloc<A> {
    /// Taps `inner`, reporting to stderr.
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            sink: &CONSOLE,
        }
    }

    /// Taps `inner`, reporting to `sink`.
    ///
    /// Allocations the sink makes from within [`RecordSink::record`] are
    /// suppressed, not recursed on, so they go unreported.
    pub const fn with_sink(inner: A, sink: &'static dyn RecordSink) -> Self {
        Self { inner, sink }
    }

    fn report(&self, layout: Layout) {
        // try_with: allocations during thread-local teardown are passed
        // through unreported rather than aborting the process.
        let _ = IN_SINK.try_with(|flag| {
            if flag.get() {
                return;
            }
            flag.set(true);
            self.sink.record(AllocRecord::new(layout));
            flag.set(false);
        });
    }
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TapAlloc<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.report(layout);

        unsafe { self.inner.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { self.inner.dealloc(ptr, layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        self.report(layout);

        unsafe { self.inner.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // A grow or shrink is a request for new_size bytes.
        let requested = unsafe { Layout::from_size_align_unchecked(new_size, layout.align()) };
        self.report(requested);

        unsafe { self.inner.realloc(ptr, layout, new_size) }
    }
}
