//! Intercepting allocator: wrap an existing memory source, forward every
//! allocate/deallocate/equality call to it, and report each allocation's
//! size before forwarding.
//!
//! The interceptor is a pure pass-through decorator. It owns no memory,
//! keeps no per-request state, and never swallows, translates, or retries a
//! delegate failure; the only behavior it adds is one observable record per
//! allocation, sent to a pluggable [`RecordSink`].
//!
//! Two install paths are supported:
//!
//! - [`TapSource`] implements the [`MemorySource`] capability and can be
//!   passed anywhere a source is accepted, or installed as the process-wide
//!   default with [`install_default`] / [`set_default_source`].
//! - [`TapAlloc`] implements [`GlobalAlloc`](std::alloc::GlobalAlloc) for
//!   `#[global_allocator]`, making the growth allocations of plain
//!   containers observable.
//!
//! ```
//! use std::alloc::Layout;
//! use alloctap::{system, ChannelSink, MemorySource, TapSource};
//!
//! let (sink, records) = ChannelSink::unbounded();
//! let tap = TapSource::with_sink(system(), &sink);
//!
//! let layout = Layout::from_size_align(16, 8).unwrap();
//! let region = tap.allocate(layout).unwrap();
//! unsafe { tap.deallocate(region.cast(), layout) };
//!
//! assert_eq!(records.try_recv().unwrap().bytes, 16);
//! ```
//!
//! Thread safety is exactly that of the wrapped delegate: the tap adds no
//! shared mutable state of its own, and concurrent-writer safety of the
//! record stream is the sink's responsibility.

mod alloc;
mod buf;
mod global;
mod output;
mod sink;
mod source;
mod tap;

pub use alloc::TapAlloc;
pub use buf::SourceBuf;
pub use global::{default_source, install_default, set_default_source, DefaultSourceGuard};
pub use output::{format_bytes, AllocRecord};
#[cfg(feature = "json")]
pub use sink::JsonLinesSink;
pub use sink::{ChannelSink, ConsoleSink, RecordSink, StatsSink};
pub use source::{system, AllocFailure, MemorySource, SystemSource};
pub use tap::TapSource;
