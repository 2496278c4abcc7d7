use std::alloc::{GlobalAlloc, Layout, System};
use std::ptr::NonNull;

use thiserror::Error;

/// Error returned when a memory source cannot service an allocation request.
///
/// Carries the requested layout so callers can report what was asked for.
/// Sources introduce no other error kinds: a decorator that receives this
/// from its delegate passes it through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to allocate {size} bytes (align {align})")]
pub struct AllocFailure {
    size: usize,
    align: usize,
}

impl AllocFailure {
    pub fn new(layout: Layout) -> Self {
        Self {
            size: layout.size(),
            align: layout.align(),
        }
    }

    /// Requested size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Requested alignment in bytes.
    pub fn align(&self) -> usize {
        self.align
    }
}

/// A capability for obtaining and releasing raw memory regions.
///
/// This is the seam that decorators such as [`TapSource`](crate::TapSource)
/// plug into: anything that can hand out memory regions and take them back
/// implements it, and any implementor can be installed as the process-wide
/// default via [`set_default_source`](crate::set_default_source).
///
/// Two sources are interchangeable for a container of regions if and only if
/// [`is_equal`](MemorySource::is_equal) returns `true` in both directions.
pub trait MemorySource: Send + Sync {
    /// Obtains a region of at least `layout.size()` bytes aligned to
    /// `layout.align()`.
    ///
    /// Zero-size requests are valid; the returned region is empty.
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocFailure>;

    /// Releases a region previously obtained from a source equal to this
    /// one.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`allocate`](MemorySource::allocate)
    /// on a source for which `self.is_equal(source)` holds, with the same
    /// `layout` used at allocation time, and must not be released twice.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// The innermost source that actually services requests.
    ///
    /// Terminal sources return themselves (or a canonical shared instance);
    /// decorators return their delegate's backing.
    fn backing(&self) -> &dyn MemorySource;

    /// Whether memory obtained from `self` may be released through `other`.
    ///
    /// Equality compares the backing sources, never decorator identity, so
    /// two decorators wrapping equal delegates compare equal and regions can
    /// migrate between them.
    fn is_equal(&self, other: &dyn MemorySource) -> bool {
        std::ptr::addr_eq(self.backing() as *const _, other.backing() as *const _)
    }
}

/// The process heap, exposed as a [`MemorySource`].
///
/// All instances are interchangeable; equality goes through the canonical
/// shared instance returned by [`system`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSource;

static SYSTEM: SystemSource = SystemSource;

/// The shared process-heap source.
pub fn system() -> &'static SystemSource {
    &SYSTEM
}

impl MemorySource for SystemSource {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocFailure> {
        if layout.size() == 0 {
            // The heap is never touched for empty regions; hand out a
            // well-aligned dangling pointer instead.
            let dangling = unsafe { NonNull::new_unchecked(layout.align() as *mut u8) };
            return Ok(NonNull::slice_from_raw_parts(dangling, 0));
        }

        let ptr = unsafe { System.alloc(layout) };
        NonNull::new(ptr)
            .map(|ptr| NonNull::slice_from_raw_parts(ptr, layout.size()))
            .ok_or_else(|| AllocFailure::new(layout))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }
        unsafe { System.dealloc(ptr.as_ptr(), layout) }
    }

    fn backing(&self) -> &dyn MemorySource {
        &SYSTEM
    }
}
