use std::alloc::Layout;
use std::ptr::NonNull;
use std::slice;

use crate::source::{AllocFailure, MemorySource};

/// Owns a region obtained from a [`MemorySource`], releasing it with the
/// original layout on drop.
///
/// The region is zero-initialized on allocation so it can be exposed as
/// plain byte slices.
///
/// # Examples
///
/// ```
/// use std::alloc::Layout;
/// use alloctap::{system, SourceBuf};
///
/// let layout = Layout::from_size_align(16, 8).unwrap();
/// let mut buf = SourceBuf::zeroed(system(), layout).unwrap();
/// buf.as_mut_slice().fill(0x2a);
/// assert_eq!(buf.as_slice()[15], 0x2a);
/// // released back to the source when `buf` drops
/// ```
pub struct SourceBuf<'s> {
    source: &'s dyn MemorySource,
    ptr: NonNull<u8>,
    layout: Layout,
}

impl<'s> SourceBuf<'s> {
    /// Allocates `layout.size()` zeroed bytes from `source`.
    pub fn zeroed(source: &'s dyn MemorySource, layout: Layout) -> Result<Self, AllocFailure> {
        let region = source.allocate(layout)?;
        let ptr = region.cast::<u8>();
        if layout.size() > 0 {
            unsafe { ptr.as_ptr().write_bytes(0, layout.size()) };
        }
        Ok(Self {
            source,
            ptr,
            layout,
        })
    }

    pub fn len(&self) -> usize {
        self.layout.size()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for SourceBuf<'_> {
    fn drop(&mut self) {
        unsafe { self.source.deallocate(self.ptr, self.layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::system;

    #[test]
    fn zeroed_on_allocation() {
        let layout = Layout::from_size_align(32, 8).unwrap();
        let buf = SourceBuf::zeroed(system(), layout).unwrap();
        assert_eq!(buf.len(), 32);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_buf() {
        let layout = Layout::from_size_align(0, 8).unwrap();
        let buf = SourceBuf::zeroed(system(), layout).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.as_slice(), &[] as &[u8]);
    }
}
