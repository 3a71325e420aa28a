//! Allocator capability and allocator-owned string storage.
//!
//! The codec takes its heap memory for string payloads from a pluggable
//! aligned allocator. [`JsonContext`] is the handle every value carries so
//! buffers are always released through the allocator that produced them.
//! [`StrBuf`] is the single owned byte range backing a string value:
//! validated UTF-8 plus a trailing NUL so the buffer can be handed to C
//! APIs without a copy.

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

/// Aligned allocation capability.
///
/// Replaces the C-style `(malloc_aligned, free_aligned, userdata)` triple:
/// implementations carry their own state.
pub trait AlignedAlloc: Send + Sync {
    /// Allocate `size` bytes aligned to `align`. Returns null on failure
    /// or when `size` is zero.
    fn alloc(&self, size: usize, align: usize) -> *mut u8;

    /// Release a block previously returned by [`AlignedAlloc::alloc`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `alloc` on this same allocator
    /// with this exact `size` and `align`, and must not be used again.
    unsafe fn free(&self, ptr: *mut u8, size: usize, align: usize);
}

/// Platform-default aligned allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAlloc;

impl AlignedAlloc for SystemAlloc {
    fn alloc(&self, size: usize, align: usize) -> *mut u8 {
        if size == 0 {
            return std::ptr::null_mut();
        }
        match Layout::from_size_align(size, align) {
            // SAFETY: the layout has nonzero size
            Ok(layout) => unsafe { alloc::alloc(layout) },
            Err(_) => std::ptr::null_mut(),
        }
    }

    unsafe fn free(&self, ptr: *mut u8, size: usize, align: usize) {
        if ptr.is_null() || size == 0 {
            return;
        }
        if let Ok(layout) = Layout::from_size_align(size, align) {
            // SAFETY: caller contract, ptr came from alloc with this layout
            unsafe { alloc::dealloc(ptr, layout) };
        }
    }
}

/// Handle to the allocator capability that owns a value's heap buffers.
///
/// Cloning the handle shares the same allocator; [`JsonContext::same_alloc`]
/// tells whether two values' buffers come from the same instance.
#[derive(Clone)]
pub struct JsonContext {
    alloc: Arc<dyn AlignedAlloc>,
}

impl JsonContext {
    /// Context backed by the platform-default allocator.
    pub fn new() -> JsonContext {
        JsonContext {
            alloc: Arc::new(SystemAlloc),
        }
    }

    /// Context backed by a caller-supplied allocator.
    pub fn with_alloc(alloc: Arc<dyn AlignedAlloc>) -> JsonContext {
        JsonContext { alloc }
    }

    /// Whether `self` and `other` share the same allocator instance.
    pub fn same_alloc(&self, other: &JsonContext) -> bool {
        Arc::ptr_eq(&self.alloc, &other.alloc)
    }

    pub(crate) fn raw(&self) -> &dyn AlignedAlloc {
        &*self.alloc
    }
}

impl Default for JsonContext {
    fn default() -> JsonContext {
        JsonContext::new()
    }
}

impl fmt::Debug for JsonContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonContext").finish_non_exhaustive()
    }
}

/// Allocator-owned, NUL-terminated UTF-8 string buffer.
///
/// `len` bytes of UTF-8 followed by one NUL byte, allocated from the
/// context recorded at construction and released through it on drop.
pub struct StrBuf {
    ptr: NonNull<u8>,
    len: usize,
    ctx: JsonContext,
}

impl StrBuf {
    pub(crate) fn new(ctx: &JsonContext, text: &str) -> StrBuf {
        let len = text.len();
        let size = len + 1;
        let layout = match Layout::from_size_align(size, 1) {
            Ok(layout) => layout,
            Err(_) => alloc::handle_alloc_error(Layout::new::<u8>()),
        };
        let Some(ptr) = NonNull::new(ctx.raw().alloc(size, 1)) else {
            alloc::handle_alloc_error(layout)
        };
        // SAFETY: the block is size bytes and cannot overlap `text`
        unsafe {
            std::ptr::copy_nonoverlapping(text.as_ptr(), ptr.as_ptr(), len);
            ptr.as_ptr().add(len).write(0);
        }
        StrBuf { ptr, len, ctx: ctx.clone() }
    }

    /// The text, without the trailing NUL.
    pub fn as_str(&self) -> &str {
        // SAFETY: the buffer holds len bytes copied from a &str
        unsafe {
            let bytes = std::slice::from_raw_parts(self.ptr.as_ptr(), self.len);
            std::str::from_utf8_unchecked(bytes)
        }
    }

    /// The UTF-8 bytes including the trailing NUL, for C interop.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        // SAFETY: the allocation is len + 1 bytes, the last one NUL
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }

    /// Text length in bytes, excluding the trailing NUL.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn context(&self) -> &JsonContext {
        &self.ctx
    }
}

impl Drop for StrBuf {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated from self.ctx with this size and align
        unsafe { self.ctx.raw().free(self.ptr.as_ptr(), self.len + 1, 1) };
    }
}

impl Clone for StrBuf {
    fn clone(&self) -> StrBuf {
        StrBuf::new(&self.ctx, self.as_str())
    }
}

// SAFETY: StrBuf uniquely owns its buffer and allocators are Send + Sync.
unsafe impl Send for StrBuf {}
// SAFETY: shared access only reads the immutable buffer.
unsafe impl Sync for StrBuf {}

impl fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq for StrBuf {
    fn eq(&self, other: &StrBuf) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for StrBuf {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_strbuf_round_trip() {
        let ctx = JsonContext::new();
        let buf = StrBuf::new(&ctx, "hello");
        assert_eq!(buf.as_str(), "hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_bytes_with_nul(), b"hello\0");
    }

    #[test]
    fn test_strbuf_empty() {
        let ctx = JsonContext::new();
        let buf = StrBuf::new(&ctx, "");
        assert!(buf.is_empty());
        assert_eq!(buf.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_strbuf_clone_uses_same_context() {
        let ctx = JsonContext::new();
        let buf = StrBuf::new(&ctx, "abc");
        let copy = buf.clone();
        assert_eq!(copy.as_str(), "abc");
        assert!(copy.context().same_alloc(&ctx));
    }

    // Counts outstanding blocks so leaks or double frees show up as a
    // nonzero balance.
    #[derive(Debug, Default)]
    struct CountingAlloc {
        live: AtomicUsize,
    }

    impl AlignedAlloc for CountingAlloc {
        fn alloc(&self, size: usize, align: usize) -> *mut u8 {
            let ptr = SystemAlloc.alloc(size, align);
            if !ptr.is_null() {
                self.live.fetch_add(1, Ordering::SeqCst);
            }
            ptr
        }

        unsafe fn free(&self, ptr: *mut u8, size: usize, align: usize) {
            if !ptr.is_null() {
                self.live.fetch_sub(1, Ordering::SeqCst);
            }
            // SAFETY: forwarded caller contract
            unsafe { SystemAlloc.free(ptr, size, align) };
        }
    }

    #[test]
    fn test_custom_allocator_balances() {
        let counter = Arc::new(CountingAlloc::default());
        let ctx = JsonContext::with_alloc(counter.clone());
        {
            let a = StrBuf::new(&ctx, "one");
            let b = a.clone();
            assert_eq!(counter.live.load(Ordering::SeqCst), 2);
            drop(a);
            assert_eq!(counter.live.load(Ordering::SeqCst), 1);
            drop(b);
        }
        assert_eq!(counter.live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_same_alloc() {
        let a = JsonContext::new();
        let b = JsonContext::new();
        assert!(a.same_alloc(&a.clone()));
        assert!(!a.same_alloc(&b));
    }
}
