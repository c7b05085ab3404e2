//! Single-owner handle for C-allocator memory.
//!
//! Resource tables hand out blocks produced by `malloc`-family calls, so
//! they must be released with `free` rather than through Rust's global
//! allocator. [`CBox`] guarantees exactly one release point for such a
//! block while behaving like an ordinary owning handle.
//!
//! This is the one module in the crate containing `unsafe`; every unsafe
//! operation carries a `// SAFETY:` comment or a `# Safety` contract.

use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// A move-only owner of a heap block obtained from the C allocator.
///
/// Holds either a pointer produced by `malloc`/`calloc`/`realloc` or null
/// ("empty"). The block is passed to `libc::free` exactly once, when the
/// handle is dropped or [`reset`](CBox::reset) over — unless ownership was
/// first relinquished via [`into_raw`](CBox::into_raw).
///
/// `free` does not run destructors: the pointee's `Drop` is never invoked,
/// so `T` should be plain data as produced by C code.
///
/// There is no `Clone`: ownership is exclusive, and transfer is an
/// ordinary Rust move. Equality compares held addresses only; two empty
/// handles compare equal.
pub struct CBox<T> {
    ptr: *mut T,
    // Owns a T by address only; T's destructor is never run.
    _marker: PhantomData<T>,
}

/// Release a block back to the C allocator. Null is a no-op.
///
/// All frees in this module funnel through here so tests can observe them.
///
/// # Safety
///
/// `ptr` must be null or a live C-allocator block not owned elsewhere.
unsafe fn free_raw<T>(ptr: *mut T) {
    if ptr.is_null() {
        return;
    }
    #[cfg(test)]
    free_log::record(ptr as usize);
    // SAFETY: non-null and C-allocated per this function's contract.
    unsafe { libc::free(ptr.cast::<libc::c_void>()) }
}

impl<T> CBox<T> {
    /// Create an empty handle holding no block.
    pub const fn null() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
            _marker: PhantomData,
        }
    }

    /// Take ownership of a caller-supplied pointer.
    ///
    /// Provenance is not validated here.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a block produced by the C allocator that no
    /// other owner will free, valid until this handle releases it.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// The held pointer, without transferring ownership. Never fails;
    /// null when empty.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Whether the handle is empty.
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Relinquish ownership without freeing.
    ///
    /// The caller becomes responsible for releasing the returned pointer
    /// with `free`.
    #[must_use = "the returned pointer must be freed or re-owned"]
    pub fn into_raw(self) -> *mut T {
        let ptr = self.ptr;
        mem::forget(self);
        ptr
    }

    /// Replace the held pointer, freeing the old block.
    ///
    /// Resetting to the pointer already held is a no-op, so re-assigning
    /// the same address never frees the block out from under the handle.
    /// Resetting to null just frees.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](CBox::from_raw).
    pub unsafe fn reset(&mut self, ptr: *mut T) {
        if ptr == self.ptr {
            return;
        }
        let old = mem::replace(&mut self.ptr, ptr);
        // SAFETY: `old` was owned solely by this handle.
        unsafe { free_raw(old) }
    }

    /// Exchange held pointers with another handle.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
    }

    /// Borrow the pointee; `None` when empty.
    ///
    /// # Safety
    ///
    /// A non-null held pointer must reference a live, initialized `T`
    /// with no concurrent mutation for the borrow's duration.
    pub unsafe fn as_ref(&self) -> Option<&T> {
        // SAFETY: alignment and validity per this function's contract.
        unsafe { self.ptr.as_ref() }
    }

    /// Mutably borrow the pointee; `None` when empty.
    ///
    /// # Safety
    ///
    /// Same contract as [`as_ref`](CBox::as_ref), plus exclusivity of
    /// the mutable borrow.
    pub unsafe fn as_mut(&mut self) -> Option<&mut T> {
        // SAFETY: alignment and validity per this function's contract.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T> Drop for CBox<T> {
    fn drop(&mut self) {
        // SAFETY: the held block is owned solely by this handle; dropping
        // an empty handle free()s nothing.
        unsafe { free_raw(self.ptr) }
    }
}

impl<T> Default for CBox<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for CBox<T> {
    /// Address equality; ownership status is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ptr, other.ptr)
    }
}

impl<T> Eq for CBox<T> {}

impl<T> fmt::Debug for CBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CBox").field(&self.ptr).finish()
    }
}

// SAFETY: the handle is the sole owner of its block, so sending it moves
// unique access to the pointee; sharing it shares only &T access.
unsafe impl<T: Send> Send for CBox<T> {}
// SAFETY: &CBox exposes the pointee by &T at most.
unsafe impl<T: Sync> Sync for CBox<T> {}


#[cfg(test)]
mod tests {
    use super::*;

    /// malloc a u32 and initialize it. The test owns the block until it
    /// hands it to a `CBox`.
    fn alloc_u32(value: u32) -> *mut u32 {
        let ptr = unsafe { libc::malloc(mem::size_of::<u32>()) }.cast::<u32>();
        assert!(!ptr.is_null());
        unsafe { ptr.write(value) };
        ptr
    }

    #[test]
    fn wraps_and_frees_exactly_once() {
        let raw = alloc_u32(7);
        let addr = raw as usize;
        {
            let b = unsafe { CBox::from_raw(raw) };
            assert_eq!(b.as_ptr(), raw);
            assert!(!b.is_null());
            assert_eq!(free_log::frees_of(addr), 0);
        }
        assert_eq!(free_log::frees_of(addr), 1);
    }

    #[test]
    fn into_raw_relinquishes_without_freeing() {
        let raw = alloc_u32(7);
        let addr = raw as usize;
        let b = unsafe { CBox::from_raw(raw) };
        let out = b.into_raw();
        assert_eq!(out, raw);
        assert_eq!(free_log::frees_of(addr), 0);
        // The test is the owner again.
        unsafe { free_raw(out) };
        assert_eq!(free_log::frees_of(addr), 1);
    }

    #[test]
    fn dropping_empty_is_a_no_op() {
        let b: CBox<u32> = CBox::null();
        assert!(b.is_null());
        assert!(b.as_ptr().is_null());
        drop(b);
    }

    #[test]
    fn move_transfers_ownership_and_empties_source() {
        let raw = alloc_u32(7);
        let addr = raw as usize;
        let mut src = unsafe { CBox::from_raw(raw) };
        let dst = mem::take(&mut src);
        assert!(src.is_null());
        assert_eq!(dst.as_ptr(), raw);
        drop(src);
        assert_eq!(free_log::frees_of(addr), 0);
        drop(dst);
        assert_eq!(free_log::frees_of(addr), 1);
    }

    #[test]
    fn reset_to_held_pointer_is_a_no_op() {
        let raw = alloc_u32(7);
        let addr = raw as usize;
        let mut b = unsafe { CBox::from_raw(raw) };
        unsafe { b.reset(b.as_ptr()) };
        assert_eq!(b.as_ptr(), raw);
        assert_eq!(free_log::frees_of(addr), 0);
        drop(b);
        assert_eq!(free_log::frees_of(addr), 1);
    }

    #[test]
    fn reset_frees_old_and_owns_new() {
        let first = alloc_u32(1);
        let second = alloc_u32(2);
        let mut b = unsafe { CBox::from_raw(first) };
        unsafe { b.reset(second) };
        assert_eq!(free_log::frees_of(first as usize), 1);
        assert_eq!(free_log::frees_of(second as usize), 0);
        assert_eq!(b.as_ptr(), second);
        drop(b);
        assert_eq!(free_log::frees_of(second as usize), 1);
    }

    #[test]
    fn reset_to_null_just_frees() {
        let raw = alloc_u32(7);
        let mut b = unsafe { CBox::from_raw(raw) };
        unsafe { b.reset(std::ptr::null_mut()) };
        assert!(b.is_null());
        assert_eq!(free_log::frees_of(raw as usize), 1);
        drop(b);
        assert_eq!(free_log::frees_of(raw as usize), 1);
    }

    #[test]
    fn access_reads_and_writes_the_block() {
        let mut b = unsafe { CBox::from_raw(alloc_u32(7)) };
        assert_eq!(unsafe { b.as_ref() }, Some(&7));
        *unsafe { b.as_mut() }.unwrap() = 9;
        assert_eq!(unsafe { b.as_ref() }, Some(&9));

        let empty: CBox<u32> = CBox::null();
        assert_eq!(unsafe { empty.as_ref() }, None);
    }

    #[test]
    fn equality_is_by_address() {
        let a: CBox<u32> = CBox::null();
        let b: CBox<u32> = CBox::null();
        assert_eq!(a, b);
        assert_eq!(a, CBox::null());

        let owned = unsafe { CBox::from_raw(alloc_u32(7)) };
        assert_ne!(owned, a);
        assert_eq!(owned, owned);
    }

    #[test]
    fn swap_exchanges_pointers() {
        let first = alloc_u32(1);
        let second = alloc_u32(2);
        let mut a = unsafe { CBox::from_raw(first) };
        let mut b = unsafe { CBox::from_raw(second) };
        a.swap(&mut b);
        assert_eq!(a.as_ptr(), second);
        assert_eq!(b.as_ptr(), first);
        assert_eq!(free_log::frees_of(first as usize), 0);
        assert_eq!(free_log::frees_of(second as usize), 0);
    }
}
