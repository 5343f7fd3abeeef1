//!
//! Context store: owner of all native digest context memory.
//!
//! Contexts are raw, zero-initialized blocks allocated outside any Rust
//! object and addressed through a [`ContextHandle`]. The store keeps an
//! index from [`ContextId`] to the backing allocation so every block can be
//! freed exactly once, either by an explicit release or by the reclaimer.
//!
//! The index mutex is held only while inserting or removing an entry.
//! Digest computation on a handle never touches it.
//!

use core::ffi::c_void;
use core::fmt;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicU64, Ordering};
use std::alloc::{self, Layout};
use std::collections::HashMap;
use std::sync::Arc;

use native_engine::CONTEXT_ALIGN;
use parking_lot::Mutex;
use tracing::{debug, error, warn};
use zeroize::Zeroize;

use crate::config::ReclaimerConfig;
use crate::error::NativeDigestError;
use crate::reclaimer::Reclaimer;

/// Identity of a context block, unique for the lifetime of a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Exclusive ownership of one native context block.
///
/// Handles are neither `Clone` nor `Copy`: returning one to the store moves
/// it, so the same block cannot be handed back twice through safe code.
#[derive(Debug)]
#[must_use = "a context handle leaks its block unless released"]
pub struct ContextHandle {
    id: ContextId,
    ptr: NonNull<u8>,
    size: usize,
}

// The block is owned exclusively by the handle; no other alias exists.
unsafe impl Send for ContextHandle {}

impl ContextHandle {
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr().cast()
    }
}

struct Allocation {
    ptr: NonNull<u8>,
    layout: Layout,
}

unsafe impl Send for Allocation {}

impl Allocation {
    /// Wipes and frees the block.
    ///
    /// # Safety
    ///
    /// No handle to this block may be used afterwards.
    unsafe fn free(self) {
        unsafe {
            core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()).zeroize();
            alloc::dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

/// Source of context ids. Ids are unique across every store in the process,
/// so a handle can only ever name a block of the store that issued it.
static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Index of live allocations, shared with the reclaimer thread.
pub(crate) struct ContextIndex {
    entries: Mutex<HashMap<ContextId, Allocation>>,
}

impl ContextIndex {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn allocate(&self, size: usize) -> Result<ContextHandle, NativeDigestError> {
        let exhausted = NativeDigestError::ResourceExhausted { size };
        let layout = match Layout::from_size_align(size, CONTEXT_ALIGN) {
            Ok(layout) if layout.size() > 0 => layout,
            _ => return Err(exhausted),
        };
        let ptr = NonNull::new(unsafe { alloc::alloc_zeroed(layout) }).ok_or(exhausted)?;
        let id = ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().insert(id, Allocation { ptr, layout });
        debug!(context = %id, size, "allocated native digest context");
        Ok(ContextHandle { id, ptr, size })
    }

    pub(crate) fn release(&self, handle: ContextHandle) -> Result<(), NativeDigestError> {
        let id = handle.id;
        let removed = {
            let mut entries = self.entries.lock();
            match entries.get(&id).map(|allocation| allocation.ptr == handle.ptr) {
                Some(true) => entries.remove(&id),
                Some(false) => {
                    error!(context = %id, "handle does not match the block indexed under its id");
                    return Err(NativeDigestError::ContextMismatch { context: id });
                }
                None => None,
            }
        };
        match removed {
            Some(allocation) => {
                // SAFETY: the entry is gone from the index and `handle` was its
                // only owner, consumed by this call.
                unsafe { allocation.free() };
                debug!(context = %id, "released native digest context");
                Ok(())
            }
            None => {
                // Either released before or issued by another store. Nothing
                // in this index is touched.
                error!(context = %id, "native digest context released twice or by a foreign store");
                if cfg!(debug_assertions) {
                    Err(NativeDigestError::DoubleFreeDetected { context: id })
                } else {
                    Ok(())
                }
            }
        }
    }

    pub(crate) fn live(&self) -> usize {
        self.entries.lock().len()
    }
}

impl Drop for ContextIndex {
    fn drop(&mut self) {
        let entries = std::mem::take(self.entries.get_mut());
        if !entries.is_empty() {
            warn!(count = entries.len(), "freeing contexts whose handles were never returned");
        }
        for (_, allocation) in entries {
            // SAFETY: the index outlives every store and reclaimer reference,
            // so no handle into these blocks can still be in use.
            unsafe { allocation.free() };
        }
    }
}

/// Process-level service that allocates and frees native digest contexts.
///
/// Construct one store and share it through an `Arc`. Every digest keeps a
/// reference, so the store lives at least as long as its contexts.
pub struct ContextStore {
    index: Arc<ContextIndex>,
    reclaimer: Reclaimer,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::with_config(ReclaimerConfig::default())
    }

    pub fn with_config(config: ReclaimerConfig) -> Self {
        let store = Self {
            index: Arc::new(ContextIndex::new()),
            reclaimer: Reclaimer::new(config),
        };
        if store.reclaimer.config().start_eagerly {
            store.reclaimer.start(&store.index);
        }
        store
    }

    /// Reserves a zero-initialized block of exactly `size` bytes.
    pub fn allocate(&self, size: usize) -> Result<ContextHandle, NativeDigestError> {
        self.index.allocate(size)
    }

    /// Frees the block behind `handle` on the calling thread.
    pub fn release(&self, handle: ContextHandle) -> Result<(), NativeDigestError> {
        self.index.release(handle)
    }

    /// Hands `handle` to the background reclaimer for release.
    pub fn reclaim(&self, handle: ContextHandle) {
        self.reclaimer.reclaim(&self.index, handle);
    }

    /// Blocks until every reclaim request queued so far has been processed.
    pub fn flush_reclaimer(&self) {
        self.reclaimer.flush();
    }

    pub fn reclaimer_started(&self) -> bool {
        self.reclaimer.is_started()
    }

    /// Number of blocks currently allocated.
    pub fn live_contexts(&self) -> usize {
        self.index.live()
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextStore")
            .field("live_contexts", &self.live_contexts())
            .field("reclaimer_started", &self.reclaimer_started())
            .finish()
    }
}
