use core::{ffi::c_void, ptr::null_mut};

use min_cl::api::release_mem_object;
use tracing::warn;

use crate::{flag::AccessMode, PtrType};

/// The pointer used for `OpenCL` [`Buffer`](crate::Buffer)s
#[derive(Debug, PartialEq, Eq)]
pub struct CLPtr<T> {
    /// The pointer to the OpenCL memory object
    pub ptr: *mut c_void,
    /// The number of elements allocated
    pub len: usize,
    /// The access flags the memory object was created with
    pub mode: AccessMode,
    pub(crate) _marker: core::marker::PhantomData<T>,
}

unsafe impl<T: Sync> Sync for CLPtr<T> {}
unsafe impl<T: Send> Send for CLPtr<T> {}

impl<T> CLPtr<T> {
    /// # Safety
    /// `ptr` must be a valid memory object holding `len` elements of `T`, or null.
    /// The `CLPtr` takes ownership and releases it on drop.
    #[inline]
    pub unsafe fn from_raw(ptr: *mut c_void, len: usize, mode: AccessMode) -> CLPtr<T> {
        CLPtr {
            ptr,
            len,
            mode,
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T> Default for CLPtr<T> {
    #[inline]
    fn default() -> Self {
        unsafe { CLPtr::from_raw(null_mut(), 0, AccessMode::default()) }
    }
}

impl<T> PtrType for CLPtr<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len
    }

    #[inline]
    fn mode(&self) -> AccessMode {
        self.mode
    }
}

impl<T> Drop for CLPtr<T> {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }

        if let Err(err) = unsafe { release_mem_object(self.ptr) } {
            warn!(?err, len = self.len, "could not release OpenCL memory object");
        }
    }
}
