use core::{
    ops::{Deref, DerefMut},
    ptr::null_mut,
};

use crate::{flag::AccessMode, PtrType};

/// The pointer used for `CPU` [`Buffer`](crate::Buffer)s
#[derive(Debug)]
pub struct CPUPtr<T> {
    /// The pointer to the data
    pub ptr: *mut T,
    /// The length of the data
    pub len: usize,
    /// Access mode the memory was allocated with. Host memory ignores it.
    pub mode: AccessMode,
}

unsafe impl<T: Send> Send for CPUPtr<T> {}
unsafe impl<T: Sync> Sync for CPUPtr<T> {}

impl<T: PartialEq> PartialEq for CPUPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> CPUPtr<T> {
    /// Create a new `CPUPtr` with the given length. Every element is set to `T::default()`.
    /// # Example
    /// ```
    /// use vecadd::{cpu::CPUPtr, flag::AccessMode};
    ///
    /// let ptr = CPUPtr::<f64>::new(10, AccessMode::ReadWrite);
    /// assert_eq!(ptr.len, 10);
    /// assert_eq!(ptr.as_slice(), &[0.; 10]);
    /// ```
    pub fn new(len: usize, mode: AccessMode) -> CPUPtr<T>
    where
        T: Default + Clone,
    {
        CPUPtr::from_vec(vec![T::default(); len], mode)
    }

    /// Takes ownership of the allocation of `vec`.
    pub fn from_vec(vec: Vec<T>, mode: AccessMode) -> CPUPtr<T> {
        // handed back to `Box::from_raw` on drop
        let boxed = vec.into_boxed_slice();
        let len = boxed.len();

        if len == 0 {
            return CPUPtr {
                ptr: null_mut(),
                len,
                mode,
            };
        }

        CPUPtr {
            ptr: Box::into_raw(boxed).cast(),
            len,
            mode,
        }
    }

    /// Extracts a slice containing the entire `CPUPtr`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire `CPUPtr`.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Deref for CPUPtr<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        if self.ptr.is_null() {
            return &[];
        }
        unsafe { core::slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl<T> DerefMut for CPUPtr<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        if self.ptr.is_null() {
            return &mut [];
        }
        unsafe { core::slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl<T> Drop for CPUPtr<T> {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }

        // the pointer was created by `Box::into_raw` in `from_vec`
        unsafe {
            drop(Box::from_raw(core::ptr::slice_from_raw_parts_mut(
                self.ptr, self.len,
            )));
        }
    }
}

impl<T> PtrType for CPUPtr<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len
    }

    #[inline]
    fn mode(&self) -> AccessMode {
        self.mode
    }
}
