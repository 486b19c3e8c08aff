use core::ops::Add;

use crate::{
    flag::AccessMode, launch::WorkSize, AddBuf, Buffer, DeviceError, KernelAdd, Read, Result,
    VecAdd, WriteBuf, CPU,
};

impl<T: Clone> Read<T> for CPU {
    #[inline]
    fn read_to_vec(&self, buf: &Buffer<T, CPU>) -> Result<Vec<T>> {
        Ok(buf.as_slice().to_vec())
    }
}

impl<T: Clone> WriteBuf<T> for CPU {
    #[inline]
    fn write(&self, buf: &mut Buffer<T, CPU>, data: &[T]) -> Result<()> {
        if buf.len() != data.len() {
            return Err(DeviceError::LengthMismatch.into());
        }
        buf.clone_from_slice(data);
        Ok(())
    }
}

impl<T> AddBuf<T> for CPU
where
    T: Add<Output = T> + Copy + Default,
{
    fn add<'a>(
        &'a self,
        lhs: &Buffer<T, CPU>,
        rhs: &Buffer<T, CPU>,
    ) -> Result<Buffer<'a, T, CPU>> {
        if lhs.len() != rhs.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        let mut out = Buffer::with_mode(self, lhs.len(), AccessMode::WriteOnly)?;

        for ((lhs, rhs), out) in lhs.iter().zip(rhs.iter()).zip(out.iter_mut()) {
            *out = *lhs + *rhs;
        }

        Ok(out)
    }
}

impl VecAdd<CPU> for KernelAdd {
    fn add<'a>(
        &self,
        x: &Buffer<'a, f64, CPU>,
        y: &Buffer<'a, f64, CPU>,
    ) -> Result<Buffer<'a, f64, CPU>> {
        let device = x.device()?;
        if x.len() != y.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        let n = x.len();
        let work = WorkSize::new(n, self.local_size)?;
        let mut z = Buffer::with_mode(device, n, AccessMode::WriteOnly)?;

        let (x, y, out) = (x.as_slice(), y.as_slice(), z.as_mut_slice());
        device.launch_kernel(work, |gid| {
            if gid < n {
                out[gid] = x[gid] + y[gid];
            }
        });

        Ok(z)
    }
}
