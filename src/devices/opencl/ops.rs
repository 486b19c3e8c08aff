use min_cl::api::{enqueue_read_buffer, enqueue_write_buffer, wait_for_event};

use crate::{
    flag::AccessMode, launch::WorkSize, AddBuf, Buffer, DeviceError, KernelAdd, OpenCL, Read,
    Result, VecAdd, WriteBuf,
};

/// The bounds-guarded kernel launched by [`KernelAdd`].
pub const ADD_VEC_KERNEL: &str = "
    #pragma OPENCL EXTENSION cl_khr_fp64 : enable

    __kernel void add_vec_kernel(
        __global double const* restrict x,
        __global double const* restrict y,
        __global double* restrict z,
        ulong const n)
    {
        size_t const gid = get_global_id(0);

        if (gid < n) {
            z[gid] = x[gid] + y[gid];
        }
    }
";

/// Generated for `&x + &y`. Launched with exactly one work-item per element.
const ADD_BUF_KERNEL: &str = "
    #pragma OPENCL EXTENSION cl_khr_fp64 : enable

    __kernel void add(__global const double* lhs, __global const double* rhs, __global double* out) {
        size_t id = get_global_id(0);
        out[id] = lhs[id] + rhs[id];
    }
";

impl<T> WriteBuf<T> for OpenCL {
    fn write(&self, buf: &mut Buffer<T, OpenCL>, data: &[T]) -> Result<()> {
        if buf.len() != data.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        let event = unsafe { enqueue_write_buffer(&self.queue(), buf.data.ptr, data, true)? };
        wait_for_event(event)?;
        Ok(())
    }
}

impl<T: Clone + Default> Read<T> for OpenCL {
    fn read_to_vec(&self, buf: &Buffer<T, OpenCL>) -> Result<Vec<T>> {
        let mut read = vec![T::default(); buf.len()];
        let event = unsafe { enqueue_read_buffer(&self.queue(), buf.data.ptr, &mut read, false)? };
        wait_for_event(event)?;
        Ok(read)
    }
}

impl AddBuf<f64> for OpenCL {
    fn add<'a>(
        &'a self,
        lhs: &Buffer<f64, OpenCL>,
        rhs: &Buffer<f64, OpenCL>,
    ) -> Result<Buffer<'a, f64, OpenCL>> {
        if lhs.len() != rhs.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        let work = WorkSize::new(lhs.len(), None)?;
        let out = Buffer::with_mode(self, lhs.len(), AccessMode::WriteOnly)?;

        self.launch_kernel(ADD_BUF_KERNEL, work.gws(), work.lws(), &[lhs, rhs, &out])?;
        Ok(out)
    }
}

impl VecAdd<OpenCL> for KernelAdd {
    fn add<'a>(
        &self,
        x: &Buffer<'a, f64, OpenCL>,
        y: &Buffer<'a, f64, OpenCL>,
    ) -> Result<Buffer<'a, f64, OpenCL>> {
        let device = x.device()?;
        if x.len() != y.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        let work = WorkSize::new(x.len(), self.local_size)?;
        let z = Buffer::with_mode(device, x.len(), AccessMode::WriteOnly)?;
        let n = x.len() as u64;

        device.launch_kernel(ADD_VEC_KERNEL, work.gws(), work.lws(), &[x, y, &z, &n])?;
        Ok(z)
    }
}

#[cfg(test)]
mod tests {
    use crate::{host, Buffer, KernelAdd, OpenCL, VecAdd};

    #[test]
    fn test_cl_add_operator() -> crate::Result<()> {
        let device = OpenCL::new(0)?;

        let lhs = Buffer::from_slice(&device, &[1., 5.5, 3., -2.])?;
        let rhs = Buffer::from_slice(&device, &[2., 0.5, -3., 4.])?;

        let out = (&lhs + &rhs)?;
        assert_eq!(out.read_to_vec()?, vec![3., 6., 0., 2.]);
        Ok(())
    }

    #[test]
    fn test_cl_kernel_add_uneven_len() -> crate::Result<()> {
        let device = OpenCL::new(0)?;

        let x = host::random_vector_seeded(1000, 3);
        let y = host::random_vector_seeded(1000, 4);
        let x_buf = Buffer::from_slice(&device, &x)?;
        let y_buf = Buffer::from_slice(&device, &y)?;

        let z = KernelAdd::new(Some(256)).add(&x_buf, &y_buf)?;
        assert_eq!(z.read_to_vec()?, host::add(&x, &y));
        Ok(())
    }

    #[test]
    fn test_cl_write() -> crate::Result<()> {
        let device = OpenCL::new(0)?;
        let mut buf = Buffer::<f64, _>::new(&device, 3)?;
        buf.write(&[0.5, 1.5, 2.5])?;
        assert_eq!(buf.read_to_vec()?, vec![0.5, 1.5, 2.5]);
        Ok(())
    }
}
