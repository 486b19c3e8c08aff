/// How kernels may access a device allocation.
///
/// Inputs of an operation are allocated [`AccessMode::ReadOnly`], outputs [`AccessMode::WriteOnly`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    #[default]
    ReadWrite,
}
