//! Status codes for the marching driver

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    NeedLargerNmax,
}
