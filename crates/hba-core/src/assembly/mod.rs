//! Assembly of rule fragments into the final auth file

mod assembler;
mod fragment;

pub use assembler::{Assembler, AssemblyOptions, DEFAULT_HEADER, DriftStatus, WriteOutcome};
pub use fragment::Fragment;
