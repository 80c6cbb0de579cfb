//! Cleaning transforms over parsed records.

mod engine;
mod operations;

pub use engine::{CleaningEngine, CleaningResult, RemovalSet};
pub use operations::{
    CleaningOperation, OperationCategory, OperationId, OperationSet, StructuralOp,
};
