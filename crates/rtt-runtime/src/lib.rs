#![doc = "Measurement engine for the IPC round-trip benchmark."]

pub mod clock;
pub mod cycles;
pub mod harness;
pub mod initiator;
pub mod placement;
pub mod responder;

pub use clock::*;
pub use cycles::*;
pub use harness::*;
pub use initiator::*;
pub use placement::*;
pub use responder::*;
