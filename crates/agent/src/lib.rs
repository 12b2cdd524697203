//! Turn orchestration for ReviewDesk.
//!
//! One review turn runs through:
//!
//! 1. **Policy**: the output mode decides whether `generate_file` is offered
//! 2. **Assembly**: prior messages and the new turn become model contents
//! 3. **Model call**: a single request to the configured provider
//! 4. **Parsing**: text fragments and `generate_file` calls of the first candidate
//! 5. **Encoding**: each call becomes a downloadable attachment
//!
//! Every turn resolves to a reply; provider failures become error text.

pub mod assembler;
pub mod contract;
pub mod orchestrator;
pub mod policy;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use assembler::assemble;
pub use contract::{GENERATE_FILE, GenerateFileArgs, generate_file_definition};
pub use orchestrator::{Orchestrator, TurnReply, TurnRequest, TurnState};
pub use policy::{OutputPolicy, policy_for};
pub use session::ReviewSession;
