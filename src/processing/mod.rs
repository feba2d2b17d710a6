//! Summarization pipeline.
//!
//! Stages run strictly in this order:
//! - [`parser`] - classify tokens as address, CIDR range or invalid
//! - [`expander`] - expand tokens into the working set
//! - [`aggregator`] - mask sweep discovering full blocks
//! - [`assembler`] - standalone addresses plus blocks, sorted

pub mod aggregator;
pub mod assembler;
pub mod expander;
pub mod parser;
mod summarizer;

// Re-export public functions
pub use aggregator::{discover_blocks, DiscoveredBlocks};
pub use assembler::assemble;
pub use expander::build_working_set;
pub use parser::{classify, is_valid_cidr_range, is_valid_ip, Token};
pub use summarizer::Summarizer;
