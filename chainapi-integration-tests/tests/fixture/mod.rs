pub mod chain_fixture;
pub mod in_memory_chain;
