mod memory_collection;

pub use memory_collection::MemoryCollection;
