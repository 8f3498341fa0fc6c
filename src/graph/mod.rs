//! The read-only adjacency relation enumeration runs against.

pub mod adjacency;

pub use adjacency::Adjacency;
