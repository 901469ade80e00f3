// Adapters layer: concrete implementations for external systems.

pub mod postgrest;

pub use postgrest::PostgrestBackend;
