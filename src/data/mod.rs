/// Data layer: core types, loading, classification, and filtering.
///
/// Architecture:
/// ```text
///  bank.csv (;-separated)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Column>, typed cells
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐         ┌──────────┐
///   │ classify  │         │  filter   │
///   │ cat/cont  │         │ predicates│
///   └──────────┘         └──────────┘
/// ```
pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
