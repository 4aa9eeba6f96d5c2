//! URL path to route resolution.

pub mod matcher;
pub mod table;

pub use matcher::{normalize_path, MatchKind, PathMatch, PathPattern};
pub use table::{Route, RouteMatch, RouteTable};
