//! Dynamic query construction
//!
//! Builds query-by-example filter clauses from the searchable fields of an
//! example record, and flattens records into parameter maps and URL query
//! strings.

mod clause;
mod escape;
mod params;

pub use clause::QueryBuilder;
pub use escape::escape_sql;
pub use params::{build_map_values, build_map_values_for, build_url_parameters, encode_parameters};
