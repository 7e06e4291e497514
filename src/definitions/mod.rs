//! Definition catalogs and their resolution against an image.
//!
//! A catalog ([`schema::DefinitionSchema`]) names ROM fields by address and
//! length. [`resolve`] slices each field's bytes out of the image and
//! [`interpret`] turns those bytes into flags, scaled values or grids.

pub mod interpret;
pub mod resolve;
pub mod schema;

pub use interpret::{interpret, interpret_with, Interpretation, InterpretedValue, SeriesEntry};
pub use resolve::{
    parse_address, resolve, resolve_with_diagnostics, DiagnosticReason, Resolution,
    ResolveDiagnostic, ResolvedDefinition, ROUTE_SEPARATOR,
};
pub use schema::{DefinitionGroup, DefinitionNode, DefinitionSchema, LeafDefinition};
