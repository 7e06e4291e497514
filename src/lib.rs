//! Analysis of automotive ECU ROM images.
//!
//! Given a 32KB or 64KB ROM dump this crate reports how much of each tune
//! region is used, where contiguous table data lies, and what values sit at
//! the addresses named by a definition catalog.
//!
//! ```ignore
//! use ecuscope::{analyze, AnalysisConfig, DefinitionSchema, RomImage};
//!
//! let image = RomImage::from_bytes(std::fs::read("203.bin")?)?;
//! let schema = DefinitionSchema::from_json_str(&std::fs::read_to_string("203.json")?)?;
//! let report = analyze(&image, &schema, &AnalysisConfig::default());
//! for tune in &report.tunes {
//!     println!("tune {}: {} bytes used", tune.number, tune.usage.used_bytes);
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod core;
pub mod definitions;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;

pub use analysis::{analyze_space, find_tables, SpaceUsage, TableCandidate};
pub use config::AnalysisConfig;
pub use core::{Region, RomImage, RomSize};
pub use definitions::{
    interpret, resolve, DefinitionSchema, Interpretation, InterpretedValue, ResolvedDefinition,
};
pub use error::{EcuError, Result};
pub use report::{analyze, render_text, RenderOptions, RomReport};
