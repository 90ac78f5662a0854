//! Persistence of config tables needs to have the following components
//! - Row (decoded record keyed by an integer id, opaque otherwise)
//! - Decoder (turns the bytes of a data file into rows, one per schema)
//! - Index (id to row position, built once per load)
//! - Table (ordered rows plus index, swapped as a whole on every load)
//! - Registry (every table of the application, loadable in one go)
//!

//  All modules of this lib
mod decoder;
mod error;
mod index;
mod registry;
mod row;
mod table;

//  External API
pub use decoder::{ProtobufDecoder, RowDecoder};
pub use error::{DecodeError, LoadError, RegistryError, SettingsError};
pub use index::DuplicatePolicy;
pub use registry::{ConfigRegistry, ConfigTable};
pub use row::{KeyedRow, RowCollection};
pub use table::{LoadTask, TableConfig, TableReader};
