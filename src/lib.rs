//! Read-only config tables.
//!
//! Every table is a protobuf encoded collection of rows stored in its own data
//! file. Loading a table decodes the whole file, keeps the rows in file order
//! and indexes them by their integer id:
//!
//! ```no_run
//! use ferrum_config::schemas::sample_config;
//!
//! let sample = sample_config();
//! sample.load("Output/dat/Sample.dat")?;
//!
//! if let Some(row) = sample.get_by_id(1) {
//!     println!("{}", row.name);
//! }
//! for row in &sample.get_all() {
//!     println!("{} {}", row.id, row.name);
//! }
//! # Ok::<(), ferrum_config::persistence::LoadError>(())
//! ```

pub mod cli;
pub mod persistence;
pub mod schemas;
pub mod settings;
