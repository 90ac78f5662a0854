//! The `Sample` table.
//!
//! ```text
//! message SampleRow { int32 Id = 1; string Name = 2; }
//! message Sample    { repeated SampleRow rows = 1; }
//! ```

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyedRow, ProtobufDecoder, RowCollection, TableConfig};

pub const TABLE_NAME: &str = "Sample";

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct SampleRow {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Sample {
    #[prost(message, repeated, tag = "1")]
    pub rows: Vec<SampleRow>,
}

pub type SampleConfig = TableConfig<SampleRow>;

impl KeyedRow for SampleRow {
    fn id(&self) -> i32 {
        self.id
    }
}

impl RowCollection for Sample {
    type Row = SampleRow;

    fn into_rows(self) -> Vec<SampleRow> {
        self.rows
    }
}

pub fn sample_config() -> SampleConfig {
    TableConfig::new(TABLE_NAME, ProtobufDecoder::<Sample>::new())
}
