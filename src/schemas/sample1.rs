//! The `Sample1` table, one column of every type the table generator knows.
//!
//! `time` columns are written as strings of the form `YYYY-MM-DD HH:MM:SS`.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyedRow, ProtobufDecoder, RowCollection, TableConfig};

pub const TABLE_NAME: &str = "Sample1";

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Sample1Row {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub level: i64,
    #[prost(float, tag = "4")]
    pub weight: f32,
    #[prost(bool, tag = "5")]
    pub enabled: bool,
    #[prost(string, tag = "6")]
    pub start_time: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct Sample1 {
    #[prost(message, repeated, tag = "1")]
    pub rows: Vec<Sample1Row>,
}

pub type Sample1Config = TableConfig<Sample1Row>;

impl KeyedRow for Sample1Row {
    fn id(&self) -> i32 {
        self.id
    }
}

impl RowCollection for Sample1 {
    type Row = Sample1Row;

    fn into_rows(self) -> Vec<Sample1Row> {
        self.rows
    }
}

pub fn sample1_config() -> Sample1Config {
    TableConfig::new(TABLE_NAME, ProtobufDecoder::<Sample1>::new())
}
