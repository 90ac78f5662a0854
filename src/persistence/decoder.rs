//! The decoding seam of a table.
//!
//! A [`super::TableConfig`] never knows the wire format of its rows, it only
//! calls a [`RowDecoder`] on the raw bytes of the data file. Every schema gets
//! its own decoder; for the protobuf files written by the table generator,
//! [`ProtobufDecoder`] covers all of them.

use std::marker::PhantomData;

use prost::Message;

use super::{error::DecodeError, row::RowCollection};

pub trait RowDecoder<R>: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<R>, DecodeError>;
}

impl<R, F> RowDecoder<R> for F
where
    F: Fn(&[u8]) -> Result<Vec<R>, DecodeError> + Send + Sync,
{
    fn decode(&self, bytes: &[u8]) -> Result<Vec<R>, DecodeError> {
        self(bytes)
    }
}

/// Decodes a protobuf row collection `C` and flattens it to its rows.
pub struct ProtobufDecoder<C> {
    _collection: PhantomData<fn() -> C>,
}

impl<C> ProtobufDecoder<C> {
    pub fn new() -> ProtobufDecoder<C> {
        ProtobufDecoder {
            _collection: PhantomData,
        }
    }
}

impl<C> Default for ProtobufDecoder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RowDecoder<C::Row> for ProtobufDecoder<C>
where
    C: Message + Default + RowCollection,
{
    fn decode(&self, bytes: &[u8]) -> Result<Vec<C::Row>, DecodeError> {
        let collection = C::decode(bytes)?;
        Ok(collection.into_rows())
    }
}
