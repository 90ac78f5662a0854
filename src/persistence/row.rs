/// A decoded record that carries the integer `Id` used as its unique key.
///
/// Everything else in the row is schema specific and the loader never looks
/// at it.
pub trait KeyedRow {
    fn id(&self) -> i32;
}

/// The top-level message of a data file, i.e. `message <Table> { repeated <Table>Row rows = 1; }`.
pub trait RowCollection {
    type Row;

    /// Give up the rows in the order they were decoded.
    fn into_rows(self) -> Vec<Self::Row>;
}
