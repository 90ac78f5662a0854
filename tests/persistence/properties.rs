use std::collections::HashMap;

use ferrum_config::schemas::{SampleRow, sample_config};
use proptest::prelude::*;
use tempfile::TempDir;

use crate::_write_sample;

fn _rows() -> impl Strategy<Value = Vec<(i32, String)>> {
    // a small id range so duplicates show up often
    prop::collection::vec((-20i32..20, "[a-z]{0,6}"), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn loaded_table_matches_encoded_rows(rows in _rows()) {
        let dir = TempDir::new().unwrap();
        let pairs: Vec<(i32, &str)> = rows.iter().map(|(id, name)| (*id, name.as_str())).collect();
        let path = _write_sample(dir.path(), "Sample.dat", &pairs);

        let table = sample_config();
        prop_assert_eq!(table.load(&path).unwrap(), rows.len());

        let loaded: Vec<(i32, String)> = table
            .get_all()
            .iter()
            .map(|row| (row.id, row.name.clone()))
            .collect();
        prop_assert_eq!(&loaded, &rows);

        let mut last_seen: HashMap<i32, &str> = HashMap::new();
        for (id, name) in rows.iter() {
            last_seen.insert(*id, name.as_str());
        }

        for (id, name) in last_seen.iter() {
            let row: Option<SampleRow> = table.get_by_id(*id);
            prop_assert_eq!(row.map(|r| r.name), Some(name.to_string()));
        }

        prop_assert_eq!(table.get_all().key_count(), last_seen.len());
        prop_assert!(table.get_by_id(1000).is_none());
    }
}
