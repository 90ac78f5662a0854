use std::{collections::BTreeMap, sync::Arc};

use ferrum_config::persistence::{
    ConfigRegistry, ConfigTable, DecodeError, DuplicatePolicy, LoadError, RegistryError,
    TableConfig,
};
use ferrum_config::schemas::{Sample1, Sample1Row, Tables, sample_config};
use ferrum_config::settings::LoaderSettings;
use prost::Message;
use serde::Serialize;
use tempfile::TempDir;

use crate::{_fragile_sample_config, _row, _write_bytes, _write_sample};

/// A row that has no JSON form: its map keys are not strings.
#[derive(Clone, Serialize)]
struct GridRow {
    id: i32,
    cells: BTreeMap<(i32, i32), i32>,
}

fn _prepare_registry(dir: &TempDir) -> (Tables, ConfigRegistry) {
    let settings = LoaderSettings::default().with_data_dir(dir.path());
    let tables = Tables::new(&settings);
    let registry = tables.registry(settings).unwrap();
    (tables, registry)
}

fn _write_sample1(dir: &TempDir, ids: &[i32]) {
    let sample1 = Sample1 {
        rows: ids
            .iter()
            .map(|id| Sample1Row {
                id: *id,
                name: format!("item-{}", id),
                ..Default::default()
            })
            .collect(),
    };
    _write_bytes(dir.path(), "Sample1.dat", &sample1.encode_to_vec());
}

#[test]
fn registry_keeps_registration_order() {
    let dir = TempDir::new().unwrap();
    let (_tables, registry) = _prepare_registry(&dir);

    assert_eq!(registry.names(), vec!["Sample", "Sample1"]);
    assert!(registry.contains("Sample1"));
    assert!(!registry.contains("Missing"));
}

#[test]
fn registry_rejects_duplicate_names() {
    let dir = TempDir::new().unwrap();
    let (_tables, mut registry) = _prepare_registry(&dir);

    let result = registry.register(Arc::new(sample_config()));
    assert!(matches!(result, Err(RegistryError::AlreadyRegistered(name)) if name == "Sample"));
}

#[test]
fn registry_unregister_removes_table() {
    let dir = TempDir::new().unwrap();
    let (_tables, mut registry) = _prepare_registry(&dir);

    let removed = registry.unregister("Sample");
    assert_eq!(removed.map(|t| t.name().to_string()), Some("Sample".to_string()));
    assert_eq!(registry.names(), vec!["Sample1"]);
    assert!(registry.get("Sample").is_none());
}

#[test]
fn registry_path_for_uses_settings() {
    let dir = TempDir::new().unwrap();
    let mut settings = LoaderSettings::default().with_data_dir(dir.path());
    settings.extension = "bytes".to_string();
    let registry = ConfigRegistry::new(settings);

    assert_eq!(
        registry.path_for("Sample"),
        dir.path().join("Sample.bytes")
    );
}

#[test]
fn registry_load_all_fills_typed_handles() {
    let dir = TempDir::new().unwrap();
    _write_sample(dir.path(), "Sample.dat", &[(1, "a"), (2, "b")]);
    _write_sample1(&dir, &[10, 20, 30]);

    let (tables, registry) = _prepare_registry(&dir);
    let report = registry.load_all();

    assert_eq!(report.len(), 2);
    assert_eq!(*report["Sample"].as_ref().unwrap(), 2);
    assert_eq!(*report["Sample1"].as_ref().unwrap(), 3);

    assert_eq!(tables.sample.get_by_id(2), Some(_row(2, "b")));
    assert_eq!(tables.sample1.get_by_id(30).unwrap().name, "item-30");
}

#[test]
fn registry_load_all_reports_each_failure() {
    let dir = TempDir::new().unwrap();
    _write_sample(dir.path(), "Sample.dat", &[(1, "a")]);

    let (tables, registry) = _prepare_registry(&dir);
    let report = registry.load_all();

    assert!(report["Sample"].is_ok());
    assert!(matches!(
        report["Sample1"],
        Err(LoadError::ResourceNotFound { .. })
    ));
    assert_eq!(report.keys().collect::<Vec<_>>(), vec!["Sample", "Sample1"]);

    assert_eq!(tables.sample.len(), 1);
    assert!(tables.sample1.is_empty());
}

#[test]
fn registry_strict_settings_reach_the_tables() {
    let dir = TempDir::new().unwrap();
    _write_sample(dir.path(), "Sample.dat", &[(1, "a"), (1, "b")]);

    let mut settings = LoaderSettings::default().with_data_dir(dir.path());
    settings.duplicate_policy = DuplicatePolicy::Reject;
    let tables = Tables::new(&settings);
    let registry = tables.registry(settings).unwrap();

    assert!(matches!(
        registry.load("Sample"),
        Err(RegistryError::Load(LoadError::DuplicateId { id: 1, .. }))
    ));
}

#[test]
fn registry_load_unknown_table() {
    let dir = TempDir::new().unwrap();
    let (_tables, registry) = _prepare_registry(&dir);

    assert!(matches!(
        registry.load("Nope"),
        Err(RegistryError::UnknownTable(name)) if name == "Nope"
    ));
}

#[test]
fn registry_rows_as_json() {
    let dir = TempDir::new().unwrap();
    _write_sample(dir.path(), "Sample.dat", &[(1, "a"), (2, "b")]);

    let (_tables, registry) = _prepare_registry(&dir);
    assert_eq!(registry.load("Sample").unwrap(), 2);

    let table = registry.get("Sample").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.row_json(2).unwrap(),
        Some(serde_json::json!({"id": 2, "name": "b"}))
    );
    assert_eq!(table.row_json(3).unwrap(), None);
    assert_eq!(table.rows_json().unwrap()[0]["name"], "a");
}

#[test]
fn table_loads_from_registry_in_background() {
    let dir = TempDir::new().unwrap();
    _write_sample1(&dir, &[5]);

    let (tables, registry) = _prepare_registry(&dir);
    let task = tables.sample1.load_from_registry(&registry);

    assert_eq!(task.wait().unwrap(), 1);
    assert_eq!(tables.sample1.get_by_id(5).unwrap().name, "item-5");
}

#[test]
fn registry_load_all_reports_panicking_table_as_interrupted() {
    let dir = TempDir::new().unwrap();
    _write_sample(dir.path(), "Sample.dat", &[(1, "a")]);
    _write_sample(dir.path(), "Fragile.dat", &[(7, "kept")]);

    let settings = LoaderSettings::default().with_data_dir(dir.path());
    let fragile = Arc::new(_fragile_sample_config("Fragile"));
    let mut registry = ConfigRegistry::new(settings);
    registry.register(Arc::new(sample_config())).unwrap();
    registry.register(fragile.clone()).unwrap();

    assert!(registry.load_all().values().all(|result| result.is_ok()));

    _write_bytes(dir.path(), "Fragile.dat", &[0xff]);
    let report = registry.load_all();

    assert_eq!(*report["Sample"].as_ref().unwrap(), 1);
    assert!(matches!(
        &report["Fragile"],
        Err(LoadError::Interrupted(name)) if name == "Fragile"
    ));
    assert_eq!(fragile.get_all().scan(), vec![_row(7, "kept")]);
}

#[test]
fn registry_rows_without_json_form_are_errors() {
    let dir = TempDir::new().unwrap();
    let path = _write_bytes(dir.path(), "Grid.dat", &[]);

    let grid: TableConfig<GridRow> = TableConfig::with_key(
        "Grid",
        |_bytes: &[u8]| -> Result<Vec<GridRow>, DecodeError> {
            Ok(vec![GridRow {
                id: 1,
                cells: BTreeMap::from([((0, 0), 5)]),
            }])
        },
        |row: &GridRow| row.id,
    );
    let table: Arc<dyn ConfigTable> = Arc::new(grid);

    assert_eq!(table.load(&path).unwrap(), 1);
    assert!(table.rows_json().is_err());
    assert!(table.row_json(1).is_err());
    assert_eq!(table.row_json(2).unwrap(), None);
}
