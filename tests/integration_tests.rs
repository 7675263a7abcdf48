use chrono::NaiveDate;
use plant_load_import::core::convert::to_celsius;
use plant_load_import::core::ScheduleRegistry;
use plant_load_import::{
    ImportEngine, ImportError, InMemoryRegistry, LocalStorage, PlantLoadPipeline, TomlConfig,
};
use std::fmt::Write as _;
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "timestep,chw_supply_temp_f,chw_flow_fraction,chw_load_w,hw_supply_temp_f,hw_flow_fraction,hw_load_w";

const SCHEDULE_NAMES: [&str; 6] = [
    "ChW Supply Outlet Temp Schedule",
    "HW Supply Outlet Temp Schedule",
    "ChW Load Profile - Flow Fraction Schedule",
    "HW Load Profile - Flow Fraction Schedule",
    "ChW Load Profile - Load Schedule (Watts)",
    "HW Load Profile - Load Schedule (Watts)",
];

/// Row i: chw 44F, hw 140F, chw fraction 0.42, hw fraction 0.5,
/// chw load 1000 + i, hw load i.
fn annual_csv(rows: usize) -> String {
    let mut csv = format!("{}\n", HEADER);
    for i in 0..rows {
        writeln!(csv, "{},44.0,0.42,{}.0,140.0,0.5,{}.0", i, 1000 + i, i).unwrap();
    }
    csv
}

fn write_profile(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

fn config_for(dir: &TempDir, file_name: &str, extra: &str) -> TomlConfig {
    TomlConfig::from_toml_str(&format!(
        r#"
[measure]
file_name = "{}"

[input]
base_dir = "{}"
{}
"#,
        file_name,
        dir.path().display(),
        extra
    ))
    .unwrap()
}

fn engine_for(
    dir: &TempDir,
    config: TomlConfig,
    registry: Arc<InMemoryRegistry>,
) -> ImportEngine<PlantLoadPipeline<LocalStorage, TomlConfig, InMemoryRegistry>> {
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    ImportEngine::new(PlantLoadPipeline::new(storage, config, registry))
}

#[tokio::test]
async fn test_annual_profile_creates_six_named_schedules() {
    let dir = TempDir::new().unwrap();
    write_profile(&dir, "IT.csv", &annual_csv(8760));
    let registry = Arc::new(InMemoryRegistry::new());

    let report = engine_for(&dir, config_for(&dir, "IT.csv", ""), registry.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(report.rows, 8760);
    assert_eq!(report.attempted, SCHEDULE_NAMES.to_vec());
    assert_eq!(report.created, SCHEDULE_NAMES.to_vec());
    assert!(report.skipped.is_empty());
    assert_eq!(report.schedules_before, 0);
    assert_eq!(report.schedules_after, 6);

    let names: Vec<String> = registry.schedules().into_iter().map(|s| s.name).collect();
    assert_eq!(names, SCHEDULE_NAMES.to_vec());
}

#[tokio::test]
async fn test_values_are_converted_and_passed_through() {
    let dir = TempDir::new().unwrap();
    write_profile(&dir, "IT.csv", &annual_csv(8760));
    let registry = Arc::new(InMemoryRegistry::new());

    engine_for(&dir, config_for(&dir, "IT.csv", ""), registry.clone())
        .run()
        .await
        .unwrap();

    let chw_temp = &registry.find_by_name("ChW Supply Outlet Temp Schedule")[0].series;
    assert_eq!(chw_temp.len(), 8760);
    assert_eq!(chw_temp.unit().as_str(), "C");
    assert!((chw_temp.values()[0] - to_celsius(44.0)).abs() < 1e-12);

    let hw_temp = &registry.find_by_name("HW Supply Outlet Temp Schedule")[0].series;
    assert!((hw_temp.values()[100] - 60.0).abs() < 1e-9);

    let chw_fraction = &registry.find_by_name("ChW Load Profile - Flow Fraction Schedule")[0].series;
    assert_eq!(chw_fraction.values()[0], 0.42);
    assert_eq!(chw_fraction.unit().as_str(), "Fraction");

    let hw_load = &registry.find_by_name("HW Load Profile - Load Schedule (Watts)")[0].series;
    assert_eq!(hw_load.unit().as_str(), "W");
    assert_eq!(hw_load.values()[1500], 1500.0);
    assert_eq!(hw_load.values()[8759], 8759.0);
}

#[tokio::test]
async fn test_row_order_defines_hour_of_year() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{}\n0,44.0,0.1,10.0,140.0,0.5,100.0\n1,44.0,0.2,20.0,140.0,0.5,200.0\n",
        HEADER
    );
    let swapped = format!(
        "{}\n1,44.0,0.2,20.0,140.0,0.5,200.0\n0,44.0,0.1,10.0,140.0,0.5,100.0\n",
        HEADER
    );
    write_profile(&dir, "ordered.csv", &csv);
    write_profile(&dir, "swapped.csv", &swapped);

    let ordered = Arc::new(InMemoryRegistry::new());
    engine_for(&dir, config_for(&dir, "ordered.csv", ""), ordered.clone())
        .run()
        .await
        .unwrap();
    let reordered = Arc::new(InMemoryRegistry::new());
    engine_for(&dir, config_for(&dir, "swapped.csv", ""), reordered.clone())
        .run()
        .await
        .unwrap();

    let name = "ChW Load Profile - Load Schedule (Watts)";
    let first = &ordered.find_by_name(name)[0].series;
    let second = &reordered.find_by_name(name)[0].series;
    assert_eq!(first.values(), &[10.0, 20.0]);
    assert_eq!(second.values(), &[20.0, 10.0]);

    let jan1 = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap();
    assert_eq!(first.timestamp_at(0), jan1.and_hms_opt(0, 0, 0));
    assert_eq!(first.timestamp_at(1), jan1.and_hms_opt(1, 0, 0));
}

#[tokio::test]
async fn test_reference_year_moves_the_start_instant() {
    let dir = TempDir::new().unwrap();
    write_profile(&dir, "IT.csv", &annual_csv(24));
    let registry = Arc::new(InMemoryRegistry::new());

    let config = config_for(&dir, "IT.csv", "\n[timeline]\nreference_year = 2017\n");
    engine_for(&dir, config, registry.clone()).run().await.unwrap();

    let expected = NaiveDate::from_ymd_opt(2017, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(registry.schedules().iter().all(|s| s.series.start() == expected));
}

#[tokio::test]
async fn test_empty_file_name_fails() {
    let dir = TempDir::new().unwrap();
    let registry = Arc::new(InMemoryRegistry::new());

    let engine = engine_for(&dir, config_for(&dir, "", ""), registry.clone());

    assert!(matches!(engine.run().await, Err(ImportError::EmptyFileName)));
    assert!(!engine.run_to_success().await);
    assert_eq!(registry.schedule_count(), 0);
}

#[tokio::test]
async fn test_missing_header_fails_before_any_schedule() {
    let dir = TempDir::new().unwrap();
    let csv = "timestep,chw_supply_temp_f,chw_flow_fraction,chw_load_w,hw_supply_temp_f,hw_flow_fraction\n\
               0,44.0,0.42,1000.0,140.0,0.5\n";
    write_profile(&dir, "IT.csv", csv);
    let registry = Arc::new(InMemoryRegistry::new());

    let err = engine_for(&dir, config_for(&dir, "IT.csv", ""), registry.clone())
        .run()
        .await
        .unwrap_err();

    match err {
        ImportError::HeaderMismatch { missing, .. } => assert_eq!(missing, vec!["hw_load_w"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(registry.schedule_count(), 0);
}

#[tokio::test]
async fn test_missing_file_is_csv_read_error() {
    let dir = TempDir::new().unwrap();
    let registry = Arc::new(InMemoryRegistry::new());

    let err = engine_for(&dir, config_for(&dir, "absent.csv", ""), registry)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::CsvRead { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_strict_row_count_rejects_short_file() {
    let dir = TempDir::new().unwrap();
    write_profile(&dir, "IT.csv", &annual_csv(8759));

    let lenient = Arc::new(InMemoryRegistry::new());
    let report = engine_for(&dir, config_for(&dir, "IT.csv", ""), lenient)
        .run()
        .await
        .unwrap();
    assert_eq!(report.rows, 8759);

    let strict = Arc::new(InMemoryRegistry::new());
    let err = engine_for(
        &dir,
        config_for(&dir, "IT.csv", "strict_row_count = true"),
        strict.clone(),
    )
    .run()
    .await
    .unwrap_err();
    assert!(matches!(err, ImportError::RowCount { expected: 8760, actual: 8759 }));
    assert_eq!(strict.schedule_count(), 0);
}

#[tokio::test]
async fn test_bounded_policy_rejects_negative_load() {
    let dir = TempDir::new().unwrap();
    let csv = format!("{}\n0,44.0,0.42,-5.0,140.0,0.5,1500.0\n", HEADER);
    write_profile(&dir, "IT.csv", &csv);

    let permissive = Arc::new(InMemoryRegistry::new());
    engine_for(&dir, config_for(&dir, "IT.csv", ""), permissive.clone())
        .run()
        .await
        .unwrap();
    assert_eq!(permissive.schedule_count(), 6);

    let bounded = Arc::new(InMemoryRegistry::new());
    let config = config_for(&dir, "IT.csv", "\n[validation]\npolicy = \"bounded\"\n");
    let err = engine_for(&dir, config, bounded).run().await.unwrap_err();
    assert!(matches!(err, ImportError::InvalidRow { row: 0, .. }));
}

#[tokio::test]
async fn test_running_twice_produces_identical_schedules() {
    let dir = TempDir::new().unwrap();
    write_profile(&dir, "IT.csv", &annual_csv(48));
    let registry = Arc::new(InMemoryRegistry::new());

    let first = engine_for(&dir, config_for(&dir, "IT.csv", ""), registry.clone())
        .run()
        .await
        .unwrap();
    let second = engine_for(&dir, config_for(&dir, "IT.csv", ""), registry.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(first.schedules_after, 6);
    assert_eq!(second.schedules_before, 6);
    assert_eq!(second.schedules_after, 12);

    for name in SCHEDULE_NAMES {
        let copies = registry.find_by_name(name);
        assert_eq!(copies.len(), 2);
        assert_eq!(copies[0].series, copies[1].series);
    }
}
