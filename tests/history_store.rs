use chrono::{NaiveDate, TimeZone, Utc};
use freight_cost_toolbox::{
    engine::{build_result, derive_all, set_field},
    i18n::Translator,
    model::{Field, FreightInput, TransportMode},
    storage::{
        prune_older_than, FileStore, HistoryFilter, HistoryRecord, HistoryRepository,
        KeyValueStore, Settings, SettingsRepository, StoreHistoryRepository,
        StoreSettingsRepository, HISTORY_KEY,
    },
};

fn record(distance: f64, y: i32, m: u32, d: u32) -> HistoryRecord {
    let tr = Translator::new("en");
    let input = set_field(&derive_all(&FreightInput::default()), Field::Distance, distance);
    let result = build_result(&input, &tr);
    HistoryRecord::new(input, result, Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
}

#[test]
fn file_store_keeps_history_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let repo = StoreHistoryRepository::new(FileStore::open(dir.path()).unwrap());
        repo.append(record(100.0, 2024, 1, 1)).unwrap();
        repo.append(record(200.0, 2024, 1, 2)).unwrap();
    }
    assert!(dir.path().join(format!("{HISTORY_KEY}.json")).exists());

    let repo = StoreHistoryRepository::new(FileStore::open(dir.path()).unwrap());
    let list = repo.list().unwrap();
    assert_eq!(list.len(), 2);
    // 최신 기록이 앞
    assert_eq!(list[0].form_data.transport_params.distance, 200.0);
    assert_eq!(list[1].form_data.transport_params.distance, 100.0);
    assert_eq!(list[0].transport_type, TransportMode::Land);
    assert_eq!(
        repo.get(1).unwrap().map(|r| r.timestamp),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    );
    assert!(repo.get(2).unwrap().is_none());
}

#[test]
fn stored_json_uses_browser_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let repo = StoreHistoryRepository::new(store.clone());
    repo.append(record(500.0, 2024, 5, 1)).unwrap();

    let text = store.get(HISTORY_KEY).unwrap().expect("history json");
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &json[0];
    assert_eq!(first["transportType"], "land");
    assert_eq!(first["formData"]["vehicleParams"]["vehicleType"], "9.6m");
    assert_eq!(first["formData"]["transportParams"]["benchmarkDistance"], 613);
    assert_eq!(first["result"]["details"].as_array().map(Vec::len), Some(4));
}

#[test]
fn filter_is_inclusive_on_both_ends() {
    let records = vec![
        record(3.0, 2024, 3, 10),
        record(2.0, 2024, 3, 5),
        record(1.0, 2024, 3, 1),
    ];
    let filter = HistoryFilter {
        from: NaiveDate::from_ymd_opt(2024, 3, 1),
        to: NaiveDate::from_ymd_opt(2024, 3, 5),
        mode: None,
    };
    let kept: Vec<bool> = records.iter().map(|r| filter.matches_in(r, &Utc)).collect();
    assert_eq!(kept, vec![false, true, true]);

    let sea_only = HistoryFilter {
        mode: Some(TransportMode::Sea),
        ..HistoryFilter::default()
    };
    assert!(records.iter().all(|r| !sea_only.matches_in(r, &Utc)));
}

#[test]
fn filter_keeps_original_positions() {
    let records = vec![
        record(3.0, 2024, 3, 10),
        record(2.0, 2023, 1, 5),
        record(1.0, 2024, 3, 1),
    ];
    let filter = HistoryFilter {
        from: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..HistoryFilter::default()
    };
    let indices: Vec<usize> = filter.apply(&records).into_iter().map(|(i, _)| i).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[test]
fn prune_removes_only_expired_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let repo = StoreHistoryRepository::new(FileStore::open(dir.path()).unwrap());
    repo.append(record(1.0, 2024, 1, 1)).unwrap();
    repo.append(record(2.0, 2024, 5, 20)).unwrap();
    repo.append(record(3.0, 2024, 6, 1)).unwrap();

    let now = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
    assert_eq!(prune_older_than(&repo, now, 0).unwrap(), 0);
    assert_eq!(repo.list().unwrap().len(), 3);

    assert_eq!(prune_older_than(&repo, now, 30).unwrap(), 1);
    let distances: Vec<f64> = repo
        .list()
        .unwrap()
        .iter()
        .map(|r| r.form_data.transport_params.distance)
        .collect();
    assert_eq!(distances, vec![3.0, 2.0]);
}

#[test]
fn clear_empties_history() {
    let dir = tempfile::tempdir().unwrap();
    let repo = StoreHistoryRepository::new(FileStore::open(dir.path()).unwrap());
    repo.append(record(1.0, 2024, 1, 1)).unwrap();
    repo.clear().unwrap();
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn settings_default_then_persist() {
    let dir = tempfile::tempdir().unwrap();
    let repo = StoreSettingsRepository::new(FileStore::open(dir.path()).unwrap());
    let mut settings = repo.load().unwrap();
    assert_eq!(settings, Settings::default());

    settings.prices.sea = 0.95;
    settings.preferences.default_method = TransportMode::Air;
    settings.preferences.history_retention = 0;
    repo.save(&settings).unwrap();

    let reopened = StoreSettingsRepository::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.load().unwrap(), settings);
}

#[test]
fn unusable_data_dir_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not-a-dir");
    std::fs::write(&file, "x").unwrap();
    assert!(FileStore::open(&file).is_err());
}
