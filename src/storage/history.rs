use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreError};
use crate::model::{FreightInput, FreightResult, TransportMode};

/// 계산 기록 목록의 저장 키.
pub const HISTORY_KEY: &str = "freightRecords";

/// 저장된 계산 한 건. 쓰기는 항상 `formData` 중첩 형태로 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecord")]
pub struct HistoryRecord {
    /// 계산 시점의 입력 레코드
    pub form_data: FreightInput,
    #[serde(default)]
    pub transport_type: TransportMode,
    pub result: FreightResult,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// 도로 운임 기록. 운송 수단은 항상 `Land`.
    pub fn new(form_data: FreightInput, result: FreightResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            form_data,
            transport_type: TransportMode::Land,
            result,
            timestamp,
        }
    }
}

/// 읽기 전용 형태. 브라우저 저장본은 입력 필드가 최상위에 펼쳐져 있다
/// (`{...formData, transportType, result, timestamp}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Nested(NestedRecord),
    Flat(FlatRecord),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedRecord {
    form_data: FreightInput,
    #[serde(default)]
    transport_type: TransportMode,
    result: FreightResult,
    timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatRecord {
    #[serde(flatten)]
    form_data: FreightInput,
    #[serde(default)]
    transport_type: TransportMode,
    result: FreightResult,
    timestamp: DateTime<Utc>,
}

impl From<StoredRecord> for HistoryRecord {
    fn from(stored: StoredRecord) -> Self {
        match stored {
            StoredRecord::Nested(r) => Self {
                form_data: r.form_data,
                transport_type: r.transport_type,
                result: r.result,
                timestamp: r.timestamp,
            },
            StoredRecord::Flat(r) => Self {
                form_data: r.form_data,
                transport_type: r.transport_type,
                result: r.result,
                timestamp: r.timestamp,
            },
        }
    }
}

/// 계산 기록 저장소. 목록은 최신 기록이 앞에 온다.
pub trait HistoryRepository {
    fn list(&self) -> Result<Vec<HistoryRecord>, StoreError>;
    fn get(&self, index: usize) -> Result<Option<HistoryRecord>, StoreError>;
    fn append(&self, record: HistoryRecord) -> Result<(), StoreError>;
    /// 목록 전체를 한 번에 교체한다. 실패하면 기존 목록이 그대로 남는다.
    fn replace_all(&self, records: &[HistoryRecord]) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// 키-값 저장소의 `freightRecords` 키에 목록 전체를 JSON으로 저장한다.
pub struct StoreHistoryRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StoreHistoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> HistoryRepository for StoreHistoryRepository<S> {
    fn list(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        match self.store.get(HISTORY_KEY)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn get(&self, index: usize) -> Result<Option<HistoryRecord>, StoreError> {
        Ok(self.list()?.into_iter().nth(index))
    }

    fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        let mut records = self.list()?;
        records.insert(0, record);
        self.replace_all(&records)?;
        debug!("history append: {} records", records.len());
        Ok(())
    }

    fn replace_all(&self, records: &[HistoryRecord]) -> Result<(), StoreError> {
        self.store
            .set(HISTORY_KEY, &serde_json::to_string(records)?)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(HISTORY_KEY)
    }
}

/// 기록 목록 필터. 날짜는 양 끝을 포함하며 일 단위로 비교한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub mode: Option<TransportMode>,
}

impl HistoryFilter {
    /// 로컬 시간 기준 날짜로 비교한다.
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        self.matches_in(record, &Local)
    }

    pub fn matches_in<Tz: TimeZone>(&self, record: &HistoryRecord, tz: &Tz) -> bool {
        let day = record.timestamp.with_timezone(tz).date_naive();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        self.mode.map_or(true, |m| record.transport_type == m)
    }

    /// 조건에 맞는 기록을 (원래 인덱스, 기록) 쌍으로 반환한다.
    pub fn apply<'a>(&self, records: &'a [HistoryRecord]) -> Vec<(usize, &'a HistoryRecord)> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .collect()
    }
}

/// `now` 기준 `days`일보다 오래된 기록을 지우고 지운 개수를 반환한다.
/// `days == 0`이면 아무것도 지우지 않는다.
pub fn prune_older_than<R: HistoryRepository + ?Sized>(
    repo: &R,
    now: DateTime<Utc>,
    days: u32,
) -> Result<usize, StoreError> {
    if days == 0 {
        return Ok(0);
    }
    let cutoff = now - Duration::days(i64::from(days));
    let records = repo.list()?;
    let total = records.len();
    let kept: Vec<HistoryRecord> = records
        .into_iter()
        .filter(|r| r.timestamp >= cutoff)
        .collect();
    let removed = total - kept.len();
    if removed == 0 {
        return Ok(0);
    }
    repo.replace_all(&kept)?;
    info!("pruned {removed} history records older than {days} days");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Datelike;
    use std::cell::Cell;

    /// 지정한 횟수만큼 쓰기에 성공한 뒤로는 쓰기가 실패하는 저장소.
    struct FlakyStore {
        inner: MemoryStore,
        writes_left: Cell<usize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            match self.writes_left.get() {
                0 => Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into()),
                n => {
                    self.writes_left.set(n - 1);
                    self.inner.set(key, value)
                }
            }
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn record_at(y: i32, m: u32, d: u32) -> HistoryRecord {
        let ts = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        HistoryRecord::new(FreightInput::default(), FreightResult::default(), ts)
    }

    #[test]
    fn append_inserts_at_head() {
        let repo = StoreHistoryRepository::new(MemoryStore::new());
        repo.append(record_at(2024, 1, 1)).unwrap();
        repo.append(record_at(2024, 1, 2)).unwrap();
        let list = repo.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].timestamp.date_naive().to_string(), "2024-01-02");
        assert_eq!(
            repo.get(1).unwrap().map(|r| r.timestamp),
            Some(record_at(2024, 1, 1).timestamp)
        );
        assert_eq!(repo.get(2).unwrap(), None);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let filter = HistoryFilter {
            from: NaiveDate::from_ymd_opt(2024, 1, 2),
            to: NaiveDate::from_ymd_opt(2024, 1, 3),
            mode: None,
        };
        assert!(!filter.matches_in(&record_at(2024, 1, 1), &Utc));
        assert!(filter.matches_in(&record_at(2024, 1, 2), &Utc));
        assert!(filter.matches_in(&record_at(2024, 1, 3), &Utc));
        assert!(!filter.matches_in(&record_at(2024, 1, 4), &Utc));
    }

    #[test]
    fn failed_prune_keeps_every_record() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            writes_left: Cell::new(usize::MAX),
        };
        let repo = StoreHistoryRepository::new(&store);
        for day in [1, 20, 21, 22] {
            let month = if day == 1 { 1 } else { 5 };
            repo.append(record_at(2024, month, day)).unwrap();
        }
        store.writes_left.set(0);

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(prune_older_than(&repo, now, 30).is_err());
        assert_eq!(repo.list().unwrap().len(), 4);

        store.writes_left.set(1);
        assert_eq!(prune_older_than(&repo, now, 30).unwrap(), 1);
        let days: Vec<u32> = repo
            .list()
            .unwrap()
            .iter()
            .map(|r| r.timestamp.date_naive().day())
            .collect();
        assert_eq!(days, vec![22, 21, 20]);
    }

    #[test]
    fn reads_flat_browser_records() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{
                    "vehicleParams": {"brand": "解放", "vehicleType": "17.5m", "axleCount": 6, "loadCapacity": 30},
                    "fixedCosts": {"vehiclePrice": 540000, "serviceLife": 10, "depreciation": 54000},
                    "variableCosts": {"fuelPrice": 6.94, "fuelConsumption": 35},
                    "transportParams": {"distance": 800, "benchmarkDistance": 613},
                    "transportType": "land",
                    "result": {"totalCost": 1234.5, "fixedCost": 228000, "baseCost": 0, "details": ["a", "b", "c", "d"]},
                    "timestamp": "2024-05-01T08:00:00.000Z"
                }]"#,
            )
            .unwrap();
        let repo = StoreHistoryRepository::new(&store);
        let list = repo.list().unwrap();
        assert_eq!(list.len(), 1);
        let r = &list[0];
        assert_eq!(r.form_data.vehicle_params.axle_count, 6);
        assert_eq!(r.form_data.fixed_costs.vehicle_price, 540_000.0);
        assert_eq!(r.form_data.transport_params.distance, 800.0);
        assert_eq!(r.result.total_cost, 1234.5);
        assert_eq!(r.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());

        // 다음 쓰기에서 중첩 형태로 정리된다
        repo.append(record_at(2024, 5, 2)).unwrap();
        let text = store.get(HISTORY_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json[1]["formData"]["fixedCosts"]["vehiclePrice"].is_number());
        assert!(json[1].get("vehicleParams").is_none());
        let reread = &repo.list().unwrap()[1];
        assert_eq!(reread.timestamp, r.timestamp);
        assert_eq!(reread.form_data.transport_params.distance, 800.0);
    }
}
