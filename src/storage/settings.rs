use log::debug;
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreError};
use crate::model::TransportMode;

/// 설정 객체의 저장 키.
pub const SETTINGS_KEY: &str = "freightSettings";

/// 운송 수단별 요율과 할증률. 도로 운임 계산에는 쓰이지 않고 저장만 된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prices {
    pub land: f64,
    pub air: f64,
    pub sea: f64,
    pub urgent: f64,
    pub insurance: f64,
    pub cold: f64,
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            land: 1.5,
            air: 4.0,
            sea: 0.8,
            urgent: 0.2,
            insurance: 0.15,
            cold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub default_method: TransportMode,
    /// 기록 보관 기간 [일]. 0이면 무기한.
    pub history_retention: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_method: TransportMode::Land,
            history_retention: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prices: Prices,
    pub preferences: Preferences,
}

pub trait SettingsRepository {
    fn load(&self) -> Result<Settings, StoreError>;
    fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// 키-값 저장소의 `freightSettings` 키를 쓰는 설정 저장소.
pub struct StoreSettingsRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StoreSettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> SettingsRepository for StoreSettingsRepository<S> {
    /// 저장된 값이 없으면 기본값.
    fn load(&self) -> Result<Settings, StoreError> {
        match self.store.get(SETTINGS_KEY)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Settings::default()),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        self.store
            .set(SETTINGS_KEY, &serde_json::to_string(settings)?)?;
        debug!("settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let repo = StoreSettingsRepository::new(MemoryStore::new());
        let settings = repo.load().unwrap();
        assert_eq!(settings.prices.land, 1.5);
        assert_eq!(settings.preferences.history_retention, 30);
    }

    #[test]
    fn reads_browser_shaped_json() {
        let store = MemoryStore::new();
        store
            .set(
                SETTINGS_KEY,
                r#"{"prices":{"land":2,"air":4,"sea":0.8,"urgent":0.2,"insurance":0.15,"cold":0.3},
                    "preferences":{"defaultMethod":"sea","historyRetention":7}}"#,
            )
            .unwrap();
        let settings = StoreSettingsRepository::new(&store).load().unwrap();
        assert_eq!(settings.prices.land, 2.0);
        assert_eq!(settings.preferences.default_method, TransportMode::Sea);
        assert_eq!(settings.preferences.history_retention, 7);
    }
}
