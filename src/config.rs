use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::PerTonBasis;

/// 기본 설정 파일 이름. 현재 작업 디렉터리에 만든다.
pub const CONFIG_FILE: &str = "config.toml";

const DATA_DIR_NAME: &str = "freight-cost-toolbox";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko-kr/en-us/zh-cn)
    pub language: String,
    /// 외부 언어팩 디렉터리. 없으면 내장 언어팩만 사용한다.
    pub language_pack_dir: Option<String>,
    /// 계산 기록/설정 저장 위치. 비어 있으면 플랫폼 데이터 디렉터리.
    pub data_dir: Option<PathBuf>,
    /// ≤1일/회 톤당 단가 기준
    pub per_ton_basis: PerTonBasis,
    /// GUI 창 불투명도 (0.3~1.0)
    pub window_alpha: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            data_dir: None,
            per_ton_basis: PerTonBasis::LoadingWeight,
            window_alpha: 1.0,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let parsed = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|content| toml::from_str::<Config>(&content).map_err(ConfigError::from));
        if let Err(e) = &parsed {
            warn!("config {} unreadable: {e}", path.display());
        }
        parsed
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 데이터 디렉터리를 결정한다. 설정값 → 플랫폼 데이터 디렉터리 → ./data 순.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(DATA_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// 창 불투명도를 허용 범위로 제한한다.
    pub fn clamped_alpha(&self) -> f32 {
        if self.window_alpha.is_finite() {
            self.window_alpha.clamp(0.3, 1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_file_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn reads_partial_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"zh-cn\"\nper_ton_basis = \"actual_load\"\n").unwrap();
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg.language, "zh-cn");
        assert_eq!(cfg.per_ton_basis, PerTonBasis::ActualLoad);
        assert_eq!(cfg.window_alpha, 1.0);
    }

    #[test]
    fn broken_file_is_an_error_and_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = [unterminated\n").unwrap();
        let err = load_or_default_at(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)), "{err:?}");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "language = [unterminated\n"
        );
    }

    #[test]
    fn explicit_data_dir_wins() {
        let cfg = Config {
            data_dir: Some(PathBuf::from("/tmp/freight")),
            ..Config::default()
        };
        assert_eq!(cfg.resolved_data_dir(), PathBuf::from("/tmp/freight"));
    }
}
