use serde::{Deserialize, Serialize};

use super::vehicle::VehicleProfile;

pub const DEFAULT_LOADING_UNLOADING_TIME: f64 = 0.2;
pub const DEFAULT_DAILY_MILEAGE: f64 = 800.0;
pub const DEFAULT_ANNUAL_ONE_WAY_MILEAGE: f64 = 100_000.0;
pub const DEFAULT_WORKING_DAYS: f64 = 269.0;

/// 운행 조건과 적재 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportParams {
    /// 운송 거리 [km]
    pub distance: f64,
    /// 상하차 시간 [일]
    pub loading_unloading_time: f64,
    /// 일 주행거리 [km/일]
    pub estimated_daily_mileage: f64,
    /// 연간 편도 주행거리 [km/년]
    pub estimated_annual_one_way_mileage: f64,
    /// 회당 소요일 [일/회] (파생값)
    pub estimated_time: f64,
    /// 연간 영업일 [일/년]
    pub working_days: f64,
    /// 기준 운송거리 [km] (파생값, 정수)
    pub benchmark_distance: u64,
    /// 조정계수 (>1일/회)
    pub adjustment_factor1: f64,
    /// 조정계수 (≤1일/회)
    pub adjustment_factor2: f64,
    /// 일 운행 횟수 (≤1일/회)
    pub trips_per_day: f64,
    /// 적재 중량 [t]
    pub loading_weight: f64,
    /// 적재 수량 [개]
    pub loading_quantity: f64,
    /// 적재 부피 [m³]
    pub loading_volume: f64,
    /// 실제 적재량 [t]. 구버전 톤당 단가 계산에서만 쓰인다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_load: Option<f64>,
}

impl Default for TransportParams {
    fn default() -> Self {
        Self {
            distance: 0.0,
            loading_unloading_time: DEFAULT_LOADING_UNLOADING_TIME,
            estimated_daily_mileage: DEFAULT_DAILY_MILEAGE,
            estimated_annual_one_way_mileage: DEFAULT_ANNUAL_ONE_WAY_MILEAGE,
            estimated_time: 0.0,
            working_days: DEFAULT_WORKING_DAYS,
            benchmark_distance: 0,
            adjustment_factor1: 1.0,
            adjustment_factor2: 1.0,
            trips_per_day: 1.0,
            loading_weight: 0.0,
            loading_quantity: 0.0,
            loading_volume: 0.0,
            actual_load: None,
        }
    }
}

impl TransportParams {
    pub fn from_profile(profile: &VehicleProfile) -> Self {
        Self {
            loading_weight: profile.loading_weight,
            loading_quantity: profile.loading_quantity,
            loading_volume: profile.loading_volume,
            ..Self::default()
        }
    }
}
