//! 운임 계산 입력 레코드와 결과 타입.

pub mod costs;
pub mod field;
pub mod transport;
pub mod vehicle;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use costs::{FixedCosts, VariableCosts};
pub use field::{Field, Section};
pub use transport::TransportParams;
pub use vehicle::{UnknownVehicleType, VehicleParams, VehicleProfile, VehicleType};

/// 기본 유가 [¥/L]. 차종을 바꿔도 유지된다.
pub const DEFAULT_FUEL_PRICE: f64 = 6.94;

/// 파생 엔진과 운임 계산기가 다루는 전체 입력 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FreightInput {
    pub vehicle_params: VehicleParams,
    pub fixed_costs: FixedCosts,
    pub variable_costs: VariableCosts,
    pub transport_params: TransportParams,
}

impl Default for FreightInput {
    fn default() -> Self {
        Self::for_vehicle(VehicleType::Length9m6, DEFAULT_FUEL_PRICE)
    }
}

impl FreightInput {
    /// 차종 프리셋으로 레코드를 만든다. 파생 필드는 0인 상태이므로
    /// `engine::derive_all`을 거쳐야 한다.
    pub fn for_vehicle(vehicle_type: VehicleType, fuel_price: f64) -> Self {
        let profile = vehicle_type.profile();
        Self {
            vehicle_params: VehicleParams::from_profile(vehicle_type),
            fixed_costs: FixedCosts::from_profile(&profile),
            variable_costs: VariableCosts::from_profile(&profile, fuel_price),
            transport_params: TransportParams::from_profile(&profile),
        }
    }
}

/// 운송 수단. 도로 운임 엔진은 `Land`만 생성한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Land,
    Air,
    Sea,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Land, TransportMode::Air, TransportMode::Sea];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Land => "land",
            TransportMode::Air => "air",
            TransportMode::Sea => "sea",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "land" => Ok(TransportMode::Land),
            "air" => Ok(TransportMode::Air),
            "sea" => Ok(TransportMode::Sea),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

/// 저장용 계산 결과. 생성 이후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FreightResult {
    /// 대표 운송비 (>1일/회 고정비 + 변동비)
    pub total_cost: f64,
    /// 연간 고정비 합계
    pub fixed_cost: f64,
    /// 도로 운임에서는 항상 0
    pub base_cost: f64,
    /// 화면/기록용 요약 문자열 4줄
    pub details: Vec<String>,
}
