use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 차종 구분. 선택하면 비용/운송 파라미터가 프리셋으로 초기화된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleType {
    /// 9.6m 카고 (3축)
    #[serde(rename = "9.6m")]
    Length9m6,
    /// 17.5m 트레일러 (6축)
    #[serde(rename = "17.5m")]
    Length17m5,
    /// 기타 차종. 프리셋 값은 모두 0.
    #[default]
    #[serde(rename = "other")]
    Other,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [
        VehicleType::Length9m6,
        VehicleType::Length17m5,
        VehicleType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Length9m6 => "9.6m",
            VehicleType::Length17m5 => "17.5m",
            VehicleType::Other => "other",
        }
    }

    /// 차종별 기본 프로파일을 반환한다.
    pub fn profile(&self) -> VehicleProfile {
        match self {
            VehicleType::Length9m6 => VehicleProfile {
                brand: "解放",
                axle_count: 3,
                load_capacity: 15.0,
                vehicle_price: 250_000.0,
                service_life: 10.0,
                driver_salary: 100_000.0,
                repair_fee: 10_000.0,
                vehicle_insurance: 13_000.0,
                other_fixed_costs: 0.0,
                fuel_consumption: 25.0,
                tire_cost: 0.12,
                toll_fee: 1.5,
                maintenance_fee: 0.5,
                other_variable_costs: 0.0,
                expected_profit: 50_000.0,
                loading_weight: 15.0,
                loading_quantity: 750.0,
                loading_volume: 65.0,
            },
            VehicleType::Length17m5 => VehicleProfile {
                brand: "解放",
                axle_count: 6,
                load_capacity: 30.0,
                vehicle_price: 540_000.0,
                service_life: 10.0,
                driver_salary: 140_000.0,
                repair_fee: 12_000.0,
                vehicle_insurance: 22_000.0,
                other_fixed_costs: 0.0,
                fuel_consumption: 35.0,
                tire_cost: 0.26,
                toll_fee: 2.26,
                maintenance_fee: 0.8,
                other_variable_costs: 0.0,
                expected_profit: 100_000.0,
                loading_weight: 30.0,
                loading_quantity: 1500.0,
                loading_volume: 120.0,
            },
            VehicleType::Other => VehicleProfile::default(),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 차종 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "9.6m" | "9.6" => Ok(VehicleType::Length9m6),
            "17.5m" | "17.5" => Ok(VehicleType::Length17m5),
            "other" => Ok(VehicleType::Other),
            other => Err(UnknownVehicleType(other.to_string())),
        }
    }
}

/// 차종 선택 시 적용되는 프리셋 값 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleProfile {
    pub brand: &'static str,
    pub axle_count: u32,
    /// 적재 톤수 [t]
    pub load_capacity: f64,
    pub vehicle_price: f64,
    /// 사용 연한 [년]
    pub service_life: f64,
    pub driver_salary: f64,
    pub repair_fee: f64,
    pub vehicle_insurance: f64,
    pub other_fixed_costs: f64,
    /// 연비 [L/100km]
    pub fuel_consumption: f64,
    pub tire_cost: f64,
    pub toll_fee: f64,
    pub maintenance_fee: f64,
    pub other_variable_costs: f64,
    pub expected_profit: f64,
    pub loading_weight: f64,
    pub loading_quantity: f64,
    pub loading_volume: f64,
}

/// 차량 기본 정보.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleParams {
    pub brand: String,
    pub vehicle_type: VehicleType,
    /// 프리셋 기본값이지만 이후 사용자가 직접 수정할 수 있다.
    pub axle_count: u32,
    /// 적재 톤수 [t]
    pub load_capacity: f64,
}

impl VehicleParams {
    pub fn from_profile(vehicle_type: VehicleType) -> Self {
        let profile = vehicle_type.profile();
        Self {
            brand: profile.brand.to_string(),
            vehicle_type,
            axle_count: profile.axle_count,
            load_capacity: profile.load_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vehicle_type_strings() {
        assert_eq!("9.6m".parse::<VehicleType>(), Ok(VehicleType::Length9m6));
        assert_eq!(" 17.5M ".parse::<VehicleType>(), Ok(VehicleType::Length17m5));
        assert_eq!("other".parse::<VehicleType>(), Ok(VehicleType::Other));
        assert!("12m".parse::<VehicleType>().is_err());
    }

    #[test]
    fn other_profile_is_all_zero() {
        let p = VehicleType::Other.profile();
        assert_eq!(p.axle_count, 0);
        assert_eq!(p.vehicle_price, 0.0);
        assert_eq!(p.expected_profit, 0.0);
        assert_eq!(p.loading_volume, 0.0);
        assert!(p.brand.is_empty());
    }

    #[test]
    fn serializes_with_original_labels() {
        let json = serde_json::to_string(&VehicleType::Length17m5).unwrap();
        assert_eq!(json, "\"17.5m\"");
    }
}
