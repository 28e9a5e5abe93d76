use serde::{Deserialize, Serialize};

use super::vehicle::VehicleProfile;

/// 연간 고정비 [¥/년].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedCosts {
    /// 차량 구입가 [¥]
    pub vehicle_price: f64,
    /// 사용 연한 [년]
    pub service_life: f64,
    /// 감가상각비 (파생값)
    pub depreciation: f64,
    pub driver_salary: f64,
    pub repair_fee: f64,
    pub vehicle_insurance: f64,
    pub other_fixed_costs: f64,
    /// 고정비 합계 (파생값)
    pub total_fixed_cost: f64,
}

impl FixedCosts {
    pub fn from_profile(profile: &VehicleProfile) -> Self {
        Self {
            vehicle_price: profile.vehicle_price,
            service_life: profile.service_life,
            driver_salary: profile.driver_salary,
            repair_fee: profile.repair_fee,
            vehicle_insurance: profile.vehicle_insurance,
            other_fixed_costs: profile.other_fixed_costs,
            ..Self::default()
        }
    }
}

/// km당 변동비와 연간 기대이익.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableCosts {
    /// 유가 [¥/L]
    pub fuel_price: f64,
    /// 연비 [L/100km]
    pub fuel_consumption: f64,
    /// 유류비 [¥/km] (파생값)
    pub fuel_cost: f64,
    pub tire_cost: f64,
    pub toll_fee: f64,
    pub maintenance_fee: f64,
    pub other_variable_costs: f64,
    /// 변동비 합계 [¥/km] (파생값)
    pub total_variable_cost: f64,
    /// 기대이익 [¥/년]
    pub expected_profit: f64,
}

impl VariableCosts {
    pub fn from_profile(profile: &VehicleProfile, fuel_price: f64) -> Self {
        Self {
            fuel_price,
            fuel_consumption: profile.fuel_consumption,
            tire_cost: profile.tire_cost,
            toll_fee: profile.toll_fee,
            maintenance_fee: profile.maintenance_fee,
            other_variable_costs: profile.other_variable_costs,
            expected_profit: profile.expected_profit,
            ..Self::default()
        }
    }
}
