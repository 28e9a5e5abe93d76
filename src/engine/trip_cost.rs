//! 회당 운임(두 가지 운행 구분)과 단위 운임 환산.

use serde::{Deserialize, Serialize};

use super::derive::ratio;
use crate::model::FreightInput;

/// 1담(担) = 중량 20단위.
pub const DAN_PER_WEIGHT_UNIT: f64 = 20.0;

/// ≤1일/회 구분의 톤당 단가 분모 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerTonBasis {
    /// 적재 중량 기준 (기본)
    #[default]
    LoadingWeight,
    /// 실제 적재량 기준 (구버전 계산 방식)
    ActualLoad,
}

/// 분모가 0이라 0으로 대체된 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripCostWarning {
    /// 운송 거리 0 → km당 단가 0
    ZeroDistance,
    /// 영업일 0 → ≤1일/회 고정비/이익 0
    ZeroWorkingDays,
    /// 일 운행 횟수 0 → ≤1일/회 고정비/이익 0
    ZeroTripsPerDay,
    /// 실제 적재량 없음 → ≤1일/회 톤당 단가 0
    MissingActualLoad,
}

/// 단위 운임 계산 입력.
#[derive(Debug, Clone)]
pub struct UnitPriceInput {
    /// 회당 운임 합계 [¥]
    pub total_cost: f64,
    /// 적재 중량 [t]
    pub loading_weight: f64,
    /// 운송 거리 [km]
    pub distance: f64,
    /// 적재 수량 [개]
    pub loading_quantity: f64,
    /// 적재 부피 [m³]
    pub loading_volume: f64,
}

/// 단위 운임 결과.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrices {
    /// [¥/km]
    pub per_km: f64,
    /// [¥/담]
    pub per_dan: f64,
    /// [¥/t·km]
    pub per_ton_km: f64,
    /// [¥/t]
    pub per_ton: f64,
    /// [¥/개]
    pub per_piece: f64,
    /// [¥/m³]
    pub per_volume: f64,
}

/// 회당 운임 합계를 단위 운임으로 환산한다. 분모가 0 이하인 항목은 0.
pub fn unit_prices(input: UnitPriceInput) -> UnitPrices {
    let weight_and_distance = if input.loading_weight > 0.0 && input.distance > 0.0 {
        input.loading_weight * input.distance
    } else {
        0.0
    };
    UnitPrices {
        per_km: ratio(input.total_cost, input.distance),
        per_dan: ratio(input.total_cost, input.loading_weight * DAN_PER_WEIGHT_UNIT),
        per_ton_km: ratio(input.total_cost, weight_and_distance),
        per_ton: ratio(input.total_cost, input.loading_weight),
        per_piece: ratio(input.total_cost, input.loading_quantity),
        per_volume: ratio(input.total_cost, input.loading_volume),
    }
}

/// 한 운행 구분의 회당 운임 내역.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeCost {
    pub fixed_cost: f64,
    pub variable_cost: f64,
    /// 회당 이익 (>1일/회에서는 총이익)
    pub profit: f64,
    pub adjustment_factor: f64,
    /// (고정비 + 변동비 + 이익) × 조정계수
    pub total_cost: f64,
    pub unit_prices: UnitPrices,
}

/// 두 운행 구분의 계산 결과. 항상 둘 다 생성한다.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCosts {
    /// >1일/회
    pub over_one_day: RegimeCost,
    /// ≤1일/회
    pub within_one_day: RegimeCost,
    pub trips_per_day: f64,
    pub warnings: Vec<TripCostWarning>,
}

/// >1일/회 회당 고정비 = 연 고정비 / (영업일 / 회당 소요일).
pub fn fixed_cost_over_one_day(record: &FreightInput) -> f64 {
    let tp = &record.transport_params;
    if tp.working_days > 0.0 && tp.estimated_time > 0.0 {
        ratio(
            record.fixed_costs.total_fixed_cost,
            tp.working_days / tp.estimated_time,
        )
    } else {
        0.0
    }
}

/// 회당 변동비 = km당 변동비 × 운송 거리. 두 구분 모두 같은 식이다.
pub fn variable_cost_per_trip(record: &FreightInput) -> f64 {
    let v = record.variable_costs.total_variable_cost * record.transport_params.distance;
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn gross_profit_over_one_day(record: &FreightInput) -> f64 {
    let tp = &record.transport_params;
    ratio(
        record.variable_costs.expected_profit,
        tp.estimated_annual_one_way_mileage,
    ) * tp.benchmark_distance as f64
}

fn push_warning(warnings: &mut Vec<TripCostWarning>, warning: TripCostWarning) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

fn unit_input(record: &FreightInput, total_cost: f64) -> UnitPriceInput {
    let tp = &record.transport_params;
    UnitPriceInput {
        total_cost,
        loading_weight: tp.loading_weight,
        distance: tp.distance,
        loading_quantity: tp.loading_quantity,
        loading_volume: tp.loading_volume,
    }
}

fn scaled(sum: f64, factor: f64) -> f64 {
    let v = sum * factor;
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// 입력 레코드(파생 필드 계산 완료 상태)로 두 운행 구분의 운임을 계산한다.
pub fn compute_trip_costs(record: &FreightInput, basis: PerTonBasis) -> TripCosts {
    let tp = &record.transport_params;
    let mut warnings = Vec::new();

    let fixed_a = fixed_cost_over_one_day(record);
    let variable = variable_cost_per_trip(record);
    let profit_a = gross_profit_over_one_day(record);
    let total_a = scaled(fixed_a + variable + profit_a, tp.adjustment_factor1);

    if tp.working_days <= 0.0 {
        push_warning(&mut warnings, TripCostWarning::ZeroWorkingDays);
    }
    if tp.trips_per_day <= 0.0 {
        push_warning(&mut warnings, TripCostWarning::ZeroTripsPerDay);
    }
    let per_day_divisor = if tp.working_days > 0.0 && tp.trips_per_day > 0.0 {
        tp.working_days * tp.trips_per_day
    } else {
        0.0
    };
    let fixed_b = ratio(record.fixed_costs.total_fixed_cost, per_day_divisor);
    let profit_b = ratio(record.variable_costs.expected_profit, per_day_divisor);
    let total_b = scaled(fixed_b + variable + profit_b, tp.adjustment_factor2);

    if tp.distance <= 0.0 {
        push_warning(&mut warnings, TripCostWarning::ZeroDistance);
    }

    let units_a = unit_prices(unit_input(record, total_a));
    let mut units_b = unit_prices(unit_input(record, total_b));
    if basis == PerTonBasis::ActualLoad {
        let actual_load = tp.actual_load.unwrap_or(0.0);
        if actual_load <= 0.0 {
            push_warning(&mut warnings, TripCostWarning::MissingActualLoad);
        }
        units_b.per_ton = ratio(total_b, actual_load);
    }

    TripCosts {
        over_one_day: RegimeCost {
            fixed_cost: fixed_a,
            variable_cost: variable,
            profit: profit_a,
            adjustment_factor: tp.adjustment_factor1,
            total_cost: total_a,
            unit_prices: units_a,
        },
        within_one_day: RegimeCost {
            fixed_cost: fixed_b,
            variable_cost: variable,
            profit: profit_b,
            adjustment_factor: tp.adjustment_factor2,
            total_cost: total_b,
            unit_prices: units_b,
        },
        trips_per_day: tp.trips_per_day,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_prices_guard_zero_denominators() {
        let res = unit_prices(UnitPriceInput {
            total_cost: 1000.0,
            loading_weight: 0.0,
            distance: 0.0,
            loading_quantity: 0.0,
            loading_volume: 0.0,
        });
        assert_eq!(res, UnitPrices::default());
    }

    #[test]
    fn unit_prices_divide_by_load() {
        let res = unit_prices(UnitPriceInput {
            total_cost: 3000.0,
            loading_weight: 15.0,
            distance: 500.0,
            loading_quantity: 750.0,
            loading_volume: 60.0,
        });
        assert!((res.per_km - 6.0).abs() < 1e-9);
        assert!((res.per_dan - 10.0).abs() < 1e-9);
        assert!((res.per_ton_km - 0.4).abs() < 1e-9);
        assert!((res.per_ton - 200.0).abs() < 1e-9);
        assert!((res.per_piece - 4.0).abs() < 1e-9);
        assert!((res.per_volume - 50.0).abs() < 1e-9);
    }

    #[test]
    fn warnings_are_not_duplicated() {
        let mut w = Vec::new();
        push_warning(&mut w, TripCostWarning::ZeroDistance);
        push_warning(&mut w, TripCostWarning::ZeroDistance);
        assert_eq!(w.len(), 1);
    }
}
