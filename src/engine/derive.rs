//! 입력 필드 변경 시 파생 필드를 다시 계산한다.
//!
//! 파생 관계는 `DERIVATIONS` 표에 위상 순서대로 선언한다. 어떤 필드가 바뀌면
//! 그 필드에서 도달 가능한 파생 항목만 표 순서대로 재계산한다.

use log::debug;

use crate::model::{Field, FreightInput, VehicleType};

/// 일 주행거리 하한 [km/일]. 0 나눗셈을 막는다.
pub const MIN_DAILY_MILEAGE: f64 = 0.1;

/// 파생 필드 하나의 정의.
pub struct Derivation {
    pub target: Field,
    pub inputs: &'static [Field],
    compute: fn(&FreightInput) -> f64,
}

impl Derivation {
    pub fn compute(&self, record: &FreightInput) -> f64 {
        (self.compute)(record)
    }
}

/// 파생 관계 표. 각 항목의 입력은 기본 필드이거나 앞선 항목의 대상이어야 한다.
pub const DERIVATIONS: &[Derivation] = &[
    Derivation {
        target: Field::Depreciation,
        inputs: &[Field::VehiclePrice, Field::ServiceLife],
        compute: depreciation,
    },
    Derivation {
        target: Field::TotalFixedCost,
        inputs: &[
            Field::Depreciation,
            Field::DriverSalary,
            Field::RepairFee,
            Field::VehicleInsurance,
            Field::OtherFixedCosts,
        ],
        compute: total_fixed_cost,
    },
    Derivation {
        target: Field::FuelCost,
        inputs: &[Field::FuelPrice, Field::FuelConsumption],
        compute: fuel_cost,
    },
    Derivation {
        target: Field::TotalVariableCost,
        inputs: &[
            Field::FuelCost,
            Field::TireCost,
            Field::TollFee,
            Field::MaintenanceFee,
            Field::OtherVariableCosts,
        ],
        compute: total_variable_cost,
    },
    Derivation {
        target: Field::EstimatedTime,
        inputs: &[
            Field::Distance,
            Field::EstimatedDailyMileage,
            Field::LoadingUnloadingTime,
        ],
        compute: estimated_time,
    },
    Derivation {
        target: Field::BenchmarkDistance,
        inputs: &[
            Field::WorkingDays,
            Field::EstimatedTime,
            Field::EstimatedAnnualOneWayMileage,
        ],
        compute: benchmark_distance,
    },
];

/// NaN/무한대 입력은 0으로 본다.
fn finite(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn value(record: &FreightInput, field: Field) -> f64 {
    finite(field.get(record))
}

/// 분모가 0 이하이면 0을 반환하는 나눗셈.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    let numerator = finite(numerator);
    let denominator = finite(denominator);
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn depreciation(r: &FreightInput) -> f64 {
    ratio(value(r, Field::VehiclePrice), value(r, Field::ServiceLife))
}

fn total_fixed_cost(r: &FreightInput) -> f64 {
    [
        Field::Depreciation,
        Field::DriverSalary,
        Field::RepairFee,
        Field::VehicleInsurance,
        Field::OtherFixedCosts,
    ]
    .iter()
    .map(|f| value(r, *f))
    .sum()
}

fn fuel_cost(r: &FreightInput) -> f64 {
    value(r, Field::FuelPrice) * value(r, Field::FuelConsumption) / 100.0
}

fn total_variable_cost(r: &FreightInput) -> f64 {
    [
        Field::FuelCost,
        Field::TireCost,
        Field::TollFee,
        Field::MaintenanceFee,
        Field::OtherVariableCosts,
    ]
    .iter()
    .map(|f| value(r, *f))
    .sum()
}

fn estimated_time(r: &FreightInput) -> f64 {
    let daily = value(r, Field::EstimatedDailyMileage).max(MIN_DAILY_MILEAGE);
    value(r, Field::Distance) / daily + value(r, Field::LoadingUnloadingTime)
}

fn benchmark_distance(r: &FreightInput) -> f64 {
    // 연간 왕복 횟수 = 영업일 / 2 / 회당 소요일
    let round_trips = ratio(value(r, Field::WorkingDays) / 2.0, value(r, Field::EstimatedTime));
    if round_trips > 0.0 {
        ratio(value(r, Field::EstimatedAnnualOneWayMileage), round_trips)
            .round()
            .max(0.0)
    } else {
        0.0
    }
}

/// `changed` 필드의 하위 파생 필드를 모두 재계산한 새 레코드를 반환한다.
pub fn derive(record: &FreightInput, changed: Field) -> FreightInput {
    let mut next = record.clone();
    let mut dirty = vec![changed];
    for derivation in DERIVATIONS {
        if derivation.inputs.iter().any(|f| dirty.contains(f)) {
            let v = derivation.compute(&next);
            derivation.target.set(&mut next, v);
            dirty.push(derivation.target);
        }
    }
    debug!("derive {changed}: recomputed {:?}", &dirty[1..]);
    next
}

/// 모든 파생 필드를 재계산한다.
pub fn derive_all(record: &FreightInput) -> FreightInput {
    let mut next = record.clone();
    for derivation in DERIVATIONS {
        let v = derivation.compute(&next);
        derivation.target.set(&mut next, v);
    }
    next
}

/// 숫자 필드 하나를 바꾸고 하위 필드를 재계산한다.
pub fn set_field(record: &FreightInput, field: Field, value: f64) -> FreightInput {
    let mut next = record.clone();
    field.set(&mut next, value);
    derive(&next, field)
}

/// 차종을 선택해 프리셋을 적용한다. 유가는 기존 값을 유지한다.
pub fn apply_vehicle_type(record: &FreightInput, vehicle_type: VehicleType) -> FreightInput {
    let preset = FreightInput::for_vehicle(vehicle_type, record.variable_costs.fuel_price);
    debug!("apply vehicle preset {vehicle_type}");
    derive_all(&preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_table_is_topologically_ordered() {
        let mut computed: Vec<Field> = Vec::new();
        for d in DERIVATIONS {
            for input in d.inputs {
                assert!(
                    !input.is_derived() || computed.contains(input),
                    "{} depends on {} before it is computed",
                    d.target,
                    input
                );
            }
            computed.push(d.target);
        }
        let derived: Vec<Field> = Field::ALL.iter().copied().filter(Field::is_derived).collect();
        assert_eq!(computed.len(), derived.len());
    }

    #[test]
    fn depreciation_is_zero_without_service_life() {
        let record = set_field(&FreightInput::default(), Field::ServiceLife, 0.0);
        assert_eq!(record.fixed_costs.depreciation, 0.0);
        assert_eq!(record.fixed_costs.total_fixed_cost, 123_000.0);
    }

    #[test]
    fn untouched_branches_are_not_recomputed() {
        let mut record = derive_all(&FreightInput::default());
        record.variable_costs.fuel_cost = 99.0;
        let next = derive(&record, Field::VehiclePrice);
        assert_eq!(next.variable_costs.fuel_cost, 99.0);
    }

    #[test]
    fn non_finite_inputs_are_treated_as_zero() {
        let record = set_field(&FreightInput::default(), Field::FuelPrice, f64::NAN);
        assert_eq!(record.variable_costs.fuel_cost, 0.0);
        assert!(record.variable_costs.total_variable_cost.is_finite());
    }

    #[test]
    fn daily_mileage_is_floored() {
        let record = FreightInput::default();
        let record = set_field(&record, Field::Distance, 1.0);
        let record = set_field(&record, Field::EstimatedDailyMileage, 0.0);
        assert!((record.transport_params.estimated_time - (10.0 + 0.2)).abs() < 1e-9);
    }
}
