use freight_cost_toolbox::{
    engine::{self, apply_vehicle_type, derive_all, set_field},
    model::{Field, FreightInput, VehicleType, DEFAULT_FUEL_PRICE},
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn nine_six() -> FreightInput {
    derive_all(&FreightInput::for_vehicle(VehicleType::Length9m6, DEFAULT_FUEL_PRICE))
}

#[test]
fn preset_costs_for_nine_six_truck() {
    let r = nine_six();
    assert!(close(r.fixed_costs.depreciation, 25_000.0));
    assert!(close(r.fixed_costs.total_fixed_cost, 148_000.0));
    assert!(close(r.variable_costs.fuel_cost, 1.735), "fuel={}", r.variable_costs.fuel_cost);
    assert!(
        close(r.variable_costs.total_variable_cost, 3.855),
        "variable={}",
        r.variable_costs.total_variable_cost
    );
}

#[test]
fn distance_drives_time_and_benchmark() {
    let r = set_field(&nine_six(), Field::Distance, 500.0);
    assert!(close(r.transport_params.estimated_time, 0.825));
    assert_eq!(r.transport_params.benchmark_distance, 613);
    // 거리와 무관한 필드는 그대로
    assert!(close(r.fixed_costs.total_fixed_cost, 148_000.0));
}

#[test]
fn benchmark_is_zero_when_round_trips_vanish() {
    let r = set_field(&nine_six(), Field::Distance, 500.0);
    let no_days = set_field(&r, Field::WorkingDays, 0.0);
    assert_eq!(no_days.transport_params.benchmark_distance, 0);

    let mut zero_time = set_field(&nine_six(), Field::Distance, 0.0);
    zero_time = set_field(&zero_time, Field::LoadingUnloadingTime, 0.0);
    assert_eq!(zero_time.transport_params.estimated_time, 0.0);
    assert_eq!(zero_time.transport_params.benchmark_distance, 0);
}

#[test]
fn derive_all_is_idempotent() {
    let r = set_field(&nine_six(), Field::Distance, 1234.5);
    assert_eq!(derive_all(&r), r);
}

#[test]
fn incremental_edits_match_full_recompute() {
    // 결정적 의사난수로 필드 편집 순서를 만든다.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) as f64 / (1u64 << 31) as f64
    };
    let editable: Vec<Field> = Field::ALL
        .iter()
        .copied()
        .filter(|f| !f.is_derived())
        .collect();
    let mut record = nine_six();
    for _ in 0..500 {
        let field = editable[(next() * editable.len() as f64) as usize % editable.len()];
        let value = (next() * 1000.0).round() / 10.0;
        record = set_field(&record, field, value);

        let fc = &record.fixed_costs;
        let sum = fc.depreciation
            + fc.driver_salary
            + fc.repair_fee
            + fc.vehicle_insurance
            + fc.other_fixed_costs;
        assert!(close(fc.total_fixed_cost, sum), "after editing {field}");
        assert!(record.transport_params.estimated_time >= 0.0);
        assert_eq!(derive_all(&record), record, "after editing {field}");
    }
}

#[test]
fn vehicle_switch_resets_preset_but_keeps_fuel_price() {
    let r = set_field(&nine_six(), Field::FuelPrice, 8.0);
    let r = set_field(&r, Field::Distance, 300.0);
    let trailer = apply_vehicle_type(&r, VehicleType::Length17m5);
    assert_eq!(trailer.vehicle_params.axle_count, 6);
    assert_eq!(trailer.variable_costs.fuel_price, 8.0);
    assert!(close(trailer.variable_costs.fuel_cost, 2.8));
    assert_eq!(trailer.transport_params.distance, 0.0);

    let other = apply_vehicle_type(&r, VehicleType::Other);
    assert_eq!(other.vehicle_params.brand, "");
    assert_eq!(other.fixed_costs.total_fixed_cost, 0.0);
}

#[test]
fn every_derivation_targets_a_derived_field() {
    for d in engine::DERIVATIONS {
        assert!(d.target.is_derived(), "{} is not marked derived", d.target);
        assert!(!d.inputs.is_empty());
    }
}
