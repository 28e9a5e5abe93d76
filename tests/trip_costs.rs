use freight_cost_toolbox::{
    app,
    engine::{
        self, compute_trip_costs, derive_all, set_field, PerTonBasis, TripCostWarning, TripCosts,
    },
    i18n::Translator,
    model::{Field, FreightInput, VehicleType, DEFAULT_FUEL_PRICE},
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn quote_500km() -> FreightInput {
    let r = derive_all(&FreightInput::for_vehicle(VehicleType::Length9m6, DEFAULT_FUEL_PRICE));
    set_field(&r, Field::Distance, 500.0)
}

#[test]
fn both_regimes_for_nine_six_at_500_km() {
    let costs = compute_trip_costs(&quote_500km(), PerTonBasis::LoadingWeight);
    let a = &costs.over_one_day;
    assert!(close(a.fixed_cost, 148_000.0 * 0.825 / 269.0), "fixedA={}", a.fixed_cost);
    assert!(close(a.variable_cost, 1927.5));
    assert!(close(a.profit, 306.5));
    assert!(close(a.total_cost, a.fixed_cost + 1927.5 + 306.5));

    let b = &costs.within_one_day;
    assert!(close(b.fixed_cost, 148_000.0 / 269.0));
    assert!(close(b.profit, 50_000.0 / 269.0));
    assert!(close(b.variable_cost, a.variable_cost));
    assert!(costs.warnings.is_empty(), "{:?}", costs.warnings);

    assert!(close(a.unit_prices.per_km, a.total_cost / 500.0));
    assert!(close(a.unit_prices.per_ton, a.total_cost / 15.0));
    assert!(close(a.unit_prices.per_dan, a.total_cost / 300.0));
}

#[test]
fn headline_is_fixed_plus_variable_of_long_trip() {
    let record = quote_500km();
    let costs = compute_trip_costs(&record, PerTonBasis::LoadingWeight);
    let headline = engine::headline_transport_cost(&record);
    assert!(close(
        headline,
        costs.over_one_day.fixed_cost + costs.over_one_day.variable_cost
    ));
    assert_eq!(engine::format_money(headline), "¥2381.40");
}

#[test]
fn all_zero_record_costs_nothing() {
    let record = derive_all(&FreightInput::for_vehicle(VehicleType::Other, 0.0));
    let costs = compute_trip_costs(&record, PerTonBasis::LoadingWeight);
    assert_eq!(costs.over_one_day.total_cost, 0.0);
    assert_eq!(costs.within_one_day.total_cost, 0.0);
    assert!(costs.warnings.contains(&TripCostWarning::ZeroDistance));
}

#[test]
fn zero_loading_weight_gives_zero_weight_units() {
    let record = set_field(&quote_500km(), Field::LoadingWeight, 0.0);
    let costs = compute_trip_costs(&record, PerTonBasis::LoadingWeight);
    let u = costs.over_one_day.unit_prices;
    assert_eq!(u.per_ton, 0.0);
    assert_eq!(u.per_ton_km, 0.0);
    assert_eq!(u.per_dan, 0.0);
    assert!(u.per_km > 0.0);
}

#[test]
fn legacy_basis_without_actual_load_warns() {
    let costs = compute_trip_costs(&quote_500km(), PerTonBasis::ActualLoad);
    assert_eq!(costs.within_one_day.unit_prices.per_ton, 0.0);
    assert_eq!(costs.warnings, vec![TripCostWarning::MissingActualLoad]);

    let mut record = quote_500km();
    record.transport_params.actual_load = Some(10.0);
    let costs = compute_trip_costs(&record, PerTonBasis::ActualLoad);
    let b = &costs.within_one_day;
    assert!(close(b.unit_prices.per_ton, b.total_cost / 10.0));
    // >1일/회 구분은 항상 적재 중량 기준
    assert!(close(
        costs.over_one_day.unit_prices.per_ton,
        costs.over_one_day.total_cost / 15.0
    ));
}

#[test]
fn zero_trips_per_day_drops_short_trip_overheads() {
    let record = set_field(&quote_500km(), Field::TripsPerDay, 0.0);
    let costs: TripCosts = compute_trip_costs(&record, PerTonBasis::LoadingWeight);
    assert_eq!(costs.within_one_day.fixed_cost, 0.0);
    assert_eq!(costs.within_one_day.profit, 0.0);
    assert!(costs.warnings.contains(&TripCostWarning::ZeroTripsPerDay));
}

#[test]
fn quote_produces_four_summary_lines() {
    let tr = Translator::new("en");
    let quote = app::calculate(&quote_500km(), PerTonBasis::LoadingWeight, &tr);
    let lines = &quote.result.details;
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Fixed cost: ¥148000.00/year");
    assert!(lines[1].starts_with("Variable cost: ¥3.8"), "{}", lines[1]);
    assert!(lines[1].ends_with("/km"));
    assert_eq!(lines[2], "Expected profit: ¥50000.00/year");
    assert_eq!(lines[3], "Transport cost: ¥2381.40");
    assert_eq!(quote.result.fixed_cost, 148_000.0);
    assert!(close(quote.result.total_cost, 2381.403345724907));
}

#[test]
fn quote_serializes_camel_case() {
    let tr = Translator::new("en");
    let quote = app::calculate(&quote_500km(), PerTonBasis::LoadingWeight, &tr);
    let json = serde_json::to_value(&quote).unwrap();
    assert!(json["tripCosts"]["overOneDay"]["unitPrices"]["perTonKm"].is_number());
    assert_eq!(json["input"]["transportParams"]["benchmarkDistance"], 613);
}
