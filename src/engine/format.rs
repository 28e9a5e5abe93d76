//! 계산 결과를 화면/기록용 문자열로 만든다.

use crate::i18n::{keys, Translator};
use crate::model::{FreightInput, FreightResult};

use super::trip_cost::{
    fixed_cost_over_one_day, variable_cost_per_trip, RegimeCost, TripCostWarning, TripCosts,
};

/// 대표 운송비 = >1일/회 고정비 + 변동비. 이익과 조정계수는 포함하지 않는다.
pub fn headline_transport_cost(record: &FreightInput) -> f64 {
    fixed_cost_over_one_day(record) + variable_cost_per_trip(record)
}

/// `¥1234.50` 형식.
pub fn format_money(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    format!("¥{amount:.2}")
}

/// 기록에 저장되는 요약 4줄: 고정비, 변동비, 기대이익, 운송비.
pub fn format_result(record: &FreightInput, headline_cost: f64, tr: &Translator) -> Vec<String> {
    let line = |key: &str, amount: f64| tr.fill(key, &[("amount", format_money(amount))]);
    vec![
        line(keys::RESULT_FIXED, record.fixed_costs.total_fixed_cost),
        line(keys::RESULT_VARIABLE, record.variable_costs.total_variable_cost),
        line(keys::RESULT_PROFIT, record.variable_costs.expected_profit),
        line(keys::RESULT_TRANSPORT, headline_cost),
    ]
}

/// 입력 레코드로 저장용 결과를 만든다.
pub fn build_result(record: &FreightInput, tr: &Translator) -> FreightResult {
    let headline = headline_transport_cost(record);
    FreightResult {
        total_cost: headline,
        fixed_cost: record.fixed_costs.total_fixed_cost,
        base_cost: 0.0,
        details: format_result(record, headline, tr),
    }
}

pub fn warning_key(warning: TripCostWarning) -> &'static str {
    match warning {
        TripCostWarning::ZeroDistance => keys::WARNING_ZERO_DISTANCE,
        TripCostWarning::ZeroWorkingDays => keys::WARNING_ZERO_WORKING_DAYS,
        TripCostWarning::ZeroTripsPerDay => keys::WARNING_ZERO_TRIPS_PER_DAY,
        TripCostWarning::MissingActualLoad => keys::WARNING_MISSING_ACTUAL_LOAD,
    }
}

fn regime_row(tr: &Translator, label_key: &str, regime: &RegimeCost) -> String {
    format!(
        "{:<12} {}={:.2}  {}={:.2}  {}={:.2}  {}={:.2}  {}={:.2}",
        tr.t(label_key),
        tr.t(keys::TABLE_COL_FIXED),
        regime.fixed_cost,
        tr.t(keys::TABLE_COL_VARIABLE),
        regime.variable_cost,
        tr.t(keys::TABLE_COL_PROFIT),
        regime.profit,
        tr.t(keys::TABLE_COL_ADJUSTMENT),
        regime.adjustment_factor,
        tr.t(keys::TABLE_COL_TOTAL),
        regime.total_cost,
    )
}

fn unit_row(tr: &Translator, label_key: &str, regime: &RegimeCost) -> String {
    let u = &regime.unit_prices;
    format!(
        "{:<12} {:.2} {}  {:.2} {}  {:.3} {}  {:.2} {}  {:.2} {}  {:.2} {}",
        tr.t(label_key),
        u.per_km,
        tr.t(keys::UNIT_PER_KM),
        u.per_dan,
        tr.t(keys::UNIT_PER_DAN),
        u.per_ton_km,
        tr.t(keys::UNIT_PER_TON_KM),
        u.per_ton,
        tr.t(keys::UNIT_PER_TON),
        u.per_piece,
        tr.t(keys::UNIT_PER_PIECE),
        u.per_volume,
        tr.t(keys::UNIT_PER_VOLUME),
    )
}

/// 화면 표시용 운행 구분별 운임/단위 운임 표. 저장하지 않는다.
pub fn regime_table(costs: &TripCosts, tr: &Translator) -> Vec<String> {
    let mut lines = vec![
        format!("-- {} --", tr.t(keys::TABLE_TRIP_HEADING)),
        regime_row(tr, keys::TABLE_ROW_OVER_ONE_DAY, &costs.over_one_day),
        format!(
            "{}  {}={:.2}",
            regime_row(tr, keys::TABLE_ROW_WITHIN_ONE_DAY, &costs.within_one_day),
            tr.t(keys::TABLE_COL_TRIPS),
            costs.trips_per_day
        ),
        format!("-- {} --", tr.t(keys::TABLE_UNIT_HEADING)),
        unit_row(tr, keys::TABLE_ROW_OVER_ONE_DAY, &costs.over_one_day),
        unit_row(tr, keys::TABLE_ROW_WITHIN_ONE_DAY, &costs.within_one_day),
    ];
    lines.extend(
        costs
            .warnings
            .iter()
            .map(|w| format!("! {}", tr.t(warning_key(*w)))),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(148000.0), "¥148000.00");
        assert_eq!(format_money(1.5), "¥1.50");
        assert_eq!(format_money(f64::NAN), "¥0.00");
    }

    #[test]
    fn result_lines_are_localized() {
        let record = crate::engine::derive_all(&FreightInput::default());
        let tr = Translator::new("zh");
        let lines = format_result(&record, 0.0, &tr);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "固定成本: ¥148000.00/年");
        assert_eq!(lines[3], "运输成本: ¥0.00");
    }
}
