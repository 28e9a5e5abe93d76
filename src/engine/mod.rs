//! 도로 화물 운임 계산 엔진. 입출력이 없는 순수 함수만 둔다.

pub mod derive;
pub mod format;
pub mod trip_cost;

pub use derive::{apply_vehicle_type, derive, derive_all, set_field, DERIVATIONS};
pub use format::{build_result, format_money, format_result, headline_transport_cost, regime_table};
pub use trip_cost::{
    compute_trip_costs, unit_prices, PerTonBasis, RegimeCost, TripCostWarning, TripCosts,
    UnitPriceInput, UnitPrices,
};
