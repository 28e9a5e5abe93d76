use std::fmt;

use super::FreightInput;

/// 입력 레코드의 섹션 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Vehicle,
    Fixed,
    Variable,
    Transport,
}

/// 입력 레코드의 숫자 필드. 파생 엔진과 UI가 필드를 식별하는 데 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AxleCount,
    LoadCapacity,
    VehiclePrice,
    ServiceLife,
    Depreciation,
    DriverSalary,
    RepairFee,
    VehicleInsurance,
    OtherFixedCosts,
    TotalFixedCost,
    FuelPrice,
    FuelConsumption,
    FuelCost,
    TireCost,
    TollFee,
    MaintenanceFee,
    OtherVariableCosts,
    TotalVariableCost,
    ExpectedProfit,
    Distance,
    LoadingUnloadingTime,
    EstimatedDailyMileage,
    EstimatedAnnualOneWayMileage,
    EstimatedTime,
    WorkingDays,
    BenchmarkDistance,
    AdjustmentFactor1,
    AdjustmentFactor2,
    TripsPerDay,
    LoadingWeight,
    LoadingQuantity,
    LoadingVolume,
    ActualLoad,
}

impl Field {
    /// 화면 표시 순서.
    pub const ALL: [Field; 33] = [
        Field::AxleCount,
        Field::LoadCapacity,
        Field::VehiclePrice,
        Field::ServiceLife,
        Field::Depreciation,
        Field::DriverSalary,
        Field::RepairFee,
        Field::VehicleInsurance,
        Field::OtherFixedCosts,
        Field::TotalFixedCost,
        Field::FuelPrice,
        Field::FuelConsumption,
        Field::FuelCost,
        Field::TireCost,
        Field::TollFee,
        Field::MaintenanceFee,
        Field::OtherVariableCosts,
        Field::TotalVariableCost,
        Field::ExpectedProfit,
        Field::Distance,
        Field::LoadingUnloadingTime,
        Field::EstimatedDailyMileage,
        Field::EstimatedAnnualOneWayMileage,
        Field::EstimatedTime,
        Field::WorkingDays,
        Field::BenchmarkDistance,
        Field::AdjustmentFactor1,
        Field::AdjustmentFactor2,
        Field::TripsPerDay,
        Field::LoadingWeight,
        Field::LoadingQuantity,
        Field::LoadingVolume,
        Field::ActualLoad,
    ];

    /// 직렬화 키와 같은 점 표기 경로 (예: `fixedCosts.vehiclePrice`).
    pub fn path(&self) -> &'static str {
        match self {
            Field::AxleCount => "vehicleParams.axleCount",
            Field::LoadCapacity => "vehicleParams.loadCapacity",
            Field::VehiclePrice => "fixedCosts.vehiclePrice",
            Field::ServiceLife => "fixedCosts.serviceLife",
            Field::Depreciation => "fixedCosts.depreciation",
            Field::DriverSalary => "fixedCosts.driverSalary",
            Field::RepairFee => "fixedCosts.repairFee",
            Field::VehicleInsurance => "fixedCosts.vehicleInsurance",
            Field::OtherFixedCosts => "fixedCosts.otherFixedCosts",
            Field::TotalFixedCost => "fixedCosts.totalFixedCost",
            Field::FuelPrice => "variableCosts.fuelPrice",
            Field::FuelConsumption => "variableCosts.fuelConsumption",
            Field::FuelCost => "variableCosts.fuelCost",
            Field::TireCost => "variableCosts.tireCost",
            Field::TollFee => "variableCosts.tollFee",
            Field::MaintenanceFee => "variableCosts.maintenanceFee",
            Field::OtherVariableCosts => "variableCosts.otherVariableCosts",
            Field::TotalVariableCost => "variableCosts.totalVariableCost",
            Field::ExpectedProfit => "variableCosts.expectedProfit",
            Field::Distance => "transportParams.distance",
            Field::LoadingUnloadingTime => "transportParams.loadingUnloadingTime",
            Field::EstimatedDailyMileage => "transportParams.estimatedDailyMileage",
            Field::EstimatedAnnualOneWayMileage => {
                "transportParams.estimatedAnnualOneWayMileage"
            }
            Field::EstimatedTime => "transportParams.estimatedTime",
            Field::WorkingDays => "transportParams.workingDays",
            Field::BenchmarkDistance => "transportParams.benchmarkDistance",
            Field::AdjustmentFactor1 => "transportParams.adjustmentFactor1",
            Field::AdjustmentFactor2 => "transportParams.adjustmentFactor2",
            Field::TripsPerDay => "transportParams.tripsPerDay",
            Field::LoadingWeight => "transportParams.loadingWeight",
            Field::LoadingQuantity => "transportParams.loadingQuantity",
            Field::LoadingVolume => "transportParams.loadingVolume",
            Field::ActualLoad => "transportParams.actualLoad",
        }
    }

    pub fn from_path(path: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.path() == path)
    }

    pub fn section(&self) -> Section {
        match self.path().split('.').next() {
            Some("vehicleParams") => Section::Vehicle,
            Some("fixedCosts") => Section::Fixed,
            Some("variableCosts") => Section::Variable,
            _ => Section::Transport,
        }
    }

    /// 파생 엔진이 계산하는 필드인지 여부. UI에서는 읽기 전용으로 표시한다.
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            Field::Depreciation
                | Field::TotalFixedCost
                | Field::FuelCost
                | Field::TotalVariableCost
                | Field::EstimatedTime
                | Field::BenchmarkDistance
        )
    }

    /// 필드 값을 읽는다. 비어 있는 `actualLoad`는 0으로 본다.
    pub fn get(&self, record: &FreightInput) -> f64 {
        let v = &record.vehicle_params;
        let fc = &record.fixed_costs;
        let vc = &record.variable_costs;
        let tp = &record.transport_params;
        match self {
            Field::AxleCount => v.axle_count as f64,
            Field::LoadCapacity => v.load_capacity,
            Field::VehiclePrice => fc.vehicle_price,
            Field::ServiceLife => fc.service_life,
            Field::Depreciation => fc.depreciation,
            Field::DriverSalary => fc.driver_salary,
            Field::RepairFee => fc.repair_fee,
            Field::VehicleInsurance => fc.vehicle_insurance,
            Field::OtherFixedCosts => fc.other_fixed_costs,
            Field::TotalFixedCost => fc.total_fixed_cost,
            Field::FuelPrice => vc.fuel_price,
            Field::FuelConsumption => vc.fuel_consumption,
            Field::FuelCost => vc.fuel_cost,
            Field::TireCost => vc.tire_cost,
            Field::TollFee => vc.toll_fee,
            Field::MaintenanceFee => vc.maintenance_fee,
            Field::OtherVariableCosts => vc.other_variable_costs,
            Field::TotalVariableCost => vc.total_variable_cost,
            Field::ExpectedProfit => vc.expected_profit,
            Field::Distance => tp.distance,
            Field::LoadingUnloadingTime => tp.loading_unloading_time,
            Field::EstimatedDailyMileage => tp.estimated_daily_mileage,
            Field::EstimatedAnnualOneWayMileage => tp.estimated_annual_one_way_mileage,
            Field::EstimatedTime => tp.estimated_time,
            Field::WorkingDays => tp.working_days,
            Field::BenchmarkDistance => tp.benchmark_distance as f64,
            Field::AdjustmentFactor1 => tp.adjustment_factor1,
            Field::AdjustmentFactor2 => tp.adjustment_factor2,
            Field::TripsPerDay => tp.trips_per_day,
            Field::LoadingWeight => tp.loading_weight,
            Field::LoadingQuantity => tp.loading_quantity,
            Field::LoadingVolume => tp.loading_volume,
            Field::ActualLoad => tp.actual_load.unwrap_or(0.0),
        }
    }

    /// 필드 값을 쓴다. 정수 필드는 0 이상으로 반올림한다.
    pub fn set(&self, record: &mut FreightInput, value: f64) {
        let v = &mut record.vehicle_params;
        let fc = &mut record.fixed_costs;
        let vc = &mut record.variable_costs;
        let tp = &mut record.transport_params;
        match self {
            Field::AxleCount => v.axle_count = value.max(0.0).round() as u32,
            Field::LoadCapacity => v.load_capacity = value,
            Field::VehiclePrice => fc.vehicle_price = value,
            Field::ServiceLife => fc.service_life = value,
            Field::Depreciation => fc.depreciation = value,
            Field::DriverSalary => fc.driver_salary = value,
            Field::RepairFee => fc.repair_fee = value,
            Field::VehicleInsurance => fc.vehicle_insurance = value,
            Field::OtherFixedCosts => fc.other_fixed_costs = value,
            Field::TotalFixedCost => fc.total_fixed_cost = value,
            Field::FuelPrice => vc.fuel_price = value,
            Field::FuelConsumption => vc.fuel_consumption = value,
            Field::FuelCost => vc.fuel_cost = value,
            Field::TireCost => vc.tire_cost = value,
            Field::TollFee => vc.toll_fee = value,
            Field::MaintenanceFee => vc.maintenance_fee = value,
            Field::OtherVariableCosts => vc.other_variable_costs = value,
            Field::TotalVariableCost => vc.total_variable_cost = value,
            Field::ExpectedProfit => vc.expected_profit = value,
            Field::Distance => tp.distance = value,
            Field::LoadingUnloadingTime => tp.loading_unloading_time = value,
            Field::EstimatedDailyMileage => tp.estimated_daily_mileage = value,
            Field::EstimatedAnnualOneWayMileage => tp.estimated_annual_one_way_mileage = value,
            Field::EstimatedTime => tp.estimated_time = value,
            Field::WorkingDays => tp.working_days = value,
            Field::BenchmarkDistance => tp.benchmark_distance = value.max(0.0).round() as u64,
            Field::AdjustmentFactor1 => tp.adjustment_factor1 = value,
            Field::AdjustmentFactor2 => tp.adjustment_factor2 = value,
            Field::TripsPerDay => tp.trips_per_day = value,
            Field::LoadingWeight => tp.loading_weight = value,
            Field::LoadingQuantity => tp.loading_quantity = value,
            Field::LoadingVolume => tp.loading_volume = value,
            Field::ActualLoad => tp.actual_load = Some(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique_and_resolvable() {
        for field in Field::ALL {
            assert_eq!(Field::from_path(field.path()), Some(field));
        }
        assert_eq!(Field::from_path("fixedCosts.unknown"), None);
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut record = FreightInput::default();
        for field in Field::ALL {
            field.set(&mut record, 42.0);
            assert_eq!(field.get(&record), 42.0, "{field}");
        }
    }

    #[test]
    fn integer_fields_clamp_negative_values() {
        let mut record = FreightInput::default();
        Field::BenchmarkDistance.set(&mut record, -3.0);
        Field::AxleCount.set(&mut record, 2.6);
        assert_eq!(record.transport_params.benchmark_distance, 0);
        assert_eq!(record.vehicle_params.axle_count, 3);
    }

    #[test]
    fn sections_follow_path_prefix() {
        assert_eq!(Field::AxleCount.section(), Section::Vehicle);
        assert_eq!(Field::TotalFixedCost.section(), Section::Fixed);
        assert_eq!(Field::ExpectedProfit.section(), Section::Variable);
        assert_eq!(Field::ActualLoad.section(), Section::Transport);
    }
}
