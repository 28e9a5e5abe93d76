//! 입력 필드 검증. 계산에는 영향을 주지 않고 메시지만 만든다.

use std::collections::BTreeMap;

use crate::i18n::{keys, Translator};
use crate::model::{Field, FreightInput, UnknownVehicleType, VehicleType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Negative,
    NotFinite,
    UnknownVehicleType,
}

/// 점 표기 경로로 식별되는 필드 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: &'static str,
    pub kind: FieldErrorKind,
}

/// 파생 필드를 제외한 숫자 필드를 검사한다.
pub fn validate(record: &FreightInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for field in Field::ALL.iter().filter(|f| !f.is_derived()) {
        // 비어 있는 실제 적재량은 허용한다
        if *field == Field::ActualLoad && record.transport_params.actual_load.is_none() {
            continue;
        }
        let value = field.get(record);
        let kind = if !value.is_finite() {
            FieldErrorKind::NotFinite
        } else if value < 0.0 {
            FieldErrorKind::Negative
        } else {
            continue;
        };
        errors.push(FieldError {
            path: field.path(),
            kind,
        });
    }
    errors
}

/// 차종 문자열을 해석한다. 알 수 없으면 필드 오류.
pub fn parse_vehicle_type(input: &str) -> Result<VehicleType, FieldError> {
    input.parse().map_err(|_: UnknownVehicleType| FieldError {
        path: "vehicleParams.vehicleType",
        kind: FieldErrorKind::UnknownVehicleType,
    })
}

/// 필드 경로 → 번역된 메시지.
pub fn messages(errors: &[FieldError], tr: &Translator) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|e| {
            let key = match e.kind {
                FieldErrorKind::Negative => keys::VALIDATION_NEGATIVE,
                FieldErrorKind::NotFinite => keys::VALIDATION_NOT_FINITE,
                FieldErrorKind::UnknownVehicleType => keys::VALIDATION_UNKNOWN_VEHICLE_TYPE,
            };
            (e.path.to_string(), tr.t(key).into_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::derive_all;

    #[test]
    fn default_record_is_valid() {
        assert!(validate(&derive_all(&FreightInput::default())).is_empty());
    }

    #[test]
    fn reports_negative_and_non_finite_by_path() {
        let mut record = FreightInput::default();
        record.fixed_costs.vehicle_price = -1.0;
        record.transport_params.distance = f64::INFINITY;
        let errors = validate(&record);
        assert_eq!(
            errors,
            vec![
                FieldError {
                    path: "fixedCosts.vehiclePrice",
                    kind: FieldErrorKind::Negative
                },
                FieldError {
                    path: "transportParams.distance",
                    kind: FieldErrorKind::NotFinite
                },
            ]
        );
        let msgs = messages(&errors, &Translator::new("en"));
        assert_eq!(msgs["fixedCosts.vehiclePrice"], "Enter a value of 0 or more.");
    }

    #[test]
    fn rejects_unknown_vehicle_type() {
        assert_eq!(parse_vehicle_type("9.6m"), Ok(VehicleType::Length9m6));
        assert_eq!(
            parse_vehicle_type("").unwrap_err().kind,
            FieldErrorKind::UnknownVehicleType
        );
    }
}
