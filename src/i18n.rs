use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;

use crate::model::Field;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_VEHICLE: &str = "main_menu.vehicle";
    pub const MAIN_MENU_EDIT: &str = "main_menu.edit";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_SAVE: &str = "main_menu.save";
    pub const MAIN_MENU_HISTORY: &str = "main_menu.history";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const VEHICLE_HEADING: &str = "vehicle.heading";
    pub const VEHICLE_OPTIONS: &str = "vehicle.options";
    pub const VEHICLE_PROMPT_BRAND: &str = "vehicle.prompt_brand";
    pub const VEHICLE_APPLIED: &str = "vehicle.applied";

    pub const EDIT_HEADING: &str = "edit.heading";
    pub const EDIT_PROMPT_FIELD: &str = "edit.prompt_field";
    pub const EDIT_PROMPT_VALUE: &str = "edit.prompt_value";
    pub const EDIT_DERIVED_READONLY: &str = "edit.derived_readonly";

    pub const SECTION_VEHICLE: &str = "section.vehicle";
    pub const SECTION_FIXED: &str = "section.fixed";
    pub const SECTION_VARIABLE: &str = "section.variable";
    pub const SECTION_TRANSPORT: &str = "section.transport";

    pub const FIELD_BRAND: &str = "field.vehicleParams.brand";
    pub const FIELD_VEHICLE_TYPE: &str = "field.vehicleParams.vehicleType";

    pub const TABLE_TRIP_HEADING: &str = "table.trip_heading";
    pub const TABLE_COL_FIXED: &str = "table.col_fixed";
    pub const TABLE_COL_VARIABLE: &str = "table.col_variable";
    pub const TABLE_COL_PROFIT: &str = "table.col_profit";
    pub const TABLE_COL_TOTAL: &str = "table.col_total";
    pub const TABLE_COL_ADJUSTMENT: &str = "table.col_adjustment";
    pub const TABLE_COL_TRIPS: &str = "table.col_trips";
    pub const TABLE_ROW_OVER_ONE_DAY: &str = "table.row_over_one_day";
    pub const TABLE_ROW_WITHIN_ONE_DAY: &str = "table.row_within_one_day";
    pub const TABLE_UNIT_HEADING: &str = "table.unit_heading";
    pub const UNIT_PER_KM: &str = "unit.per_km";
    pub const UNIT_PER_DAN: &str = "unit.per_dan";
    pub const UNIT_PER_TON_KM: &str = "unit.per_ton_km";
    pub const UNIT_PER_TON: &str = "unit.per_ton";
    pub const UNIT_PER_PIECE: &str = "unit.per_piece";
    pub const UNIT_PER_VOLUME: &str = "unit.per_volume";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_FIXED: &str = "result.fixed";
    pub const RESULT_VARIABLE: &str = "result.variable";
    pub const RESULT_PROFIT: &str = "result.profit";
    pub const RESULT_TRANSPORT: &str = "result.transport";
    pub const RESULT_SAVED: &str = "result.saved";
    pub const RESULT_NONE: &str = "result.none";

    pub const WARNING_ZERO_DISTANCE: &str = "warning.zero_distance";
    pub const WARNING_ZERO_WORKING_DAYS: &str = "warning.zero_working_days";
    pub const WARNING_ZERO_TRIPS_PER_DAY: &str = "warning.zero_trips_per_day";
    pub const WARNING_MISSING_ACTUAL_LOAD: &str = "warning.missing_actual_load";

    pub const VALIDATION_HEADING: &str = "validation.heading";
    pub const VALIDATION_NEGATIVE: &str = "validation.negative";
    pub const VALIDATION_NOT_FINITE: &str = "validation.not_finite";
    pub const VALIDATION_UNKNOWN_VEHICLE_TYPE: &str = "validation.unknown_vehicle_type";

    pub const HISTORY_HEADING: &str = "history.heading";
    pub const HISTORY_EMPTY: &str = "history.empty";
    pub const HISTORY_PROMPT_FROM: &str = "history.prompt_from";
    pub const HISTORY_PROMPT_TO: &str = "history.prompt_to";
    pub const HISTORY_PROMPT_MODE: &str = "history.prompt_mode";
    pub const HISTORY_ENTRY: &str = "history.entry";
    pub const HISTORY_PROMPT_DETAIL: &str = "history.prompt_detail";
    pub const HISTORY_DETAIL_TIME: &str = "history.detail_time";
    pub const HISTORY_CLEARED: &str = "history.cleared";
    pub const HISTORY_PRUNED: &str = "history.pruned";
    pub const HISTORY_INVALID_DATE: &str = "history.invalid_date";

    pub const MODE_LAND: &str = "mode.land";
    pub const MODE_AIR: &str = "mode.air";
    pub const MODE_SEA: &str = "mode.sea";
    pub const MODE_ALL: &str = "mode.all";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_RATES_HEADING: &str = "settings.rates_heading";
    pub const SETTINGS_RATE_LAND: &str = "settings.rate_land";
    pub const SETTINGS_RATE_AIR: &str = "settings.rate_air";
    pub const SETTINGS_RATE_SEA: &str = "settings.rate_sea";
    pub const SETTINGS_RATE_URGENT: &str = "settings.rate_urgent";
    pub const SETTINGS_RATE_INSURANCE: &str = "settings.rate_insurance";
    pub const SETTINGS_RATE_COLD: &str = "settings.rate_cold";
    pub const SETTINGS_DEFAULT_METHOD: &str = "settings.default_method";
    pub const SETTINGS_HISTORY_RETENTION: &str = "settings.history_retention";
    pub const SETTINGS_PER_TON_BASIS: &str = "settings.per_ton_basis";
    pub const SETTINGS_BASIS_LOADING_WEIGHT: &str = "settings.basis_loading_weight";
    pub const SETTINGS_BASIS_ACTUAL_LOAD: &str = "settings.basis_actual_load";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_PROMPT_KEEP: &str = "settings.prompt_keep";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Zh,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("zh") {
            Language::Zh
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/zh)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 언어팩만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 해당 언어 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> Cow<'_, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Borrowed(v.as_str());
        }
        let built_in = match self.lang {
            Language::Ko => ko(key),
            Language::Zh => zh(key),
            Language::En => None,
        };
        Cow::Borrowed(
            built_in
                .or_else(|| en(key))
                .unwrap_or("[missing translation]"),
        )
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }

    /// 입력 필드 라벨.
    pub fn field_label(&self, field: Field) -> Cow<'_, str> {
        self.t(&format!("field.{}", field.path()))
    }
}

/// `{key}` 형태의 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "zh" | "zh-cn" | "zh-hans" => Some("zh-cn".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("zh") => Some("zh-cn".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        "zh" => Some("zh-cn".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., zh-cn)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., zh)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(GUI 문자열). 파일이 없어도 동작하도록 빌드 시 포함한다.
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        "zh-cn" | "zh" => parse_toml_to_map(include_str!("../locales/zh-cn.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 화물 운임 계산기 (도로) ===",
        MAIN_MENU_VEHICLE => "1) 차종 선택",
        MAIN_MENU_EDIT => "2) 입력값 수정",
        MAIN_MENU_CALCULATE => "3) 운임 계산",
        MAIN_MENU_SAVE => "4) 계산 기록 저장",
        MAIN_MENU_HISTORY => "5) 계산 기록 보기",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        VEHICLE_HEADING => "\n-- 차종 선택 --",
        VEHICLE_OPTIONS => "1) 9.6m (3축)  2) 17.5m (6축)  3) 기타 차종",
        VEHICLE_PROMPT_BRAND => "브랜드 (엔터=유지): ",
        VEHICLE_APPLIED => "차종 프리셋을 적용했습니다:",
        EDIT_HEADING => "\n-- 입력값 수정 --",
        EDIT_PROMPT_FIELD => "수정할 항목 번호 (엔터=완료): ",
        EDIT_PROMPT_VALUE => "새 값: ",
        EDIT_DERIVED_READONLY => "자동 계산 항목이라 수정할 수 없습니다.",
        SECTION_VEHICLE => "[차량 정보]",
        SECTION_FIXED => "[고정비]",
        SECTION_VARIABLE => "[변동비]",
        SECTION_TRANSPORT => "[운송 조건]",
        FIELD_BRAND => "브랜드",
        FIELD_VEHICLE_TYPE => "차종",
        "field.vehicleParams.axleCount" => "차축 수",
        "field.vehicleParams.loadCapacity" => "적재 톤수 [t]",
        "field.fixedCosts.vehiclePrice" => "차량 구입가 [¥]",
        "field.fixedCosts.serviceLife" => "사용 연한 [년]",
        "field.fixedCosts.depreciation" => "감가상각비 [¥/년]",
        "field.fixedCosts.driverSalary" => "기사 급여 [¥/년]",
        "field.fixedCosts.repairFee" => "수리비 [¥/년]",
        "field.fixedCosts.vehicleInsurance" => "차량 보험료 [¥/년]",
        "field.fixedCosts.otherFixedCosts" => "기타 고정비 [¥/년]",
        "field.fixedCosts.totalFixedCost" => "고정비 합계 [¥/년]",
        "field.variableCosts.fuelPrice" => "유가 [¥/L]",
        "field.variableCosts.fuelConsumption" => "연비 [L/100km]",
        "field.variableCosts.fuelCost" => "유류비 [¥/km]",
        "field.variableCosts.tireCost" => "타이어비 [¥/km]",
        "field.variableCosts.tollFee" => "통행료 [¥/km]",
        "field.variableCosts.maintenanceFee" => "정비비 [¥/km]",
        "field.variableCosts.otherVariableCosts" => "기타 변동비 [¥/km]",
        "field.variableCosts.totalVariableCost" => "변동비 합계 [¥/km]",
        "field.variableCosts.expectedProfit" => "기대이익 [¥/년]",
        "field.transportParams.distance" => "운송 거리 [km]",
        "field.transportParams.loadingUnloadingTime" => "상하차 시간 [일]",
        "field.transportParams.estimatedDailyMileage" => "일 주행거리 [km/일]",
        "field.transportParams.estimatedAnnualOneWayMileage" => "연간 편도 주행거리 [km/년]",
        "field.transportParams.estimatedTime" => "회당 소요일 [일/회]",
        "field.transportParams.workingDays" => "연간 영업일 [일/년]",
        "field.transportParams.benchmarkDistance" => "기준 운송거리 [km]",
        "field.transportParams.adjustmentFactor1" => "조정계수 (>1일/회)",
        "field.transportParams.adjustmentFactor2" => "조정계수 (≤1일/회)",
        "field.transportParams.tripsPerDay" => "일 운행 횟수 (≤1일/회)",
        "field.transportParams.loadingWeight" => "적재 중량 [t]",
        "field.transportParams.loadingQuantity" => "적재 수량 [개]",
        "field.transportParams.loadingVolume" => "적재 부피 [m³]",
        "field.transportParams.actualLoad" => "실제 적재량 [t]",
        TABLE_TRIP_HEADING => "회당 운임",
        TABLE_COL_FIXED => "고정비",
        TABLE_COL_VARIABLE => "변동비",
        TABLE_COL_PROFIT => "이익",
        TABLE_COL_TOTAL => "합계",
        TABLE_COL_ADJUSTMENT => "조정계수",
        TABLE_COL_TRIPS => "회/일",
        TABLE_ROW_OVER_ONE_DAY => ">1일/회",
        TABLE_ROW_WITHIN_ONE_DAY => "≤1일/회",
        TABLE_UNIT_HEADING => "단위 운임",
        UNIT_PER_KM => "¥/km",
        UNIT_PER_DAN => "¥/담",
        UNIT_PER_TON_KM => "¥/t·km",
        UNIT_PER_TON => "¥/t",
        UNIT_PER_PIECE => "¥/개",
        UNIT_PER_VOLUME => "¥/m³",
        RESULT_HEADING => "계산 결과",
        RESULT_FIXED => "고정비: {amount}/년",
        RESULT_VARIABLE => "변동비: {amount}/km",
        RESULT_PROFIT => "기대이익: {amount}/년",
        RESULT_TRANSPORT => "운송비: {amount}",
        RESULT_SAVED => "기록을 저장했습니다.",
        RESULT_NONE => "먼저 운임을 계산하세요.",
        WARNING_ZERO_DISTANCE => "운송 거리가 0이라 km당 단가를 0으로 표시합니다.",
        WARNING_ZERO_WORKING_DAYS => "영업일이 0이라 ≤1일/회 고정비와 이익을 0으로 표시합니다.",
        WARNING_ZERO_TRIPS_PER_DAY => "일 운행 횟수가 0이라 ≤1일/회 고정비와 이익을 0으로 표시합니다.",
        WARNING_MISSING_ACTUAL_LOAD => "실제 적재량이 없어 ≤1일/회 톤당 단가를 0으로 표시합니다.",
        VALIDATION_HEADING => "입력 확인:",
        VALIDATION_NEGATIVE => "0 이상의 값을 입력하세요.",
        VALIDATION_NOT_FINITE => "올바른 숫자가 아닙니다.",
        VALIDATION_UNKNOWN_VEHICLE_TYPE => "차종을 선택하세요.",
        HISTORY_HEADING => "\n-- 계산 기록 --",
        HISTORY_EMPTY => "저장된 기록이 없습니다.",
        HISTORY_PROMPT_FROM => "시작일 YYYY-MM-DD (엔터=제한 없음): ",
        HISTORY_PROMPT_TO => "종료일 YYYY-MM-DD (엔터=제한 없음): ",
        HISTORY_PROMPT_MODE => "운송 수단 0=전체 1=육운 2=항공 3=해운: ",
        HISTORY_ENTRY => "{index}) {time} · {mode} · 차종 {vehicle} · 거리 {distance}km · {total}",
        HISTORY_PROMPT_DETAIL => "상세 보기 번호 (엔터=돌아가기): ",
        HISTORY_DETAIL_TIME => "계산 시각:",
        HISTORY_CLEARED => "기록을 모두 삭제했습니다.",
        HISTORY_PRUNED => "보관 기간이 지난 기록을 삭제했습니다:",
        HISTORY_INVALID_DATE => "날짜 형식이 올바르지 않습니다 (YYYY-MM-DD).",
        MODE_LAND => "육운",
        MODE_AIR => "항공",
        MODE_SEA => "해운",
        MODE_ALL => "전체",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_OPTIONS => "1) 요율  2) 기본 운송 수단  3) 기록 보관 기간  4) 톤당 단가 기준  5) 언어",
        SETTINGS_RATES_HEADING => "요율 설정",
        SETTINGS_RATE_LAND => "육운 요율 [¥/kg·km]",
        SETTINGS_RATE_AIR => "항공 요율 [¥/kg·km]",
        SETTINGS_RATE_SEA => "해운 요율 [¥/kg·km]",
        SETTINGS_RATE_URGENT => "긴급 할증률",
        SETTINGS_RATE_INSURANCE => "보험 요율",
        SETTINGS_RATE_COLD => "냉장 할증률",
        SETTINGS_DEFAULT_METHOD => "기본 운송 수단",
        SETTINGS_HISTORY_RETENTION => "기록 보관 기간 [일]",
        SETTINGS_PER_TON_BASIS => "≤1일/회 톤당 단가 기준",
        SETTINGS_BASIS_LOADING_WEIGHT => "적재 중량",
        SETTINGS_BASIS_ACTUAL_LOAD => "실제 적재량 (구버전)",
        SETTINGS_LANGUAGE => "언어 (auto/ko/en/zh)",
        SETTINGS_PROMPT_KEEP => " (엔터=유지): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Freight Cost Calculator (Road) ===",
        MAIN_MENU_VEHICLE => "1) Select vehicle type",
        MAIN_MENU_EDIT => "2) Edit inputs",
        MAIN_MENU_CALCULATE => "3) Calculate freight",
        MAIN_MENU_SAVE => "4) Save record",
        MAIN_MENU_HISTORY => "5) History",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        VEHICLE_HEADING => "\n-- Vehicle Type --",
        VEHICLE_OPTIONS => "1) 9.6m (3 axles)  2) 17.5m (6 axles)  3) Other",
        VEHICLE_PROMPT_BRAND => "Brand (enter to keep): ",
        VEHICLE_APPLIED => "Vehicle preset applied:",
        EDIT_HEADING => "\n-- Edit Inputs --",
        EDIT_PROMPT_FIELD => "Item number to edit (enter to finish): ",
        EDIT_PROMPT_VALUE => "New value: ",
        EDIT_DERIVED_READONLY => "This item is calculated automatically and cannot be edited.",
        SECTION_VEHICLE => "[Vehicle]",
        SECTION_FIXED => "[Fixed costs]",
        SECTION_VARIABLE => "[Variable costs]",
        SECTION_TRANSPORT => "[Transport]",
        FIELD_BRAND => "Brand",
        FIELD_VEHICLE_TYPE => "Vehicle type",
        "field.vehicleParams.axleCount" => "Axle count",
        "field.vehicleParams.loadCapacity" => "Load capacity [t]",
        "field.fixedCosts.vehiclePrice" => "Vehicle price [¥]",
        "field.fixedCosts.serviceLife" => "Service life [years]",
        "field.fixedCosts.depreciation" => "Depreciation [¥/year]",
        "field.fixedCosts.driverSalary" => "Driver salary [¥/year]",
        "field.fixedCosts.repairFee" => "Repair fee [¥/year]",
        "field.fixedCosts.vehicleInsurance" => "Vehicle insurance [¥/year]",
        "field.fixedCosts.otherFixedCosts" => "Other fixed costs [¥/year]",
        "field.fixedCosts.totalFixedCost" => "Total fixed cost [¥/year]",
        "field.variableCosts.fuelPrice" => "Fuel price [¥/L]",
        "field.variableCosts.fuelConsumption" => "Fuel consumption [L/100km]",
        "field.variableCosts.fuelCost" => "Fuel cost [¥/km]",
        "field.variableCosts.tireCost" => "Tire cost [¥/km]",
        "field.variableCosts.tollFee" => "Toll fee [¥/km]",
        "field.variableCosts.maintenanceFee" => "Maintenance fee [¥/km]",
        "field.variableCosts.otherVariableCosts" => "Other variable costs [¥/km]",
        "field.variableCosts.totalVariableCost" => "Total variable cost [¥/km]",
        "field.variableCosts.expectedProfit" => "Expected profit [¥/year]",
        "field.transportParams.distance" => "Distance [km]",
        "field.transportParams.loadingUnloadingTime" => "Loading/unloading time [days]",
        "field.transportParams.estimatedDailyMileage" => "Daily mileage [km/day]",
        "field.transportParams.estimatedAnnualOneWayMileage" => "Annual one-way mileage [km/year]",
        "field.transportParams.estimatedTime" => "Estimated time [days/trip]",
        "field.transportParams.workingDays" => "Working days [days/year]",
        "field.transportParams.benchmarkDistance" => "Benchmark distance [km]",
        "field.transportParams.adjustmentFactor1" => "Adjustment factor (>1 day/trip)",
        "field.transportParams.adjustmentFactor2" => "Adjustment factor (≤1 day/trip)",
        "field.transportParams.tripsPerDay" => "Trips per day (≤1 day/trip)",
        "field.transportParams.loadingWeight" => "Loading weight [t]",
        "field.transportParams.loadingQuantity" => "Loading quantity [pcs]",
        "field.transportParams.loadingVolume" => "Loading volume [m³]",
        "field.transportParams.actualLoad" => "Actual load [t]",
        TABLE_TRIP_HEADING => "Per-trip cost",
        TABLE_COL_FIXED => "Fixed",
        TABLE_COL_VARIABLE => "Variable",
        TABLE_COL_PROFIT => "Profit",
        TABLE_COL_TOTAL => "Total",
        TABLE_COL_ADJUSTMENT => "Factor",
        TABLE_COL_TRIPS => "Trips/day",
        TABLE_ROW_OVER_ONE_DAY => ">1 day/trip",
        TABLE_ROW_WITHIN_ONE_DAY => "≤1 day/trip",
        TABLE_UNIT_HEADING => "Unit price",
        UNIT_PER_KM => "¥/km",
        UNIT_PER_DAN => "¥/dan",
        UNIT_PER_TON_KM => "¥/t·km",
        UNIT_PER_TON => "¥/t",
        UNIT_PER_PIECE => "¥/pc",
        UNIT_PER_VOLUME => "¥/m³",
        RESULT_HEADING => "Result",
        RESULT_FIXED => "Fixed cost: {amount}/year",
        RESULT_VARIABLE => "Variable cost: {amount}/km",
        RESULT_PROFIT => "Expected profit: {amount}/year",
        RESULT_TRANSPORT => "Transport cost: {amount}",
        RESULT_SAVED => "Record saved.",
        RESULT_NONE => "Calculate freight first.",
        WARNING_ZERO_DISTANCE => "Distance is 0; per-km prices are shown as 0.",
        WARNING_ZERO_WORKING_DAYS => "Working days is 0; ≤1 day/trip fixed cost and profit are shown as 0.",
        WARNING_ZERO_TRIPS_PER_DAY => "Trips per day is 0; ≤1 day/trip fixed cost and profit are shown as 0.",
        WARNING_MISSING_ACTUAL_LOAD => "Actual load is not set; ≤1 day/trip per-ton price is shown as 0.",
        VALIDATION_HEADING => "Please check:",
        VALIDATION_NEGATIVE => "Enter a value of 0 or more.",
        VALIDATION_NOT_FINITE => "Not a valid number.",
        VALIDATION_UNKNOWN_VEHICLE_TYPE => "Please select a vehicle type.",
        HISTORY_HEADING => "\n-- History --",
        HISTORY_EMPTY => "No saved records.",
        HISTORY_PROMPT_FROM => "Start date YYYY-MM-DD (enter for none): ",
        HISTORY_PROMPT_TO => "End date YYYY-MM-DD (enter for none): ",
        HISTORY_PROMPT_MODE => "Mode 0=all 1=land 2=air 3=sea: ",
        HISTORY_ENTRY => "{index}) {time} · {mode} · vehicle {vehicle} · distance {distance}km · {total}",
        HISTORY_PROMPT_DETAIL => "Record number for details (enter to go back): ",
        HISTORY_DETAIL_TIME => "Calculated at:",
        HISTORY_CLEARED => "All records deleted.",
        HISTORY_PRUNED => "Records past the retention period deleted:",
        HISTORY_INVALID_DATE => "Invalid date format (YYYY-MM-DD).",
        MODE_LAND => "Land",
        MODE_AIR => "Air",
        MODE_SEA => "Sea",
        MODE_ALL => "All",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_OPTIONS => "1) Rates  2) Default mode  3) History retention  4) Per-ton basis  5) Language",
        SETTINGS_RATES_HEADING => "Rates",
        SETTINGS_RATE_LAND => "Land rate [¥/kg·km]",
        SETTINGS_RATE_AIR => "Air rate [¥/kg·km]",
        SETTINGS_RATE_SEA => "Sea rate [¥/kg·km]",
        SETTINGS_RATE_URGENT => "Urgent surcharge",
        SETTINGS_RATE_INSURANCE => "Insurance rate",
        SETTINGS_RATE_COLD => "Cold-chain surcharge",
        SETTINGS_DEFAULT_METHOD => "Default transport mode",
        SETTINGS_HISTORY_RETENTION => "History retention [days]",
        SETTINGS_PER_TON_BASIS => "≤1 day/trip per-ton basis",
        SETTINGS_BASIS_LOADING_WEIGHT => "Loading weight",
        SETTINGS_BASIS_ACTUAL_LOAD => "Actual load (legacy)",
        SETTINGS_LANGUAGE => "Language (auto/ko/en/zh)",
        SETTINGS_PROMPT_KEEP => " (enter to keep): ",
        SETTINGS_INVALID => "Invalid input; unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

fn zh(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "错误",
        APP_EXIT => "程序已退出。",
        MAIN_MENU_TITLE => "\n=== 货运成本价格模型（公路） ===",
        MAIN_MENU_VEHICLE => "1) 选择车型",
        MAIN_MENU_EDIT => "2) 修改参数",
        MAIN_MENU_CALCULATE => "3) 计算运费",
        MAIN_MENU_SAVE => "4) 保存记录",
        MAIN_MENU_HISTORY => "5) 历史记录",
        MAIN_MENU_SETTINGS => "6) 设置",
        MAIN_MENU_EXIT => "0) 退出",
        PROMPT_MENU_SELECT => "请选择菜单: ",
        PROMPT_SELECT => "请选择: ",
        INVALID_SELECTION_RETRY => "输入无效，请重新选择。",
        ERROR_INVALID_NUMBER => "请输入数字。",
        VEHICLE_HEADING => "\n-- 选择车型 --",
        VEHICLE_OPTIONS => "1) 9.6米（3轴）  2) 17.5米（6轴）  3) 其他车型",
        VEHICLE_PROMPT_BRAND => "品牌（回车保持不变）: ",
        VEHICLE_APPLIED => "已应用车型默认值:",
        EDIT_HEADING => "\n-- 修改参数 --",
        EDIT_PROMPT_FIELD => "要修改的项目编号（回车结束）: ",
        EDIT_PROMPT_VALUE => "新值: ",
        EDIT_DERIVED_READONLY => "该项目为自动计算，不能修改。",
        SECTION_VEHICLE => "[车辆参数]",
        SECTION_FIXED => "[固定成本]",
        SECTION_VARIABLE => "[变动成本]",
        SECTION_TRANSPORT => "[运输参数]",
        FIELD_BRAND => "品牌",
        FIELD_VEHICLE_TYPE => "车型",
        "field.vehicleParams.axleCount" => "整车轴数",
        "field.vehicleParams.loadCapacity" => "荷载吨位（吨）",
        "field.fixedCosts.vehiclePrice" => "购车金额（元）",
        "field.fixedCosts.serviceLife" => "使用年限（年）",
        "field.fixedCosts.depreciation" => "折旧（元/年）",
        "field.fixedCosts.driverSalary" => "司机薪酬（元/年）",
        "field.fixedCosts.repairFee" => "维修费（元/年）",
        "field.fixedCosts.vehicleInsurance" => "车辆保险费（元/年）",
        "field.fixedCosts.otherFixedCosts" => "其他固定成本（元/年）",
        "field.fixedCosts.totalFixedCost" => "固定成本总和（元/年）",
        "field.variableCosts.fuelPrice" => "油价（元/升）",
        "field.variableCosts.fuelConsumption" => "油耗（升/百公里）",
        "field.variableCosts.fuelCost" => "油费（元/公里）",
        "field.variableCosts.tireCost" => "轮胎（元/公里）",
        "field.variableCosts.tollFee" => "路桥费（元/公里）",
        "field.variableCosts.maintenanceFee" => "保养费（元/公里）",
        "field.variableCosts.otherVariableCosts" => "其他变动成本（元/公里）",
        "field.variableCosts.totalVariableCost" => "变动成本总和（元/公里）",
        "field.variableCosts.expectedProfit" => "期望利润（元/年）",
        "field.transportParams.distance" => "运距（公里）",
        "field.transportParams.loadingUnloadingTime" => "装卸货时间（天）",
        "field.transportParams.estimatedDailyMileage" => "预计行驶里程（公里/天）",
        "field.transportParams.estimatedAnnualOneWayMileage" => "预计单边行驶里程（公里/年）",
        "field.transportParams.estimatedTime" => "预计总用时（天/趟）",
        "field.transportParams.workingDays" => "发货工作日（天/年）",
        "field.transportParams.benchmarkDistance" => "基准运距（公里）",
        "field.transportParams.adjustmentFactor1" => "调整系数（>1天/趟）",
        "field.transportParams.adjustmentFactor2" => "调整系数（≤1天/趟）",
        "field.transportParams.tripsPerDay" => "趟次/天（≤1天/趟）",
        "field.transportParams.loadingWeight" => "配载重量（吨）",
        "field.transportParams.loadingQuantity" => "配载数量（件）",
        "field.transportParams.loadingVolume" => "配载体积（方）",
        "field.transportParams.actualLoad" => "实际载重（吨）",
        TABLE_TRIP_HEADING => "单趟运费",
        TABLE_COL_FIXED => "固定成本",
        TABLE_COL_VARIABLE => "变动成本",
        TABLE_COL_PROFIT => "毛利",
        TABLE_COL_TOTAL => "合计",
        TABLE_COL_ADJUSTMENT => "调整系数",
        TABLE_COL_TRIPS => "趟次/天",
        TABLE_ROW_OVER_ONE_DAY => ">1天/趟",
        TABLE_ROW_WITHIN_ONE_DAY => "≤1天/趟",
        TABLE_UNIT_HEADING => "运输单价",
        UNIT_PER_KM => "元/公里",
        UNIT_PER_DAN => "元/担",
        UNIT_PER_TON_KM => "元/吨·公里",
        UNIT_PER_TON => "元/吨",
        UNIT_PER_PIECE => "元/件",
        UNIT_PER_VOLUME => "元/方",
        RESULT_HEADING => "计算结果",
        RESULT_FIXED => "固定成本: {amount}/年",
        RESULT_VARIABLE => "变动成本: {amount}/公里",
        RESULT_PROFIT => "期望利润: {amount}/年",
        RESULT_TRANSPORT => "运输成本: {amount}",
        RESULT_SAVED => "记录已保存",
        RESULT_NONE => "请先计算运费。",
        WARNING_ZERO_DISTANCE => "运距为 0，元/公里按 0 显示。",
        WARNING_ZERO_WORKING_DAYS => "发货工作日为 0，≤1天/趟的固定成本和毛利按 0 显示。",
        WARNING_ZERO_TRIPS_PER_DAY => "趟次/天为 0，≤1天/趟的固定成本和毛利按 0 显示。",
        WARNING_MISSING_ACTUAL_LOAD => "未填写实际载重，≤1天/趟的元/吨按 0 显示。",
        VALIDATION_HEADING => "请检查:",
        VALIDATION_NEGATIVE => "请输入不小于 0 的数值。",
        VALIDATION_NOT_FINITE => "不是有效的数字。",
        VALIDATION_UNKNOWN_VEHICLE_TYPE => "请选择车型",
        HISTORY_HEADING => "\n-- 历史记录 --",
        HISTORY_EMPTY => "暂无历史记录",
        HISTORY_PROMPT_FROM => "开始日期 YYYY-MM-DD（回车不限）: ",
        HISTORY_PROMPT_TO => "结束日期 YYYY-MM-DD（回车不限）: ",
        HISTORY_PROMPT_MODE => "运输方式 0=全部 1=陆运 2=空运 3=海运: ",
        HISTORY_ENTRY => "{index}) {time} · {mode} · 车型: {vehicle} · 距离: {distance}km · {total}",
        HISTORY_PROMPT_DETAIL => "查看详情编号（回车返回）: ",
        HISTORY_DETAIL_TIME => "计算时间:",
        HISTORY_CLEARED => "历史记录已清空",
        HISTORY_PRUNED => "已删除超过保留期限的记录:",
        HISTORY_INVALID_DATE => "日期格式无效（YYYY-MM-DD）。",
        MODE_LAND => "陆运",
        MODE_AIR => "空运",
        MODE_SEA => "海运",
        MODE_ALL => "全部",
        SETTINGS_HEADING => "\n-- 设置 --",
        SETTINGS_OPTIONS => "1) 计价规则  2) 默认运输方式  3) 历史记录保留天数  4) 元/吨计算依据  5) 语言",
        SETTINGS_RATES_HEADING => "计价规则设置",
        SETTINGS_RATE_LAND => "陆运单价（元/公斤·公里）",
        SETTINGS_RATE_AIR => "空运单价（元/公斤·公里）",
        SETTINGS_RATE_SEA => "海运单价（元/公斤·公里）",
        SETTINGS_RATE_URGENT => "加急费率",
        SETTINGS_RATE_INSURANCE => "保险费率",
        SETTINGS_RATE_COLD => "冷链费率",
        SETTINGS_DEFAULT_METHOD => "默认运输方式",
        SETTINGS_HISTORY_RETENTION => "历史记录保留天数",
        SETTINGS_PER_TON_BASIS => "≤1天/趟 元/吨计算依据",
        SETTINGS_BASIS_LOADING_WEIGHT => "配载重量",
        SETTINGS_BASIS_ACTUAL_LOAD => "实际载重（旧版）",
        SETTINGS_LANGUAGE => "语言（auto/ko/en/zh）",
        SETTINGS_PROMPT_KEEP => "（回车保持不变）: ",
        SETTINGS_INVALID => "输入无效，未修改。",
        SETTINGS_SAVED => "设置已保存",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_label_in_every_language() {
        for lang in ["ko", "en", "zh"] {
            let tr = Translator::new(lang);
            for field in Field::ALL {
                assert_ne!(tr.field_label(field), "[missing translation]", "{lang} {field}");
            }
        }
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::MODE_LAND), "Land");
    }

    #[test]
    fn normalizes_language_codes() {
        assert_eq!(resolve_language("zh", None), "zh-cn");
        assert_eq!(resolve_language("auto", Some("ko")), "ko-kr");
        assert_eq!(resolve_language("EN-UK", None), "en-us");
    }

    #[test]
    fn fills_placeholders() {
        let out = fill_template("{a} + {b}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(out, "1 + 2");
    }
}
