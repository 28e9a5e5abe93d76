use std::io::{self, Write};

use chrono::{Local, NaiveDate};

use crate::app::{AppError, Quote};
use crate::config::Config;
use crate::engine::{self, PerTonBasis};
use crate::i18n::{keys, Translator};
use crate::model::{Field, FreightInput, Section, TransportMode, VehicleType};
use crate::storage::{HistoryFilter, HistoryRecord, HistoryRepository, Settings, SettingsRepository};
use crate::validation::{self, FieldError};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Vehicle,
    Edit,
    Calculate,
    Save,
    History,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_VEHICLE,
        keys::MAIN_MENU_EDIT,
        keys::MAIN_MENU_CALCULATE,
        keys::MAIN_MENU_SAVE,
        keys::MAIN_MENU_HISTORY,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Vehicle),
            "2" => return Ok(MenuChoice::Edit),
            "3" => return Ok(MenuChoice::Calculate),
            "4" => return Ok(MenuChoice::Save),
            "5" => return Ok(MenuChoice::History),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 차종을 선택해 프리셋을 적용한다. 브랜드는 선택 후 바꿀 수 있다.
pub fn select_vehicle(tr: &Translator, record: &FreightInput) -> Result<FreightInput, AppError> {
    println!("{}", tr.t(keys::VEHICLE_HEADING));
    println!("{}", tr.t(keys::VEHICLE_OPTIONS));
    let vehicle_type = loop {
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => break VehicleType::Length9m6,
            "2" => break VehicleType::Length17m5,
            "3" => break VehicleType::Other,
            "" => return Ok(record.clone()),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let mut next = engine::apply_vehicle_type(record, vehicle_type);
    let brand = read_line(&tr.t(keys::VEHICLE_PROMPT_BRAND))?;
    if !brand.trim().is_empty() {
        next.vehicle_params.brand = brand.trim().to_string();
    }
    println!("{} {}", tr.t(keys::VEHICLE_APPLIED), vehicle_type);
    print_record(tr, &next);
    Ok(next)
}

/// 번호로 필드를 골라 값을 바꾼다. 빈 입력이면 끝낸다.
pub fn edit_fields(tr: &Translator, record: &FreightInput) -> Result<FreightInput, AppError> {
    let mut next = record.clone();
    println!("{}", tr.t(keys::EDIT_HEADING));
    loop {
        print_record(tr, &next);
        let sel = read_line(&tr.t(keys::EDIT_PROMPT_FIELD))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(next);
        }
        let field = match sel.parse::<usize>() {
            Ok(n) if (1..=Field::ALL.len()).contains(&n) => Field::ALL[n - 1],
            _ => {
                println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                continue;
            }
        };
        if field.is_derived() {
            println!("{}", tr.t(keys::EDIT_DERIVED_READONLY));
            continue;
        }
        let value = read_f64(tr, &format!("{} - {}", tr.field_label(field), tr.t(keys::EDIT_PROMPT_VALUE)))?;
        next = engine::set_field(&next, field, value);
    }
}

fn section_key(section: Section) -> &'static str {
    match section {
        Section::Vehicle => keys::SECTION_VEHICLE,
        Section::Fixed => keys::SECTION_FIXED,
        Section::Variable => keys::SECTION_VARIABLE,
        Section::Transport => keys::SECTION_TRANSPORT,
    }
}

/// 소수점 아래 불필요한 0을 지운 표시용 숫자.
pub fn trim_number(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn field_value(record: &FreightInput, field: Field) -> String {
    if field == Field::ActualLoad && record.transport_params.actual_load.is_none() {
        return "-".to_string();
    }
    trim_number(field.get(record))
}

/// 입력 레코드를 섹션별 번호 목록으로 출력한다. 자동 계산 항목은 `*` 표시.
pub fn print_record(tr: &Translator, record: &FreightInput) {
    println!(
        "{}: {}  {}: {}",
        tr.t(keys::FIELD_VEHICLE_TYPE),
        record.vehicle_params.vehicle_type,
        tr.t(keys::FIELD_BRAND),
        record.vehicle_params.brand
    );
    let mut current: Option<Section> = None;
    for (i, field) in Field::ALL.iter().enumerate() {
        if current != Some(field.section()) {
            current = Some(field.section());
            println!("{}", tr.t(section_key(field.section())));
        }
        let mark = if field.is_derived() { "*" } else { " " };
        println!(
            "{:>3}){mark} {}: {}",
            i + 1,
            tr.field_label(*field),
            field_value(record, *field)
        );
    }
}

pub fn print_validation(tr: &Translator, errors: &[FieldError]) {
    println!("{}", tr.t(keys::VALIDATION_HEADING));
    for (path, msg) in validation::messages(errors, tr) {
        let label = Field::from_path(&path)
            .map(|f| tr.field_label(f).into_owned())
            .unwrap_or(path);
        println!("  - {label}: {msg}");
    }
}

/// 운임 표와 요약 4줄을 출력한다.
pub fn print_quote(tr: &Translator, quote: &Quote) {
    println!("\n== {} ==", tr.t(keys::RESULT_HEADING));
    for line in engine::regime_table(&quote.trip_costs, tr) {
        println!("{line}");
    }
    println!();
    for line in &quote.result.details {
        println!("{line}");
    }
}

fn mode_key(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Land => keys::MODE_LAND,
        TransportMode::Air => keys::MODE_AIR,
        TransportMode::Sea => keys::MODE_SEA,
    }
}

/// 기록 목록 한 줄. 번호는 전체 목록 기준 1부터.
pub fn history_line(tr: &Translator, index: usize, record: &HistoryRecord) -> String {
    tr.fill(
        keys::HISTORY_ENTRY,
        &[
            ("index", (index + 1).to_string()),
            (
                "time",
                record
                    .timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ),
            ("mode", tr.t(mode_key(record.transport_type)).into_owned()),
            ("vehicle", record.form_data.vehicle_params.vehicle_type.to_string()),
            (
                "distance",
                trim_number(record.form_data.transport_params.distance),
            ),
            ("total", engine::format_money(record.result.total_cost)),
        ],
    )
}

pub fn print_history_list(tr: &Translator, records: &[(usize, &HistoryRecord)]) {
    if records.is_empty() {
        println!("{}", tr.t(keys::HISTORY_EMPTY));
        return;
    }
    for (index, record) in records {
        println!("{}", history_line(tr, *index, record));
    }
}

pub fn print_record_detail(tr: &Translator, record: &HistoryRecord) {
    println!(
        "{} {}",
        tr.t(keys::HISTORY_DETAIL_TIME),
        record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );
    for line in &record.result.details {
        println!("  {line}");
    }
    print_record(tr, &record.form_data);
}

fn read_date(tr: &Translator, prompt: &str) -> Result<Option<NaiveDate>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => return Ok(Some(d)),
            Err(_) => println!("{}", tr.t(keys::HISTORY_INVALID_DATE)),
        }
    }
}

/// 조건을 입력받아 기록을 보여준다.
pub fn browse_history(tr: &Translator, repo: &dyn HistoryRepository) -> Result<(), AppError> {
    println!("{}", tr.t(keys::HISTORY_HEADING));
    let records = repo.list()?;
    if records.is_empty() {
        println!("{}", tr.t(keys::HISTORY_EMPTY));
        return Ok(());
    }
    let from = read_date(tr, &tr.t(keys::HISTORY_PROMPT_FROM))?;
    let to = read_date(tr, &tr.t(keys::HISTORY_PROMPT_TO))?;
    let mode = match read_line(&tr.t(keys::HISTORY_PROMPT_MODE))?.trim() {
        "1" => Some(TransportMode::Land),
        "2" => Some(TransportMode::Air),
        "3" => Some(TransportMode::Sea),
        _ => None,
    };
    let filter = HistoryFilter { from, to, mode };
    let matched = filter.apply(&records);
    print_history_list(tr, &matched);
    if matched.is_empty() {
        return Ok(());
    }
    loop {
        let sel = read_line(&tr.t(keys::HISTORY_PROMPT_DETAIL))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(());
        }
        match sel.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(i) if matched.iter().any(|(idx, _)| *idx == i) => {
                print_record_detail(tr, &records[i]);
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn basis_key(basis: PerTonBasis) -> &'static str {
    match basis {
        PerTonBasis::LoadingWeight => keys::SETTINGS_BASIS_LOADING_WEIGHT,
        PerTonBasis::ActualLoad => keys::SETTINGS_BASIS_ACTUAL_LOAD,
    }
}

pub fn print_settings(tr: &Translator, cfg: &Config, settings: &Settings) {
    println!("{}", tr.t(keys::SETTINGS_RATES_HEADING));
    let p = &settings.prices;
    for (key, value) in [
        (keys::SETTINGS_RATE_LAND, p.land),
        (keys::SETTINGS_RATE_AIR, p.air),
        (keys::SETTINGS_RATE_SEA, p.sea),
        (keys::SETTINGS_RATE_URGENT, p.urgent),
        (keys::SETTINGS_RATE_INSURANCE, p.insurance),
        (keys::SETTINGS_RATE_COLD, p.cold),
    ] {
        println!("  {}: {}", tr.t(key), trim_number(value));
    }
    println!(
        "{}: {}",
        tr.t(keys::SETTINGS_DEFAULT_METHOD),
        tr.t(mode_key(settings.preferences.default_method))
    );
    println!(
        "{}: {}",
        tr.t(keys::SETTINGS_HISTORY_RETENTION),
        settings.preferences.history_retention
    );
    println!(
        "{}: {}",
        tr.t(keys::SETTINGS_PER_TON_BASIS),
        tr.t(basis_key(cfg.per_ton_basis))
    );
    println!("{}: {}", tr.t(keys::SETTINGS_LANGUAGE), cfg.language);
}

/// 현재 값을 보여주고 새 값을 받는다. 빈 입력이나 잘못된 값이면 그대로 둔다.
fn prompt_keep<T: std::str::FromStr + std::fmt::Display>(
    tr: &Translator,
    label: &str,
    current: T,
) -> Result<T, AppError> {
    let s = read_line(&format!("{label} [{current}]{}", tr.t(keys::SETTINGS_PROMPT_KEEP)))?;
    let s = s.trim();
    if s.is_empty() {
        return Ok(current);
    }
    match s.parse::<T>() {
        Ok(v) => Ok(v),
        Err(_) => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(current)
        }
    }
}

fn non_negative(tr: &Translator, label: &str, current: f64) -> Result<f64, AppError> {
    let v = prompt_keep(tr, label, current)?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
        Ok(current)
    }
}

/// 설정 메뉴를 처리한다. 요율/기본값은 저장소에, 톤당 기준과 언어는 config에 저장한다.
pub fn edit_settings(
    tr: &Translator,
    cfg: &mut Config,
    repo: &dyn SettingsRepository,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    let mut settings = repo.load()?;
    print_settings(tr, cfg, &settings);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let p = &mut settings.prices;
            p.land = non_negative(tr, &tr.t(keys::SETTINGS_RATE_LAND), p.land)?;
            p.air = non_negative(tr, &tr.t(keys::SETTINGS_RATE_AIR), p.air)?;
            p.sea = non_negative(tr, &tr.t(keys::SETTINGS_RATE_SEA), p.sea)?;
            p.urgent = non_negative(tr, &tr.t(keys::SETTINGS_RATE_URGENT), p.urgent)?;
            p.insurance = non_negative(tr, &tr.t(keys::SETTINGS_RATE_INSURANCE), p.insurance)?;
            p.cold = non_negative(tr, &tr.t(keys::SETTINGS_RATE_COLD), p.cold)?;
        }
        "2" => {
            settings.preferences.default_method = prompt_keep(
                tr,
                &format!("{} (land/air/sea)", tr.t(keys::SETTINGS_DEFAULT_METHOD)),
                settings.preferences.default_method,
            )?;
        }
        "3" => {
            settings.preferences.history_retention = prompt_keep(
                tr,
                &tr.t(keys::SETTINGS_HISTORY_RETENTION),
                settings.preferences.history_retention,
            )?;
        }
        "4" => {
            println!(
                "1) {}  2) {}",
                tr.t(keys::SETTINGS_BASIS_LOADING_WEIGHT),
                tr.t(keys::SETTINGS_BASIS_ACTUAL_LOAD)
            );
            match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => cfg.per_ton_basis = PerTonBasis::LoadingWeight,
                "2" => cfg.per_ton_basis = PerTonBasis::ActualLoad,
                _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
            }
        }
        "5" => {
            cfg.language = prompt_keep(tr, &tr.t(keys::SETTINGS_LANGUAGE), cfg.language.clone())?;
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    repo.save(&settings)?;
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FreightResult;
    use chrono::{TimeZone, Utc};

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(trim_number(250000.0), "250000");
        assert_eq!(trim_number(1.735), "1.735");
        assert_eq!(trim_number(0.825), "0.825");
        assert_eq!(trim_number(-0.0), "0");
    }

    #[test]
    fn history_line_uses_one_based_index() {
        let tr = Translator::new("en");
        let mut form = FreightInput::default();
        form.transport_params.distance = 500.0;
        let result = FreightResult {
            total_cost: 1234.5,
            ..FreightResult::default()
        };
        let record = HistoryRecord::new(form, result, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        let line = history_line(&tr, 0, &record);
        assert!(line.starts_with("1) "));
        assert!(line.contains("Land"));
        assert!(line.contains("vehicle 9.6m"));
        assert!(line.contains("distance 500km"));
        assert!(line.ends_with("¥1234.50"));
    }
}
