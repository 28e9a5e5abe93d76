use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};
use serde::Serialize;

use crate::cli::{Command, HistoryAction, OutputFormat, QuoteArgs, SettingsAction};
use crate::config::{Config, ConfigError};
use crate::engine::{self, PerTonBasis, TripCosts};
use crate::i18n::{self, keys, Translator};
use crate::model::{Field, FreightInput, FreightResult, TransportMode, DEFAULT_FUEL_PRICE};
use crate::storage::{
    prune_older_than, FileStore, HistoryFilter, HistoryRecord, HistoryRepository,
    SettingsRepository, StoreError, StoreHistoryRepository, StoreSettingsRepository,
};
use crate::ui_cli::{self, MenuChoice};
use crate::validation;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 기록/설정 저장소 오류
    #[error("저장소 오류: {0}")]
    Store(#[from] StoreError),
    /// JSON 출력 오류
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 잘못된 입력값
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 한 번의 운임 계산 결과. 파생 필드를 채운 입력, 두 운행 구분의 운임, 저장용 결과.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub input: FreightInput,
    pub trip_costs: TripCosts,
    pub result: FreightResult,
}

/// 입력 레코드로 운임을 계산한다. 0으로 대체된 항목은 경고 로그로 남긴다.
pub fn calculate(record: &FreightInput, basis: PerTonBasis, tr: &Translator) -> Quote {
    let input = engine::derive_all(record);
    let trip_costs = engine::compute_trip_costs(&input, basis);
    for w in &trip_costs.warnings {
        warn!("trip cost warning: {w:?}");
    }
    let result = engine::build_result(&input, tr);
    Quote {
        input,
        trip_costs,
        result,
    }
}

/// `quote` 명령 인자로 입력 레코드를 만든다. 지정하지 않은 값은 차종 프리셋.
pub fn quote_record(args: &QuoteArgs) -> FreightInput {
    let fuel_price = args.fuel_price.unwrap_or(DEFAULT_FUEL_PRICE);
    let mut record = engine::derive_all(&FreightInput::for_vehicle(args.vehicle, fuel_price));
    let overrides = [
        (Field::Distance, Some(args.distance)),
        (Field::WorkingDays, args.working_days),
        (Field::EstimatedDailyMileage, args.daily_mileage),
        (Field::EstimatedAnnualOneWayMileage, args.annual_mileage),
        (Field::LoadingUnloadingTime, args.loading_time),
        (Field::LoadingWeight, args.weight),
        (Field::LoadingQuantity, args.quantity),
        (Field::LoadingVolume, args.volume),
        (Field::TripsPerDay, args.trips_per_day),
        (Field::AdjustmentFactor1, args.adj1),
        (Field::AdjustmentFactor2, args.adj2),
        (Field::ActualLoad, args.actual_load),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            record = engine::set_field(&record, field, v);
        }
    }
    record
}

/// 입력 검증 결과를 오류로 바꾼다.
fn ensure_valid(record: &FreightInput, tr: &Translator) -> Result<(), AppError> {
    let errors = validation::validate(record);
    if errors.is_empty() {
        return Ok(());
    }
    let msg = validation::messages(&errors, tr)
        .into_iter()
        .map(|(path, m)| format!("{path}: {m}"))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::InvalidInput(msg))
}

/// 데이터 디렉터리에 기록/설정 저장소를 연다.
pub fn open_repositories(
    dir: &Path,
) -> Result<(Box<dyn HistoryRepository>, Box<dyn SettingsRepository>), StoreError> {
    let store = FileStore::open(dir)?;
    info!("data directory: {}", store.dir().display());
    Ok((
        Box::new(StoreHistoryRepository::new(store.clone())),
        Box::new(StoreSettingsRepository::new(store)),
    ))
}

/// 실행 중 공유하는 설정, 번역기, 저장소.
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub lang_arg: String,
    pub tr: Translator,
    pub history: Box<dyn HistoryRepository>,
    pub settings: Box<dyn SettingsRepository>,
}

impl AppContext {
    pub fn new(
        config: Config,
        config_path: PathBuf,
        lang_arg: &str,
        history: Box<dyn HistoryRepository>,
        settings: Box<dyn SettingsRepository>,
    ) -> Self {
        let tr = translator_for(lang_arg, &config);
        Self {
            config,
            config_path,
            lang_arg: lang_arg.to_string(),
            tr,
            history,
            settings,
        }
    }

    fn reload_translator(&mut self) {
        self.tr = translator_for(&self.lang_arg, &self.config);
    }

    fn per_ton_basis(&self, legacy: bool) -> PerTonBasis {
        if legacy {
            PerTonBasis::ActualLoad
        } else {
            self.config.per_ton_basis
        }
    }
}

/// 플래그/설정/시스템 로케일 순으로 언어를 정해 번역기를 만든다.
pub fn translator_for(lang_arg: &str, config: &Config) -> Translator {
    let lang = i18n::resolve_language(lang_arg, Some(&config.language));
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(ctx: &mut AppContext) -> Result<(), AppError> {
    let mut record = engine::derive_all(&FreightInput::default());
    let mut last: Option<FreightResult> = None;
    loop {
        match ui_cli::main_menu(&ctx.tr)? {
            MenuChoice::Vehicle => {
                record = ui_cli::select_vehicle(&ctx.tr, &record)?;
                last = None;
            }
            MenuChoice::Edit => {
                record = ui_cli::edit_fields(&ctx.tr, &record)?;
                last = None;
            }
            MenuChoice::Calculate => {
                let errors = validation::validate(&record);
                if !errors.is_empty() {
                    ui_cli::print_validation(&ctx.tr, &errors);
                    continue;
                }
                let quote = calculate(&record, ctx.config.per_ton_basis, &ctx.tr);
                ui_cli::print_quote(&ctx.tr, &quote);
                last = Some(quote.result);
            }
            MenuChoice::Save => match &last {
                Some(result) => {
                    let entry = HistoryRecord::new(record.clone(), result.clone(), Utc::now());
                    ctx.history.append(entry)?;
                    println!("{}", ctx.tr.t(keys::RESULT_SAVED));
                }
                None => println!("{}", ctx.tr.t(keys::RESULT_NONE)),
            },
            MenuChoice::History => ui_cli::browse_history(&ctx.tr, ctx.history.as_ref())?,
            MenuChoice::Settings => {
                ui_cli::edit_settings(&ctx.tr, &mut ctx.config, ctx.settings.as_ref())?;
                ctx.config.save_to(&ctx.config_path)?;
                ctx.reload_translator();
            }
            MenuChoice::Exit => {
                println!("{}", ctx.tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 하위 명령을 실행한다.
pub fn run_command(ctx: &mut AppContext, command: Command) -> Result<(), AppError> {
    match command {
        Command::Quote(args) => {
            let record = quote_record(&args);
            ensure_valid(&record, &ctx.tr)?;
            let quote = calculate(&record, ctx.per_ton_basis(args.legacy_per_ton), &ctx.tr);
            match args.format {
                OutputFormat::Table => ui_cli::print_quote(&ctx.tr, &quote),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
            }
            if args.save {
                let entry = HistoryRecord::new(quote.input, quote.result, Utc::now());
                ctx.history.append(entry)?;
                if args.format == OutputFormat::Table {
                    println!("{}", ctx.tr.t(keys::RESULT_SAVED));
                }
            }
        }
        Command::History { action } => run_history(ctx, action)?,
        Command::Settings {
            action: SettingsAction::Show { format },
        } => {
            let settings = ctx.settings.load()?;
            match format {
                OutputFormat::Table => ui_cli::print_settings(&ctx.tr, &ctx.config, &settings),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
            }
        }
    }
    Ok(())
}

fn run_history(ctx: &AppContext, action: HistoryAction) -> Result<(), AppError> {
    match action {
        HistoryAction::List {
            from,
            to,
            mode,
            format,
        } => {
            let mode = mode
                .map(|m| m.parse::<TransportMode>())
                .transpose()
                .map_err(AppError::InvalidInput)?;
            let filter = HistoryFilter { from, to, mode };
            let records = ctx.history.list()?;
            let matched = filter.apply(&records);
            match format {
                OutputFormat::Table => ui_cli::print_history_list(&ctx.tr, &matched),
                OutputFormat::Json => {
                    let list: Vec<&HistoryRecord> = matched.iter().map(|(_, r)| *r).collect();
                    println!("{}", serde_json::to_string_pretty(&list)?);
                }
            }
        }
        HistoryAction::Show { index, format } => {
            let record = index
                .checked_sub(1)
                .map(|i| ctx.history.get(i))
                .transpose()?
                .flatten()
                .ok_or_else(|| AppError::InvalidInput(format!("no history record #{index}")))?;
            match format {
                OutputFormat::Table => ui_cli::print_record_detail(&ctx.tr, &record),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            }
        }
        HistoryAction::Clear => {
            ctx.history.clear()?;
            println!("{}", ctx.tr.t(keys::HISTORY_CLEARED));
        }
        HistoryAction::Prune { days } => {
            let days = match days {
                Some(d) => d,
                None => ctx.settings.load()?.preferences.history_retention,
            };
            let removed = prune_older_than(ctx.history.as_ref(), Utc::now(), days)?;
            println!("{} {removed}", ctx.tr.t(keys::HISTORY_PRUNED));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::storage::MemoryStore;
    use clap::Parser;

    fn quote_args(argv: &[&str]) -> QuoteArgs {
        let mut full = vec!["freight_cost_toolbox_cli", "quote"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Some(Command::Quote(args)) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn memory_context() -> AppContext {
        AppContext::new(
            Config::default(),
            PathBuf::from("unused.toml"),
            "en",
            Box::new(StoreHistoryRepository::new(MemoryStore::new())),
            Box::new(StoreSettingsRepository::new(MemoryStore::new())),
        )
    }

    #[test]
    fn quote_record_applies_overrides_and_derives() {
        let record = quote_record(&quote_args(&["--distance", "500", "--weight", "10"]));
        assert_eq!(record.transport_params.benchmark_distance, 613);
        assert_eq!(record.transport_params.loading_weight, 10.0);
        assert!((record.fixed_costs.total_fixed_cost - 148_000.0).abs() < 1e-9);
    }

    #[test]
    fn quote_with_save_appends_history() {
        let mut ctx = memory_context();
        let args = quote_args(&["--distance", "300", "--save", "--format", "json"]);
        run_command(&mut ctx, Command::Quote(args)).unwrap();
        let list = ctx.history.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].transport_type, TransportMode::Land);
        assert_eq!(list[0].result.details.len(), 4);
    }

    #[test]
    fn negative_input_is_rejected() {
        let mut ctx = memory_context();
        let args = quote_args(&["--distance=-5"]);
        let err = run_command(&mut ctx, Command::Quote(args)).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn show_rejects_missing_index() {
        let ctx = memory_context();
        let err = run_history(
            &ctx,
            HistoryAction::Show {
                index: 0,
                format: OutputFormat::Json,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
