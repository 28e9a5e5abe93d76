//! 명령행 인자 정의.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::VehicleType;

/// 결과 출력 형식.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "freight_cost_toolbox_cli")]
#[command(version)]
#[command(about = "Road freight cost and unit price calculator")]
pub struct Cli {
    /// 출력 언어 (auto, ko, en, zh)
    #[arg(long, global = true, default_value = "auto")]
    pub lang: String,

    /// 설정 파일 경로
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 계산 기록 저장 디렉터리 (설정값보다 우선)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 입력값으로 운임을 한 번 계산한다
    Quote(QuoteArgs),

    /// 계산 기록 관리
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// 저장된 설정 확인
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// 차종 (9.6m, 17.5m, other)
    #[arg(long, short = 'v', default_value = "9.6m", value_parser = parse_vehicle)]
    pub vehicle: VehicleType,

    /// 운송 거리 [km]
    #[arg(long, short = 'd')]
    pub distance: f64,

    /// 유가 [¥/L]
    #[arg(long)]
    pub fuel_price: Option<f64>,

    /// 연간 영업일
    #[arg(long)]
    pub working_days: Option<f64>,

    /// 일 주행거리 [km/일]
    #[arg(long)]
    pub daily_mileage: Option<f64>,

    /// 연간 편도 주행거리 [km/년]
    #[arg(long)]
    pub annual_mileage: Option<f64>,

    /// 상하차 시간 [일]
    #[arg(long)]
    pub loading_time: Option<f64>,

    /// 적재 중량 [t]
    #[arg(long)]
    pub weight: Option<f64>,

    /// 적재 수량 [개]
    #[arg(long)]
    pub quantity: Option<f64>,

    /// 적재 부피 [m³]
    #[arg(long)]
    pub volume: Option<f64>,

    /// 일 운행 횟수 (≤1일/회)
    #[arg(long)]
    pub trips_per_day: Option<f64>,

    /// 조정계수 (>1일/회)
    #[arg(long)]
    pub adj1: Option<f64>,

    /// 조정계수 (≤1일/회)
    #[arg(long)]
    pub adj2: Option<f64>,

    /// 실제 적재량 [t]
    #[arg(long)]
    pub actual_load: Option<f64>,

    /// ≤1일/회 톤당 단가를 실제 적재량으로 계산한다
    #[arg(long)]
    pub legacy_per_ton: bool,

    /// 출력 형식
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// 계산 결과를 기록에 저장한다
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryAction {
    /// 기록 목록
    List {
        /// 시작일 (YYYY-MM-DD)
        #[arg(long)]
        from: Option<chrono::NaiveDate>,
        /// 종료일 (YYYY-MM-DD)
        #[arg(long)]
        to: Option<chrono::NaiveDate>,
        /// 운송 수단 (land, air, sea)
        #[arg(long)]
        mode: Option<String>,
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// 기록 상세 (목록 번호, 1부터)
    Show {
        index: usize,
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// 기록 전체 삭제
    Clear,
    /// 보관 기간이 지난 기록 삭제
    Prune {
        /// 보관 기간 [일]. 생략하면 설정값
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    /// 저장된 설정 출력
    Show {
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn parse_vehicle(s: &str) -> Result<VehicleType, String> {
    s.parse::<VehicleType>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_quote_flags() {
        let cli = Cli::parse_from([
            "freight_cost_toolbox_cli",
            "quote",
            "--vehicle",
            "17.5m",
            "--distance",
            "500",
            "--legacy-per-ton",
            "--format",
            "json",
        ]);
        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.vehicle, VehicleType::Length17m5);
                assert_eq!(args.distance, 500.0);
                assert!(args.legacy_per_ton);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["freight_cost_toolbox_cli", "--lang", "zh"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.lang, "zh");
    }
}
