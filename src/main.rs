use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use freight_cost_toolbox::app::{self, AppContext, AppError};
use freight_cost_toolbox::cli::Cli;
use freight_cost_toolbox::config::{self, CONFIG_FILE};
use freight_cost_toolbox::i18n::{keys, Translator};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err((tr, err)) => {
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

/// 실패 시 오류 메시지 접두어에 쓸 번역기를 함께 돌려준다.
fn try_run(cli: Cli) -> Result<(), (Translator, AppError)> {
    let fallback = || Translator::new(&cli.lang);
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let cfg = config::load_or_default_at(&config_path).map_err(|e| (fallback(), e.into()))?;
    let tr = app::translator_for(&cli.lang, &cfg);
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| cfg.resolved_data_dir());
    let (history, settings) =
        app::open_repositories(&data_dir).map_err(|e| (tr.clone(), e.into()))?;
    let mut ctx = AppContext::new(cfg, config_path, &cli.lang, history, settings);
    let result = match cli.command {
        Some(command) => app::run_command(&mut ctx, command),
        None => app::run(&mut ctx),
    };
    result.map_err(|e| (ctx.tr.clone(), e))
}
