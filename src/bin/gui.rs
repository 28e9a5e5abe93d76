#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::{Local, NaiveDate, Utc};
use eframe::{egui, App, Frame};
use freight_cost_toolbox::{
    app::{self, Quote},
    config,
    engine::{self, PerTonBasis, RegimeCost},
    i18n::{self, keys, Translator},
    model::{Field, FreightInput, Section, TransportMode, VehicleType},
    storage::{
        prune_older_than, HistoryFilter, HistoryRecord, HistoryRepository, MemoryStore, Settings,
        SettingsRepository, StoreHistoryRepository, StoreSettingsRepository,
    },
    ui_cli::{history_line, trim_number},
    validation,
};
use image::GenericImageView;
use log::warn;
use rfd::FileDialog;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/zh-cn)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let config_path = PathBuf::from(config::CONFIG_FILE);
    let mut app_cfg = config::load_or_default_at(&config_path).unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    let (history, settings) = open_repositories_or_memory(&app_cfg.resolved_data_dir());
    eframe::run_native(
        "Freight Cost Toolbox",
        options,
        Box::new(move |cc| {
            let font_err = setup_fonts(&cc.egui_ctx).err();
            if let Some(e) = &font_err {
                warn!("Font error: {e}");
            }
            let mut gui = GuiApp::new(app_cfg, config_path, history, settings);
            gui.font_load_error = font_err;
            Box::new(gui)
        }),
    )
}

/// 데이터 디렉터리를 열지 못하면 메모리 저장소로 실행한다 (종료 시 기록은 사라진다).
fn open_repositories_or_memory(
    dir: &Path,
) -> (Box<dyn HistoryRepository>, Box<dyn SettingsRepository>) {
    match app::open_repositories(dir) {
        Ok(repos) => repos,
        Err(e) => {
            warn!("storage unavailable, history will not persist: {e}");
            (
                Box::new(StoreHistoryRepository::new(MemoryStore::new())),
                Box::new(StoreSettingsRepository::new(MemoryStore::new())),
            )
        }
    }
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png", "../../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    apply_initial_view_size: bool,
    // 계산기
    record: FreightInput,
    quote: Option<Quote>,
    field_errors: BTreeMap<String, String>,
    calc_status: Option<String>,
    // 계산 기록
    history: Box<dyn HistoryRepository>,
    history_cache: Vec<HistoryRecord>,
    history_from: String,
    history_to: String,
    history_mode: Option<TransportMode>,
    history_selected: Option<usize>,
    history_status: Option<String>,
    // 요율/기본값
    settings_repo: Box<dyn SettingsRepository>,
    settings: Settings,
    settings_status: Option<String>,
    // 프로그램 설정
    ui_scale: f32,
    always_on_top: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
    custom_font_path: String,
    font_load_error: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Calculator,
    History,
    Settings,
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글/중국어를 표시하기 위해 CJK 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) 운영체제별 시스템 CJK 폰트
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/NotoSansCJK-Regular.ttc"),
        PathBuf::from("assets/fonts/malgun.ttf"),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for name in ["msyh.ttc", "malgun.ttf", "simsun.ttc", "gulim.ttc"] {
            candidates.push(fonts.join(name));
        }
    }
    for p in [
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    ] {
        candidates.push(PathBuf::from(p));
    }
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            return Ok(());
        }
    }
    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 금액 필드는 크게, 계수/단가 필드는 작게 움직인다.
fn drag_speed(field: Field) -> f64 {
    match field {
        Field::VehiclePrice
        | Field::DriverSalary
        | Field::RepairFee
        | Field::VehicleInsurance
        | Field::OtherFixedCosts
        | Field::ExpectedProfit
        | Field::EstimatedAnnualOneWayMileage => 100.0,
        Field::Distance | Field::EstimatedDailyMileage | Field::LoadingQuantity => 1.0,
        Field::AxleCount | Field::ServiceLife | Field::WorkingDays => 1.0,
        _ => 0.01,
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

fn mode_key(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Land => keys::MODE_LAND,
        TransportMode::Air => keys::MODE_AIR,
        TransportMode::Sea => keys::MODE_SEA,
    }
}

fn vehicle_label<F>(vt: VehicleType, txt: &F) -> String
where
    F: Fn(&str, &str) -> String,
{
    match vt {
        VehicleType::Length9m6 => txt("gui.calc.vehicle.9_6m", "9.6m (3 axles)"),
        VehicleType::Length17m5 => txt("gui.calc.vehicle.17_5m", "17.5m (6 axles)"),
        VehicleType::Other => txt("gui.calc.vehicle.other", "Other"),
    }
}

/// 빈 문자열은 제한 없음. 형식이 틀리면 Err.
fn parse_date_input(s: &str) -> Result<Option<NaiveDate>, ()> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}

impl GuiApp {
    fn new(
        config: config::Config,
        config_path: PathBuf,
        history: Box<dyn HistoryRepository>,
        settings_repo: Box<dyn SettingsRepository>,
    ) -> Self {
        let tr = app::translator_for("auto", &config);
        log::info!(
            "GUI language resolved: {}, overrides_loaded={}",
            tr.language_code(),
            tr.lookup("gui.nav.app_title").is_some()
        );
        let settings = settings_repo.load().unwrap_or_else(|e| {
            warn!("settings load failed, using defaults: {e}");
            Settings::default()
        });
        let lang_input = config.language.clone();
        let lang_pack_dir_input = config.language_pack_dir.clone().unwrap_or_default();
        let mut s = Self {
            window_alpha: config.clamped_alpha(),
            config,
            config_path,
            tr,
            lang_input,
            lang_pack_dir_input,
            lang_save_status: None,
            tab: Tab::Calculator,
            apply_initial_view_size: true,
            record: engine::derive_all(&FreightInput::default()),
            quote: None,
            field_errors: BTreeMap::new(),
            calc_status: None,
            history,
            history_cache: Vec::new(),
            history_from: String::new(),
            history_to: String::new(),
            history_mode: None,
            history_selected: None,
            history_status: None,
            settings_repo,
            settings,
            settings_status: None,
            ui_scale: 1.0,
            always_on_top: false,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            custom_font_path: String::new(),
            font_load_error: None,
        };
        s.refresh_history();
        s
    }

    fn error_text(&self, err: impl std::fmt::Display) -> String {
        format!("{}: {err}", self.tr.t(keys::ERROR_PREFIX))
    }

    fn refresh_history(&mut self) {
        match self.history.list() {
            Ok(list) => self.history_cache = list,
            Err(e) => {
                warn!("history load failed: {e}");
                self.history_status = Some(self.error_text(e));
            }
        }
        if self
            .history_selected
            .is_some_and(|i| i >= self.history_cache.len())
        {
            self.history_selected = None;
        }
    }

    fn select_vehicle(&mut self, vehicle_type: VehicleType) {
        self.record = engine::apply_vehicle_type(&self.record, vehicle_type);
        self.quote = None;
        self.field_errors.clear();
    }

    fn set_value(&mut self, field: Field, value: f64) {
        self.record = engine::set_field(&self.record, field, value);
        self.quote = None;
        self.field_errors.remove(field.path());
    }

    /// 입력 검증 후 운임을 계산한다. 오류가 있으면 결과를 지운다.
    fn calculate(&mut self) {
        let errors = validation::validate(&self.record);
        self.field_errors = validation::messages(&errors, &self.tr);
        self.calc_status = None;
        if errors.is_empty() {
            self.quote = Some(app::calculate(
                &self.record,
                self.config.per_ton_basis,
                &self.tr,
            ));
        } else {
            self.quote = None;
        }
    }

    fn save_record(&mut self) {
        let Some(quote) = &self.quote else {
            self.calc_status = Some(self.tr.t(keys::RESULT_NONE).into_owned());
            return;
        };
        let entry = HistoryRecord::new(quote.input.clone(), quote.result.clone(), Utc::now());
        match self.history.append(entry) {
            Ok(()) => {
                self.calc_status = Some(self.tr.t(keys::RESULT_SAVED).into_owned());
                self.refresh_history();
            }
            Err(e) => {
                warn!("history save failed: {e}");
                self.calc_status = Some(self.error_text(e));
            }
        }
    }

    fn current_filter(&self) -> Result<HistoryFilter, String> {
        let invalid = || self.tr.t(keys::HISTORY_INVALID_DATE).into_owned();
        let from = parse_date_input(&self.history_from).map_err(|_| invalid())?;
        let to = parse_date_input(&self.history_to).map_err(|_| invalid())?;
        Ok(HistoryFilter {
            from,
            to,
            mode: self.history_mode,
        })
    }

    fn export_history(&mut self, filter: &HistoryFilter) {
        let Some(path) = FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("freightRecords.json")
            .save_file()
        else {
            return;
        };
        let list: Vec<&HistoryRecord> = filter
            .apply(&self.history_cache)
            .into_iter()
            .map(|(_, r)| r)
            .collect();
        let result = serde_json::to_string_pretty(&list)
            .map_err(|e| e.to_string())
            .and_then(|text| fs::write(&path, text).map_err(|e| e.to_string()));
        self.history_status = Some(match result {
            Ok(()) => format!(
                "{} {}",
                self.tr
                    .lookup("gui.history.exported")
                    .unwrap_or_else(|| "Exported:".to_string()),
                path.display()
            ),
            Err(e) => self.error_text(e),
        });
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Calculator, txt("gui.tab.calculator", "Calculator")),
            (Tab::History, txt("gui.tab.history", "History")),
            (Tab::Settings, txt("gui.tab.settings", "Rates & Preferences")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
                if tab == Tab::History {
                    self.refresh_history();
                }
            }
            ui.add_space(4.0);
        }
    }

    /// 숫자 필드 한 줄: 라벨, 입력(파생 필드는 읽기 전용), 오류 메시지.
    fn field_row(&mut self, ui: &mut egui::Ui, tr: &Translator, field: Field) {
        let derived_tip = tr
            .lookup("gui.calc.derived_tip")
            .unwrap_or_else(|| "Calculated automatically".to_string());
        let tip = if field.is_derived() {
            format!("{} ({derived_tip})", field.path())
        } else {
            field.path().to_string()
        };
        label_with_tip(ui, &tr.field_label(field), &tip);
        let value = field.get(&self.record);
        if field.is_derived() {
            ui.label(egui::RichText::new(trim_number(value)).strong());
        } else {
            let mut v = value;
            if ui
                .add(egui::DragValue::new(&mut v).speed(drag_speed(field)))
                .changed()
            {
                self.set_value(field, v);
            }
        }
        if let Some(msg) = self.field_errors.get(field.path()) {
            ui.colored_label(ui.visuals().error_fg_color, msg);
        } else {
            ui.label("");
        }
        ui.end_row();
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.calc.heading", "Road Freight Cost"),
            &txt(
                "gui.calc.tip",
                "Per-trip freight cost and unit prices from vehicle, cost and trip inputs.",
            ),
        );
        ui.add_space(8.0);

        for section in [
            Section::Vehicle,
            Section::Fixed,
            Section::Variable,
            Section::Transport,
        ] {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.strong(&*tr.t(section_key(section)));
                egui::Grid::new(format!("calc_grid_{section:?}"))
                    .num_columns(3)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        if section == Section::Vehicle {
                            label_with_tip(
                                ui,
                                &tr.t(keys::FIELD_VEHICLE_TYPE),
                                &txt(
                                    "gui.calc.vehicle_type_tip",
                                    "Selecting a vehicle type resets costs and transport parameters to its preset. Fuel price is kept.",
                                ),
                            );
                            let current = self.record.vehicle_params.vehicle_type;
                            let mut selected = current;
                            egui::ComboBox::from_id_source("vehicle_type")
                                .selected_text(vehicle_label(selected, &txt))
                                .show_ui(ui, |ui| {
                                    for vt in VehicleType::ALL {
                                        ui.selectable_value(&mut selected, vt, vehicle_label(vt, &txt));
                                    }
                                });
                            if selected != current {
                                self.select_vehicle(selected);
                            }
                            ui.label("");
                            ui.end_row();
                            label_with_tip(
                                ui,
                                &tr.t(keys::FIELD_BRAND),
                                &txt("gui.calc.brand_tip", "Free text, stored with the record."),
                            );
                            ui.text_edit_singleline(&mut self.record.vehicle_params.brand);
                            ui.label("");
                            ui.end_row();
                        }
                        for field in Field::ALL.iter().filter(|f| f.section() == section) {
                            self.field_row(ui, &tr, *field);
                        }
                    });
            });
            ui.add_space(6.0);
        }

        ui.horizontal(|ui| {
            if ui.button(txt("gui.calc.calculate", "Calculate")).clicked() {
                self.calculate();
            }
            if ui.button(txt("gui.calc.reset", "Reset")).clicked() {
                let vt = self.record.vehicle_params.vehicle_type;
                self.select_vehicle(vt);
                self.calc_status = None;
            }
            if ui.button(txt("gui.calc.save", "Save record")).clicked() {
                self.save_record();
            }
        });
        if !self.field_errors.is_empty() {
            ui.colored_label(
                ui.visuals().error_fg_color,
                txt("gui.calc.fix_errors", "Please fix the highlighted inputs."),
            );
        }
        if let Some(msg) = &self.calc_status {
            ui.label(msg);
        }

        if let Some(quote) = &self.quote {
            ui.add_space(8.0);
            ui_quote(ui, &tr, quote);
        }
    }

    fn ui_history(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.history.heading", "Calculation History"),
            &txt("gui.history.tip", "Saved calculations, newest first."),
        );
        ui.add_space(8.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(txt("gui.history.from", "From (YYYY-MM-DD)"));
            ui.add(egui::TextEdit::singleline(&mut self.history_from).desired_width(100.0));
            ui.label(txt("gui.history.to", "To"));
            ui.add(egui::TextEdit::singleline(&mut self.history_to).desired_width(100.0));
            ui.label(txt("gui.history.mode", "Mode"));
            let selected_text = match self.history_mode {
                Some(m) => tr.t(mode_key(m)).into_owned(),
                None => tr.t(keys::MODE_ALL).into_owned(),
            };
            egui::ComboBox::from_id_source("history_mode")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.history_mode, None, &*tr.t(keys::MODE_ALL));
                    for m in TransportMode::ALL {
                        ui.selectable_value(&mut self.history_mode, Some(m), &*tr.t(mode_key(m)));
                    }
                });
        });

        let filter = match self.current_filter() {
            Ok(f) => Some(f),
            Err(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, msg);
                None
            }
        };

        ui.horizontal(|ui| {
            if ui.button(txt("gui.history.refresh", "Refresh")).clicked() {
                self.refresh_history();
            }
            if ui.button(txt("gui.history.clear", "Clear all")).clicked() {
                self.history_status = Some(match self.history.clear() {
                    Ok(()) => tr.t(keys::HISTORY_CLEARED).into_owned(),
                    Err(e) => self.error_text(e),
                });
                self.refresh_history();
            }
            if ui.button(txt("gui.history.prune", "Remove expired")).clicked() {
                let days = self.settings.preferences.history_retention;
                self.history_status =
                    Some(match prune_older_than(&*self.history, Utc::now(), days) {
                        Ok(n) => format!("{} {n}", &*tr.t(keys::HISTORY_PRUNED)),
                        Err(e) => self.error_text(e),
                    });
                self.refresh_history();
            }
            if let Some(filter) = &filter {
                if ui.button(txt("gui.history.export", "Export JSON")).clicked() {
                    self.export_history(filter);
                }
            }
        });
        if let Some(msg) = &self.history_status {
            ui.label(msg);
        }
        ui.separator();

        let Some(filter) = filter else {
            return;
        };
        let matched = filter.apply(&self.history_cache);
        if matched.is_empty() {
            ui.label(&*tr.t(keys::HISTORY_EMPTY));
            return;
        }
        let mut clicked = None;
        for (index, record) in &matched {
            let selected = self.history_selected == Some(*index);
            if ui
                .selectable_label(selected, history_line(&tr, *index, record))
                .clicked()
            {
                clicked = Some(*index);
            }
        }
        if clicked.is_some() {
            self.history_selected = clicked;
        }

        let Some(record) = self
            .history_selected
            .and_then(|i| self.history_cache.get(i))
            .cloned()
        else {
            return;
        };
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(txt("gui.history.detail", "Details"));
            ui.label(format!(
                "{} {}",
                &*tr.t(keys::HISTORY_DETAIL_TIME),
                record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ));
            for line in &record.result.details {
                ui.label(line);
            }
            ui.separator();
            egui::Grid::new("history_detail_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(&*tr.t(keys::FIELD_VEHICLE_TYPE));
                    ui.label(record.form_data.vehicle_params.vehicle_type.as_str());
                    ui.end_row();
                    ui.label(&*tr.t(keys::FIELD_BRAND));
                    ui.label(&record.form_data.vehicle_params.brand);
                    ui.end_row();
                    for field in Field::ALL {
                        ui.label(&*tr.field_label(field));
                        ui.label(trim_number(field.get(&record.form_data)));
                        ui.end_row();
                    }
                });
            if ui
                .button(txt("gui.history.load", "Open in calculator"))
                .clicked()
            {
                self.record = engine::derive_all(&record.form_data);
                self.quote = None;
                self.field_errors.clear();
                self.tab = Tab::Calculator;
            }
        });
    }

    fn ui_freight_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.tab.settings", "Rates & Preferences"),
            &txt(
                "gui.rates.tip",
                "Stored rate constants and preferences. Road freight results do not use the flat rates.",
            ),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(&*tr.t(keys::SETTINGS_RATES_HEADING));
            egui::Grid::new("rates_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    let p = &mut self.settings.prices;
                    for (key, value) in [
                        (keys::SETTINGS_RATE_LAND, &mut p.land),
                        (keys::SETTINGS_RATE_AIR, &mut p.air),
                        (keys::SETTINGS_RATE_SEA, &mut p.sea),
                        (keys::SETTINGS_RATE_URGENT, &mut p.urgent),
                        (keys::SETTINGS_RATE_INSURANCE, &mut p.insurance),
                        (keys::SETTINGS_RATE_COLD, &mut p.cold),
                    ] {
                        ui.label(&*tr.t(key));
                        ui.add(
                            egui::DragValue::new(value)
                                .speed(0.01)
                                .clamp_range(0.0..=f64::MAX),
                        );
                        ui.end_row();
                    }
                });
        });
        ui.add_space(6.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("prefs_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(&*tr.t(keys::SETTINGS_DEFAULT_METHOD));
                    let prefs = &mut self.settings.preferences;
                    egui::ComboBox::from_id_source("default_method")
                        .selected_text(&*tr.t(mode_key(prefs.default_method)))
                        .show_ui(ui, |ui| {
                            for m in TransportMode::ALL {
                                ui.selectable_value(&mut prefs.default_method, m, &*tr.t(mode_key(m)));
                            }
                        });
                    ui.end_row();
                    ui.label(&*tr.t(keys::SETTINGS_HISTORY_RETENTION));
                    ui.add(egui::DragValue::new(&mut prefs.history_retention).speed(1.0));
                    ui.end_row();
                    label_with_tip(
                        ui,
                        &tr.t(keys::SETTINGS_PER_TON_BASIS),
                        &txt(
                            "gui.rates.basis_tip",
                            "Actual load reproduces the older per-ton figure for ≤1 day/trip.",
                        ),
                    );
                    ui.horizontal(|ui| {
                        ui.radio_value(
                            &mut self.config.per_ton_basis,
                            PerTonBasis::LoadingWeight,
                            &*tr.t(keys::SETTINGS_BASIS_LOADING_WEIGHT),
                        );
                        ui.radio_value(
                            &mut self.config.per_ton_basis,
                            PerTonBasis::ActualLoad,
                            &*tr.t(keys::SETTINGS_BASIS_ACTUAL_LOAD),
                        );
                    });
                    ui.end_row();
                });
        });
        ui.add_space(6.0);
        if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
            let saved = self
                .settings_repo
                .save(&self.settings)
                .map_err(|e| e.to_string())
                .and_then(|()| {
                    self.config
                        .save_to(&self.config_path)
                        .map_err(|e| e.to_string())
                });
            self.settings_status = Some(match saved {
                Ok(()) => tr.t(keys::SETTINGS_SAVED).into_owned(),
                Err(e) => self.error_text(e),
            });
            self.quote = None;
        }
        if let Some(msg) = &self.settings_status {
            ui.label(msg);
        }
    }
}

/// 운행 구분별 운임표, 단위 운임, 경고, 요약 4줄.
fn ui_quote(ui: &mut egui::Ui, tr: &Translator, quote: &Quote) {
    let costs = &quote.trip_costs;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.strong(&*tr.t(keys::TABLE_TRIP_HEADING));
        egui::Grid::new("regime_grid")
            .num_columns(7)
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("");
                for key in [
                    keys::TABLE_COL_FIXED,
                    keys::TABLE_COL_VARIABLE,
                    keys::TABLE_COL_PROFIT,
                    keys::TABLE_COL_ADJUSTMENT,
                    keys::TABLE_COL_TOTAL,
                    keys::TABLE_COL_TRIPS,
                ] {
                    ui.strong(&*tr.t(key));
                }
                ui.end_row();
                let rows: [(&str, &RegimeCost, Option<f64>); 2] = [
                    (keys::TABLE_ROW_OVER_ONE_DAY, &costs.over_one_day, None),
                    (
                        keys::TABLE_ROW_WITHIN_ONE_DAY,
                        &costs.within_one_day,
                        Some(costs.trips_per_day),
                    ),
                ];
                for (label, regime, trips) in rows {
                    ui.label(&*tr.t(label));
                    ui.label(format!("{:.2}", regime.fixed_cost));
                    ui.label(format!("{:.2}", regime.variable_cost));
                    ui.label(format!("{:.2}", regime.profit));
                    ui.label(format!("{:.2}", regime.adjustment_factor));
                    ui.strong(format!("{:.2}", regime.total_cost));
                    ui.label(trips.map(trim_number).unwrap_or_default());
                    ui.end_row();
                }
            });
        ui.add_space(6.0);
        ui.strong(&*tr.t(keys::TABLE_UNIT_HEADING));
        egui::Grid::new("unit_grid")
            .num_columns(7)
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("");
                for key in [
                    keys::UNIT_PER_KM,
                    keys::UNIT_PER_DAN,
                    keys::UNIT_PER_TON_KM,
                    keys::UNIT_PER_TON,
                    keys::UNIT_PER_PIECE,
                    keys::UNIT_PER_VOLUME,
                ] {
                    ui.strong(&*tr.t(key));
                }
                ui.end_row();
                for (label, regime) in [
                    (keys::TABLE_ROW_OVER_ONE_DAY, &costs.over_one_day),
                    (keys::TABLE_ROW_WITHIN_ONE_DAY, &costs.within_one_day),
                ] {
                    let u = &regime.unit_prices;
                    ui.label(&*tr.t(label));
                    ui.label(format!("{:.2}", u.per_km));
                    ui.label(format!("{:.2}", u.per_dan));
                    ui.label(format!("{:.3}", u.per_ton_km));
                    ui.label(format!("{:.2}", u.per_ton));
                    ui.label(format!("{:.2}", u.per_piece));
                    ui.label(format!("{:.2}", u.per_volume));
                    ui.end_row();
                }
            });
        for w in &costs.warnings {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                &*tr.t(engine::format::warning_key(*w)),
            );
        }
    });
    ui.add_space(6.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.strong(&*tr.t(keys::RESULT_HEADING));
        for line in &quote.result.details {
            ui.label(line);
        }
    });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.60).max(1000.0), (screen.y * 0.60).max(700.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Freight Cost Toolbox"));
                ui.label(" | Desktop GUI");
                ui.separator();
                if ui.button(txt("gui.formula.button", "Formula reference")).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut open = true;
            let mut save_clicked = false;
            let mut load_font_clicked = false;
            egui::Window::new(txt("gui.settings.title", "Program Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(&mut self.always_on_top, txt("gui.settings.always_on_top", "Always on top"));
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));

                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), txt("gui.settings.lang_auto", "System"));
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                            ui.selectable_value(&mut self.lang_input, "zh-cn".into(), "简体中文");
                        });
                    ui.label(txt("gui.settings.lang_pack_dir", "Language pack folder"));
                    ui.text_edit_singleline(&mut self.lang_pack_dir_input);

                    ui.separator();
                    ui.label(txt("gui.settings.font", "User font (.ttf/.ttc)"));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.custom_font_path);
                        if ui.button(txt("gui.settings.font_browse", "Browse")).clicked() {
                            if let Some(p) = FileDialog::new().add_filter("Font", &["ttf", "ttc", "otf"]).pick_file() {
                                self.custom_font_path = p.display().to_string();
                            }
                        }
                        if ui.button(txt("gui.settings.font_load", "Load font")).clicked() {
                            load_font_clicked = true;
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(ui.visuals().warn_fg_color, err);
                    }

                    ui.separator();
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        save_clicked = true;
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
            if load_font_clicked {
                self.font_load_error = load_custom_font(ctx, &self.custom_font_path).err();
                if self.font_load_error.is_none() {
                    self.lang_save_status = Some(txt("gui.settings.font_loaded", "Font loaded."));
                }
            }
            if save_clicked {
                self.config.language = self.lang_input.clone();
                let dir = self.lang_pack_dir_input.trim();
                self.config.language_pack_dir = (!dir.is_empty()).then(|| dir.to_string());
                self.config.window_alpha = self.window_alpha;
                // 즉시 번역기 반영
                self.tr = app::translator_for("auto", &self.config);
                self.quote = None;
                self.lang_save_status = Some(match self.config.save_to(&self.config_path) {
                    Ok(()) => txt("gui.settings.saved", "Saved."),
                    Err(e) => format!("Save error: {e}"),
                });
            }
            self.show_settings_modal = open;
        }

        // 도움말 모달
        if self.show_help_modal {
            let data_dir = self.config.resolved_data_dir();
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.about.app", "Offline road freight cost calculator"));
                    ui.label(i18n::fill_template(
                        &txt("gui.about.version", "Version: {version}"),
                        &[("version", env!("CARGO_PKG_VERSION").to_string())],
                    ));
                    ui.label(i18n::fill_template(
                        &txt("gui.about.data_dir", "Data folder: {path}"),
                        &[("path", data_dir.display().to_string())],
                    ));
                    ui.separator();
                    ui.label(txt(
                        "gui.about.hint",
                        "Hover a label to see its field path. Derived fields are read-only.",
                    ));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.style_mut().wrap = Some(true);
                    ui.heading(txt("gui.formula.costs", "Annual and per-km costs"));
                    ui.label(txt("gui.formula.fixed", "Depreciation = vehicle price / service life; total fixed = depreciation + salary + repair + insurance + other."));
                    ui.label(txt("gui.formula.variable", "Fuel cost = fuel price × consumption / 100; total variable = fuel + tire + toll + maintenance + other."));
                    ui.label(txt("gui.formula.time", "Estimated time = distance / max(daily mileage, 0.1) + loading time; benchmark = round(annual mileage / (working days / 2 / time))."));
                    ui.separator();
                    ui.heading(txt("gui.formula.trip", "Per-trip cost"));
                    ui.label(txt("gui.formula.over_one_day", ">1 day/trip: (fixed / (working days / time) + variable × distance + profit / annual mileage × benchmark) × factor 1."));
                    ui.label(txt("gui.formula.within_one_day", "≤1 day/trip: (fixed / working days / trips + variable × distance + profit / working days / trips) × factor 2."));
                    ui.label(txt("gui.formula.units", "Unit prices divide the trip total by distance, weight × 20 (dan), weight × distance, weight, quantity and volume. A zero denominator gives 0."));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Calculator => self.ui_calculator(ui),
                    Tab::History => self.ui_history(ui),
                    Tab::Settings => self.ui_freight_settings(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use freight_cost_toolbox::model::FreightResult;

    fn memory_app() -> GuiApp {
        GuiApp::new(
            config::Config {
                language: "en-us".into(),
                ..config::Config::default()
            },
            PathBuf::from("unused-config.toml"),
            Box::new(StoreHistoryRepository::new(MemoryStore::new())),
            Box::new(StoreSettingsRepository::new(MemoryStore::new())),
        )
    }

    #[test]
    fn calculate_then_save_adds_history() {
        let mut app = memory_app();
        app.set_value(Field::Distance, 500.0);
        app.calculate();
        let quote = app.quote.as_ref().expect("quote");
        assert_eq!(quote.input.transport_params.benchmark_distance, 613);
        app.save_record();
        assert_eq!(app.history_cache.len(), 1);
        assert_eq!(app.history_cache[0].form_data.transport_params.distance, 500.0);
    }

    #[test]
    fn invalid_input_blocks_calculation() {
        let mut app = memory_app();
        app.set_value(Field::TollFee, -1.0);
        app.calculate();
        assert!(app.quote.is_none());
        assert!(app.field_errors.contains_key("variableCosts.tollFee"));
    }

    #[test]
    fn editing_a_field_clears_previous_result() {
        let mut app = memory_app();
        app.calculate();
        assert!(app.quote.is_some());
        app.set_value(Field::FuelPrice, 7.5);
        assert!(app.quote.is_none());
        assert!((app.record.variable_costs.fuel_cost - 1.875).abs() < 1e-9);
    }

    #[test]
    fn vehicle_change_keeps_fuel_price() {
        let mut app = memory_app();
        app.set_value(Field::FuelPrice, 8.0);
        app.select_vehicle(VehicleType::Length17m5);
        assert_eq!(app.record.vehicle_params.axle_count, 6);
        assert_eq!(app.record.variable_costs.fuel_price, 8.0);
    }

    #[test]
    fn date_filter_input_is_validated() {
        assert_eq!(parse_date_input(""), Ok(None));
        assert_eq!(
            parse_date_input("2024-03-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1))
        );
        assert!(parse_date_input("03/01/2024").is_err());

        let mut app = memory_app();
        app.history_from = "bad".into();
        assert!(app.current_filter().is_err());
    }

    #[test]
    fn refresh_drops_stale_selection() {
        let mut app = memory_app();
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        app.history
            .append(HistoryRecord::new(FreightInput::default(), FreightResult::default(), ts))
            .unwrap();
        app.refresh_history();
        app.history_selected = Some(0);
        app.history.clear().unwrap();
        app.refresh_history();
        assert!(app.history_selected.is_none());
    }
}
