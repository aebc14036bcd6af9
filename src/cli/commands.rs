//! Command dispatch and handlers for the interactive shell.

use std::{env, fs, path::Path};

use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;

use crate::cli::output;
use crate::core::services::{CategoryService, ReportService};
use crate::core::store::FluidStore;
use crate::core::time::{local_day_start_ms, same_local_day, to_local, DAY_MS};
use crate::domain::category::Category;
use crate::domain::record::{FluidRecord, FluidType};
use crate::domain::report::LimitLevel;
use crate::errors::FluidError;
use crate::export::{FileFontProvider, PdfExporter, PdfReportData};
use crate::storage::JsonStorage;

const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show this command overview"),
    ("add", "add <category> <amount> [note] - log a record on the selected day"),
    ("rm", "rm <record-id> - remove a record"),
    ("list", "List the selected day's records"),
    ("date", "date [YYYY-MM-DD] - show or change the selected day"),
    ("balance", "Balance summary for the selected day"),
    ("status", "Today's intake against the daily limit"),
    ("trend", "Seven-day balance trend"),
    ("report", "report <days> - trailing range report"),
    ("categories", "List all categories"),
    ("catadd", "catadd <in|out> <label> [icon] - add a custom category"),
    ("catrm", "catrm <category-id> - remove a custom category"),
    ("limit", "limit [mL] - show or change the daily limit"),
    ("export", "export <file> - write a JSON backup"),
    ("import", "import <file> - replace all data from a JSON backup"),
    ("pdf", "pdf <days> <file> [font.ttf] - export a PDF report"),
    ("reset", "Wipe everything and restore defaults"),
    ("exit", "Leave the shell"),
    ("quit", "Leave the shell"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    store: FluidStore,
    selected_date_ms: i64,
    pub mode: CliMode,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, FluidError> {
        let storage = JsonStorage::new_default()?;
        let store = FluidStore::open(Box::new(storage));
        Ok(Self {
            store,
            selected_date_ms: Local::now().timestamp_millis(),
            mode,
            running: true,
        })
    }

    pub fn command_names() -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub fn prompt(&self) -> String {
        match self.selected_day() {
            Some(date) if !self.selected_is_today() => format!("fluid {}> ", date),
            _ => "fluid> ".into(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, FluidError> {
        match command {
            "help" => self.cmd_help(),
            "add" => self.cmd_add(args)?,
            "rm" => self.cmd_remove(args)?,
            "list" => self.cmd_list(),
            "date" => self.cmd_date(args)?,
            "balance" => self.cmd_balance(),
            "status" => self.cmd_status(),
            "trend" => self.cmd_trend(),
            "report" => self.cmd_report(args)?,
            "categories" => self.cmd_categories(),
            "catadd" => self.cmd_category_add(args)?,
            "catrm" => self.cmd_category_remove(args)?,
            "limit" => self.cmd_limit(args)?,
            "export" => self.cmd_export(args)?,
            "import" => self.cmd_import(args)?,
            "pdf" => self.cmd_pdf(args)?,
            "reset" => self.cmd_reset()?,
            "exit" | "quit" => return Ok(LoopControl::Exit),
            unknown => {
                output::error(format!("Unknown command `{}`.", unknown));
                if let Some(candidate) = suggest(unknown) {
                    output::info(format!("Did you mean `{}`?", candidate));
                }
            }
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_help(&self) {
        output::section("Commands");
        for (name, description) in COMMANDS {
            println!("  {:<12} {}", name, description);
        }
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<(), FluidError> {
        if args.len() < 2 {
            return Err(FluidError::InvalidInput(
                "usage: add <category> <amount> [note]".into(),
            ));
        }
        let category = self.find_category(args[0]);
        let amount = parse_amount(args[1])?;
        let mut record = FluidRecord::new(category.kind, category.id.clone(), amount)
            .with_timestamp(self.record_timestamp());
        if args.len() > 2 {
            record = record.with_note(args[2..].join(" "));
        }
        let id = self.store.add_record(record)?;
        output::success(format!(
            "Logged {} {} mL ({}). id: {}",
            category.label, amount, category.kind, id
        ));
        Ok(())
    }

    fn cmd_remove(&mut self, args: &[&str]) -> Result<(), FluidError> {
        let id = args
            .first()
            .ok_or_else(|| FluidError::InvalidInput("usage: rm <record-id>".into()))?;
        if self.store.remove_record(id)? {
            output::success("Record removed.");
        } else {
            output::warning(format!("No record with id `{}`.", id));
        }
        Ok(())
    }

    fn cmd_list(&self) {
        let journal = self.store.journal();
        let records = ReportService::day_records(journal, self.selected_date_ms);
        if records.is_empty() {
            output::info("No records on the selected day.");
            return;
        }
        output::section(format!(
            "Records for {}",
            self.selected_day().unwrap_or_default()
        ));
        for record in &records {
            let category = CategoryService::resolve(journal, &record.category_id);
            let time = to_local(record.timestamp)
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_default();
            let direction = match record.kind {
                FluidType::In => "IN ".green(),
                FluidType::Out => "OUT".red(),
            };
            println!(
                "  {}  {}  {:>8} mL  {:<14} {}  {}",
                time,
                direction,
                record.amount,
                category.label,
                record.note.as_deref().unwrap_or(""),
                record.id.dimmed()
            );
        }
        self.cmd_balance();
    }

    fn cmd_date(&mut self, args: &[&str]) -> Result<(), FluidError> {
        match args.first() {
            None => {
                output::info(format!(
                    "Selected day: {}",
                    self.selected_day().unwrap_or_default()
                ));
            }
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    FluidError::InvalidInput(format!("`{}` is not a YYYY-MM-DD date", raw))
                })?;
                // Noon keeps the reference clear of both midnight boundaries.
                self.selected_date_ms = local_day_start_ms(date) + DAY_MS / 2;
                output::success(format!("Selected day set to {}.", date));
            }
        }
        Ok(())
    }

    fn cmd_balance(&self) {
        let report = ReportService::day_report(self.store.journal(), self.selected_date_ms);
        println!(
            "  In +{} / Out -{} / Balance {} {}",
            report.total_in, report.total_out, report.balance, report.unit
        );
    }

    fn cmd_status(&self) {
        let status = ReportService::limit_status(self.store.journal(), Local::now());
        let level = match status.level {
            LimitLevel::Safe => "safe".green(),
            LimitLevel::Warning => "warning".yellow(),
            LimitLevel::Danger => "danger".red(),
        };
        println!(
            "  {:.0}% of {} mL used, {} mL remaining [{}]",
            status.percent, status.limit, status.remaining, level
        );
    }

    fn cmd_trend(&self) {
        let trend = ReportService::weekly_trend(self.store.journal(), Local::now());
        output::section("Last 7 days");
        println!("  {:<8} {:>8} {:>8} {:>9}", "Date", "In", "Out", "Balance");
        for point in trend {
            println!(
                "  {:<8} {:>8} {:>8} {:>9}",
                point.date, point.total_in, point.total_out, point.balance
            );
        }
    }

    fn cmd_report(&self, args: &[&str]) -> Result<(), FluidError> {
        let days = parse_days(args.first().copied())?;
        let report = ReportService::range_report(self.store.journal(), days, Local::now());
        output::section(format!(
            "{} ({} - {})",
            report.period, report.start_date, report.end_date
        ));
        println!(
            "  In +{} / Out -{} / Net {} / Avg {} mL per day",
            report.total_in, report.total_out, report.net_balance, report.avg_balance
        );
        for day in &report.day_groups {
            println!(
                "  {}  {:>2} records  In +{} / Out -{} / Net {}",
                day.date,
                day.records.len(),
                day.daily_in,
                day.daily_out,
                day.daily_balance
            );
        }
        if report.day_groups.is_empty() {
            output::info("No records in this range.");
        }
        Ok(())
    }

    fn cmd_categories(&self) {
        output::section("Categories");
        for category in CategoryService::list(self.store.journal()) {
            let marker = if category.is_default { "system" } else { "custom" };
            println!(
                "  {:<16} {}  {:<14} {:<4} {}",
                category.id,
                category.icon,
                category.label,
                category.kind.to_string(),
                marker.dimmed()
            );
        }
    }

    fn cmd_category_add(&mut self, args: &[&str]) -> Result<(), FluidError> {
        if args.len() < 2 {
            return Err(FluidError::InvalidInput(
                "usage: catadd <in|out> <label> [icon]".into(),
            ));
        }
        let kind = parse_direction(args[0])?;
        let created = self
            .store
            .add_custom_category(args[1], kind, args.get(2).copied())?;
        output::success(format!(
            "Added category {} {} ({}). id: {}",
            created.icon, created.label, created.kind, created.id
        ));
        Ok(())
    }

    fn cmd_category_remove(&mut self, args: &[&str]) -> Result<(), FluidError> {
        let id = args
            .first()
            .ok_or_else(|| FluidError::InvalidInput("usage: catrm <category-id>".into()))?;
        if self.store.remove_category(id)? {
            output::success("Category removed. Existing records fall back to `Unknown`.");
        } else {
            output::warning(format!(
                "`{}` is a system category or does not exist; nothing removed.",
                id
            ));
        }
        Ok(())
    }

    fn cmd_limit(&mut self, args: &[&str]) -> Result<(), FluidError> {
        match args.first() {
            None => output::info(format!("Daily limit: {} mL", self.store.daily_limit())),
            Some(raw) => {
                let limit = parse_amount(raw)?;
                if limit <= 0.0 {
                    return Err(FluidError::InvalidInput(
                        "the daily limit must be positive".into(),
                    ));
                }
                self.store.set_daily_limit(limit)?;
                output::success(format!("Daily limit set to {} mL.", limit));
            }
        }
        Ok(())
    }

    fn cmd_export(&self, args: &[&str]) -> Result<(), FluidError> {
        let path = args
            .first()
            .ok_or_else(|| FluidError::InvalidInput("usage: export <file>".into()))?;
        fs::write(path, self.store.export_json()?)?;
        output::success(format!("Backup written to {}.", path));
        Ok(())
    }

    fn cmd_import(&mut self, args: &[&str]) -> Result<(), FluidError> {
        let path = args
            .first()
            .ok_or_else(|| FluidError::InvalidInput("usage: import <file>".into()))?;
        if !self.confirm("Replace ALL current records, categories, and the limit?")? {
            output::info("Import cancelled.");
            return Ok(());
        }
        let payload = fs::read_to_string(path)?;
        self.store.import_json(&payload)?;
        output::success(format!(
            "Imported {} records and {} categories.",
            self.store.records().len(),
            self.store.categories().len()
        ));
        Ok(())
    }

    fn cmd_pdf(&self, args: &[&str]) -> Result<(), FluidError> {
        if args.len() < 2 {
            return Err(FluidError::InvalidInput(
                "usage: pdf <days> <file> [font.ttf]".into(),
            ));
        }
        let days = parse_days(Some(args[0]))?;
        let font_path = match args.get(2) {
            Some(path) => path.to_string(),
            None => env::var("FLUID_CORE_FONT").map_err(|_| {
                FluidError::InvalidInput(
                    "no font given; pass a .ttf path or set FLUID_CORE_FONT".into(),
                )
            })?,
        };
        let journal = self.store.journal();
        let report = ReportService::range_report(journal, days, Local::now());
        let data = PdfReportData::from_range_report(journal, &report);
        let exporter = PdfExporter::new(FileFontProvider::new(font_path));
        exporter.save(&data, Path::new(args[1]))?;
        output::success(format!("PDF report written to {}.", args[1]));
        Ok(())
    }

    fn cmd_reset(&mut self) -> Result<(), FluidError> {
        if !self.confirm("Delete ALL records and custom categories?")? {
            output::info("Reset cancelled.");
            return Ok(());
        }
        self.store.reset()?;
        output::success("All data cleared; defaults restored.");
        Ok(())
    }

    fn find_category(&self, needle: &str) -> Category {
        let journal = self.store.journal();
        if let Some(category) = journal.category(needle) {
            return category.clone();
        }
        if let Some(category) = journal
            .categories
            .iter()
            .find(|category| category.label.eq_ignore_ascii_case(needle))
        {
            return category.clone();
        }
        output::warning(format!(
            "Unknown category `{}`; recording against the placeholder.",
            needle
        ));
        Category::placeholder()
    }

    fn record_timestamp(&self) -> i64 {
        let now_ms = Local::now().timestamp_millis();
        if same_local_day(self.selected_date_ms, now_ms) {
            now_ms
        } else {
            self.selected_date_ms
        }
    }

    fn selected_day(&self) -> Option<String> {
        to_local(self.selected_date_ms).map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    fn selected_is_today(&self) -> bool {
        same_local_day(self.selected_date_ms, Local::now().timestamp_millis())
    }

    fn confirm(&self, prompt: &str) -> Result<bool, FluidError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|err| FluidError::InvalidInput(format!("prompt failed: {}", err)))
    }
}

fn parse_amount(raw: &str) -> Result<f64, FluidError> {
    raw.parse::<f64>()
        .map_err(|_| FluidError::InvalidInput(format!("`{}` is not a number", raw)))
}

fn parse_days(raw: Option<&str>) -> Result<u32, FluidError> {
    let raw = raw.ok_or_else(|| FluidError::InvalidInput("a day count is required".into()))?;
    match raw.parse::<u32>() {
        Ok(days) if days >= 1 => Ok(days),
        _ => Err(FluidError::InvalidInput(format!(
            "`{}` is not a positive day count",
            raw
        ))),
    }
}

fn parse_direction(raw: &str) -> Result<FluidType, FluidError> {
    match raw.to_ascii_lowercase().as_str() {
        "in" => Ok(FluidType::In),
        "out" => Ok(FluidType::Out),
        _ => Err(FluidError::InvalidInput(format!(
            "`{}` is neither `in` nor `out`",
            raw
        ))),
    }
}

fn suggest(command: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .min_by_key(|name| levenshtein(name, command))
        .filter(|name| levenshtein(name, command) <= 2)
}
