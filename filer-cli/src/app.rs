use std::fs::File;

use anyhow::{Context, Result};
use filer_core::store::StoreRegistry;
use filer_core::{
    FieldValue, FilingSession, MilestoneNotifier, StateStore, SubStepData, TaxSchedule, TaxYear,
    WizardError, annualize_monthly,
};
use filer_data::SlabScheduleLoader;
use filer_db_sqlite::SqliteStoreFactory;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::render;
use crate::utils::{parse_assignment, parse_decimal};

/// Store key holding the set of milestones already celebrated.
pub const MILESTONES_KEY: &str = "milestones";

/// Registry with every backend the CLI ships with.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::with_builtin();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Runs one command and returns the text to print.
pub async fn execute(command: Command, config: &AppConfig) -> Result<String> {
    match command {
        Command::Calc {
            year,
            income,
            monthly,
            schedule,
        } => {
            let mut amount = parse_decimal(&income)?;
            if monthly {
                amount = annualize_monthly(amount);
            }
            let schedule = match schedule {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open: {}", path.display()))?;
                    let mut schedules = SlabScheduleLoader::parse(file)
                        .with_context(|| format!("Failed to load slabs: {}", path.display()))?;
                    schedules.remove(&year).with_context(|| {
                        format!("{} has no slabs for tax year {year}", path.display())
                    })?
                }
                None => TaxSchedule::for_year(year),
            };
            Ok(calculate(year, &schedule, amount))
        }
        Command::Schedule { year } => Ok(render::schedule(year, &TaxSchedule::for_year(year))),
        command => {
            debug!(backend = %config.store.backend, "opening store");
            let store = build_registry()
                .create(&config.store)
                .await
                .with_context(|| format!("Failed to open '{}' store", config.store.backend))?;
            let mut wizard = Wizard::open(store).await;
            wizard.run(command).await
        }
    }
}

fn calculate(year: TaxYear, schedule: &TaxSchedule, annual_income: Decimal) -> String {
    let result = schedule.breakdown(annual_income);
    info!(%year, income = %annual_income, tax = %result.tax, "calculated tax");
    render::breakdown(year, &result, schedule.slabs().len())
}

/// A filing session plus the milestones it has already celebrated.
pub struct Wizard {
    session: FilingSession,
    notifier: MilestoneNotifier,
}

impl Wizard {
    pub async fn open(store: Box<dyn StateStore>) -> Self {
        let notifier = load_notifier(store.as_ref()).await;
        let session = FilingSession::open(store).await;
        Self { session, notifier }
    }

    pub fn session(&self) -> &FilingSession {
        &self.session
    }

    pub fn notifier(&self) -> &MilestoneNotifier {
        &self.notifier
    }

    /// Runs a wizard command. `calc` and `schedule` are handled by [`execute`].
    pub async fn run(&mut self, command: Command) -> Result<String> {
        let mut lines = Vec::new();

        match command {
            Command::Status => lines.push(render::status(self.session.state())),
            Command::Summary { json } => {
                let summary = self.session.progress_summary();
                lines.push(if json {
                    serde_json::to_string_pretty(&summary)?
                } else {
                    render::summary(&summary)
                });
            }
            Command::Set { assignments } => {
                let data = self.parse_assignments(&assignments)?;
                let count = data.len();
                self.session.update_sub_step_data(data).await?;
                lines.push(format!(
                    "Saved {count} field(s) on {}",
                    self.session.state().current_sub_step().title
                ));
            }
            Command::Complete => {
                self.session.complete_sub_step().await?;
                let sub_step = self.session.state().current_sub_step();
                lines.push(format!("Completed {}", sub_step.title));
                let missing = sub_step.missing_required_fields();
                if !missing.is_empty() {
                    lines.push(format!("Note: required fields still empty: {}", missing.join(", ")));
                }
            }
            Command::Next => {
                if self.session.state().can_go_next() {
                    self.session.go_to_next().await;
                    lines.push(render::position(self.session.state()));
                } else {
                    lines.push("Already at the last sub-step.".to_string());
                }
            }
            Command::Prev => {
                if self.session.state().can_go_previous() {
                    self.session.go_to_previous().await;
                    lines.push(render::position(self.session.state()));
                } else {
                    lines.push("Already at the first sub-step.".to_string());
                }
            }
            Command::Goto { step, sub_step } => {
                let position = step.checked_sub(1).zip(sub_step.checked_sub(1));
                let (step_index, sub_step_index) =
                    position.ok_or(WizardError::PositionOutOfRange { step, sub_step })?;
                self.session.go_to_step(step_index, sub_step_index).await?;
                lines.push(render::position(self.session.state()));
            }
            Command::Submit => {
                if self.session.state().submitted() {
                    return Err(WizardError::AlreadySubmitted.into());
                }
                self.session.submit_filing().await;
                lines.push(format!(
                    "Filing submitted at {}% complete.",
                    self.session.state().progress_percentage()
                ));
            }
            Command::Reset => {
                self.reset().await;
                lines.push("Filing reset. Starting from Basic Information.".to_string());
            }
            Command::Calc { .. } | Command::Schedule { .. } => {
                anyhow::bail!("calc and schedule do not use the filing store")
            }
        }

        if let Some(message) = self.celebrate().await {
            lines.push(message);
        }
        if let Some(warning) = self.session.storage_warning() {
            lines.push(format!("Warning: {warning}"));
        }
        Ok(lines.join("\n"))
    }

    fn parse_assignments(&self, assignments: &[String]) -> Result<SubStepData> {
        let kind = self.session.state().current_sub_step().kind;
        let mut data = SubStepData::new();

        for assignment in assignments {
            let (name, raw) = parse_assignment(assignment)?;
            let spec = kind.field(name).ok_or_else(|| WizardError::UnknownField {
                sub_step: kind,
                field: name.to_string(),
            })?;
            let value = FieldValue::parse_for(spec.kind, raw)
                .with_context(|| format!("Invalid value for '{}'", spec.label))?;
            data.insert(name.to_string(), value);
        }

        Ok(data)
    }

    /// Message for a newly crossed milestone, recording it as fired.
    async fn celebrate(&mut self) -> Option<String> {
        let progress = self.session.state().progress_percentage();
        let milestone = self.notifier.evaluate(progress)?;
        info!(%milestone, progress, "milestone reached");
        self.save_notifier().await;
        Some(format!("🎉 {milestone}: {}", milestone.message()))
    }

    async fn reset(&mut self) {
        self.session.reset_filing().await;
        self.notifier.clear();
        if let Err(error) = self.session.store().reset(MILESTONES_KEY).await {
            warn!(%error, "could not clear saved milestones");
        }
    }

    async fn save_notifier(&self) {
        if !self.session.is_persistent() {
            return;
        }
        let result = match serde_json::to_string(&self.notifier) {
            Ok(json) => self.session.store().write(MILESTONES_KEY, &json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(error) = result {
            warn!(%error, "could not save milestones");
        }
    }
}

async fn load_notifier(store: &dyn StateStore) -> MilestoneNotifier {
    match store.read(MILESTONES_KEY).await {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|error| {
            warn!(%error, "discarding unreadable milestones");
            MilestoneNotifier::new()
        }),
        Ok(None) => MilestoneNotifier::new(),
        Err(error) => {
            warn!(%error, "could not read milestones");
            MilestoneNotifier::new()
        }
    }
}
