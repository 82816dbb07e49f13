//! High-level facade that owns a budget book, its store and the user's settings.

use std::path::PathBuf;

use tracing::{debug, info, warn};
use tribudget_config::{ConfigManager, Settings};
use tribudget_core::{
    storage::{BookRepository, KeyValueStore},
    AllocationService, CategoryService, Clock, CurrencyFormatter, Dashboard, DenominationFormatter,
    ExpenseService, OnboardingService, PeriodService, SummaryService, SystemClock,
};
use tribudget_domain::{
    AllocationReport, BudgetBook, BudgetRule, Category, Expense, ExpenseUpdate, PeriodTotal,
    SavingsGoal, YearMonth,
};
use tribudget_storage_json::{open_book_repository, JsonFileStore};
use uuid::Uuid;

use crate::errors::{BudgetError, Result};

const BOOK_DIR: &str = "book";

/// Every mutating call persists the book before returning.
pub struct BudgetApp<S: KeyValueStore> {
    repository: BookRepository<S>,
    config: Option<ConfigManager>,
    settings: Settings,
    book: BudgetBook,
    clock: Box<dyn Clock>,
}

impl BudgetApp<JsonFileStore> {
    /// Loads settings through `config` and the book from the configured data directory.
    pub fn open(config: ConfigManager) -> Result<Self> {
        let settings = config.load_or_default();
        let data_dir = settings.resolve_data_dir();
        let mut app = Self::open_in(data_dir, settings)?;
        app.config = Some(config);
        Ok(app)
    }

    /// Opens a file-backed book under `data_dir` without a settings file.
    pub fn open_in(data_dir: PathBuf, settings: Settings) -> Result<Self> {
        let repository = open_book_repository(data_dir.join(BOOK_DIR))?;
        Ok(Self::with_repository(repository, settings))
    }
}

impl<S: KeyValueStore> BudgetApp<S> {
    pub fn with_store(store: S, settings: Settings) -> Self {
        Self::with_repository(BookRepository::new(store), settings)
    }

    fn with_repository(repository: BookRepository<S>, settings: Settings) -> Self {
        let report = repository.load_report();
        for warning in &report.warnings {
            warn!(%warning, "book key restored to default");
        }
        info!(
            expenses = report.book.expenses.len(),
            categories = report.book.categories.len(),
            "budget book loaded"
        );
        Self {
            repository,
            config: None,
            settings,
            book: report.book,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn book(&self) -> &BudgetBook {
        &self.book
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn repository(&self) -> &BookRepository<S> {
        &self.repository
    }

    /// Replaces the settings, writing them through the config manager when one is attached.
    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        if let Some(config) = &self.config {
            config.save(&settings)?;
        }
        self.settings = settings;
        Ok(())
    }

    pub fn formatter(&self) -> DenominationFormatter {
        DenominationFormatter::new(self.settings.denomination_options())
    }

    pub fn format_amount(&self, amount: f64) -> String {
        self.formatter().format_amount(amount, &self.settings.currency)
    }

    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.book)?;
        Ok(())
    }

    /// Runs `change` against a copy of the book and swaps the copy in only once it is stored.
    fn commit<T>(&mut self, change: impl FnOnce(&mut BudgetBook) -> Result<T>) -> Result<T> {
        let mut draft = self.book.clone();
        let value = change(&mut draft)?;
        if let Err(err) = self.repository.save(&draft) {
            warn!(error = %err, "book not saved, change discarded");
            return Err(err.into());
        }
        self.book = draft;
        Ok(value)
    }

    pub fn complete_onboarding(&mut self, income: f64, rule: BudgetRule) -> Result<()> {
        self.commit(|book| Ok(OnboardingService::complete(book, income, rule)?))
    }

    /// Returns to the first-run state; records and sample data are kept.
    pub fn reset_onboarding(&mut self) -> Result<()> {
        self.commit(|book| {
            OnboardingService::reset(book);
            Ok(())
        })
    }

    pub fn seed_sample_data(&mut self) -> Result<usize> {
        let today = self.clock.today();
        self.commit(|book| Ok(OnboardingService::seed_sample_data(book, today)))
    }

    pub fn clear_sample_data(&mut self) -> Result<usize> {
        self.commit(|book| Ok(OnboardingService::clear_sample_data(book)))
    }

    pub fn set_income(&mut self, income: f64) -> Result<()> {
        if !(income.is_finite() && income >= 0.0) {
            return Err(BudgetError::InvalidInput(format!(
                "income must be a non-negative number, got {income}"
            )));
        }
        self.commit(|book| {
            book.profile.income = income;
            book.touch();
            Ok(())
        })
    }

    pub fn set_rule(&mut self, rule: BudgetRule) -> Result<()> {
        if !rule.is_balanced() {
            warn!(total = rule.total(), "budget rule does not add up to 100");
        }
        self.commit(|book| {
            book.profile.rule = rule;
            book.touch();
            Ok(())
        })
    }

    pub fn set_limit_mode(&mut self, enabled: bool) -> Result<()> {
        self.commit(|book| {
            book.profile.use_limit_mode = enabled;
            book.touch();
            Ok(())
        })
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<Uuid> {
        self.commit(|book| Ok(ExpenseService::add(book, expense)?))
    }

    pub fn update_expense(&mut self, id: Uuid, changes: ExpenseUpdate) -> Result<()> {
        self.commit(|book| Ok(ExpenseService::update(book, id, changes)?))
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<Expense> {
        self.commit(|book| Ok(ExpenseService::remove(book, id)?))
    }

    pub fn recent_expenses(&self, limit: usize) -> Vec<&Expense> {
        ExpenseService::list_recent(&self.book, limit)
    }

    pub fn add_category(&mut self, category: Category) -> Result<Uuid> {
        self.commit(|book| Ok(CategoryService::add(book, category)?))
    }

    pub fn update_category(&mut self, id: Uuid, changes: Category) -> Result<()> {
        self.commit(|book| Ok(CategoryService::update(book, id, changes)?))
    }

    pub fn remove_category(&mut self, id: Uuid) -> Result<Category> {
        self.commit(|book| Ok(CategoryService::remove(book, id)?))
    }

    pub fn set_category_limit(&mut self, id: Uuid, amount: Option<f64>) -> Result<()> {
        self.commit(|book| {
            match amount {
                Some(amount) => CategoryService::set_limit(book, id, amount)?,
                None => {
                    CategoryService::clear_limit(book, id);
                }
            }
            Ok(())
        })
    }

    pub fn set_goal(&mut self, id: Uuid, goal: Option<SavingsGoal>) -> Result<()> {
        self.commit(|book| {
            match goal {
                Some(goal) => CategoryService::set_goal(book, id, goal)?,
                None => {
                    CategoryService::clear_goal(book, id);
                }
            }
            Ok(())
        })
    }

    /// Allocation for a `"<year>-<month>"` key; `None` or a malformed key covers all records.
    pub fn allocation(&self, period_key: Option<&str>) -> AllocationReport {
        let period = period_key.and_then(|key| {
            let parsed = key.parse::<YearMonth>().ok();
            if parsed.is_none() {
                debug!(key, "unrecognised period key, allocating all records");
            }
            parsed
        });
        AllocationService::allocate_period(
            &self.book.profile,
            &self.book.categories,
            &self.book.expenses,
            period,
        )
    }

    pub fn dashboard(&self, period: Option<YearMonth>) -> Dashboard {
        SummaryService::dashboard(
            &self.book,
            period,
            &*self.clock,
            &self.formatter(),
            &self.settings.currency,
        )
    }

    /// Selectable month keys, most recent first.
    pub fn period_keys(&self) -> Vec<String> {
        PeriodService::available_keys(&self.book.expenses, self.clock.today())
    }

    pub fn monthly_totals(&self) -> Vec<PeriodTotal> {
        PeriodService::monthly_totals(&self.book.expenses)
    }
}
