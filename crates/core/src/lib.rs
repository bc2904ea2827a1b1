pub mod clock;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use clock::{Clock, SystemClock};
use models::{
    analytics::{BudgetStatus, DashboardStats},
    bill::{Bill, LineItem},
    category::{Category, PaymentMethod},
    chart::PeriodTotal,
    ledger::LedgerState,
    query::BillQuery,
    settings::{Settings, Theme},
};
use services::{
    analytics_service::AnalyticsService, chart_service::ChartService,
    export_service::ExportService, ledger_service::LedgerService,
    receipt_service::ReceiptService, settings_service::SettingsService,
};
use storage::{manager::StorageManager, memory::MemoryStore, traits::KeyValueStore};

use errors::CoreError;

/// Main entry point for the Bill Ledger core library.
///
/// Owns the draft, the bill history, the user settings, and the store they
/// are persisted to. There is exactly one per session, created by the
/// application's entry point and passed by reference to the presentation
/// layer.
#[must_use]
pub struct BillLedger {
    state: LedgerState,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ledger_service: LedgerService,
    analytics_service: AnalyticsService,
    chart_service: ChartService,
    export_service: ExportService,
    receipt_service: ReceiptService,
    settings_service: SettingsService,
    /// Set once the PIN has been entered correctly this session.
    unlocked: bool,
}

impl std::fmt::Debug for BillLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillLedger")
            .field("store", &self.store.name())
            .field("draft_items", &self.state.draft_items.len())
            .field("bills", &self.state.bills.len())
            .field("theme", &self.settings.theme)
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl BillLedger {
    /// Open a ledger over `store`, loading bills and settings from it.
    pub fn open(store: Box<dyn KeyValueStore>) -> Result<Self, CoreError> {
        Self::open_with_clock(store, Box::new(SystemClock))
    }

    /// Open a ledger with an explicit time source.
    pub fn open_with_clock(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let bills = StorageManager::load_bills(store.as_ref())?;
        let settings = StorageManager::load_settings(store.as_ref())?;
        info!(store = store.name(), bills = bills.len(), "ledger opened");
        Ok(Self::build(LedgerState::with_bills(bills), settings, store, clock))
    }

    /// A fresh ledger backed by a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self::build(
            LedgerState::new(),
            Settings::default(),
            Box::new(MemoryStore::new()),
            Box::new(SystemClock),
        )
    }

    // ── Draft ───────────────────────────────────────────────────────

    /// Validate and add an item to the draft.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: f64,
        quantity: u32,
        category: Category,
        payment_method: PaymentMethod,
    ) -> Result<LineItem, CoreError> {
        let item = self.ledger_service.add_item(
            &mut self.state,
            name,
            unit_price,
            quantity,
            category,
            payment_method,
        )?;
        debug!(item = %item.id, name = %item.name, line_total = item.line_total, "draft item added");
        Ok(item)
    }

    /// Remove a draft item. Unknown ids are ignored and return `false`.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        let removed = self.ledger_service.remove_item(&mut self.state, item_id);
        if removed {
            debug!(item = %item_id, "draft item removed");
        }
        removed
    }

    pub fn clear_draft(&mut self) {
        self.ledger_service.clear_draft(&mut self.state);
        debug!("draft cleared");
    }

    #[must_use]
    pub fn draft_items(&self) -> &[LineItem] {
        &self.state.draft_items
    }

    #[must_use]
    pub fn draft_total(&self) -> f64 {
        self.ledger_service.draft_total(&self.state)
    }

    // ── Bills ───────────────────────────────────────────────────────

    /// Turn the draft into a persisted bill and clear the draft.
    ///
    /// If the store rejects the write, the bill is dropped again and the
    /// draft is kept, so the user can retry without re-entering items.
    pub fn commit_bill(&mut self) -> Result<Bill, CoreError> {
        let bill = self
            .ledger_service
            .build_bill(&self.state, self.clock.now())?;

        self.state.bills.push(bill.clone());
        if let Err(e) = StorageManager::save_bills(self.store.as_mut(), &self.state.bills) {
            self.state.bills.pop();
            warn!(error = %e, "bill not saved; draft kept");
            return Err(e);
        }

        self.ledger_service.clear_draft(&mut self.state);
        info!(bill = %bill.id, items = bill.items.len(), total = bill.total, "bill generated");
        Ok(bill)
    }

    /// Delete a bill. Returns `false` (and writes nothing) if the id is unknown.
    /// If the store rejects the write, the bill is put back where it was.
    pub fn delete_bill(&mut self, bill_id: Uuid) -> Result<bool, CoreError> {
        let Some((idx, bill)) = self.ledger_service.take_bill(&mut self.state, bill_id) else {
            return Ok(false);
        };

        if let Err(e) = StorageManager::save_bills(self.store.as_mut(), &self.state.bills) {
            self.state.bills.insert(idx, bill);
            warn!(error = %e, bill = %bill_id, "bill deletion not saved; restored");
            return Err(e);
        }

        info!(bill = %bill_id, "bill deleted");
        Ok(true)
    }

    #[must_use]
    pub fn get_bill(&self, bill_id: Uuid) -> Option<&Bill> {
        self.state.bills.iter().find(|b| b.id == bill_id)
    }

    /// All bills in insertion (chronological) order.
    #[must_use]
    pub fn bills(&self) -> &[Bill] {
        &self.state.bills
    }

    #[must_use]
    pub fn bill_count(&self) -> usize {
        self.state.bills.len()
    }

    /// Bills matching `query`, newest first.
    pub fn query_bills<'a>(&'a self, query: &'a BillQuery) -> impl Iterator<Item = &'a Bill> + 'a {
        let today = self.clock.today();
        self.ledger_service.query_bills(&self.state, query, today)
    }

    /// Plain-text receipt for a bill.
    pub fn render_receipt(&self, bill_id: Uuid) -> Result<String, CoreError> {
        let bill = self
            .get_bill(bill_id)
            .ok_or_else(|| CoreError::BillNotFound(bill_id.to_string()))?;
        Ok(self.receipt_service.render(bill))
    }

    // ── Dashboard & Reports ─────────────────────────────────────────

    #[must_use]
    pub fn aggregate(&self) -> DashboardStats {
        self.analytics_service
            .aggregate(&self.state.bills, self.clock.today())
    }

    #[must_use]
    pub fn aggregate_by_category(&self) -> BTreeMap<Category, f64> {
        self.chart_service.by_category(&self.state.bills)
    }

    #[must_use]
    pub fn average_by_category(&self) -> BTreeMap<Category, f64> {
        self.chart_service.average_by_category(&self.state.bills)
    }

    #[must_use]
    pub fn aggregate_by_month(&self) -> Vec<PeriodTotal> {
        self.chart_service.by_month(&self.state.bills)
    }

    #[must_use]
    pub fn aggregate_cumulative_by_day(&self) -> Vec<PeriodTotal> {
        self.chart_service.cumulative_by_day(&self.state.bills)
    }

    /// Spending against the monthly budget, if one is set.
    #[must_use]
    pub fn budget_status(&self) -> Option<BudgetStatus> {
        self.analytics_service.budget_status(
            &self.state.bills,
            self.settings.monthly_budget,
            self.clock.today(),
        )
    }

    // ── Export / Import ─────────────────────────────────────────────

    pub fn export_bills_to_json(&self) -> Result<String, CoreError> {
        self.export_service.to_json(&self.state.bills)
    }

    #[must_use]
    pub fn export_bills_to_csv(&self) -> String {
        self.export_service.to_csv(&self.state.bills)
    }

    /// `bills_export_<YYYY-MM-DD>.json` for today's date.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        self.export_service.file_name(self.clock.today())
    }

    /// Import bills from a JSON export. All-or-nothing: any invalid bill or
    /// a failed write leaves the history unchanged.
    /// Returns the number of bills imported.
    pub fn import_bills_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming = self.export_service.from_json(json)?;
        let prepared = self.ledger_service.prepare_import(&self.state, incoming)?;
        let count = prepared.len();
        if count == 0 {
            return Ok(0);
        }

        let mut merged = self.state.bills.clone();
        merged.extend(prepared);
        merged.sort_by_key(|b| b.created_at);

        StorageManager::save_bills(self.store.as_mut(), &merged)?;
        self.state.bills = merged;
        info!(count, total_bills = self.state.bills.len(), "bills imported");
        Ok(count)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set (`Some`) or clear (`None`) the monthly budget.
    pub fn set_monthly_budget(&mut self, budget: Option<f64>) -> Result<(), CoreError> {
        self.update_settings(|svc, s| svc.set_monthly_budget(s, budget))
    }

    /// Flip between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, CoreError> {
        self.update_settings(|_, s| {
            s.theme = s.theme.toggled();
            Ok(())
        })?;
        Ok(self.settings.theme)
    }

    pub fn set_appearance(
        &mut self,
        color_theme: Option<&str>,
        font_family: Option<&str>,
    ) -> Result<(), CoreError> {
        self.update_settings(|svc, s| svc.set_appearance(s, color_theme, font_family))
    }

    // ── PIN Lock ────────────────────────────────────────────────────

    /// Set a 4-digit PIN and enable the lock. The current session stays
    /// unlocked.
    pub fn set_pin(&mut self, pin: &str) -> Result<(), CoreError> {
        self.update_settings(|svc, s| svc.set_pin(s, pin))?;
        self.unlocked = true;
        info!("pin lock enabled");
        Ok(())
    }

    pub fn disable_pin(&mut self) -> Result<(), CoreError> {
        self.update_settings(|svc, s| {
            svc.disable_pin(s);
            Ok(())
        })?;
        info!("pin lock disabled");
        Ok(())
    }

    /// Check a PIN attempt. A correct PIN unlocks the session.
    pub fn verify_pin(&mut self, candidate: &str) -> bool {
        let ok = self.settings_service.verify_pin(&self.settings, candidate);
        if ok {
            self.unlocked = true;
        } else {
            warn!("incorrect pin entered");
        }
        ok
    }

    /// `true` while a PIN is enabled and has not been entered this session.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.settings.pin_enabled && !self.unlocked
    }

    /// Re-lock the session (no effect when no PIN is enabled).
    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Apply a change to a copy of the settings, persist it, and only then
    /// swap it in.
    fn update_settings<F>(&mut self, change: F) -> Result<(), CoreError>
    where
        F: FnOnce(&SettingsService, &mut Settings) -> Result<(), CoreError>,
    {
        let mut updated = self.settings.clone();
        change(&self.settings_service, &mut updated)?;
        if let Err(e) = StorageManager::save_settings(self.store.as_mut(), &updated) {
            warn!(error = %e, "settings not saved");
            return Err(e);
        }
        self.settings = updated;
        Ok(())
    }

    fn build(
        state: LedgerState,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            state,
            settings,
            store,
            clock,
            ledger_service: LedgerService::new(),
            analytics_service: AnalyticsService::new(),
            chart_service: ChartService::new(),
            export_service: ExportService::new(),
            receipt_service: ReceiptService::new(),
            settings_service: SettingsService::new(),
            unlocked: false,
        }
    }
}
