// ═══════════════════════════════════════════════════════════════════
// Service Tests: LedgerService, AnalyticsService, ChartService,
// ExportService, ReceiptService, SettingsService, SearchDebouncer
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, NaiveDateTime};
use std::time::{Duration, Instant};

use bill_ledger_core::errors::CoreError;
use bill_ledger_core::models::bill::{Bill, LineItem};
use bill_ledger_core::models::category::{Category, PaymentMethod};
use bill_ledger_core::models::ledger::LedgerState;
use bill_ledger_core::models::query::BillQuery;
use bill_ledger_core::models::settings::Settings;
use bill_ledger_core::services::analytics_service::AnalyticsService;
use bill_ledger_core::services::chart_service::ChartService;
use bill_ledger_core::services::export_service::ExportService;
use bill_ledger_core::services::ledger_service::LedgerService;
use bill_ledger_core::services::receipt_service::ReceiptService;
use bill_ledger_core::services::search_debouncer::{SearchDebouncer, SEARCH_DEBOUNCE};
use bill_ledger_core::services::settings_service::SettingsService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(h, min, 0).unwrap()
}

fn item(name: &str, price: f64, qty: u32, category: Category) -> LineItem {
    LineItem::new(name, price, qty, category, PaymentMethod::Cash)
}

fn bill(created_at: NaiveDateTime, items: Vec<LineItem>) -> Bill {
    Bill::new(items, created_at)
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService
// ═══════════════════════════════════════════════════════════════════

mod ledger_service {
    use super::*;

    #[test]
    fn add_item_appends_in_order() {
        let svc = LedgerService::new();
        let mut state = LedgerState::new();
        svc.add_item(&mut state, "First", 1.0, 1, Category::General, PaymentMethod::Cash)
            .unwrap();
        svc.add_item(&mut state, "Second", 2.0, 1, Category::Food, PaymentMethod::Card)
            .unwrap();
        let names: Vec<&str> = state.draft_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn add_item_error_messages() {
        let svc = LedgerService::new();
        let mut state = LedgerState::new();
        let err = svc
            .add_item(&mut state, "", 1.0, 1, Category::General, PaymentMethod::Cash)
            .unwrap_err();
        assert!(err.to_string().contains("name"));
        let err = svc
            .add_item(&mut state, "X", -2.0, 1, Category::General, PaymentMethod::Cash)
            .unwrap_err();
        assert!(err.to_string().contains("-2"));
        let err = svc
            .add_item(&mut state, "X", 2.0, 0, Category::General, PaymentMethod::Cash)
            .unwrap_err();
        assert!(err.to_string().contains("Quantity"));
    }

    #[test]
    fn build_bill_does_not_mutate_state() {
        let svc = LedgerService::new();
        let mut state = LedgerState::new();
        svc.add_item(&mut state, "A", 4.0, 2, Category::General, PaymentMethod::Cash)
            .unwrap();
        let b = svc.build_bill(&state, at(2025, 1, 1, 10, 0)).unwrap();
        assert_eq!(b.total, 8.0);
        assert_eq!(state.draft_items.len(), 1);
        assert!(state.bills.is_empty());
    }

    #[test]
    fn build_bill_on_empty_draft() {
        let svc = LedgerService::new();
        let state = LedgerState::new();
        assert!(matches!(
            svc.build_bill(&state, at(2025, 1, 1, 10, 0)),
            Err(CoreError::EmptyDraft)
        ));
    }

    #[test]
    fn take_bill_reports_index() {
        let svc = LedgerService::new();
        let a = bill(at(2025, 1, 1, 9, 0), vec![item("A", 1.0, 1, Category::General)]);
        let b = bill(at(2025, 1, 2, 9, 0), vec![item("B", 1.0, 1, Category::General)]);
        let b_id = b.id;
        let mut state = LedgerState::with_bills(vec![a, b]);

        let (idx, taken) = svc.take_bill(&mut state, b_id).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(taken.id, b_id);
        assert!(svc.take_bill(&mut state, b_id).is_none());
    }

    #[test]
    fn query_is_lazy_and_reversed() {
        let svc = LedgerService::new();
        let bills: Vec<Bill> = (1..=5)
            .map(|day| bill(at(2025, 1, day, 9, 0), vec![item("X", 1.0, 1, Category::General)]))
            .collect();
        let newest = bills[4].id;
        let state = LedgerState::with_bills(bills);
        let query = BillQuery::All;
        let mut iter = svc.query_bills(&state, &query, d(2025, 1, 5));
        assert_eq!(iter.next().unwrap().id, newest);
        assert_eq!(iter.count(), 4);
    }

    #[test]
    fn prepare_import_rejects_duplicates_within_import() {
        let svc = LedgerService::new();
        let a = bill(at(2025, 1, 1, 9, 0), vec![item("A", 1.0, 1, Category::General)]);
        let err = svc
            .prepare_import(&LedgerState::new(), vec![a.clone(), a])
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn prepare_import_rejects_empty_bills_and_bad_items() {
        let svc = LedgerService::new();
        let empty = bill(at(2025, 1, 1, 9, 0), vec![]);
        assert!(svc.prepare_import(&LedgerState::new(), vec![empty]).is_err());

        let mut bad = item("A", 1.0, 1, Category::General);
        bad.quantity = 0;
        let with_bad = bill(at(2025, 1, 1, 9, 0), vec![bad]);
        assert!(svc.prepare_import(&LedgerState::new(), vec![with_bad]).is_err());
    }

    #[test]
    fn build_bill_rejects_non_finite_total() {
        let svc = LedgerService::new();
        let mut state = LedgerState::new();
        state.draft_items.push(item("Gold", 1e308, 1, Category::Other));
        state.draft_items.push(item("Gold", 1e308, 1, Category::Other));
        assert!(matches!(
            svc.build_bill(&state, at(2025, 1, 1, 10, 0)),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn prepare_import_rejects_overflowing_amounts() {
        let svc = LedgerService::new();
        let mut tampered = bill(at(2025, 1, 1, 9, 0), vec![item("Gold", 1e308, 1, Category::Other)]);
        tampered.items[0].quantity = 3;
        assert!(matches!(
            svc.prepare_import(&LedgerState::new(), vec![tampered]),
            Err(CoreError::ValidationError(_))
        ));

        let mut two = bill(
            at(2025, 1, 1, 9, 0),
            vec![
                item("Gold", 1e308, 1, Category::Other),
                item("Gold", 1.0, 1, Category::Other),
            ],
        );
        two.items[1].unit_price = 1e308;
        assert!(matches!(
            svc.prepare_import(&LedgerState::new(), vec![two]),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn prepare_import_sorts_oldest_first() {
        let svc = LedgerService::new();
        let late = bill(at(2025, 2, 1, 9, 0), vec![item("L", 1.0, 1, Category::General)]);
        let early = bill(at(2025, 1, 1, 9, 0), vec![item("E", 1.0, 1, Category::General)]);
        let prepared = svc
            .prepare_import(&LedgerState::new(), vec![late.clone(), early.clone()])
            .unwrap();
        assert_eq!(prepared[0].id, early.id);
        assert_eq!(prepared[1].id, late.id);
    }
}

// ═══════════════════════════════════════════════════════════════════
// AnalyticsService
// ═══════════════════════════════════════════════════════════════════

mod analytics_service {
    use super::*;

    #[test]
    fn empty_history() {
        let stats = AnalyticsService::new().aggregate(&[], d(2025, 1, 1));
        assert_eq!(stats, Default::default());
    }

    #[test]
    fn month_total_respects_year() {
        let svc = AnalyticsService::new();
        let bills = vec![
            bill(at(2024, 3, 10, 9, 0), vec![item("A", 40.0, 1, Category::General)]),
            bill(at(2025, 3, 10, 9, 0), vec![item("B", 60.0, 1, Category::General)]),
        ];
        assert_eq!(svc.month_total(&bills, d(2025, 3, 31)), 60.0);
    }

    #[test]
    fn budget_over() {
        let svc = AnalyticsService::new();
        let bills = vec![bill(at(2025, 3, 1, 9, 0), vec![item("A", 150.0, 1, Category::General)])];
        let status = svc.budget_status(&bills, Some(100.0), d(2025, 3, 2)).unwrap();
        assert!(status.over_budget);
        assert_eq!(status.remaining, -50.0);
        assert_eq!(status.percent_used, 150.0);
        assert!(svc.budget_status(&bills, None, d(2025, 3, 2)).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart_service {
    use super::*;

    #[test]
    fn empty_history_gives_empty_series() {
        let svc = ChartService::new();
        assert!(svc.by_category(&[]).is_empty());
        assert!(svc.average_by_category(&[]).is_empty());
        assert!(svc.by_month(&[]).is_empty());
        assert!(svc.cumulative_by_day(&[]).is_empty());
    }

    #[test]
    fn by_category_iterates_in_category_order() {
        let svc = ChartService::new();
        let bills = vec![bill(
            at(2025, 1, 1, 9, 0),
            vec![
                item("M", 5.0, 1, Category::Medicine),
                item("F", 5.0, 1, Category::Food),
                item("G", 5.0, 1, Category::General),
            ],
        )];
        let order: Vec<Category> = svc.by_category(&bills).into_keys().collect();
        assert_eq!(order, vec![Category::General, Category::Food, Category::Medicine]);
    }

    #[test]
    fn months_sort_across_years() {
        let svc = ChartService::new();
        let bills = vec![
            bill(at(2025, 1, 3, 9, 0), vec![item("A", 1.0, 1, Category::General)]),
            bill(at(2024, 12, 30, 9, 0), vec![item("B", 2.0, 1, Category::General)]),
            bill(at(2024, 9, 1, 9, 0), vec![item("C", 3.0, 1, Category::General)]),
        ];
        let labels: Vec<String> = svc.by_month(&bills).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["2024-09", "2024-12", "2025-01"]);
    }

    #[test]
    fn cumulative_is_non_decreasing_and_ends_at_total() {
        let svc = ChartService::new();
        let bills: Vec<Bill> = (1..=10)
            .map(|day| {
                bill(
                    at(2025, 1, day, 9, 0),
                    vec![item("X", f64::from(day), 1, Category::General)],
                )
            })
            .collect();
        let series = svc.cumulative_by_day(&bills);
        assert_eq!(series.len(), 10);
        assert!(series.windows(2).all(|w| w[0].total <= w[1].total));
        assert_eq!(series.last().unwrap().total, 55.0);
    }

    #[test]
    fn same_day_bills_share_one_point() {
        let svc = ChartService::new();
        let bills = vec![
            bill(at(2025, 1, 1, 9, 0), vec![item("A", 1.0, 1, Category::General)]),
            bill(at(2025, 1, 1, 21, 30), vec![item("B", 2.0, 1, Category::General)]),
        ];
        let series = svc.cumulative_by_day(&bills);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total, 3.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ExportService & ReceiptService
// ═══════════════════════════════════════════════════════════════════

mod export_service {
    use super::*;

    #[test]
    fn file_name_format() {
        assert_eq!(
            ExportService::new().file_name(d(2025, 7, 4)),
            "bills_export_2025-07-04.json"
        );
    }

    #[test]
    fn empty_export() {
        let svc = ExportService::new();
        assert_eq!(svc.to_json(&[]).unwrap(), "[]");
        assert!(svc.from_json("[]").unwrap().is_empty());
        assert_eq!(svc.to_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn csv_keeps_full_precision() {
        let svc = ExportService::new();
        let bills = vec![bill(
            at(2025, 1, 1, 9, 0),
            vec![item("Cable", 9.999, 2, Category::Electronics)],
        )];
        let csv = svc.to_csv(&bills);
        assert!(csv.contains(",Cable,Electronics,Cash,9.999,2,19.998\n"));
    }

    #[test]
    fn csv_escapes_quotes() {
        let svc = ExportService::new();
        let bills = vec![bill(
            at(2025, 1, 1, 9, 0),
            vec![item("12\" pizza", 8.0, 1, Category::Food)],
        )];
        let csv = svc.to_csv(&bills);
        assert!(csv.contains(",\"12\"\" pizza\",Food,"));
    }
}

mod receipt_service {
    use super::*;

    #[test]
    fn includes_every_item() {
        let b = bill(
            at(2025, 1, 2, 14, 30),
            vec![
                item("Rice", 50.0, 2, Category::Groceries),
                item("Soap", 30.0, 1, Category::General),
            ],
        );
        let text = ReceiptService::new().render(&b);
        assert!(text.starts_with("BILL RECEIPT\n"));
        assert!(text.contains("Time: 14:30:00"));
        assert!(text.contains("Rice\n  2 x 50.00 = 100.00  [Groceries, Cash]"));
        assert!(text.contains("Soap\n  1 x 30.00 = 30.00  [General, Cash]"));
        assert!(text.contains("Items: 2\n"));
        assert!(text.contains("Units: 3\n"));
        assert!(text.ends_with("TOTAL: 130.00\n"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// SettingsService
// ═══════════════════════════════════════════════════════════════════

mod settings_service {
    use super::*;

    #[test]
    fn set_pin_enables_lock() {
        let svc = SettingsService::new();
        let mut s = Settings::default();
        svc.set_pin(&mut s, " 0420 ").unwrap();
        assert!(s.pin_enabled);
        assert_eq!(s.saved_pin.as_deref(), Some("0420"));
        assert!(svc.verify_pin(&s, "0420"));
        assert!(!svc.verify_pin(&s, "0421"));
    }

    #[test]
    fn rejects_non_ascii_digits() {
        let svc = SettingsService::new();
        let mut s = Settings::default();
        // Arabic-Indic digits are numeric but not ASCII
        assert!(svc.set_pin(&mut s, "١٢٣٤").is_err());
        assert!(s.saved_pin.is_none());
    }

    #[test]
    fn appearance_rejects_blank_values() {
        let svc = SettingsService::new();
        let mut s = Settings::default();
        assert!(svc.set_appearance(&mut s, Some("  "), None).is_err());
        svc.set_appearance(&mut s, Some("ocean"), Some("Inter")).unwrap();
        assert_eq!(s.color_theme, "ocean");
        assert_eq!(s.font_family, "Inter");
    }
}

// ═══════════════════════════════════════════════════════════════════
// SearchDebouncer
// ═══════════════════════════════════════════════════════════════════

mod search_debouncer {
    use super::*;

    #[test]
    fn default_delay_is_250ms() {
        assert_eq!(SEARCH_DEBOUNCE, Duration::from_millis(250));
    }

    #[test]
    fn waits_for_quiet_period() {
        let start = Instant::now();
        let mut deb = SearchDebouncer::new();
        deb.input("ri", start);
        assert_eq!(deb.poll(start + Duration::from_millis(100)), None);
        assert_eq!(deb.poll(start + Duration::from_millis(250)), Some("ri".to_string()));
        // handed out once
        assert_eq!(deb.poll(start + Duration::from_millis(500)), None);
    }

    #[test]
    fn new_input_restarts_timer() {
        let start = Instant::now();
        let mut deb = SearchDebouncer::new();
        deb.input("r", start);
        deb.input("ric", start + Duration::from_millis(200));
        assert_eq!(deb.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            deb.deadline(),
            Some(start + Duration::from_millis(450))
        );
        assert_eq!(deb.poll(start + Duration::from_millis(450)), Some("ric".to_string()));
        assert!(!deb.is_pending());
    }
}
