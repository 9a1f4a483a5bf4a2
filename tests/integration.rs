//! Integration tests for the compensation engine.
//!
//! This test suite drives the full stack through the HTTP API:
//! - Rollover batches (creation, idempotence, attendance reset)
//! - Per-employee recalculation
//! - Period-format migration and duplicate merging
//! - Salary and period queries, including legacy period addressing
//! - Error cases (missing records, malformed periods)

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::compute_salary;
use payroll_engine::config::CompensationConfig;
use payroll_engine::models::{Employee, PeriodKey, StaffRole, Trainee, TraineeStatus};
use payroll_engine::service::PayrollService;
use payroll_engine::store::{DirectoryStore, FixedClock, MemoryDirectory, MemoryLedger};

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    router: Router,
    directory: Arc<MemoryDirectory>,
    ledger: Arc<MemoryLedger>,
    clock: Arc<FixedClock>,
}

fn test_config() -> CompensationConfig {
    serde_yaml::from_str(
        r#"
admin_base_salary: "2000"
default_working_days: 30
default_rate: "0.40"
branches:
  downtown: { type: percentage, rate: "0.40" }
  riverside: { type: percentage, rate: "0.30" }
  eastside: { type: flat, amount: "200" }
"#,
    )
    .expect("Failed to parse test config")
}

fn create_test_app() -> TestApp {
    let directory = Arc::new(MemoryDirectory::new());
    let ledger = Arc::new(MemoryLedger::new());
    let clock = Arc::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ));
    let service = PayrollService::new(
        Arc::clone(&directory),
        Arc::clone(&ledger),
        Arc::clone(&clock),
        test_config(),
    );
    let router = create_router(AppState::new(service));
    TestApp {
        router,
        directory,
        ledger,
        clock,
    }
}

fn create_employee(id: &str, role: StaffRole, branch: &str, working_days: u32, present: u32) -> Employee {
    let mut attendance = BTreeMap::new();
    for i in 0..present {
        attendance.insert(format!("2024-01-{:02}T08:00:00Z", i + 1), true);
    }
    Employee {
        id: id.to_string(),
        name: format!("Employee {id}"),
        role,
        branch: branch.to_string(),
        total_working_days: working_days,
        attendance,
    }
}

fn create_trainee(id: &str, coach_id: &str, branch: &str, fee: &str) -> Trainee {
    Trainee {
        id: id.to_string(),
        name: format!("Trainee {id}"),
        coach_id: coach_id.to_string(),
        branch: branch.to_string(),
        payment_amount: Decimal::from_str(fee).unwrap(),
        payment_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        status: TraineeStatus::Active,
    }
}

async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Compares a decimal JSON string field against an expected value, ignoring
/// trailing zeros.
fn assert_decimal_field(result: &Value, field: &str, expected: &str) {
    let actual = result[field].as_str().unwrap();
    let actual_normalized = Decimal::from_str(actual).unwrap().normalize();
    let expected_normalized = Decimal::from_str(expected).unwrap().normalize();
    assert_eq!(
        actual_normalized, expected_normalized,
        "Expected {} {}, got {}",
        field, expected_normalized, actual_normalized
    );
}

// =============================================================================
// Rollover
// =============================================================================

#[tokio::test]
async fn test_rollover_computes_admin_salary() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_001", StaffRole::Admin, "downtown", 30, 27));

    let (status, body) = send(app.router.clone(), "POST", "/rollover").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], Value::Bool(true));

    let (status, record) = send(
        app.router,
        "GET",
        "/employees/emp_001/salary?period=2024-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["period"], "January 2024");
    assert_decimal_field(&record, "base_salary", "2000");
    assert_eq!(record["absence_days"], 3);
    assert_decimal_field(&record, "absence_percentage", "10");
    assert_decimal_field(&record, "deduction_amount", "200");
    assert_decimal_field(&record, "final_salary", "1800");
}

#[tokio::test]
async fn test_rollover_computes_coach_share_and_resets_attendance() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_002", StaffRole::Coach, "downtown", 20, 18));
    app.directory
        .insert_trainee(create_trainee("t1", "emp_002", "downtown", "1000"));
    app.directory
        .insert_trainee(create_trainee("t2", "emp_002", "downtown", "1500"));

    let (_, body) = send(app.router.clone(), "POST", "/rollover").await;
    assert_eq!(body["success"], Value::Bool(true));

    let (status, record) = send(
        app.router,
        "GET",
        "/employees/emp_002/salary?period=2024-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&record, "trainee_share_total", "1000");
    assert_decimal_field(&record, "deduction_amount", "100");
    assert_decimal_field(&record, "final_salary", "900");
    assert_eq!(record["trainee_details"].as_array().unwrap().len(), 2);

    // Attendance starts over for the new period.
    let employee = app
        .directory
        .get_employee("emp_002")
        .await
        .unwrap()
        .unwrap();
    assert!(employee.attendance.is_empty());
}

#[tokio::test]
async fn test_rollover_is_idempotent() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_001", StaffRole::Admin, "downtown", 30, 27));

    let (_, first) = send(app.router.clone(), "POST", "/rollover").await;
    assert_eq!(first["success"], Value::Bool(true));

    // The attendance reset means a recompute would now yield a different
    // salary; the no-op must leave the original record untouched.
    let (_, second) = send(app.router.clone(), "POST", "/rollover").await;
    assert_eq!(second["success"], Value::Bool(true));

    let (_, record) = send(
        app.router,
        "GET",
        "/employees/emp_001/salary?period=2024-01",
    )
    .await;
    assert_decimal_field(&record, "final_salary", "1800");
    assert_eq!(app.ledger.len(), 1);
}

#[tokio::test]
async fn test_rollover_flat_commission_branch() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_003", StaffRole::HeadCoach, "eastside", 30, 30));
    app.directory
        .insert_trainee(create_trainee("t1", "emp_003", "eastside", "800"));
    app.directory
        .insert_trainee(create_trainee("t2", "emp_003", "eastside", "1500"));
    app.directory
        .insert_trainee(create_trainee("t3", "emp_003", "eastside", "50"));

    send(app.router.clone(), "POST", "/rollover").await;

    let (_, record) = send(
        app.router,
        "GET",
        "/employees/emp_003/salary?period=2024-01",
    )
    .await;
    assert_decimal_field(&record, "trainee_share_total", "600");
    assert_decimal_field(&record, "final_salary", "600");
}

#[tokio::test]
async fn test_new_month_triggers_new_batch() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_001", StaffRole::Admin, "downtown", 30, 27));

    send(app.router.clone(), "POST", "/rollover").await;
    app.clock.set(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    send(app.router.clone(), "POST", "/rollover").await;

    let (_, periods) = send(app.router, "GET", "/periods").await;
    assert_eq!(
        periods["periods"],
        serde_json::json!(["February 2024", "January 2024"])
    );
}

// =============================================================================
// Recalculation
// =============================================================================

#[tokio::test]
async fn test_recalculate_updates_record_after_trainee_added() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_002", StaffRole::Coach, "downtown", 30, 0));
    app.directory
        .insert_trainee(create_trainee("t1", "emp_002", "downtown", "1000"));

    send(app.router.clone(), "POST", "/rollover").await;

    // A renewal lands mid-period; the host asks for a recompute.
    app.directory
        .insert_trainee(create_trainee("t2", "emp_002", "downtown", "1500"));
    let (status, body) = send(
        app.router.clone(),
        "POST",
        "/employees/emp_002/recalculate",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], Value::Bool(true));

    let (_, record) = send(
        app.router,
        "GET",
        "/employees/emp_002/salary?period=2024-01",
    )
    .await;
    assert_decimal_field(&record, "trainee_share_total", "1000");
    assert_eq!(record["trainee_details"].as_array().unwrap().len(), 2);
    assert_eq!(app.ledger.len(), 1);
}

#[tokio::test]
async fn test_recalculate_unknown_employee_reports_failure() {
    let app = create_test_app();
    let (status, body) = send(app.router, "POST", "/employees/ghost/recalculate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], Value::Bool(false));
}

#[tokio::test]
async fn test_recalculate_twice_yields_identical_computed_fields() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_002", StaffRole::Coach, "downtown", 20, 18));
    app.directory
        .insert_trainee(create_trainee("t1", "emp_002", "downtown", "1000"));

    send(app.router.clone(), "POST", "/employees/emp_002/recalculate").await;
    let (_, first) = send(
        app.router.clone(),
        "GET",
        "/employees/emp_002/salary?period=2024-01",
    )
    .await;

    send(app.router.clone(), "POST", "/employees/emp_002/recalculate").await;
    let (_, second) = send(
        app.router,
        "GET",
        "/employees/emp_002/salary?period=2024-01",
    )
    .await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["created_at"], second["created_at"]);
    assert_eq!(first["final_salary"], second["final_salary"]);
    assert_eq!(first["deduction_amount"], second["deduction_amount"]);
    assert_eq!(first["trainee_details"], second["trainee_details"]);
}

// =============================================================================
// Migration
// =============================================================================

fn seed_record(app: &TestApp, employee_id: &str, period: &str, share: &str) -> Uuid {
    let employee = create_employee(employee_id, StaffRole::Coach, "downtown", 30, 0);
    let mut record = compute_salary(
        &employee,
        &[],
        &test_config(),
        &"January 2024".parse::<PeriodKey>().unwrap(),
        Utc::now(),
    );
    record.period = period.to_string();
    record.trainee_share_total = Decimal::from_str(share).unwrap();
    record.final_salary = Decimal::from_str(share).unwrap();
    let id = record.id;
    app.ledger.insert_raw(record);
    id
}

#[tokio::test]
async fn test_migrate_merges_duplicates() {
    let app = create_test_app();
    seed_record(&app, "emp_001", "January 2024", "500");
    seed_record(&app, "emp_001", "2024-01", "700");

    let (status, body) = send(app.router.clone(), "POST", "/migrate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(app.ledger.len(), 1);

    let (_, record) = send(
        app.router.clone(),
        "GET",
        "/employees/emp_001/salary?period=January%202024",
    )
    .await;
    assert_decimal_field(&record, "trainee_share_total", "1200");

    // A second pass changes nothing.
    let (_, again) = send(app.router, "POST", "/migrate").await;
    assert_eq!(again["success"], Value::Bool(true));
    assert_eq!(app.ledger.len(), 1);
}

#[tokio::test]
async fn test_migrate_normalizes_legacy_period() {
    let app = create_test_app();
    seed_record(&app, "emp_001", "2024-01", "500");

    send(app.router.clone(), "POST", "/migrate").await;

    let (_, periods) = send(app.router.clone(), "GET", "/periods").await;
    assert_eq!(periods["periods"], serde_json::json!(["January 2024"]));

    let (status, _) = send(
        app.router,
        "GET",
        "/employees/emp_001/salary?period=January%202024",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_migrate_flags_unparseable_period_and_continues() {
    let app = create_test_app();
    seed_record(&app, "emp_001", "not-a-period", "100");
    seed_record(&app, "emp_002", "2024-02", "500");

    let (_, body) = send(app.router.clone(), "POST", "/migrate").await;
    assert_eq!(body["success"], Value::Bool(false));

    // The parseable record was still normalized.
    let (status, _) = send(
        app.router,
        "GET",
        "/employees/emp_002/salary?period=2024-02",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.ledger.len(), 2);
}

// =============================================================================
// Queries and error cases
// =============================================================================

#[tokio::test]
async fn test_get_salary_missing_record_returns_404() {
    let app = create_test_app();
    let (status, body) = send(
        app.router,
        "GET",
        "/employees/emp_001/salary?period=2024-01",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SALARY_NOT_FOUND");
}

#[tokio::test]
async fn test_get_salary_invalid_period_returns_400() {
    let app = create_test_app();
    let (status, body) = send(
        app.router,
        "GET",
        "/employees/emp_001/salary?period=soon",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_list_salaries_for_period() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_001", StaffRole::Admin, "downtown", 30, 30));
    app.directory
        .insert_employee(create_employee("emp_002", StaffRole::Coach, "downtown", 30, 30));
    send(app.router.clone(), "POST", "/rollover").await;

    let (status, body) = send(app.router, "GET", "/periods/2024-01/salaries").await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["employee_id"], "emp_001");
    assert_eq!(records[1]["employee_id"], "emp_002");
}

#[tokio::test]
async fn test_list_salaries_invalid_period_returns_400() {
    let app = create_test_app();
    let (status, body) = send(app.router, "GET", "/periods/mystery/salaries").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_periods_empty_ledger() {
    let app = create_test_app();
    let (status, body) = send(app.router, "GET", "/periods").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["periods"], serde_json::json!([]));
}

#[tokio::test]
async fn test_legacy_and_canonical_period_address_same_record() {
    let app = create_test_app();
    app.directory
        .insert_employee(create_employee("emp_001", StaffRole::Admin, "downtown", 30, 30));
    send(app.router.clone(), "POST", "/rollover").await;

    let (_, by_legacy) = send(
        app.router.clone(),
        "GET",
        "/employees/emp_001/salary?period=2024-01",
    )
    .await;
    let (_, by_canonical) = send(
        app.router,
        "GET",
        "/employees/emp_001/salary?period=January%202024",
    )
    .await;
    assert_eq!(by_legacy["id"], by_canonical["id"]);
}
