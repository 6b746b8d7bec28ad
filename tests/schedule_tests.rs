use chrono::NaiveDate;
use finduo_core::domain::Frequency;
use finduo_core::schedule::{
    InstallmentPlan, PaymentStatus, RecurrenceRule, RecurringSchedule, DEFAULT_DUE_SOON_DAYS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn installment_plan_from_server_json() {
    let plan: InstallmentPlan = serde_json::from_str(
        r#"{
            "id": "inst-9",
            "description": "Sofa",
            "total_amount": 1000.0,
            "total_installments": 6,
            "paid_installments": 2,
            "first_installment_date": "2025-01-10"
        }"#,
    )
    .unwrap();

    assert_eq!(plan.installment_amount(), 166.66);
    assert_eq!(plan.last_installment_amount(), 166.7);
    assert_eq!(plan.next_due_date(), Some(date(2025, 3, 10)));
    assert_eq!(
        plan.status(date(2025, 3, 5), DEFAULT_DUE_SOON_DAYS),
        PaymentStatus::DueSoon
    );
    assert_eq!(
        plan.status(date(2025, 3, 11), DEFAULT_DUE_SOON_DAYS),
        PaymentStatus::Overdue
    );
}

#[test]
fn installment_progress_bounds() {
    let mut plan = InstallmentPlan {
        id: "inst-1".into(),
        description: None,
        total_amount: 250.0,
        total_installments: 5,
        paid_installments: 0,
        first_installment_date: date(2025, 2, 1),
    };
    assert_eq!(plan.progress_percentage(), 0.0);
    assert_eq!(plan.remaining_amount(), 250.0);

    plan.paid_installments = 7;
    assert_eq!(plan.progress_percentage(), 100.0);
    assert_eq!(plan.paid_amount(), 250.0);
    assert_eq!(plan.overdue_installments(date(2030, 1, 1)), 0);
}

#[test]
fn bounded_recurring_schedule_stops_at_end_date() {
    let schedule = RecurringSchedule {
        id: "gym".into(),
        description: Some("Gym".into()),
        amount: 89.9,
        rule: RecurrenceRule::new(Frequency::Weekly, 1),
        start_date: date(2025, 1, 6),
        end_date: Some(date(2025, 1, 31)),
        next_occurrence: None,
        is_active: true,
    };

    let upcoming = schedule.upcoming(date(2025, 1, 1), 52);
    assert_eq!(upcoming.len(), 4);
    assert!(upcoming.iter().all(|day| *day <= date(2025, 1, 31)));
    assert_eq!(schedule.status(date(2025, 2, 1), 7), PaymentStatus::Ended);
    assert!(schedule.is_past_end(date(2025, 2, 1)));
}

#[test]
fn payment_status_serializes_screaming_case() {
    assert_eq!(
        serde_json::to_string(&PaymentStatus::DueSoon).unwrap(),
        "\"DUE_SOON\""
    );
}

#[test]
fn server_schedule_with_zero_interval_keeps_advancing() {
    let schedule: RecurringSchedule = serde_json::from_str(
        r#"{
            "id": "rec-0",
            "amount": 15.0,
            "frequency": "MONTHLY",
            "interval": 0,
            "start_date": "2025-01-10"
        }"#,
    )
    .unwrap();

    assert_eq!(schedule.rule.interval, 1);
    assert_eq!(
        schedule.upcoming(date(2025, 1, 1), 3),
        vec![date(2025, 1, 10), date(2025, 2, 10), date(2025, 3, 10)]
    );
    assert_eq!(
        schedule.status(date(2025, 2, 5), DEFAULT_DUE_SOON_DAYS),
        PaymentStatus::DueSoon
    );
}
