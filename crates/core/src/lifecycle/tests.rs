//! Engine tests against the in-memory collaborators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use payroll_config_shared::ConfigId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::lifecycle::{
    ActorId, ConfigEntity, ConfigRecord, ConfigStatus, ConfigStore, Decision, EntityKind,
    LifecycleAction, LifecycleEngine, LifecycleError, ListFilter, MemoryConfigStore,
    PermissiveGuard, ReferenceGuard, StoreError,
};
use crate::rules::{
    Applicability, InsuranceBracket, InsuranceBracketPatch, PayGrade, PayGradePatch, PayType,
    PayTypeKind, PayTypePatch, PayrollPolicy, PolicyType, RuleDefinition, RuleSettings,
    SigningBonus, ValidationError,
};

/// Guard that answers a fixed value and counts how often it was asked.
#[derive(Default)]
struct CountingGuard {
    refuse: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl ReferenceGuard for CountingGuard {
    async fn can_delete(&self, _kind: EntityKind, _id: ConfigId) -> Result<bool, LifecycleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(!self.refuse)
    }
}

fn engine<T: ConfigEntity>() -> LifecycleEngine<T> {
    LifecycleEngine::new(
        Arc::new(MemoryConfigStore::<T>::new()),
        Arc::new(PermissiveGuard::default()),
        RuleSettings::default(),
    )
}

fn engine_with_guard<T: ConfigEntity>(guard: Arc<CountingGuard>) -> LifecycleEngine<T> {
    LifecycleEngine::new(
        Arc::new(MemoryConfigStore::<T>::new()),
        guard,
        RuleSettings::default(),
    )
}

fn actor(id: &str) -> ActorId {
    ActorId::new(id)
}

fn pay_type(kind: PayTypeKind) -> PayType {
    PayType {
        pay_type: kind,
        amount: dec!(7500),
        description: None,
    }
}

fn pay_grade(grade: &str, base: Decimal, gross: Decimal) -> PayGrade {
    PayGrade {
        grade: grade.to_string(),
        base_salary: base,
        gross_salary: gross,
        description: None,
        position_id: None,
    }
}

fn policy(name: &str, policy_type: PolicyType, rule_definition: RuleDefinition) -> PayrollPolicy {
    PayrollPolicy {
        policy_name: name.to_string(),
        policy_type,
        description: "Applies to monthly payroll".to_string(),
        effective_date: Utc::now().date_naive(),
        rule_definition,
        applicability: Applicability::AllEmployees,
    }
}

fn percentage_rule() -> RuleDefinition {
    RuleDefinition {
        percentage: Some(dec!(50)),
        threshold: Some(dec!(160)),
        ..RuleDefinition::default()
    }
}

fn bracket(min_salary: Decimal, max_salary: Decimal) -> InsuranceBracket {
    InsuranceBracket {
        name: "Tier 1".to_string(),
        amount: dec!(0),
        min_salary,
        max_salary,
        employee_rate: dec!(11),
        employer_rate: dec!(18.75),
    }
}

fn bonus(name: &str) -> SigningBonus {
    SigningBonus {
        name: name.to_string(),
        amount: dec!(2500),
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_starts_in_draft_ignoring_payload_status() {
    let engine = engine::<PayType>();
    let payload = serde_json::json!({
        "type": "hourly",
        "amount": 6000,
        "status": "approved",
        "approvedBy": "someone"
    });
    let fields: PayType = serde_json::from_value(payload).unwrap();

    let record = engine.create(fields, Some(actor("hr-1"))).await.unwrap();

    assert_eq!(record.status(), ConfigStatus::Draft);
    assert_eq!(record.decision, Decision::Draft);
    assert_eq!(record.created_by, Some(actor("hr-1")));
}

#[tokio::test]
async fn test_duplicate_pay_type_conflicts() {
    let engine = engine::<PayType>();
    engine
        .create(pay_type(PayTypeKind::Hourly), None)
        .await
        .unwrap();

    let result = engine.create(pay_type(PayTypeKind::Hourly), None).await;

    match result {
        Err(LifecycleError::Conflict(message)) => {
            assert_eq!(message, "Pay type with type \"hourly\" already exists");
        }
        other => panic!("Expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_policy_pair_conflicts() {
    let engine = engine::<PayrollPolicy>();
    engine
        .create(
            policy("Overtime", PolicyType::Allowance, percentage_rule()),
            None,
        )
        .await
        .unwrap();

    // Same name under another type is a different key
    engine
        .create(
            policy("Overtime", PolicyType::Deduction, percentage_rule()),
            None,
        )
        .await
        .unwrap();

    let result = engine
        .create(
            policy("Overtime", PolicyType::Allowance, percentage_rule()),
            None,
        )
        .await;
    assert!(matches!(result, Err(LifecycleError::Conflict(_))));
}

#[tokio::test]
async fn test_pay_grade_salary_boundaries() {
    let engine = engine::<PayGrade>();

    let too_low = engine
        .create(pay_grade("G1", dec!(5999), dec!(6000)), None)
        .await;
    assert!(matches!(too_low, Err(LifecycleError::ValidationFailed(_))));

    let at_floor = engine
        .create(pay_grade("G1", dec!(6000), dec!(6000)), None)
        .await
        .unwrap();
    assert_eq!(at_floor.status(), ConfigStatus::Draft);

    let above_ceiling = engine
        .create(pay_grade("G2", dec!(6000), dec!(60001)), None)
        .await;
    assert!(matches!(
        above_ceiling,
        Err(LifecycleError::ValidationFailed(
            ValidationError::GrossAboveCeiling { .. }
        ))
    ));
}

#[tokio::test]
async fn test_policy_rule_definition_scenarios() {
    let engine = engine::<PayrollPolicy>();

    let empty = engine
        .create(
            policy("Overtime", PolicyType::Allowance, RuleDefinition::default()),
            None,
        )
        .await;
    let err = empty.unwrap_err();
    assert!(matches!(err, LifecycleError::ValidationFailed(_)));
    assert!(
        err.to_string()
            .contains("at least one value (percentage, fixedAmount, or threshold)")
    );

    let created = engine
        .create(
            policy("Overtime", PolicyType::Allowance, percentage_rule()),
            None,
        )
        .await
        .unwrap();
    assert_eq!(created.status(), ConfigStatus::Draft);
    assert_eq!(created.fields.rule_definition.percentage, Some(dec!(50)));
}

#[tokio::test]
async fn test_validation_runs_before_uniqueness() {
    let engine = engine::<PayType>();
    engine
        .create(pay_type(PayTypeKind::Daily), None)
        .await
        .unwrap();

    let invalid_duplicate = PayType {
        amount: dec!(100),
        ..pay_type(PayTypeKind::Daily)
    };
    let result = engine.create(invalid_duplicate, None).await;
    assert!(matches!(result, Err(LifecycleError::ValidationFailed(_))));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_insurance_bracket_scenario() {
    let engine = engine::<InsuranceBracket>();

    let inverted = engine.create(bracket(dec!(5000), dec!(3000)), None).await;
    assert!(matches!(
        inverted,
        Err(LifecycleError::ValidationFailed(
            ValidationError::InvalidSalaryRange
        ))
    ));

    let created = engine
        .create(bracket(dec!(0), dec!(1000)), None)
        .await
        .unwrap();

    let result = engine
        .update(
            created.id,
            InsuranceBracketPatch {
                min_salary: Some(dec!(2000)),
                ..InsuranceBracketPatch::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(LifecycleError::ValidationFailed(
            ValidationError::InvalidSalaryRange
        ))
    ));

    // Failed update leaves the stored record untouched
    let stored = engine.get(created.id).await.unwrap();
    assert_eq!(stored.fields.min_salary, dec!(0));
}

#[tokio::test]
async fn test_update_merges_partial_payload() {
    let engine = engine::<PayGrade>();
    let created = engine
        .create(pay_grade("G3", dec!(8000), dec!(12000)), None)
        .await
        .unwrap();

    let updated = engine
        .update(
            created.id,
            PayGradePatch {
                gross_salary: Some(dec!(15000)),
                ..PayGradePatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.fields.grade, "G3");
    assert_eq!(updated.fields.base_salary, dec!(8000));
    assert_eq!(updated.fields.gross_salary, dec!(15000));
    assert_eq!(updated.status(), ConfigStatus::Draft);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_to_taken_key_conflicts() {
    let engine = engine::<PayType>();
    engine
        .create(pay_type(PayTypeKind::Hourly), None)
        .await
        .unwrap();
    let weekly = engine
        .create(pay_type(PayTypeKind::Weekly), None)
        .await
        .unwrap();

    let result = engine
        .update(
            weekly.id,
            PayTypePatch {
                pay_type: Some(PayTypeKind::Hourly),
                ..PayTypePatch::default()
            },
        )
        .await;
    assert!(matches!(result, Err(LifecycleError::Conflict(_))));

    // Re-sending the record's own key is not a collision
    let unchanged_key = engine
        .update(
            weekly.id,
            PayTypePatch {
                pay_type: Some(PayTypeKind::Weekly),
                amount: Some(dec!(8000)),
                ..PayTypePatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unchanged_key.fields.amount, dec!(8000));
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let engine = engine::<PayType>();
    let result = engine
        .update(ConfigId::new(), PayTypePatch::default())
        .await;
    assert!(matches!(
        result,
        Err(LifecycleError::NotFound {
            entity: "Pay type",
            ..
        })
    ));
}

// ============================================================================
// Approve / Reject
// ============================================================================

#[tokio::test]
async fn test_approve_sets_audit_fields() {
    let engine = engine::<SigningBonus>();
    let created = engine.create(bonus("Graduate"), None).await.unwrap();

    let approved = engine
        .approve(created.id, actor("finance-lead"))
        .await
        .unwrap();

    assert_eq!(approved.status(), ConfigStatus::Approved);
    let json = serde_json::to_value(&approved).unwrap();
    assert_eq!(json["status"], "approved");
    assert_eq!(json["approvedBy"], "finance-lead");
    assert!(json.get("approvedAt").is_some());
    assert!(json.get("rejectedBy").is_none());
    assert!(json.get("rejectionReason").is_none());
}

#[tokio::test]
async fn test_reject_sets_audit_fields() {
    let engine = engine::<SigningBonus>();
    let created = engine.create(bonus("Referral"), None).await.unwrap();

    let rejected = engine
        .reject(created.id, actor("finance-lead"), "Budget freeze".into())
        .await
        .unwrap();

    assert!(matches!(
        rejected.decision,
        Decision::Rejected { ref rejection_reason, .. } if rejection_reason == "Budget freeze"
    ));
    let json = serde_json::to_value(&rejected).unwrap();
    assert_eq!(json["rejectedBy"], "finance-lead");
    assert!(json.get("approvedBy").is_none());
}

#[tokio::test]
async fn test_reject_blank_reason_keeps_draft() {
    let engine = engine::<SigningBonus>();
    let created = engine.create(bonus("Relocation"), None).await.unwrap();

    let result = engine
        .reject(created.id, actor("finance-lead"), "   ".into())
        .await;
    assert!(matches!(
        result,
        Err(LifecycleError::ValidationFailed(
            ValidationError::RejectionReasonRequired
        ))
    ));
    assert_eq!(
        engine.get(created.id).await.unwrap().status(),
        ConfigStatus::Draft
    );
}

#[tokio::test]
async fn test_terminal_records_refuse_every_mutation() {
    let guard = Arc::new(CountingGuard::default());
    let engine = engine_with_guard::<PayType>(Arc::clone(&guard));

    let approved = engine
        .create(pay_type(PayTypeKind::Monthly), None)
        .await
        .unwrap();
    engine.approve(approved.id, actor("cfo")).await.unwrap();

    let rejected = engine
        .create(pay_type(PayTypeKind::Weekly), None)
        .await
        .unwrap();
    engine
        .reject(rejected.id, actor("cfo"), "Not needed".into())
        .await
        .unwrap();

    for id in [approved.id, rejected.id] {
        let update = engine
            .update(
                id,
                PayTypePatch {
                    amount: Some(dec!(9000)),
                    ..PayTypePatch::default()
                },
            )
            .await;
        assert!(matches!(
            update,
            Err(LifecycleError::InvalidState {
                action: LifecycleAction::Edit,
                ..
            })
        ));

        let approve = engine.approve(id, actor("cfo")).await;
        assert!(matches!(approve, Err(LifecycleError::InvalidState { .. })));

        let reject = engine.reject(id, actor("cfo"), "Again".into()).await;
        assert!(matches!(reject, Err(LifecycleError::InvalidState { .. })));

        let delete = engine.delete(id).await;
        assert!(matches!(
            delete,
            Err(LifecycleError::InvalidState {
                action: LifecycleAction::Delete,
                ..
            })
        ));
    }

    assert_eq!(guard.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_double_approve_does_not_reapply() {
    let engine = engine::<PayType>();
    let created = engine
        .create(pay_type(PayTypeKind::Hourly), None)
        .await
        .unwrap();
    let first = engine.approve(created.id, actor("cfo")).await.unwrap();

    let second = engine.approve(created.id, actor("someone-else")).await;
    assert!(matches!(
        second,
        Err(LifecycleError::InvalidState {
            action: LifecycleAction::Approve,
            status: ConfigStatus::Approved,
        })
    ));

    let stored = engine.get(created.id).await.unwrap();
    assert_eq!(stored.decision, first.decision);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_draft_then_get_is_not_found() {
    let guard = Arc::new(CountingGuard::default());
    let engine = engine_with_guard::<SigningBonus>(Arc::clone(&guard));
    let created = engine.create(bonus("Graduate"), None).await.unwrap();

    engine.delete(created.id).await.unwrap();

    assert_eq!(guard.calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        engine.get(created.id).await,
        Err(LifecycleError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_blocked_by_guard() {
    let guard = Arc::new(CountingGuard {
        refuse: true,
        ..CountingGuard::default()
    });
    let engine = engine_with_guard::<SigningBonus>(guard);
    let created = engine.create(bonus("Graduate"), None).await.unwrap();

    let result = engine.delete(created.id).await;

    assert!(matches!(result, Err(LifecycleError::InUse { .. })));
    assert!(engine.get(created.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_unregistered_kind_is_unknown() {
    let engine = LifecycleEngine::<SigningBonus>::new(
        Arc::new(MemoryConfigStore::<SigningBonus>::new()),
        Arc::new(PermissiveGuard::for_kinds([EntityKind::PayType])),
        RuleSettings::default(),
    );
    let created = engine.create(bonus("Graduate"), None).await.unwrap();

    let result = engine.delete(created.id).await;
    assert!(matches!(result, Err(LifecycleError::UnknownEntityType(_))));
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let engine = engine::<SigningBonus>();
    assert!(matches!(
        engine.delete(ConfigId::new()).await,
        Err(LifecycleError::NotFound { .. })
    ));
}

// ============================================================================
// List / Get
// ============================================================================

#[tokio::test]
async fn test_list_filters_by_status_and_category() {
    let engine = engine::<PayrollPolicy>();
    let overtime = engine
        .create(
            policy("Overtime", PolicyType::Allowance, percentage_rule()),
            None,
        )
        .await
        .unwrap();
    engine
        .create(
            policy("Late arrival", PolicyType::Misconduct, percentage_rule()),
            None,
        )
        .await
        .unwrap();
    engine.approve(overtime.id, actor("cfo")).await.unwrap();

    let approved = engine
        .list(&ListFilter::with_status(ConfigStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, overtime.id);

    let misconduct = engine
        .list(&ListFilter {
            status: None,
            category: Some("Misconduct".into()),
        })
        .await
        .unwrap();
    assert_eq!(misconduct.len(), 1);
    assert_eq!(misconduct[0].fields.policy_name, "Late arrival");

    let all = engine.list(&ListFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let store = Arc::new(MemoryConfigStore::<SigningBonus>::new());
    let base = Utc::now();
    for (offset, name) in [(0, "oldest"), (2, "newest"), (1, "middle")] {
        let at = base + Duration::seconds(offset);
        store
            .create(ConfigRecord {
                id: ConfigId::new(),
                fields: bonus(name),
                decision: Decision::Draft,
                created_by: None,
                created_at: at,
                updated_at: at,
            })
            .await
            .unwrap();
    }
    let engine = LifecycleEngine::<SigningBonus>::new(
        store,
        Arc::new(PermissiveGuard::default()),
        RuleSettings::default(),
    );

    let names: Vec<_> = engine
        .list(&ListFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|record| record.fields.name)
        .collect();
    assert_eq!(names, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_pay_grades_list_by_grade() {
    let engine = engine::<PayGrade>();
    for grade in ["G3", "G1", "G2"] {
        engine
            .create(pay_grade(grade, dec!(6000), dec!(9000)), None)
            .await
            .unwrap();
    }

    let grades: Vec<_> = engine
        .list(&ListFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|record| record.fields.grade)
        .collect();
    assert_eq!(grades, ["G1", "G2", "G3"]);
}

#[tokio::test]
async fn test_get_reads_terminal_records() {
    let engine = engine::<PayType>();
    let created = engine
        .create(pay_type(PayTypeKind::Monthly), None)
        .await
        .unwrap();
    engine.approve(created.id, actor("cfo")).await.unwrap();

    let stored = engine.get(created.id).await.unwrap();
    assert_eq!(stored.status(), ConfigStatus::Approved);
}

// ============================================================================
// Store-level uniqueness
// ============================================================================

#[tokio::test]
async fn test_memory_store_rejects_duplicate_key() {
    let store = MemoryConfigStore::<SigningBonus>::new();
    let record = |name: &str| ConfigRecord {
        id: ConfigId::new(),
        fields: bonus(name),
        decision: Decision::Draft,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    store.create(record("Graduate")).await.unwrap();
    let result = store.create(record("Graduate")).await;

    assert!(matches!(result, Err(StoreError::Duplicate(key)) if key == "name \"Graduate\""));
    assert_eq!(store.len(), 1);
}
