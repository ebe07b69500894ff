//! End-to-end use of the re-exported surface.

use chrono::{Duration, Utc};
use zerotrust::{
    DecisionReason, Discovery, DiscoveryConfig, SignalSource, StaticSignals, TrustEvaluator, TrustFactor,
    TrustTier,
};

fn signals() -> StaticSignals {
    StaticSignals::new().with_subject(
        "alice",
        vec![
            TrustFactor::identity(25).unwrap(),
            TrustFactor::device(20).unwrap(),
            TrustFactor::behavior(18).unwrap(),
            TrustFactor::location(12).unwrap(),
            TrustFactor::risk(7).unwrap(),
        ],
    )
}

#[test]
fn assess_then_authorize_against_default_catalog() {
    let evaluator = TrustEvaluator::default();
    let discovery = Discovery::from_config(&DiscoveryConfig::default(), evaluator.clone()).unwrap();

    let now = Utc::now();
    let score = tokio_test::block_on(evaluator.assess(&signals(), "alice", now)).unwrap();
    assert_eq!(score.overall(), 68);
    assert_eq!(evaluator.classify(&score), TrustTier::ReadOnly);

    let audit = discovery.authorize(&score, "audit-service", None, None, now).unwrap();
    assert!(audit.granted);

    let admin = discovery.authorize(&score, "admin-service", None, None, now).unwrap();
    assert_eq!(admin.reason, DecisionReason::InsufficientTrust);
    assert_eq!(admin.shortfall(), 7);

    let later = now + Duration::minutes(6);
    let expired = discovery.authorize(&score, "audit-service", None, None, later).unwrap();
    assert_eq!(expired.reason, DecisionReason::ScoreExpired);
}

#[test]
fn unknown_subject_has_no_signals() {
    let err = tokio_test::block_on(signals().collect("mallory")).unwrap_err();
    assert!(!err.is_client_error());
    assert_eq!(err.status_code(), 502);
}
