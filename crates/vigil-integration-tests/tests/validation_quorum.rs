//! Multi-client validation and vote scenarios against one shared store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use vigil_consensus::{ValidationOutcome, ValidationQuorum, VoteLedger, VoteOutcome};
use vigil_geo::GeoPoint;
use vigil_model::{Report, ReportCategory, ReportId, UserId, VoteChoice};
use vigil_store::MemoryStore;

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

fn seed_report(store: &MemoryStore, id: &str) -> Report {
    let report = Report::new(
        ReportId::new(id),
        ReportCategory::Infrastructure,
        GeoPoint::new(18.4861, -69.9312),
        created_at(),
    );
    store.upsert_report(report.clone());
    report
}

#[tokio::test]
async fn sequential_voters_validate_exactly_at_quorum() {
    vigil_logging::init_for_tests();

    let store = Arc::new(MemoryStore::new());
    let machine = ValidationQuorum::new(store.clone(), store.clone());
    let report = seed_report(&store, "r-1");

    let t3 = created_at() + chrono::Duration::minutes(125);
    let outcomes = [
        machine
            .cast_validation(&report, &UserId::new("a"), created_at())
            .await
            .unwrap(),
        machine
            .cast_validation(&report, &UserId::new("b"), created_at())
            .await
            .unwrap(),
        machine
            .cast_validation(&report, &UserId::new("c"), t3)
            .await
            .unwrap(),
    ];

    assert_eq!(outcomes[0], ValidationOutcome::Counted { voters: 1 });
    assert_eq!(outcomes[1], ValidationOutcome::Counted { voters: 2 });
    assert!(outcomes[2].quorum_reached());

    let stored = store.report(&report.id).unwrap();
    assert!(stored.validated);
    assert_eq!(stored.validation_elapsed.unwrap().to_string(), "2:05");
}

#[tokio::test]
async fn concurrent_boundary_casts_validate_at_most_once() {
    // Two fresh voters race as the 3rd and 4th distinct identities, each
    // from their own "client" (task) against the shared store. However
    // the interleaving falls, the validated transition must happen at
    // most once, and at most one caller may observe QuorumReached.
    let store = Arc::new(MemoryStore::new());
    let report = seed_report(&store, "r-1");

    for user in ["a", "b"] {
        let machine = ValidationQuorum::new(store.clone(), store.clone());
        machine
            .cast_validation(&report, &UserId::new(user), created_at())
            .await
            .unwrap();
    }

    let t = created_at() + chrono::Duration::minutes(7);
    let spawn_voter = |user: &str| {
        let store = store.clone();
        let report = report.clone();
        let user = UserId::new(user);
        tokio::spawn(async move {
            let machine = ValidationQuorum::new(store.clone(), store);
            machine.cast_validation(&report, &user, t).await.unwrap()
        })
    };

    let c = spawn_voter("c");
    let d = spawn_voter("d");
    let outcomes = [c.await.unwrap(), d.await.unwrap()];

    let winners = outcomes.iter().filter(|o| o.quorum_reached()).count();
    assert!(winners <= 1, "two clients transitioned the same report");

    let stored = store.report(&report.id).unwrap();
    if winners == 1 {
        assert!(stored.validated);
        assert_eq!(stored.validated_at, Some(t));
    }
    // Whatever happened, both votes were recorded.
    use vigil_store::ValidationStore;
    assert_eq!(store.count_distinct_voters(&report.id).await.unwrap(), 4);
}

#[tokio::test]
async fn validated_report_rejects_every_further_cast() {
    let store = Arc::new(MemoryStore::new());
    let machine = ValidationQuorum::new(store.clone(), store.clone());
    let report = seed_report(&store, "r-1");

    for user in ["a", "b", "c"] {
        machine
            .cast_validation(&report, &UserId::new(user), created_at())
            .await
            .unwrap();
    }

    // Re-read the now-validated document the way a fresh client would.
    let current = store.report(&report.id).unwrap();
    let outcome = machine
        .cast_validation(&current, &UserId::new("d"), created_at())
        .await
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::AlreadyValidated);
}

#[tokio::test]
async fn vote_and_validation_slots_are_independent() {
    // The same user can hold an up/down vote and a validation vote on one
    // report; the two stores never interfere.
    let store = Arc::new(MemoryStore::new());
    let ledger = VoteLedger::new(store.clone());
    let machine = ValidationQuorum::new(store.clone(), store.clone());
    let report = seed_report(&store, "r-1");
    let user = UserId::new("a");

    let vote = ledger
        .cast_vote(&report.id, &user, VoteChoice::Up)
        .await
        .unwrap();
    assert_eq!(vote, VoteOutcome::Set);

    let validation = machine
        .cast_validation(&report, &user, created_at())
        .await
        .unwrap();
    assert_eq!(validation, ValidationOutcome::Counted { voters: 1 });

    use vigil_store::VoteStore;
    let tally = store.tally(&report.id).await.unwrap();
    assert_eq!((tally.up, tally.down), (1, 0));
}

#[tokio::test]
async fn rapid_taps_from_one_client_converge() {
    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(VoteLedger::new(store.clone()));
    let report = seed_report(&store, "r-1");
    let user = UserId::new("a");

    // Three taps racing from the same client: after all settle, the state
    // must equal some sequential ordering of three identical taps, which
    // always ends with the vote present (set, off, set).
    let tap = |ledger: Arc<VoteLedger<MemoryStore>>, report: ReportId, user: UserId| {
        tokio::spawn(async move { ledger.cast_vote(&report, &user, VoteChoice::Up).await.unwrap() })
    };
    let taps = [
        tap(ledger.clone(), report.id.clone(), user.clone()),
        tap(ledger.clone(), report.id.clone(), user.clone()),
        tap(ledger.clone(), report.id.clone(), user.clone()),
    ];
    let mut outcomes = Vec::new();
    for t in taps {
        outcomes.push(t.await.unwrap());
    }

    use vigil_store::VoteStore;
    let stored = store.get_vote(&report.id, &user).await.unwrap();
    assert!(stored.is_some(), "odd number of taps must leave a vote");
    assert_eq!(
        outcomes.iter().filter(|o| **o == VoteOutcome::Set).count(),
        2
    );
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| **o == VoteOutcome::ToggledOff)
            .count(),
        1
    );
}
