use std::collections::BTreeMap;
use std::sync::Arc;

use storage::error::StorageError;
use storage::dto::connection::ConnectionDecision;
use storage::models::{ConnectionStatus, FundingStage, level_for_xp};
use storage::services::classification::{self, FundingCategory};
use storage::services::connections;
use storage::services::progress::StageStatus;
use storage::services::scoring;
use storage::services::tracker::{PitchOutcome, Review};
use storage::{DataStore, MemoryStore, ProgressTracker};

fn tracker(mock_feedback: bool) -> ProgressTracker {
    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::from_seed().unwrap());
    ProgressTracker::new(store, mock_feedback)
}

fn full_content(stage: FundingStage) -> BTreeMap<String, String> {
    scoring::stage_fields(stage)
        .iter()
        .map(|field| (field.to_string(), format!("A detailed answer about {}", field)))
        .collect()
}

fn thin_content(stage: FundingStage) -> BTreeMap<String, String> {
    let fields = scoring::stage_fields(stage);
    BTreeMap::from([(fields[0].to_string(), "A detailed enough answer".to_string())])
}

#[tokio::test]
async fn test_first_access_creates_default_progress() {
    let tracker = tracker(false);
    let progress = tracker.progress("new-user").await.unwrap();

    assert_eq!(progress.xp_points, 0);
    assert_eq!(progress.level, 1);
    assert_eq!(progress.current_stage, FundingStage::Ideation);
    assert!(progress.completed_stages.is_empty());

    let again = tracker.progress("new-user").await.unwrap();
    assert_eq!(again.id, progress.id);
}

#[tokio::test]
async fn test_complete_pitch_advances_and_unlocks() {
    let tracker = tracker(false);
    let outcome = tracker
        .submit_pitch("u1", FundingStage::Ideation, "My idea", full_content(FundingStage::Ideation))
        .await;

    let PitchOutcome::Accepted {
        score,
        stage_completed,
        newly_unlocked,
        ..
    } = outcome
    else {
        panic!("expected the submission to be accepted");
    };
    assert_eq!(score, 5.0);
    assert!(stage_completed);
    assert_eq!(newly_unlocked, vec!["first-pitch", "high-scorer"]);

    let progress = tracker.progress("u1").await.unwrap();
    assert_eq!(progress.current_stage, FundingStage::Validation);
    assert!(progress.has_completed(FundingStage::Ideation));
    assert_eq!(progress.xp_points, 100);
    assert_eq!(progress.level, 2);

    let notifications = tracker
        .store()
        .list_notifications("u1", 10, true)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.kind == "achievement"));
}

#[tokio::test]
async fn test_incomplete_pitch_does_not_complete_stage() {
    let tracker = tracker(false);
    let outcome = tracker
        .submit_pitch("u2", FundingStage::Ideation, "Draft", thin_content(FundingStage::Ideation))
        .await;
    assert!(outcome.is_accepted());

    let journey = tracker.journey("u2").await.unwrap();
    assert_eq!(journey[0].status, StageStatus::Unlocked);
    assert_eq!(journey[1].status, StageStatus::Locked);

    let progress = tracker.progress("u2").await.unwrap();
    assert!(progress.completed_stages.is_empty());
    assert_eq!(progress.current_stage, FundingStage::Ideation);
    assert!((progress.pitch_scores[&FundingStage::Ideation] - 5.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_locked_stage_rejects_submission() {
    let tracker = tracker(false);
    let outcome = tracker
        .submit_pitch("u3", FundingStage::Seed, "Too early", full_content(FundingStage::Seed))
        .await;

    assert!(matches!(outcome, PitchOutcome::Rejected));
    assert!(tracker.store().list_pitches("u3").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_completed_stages_never_shrink() {
    let tracker = tracker(false);
    let mut previous = 0;
    let submissions = [
        (FundingStage::Ideation, full_content(FundingStage::Ideation)),
        (FundingStage::Validation, thin_content(FundingStage::Validation)),
        (FundingStage::Ideation, thin_content(FundingStage::Ideation)),
        (FundingStage::Validation, full_content(FundingStage::Validation)),
        (FundingStage::Ideation, BTreeMap::new()),
    ];

    for (stage, content) in submissions {
        tracker.submit_pitch("u4", stage, "Pitch", content).await;
        let progress = tracker.progress("u4").await.unwrap();
        assert!(progress.completed_stages.len() >= previous);
        assert_eq!(progress.level, level_for_xp(progress.xp_points));
        previous = progress.completed_stages.len();
    }
    assert_eq!(previous, 2);
}

#[tokio::test]
async fn test_resubmission_replaces_pitch_and_score() {
    let tracker = tracker(false);
    tracker
        .submit_pitch("u5", FundingStage::Ideation, "First", full_content(FundingStage::Ideation))
        .await;
    tracker
        .submit_pitch("u5", FundingStage::Ideation, "Second", thin_content(FundingStage::Ideation))
        .await;

    let pitches = tracker.store().list_pitches("u5").await.unwrap();
    assert_eq!(pitches.len(), 1);
    assert_eq!(pitches[0].title, "Second");

    let progress = tracker.progress("u5").await.unwrap();
    assert!(progress.pitch_scores[&FundingStage::Ideation] < 2.0);
    assert!(progress.has_completed(FundingStage::Ideation));
}

#[tokio::test]
async fn test_unlock_twice_awards_xp_once() {
    let tracker = tracker(false);
    assert!(tracker.unlock_achievement("u6", "pitch-master").await);
    assert!(tracker.unlock_achievement("u6", "pitch-master").await);

    let progress = tracker.progress("u6").await.unwrap();
    assert_eq!(progress.xp_points, 100);
    assert_eq!(progress.level, 2);

    let unlocked = tracker.store().list_unlocked("u6").await.unwrap();
    assert_eq!(unlocked.len(), 1);
}

#[tokio::test]
async fn test_unknown_achievement_is_rejected() {
    let tracker = tracker(false);
    assert!(!tracker.unlock_achievement("u7", "not-a-badge").await);
    assert_eq!(tracker.progress("u7").await.unwrap().xp_points, 0);
}

#[tokio::test]
async fn test_concurrent_unlocks_award_once() {
    let tracker = tracker(false);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.unlock_achievement("u8", "first-pitch").await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(tracker.progress("u8").await.unwrap().xp_points, 25);
}

#[tokio::test]
async fn test_discovery_grants_xp_once() {
    let tracker = tracker(false);
    let first = tracker.record_discovery("u9", "wbso").await.unwrap();
    let second = tracker.record_discovery("u9", "wbso").await.unwrap();

    assert!(first.first_discovery);
    assert!(!second.first_discovery);
    assert_eq!(tracker.progress("u9").await.unwrap().xp_points, 10);
}

#[tokio::test]
async fn test_discovering_each_group_unlocks_discover_all() {
    let tracker = tracker(false);
    tracker.record_discovery("u10", "wbso").await.unwrap();
    tracker.record_discovery("u10", "rubio-impact").await.unwrap();
    let last = tracker.record_discovery("u10", "rockstart").await.unwrap();

    assert_eq!(last.newly_unlocked, vec!["discover-all"]);
    let progress = tracker.progress("u10").await.unwrap();
    assert_eq!(progress.xp_points, 130);
    assert_eq!(progress.level, level_for_xp(130));
}

#[tokio::test]
async fn test_discovering_2025_opportunity() {
    let tracker = tracker(false);
    let outcome = tracker.record_discovery("u11", "wbso-2025").await.unwrap();

    assert!(outcome.newly_unlocked.contains(&"discover-2025".to_string()));

    let statuses = tracker.achievements("u11").await.unwrap();
    let status = statuses.iter().find(|s| s.id == "discover-2025").unwrap();
    assert!(status.unlocked);
    assert!(status.unlocked_at.is_some());
    let explorer = statuses.iter().find(|s| s.id == "funding-explorer").unwrap();
    assert_eq!(explorer.progress, 1);
    assert!(!explorer.unlocked);
}

#[tokio::test]
async fn test_unknown_opportunity_discovery_is_not_found() {
    let tracker = tracker(false);
    let result = tracker.record_discovery("u12", "missing").await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_mock_mode_generates_feedback() {
    let tracker = tracker(true);
    let outcome = tracker
        .submit_pitch("u13", FundingStage::Ideation, "Pitch", full_content(FundingStage::Ideation))
        .await;
    let PitchOutcome::Accepted { pitch, .. } = outcome else {
        panic!("expected the submission to be accepted");
    };

    let feedback = tracker.store().list_feedback("u13").await.unwrap();
    assert!((1..=3).contains(&feedback.len()));
    assert!(feedback.iter().all(|f| f.pitch_id == pitch.id));
}

#[tokio::test]
async fn test_saving_twice_is_a_conflict() {
    let store = MemoryStore::from_seed().unwrap();
    store.save_opportunity("u14", "wbso", Some("look later")).await.unwrap();
    let again = store.save_opportunity("u14", "wbso", None).await;

    assert!(matches!(again, Err(StorageError::ConstraintViolation(_))));
    assert_eq!(store.list_saved("u14").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_category_filter_returns_subset_of_seed() {
    let opportunities = MemoryStore::from_seed()
        .unwrap()
        .list_opportunities()
        .await
        .unwrap();

    for category in FundingCategory::ALL {
        let filtered = classification::filter(&opportunities, Some(category), None);
        assert!(filtered.len() <= opportunities.len());
        assert!(filtered.iter().all(|o| opportunities.iter().any(|all| all.id == o.id)));
    }

    let wbso = opportunities.iter().find(|o| o.sector == "Public Grants - R&D").unwrap();
    assert!(FundingCategory::Public.matches(wbso));

    let rubio = opportunities
        .iter()
        .find(|o| o.sector == "Private - Impact Investor")
        .unwrap();
    assert!(FundingCategory::Private.matches(rubio));
    assert!(FundingCategory::Impact.matches(rubio));
}

fn review(reviewer_id: &str) -> Review {
    Review {
        reviewer_id: reviewer_id.to_string(),
        reviewer_name: format!("Reviewer {}", reviewer_id),
        message: "Clear problem statement".to_string(),
        rating: Some(4),
        strengths: vec!["Focus".to_string()],
        weaknesses: Vec::new(),
        suggestions: None,
    }
}

#[tokio::test]
async fn test_feedback_on_unknown_pitch_is_not_found() {
    let tracker = tracker(false);
    let result = tracker.add_feedback(uuid::Uuid::new_v4(), review("inv-001")).await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_feedback_notifies_pitch_owner() {
    let tracker = tracker(false);
    let PitchOutcome::Accepted { pitch, .. } = tracker
        .submit_pitch("u15", FundingStage::Ideation, "Pitch", thin_content(FundingStage::Ideation))
        .await
    else {
        panic!("expected the submission to be accepted");
    };

    let created = tracker.add_feedback(pitch.id, review("inv-002")).await.unwrap();
    assert_eq!(created.user_id, "u15");
    assert_eq!(created.stage, FundingStage::Ideation);

    let notifications = tracker
        .store()
        .list_notifications("u15", 20, false)
        .await
        .unwrap();
    assert!(notifications.iter().any(|n| n.content.contains("Reviewer inv-002")));
}

#[tokio::test]
async fn test_connection_request_notifies_only_recipient() {
    let store = MemoryStore::from_seed().unwrap();
    let connection = connections::send_request(&store, "anna", "bram", Some("Koffie?"))
        .await
        .unwrap();

    assert_eq!(connection.status, ConnectionStatus::Pending);
    assert_eq!(connection.message.as_deref(), Some("Koffie?"));

    let inbox = store.list_notifications("bram", 10, true).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, "connection_request");
    assert_eq!(
        inbox[0].related_entity_id.as_deref(),
        Some(connection.id.to_string().as_str())
    );
    assert!(
        store
            .list_notifications("anna", 10, true)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_reverse_connection_request_is_rejected() {
    let store = MemoryStore::from_seed().unwrap();
    connections::send_request(&store, "anna", "bram", None)
        .await
        .unwrap();

    let err = connections::send_request(&store, "bram", "anna", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));

    let err = connections::send_request(&store, "anna", "anna", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_connection_can_only_be_answered_once() {
    let store = MemoryStore::from_seed().unwrap();
    let connection = connections::send_request(&store, "anna", "bram", None)
        .await
        .unwrap();

    let rejected = connections::respond(&store, connection.id, ConnectionDecision::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, ConnectionStatus::Rejected);
    assert!(
        store
            .list_notifications("anna", 10, true)
            .await
            .unwrap()
            .is_empty()
    );

    let err = connections::respond(&store, connection.id, ConnectionDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));

    let between = store
        .find_connection_between("bram", "anna")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(between.status, ConnectionStatus::Rejected);
}

#[tokio::test]
async fn test_answering_unknown_connection_is_not_found() {
    let store = MemoryStore::from_seed().unwrap();
    let err = connections::respond(&store, uuid::Uuid::new_v4(), ConnectionDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
