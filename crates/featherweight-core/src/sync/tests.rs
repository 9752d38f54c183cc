//! Behaviour of full sync passes against an in-memory remote store.

use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::config::SyncSettings;
use crate::convert::RemoteConvert;
use crate::db::{Database, LibSqlStore, LocalStore};
use crate::models::{
    DeviceIdentity, Equipment, Exercise, ExerciseCategory, ExerciseLog, ExerciseMax,
    ExerciseSwapHistory, MaxSource, PersonalRecord, Programme, ProgrammeProgress, ProgrammeWeek, ProgrammeWorkout, RecordType,
    SetLog, TemplateExercise, TemplateSet, Workout, WorkoutTemplate,
};
use crate::remote::{
    MemoryDocumentStore, RemoteStore, SYNC_METADATA_COLLECTION, SYSTEM_EXERCISES_COLLECTION,
};

const USER: &str = "user-1";

type Manager = SyncManager<LibSqlStore, MemoryDocumentStore, StaticAuthProvider>;

struct Harness {
    _db: Database,
    manager: Manager,
    local: LibSqlStore,
    remote: MemoryDocumentStore,
}

async fn harness_with(auth: StaticAuthProvider, min_interval: Duration) -> Harness {
    let db = Database::open_in_memory().await.unwrap();
    let local = db.store();
    let remote = MemoryDocumentStore::new();
    let settings = SyncSettings {
        min_sync_interval_secs: min_interval.as_secs(),
        ..SyncSettings::default()
    };
    let device = DeviceIdentity {
        device_id: "device-1".to_string(),
        device_name: "test rig".to_string(),
    };
    let manager = SyncManager::new(local.clone(), remote.clone(), auth, device, &settings);
    Harness {
        _db: db,
        manager,
        local,
        remote,
    }
}

/// Signed in, no throttling between passes
async fn harness() -> Harness {
    harness_with(StaticAuthProvider::signed_in(USER), Duration::ZERO).await
}

fn put_remote<T: SyncEntity>(remote: &MemoryDocumentStore, row: &T) {
    remote.put_document(
        Some(USER),
        T::KIND.collection(),
        row.id().to_string(),
        serde_json::to_value(row.to_remote()).unwrap(),
    );
}

fn squat() -> Exercise {
    Exercise::system("squat", "Back Squat", ExerciseCategory::Legs, Equipment::Barbell)
}

fn put_catalogue(remote: &MemoryDocumentStore) {
    let exercise = squat();
    remote.put_document(
        None,
        SYSTEM_EXERCISES_COLLECTION,
        exercise.id.clone(),
        serde_json::to_value(exercise.to_remote()).unwrap(),
    );
}

fn workout(id: &str, name: &str) -> Workout {
    Workout {
        id: id.to_string(),
        ..Workout::new(USER, name)
    }
}

fn exercise_max(id: &str, estimate: f32) -> ExerciseMax {
    ExerciseMax {
        id: id.to_string(),
        user_id: Some(USER.to_string()),
        exercise_id: "squat".to_string(),
        one_rm_estimate: estimate,
        one_rm_context: Some("5 @ 8".to_string()),
        one_rm_confidence: 0.8,
        source: MaxSource::Estimated,
        recorded_at: 1_700_000_000_000,
    }
}

fn personal_record(id: &str, record_type: RecordType, set_id: &str) -> PersonalRecord {
    PersonalRecord {
        id: id.to_string(),
        user_id: Some(USER.to_string()),
        exercise_id: "squat".to_string(),
        record_type,
        weight: 100.0,
        reps: 5,
        rpe: Some(9.0),
        estimated_1rm: Some(120.0),
        previous_weight: Some(95.0),
        previous_date: None,
        improvement_percentage: 5.3,
        workout_id: None,
        source_set_id: Some(set_id.to_string()),
        record_date: 1_700_000_000_000,
    }
}

/// A workout with one logged set, and a programme and template hierarchy
fn put_full_hierarchy(remote: &MemoryDocumentStore) -> SetLog {
    put_catalogue(remote);

    let custom = Exercise {
        id: "custom-1".to_string(),
        ..Exercise::custom(USER, "Safety Bar Squat")
    };
    put_remote(remote, &custom);

    let programme = Programme {
        id: "prog-1".to_string(),
        ..Programme::new(USER, "Linear Progression", 8)
    };
    let week = ProgrammeWeek {
        id: "week-1".to_string(),
        user_id: Some(USER.to_string()),
        programme_id: programme.id.clone(),
        week_number: 1,
        name: None,
        is_deload: false,
        updated_at: 1_000,
    };
    let programme_workout = ProgrammeWorkout {
        id: "pw-1".to_string(),
        user_id: Some(USER.to_string()),
        week_id: week.id.clone(),
        day_number: 1,
        name: "Day A".to_string(),
        estimated_duration_minutes: Some(60),
        workout_structure: "{}".to_string(),
        updated_at: 1_000,
    };
    let progress = ProgrammeProgress {
        id: "progress-1".to_string(),
        user_id: Some(USER.to_string()),
        programme_id: programme.id.clone(),
        current_week: 1,
        current_day: 2,
        completed_workouts: 1,
        total_workouts: 24,
        last_workout_date: Some(1_000),
        updated_at: 1_000,
    };
    put_remote(remote, &programme);
    put_remote(remote, &week);
    put_remote(remote, &programme_workout);
    put_remote(remote, &progress);

    let mut session = workout("w-1", "Day A");
    session.programme_id = Some(programme.id.clone());
    let log = ExerciseLog {
        id: "log-1".to_string(),
        ..ExerciseLog::new(USER, &session.id, "squat", 0)
    };
    let custom_log = ExerciseLog {
        id: "log-2".to_string(),
        ..ExerciseLog::new(USER, &session.id, &custom.id, 1)
    };
    let set = SetLog {
        id: "set-1".to_string(),
        ..SetLog::completed(USER, &log.id, 0, 100.0, 5)
    };
    put_remote(remote, &session);
    put_remote(remote, &log);
    put_remote(remote, &custom_log);
    put_remote(remote, &set);

    let template = WorkoutTemplate {
        id: "tpl-1".to_string(),
        user_id: Some(USER.to_string()),
        name: "Lower".to_string(),
        description: None,
        created_at: 1_000,
        updated_at: 1_000,
    };
    let template_exercise = TemplateExercise {
        id: "tpl-ex-1".to_string(),
        user_id: Some(USER.to_string()),
        template_id: template.id.clone(),
        exercise_id: "squat".to_string(),
        exercise_order: 0,
        notes: None,
        updated_at: 1_000,
    };
    let template_set = TemplateSet {
        id: "tpl-set-1".to_string(),
        user_id: Some(USER.to_string()),
        template_exercise_id: template_exercise.id.clone(),
        set_order: 0,
        target_reps: Some(5),
        target_weight: Some(100.0),
        target_rpe: Some(8.0),
        updated_at: 1_000,
    };
    put_remote(remote, &template);
    put_remote(remote, &template_exercise);
    put_remote(remote, &template_set);

    put_remote(remote, &exercise_max("max-1", 120.0));
    put_remote(
        remote,
        &personal_record("pr-weight", RecordType::Weight, &set.id),
    );
    put_remote(
        remote,
        &personal_record("pr-e1rm", RecordType::Estimated1Rm, &set.id),
    );

    set
}

async fn local_count(local: &LibSqlStore, kind: EntityKind) -> u64 {
    local.count_kind_for_user(kind, USER).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_workout_overwrites_local_fields() {
    let h = harness().await;
    h.local.insert(&workout("1", "Local")).await.unwrap();
    put_remote(&h.remote, &workout("1", "Remote"));

    let outcome = h.manager.sync_all().await;

    assert!(outcome.is_success(), "{outcome}");
    let stored: Workout = h.local.get_by_id("1").await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Remote"));
}

#[tokio::test(flavor = "multi_thread")]
async fn second_sync_inside_window_is_skipped_without_remote_calls() {
    let h = harness_with(StaticAuthProvider::signed_in(USER), Duration::from_secs(10)).await;

    assert!(h.manager.sync_all().await.is_success());
    let calls = h.remote.call_count();

    let outcome = h.manager.sync_all().await;

    assert_eq!(outcome, SyncOutcome::Skipped("Sync throttled".to_string()));
    assert_eq!(h.remote.call_count(), calls);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_syncs_run_one_pass() {
    let h = harness_with(StaticAuthProvider::signed_in(USER), Duration::from_secs(10)).await;

    let (first, second) = tokio::join!(h.manager.sync_all(), h.manager.sync_all());

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 1);
    assert_eq!(outcomes.iter().filter(|o| o.is_skipped()).count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_sync_changes_no_row_counts() {
    let h = harness().await;
    put_full_hierarchy(&h.remote);
    h.local.insert(&workout("local-1", "Extra")).await.unwrap();

    assert!(h.manager.sync_all().await.is_success());
    let mut before = Vec::new();
    for kind in EntityKind::ALL {
        before.push((
            local_count(&h.local, kind).await,
            h.remote.document_count(Some(USER), kind.collection()),
        ));
    }

    assert!(h.manager.sync_all().await.is_success());
    for (kind, counts) in EntityKind::ALL.into_iter().zip(before) {
        assert_eq!(
            (
                local_count(&h.local, kind).await,
                h.remote.document_count(Some(USER), kind.collection()),
            ),
            counts,
            "row counts changed for {kind}"
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn higher_remote_max_replaces_local() {
    let h = harness().await;
    put_catalogue(&h.remote);
    h.local.insert(&squat()).await.unwrap();
    h.local.insert(&exercise_max("max-1", 95.0)).await.unwrap();
    put_remote(&h.remote, &exercise_max("max-1", 100.0));

    assert!(h.manager.sync_all().await.is_success());

    let stored: ExerciseMax = h.local.get_by_id("max-1").await.unwrap().unwrap();
    assert_eq!(stored.one_rm_estimate, 100.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn lower_remote_max_keeps_local() {
    let h = harness().await;
    put_catalogue(&h.remote);
    h.local.insert(&squat()).await.unwrap();
    h.local.insert(&exercise_max("max-1", 100.0)).await.unwrap();
    put_remote(&h.remote, &exercise_max("max-1", 95.0));

    assert!(h.manager.sync_all().await.is_success());

    let stored: ExerciseMax = h.local.get_by_id("max-1").await.unwrap().unwrap();
    assert_eq!(stored.one_rm_estimate, 100.0);
    let uploaded = h.remote.documents(Some(USER), EntityKind::ExerciseMax.collection());
    assert_eq!(uploaded[0].data["oneRMEstimate"], serde_json::json!(100.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn unowned_rows_are_never_uploaded() {
    let h = harness().await;
    let owned = workout("owned", "Mine");
    let mut local_only = workout("local-only", "Before sign-in");
    local_only.user_id = None;
    h.local.insert(&owned).await.unwrap();
    h.local.insert(&local_only).await.unwrap();

    assert!(h.manager.sync_all().await.is_success());

    let uploaded = h.remote.documents(Some(USER), EntityKind::Workout.collection());
    assert_eq!(
        uploaded.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
        vec!["owned"]
    );
    assert!(h
        .local
        .get_by_id::<Workout>("local-only")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn children_merge_after_their_parents() {
    let h = harness().await;
    let set = put_full_hierarchy(&h.remote);

    let outcome = h.manager.sync_all().await;

    assert!(outcome.is_success(), "{outcome}");
    assert!(h.local.get_by_id::<SetLog>(&set.id).await.unwrap().is_some());
    assert!(h
        .local
        .get_by_id::<TemplateSet>("tpl-set-1")
        .await
        .unwrap()
        .is_some());
    assert!(h
        .local
        .get_by_id::<ProgrammeWorkout>("pw-1")
        .await
        .unwrap()
        .is_some());
    assert_eq!(local_count(&h.local, EntityKind::ExerciseLog).await, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn restore_matches_remote_row_counts() {
    let h = harness().await;
    put_full_hierarchy(&h.remote);
    h.local.insert(&workout("stale", "Only on this phone")).await.unwrap();

    let outcome = h.manager.restore_from_cloud().await;

    assert!(outcome.is_success(), "{outcome}");
    for kind in EntityKind::ALL {
        assert_eq!(
            local_count(&h.local, kind).await,
            h.remote.document_count(Some(USER), kind.collection()) as u64,
            "count mismatch for {kind}"
        );
    }
    assert!(h.local.get_by_id::<Workout>("stale").await.unwrap().is_none());
    assert!(h.remote.get_sync_metadata(USER).await.unwrap().is_some());
}

fn assert_counts_match_remote(local_counts: &[(EntityKind, u64)], remote: &MemoryDocumentStore) {
    for (kind, count) in local_counts {
        assert_eq!(
            *count,
            remote.document_count(Some(USER), kind.collection()) as u64,
            "count mismatch for {kind}"
        );
    }
}

async fn local_counts(local: &LibSqlStore) -> Vec<(EntityKind, u64)> {
    let mut counts = Vec::new();
    for kind in EntityKind::ALL {
        counts.push((kind, local_count(local, kind).await));
    }
    counts
}

#[tokio::test(flavor = "multi_thread")]
async fn maxes_with_different_ids_survive_sync_then_restore() {
    let h = harness().await;
    put_catalogue(&h.remote);
    h.local.insert(&squat()).await.unwrap();
    h.local.insert(&exercise_max("local-max", 95.0)).await.unwrap();
    put_remote(&h.remote, &exercise_max("remote-max", 100.0));

    assert!(h.manager.sync_all().await.is_success());
    assert_counts_match_remote(&local_counts(&h.local).await, &h.remote);
    assert_eq!(local_count(&h.local, EntityKind::ExerciseMax).await, 2);

    let outcome = h.manager.restore_from_cloud().await;

    assert!(outcome.is_success(), "{outcome}");
    assert_counts_match_remote(&local_counts(&h.local).await, &h.remote);
    let local: ExerciseMax = h.local.get_by_id("local-max").await.unwrap().unwrap();
    assert_eq!(local.one_rm_estimate, 95.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn unsynced_swap_twin_takes_remote_id_and_survives_restore() {
    let h = harness().await;
    put_catalogue(&h.remote);
    let goblet = Exercise::system(
        "goblet",
        "Goblet Squat",
        ExerciseCategory::Legs,
        Equipment::Dumbbell,
    );
    h.remote.put_document(
        None,
        SYSTEM_EXERCISES_COLLECTION,
        goblet.id.clone(),
        serde_json::to_value(goblet.to_remote()).unwrap(),
    );
    h.local.insert(&squat()).await.unwrap();
    h.local.insert(&goblet).await.unwrap();
    let swap = |id: &str, date: i64| ExerciseSwapHistory {
        id: id.to_string(),
        user_id: Some(USER.to_string()),
        original_exercise_id: "squat".to_string(),
        swapped_to_exercise_id: "goblet".to_string(),
        workout_id: None,
        programme_id: None,
        swap_date: date,
    };
    h.local.insert(&swap("local-swap", 2_000)).await.unwrap();
    put_remote(&h.remote, &swap("remote-swap", 1_000));

    assert!(h.manager.sync_all().await.is_success());

    let swaps: Vec<ExerciseSwapHistory> = h.local.get_all(USER).await.unwrap();
    assert_eq!(
        swaps.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["remote-swap"]
    );
    assert_counts_match_remote(&local_counts(&h.local).await, &h.remote);

    assert!(h.manager.restore_from_cloud().await.is_success());
    assert_counts_match_remote(&local_counts(&h.local).await, &h.remote);
}

#[tokio::test(flavor = "multi_thread")]
async fn restore_only_reads_remote_documents() {
    let h = harness().await;
    put_full_hierarchy(&h.remote);
    h.local.insert(&workout("stale", "Only on this phone")).await.unwrap();
    let snapshot = |remote: &MemoryDocumentStore| {
        let mut documents = vec![remote.documents(None, SYSTEM_EXERCISES_COLLECTION)];
        for kind in EntityKind::ALL {
            documents.push(remote.documents(Some(USER), kind.collection()));
        }
        documents
    };
    let before = snapshot(&h.remote);

    let outcome = h.manager.restore_from_cloud().await;

    assert!(outcome.is_success(), "{outcome}");
    // System and custom exercises, the other kinds, then the metadata write
    assert_eq!(h.remote.call_count(), EntityKind::ALL.len() + 2);
    assert_eq!(snapshot(&h.remote), before);
    assert!(h
        .remote
        .documents(Some(USER), EntityKind::Workout.collection())
        .iter()
        .all(|document| document.id != "stale"));
}

#[tokio::test(flavor = "multi_thread")]
async fn undoing_a_set_removes_both_synced_records() {
    let h = harness().await;
    let set = put_full_hierarchy(&h.remote);
    assert!(h.manager.sync_all().await.is_success());
    assert_eq!(local_count(&h.local, EntityKind::PersonalRecord).await, 2);

    let deletion = h.local.delete_set_log_with_records(&set.id).await.unwrap();

    assert_eq!(deletion.personal_records, 2);
    assert!(deletion.set_removed);
    assert_eq!(local_count(&h.local, EntityKind::PersonalRecord).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn download_failure_aborts_before_upload() {
    let h = harness().await;
    h.local.insert(&workout("w-local", "Unsynced")).await.unwrap();
    h.remote.fail_collection(EntityKind::SetLog.collection());

    let outcome = h.manager.sync_all().await;

    match outcome {
        SyncOutcome::Error(message) => assert!(message.contains("download set_logs"), "{message}"),
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(
        h.remote
            .document_count(Some(USER), EntityKind::Workout.collection()),
        0
    );
    h.remote.clear_failures();
    assert_eq!(h.remote.get_sync_metadata(USER).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn metadata_failure_is_reported_as_error() {
    let h = harness().await;
    h.remote.fail_collection(SYNC_METADATA_COLLECTION);

    let outcome = h.manager.sync_all().await;

    assert!(
        matches!(&outcome, SyncOutcome::Error(message) if message.starts_with("read sync metadata")),
        "{outcome:?}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn signed_out_sync_is_an_error_without_remote_calls() {
    let h = harness_with(StaticAuthProvider::signed_out(), Duration::ZERO).await;

    assert_eq!(
        h.manager.sync_all().await,
        SyncOutcome::Error("User not authenticated".to_string())
    );
    assert_eq!(
        h.manager.restore_from_cloud().await,
        SyncOutcome::Error("User not authenticated".to_string())
    );
    assert_eq!(h.remote.call_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_local_store_forces_full_download() {
    let h = harness().await;
    put_catalogue(&h.remote);
    put_remote(&h.remote, &workout("old", "Before reinstall"));
    h.remote
        .update_sync_metadata(USER, "old-device", "old phone")
        .await
        .unwrap();

    assert!(h.manager.sync_all().await.is_success());

    assert!(h.local.get_by_id::<Workout>("old").await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn non_empty_local_store_downloads_incrementally() {
    let h = harness().await;
    h.local.insert(&workout("mine", "Local")).await.unwrap();
    put_remote(&h.remote, &workout("already-seen", "Synced earlier"));
    h.remote
        .update_sync_metadata(USER, "device-1", "test rig")
        .await
        .unwrap();

    assert!(h.manager.sync_all().await.is_success());

    assert!(h
        .local
        .get_by_id::<Workout>("already-seen")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn system_reference_sync_needs_no_user() {
    let h = harness_with(StaticAuthProvider::signed_out(), Duration::from_secs(10)).await;
    put_catalogue(&h.remote);

    let outcome = h.manager.sync_system_reference_data().await;

    assert!(outcome.is_success(), "{outcome}");
    let shared: Vec<Exercise> = h.local.get_unowned().await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(h.remote.get_sync_metadata(USER).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn explicit_user_sync_records_metadata_for_that_user() {
    let h = harness_with(StaticAuthProvider::signed_out(), Duration::ZERO).await;

    let outcome = h.manager.sync_user_data("user-2").await;

    let SyncOutcome::Success(at) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    let metadata = h.remote.get_sync_metadata("user-2").await.unwrap().unwrap();
    assert_eq!(metadata.last_sync_time, at);
    assert_eq!(metadata.device_id, "device-1");
}
