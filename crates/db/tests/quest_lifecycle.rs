//! Integration tests for the project_quests status machine.
//!
//! Every transition is a conditional update; these tests pin down which
//! source statuses each guard accepts and what `None` means to callers.

use sqlx::PgPool;

use jam_db::models::project::CreateProject;
use jam_db::models::project_quest::SubmitQuest;
use jam_db::models::quest::CreateQuest;
use jam_db::models::user::CreateUser;
use jam_db::repositories::{ProjectQuestRepo, ProjectRepo, QuestRepo, UserRepo};

struct Fixture {
    admin_id: i64,
    user_id: i64,
    project_id: i64,
    quest_id: i64,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let admin = UserRepo::create(
        pool,
        &CreateUser {
            username: "admin".to_string(),
            email: "admin@test.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: None,
            wallet_address: None,
            is_admin: true,
        },
    )
    .await
    .unwrap();

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "builder".to_string(),
            email: "builder@test.com".to_string(),
            password_hash: "hash".to_string(),
            display_name: None,
            wallet_address: None,
            is_admin: false,
        },
    )
    .await
    .unwrap();

    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "P".to_string(),
            description: None,
            created_by: user.id,
        },
    )
    .await
    .unwrap();

    let quest = QuestRepo::create(
        pool,
        &CreateQuest {
            title: "Q".to_string(),
            description: None,
            quest_type: "TEAM".to_string(),
            reward_points: 100,
            bounty_usd: None,
            created_by: admin.id,
        },
    )
    .await
    .unwrap();

    Fixture {
        admin_id: admin.id,
        user_id: user.id,
        project_id: project.id,
        quest_id: quest.id,
    }
}

fn submission(user_id: i64) -> SubmitQuest {
    SubmitQuest {
        submission_url: "https://example.com/proof".to_string(),
        submission_notes: None,
        submitted_by: user_id,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn start_creates_in_progress_row(pool: PgPool) {
    let f = fixture(&pool).await;

    let row = ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "IN_PROGRESS");
    assert!(!row.is_verified);

    // A second start loses the guard.
    let again = ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap();
    assert!(again.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_from_in_progress(pool: PgPool) {
    let f = fixture(&pool).await;
    ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap();

    let row = ProjectQuestRepo::submit(&pool, f.project_id, f.quest_id, &submission(f.user_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "SUBMITTED");
    assert_eq!(row.submitted_by, Some(f.user_id));
    assert!(row.submitted_at.is_some());

    // Resubmission while still SUBMITTED replaces the evidence.
    let resubmit = SubmitQuest {
        submission_url: "https://example.com/proof-v2".to_string(),
        submission_notes: Some("second attempt".to_string()),
        submitted_by: f.user_id,
    };
    let row = ProjectQuestRepo::submit(&pool, f.project_id, f.quest_id, &resubmit)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.submission_url.as_deref(), Some("https://example.com/proof-v2"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_without_row_returns_none(pool: PgPool) {
    let f = fixture(&pool).await;

    let result = ProjectQuestRepo::submit(&pool, f.project_id, f.quest_id, &submission(f.user_id))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_guards_on_submitted(pool: PgPool) {
    let f = fixture(&pool).await;
    let row = ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap()
        .unwrap();

    // IN_PROGRESS is not decidable.
    let result = ProjectQuestRepo::verify(&pool, row.id, f.admin_id, None, None)
        .await
        .unwrap();
    assert!(result.is_none());

    ProjectQuestRepo::submit(&pool, f.project_id, f.quest_id, &submission(f.user_id))
        .await
        .unwrap();

    let verified = ProjectQuestRepo::verify(&pool, row.id, f.admin_id, Some("ok"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(verified.status, "VERIFIED");
    assert!(verified.is_verified);
    assert_eq!(verified.verified_by, Some(f.admin_id));
    assert_eq!(verified.verification_notes.as_deref(), Some("ok"));
    assert!(verified.payment_tx_hash.is_none());
    assert!(verified.paid_at.is_none());

    // The decision is final: verify and reject both lose the guard now.
    assert!(ProjectQuestRepo::verify(&pool, row.id, f.admin_id, None, None)
        .await
        .unwrap()
        .is_none());
    assert!(ProjectQuestRepo::reject(&pool, row.id, f.admin_id, "late")
        .await
        .unwrap()
        .is_none());

    assert_eq!(
        ProjectQuestRepo::count_verified_for_project(&pool, f.project_id)
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_with_payment_stamps_payout_columns(pool: PgPool) {
    let f = fixture(&pool).await;
    let row = ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap()
        .unwrap();
    ProjectQuestRepo::submit(&pool, f.project_id, f.quest_id, &submission(f.user_id))
        .await
        .unwrap();

    let verified = ProjectQuestRepo::verify(&pool, row.id, f.admin_id, None, Some("0xdeadbeef"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(verified.payment_tx_hash.as_deref(), Some("0xdeadbeef"));
    assert!(verified.paid_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_records_reason_and_does_not_count(pool: PgPool) {
    let f = fixture(&pool).await;
    let row = ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap()
        .unwrap();
    ProjectQuestRepo::submit(&pool, f.project_id, f.quest_id, &submission(f.user_id))
        .await
        .unwrap();

    let rejected = ProjectQuestRepo::reject(&pool, row.id, f.admin_id, "not enough evidence")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status, "REJECTED");
    assert!(!rejected.is_verified);
    assert_eq!(
        rejected.verification_notes.as_deref(),
        Some("not enough evidence")
    );
    assert!(rejected.paid_at.is_none());

    assert_eq!(
        ProjectQuestRepo::count_verified_for_project(&pool, f.project_id)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_queue_orders_oldest_first(pool: PgPool) {
    let f = fixture(&pool).await;

    let second_quest = QuestRepo::create(
        &pool,
        &CreateQuest {
            title: "Q2".to_string(),
            description: None,
            quest_type: "TEAM".to_string(),
            reward_points: 50,
            bounty_usd: Some(25.0),
            created_by: f.admin_id,
        },
    )
    .await
    .unwrap();

    for quest_id in [f.quest_id, second_quest.id] {
        ProjectQuestRepo::start(&pool, f.project_id, quest_id)
            .await
            .unwrap();
        ProjectQuestRepo::submit(&pool, f.project_id, quest_id, &submission(f.user_id))
            .await
            .unwrap();
    }

    let pending = ProjectQuestRepo::list_pending(&pool).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].quest_title, "Q");
    assert_eq!(pending[1].quest_title, "Q2");
    assert_eq!(pending[0].project_name, "P");
    assert_eq!(pending[0].submitted_by_username.as_deref(), Some("builder"));
    assert_eq!(pending[1].bounty_usd, Some(25.0));

    // Decided rows leave the queue.
    ProjectQuestRepo::verify(&pool, pending[0].id, f.admin_id, None, None)
        .await
        .unwrap();
    let pending = ProjectQuestRepo::list_pending(&pool).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].quest_title, "Q2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_progress_row_violates_unique_constraint(pool: PgPool) {
    let f = fixture(&pool).await;
    ProjectQuestRepo::start(&pool, f.project_id, f.quest_id)
        .await
        .unwrap();

    // The ON CONFLICT path absorbs the violation; a raw insert shows it.
    let err = sqlx::query("INSERT INTO project_quests (project_id, quest_id) VALUES ($1, $2)")
        .bind(f.project_id)
        .bind(f.quest_id)
        .execute(&pool)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_project_quests_project_quest"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}
