//! Integration tests for the catalog and ledger repositories.
//!
//! Exercises the repository layer against a real database:
//! - Script and worker CRUD
//! - Unique name constraints
//! - The one-job-per-worker constraint
//! - FK RESTRICT on catalog deletes while a job is live

use sqlx::PgPool;

use flotilla_db::models::script::CreateScript;
use flotilla_db::models::worker::CreateWorker;
use flotilla_db::repositories::{JobRepo, ScriptRepo, WorkerRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_script(name: &str) -> CreateScript {
    CreateScript {
        name: name.to_string(),
        content: "services:\n  web:\n    image: nginx\n".to_string(),
    }
}

fn new_worker(name: &str, location: &str) -> CreateWorker {
    CreateWorker {
        name: name.to_string(),
        location: location.to_string(),
    }
}

/// Assert that a sqlx error is a PostgreSQL constraint violation with the
/// given SQLSTATE code and constraint name.
fn assert_constraint(err: &sqlx::Error, code: &str, constraint: &str) {
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some(code));
            assert_eq!(db_err.constraint(), Some(constraint));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn script_create_find_list_delete(pool: PgPool) {
    let script = ScriptRepo::create(&pool, &new_script("web")).await.unwrap();
    assert_eq!(script.name, "web");
    assert!(script.content.contains("nginx"));

    let found = ScriptRepo::find_by_id(&pool, script.id).await.unwrap();
    assert_eq!(found.unwrap().id, script.id);

    let listed = ScriptRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);

    assert!(ScriptRepo::delete(&pool, script.id).await.unwrap());
    assert!(ScriptRepo::find_by_id(&pool, script.id).await.unwrap().is_none());

    // Deleting an already-deleted script is a no-op, not an error.
    assert!(!ScriptRepo::delete(&pool, script.id).await.unwrap());
}

#[sqlx::test]
async fn duplicate_script_name_is_rejected(pool: PgPool) {
    ScriptRepo::create(&pool, &new_script("web")).await.unwrap();

    let err = ScriptRepo::create(&pool, &new_script("web"))
        .await
        .unwrap_err();
    assert_constraint(&err, "23505", "uq_scripts_name");
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn worker_create_find_list_delete(pool: PgPool) {
    let worker = WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.5"))
        .await
        .unwrap();
    assert_eq!(worker.location, "10.0.0.5");

    let found = WorkerRepo::find_by_id(&pool, worker.id).await.unwrap();
    assert_eq!(found.unwrap().name, "w1");

    assert_eq!(WorkerRepo::list(&pool).await.unwrap().len(), 1);
    assert!(WorkerRepo::delete(&pool, worker.id).await.unwrap());
}

#[sqlx::test]
async fn duplicate_worker_name_is_rejected(pool: PgPool) {
    WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.5"))
        .await
        .unwrap();

    let err = WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.6"))
        .await
        .unwrap_err();
    assert_constraint(&err, "23505", "uq_workers_name");
}

// ---------------------------------------------------------------------------
// Job ledger
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn job_insert_and_joined_reads(pool: PgPool) {
    let script = ScriptRepo::create(&pool, &new_script("web")).await.unwrap();
    let worker = WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.5"))
        .await
        .unwrap();

    let job = JobRepo::insert(&pool, script.id, worker.id).await.unwrap();
    assert_eq!(job.script_id, script.id);
    assert_eq!(job.worker_id, worker.id);

    let by_worker = JobRepo::find_by_worker(&pool, worker.id).await.unwrap();
    assert_eq!(by_worker.unwrap().id, job.id);

    let deployment = JobRepo::find_deployment(&pool, job.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deployment.script_name, "web");
    assert_eq!(deployment.worker_location, "10.0.0.5");

    let listed = JobRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, job.id);
}

#[sqlx::test]
async fn worker_runs_at_most_one_job(pool: PgPool) {
    let s1 = ScriptRepo::create(&pool, &new_script("web")).await.unwrap();
    let s2 = ScriptRepo::create(&pool, &new_script("db")).await.unwrap();
    let worker = WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.5"))
        .await
        .unwrap();

    JobRepo::insert(&pool, s1.id, worker.id).await.unwrap();

    let err = JobRepo::insert(&pool, s2.id, worker.id).await.unwrap_err();
    assert_constraint(&err, "23505", "uq_jobs_worker");
    assert!(flotilla_db::is_unique_violation(&err, "uq_jobs_worker"));
}

#[sqlx::test]
async fn catalog_delete_is_blocked_by_live_job(pool: PgPool) {
    let script = ScriptRepo::create(&pool, &new_script("web")).await.unwrap();
    let worker = WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.5"))
        .await
        .unwrap();
    let job = JobRepo::insert(&pool, script.id, worker.id).await.unwrap();

    let err = ScriptRepo::delete(&pool, script.id).await.unwrap_err();
    assert_constraint(&err, "23503", "fk_jobs_script");

    let err = WorkerRepo::delete(&pool, worker.id).await.unwrap_err();
    assert_constraint(&err, "23503", "fk_jobs_worker");

    // Nothing was mutated by the failed deletes.
    assert!(ScriptRepo::find_by_id(&pool, script.id).await.unwrap().is_some());
    assert!(WorkerRepo::find_by_id(&pool, worker.id).await.unwrap().is_some());

    // Once the job is gone, the catalog rows can be removed.
    assert!(JobRepo::delete(&pool, job.id).await.unwrap());
    assert!(ScriptRepo::delete(&pool, script.id).await.unwrap());
    assert!(WorkerRepo::delete(&pool, worker.id).await.unwrap());
}

#[sqlx::test]
async fn job_delete_is_idempotent_at_the_row_level(pool: PgPool) {
    let script = ScriptRepo::create(&pool, &new_script("web")).await.unwrap();
    let worker = WorkerRepo::create(&pool, &new_worker("w1", "10.0.0.5"))
        .await
        .unwrap();
    let job = JobRepo::insert(&pool, script.id, worker.id).await.unwrap();

    assert!(JobRepo::delete(&pool, job.id).await.unwrap());
    assert!(!JobRepo::delete(&pool, job.id).await.unwrap());
    assert!(JobRepo::find_deployment(&pool, job.id).await.unwrap().is_none());
}
