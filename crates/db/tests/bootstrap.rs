use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify the schema came up.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    jam_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "user_sessions",
        "projects",
        "project_members",
        "quests",
        "project_quests",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// New projects start at the bottom of the stage ladder.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_default_stage(pool: PgPool) {
    sqlx::query("INSERT INTO users (username, email, password_hash) VALUES ('u', 'u@t.com', 'x')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO projects (name, created_by)
         SELECT 'p', id FROM users WHERE username = 'u'",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (stage,): (String,) = sqlx::query_as("SELECT stage FROM projects WHERE name = 'p'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stage, "IDEA");
}

/// The updated_at trigger stamps rows on every UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    sqlx::query("INSERT INTO users (username, email, password_hash) VALUES ('u', 'u@t.com', 'x')")
        .execute(&pool)
        .await
        .unwrap();

    let (before,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM users WHERE username = 'u'")
            .fetch_one(&pool)
            .await
            .unwrap();

    // pg_sleep so the clock moves between the insert and the update.
    sqlx::query("SELECT pg_sleep(0.01)").execute(&pool).await.unwrap();
    sqlx::query("UPDATE users SET display_name = 'renamed' WHERE username = 'u'")
        .execute(&pool)
        .await
        .unwrap();

    let (after,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM users WHERE username = 'u'")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after > before, "updated_at should move forward on UPDATE");
}

/// Every table carries created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(&format!(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = '{table}'
                   AND column_name = '{col}'"
            ))
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}
