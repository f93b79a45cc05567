use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};

/// Persisted wizard resume state. Replaces the original's ad hoc
/// session-storage flags with one record owned by the store: saved when the
/// analysis phase starts, cleared when the job reaches a terminal status.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ResumeToken {
    pub study_id: String,
    pub audit_id: String,
    pub job_id: Option<String>,
    pub step: String,
    pub analysis_loading: bool,
    pub saved_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS resume_tokens (
    study_id TEXT PRIMARY KEY,
    audit_id TEXT NOT NULL,
    job_id TEXT,
    step TEXT NOT NULL,
    analysis_loading INTEGER NOT NULL DEFAULT 0,
    saved_at TEXT NOT NULL
)
"#;

impl SessionStore {
    pub async fn open(db_path: &str) -> Result<Self> {
        let db_url = format!("sqlite://{}", db_path);

        if !Sqlite::database_exists(&db_url).await? {
            Sqlite::create_database(&db_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        Self::with_pool(pool).await
    }

    /// In-memory store for tests.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn save(&self, token: &ResumeToken) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resume_tokens (study_id, audit_id, job_id, step, analysis_loading, saved_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(study_id) DO UPDATE SET
                audit_id = excluded.audit_id,
                job_id = excluded.job_id,
                step = excluded.step,
                analysis_loading = excluded.analysis_loading,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(&token.study_id)
        .bind(&token.audit_id)
        .bind(&token.job_id)
        .bind(&token.step)
        .bind(token.analysis_loading)
        .bind(token.saved_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn load(&self, study_id: &str) -> Result<Option<ResumeToken>> {
        let token = sqlx::query_as::<_, ResumeToken>(
            "SELECT study_id, audit_id, job_id, step, analysis_loading, saved_at
             FROM resume_tokens WHERE study_id = ?",
        )
        .bind(study_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(token)
    }

    /// Most recently saved token, for resuming without knowing a study id.
    pub async fn load_latest(&self) -> Result<Option<ResumeToken>> {
        let token = sqlx::query_as::<_, ResumeToken>(
            "SELECT study_id, audit_id, job_id, step, analysis_loading, saved_at
             FROM resume_tokens ORDER BY saved_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(token)
    }

    pub async fn clear(&self, study_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resume_tokens WHERE study_id = ?")
            .bind(study_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
