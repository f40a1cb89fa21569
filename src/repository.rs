use crate::models::{Message, NewMessage, NewUser, Project, ProjectForm, User};
use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, sync::Arc};

pub type RepoResult<T> = Result<T, sqlx::Error>;

/// Repository Trait
///
/// The persistence contract used by every handler. Handlers only ever see
/// `Arc<dyn Repository>`, so tests can swap in a recording mock and the
/// concrete store stays an implementation detail.
///
/// Each method is a single statement; there are no multi-statement transactions.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Projects ---
    /// All projects in store order (ascending id).
    async fn list_projects(&self) -> RepoResult<Vec<Project>>;
    async fn get_project(&self, id: i64) -> RepoResult<Option<Project>>;
    async fn create_project(&self, form: &ProjectForm) -> RepoResult<Project>;
    /// Overwrites every editable field. `None` when the id does not exist.
    async fn update_project(&self, id: i64, form: &ProjectForm) -> RepoResult<Option<Project>>;
    /// `true` if a row was removed.
    async fn delete_project(&self, id: i64) -> RepoResult<bool>;

    // --- Messages ---
    async fn create_message(&self, message: &NewMessage) -> RepoResult<Message>;
    async fn count_messages(&self) -> RepoResult<i64>;

    // --- Users ---
    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    async fn create_user(&self, user: &NewUser) -> RepoResult<User>;
}

/// RepositoryState
///
/// The shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn Repository>;

const SCHEMA: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username VARCHAR(50) NOT NULL UNIQUE,
        email VARCHAR(120) NOT NULL UNIQUE,
        password VARCHAR(200) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        image_url VARCHAR(200) NOT NULL,
        project_link VARCHAR(200)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50) NOT NULL,
        email VARCHAR(120) NOT NULL,
        message TEXT NOT NULL
    )"#,
];

/// connect_pool
///
/// Opens the SQLite pool for `url`. An in-memory database lives only as long as
/// its connection, so `:memory:` URLs get a single connection that is never recycled.
pub async fn connect_pool(url: &str) -> RepoResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
    }
}

/// SqliteRepository
///
/// The `Repository` implementation backed by a single SQLite database file.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// init_schema
    ///
    /// Creates the three tables if they are missing. Existing tables are left as-is;
    /// there is no versioned migration history.
    pub async fn init_schema(&self) -> RepoResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("schema ready");
        Ok(())
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn list_projects(&self) -> RepoResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT id, title, description, image_url, project_link FROM projects ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_project(&self, id: i64) -> RepoResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT id, title, description, image_url, project_link FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_project(&self, form: &ProjectForm) -> RepoResult<Project> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, image_url, project_link)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, description, image_url, project_link
            "#,
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.image_url)
        .bind(form.link())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_project(&self, id: i64, form: &ProjectForm) -> RepoResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = ?, description = ?, image_url = ?, project_link = ?
            WHERE id = ?
            RETURNING id, title, description, image_url, project_link
            "#,
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.image_url)
        .bind(form.link())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_project(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_message(&self, message: &NewMessage) -> RepoResult<Message> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (name, email, message)
            VALUES (?, ?, ?)
            RETURNING id, name, email, message
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_messages(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
    }

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES (?, ?, ?)
            RETURNING id, username, email, password
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
    }
}
