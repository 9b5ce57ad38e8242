use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use log::info;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::models::{Activity, ActivityFilter, NewActivity};

const CREATE_ACTIVITIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT,
    date        TEXT,
    location    TEXT,
    cost        TEXT,
    source_url  TEXT
)
"#;

/// Handle on the single `activities` table shared by the scraper and the API.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    pool: SqlitePool,
}

impl ActivityStore {
    /// Opens the store, creating the database file and table on first use.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url: {database_url}"))?
            .create_if_missing(true);

        let database_file = database_file_path(database_url);
        let (pool_options, created_file) = match &database_file {
            Some(path) => (
                SqlitePoolOptions::new().max_connections(5),
                prepare_database_file(path)?,
            ),
            // An in-memory database only lives as long as its one connection.
            None => (
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None),
                false,
            ),
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database {database_url}"))?;

        if let Some(path) = &database_file {
            if created_file {
                info!("Database '{}' created successfully.", path.display());
            } else {
                info!("Database '{}' already exists.", path.display());
            }
        }

        sqlx::query(CREATE_ACTIVITIES_TABLE)
            .execute(&pool)
            .await
            .context("failed to create activities table")?;

        Ok(Self { pool })
    }

    pub async fn insert(&self, activity: &NewActivity) -> anyhow::Result<i64> {
        let result = sqlx::query(
            "INSERT INTO activities (title, description, date, location, cost, source_url)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.date)
        .bind(&activity.location)
        .bind(&activity.cost)
        .bind(&activity.source_url)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to insert activity {:?}", activity.title))?;
        Ok(result.last_insert_rowid())
    }

    /// Every stored activity accepted by `filter`, in storage order.
    pub async fn list(&self, filter: &ActivityFilter) -> anyhow::Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, title, description, date, location, cost, source_url
             FROM activities ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch activities")?;

        Ok(activities
            .into_iter()
            .filter(|activity| filter.matches(activity))
            .collect())
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities")
            .fetch_one(&self.pool)
            .await
            .context("failed to count activities")
    }
}

/// The on-disk path behind a sqlite url, or `None` for in-memory databases.
fn database_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" || database_url.contains("mode=memory") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Creates the parent directory of a missing database file. Returns whether
/// the file is about to be created.
fn prepare_database_file(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
pub(crate) async fn in_memory_store() -> ActivityStore {
    ActivityStore::connect("sqlite::memory:").await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_activity(title: &str, description: Option<&str>, cost: Option<&str>) -> NewActivity {
        NewActivity {
            title: title.to_string(),
            description: description.map(str::to_string),
            cost: cost.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn file_paths_from_urls() {
        assert_eq!(
            database_file_path("sqlite://instance/site.db"),
            Some(PathBuf::from("instance/site.db"))
        );
        assert_eq!(
            database_file_path("sqlite:data.db?mode=rwc"),
            Some(PathBuf::from("data.db"))
        );
        assert_eq!(database_file_path("sqlite::memory:"), None);
        assert_eq!(database_file_path("sqlite://shared?mode=memory"), None);
    }

    #[tokio::test]
    async fn insert_then_list_in_storage_order() {
        let store = in_memory_store().await;
        let first = store.insert(&new_activity("First", None, None)).await.unwrap();
        let second = store
            .insert(&new_activity("Second", Some("desc"), Some("Free")))
            .await
            .unwrap();
        assert!(second > first);

        let all = store.list(&ActivityFilter::default()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(all[1].description.as_deref(), Some("desc"));
        assert_eq!(all[0].description, None);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn identical_rows_are_not_deduplicated() {
        let store = in_memory_store().await;
        let activity = new_activity("Same", Some("same"), None);
        store.insert(&activity).await.unwrap();
        store.insert(&activity).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn list_applies_filter() {
        let store = in_memory_store().await;
        store.insert(&new_activity("Kite day", None, Some("free"))).await.unwrap();
        store.insert(&new_activity("Boat trip", None, Some("£10"))).await.unwrap();

        let free = store
            .list(&ActivityFilter {
                search: None,
                cost: Some("free".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].title, "Kite day");
    }

    #[tokio::test]
    async fn connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("site.db");
        let url = format!("sqlite://{}", path.display());

        assert!(prepare_database_file(&path).unwrap());
        let store = ActivityStore::connect(&url).await.unwrap();
        store.insert(&new_activity("Persisted", None, None)).await.unwrap();
        assert!(path.exists());
        assert!(!prepare_database_file(&path).unwrap());

        let reopened = ActivityStore::connect(&url).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn connect_fails_when_database_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the database file should be.
        let path = dir.path().join("site.db");
        std::fs::create_dir(&path).unwrap();

        let url = format!("sqlite://{}", path.display());
        assert!(ActivityStore::connect(&url).await.is_err());
    }
}
