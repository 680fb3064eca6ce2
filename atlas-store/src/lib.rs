//! # atlas-store
//!
//! Best-effort persistence of pipeline runs: one interaction row in
//! Postgres, one full-result document in MongoDB. Persistence is never
//! fatal to a request; every failure here is logged and suppressed at this
//! boundary.

mod config;

pub use config::StoreConfig;

use atlas_core::{AtlasError, PipelineResult, Result};
use futures::TryStreamExt;
use mongodb::bson::{DateTime, Document, doc};
use mongodb::Database;
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::{debug, info, warn};

const ANALYSES_COLLECTION: &str = "analyses";

pub struct AnalysisStore {
    pg: Option<PgPool>,
    mongo: Option<Database>,
}

impl AnalysisStore {
    /// Connect to both stores. Either connection may fail without failing
    /// startup; the corresponding writes are skipped until restart.
    pub async fn connect(config: &StoreConfig) -> Self {
        let pg = match PgPool::connect_with(config.postgres_options()).await {
            Ok(pool) => {
                info!("connected to PostgreSQL");
                Some(pool)
            }
            Err(e) => {
                warn!(error = %e, "PostgreSQL unavailable, interaction rows disabled");
                None
            }
        };

        let mongo = match mongodb::Client::with_uri_str(&config.mongodb_uri).await {
            Ok(client) => {
                info!("connected to MongoDB");
                Some(client.database(&config.mongodb_db))
            }
            Err(e) => {
                warn!(error = %e, "MongoDB unavailable, analysis documents disabled");
                None
            }
        };

        Self { pg, mongo }
    }

    /// A store with no backing connections. Records nothing; useful in tests
    /// and matches the degraded mode `connect` falls into when both stores
    /// are down.
    pub fn disconnected() -> Self {
        Self {
            pg: None,
            mongo: None,
        }
    }

    pub async fn migrate(&self) -> Result<()> {
        let Some(pg) = &self.pg else {
            return Ok(());
        };
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_interactions (
                id SERIAL PRIMARY KEY,
                user_id TEXT NOT NULL,
                interaction_type TEXT NOT NULL,
                timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pg)
        .await
        .map_err(|e| AtlasError::Store(format!("migration failed: {}", e)))?;
        Ok(())
    }

    /// Record one completed run. Best-effort: failures are logged, never
    /// returned. If Postgres is down the Mongo document is skipped too,
    /// since the document carries the relational id.
    pub async fn record(&self, product_text: &str, result: &PipelineResult) {
        match self.try_record(product_text, result).await {
            Ok(Some(id)) => debug!(analysis_id = id, "analysis recorded"),
            Ok(None) => debug!("persistence skipped, store not connected"),
            Err(e) => warn!(error = %e, "failed to persist analysis"),
        }
    }

    async fn try_record(&self, product_text: &str, result: &PipelineResult) -> Result<Option<i32>> {
        let Some(pg) = &self.pg else {
            return Ok(None);
        };

        let row = sqlx::query(
            "INSERT INTO user_interactions (user_id, interaction_type) VALUES ($1, $2) RETURNING id",
        )
        .bind("system")
        .bind("analysis")
        .fetch_one(pg)
        .await
        .map_err(|e| AtlasError::Store(format!("interaction insert failed: {}", e)))?;
        let id: i32 = row
            .try_get("id")
            .map_err(|e| AtlasError::Store(format!("interaction id missing: {}", e)))?;

        if let Some(mongo) = &self.mongo {
            let document = build_analysis_document(id, product_text, result)?;
            mongo
                .collection::<Document>(ANALYSES_COLLECTION)
                .insert_one(document)
                .await
                .map_err(|e| AtlasError::Store(format!("analysis insert failed: {}", e)))?;
        }

        Ok(Some(id))
    }

    /// Most recent analysis documents, newest first.
    pub async fn recent_analyses(&self, limit: i64) -> Result<Vec<Document>> {
        let Some(mongo) = &self.mongo else {
            return Err(AtlasError::Store("MongoDB not connected".to_string()));
        };

        let cursor = mongo
            .collection::<Document>(ANALYSES_COLLECTION)
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await
            .map_err(|e| AtlasError::Store(format!("history query failed: {}", e)))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AtlasError::Store(format!("history cursor failed: {}", e)))
    }
}

fn build_analysis_document(
    id: i32,
    product_text: &str,
    result: &PipelineResult,
) -> Result<Document> {
    let result_bson = mongodb::bson::to_bson(result)
        .map_err(|e| AtlasError::Store(format!("result serialization failed: {}", e)))?;
    Ok(doc! {
        "id": id,
        "product_text": product_text,
        "result": result_bson,
        "timestamp": DateTime::now(),
    })
}
