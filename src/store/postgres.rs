/// Direct PostgreSQL backend
///
/// Used when RELINK_DATABASE_URL is set. Statements go through the simple query
/// protocol and rows are rendered the way `psql -t -A` prints them, so the
/// storage layer cannot tell the two backends apart.

use crate::store::{QueryOutput, QueryRunner};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

pub struct PostgresQueryRunner {
    client: Client,
}

impl PostgresQueryRunner {
    /// Connect and spawn the connection driver onto the runtime
    pub async fn connect(database_url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("❌ PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!("🐘 Connected to PostgreSQL directly");
        Ok(Self { client })
    }
}

/// Render result messages as tuple-only unaligned text
fn render_unaligned(messages: &[SimpleQueryMessage]) -> String {
    let mut lines = Vec::new();
    for message in messages {
        if let SimpleQueryMessage::Row(row) = message {
            let columns: Vec<&str> = (0..row.len())
                .map(|i| row.get(i).unwrap_or(""))
                .collect();
            lines.push(columns.join("|"));
        }
    }
    lines.join("\n")
}

#[async_trait]
impl QueryRunner for PostgresQueryRunner {
    async fn run(&self, sql: &str) -> Result<QueryOutput> {
        tracing::debug!("🐘 simple_query: {} bytes of SQL", sql.len());

        match self.client.simple_query(sql).await {
            Ok(messages) => Ok(QueryOutput {
                output: render_unaligned(&messages).trim().to_string(),
                exit_code: 0,
            }),
            Err(e) => {
                tracing::warn!("⚠️ Query failed: {}", e);
                Ok(QueryOutput {
                    output: String::new(),
                    exit_code: 1,
                })
            }
        }
    }
}
