/// Configuration for the relink run
///
/// Handles store connection parameters, the target record and the name lookup tables.
/// Everything comes from environment variables with hard defaults; there are no flags.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store connection configuration
    pub store: StoreConfig,
    /// Name of the workflow record whose nodes get patched
    pub orchestrator_name: String,
    /// Node-name and generator lookup tables
    pub links: LinkTables,
}

/// How to reach the n8n Postgres database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Docker container running Postgres (empty: run `psql` on the host)
    pub container: String,
    /// `psql -U` user
    pub user: String,
    /// `psql -d` database
    pub database: String,
    /// Direct connection URL; when set, tokio-postgres is used instead of psql
    pub database_url: Option<String>,
}

/// Immutable lookup tables resolved once per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTables {
    /// Execute-workflow node name -> target workflow name, in lookup order
    pub execute_links: Vec<ExecuteLink>,
    /// Generators routed by the "Route to Generators" code node, in request order
    pub generators: Vec<GeneratorSpec>,
}

/// One execute-workflow node and the workflow it should point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteLink {
    pub node_name: String,
    pub workflow_name: String,
}

/// One generator workflow; its id is resolved by its own workflow name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    /// Workflow name, also emitted as `generator_name`
    pub workflow_name: String,
    /// `document_type` tag of the generation request
    pub document_type: String,
    /// Generator-specific literal fields, e.g. ("product_name", "AIRR")
    pub extra_fields: Vec<(String, String)>,
}

impl ExecuteLink {
    fn new(node_name: &str, workflow_name: &str) -> Self {
        Self {
            node_name: node_name.to_string(),
            workflow_name: workflow_name.to_string(),
        }
    }
}

impl GeneratorSpec {
    fn new(workflow_name: &str, document_type: &str) -> Self {
        Self {
            workflow_name: workflow_name.to_string(),
            document_type: document_type.to_string(),
            extra_fields: Vec::new(),
        }
    }

    fn with_field(mut self, key: &str, value: &str) -> Self {
        self.extra_fields.push((key.to_string(), value.to_string()));
        self
    }
}

impl Default for LinkTables {
    /// Tables matching the exported document-generation workflow set
    fn default() -> Self {
        Self {
            execute_links: vec![
                ExecuteLink::new("Fetch Company Snippet", "11 - Company Snippet Fetcher"),
                ExecuteLink::new("Fetch Enrichment Data", "10 - External Data Enricher"),
                ExecuteLink::new("Scan Google Drive", "02 - Google Drive Scanner"),
                ExecuteLink::new("Analyze Document", "08 - Document Analyzer OpenAI"),
                ExecuteLink::new("Update Document", "21 - Document Updater"),
                ExecuteLink::new("Upload Updated Docs", "18 - Google Drive Uploader"),
                ExecuteLink::new("Generate Visuals", "16 - Visual Asset Generator"),
                ExecuteLink::new("Upload to Drive", "18 - Google Drive Uploader"),
            ],
            generators: vec![
                GeneratorSpec::new("12 - Corporate Overview Generator", "corporate_overview"),
                GeneratorSpec::new("13 - Product Datasheet Generator", "product_datasheet")
                    .with_field("product_name", "AIRR"),
                GeneratorSpec::new("14 - Higher Ed One-Pager Generator", "higher_ed_onepager"),
            ],
        }
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR overrides for container deployments
    fn default() -> Self {
        Self {
            store: StoreConfig {
                container: std::env::var("RELINK_PSQL_CONTAINER")
                    .unwrap_or_else(|_| "n8n-postgres-new".to_string()),
                user: std::env::var("RELINK_PSQL_USER").unwrap_or_else(|_| "n8n".to_string()),
                database: std::env::var("RELINK_PSQL_DATABASE")
                    .unwrap_or_else(|_| "n8n".to_string()),
                database_url: std::env::var("RELINK_DATABASE_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
            },
            orchestrator_name: std::env::var("RELINK_ORCHESTRATOR")
                .unwrap_or_else(|_| "01 - Main Orchestrator".to_string()),
            links: LinkTables::default(),
        }
    }
}
