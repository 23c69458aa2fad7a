//! Scripted QueryRunner for unit tests

use crate::store::{QueryOutput, QueryRunner};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Replies to statements by prefix match and records everything it was sent
///
/// Unmatched statements answer with empty output and exit code 0.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Vec<(String, QueryOutput)>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer statements starting with `prefix` (after trimming) with `output`
    pub fn reply(mut self, prefix: &str, output: &str) -> Self {
        self.replies.push((
            prefix.to_string(),
            QueryOutput {
                output: output.to_string(),
                exit_code: 0,
            },
        ));
        self
    }

    pub fn fail(mut self, prefix: &str, exit_code: i32) -> Self {
        self.replies.push((
            prefix.to_string(),
            QueryOutput {
                output: String::new(),
                exit_code,
            },
        ));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Answer `SELECT id ... WHERE name = '<name>'` with `id`
    pub fn workflow_id(self, name: &str, id: &str) -> Self {
        let prefix = format!("SELECT id FROM workflow_entity WHERE name = '{}'", name);
        self.reply(&prefix, id)
    }
}

#[async_trait]
impl QueryRunner for ScriptedRunner {
    async fn run(&self, sql: &str) -> Result<QueryOutput> {
        self.executed.lock().unwrap().push(sql.to_string());
        let statement = sql.trim_start();
        Ok(self
            .replies
            .iter()
            .find(|(prefix, _)| statement.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(QueryOutput {
                output: String::new(),
                exit_code: 0,
            }))
    }
}
