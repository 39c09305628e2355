use serde_json::{Map, Value};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    ai::{
        intent::Intent,
        provider::ModelChain,
        sql::{build_answer_prompt, build_sql_prompt, clean_response, validate_select},
    },
    constants::MAX_PROMPT_ROWS,
    entities::chat::{ChatRequest, ChatResponse},
    errors::{AiError, AppError},
    infrastructure::db::SqlDialect,
    repositories::chat_query::ChatQueryRunner,
};

/// Canned reply for any downstream failure. The chat endpoint never
/// surfaces an error to the frontend.
const APOLOGY: &str =
    "Sorry, I'm having trouble answering that right now. Please try again in a moment.";

const OFF_TOPIC_ANSWER: &str = "I can only answer questions about the portfolio. \
     Try asking about the projects, the technologies they use, or how many there are.";

pub struct ChatHandler<Q>
where
    Q: ChatQueryRunner,
{
    pub query_runner: Q,
    pub chain: ModelChain,
    pub dialect: SqlDialect,
}

impl<Q> ChatHandler<Q>
where
    Q: ChatQueryRunner,
{
    pub fn new(query_runner: Q, chain: ModelChain, dialect: SqlDialect) -> Self {
        ChatHandler { query_runner, chain, dialect }
    }

    /// Answers a natural-language question about the portfolio.
    ///
    /// Pipeline: classify intent, ask the model chain for a SELECT
    /// (cleaned and validated), fall back to the intent's canned SELECT
    /// when that fails, execute, then format an answer via the chain or
    /// the rule-based formatter. Only a bad request is an error; every
    /// downstream failure degrades to the apology string.
    pub async fn answer(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        request.validate()?;
        let question = request.message.trim();

        let intent = Intent::classify(question);
        let fallback_sql = intent.fallback_sql(self.dialect);

        let generated = match self.generate_sql(question).await {
            Ok(sql) => Some(sql),
            Err(AiError::OffTopic) => {
                info!(question, "Question classified as off-topic");
                return Ok(ChatResponse { answer: OFF_TOPIC_ANSWER.to_string() });
            }
            Err(e) => {
                warn!(error = %e, "SQL generation unavailable, using fallback query");
                None
            }
        };

        let rows = match &generated {
            Some(sql) => match self.query_runner.run_select(sql).await {
                Ok(rows) => rows,
                Err(e) => {
                    // Model SQL can reference columns that don't exist;
                    // retry once with the canned query.
                    warn!(error = %e, sql = %sql, "Generated SQL failed, retrying with fallback");
                    match self.query_runner.run_select(&fallback_sql).await {
                        Ok(rows) => rows,
                        Err(e) => {
                            warn!(error = %e, "Fallback query failed");
                            return Ok(ChatResponse { answer: APOLOGY.to_string() });
                        }
                    }
                }
            },
            None => match self.query_runner.run_select(&fallback_sql).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(error = %e, "Fallback query failed");
                    return Ok(ChatResponse { answer: APOLOGY.to_string() });
                }
            },
        };

        let answer = match self.format_answer(question, &rows).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Answer formatting unavailable, using rule-based answer");
                intent.fallback_answer(&rows)
            }
        };

        Ok(ChatResponse { answer })
    }

    async fn generate_sql(&self, question: &str) -> Result<String, AiError> {
        let prompt = build_sql_prompt(question, self.dialect);
        let raw = self.chain.complete(&prompt).await?;

        let sql = clean_response(&raw);
        validate_select(&sql)?;

        info!(sql = %sql, "Model generated SQL");
        Ok(sql)
    }

    async fn format_answer(
        &self,
        question: &str,
        rows: &[Map<String, Value>],
    ) -> Result<String, AiError> {
        let results = if rows.is_empty() {
            "No results found".to_string()
        } else {
            serde_json::to_string(&rows[..rows.len().min(MAX_PROMPT_ROWS)])
                .unwrap_or_else(|_| "No results found".to_string())
        };

        let prompt = build_answer_prompt(question, &results);
        let answer = self.chain.complete(&prompt).await?;

        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::ChatModel;
    use crate::repositories::chat_query::MockChatQueryRunner;
    use async_trait::async_trait;
    use serde_json::json;

    /// Replies with a fixed SQL string for generation prompts and a
    /// fixed sentence for formatting prompts.
    struct StubModel {
        sql: &'static str,
        answer: &'static str,
    }

    #[async_trait]
    impl ChatModel for StubModel {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn complete(&self, prompt: &str) -> Result<String, AiError> {
            if prompt.contains("SQL Query:") {
                Ok(self.sql.to_string())
            } else {
                Ok(self.answer.to_string())
            }
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            Err(AiError::Status(503, "unavailable".into()))
        }
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest { message: message.to_string() }
    }

    fn count_row(n: i64) -> Vec<Map<String, Value>> {
        let mut row = Map::new();
        row.insert("count".to_string(), json!(n));
        vec![row]
    }

    #[actix_rt::test]
    async fn model_sql_and_answer_flow_through() {
        let mut runner = MockChatQueryRunner::new();
        runner
            .expect_run_select()
            .withf(|sql| sql == "SELECT COUNT(*) FROM projects")
            .returning(|_| Ok(count_row(4)));

        let chain = ModelChain::new(vec![Box::new(StubModel {
            sql: "```sql\nSELECT COUNT(*) FROM projects;\n```",
            answer: "There are four projects.",
        })]);

        let handler = ChatHandler::new(runner, chain, SqlDialect::Sqlite);
        let response = handler.answer(request("How many projects?")).await.unwrap();

        assert_eq!(response.answer, "There are four projects.");
    }

    #[actix_rt::test]
    async fn off_topic_marker_returns_redirect() {
        let mut runner = MockChatQueryRunner::new();
        runner.expect_run_select().never();

        let chain = ModelChain::new(vec![Box::new(StubModel {
            sql: "INVALID",
            answer: "unused",
        })]);

        let handler = ChatHandler::new(runner, chain, SqlDialect::Sqlite);
        let response = handler.answer(request("What's the weather?")).await.unwrap();

        assert_eq!(response.answer, OFF_TOPIC_ANSWER);
    }

    #[actix_rt::test]
    async fn no_provider_uses_fallback_sql_and_rule_based_answer() {
        let mut runner = MockChatQueryRunner::new();
        runner
            .expect_run_select()
            .withf(|sql| sql.starts_with("SELECT COUNT(*)"))
            .returning(|_| Ok(count_row(2)));

        let handler =
            ChatHandler::new(runner, ModelChain::new(vec![]), SqlDialect::Sqlite);
        let response = handler.answer(request("How many projects?")).await.unwrap();

        assert_eq!(response.answer, "There are 2 projects in the portfolio.");
    }

    #[actix_rt::test]
    async fn failing_provider_degrades_to_rule_based_path() {
        let mut runner = MockChatQueryRunner::new();
        runner
            .expect_run_select()
            .withf(|sql| sql.starts_with("SELECT COUNT(*)"))
            .returning(|_| Ok(count_row(1)));

        let chain = ModelChain::new(vec![Box::new(FailingModel)]);
        let handler = ChatHandler::new(runner, chain, SqlDialect::Postgres);
        let response = handler.answer(request("how many projects?")).await.unwrap();

        assert_eq!(response.answer, "There is 1 project in the portfolio.");
    }

    #[actix_rt::test]
    async fn rejected_model_sql_falls_back() {
        let mut runner = MockChatQueryRunner::new();
        runner
            .expect_run_select()
            .withf(|sql| sql.starts_with("SELECT COUNT(*)"))
            .returning(|_| Ok(count_row(5)));

        // Model ignores the rules and emits a mutating statement.
        let chain = ModelChain::new(vec![Box::new(StubModel {
            sql: "DROP TABLE projects",
            answer: "unused",
        })]);

        let handler = ChatHandler::new(runner, chain, SqlDialect::Sqlite);
        let response = handler.answer(request("number of projects")).await.unwrap();

        // Formatting still goes through the stub model.
        assert_eq!(response.answer, "unused");
    }

    #[actix_rt::test]
    async fn execution_failure_retries_with_fallback_sql() {
        let mut runner = MockChatQueryRunner::new();
        runner
            .expect_run_select()
            .withf(|sql| sql == "SELECT nonexistent FROM projects")
            .returning(|_| Err(AppError::InternalError("no such column".into())));
        runner
            .expect_run_select()
            .withf(|sql| sql.starts_with("SELECT COUNT(*)"))
            .returning(|_| Ok(count_row(6)));

        let chain = ModelChain::new(vec![Box::new(StubModel {
            sql: "SELECT nonexistent FROM projects",
            answer: "Six projects.",
        })]);

        let handler = ChatHandler::new(runner, chain, SqlDialect::Sqlite);
        let response = handler.answer(request("how many projects?")).await.unwrap();

        assert_eq!(response.answer, "Six projects.");
    }

    #[actix_rt::test]
    async fn total_query_failure_yields_apology() {
        let mut runner = MockChatQueryRunner::new();
        runner
            .expect_run_select()
            .returning(|_| Err(AppError::InternalError("db gone".into())));

        let handler =
            ChatHandler::new(runner, ModelChain::new(vec![]), SqlDialect::Sqlite);
        let response = handler.answer(request("list the projects")).await.unwrap();

        assert_eq!(response.answer, APOLOGY);
    }

    #[actix_rt::test]
    async fn blank_message_is_a_bad_request() {
        let mut runner = MockChatQueryRunner::new();
        runner.expect_run_select().never();

        let handler =
            ChatHandler::new(runner, ModelChain::new(vec![]), SqlDialect::Sqlite);
        let err = handler.answer(request("   ")).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
