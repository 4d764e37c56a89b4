use crate::models::scheduled_match::{MatchResult, ScheduledMatch};
use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use crate::repositories::is_conditional_check_failure;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbMatchRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbMatchRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("MATCHES_TABLE").expect("MATCHES_TABLE environment variable must be set");
        Self { client, table_name }
    }

    async fn query_by_player_index(
        &self,
        index_name: &str,
        key_attribute: &str,
        user_id: &str,
    ) -> Result<Vec<ScheduledMatch>, MatchRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index_name)
            .key_condition_expression(format!("{} = :user_id", key_attribute))
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;

        let mut matches = Vec::new();
        if let Some(items) = output.items {
            for item in items {
                let scheduled: ScheduledMatch = from_item(item)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
                matches.push(scheduled);
            }
        }
        Ok(matches)
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait MatchRepository: Send + Sync {
    async fn get_match(
        &self,
        match_id: &str,
    ) -> Result<Option<ScheduledMatch>, MatchRepositoryError>;

    /// Matches where the user appears as either player, unsorted.
    async fn query_for_player(
        &self,
        user_id: &str,
    ) -> Result<Vec<ScheduledMatch>, MatchRepositoryError>;

    async fn set_result(
        &self,
        match_id: &str,
        result: &MatchResult,
    ) -> Result<(), MatchRepositoryError>;
}

#[async_trait]
impl MatchRepository for DynamoDbMatchRepository {
    async fn get_match(
        &self,
        match_id: &str,
    ) -> Result<Option<ScheduledMatch>, MatchRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(match_id)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                let scheduled = from_item(item)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(scheduled))
            }
            None => Ok(None),
        }
    }

    async fn query_for_player(
        &self,
        user_id: &str,
    ) -> Result<Vec<ScheduledMatch>, MatchRepositoryError> {
        let mut matches = self
            .query_by_player_index("GSI_MatchesByPlayer1", "player1_id", user_id)
            .await?;
        let as_player2 = self
            .query_by_player_index("GSI_MatchesByPlayer2", "player2_id", user_id)
            .await?;
        matches.extend(as_player2);
        Ok(matches)
    }

    async fn set_result(
        &self,
        match_id: &str,
        result: &MatchResult,
    ) -> Result<(), MatchRepositoryError> {
        let update_result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(match_id.to_string()))
            .update_expression("SET #result = :result")
            .condition_expression("attribute_exists(id)")
            .expression_attribute_names("#result", "result")
            .expression_attribute_values(
                ":result",
                to_attribute_value(result)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await;

        match update_result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failure(&e) => Err(MatchRepositoryError::NotFound),
            Err(e) => Err(MatchRepositoryError::DynamoDb(e.to_string())),
        }
    }
}
