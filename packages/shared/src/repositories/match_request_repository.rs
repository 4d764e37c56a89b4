use crate::models::match_request::{MatchRequest, RequestStatus};
use crate::models::scheduled_match::ScheduledMatch;
use crate::repositories::errors::match_request_repository_errors::MatchRequestRepositoryError;
use crate::repositories::is_conditional_check_failure;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem, Update};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbMatchRequestRepository {
    pub client: Client,
    pub table_name: String,
    /// Matches table, written inside the accept transaction.
    pub matches_table_name: String,
}

impl DynamoDbMatchRequestRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("MATCH_REQUESTS_TABLE")
            .expect("MATCH_REQUESTS_TABLE environment variable must be set");
        let matches_table_name = std::env::var("MATCHES_TABLE")
            .expect("MATCHES_TABLE environment variable must be set");
        Self {
            client,
            table_name,
            matches_table_name,
        }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait MatchRequestRepository: Send + Sync {
    async fn create_request(
        &self,
        request: &MatchRequest,
    ) -> Result<(), MatchRequestRepositoryError>;

    async fn get_request(
        &self,
        request_id: &str,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError>;

    /// Requests addressed to the user, pending only.
    async fn query_incoming(
        &self,
        requestee_id: &str,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError>;

    /// Requests sent by the user, all statuses.
    async fn query_outgoing(
        &self,
        requester_id: &str,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError>;

    /// Compare-and-swap transition out of `pending`. Fails with
    /// `StatusConflict` if the request has already left the pending state.
    async fn transition_if_pending(
        &self,
        request_id: &str,
        next: RequestStatus,
    ) -> Result<(), MatchRequestRepositoryError>;

    /// Atomic accept: sets the request to `accepted` (conditional on it
    /// still being pending) and creates the derived match in the same
    /// transaction. Either both writes land or neither does, so a lost race
    /// can never yield two matches from one request.
    async fn accept_and_create_match(
        &self,
        request_id: &str,
        scheduled_match: &ScheduledMatch,
    ) -> Result<(), MatchRequestRepositoryError>;

    /// Requester-only cancel: deletes the request outright, conditional on
    /// it still being pending and on the caller being the requester.
    async fn delete_if_pending(
        &self,
        request_id: &str,
        requester_id: &str,
    ) -> Result<(), MatchRequestRepositoryError>;
}

#[async_trait]
impl MatchRequestRepository for DynamoDbMatchRequestRepository {
    async fn create_request(
        &self,
        request: &MatchRequest,
    ) -> Result<(), MatchRequestRepositoryError> {
        let item = to_item(request)
            .map_err(|e| MatchRequestRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| MatchRequestRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_request(
        &self,
        request_id: &str,
    ) -> Result<Option<MatchRequest>, MatchRequestRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(request_id)
                    .map_err(|e| MatchRequestRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| MatchRequestRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                let request = from_item(item)
                    .map_err(|e| MatchRequestRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(request))
            }
            None => Ok(None),
        }
    }

    async fn query_incoming(
        &self,
        requestee_id: &str,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_RequestsByRequestee")
            .key_condition_expression("requestee_id = :requestee_id")
            .filter_expression("#status = :pending")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(
                ":requestee_id",
                AttributeValue::S(requestee_id.to_string()),
            )
            .expression_attribute_values(
                ":pending",
                AttributeValue::S(RequestStatus::Pending.as_str().to_string()),
            )
            .send()
            .await
            .map_err(|e| MatchRequestRepositoryError::DynamoDb(e.to_string()))?;

        let mut requests = Vec::new();
        if let Some(items) = output.items {
            for item in items {
                let request: MatchRequest = from_item(item)
                    .map_err(|e| MatchRequestRepositoryError::Serialization(e.to_string()))?;
                requests.push(request);
            }
        }
        Ok(requests)
    }

    async fn query_outgoing(
        &self,
        requester_id: &str,
    ) -> Result<Vec<MatchRequest>, MatchRequestRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_RequestsByRequester")
            .key_condition_expression("requester_id = :requester_id")
            .expression_attribute_values(
                ":requester_id",
                AttributeValue::S(requester_id.to_string()),
            )
            .send()
            .await
            .map_err(|e| MatchRequestRepositoryError::DynamoDb(e.to_string()))?;

        let mut requests = Vec::new();
        if let Some(items) = output.items {
            for item in items {
                let request: MatchRequest = from_item(item)
                    .map_err(|e| MatchRequestRepositoryError::Serialization(e.to_string()))?;
                requests.push(request);
            }
        }
        Ok(requests)
    }

    async fn transition_if_pending(
        &self,
        request_id: &str,
        next: RequestStatus,
    ) -> Result<(), MatchRequestRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(request_id.to_string()))
            .update_expression("SET #status = :next")
            .condition_expression("attribute_exists(id) AND #status = :pending")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":next", AttributeValue::S(next.as_str().to_string()))
            .expression_attribute_values(
                ":pending",
                AttributeValue::S(RequestStatus::Pending.as_str().to_string()),
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failure(&e) => {
                Err(MatchRequestRepositoryError::StatusConflict)
            }
            Err(e) => Err(MatchRequestRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn accept_and_create_match(
        &self,
        request_id: &str,
        scheduled_match: &ScheduledMatch,
    ) -> Result<(), MatchRequestRepositoryError> {
        let match_item = to_item(scheduled_match)
            .map_err(|e| MatchRequestRepositoryError::Serialization(e.to_string()))?;

        let status_update = Update::builder()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(request_id.to_string()))
            .update_expression("SET #status = :accepted")
            .condition_expression("attribute_exists(id) AND #status = :pending")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(
                ":accepted",
                AttributeValue::S(RequestStatus::Accepted.as_str().to_string()),
            )
            .expression_attribute_values(
                ":pending",
                AttributeValue::S(RequestStatus::Pending.as_str().to_string()),
            )
            .build()
            .map_err(|e| MatchRequestRepositoryError::Transaction(e.to_string()))?;

        let match_put = Put::builder()
            .table_name(&self.matches_table_name)
            .set_item(Some(match_item))
            .build()
            .map_err(|e| MatchRequestRepositoryError::Transaction(e.to_string()))?;

        let result = self
            .client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().update(status_update).build())
            .transact_items(TransactWriteItem::builder().put(match_put).build())
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failure(&e) => {
                Err(MatchRequestRepositoryError::StatusConflict)
            }
            Err(e) => Err(MatchRequestRepositoryError::Transaction(e.to_string())),
        }
    }

    async fn delete_if_pending(
        &self,
        request_id: &str,
        requester_id: &str,
    ) -> Result<(), MatchRequestRepositoryError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(request_id.to_string()))
            .condition_expression(
                "attribute_exists(id) AND #status = :pending AND requester_id = :requester_id",
            )
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(
                ":pending",
                AttributeValue::S(RequestStatus::Pending.as_str().to_string()),
            )
            .expression_attribute_values(
                ":requester_id",
                AttributeValue::S(requester_id.to_string()),
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failure(&e) => {
                Err(MatchRequestRepositoryError::StatusConflict)
            }
            Err(e) => Err(MatchRequestRepositoryError::DynamoDb(e.to_string())),
        }
    }
}
