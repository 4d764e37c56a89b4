use crate::models::profile::{PlayerProfile, ProfileUpdate};
use crate::repositories::errors::profile_repository_errors::ProfileRepositoryError;
use crate::repositories::is_conditional_check_failure;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbProfileRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbProfileRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("PLAYER_PROFILES_TABLE")
            .expect("PLAYER_PROFILES_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait ProfileRepository: Send + Sync {
    /// Full-document put. Overwrites any existing profile for the same
    /// user id; idempotency is deliberately not enforced.
    async fn put_profile(&self, profile: &PlayerProfile) -> Result<(), ProfileRepositoryError>;

    async fn get_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<PlayerProfile>, ProfileRepositoryError>;

    /// Merge-update: only the set fields of `update` are written, and
    /// `updated_at` is stamped.
    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileRepositoryError>;

    /// Full collection scan; the directory filters client-side.
    async fn scan_profiles(&self) -> Result<Vec<PlayerProfile>, ProfileRepositoryError>;
}

#[async_trait]
impl ProfileRepository for DynamoDbProfileRepository {
    async fn put_profile(&self, profile: &PlayerProfile) -> Result<(), ProfileRepositoryError> {
        let item =
            to_item(profile).map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ProfileRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<PlayerProfile>, ProfileRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "user_id",
                to_attribute_value(user_id)
                    .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ProfileRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                let profile = from_item(item)
                    .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileRepositoryError> {
        let mut set_clauses = vec!["updated_at = :updated_at".to_string()];
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(
                "user_id",
                to_attribute_value(user_id)
                    .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?,
            )
            .condition_expression("attribute_exists(user_id)")
            .expression_attribute_values(
                ":updated_at",
                to_attribute_value(updated_at)
                    .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?,
            );

        if let Some(name) = &update.name {
            set_clauses.push("#name = :name".to_string());
            request = request
                .expression_attribute_names("#name", "name")
                .expression_attribute_values(
                    ":name",
                    to_attribute_value(name)
                        .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?,
                );
        }
        if let Some(skill_level) = &update.skill_level {
            set_clauses.push("skill_level = :skill_level".to_string());
            request = request.expression_attribute_values(
                ":skill_level",
                to_attribute_value(skill_level)
                    .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?,
            );
        }
        if let Some(availability) = &update.availability {
            set_clauses.push("availability = :availability".to_string());
            request = request.expression_attribute_values(
                ":availability",
                to_attribute_value(availability)
                    .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?,
            );
        }
        if let Some(is_active) = update.is_active {
            set_clauses.push("is_active = :is_active".to_string());
            request =
                request.expression_attribute_values(":is_active", AttributeValue::Bool(is_active));
        }

        let result = request
            .update_expression(format!("SET {}", set_clauses.join(", ")))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failure(&e) => Err(ProfileRepositoryError::NotFound),
            Err(e) => Err(ProfileRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn scan_profiles(&self) -> Result<Vec<PlayerProfile>, ProfileRepositoryError> {
        let mut profiles = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(last_evaluated_key)
                .send()
                .await
                .map_err(|e| ProfileRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = output.items {
                for item in items {
                    let profile: PlayerProfile = from_item(item)
                        .map_err(|e| ProfileRepositoryError::Serialization(e.to_string()))?;
                    profiles.push(profile);
                }
            }

            last_evaluated_key = output.last_evaluated_key;
            if last_evaluated_key.is_none() {
                break;
            }
        }

        Ok(profiles)
    }
}
