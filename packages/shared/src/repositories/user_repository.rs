use crate::models::user::UserAccount;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::is_conditional_check_failure;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait UserRepository: Send + Sync {
    async fn create_account(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;
    async fn get_account_by_id(&self, user_id: &str) -> Result<UserAccount, UserRepositoryError>;
    async fn get_account_by_email(&self, email: &str) -> Result<UserAccount, UserRepositoryError>;
    async fn update_account(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;
    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError>;
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_account(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let item =
            to_item(account).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        Ok(())
    }

    async fn get_account_by_id(&self, user_id: &str) -> Result<UserAccount, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(user_id)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))
            }
            None => Err(UserRepositoryError::NotFound),
        }
    }

    async fn get_account_by_email(&self, email: &str) -> Result<UserAccount, UserRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_UserByEmail")
            .key_condition_expression("email = :email")
            .expression_attribute_values(
                ":email",
                to_attribute_value(email)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .limit(1)
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        let item = output
            .items
            .and_then(|items| items.into_iter().next())
            .ok_or(UserRepositoryError::NotFound)?;
        from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))
    }

    async fn update_account(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let item =
            to_item(account).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conditional_check_failure(&e) => Err(UserRepositoryError::NotFound),
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        match self.get_account_by_email(email).await {
            Ok(_) => Ok(true),
            Err(UserRepositoryError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
