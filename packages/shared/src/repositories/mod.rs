pub mod errors;
pub mod match_repository;
pub mod match_request_repository;
pub mod profile_repository;
pub mod user_repository;

/// Detects a failed conditional write. Matches on the Debug rendering
/// because `SdkError`'s Display is terse and can omit the exception name;
/// covers both plain ConditionalCheckFailedException and transaction
/// cancellations caused by a failed condition.
pub(crate) fn is_conditional_check_failure(error: &impl std::fmt::Debug) -> bool {
    format!("{:?}", error).contains("ConditionalCheckFailed")
}
