//! ah-core
//!
//! The central domain model and interface definitions for AgriHub.

pub mod clock;
pub mod error;
pub mod models;
pub mod traits;
pub mod validate;
pub mod weather;

// Re-exporting for easier access in other crates
pub use clock::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validate::Validate;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_chat_message_creation_v7() {
        let id = Uuid::now_v7();
        let message = ChatMessage {
            id,
            farmer_id: Uuid::now_v7(),
            role: ChatRole::User,
            content: "When should I plant maize?".to_string(),
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(message.id, id);
        assert_eq!(message.role, ChatRole::User);
    }

    #[tokio::test]
    async fn mock_repo_reports_missing_farmer() {
        let mut repo = MockFarmRepo::new();
        repo.expect_get_farmer_by_email().returning(|_| Ok(None));
        assert!(repo.get_farmer_by_email("nobody@example.com").await.unwrap().is_none());
    }
}
