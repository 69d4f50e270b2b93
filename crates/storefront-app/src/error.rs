use storefront_client::ClientError;
use thiserror::Error;

/// Why a checkout did not produce an order.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Name or email was blank. No request was sent.
    #[error("Please fill in all fields")]
    MissingFields,

    /// The cart had no lines. No request was sent.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The server answered with a non-success status.
    #[error("Error placing order: {}", .message.as_deref().unwrap_or("Unknown"))]
    Rejected { message: Option<String> },

    /// The request never completed, or the reply was unreadable.
    #[error("Failed to place order")]
    Transport(#[source] ClientError),
}

impl From<ClientError> for CheckoutError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { message, .. } => CheckoutError::Rejected { message },
            other => CheckoutError::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_without_message_says_unknown() {
        let err = CheckoutError::Rejected { message: None };
        assert_eq!(err.to_string(), "Error placing order: Unknown");
    }

    #[test]
    fn rejected_with_message_shows_it() {
        let err = CheckoutError::from(ClientError::Rejected {
            status: 400,
            url: "http://localhost/api/orders/checkout".to_string(),
            message: Some("Invalid email".to_string()),
        });
        assert_eq!(err.to_string(), "Error placing order: Invalid email");
    }

    #[test]
    fn deserialize_failure_is_transport() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CheckoutError::from(ClientError::Deserialize {
            context: "checkout".to_string(),
            source,
        });
        assert!(matches!(err, CheckoutError::Transport(_)));
        assert_eq!(err.to_string(), "Failed to place order");
    }
}
