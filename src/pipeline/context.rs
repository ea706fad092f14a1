//! In-memory workflow context.
//!
//! The context threads identifiers produced by earlier steps into later
//! ones. It is owned exclusively by the orchestrator, created empty at
//! run start and discarded at run end; nothing about it survives the
//! process.

/// Fallback identifier used by the stats step when no sub-account was
/// created or adopted during the run.
pub const DEFAULT_SUB_ACCOUNT_ID: i64 = 0;

/// Identifiers produced by completed steps.
///
/// Every field starts `None` and is written at most once, by the step
/// that produces it. Later steps read fields only through the
/// orchestrator, after the producing step has finished.
#[derive(Debug, Default)]
pub struct WorkflowContext {
    /// Created or adopted sub-account.
    pub sub_account_id: Option<i64>,
    /// API key of the created/adopted sub-account, kept for display.
    pub sub_account_api_key: Option<String>,
    /// Registered webhook.
    pub webhook_id: Option<i64>,
    /// Added sending domain.
    pub domain_id: Option<i64>,
    /// First message accepted by the email endpoint.
    pub message_id: Option<String>,
    /// Created IP pool.
    pub ip_pool_id: Option<i64>,
}

/// Names of context fields a step can declare as inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    SubAccountId,
    WebhookId,
    DomainId,
    MessageId,
    IpPoolId,
}

impl ContextField {
    /// Human-readable name for skip reasons and logs.
    pub fn describe(self) -> &'static str {
        match self {
            Self::SubAccountId => "sub-account id",
            Self::WebhookId => "webhook id",
            Self::DomainId => "domain id",
            Self::MessageId => "message id",
            Self::IpPoolId => "IP pool id",
        }
    }
}

impl WorkflowContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given field has been produced.
    pub fn has(&self, field: ContextField) -> bool {
        match field {
            ContextField::SubAccountId => self.sub_account_id.is_some(),
            ContextField::WebhookId => self.webhook_id.is_some(),
            ContextField::DomainId => self.domain_id.is_some(),
            ContextField::MessageId => self.message_id.is_some(),
            ContextField::IpPoolId => self.ip_pool_id.is_some(),
        }
    }

    /// The sub-account id, or the documented fallback when the creating
    /// step did not succeed.
    pub fn sub_account_or_default(&self) -> i64 {
        self.sub_account_id.unwrap_or(DEFAULT_SUB_ACCOUNT_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_no_fields() {
        let ctx = WorkflowContext::new();
        for field in [
            ContextField::SubAccountId,
            ContextField::WebhookId,
            ContextField::DomainId,
            ContextField::MessageId,
            ContextField::IpPoolId,
        ] {
            assert!(!ctx.has(field), "{:?} should start absent", field);
        }
    }

    #[test]
    fn has_reflects_produced_fields() {
        let mut ctx = WorkflowContext::new();
        ctx.message_id = Some("msg-123".to_string());
        ctx.sub_account_id = Some(42);

        assert!(ctx.has(ContextField::MessageId));
        assert!(ctx.has(ContextField::SubAccountId));
        assert!(!ctx.has(ContextField::DomainId));
    }

    #[test]
    fn sub_account_falls_back_to_default() {
        let mut ctx = WorkflowContext::new();
        assert_eq!(ctx.sub_account_or_default(), DEFAULT_SUB_ACCOUNT_ID);

        ctx.sub_account_id = Some(42);
        assert_eq!(ctx.sub_account_or_default(), 42);
    }
}
