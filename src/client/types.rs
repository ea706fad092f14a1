//! Typed request and response records for the platform API.
//!
//! Responses are decoded into these records exactly once, at the client
//! boundary; the pipeline never sees raw JSON. Unknown fields are
//! ignored on decode, and fields the platform may omit carry
//! `#[serde(default)]`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A tenant-scoped identity under the top-level account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAccount {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub api_key: String,
    /// 1 = plus account, anything else = regular.
    #[serde(rename = "type", default)]
    pub account_type: Option<i32>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub created: Option<String>,
}

impl SubAccount {
    /// Human-readable account type.
    pub fn type_label(&self) -> &'static str {
        if self.account_type == Some(1) {
            "plus"
        } else {
            "regular"
        }
    }
}

/// Request to create a sub-account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubAccountRequest {
    pub name: String,
}

/// Request to register a webhook, with per-event delivery toggles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    pub url: String,
    pub enabled: bool,
    pub processed: bool,
    pub delivered: bool,
    pub dropped: bool,
    pub soft_bounced: bool,
    pub hard_bounced: bool,
    pub opened: bool,
    pub clicked: bool,
    pub unsubscribed: bool,
    pub spam: bool,
}

impl CreateWebhookRequest {
    /// A webhook subscribed to every event type.
    pub fn all_events(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            enabled: true,
            processed: true,
            delivered: true,
            dropped: true,
            soft_bounced: true,
            hard_bounced: true,
            opened: true,
            clicked: true,
            unsubscribed: true,
            spam: true,
        }
    }
}

/// A registered webhook.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Request to add a sending domain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainRequest {
    pub name: String,
}

/// One DNS record the domain owner must publish.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(default)]
    pub host: Option<String>,
    pub text_value: String,
}

/// A sending domain with its verification state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub dkim: Option<DnsRecord>,
    #[serde(default)]
    pub spf: Option<DnsRecord>,
}

/// A sender or recipient address with an optional display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// A recipient with optional per-recipient substitution fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_fields: HashMap<String, String>,
}

impl Recipient {
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
            custom_fields: HashMap::new(),
        }
    }
}

/// An outbound email submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub from: EmailAddress,
    pub to: Vec<Recipient>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub track_opens: bool,
    pub track_clicks: bool,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

/// Per-recipient submission acknowledgement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    pub message_id: String,
    #[serde(default)]
    pub to: Option<String>,
}

/// Full detail of a submitted message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    pub message_id: String,
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub sub_account_id: Option<i64>,
    #[serde(default)]
    pub from: Option<EmailAddress>,
    #[serde(default)]
    pub to: Option<Recipient>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub email_type: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub ip_pool: Option<String>,
    /// Delivery attempts so far.
    #[serde(default)]
    pub attempt: Option<i32>,
}

/// Event counters for one day or one aggregate window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCounters {
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub dropped: u64,
    #[serde(default)]
    pub hard_bounced: u64,
    #[serde(default)]
    pub soft_bounced: u64,
    #[serde(default)]
    pub opened: u64,
    #[serde(default)]
    pub clicked: u64,
    #[serde(default)]
    pub unsubscribed: u64,
    #[serde(default)]
    pub spam: u64,
}

/// One day of statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: String,
    #[serde(default)]
    pub stat: StatCounters,
}

/// A dedicated sending IP allocated to the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedicatedIp {
    pub id: i64,
    pub public_ip: String,
    #[serde(default)]
    pub reverse_dns_hostname: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// An IP referenced from a pool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolIp {
    pub public_ip: String,
}

/// Round-robin routing across the pool's IPs.
pub const ROUTING_ROUND_ROBIN: i32 = 0;

/// Request to create a named IP pool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIpPoolRequest {
    pub name: String,
    pub routing_strategy: i32,
    pub ips: Vec<PoolIp>,
}

/// A named group of dedicated sending IPs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpPool {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub routing_strategy: i32,
    #[serde(default)]
    pub ips: Vec<PoolIp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_request_serializes_event_toggles() {
        let request = CreateWebhookRequest::all_events("https://hooks.example/esp");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["url"], "https://hooks.example/esp");
        assert_eq!(json["enabled"], true);
        for event in [
            "processed",
            "delivered",
            "dropped",
            "softBounced",
            "hardBounced",
            "opened",
            "clicked",
            "unsubscribed",
            "spam",
        ] {
            assert_eq!(json[event], true, "event toggle {} missing", event);
        }
    }

    #[test]
    fn email_message_serializes_camel_case() {
        let mut headers = HashMap::new();
        headers.insert("X-Email-Type".to_string(), "transactional".to_string());

        let mut recipient = Recipient::named("customer@example.com", "Customer");
        recipient
            .custom_fields
            .insert("order_value".to_string(), "99.99".to_string());

        let message = EmailMessage {
            from: EmailAddress::named("sender@demo.test", "Demo Co"),
            to: vec![recipient],
            subject: "Order Confirmation".to_string(),
            html_body: "<h1>Thanks</h1>".to_string(),
            text_body: "Thanks".to_string(),
            track_opens: true,
            track_clicks: true,
            headers,
            groups: Vec::new(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["htmlBody"], "<h1>Thanks</h1>");
        assert_eq!(json["trackOpens"], true);
        assert_eq!(json["to"][0]["customFields"]["order_value"], "99.99");
        assert_eq!(json["headers"]["X-Email-Type"], "transactional");
        // Empty groups are omitted entirely
        assert!(json.get("groups").is_none());
    }

    #[test]
    fn email_message_includes_groups_when_present() {
        let message = EmailMessage {
            from: EmailAddress::named("sender@demo.test", "Marketing"),
            to: vec![Recipient::named("c@example.com", "C")],
            subject: "Offer".to_string(),
            html_body: String::new(),
            text_body: String::new(),
            track_opens: true,
            track_clicks: true,
            headers: HashMap::new(),
            groups: vec!["marketing".to_string(), "promotional".to_string()],
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["groups"][1], "promotional");
    }

    #[test]
    fn domain_decodes_with_dns_records() {
        let domain: Domain = serde_json::from_str(
            r#"{
                "id": 17,
                "name": "demo.test",
                "verified": false,
                "dkim": {"host": "mailer._domainkey.demo.test", "textValue": "k=rsa; p=MIGf"},
                "spf": {"textValue": "v=spf1 include:spf.example ~all"}
            }"#,
        )
        .unwrap();
        assert_eq!(domain.id, 17);
        assert!(!domain.verified);
        assert_eq!(domain.dkim.unwrap().text_value, "k=rsa; p=MIGf");
        assert!(domain.spf.unwrap().host.is_none());
    }

    #[test]
    fn sub_account_decodes_with_reserved_type_field() {
        let sub: SubAccount = serde_json::from_str(
            r#"{"id": 5, "name": "Client A", "apiKey": "sk-xyz", "type": 1, "blocked": false}"#,
        )
        .unwrap();
        assert_eq!(sub.id, 5);
        assert_eq!(sub.api_key, "sk-xyz");
        assert_eq!(sub.type_label(), "plus");
    }

    #[test]
    fn sub_account_tolerates_missing_optional_fields() {
        let sub: SubAccount = serde_json::from_str(r#"{"id": 9, "name": "Bare"}"#).unwrap();
        assert_eq!(sub.type_label(), "regular");
        assert!(!sub.blocked);
        assert!(sub.created.is_none());
    }

    #[test]
    fn daily_stat_defaults_missing_counters_to_zero() {
        let stat: DailyStat = serde_json::from_str(
            r#"{"date": "2026-08-20", "stat": {"processed": 12, "delivered": 11}}"#,
        )
        .unwrap();
        assert_eq!(stat.stat.processed, 12);
        assert_eq!(stat.stat.delivered, 11);
        assert_eq!(stat.stat.spam, 0);
    }

    #[test]
    fn ip_pool_request_serializes_routing_strategy() {
        let request = CreateIpPoolRequest {
            name: "Marketing Pool".to_string(),
            routing_strategy: ROUTING_ROUND_ROBIN,
            ips: vec![PoolIp {
                public_ip: "192.0.2.10".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["routingStrategy"], 0);
        assert_eq!(json["ips"][0]["publicIp"], "192.0.2.10");
    }
}
