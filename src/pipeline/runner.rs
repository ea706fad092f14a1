//! Workflow orchestration and step execution.
//!
//! [`Pipeline`] drives the fixed step table from [`super::step`] in
//! order, threading produced identifiers through the
//! [`WorkflowContext`]. The step executor isolates each step: an API
//! error is caught at this boundary and downgraded to
//! [`StepOutcome::Failed`] data, so no step can abort the run. A step is
//! skipped only when a hard input is missing and its policy says so.

use std::time::Instant;

use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::client::types::{
    CreateDomainRequest, CreateIpPoolRequest, CreateSubAccountRequest, CreateWebhookRequest,
    EmailAddress, EmailMessage, PoolIp, Recipient, ROUTING_ROUND_ROBIN,
};
use crate::client::{ApiClient, ApiError};
use crate::config::RunConfig;
use crate::pipeline::context::WorkflowContext;
use crate::pipeline::step::{
    MissingPolicy, RunSummary, StepId, StepOutcome, StepRecord, StepSpec, PIPELINE,
};
use crate::report::Reporter;

/// Orchestrates one run of the demonstration pipeline.
pub struct Pipeline<'a> {
    client: &'a ApiClient,
    config: &'a RunConfig,
    context: WorkflowContext,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with an empty context.
    pub fn new(client: &'a ApiClient, config: &'a RunConfig) -> Self {
        Self {
            client,
            config,
            context: WorkflowContext::new(),
        }
    }

    /// The current context (inspectable after a run).
    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    /// Run every pipeline step in order, streaming records to the
    /// reporter, and return the final counts.
    ///
    /// No step is fatal: the loop always proceeds to the next step
    /// regardless of the previous outcome.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> RunSummary {
        let start = Instant::now();
        let total = PIPELINE.len();
        reporter.run_started(total);

        let mut succeeded = 0;
        let mut failed = 0;
        let mut skipped = 0;

        for (position, spec) in PIPELINE.iter().enumerate() {
            let index = position + 1;
            reporter.step_started(index, total, spec.name);

            let record = self.run_step(index, spec);
            match &record.outcome {
                StepOutcome::Success { .. } => succeeded += 1,
                StepOutcome::Failed { .. } => failed += 1,
                StepOutcome::Skipped { .. } => skipped += 1,
            }
            reporter.step_finished(&record);
        }

        let summary = RunSummary {
            succeeded,
            failed,
            skipped,
            duration: start.elapsed(),
        };
        reporter.run_finished(&summary);
        summary
    }

    /// Execute exactly one step, never letting an error escape.
    fn run_step(&mut self, index: usize, spec: &StepSpec) -> StepRecord {
        let started = Instant::now();

        let outcome = match self.missing_input(spec) {
            Some(reason) => {
                info!(step = spec.name, %reason, "step skipped");
                StepOutcome::Skipped { reason }
            }
            None => match self.execute(spec.id) {
                Ok(outcome) => {
                    debug!(step = spec.name, outcome = outcome.label(), "step finished");
                    outcome
                }
                Err(error) => {
                    warn!(
                        step = spec.name,
                        kind = %error.kind(),
                        status = ?error.status(),
                        "step failed: {}",
                        error
                    );
                    StepOutcome::from_api_error(&error)
                }
            },
        };

        StepRecord {
            name: spec.name,
            index,
            outcome,
            duration: started.elapsed(),
        }
    }

    /// For `Skip`-policy steps, the reason the step cannot run, if any.
    /// `UseDefault` and `Attempt` steps always run.
    fn missing_input(&self, spec: &StepSpec) -> Option<String> {
        if spec.on_missing != MissingPolicy::Skip {
            return None;
        }
        spec.requires
            .iter()
            .find(|field| !self.context.has(**field))
            .map(|field| format!("{} not available", field.describe()))
    }

    fn execute(&mut self, id: StepId) -> Result<StepOutcome, ApiError> {
        match id {
            StepId::ListSubAccounts => self.list_sub_accounts(),
            StepId::CreateSubAccount => self.create_sub_account(),
            StepId::CreateWebhook => self.create_webhook(),
            StepId::AddDomain => self.add_domain(),
            StepId::ListDomains => self.list_domains(),
            StepId::SendTransactional => self.send_transactional(),
            StepId::SendMarketing => self.send_marketing(),
            StepId::MessageDetail => self.message_detail(),
            StepId::SubAccountStats => self.sub_account_stats(),
            StepId::AggregateStats => self.aggregate_stats(),
            StepId::AccountStats => self.account_stats(),
            StepId::ListIps => self.list_ips(),
            StepId::CreateIpPool => self.create_ip_pool(),
        }
    }

    fn list_sub_accounts(&mut self) -> Result<StepOutcome, ApiError> {
        let subs = self.client.list_sub_accounts()?;
        let mut detail = vec![format!("retrieved {} sub-account(s)", subs.len())];
        for sub in subs.iter().take(5) {
            detail.push(format!(
                "#{} {} ({}{})",
                sub.id,
                sub.name,
                sub.type_label(),
                if sub.blocked { ", blocked" } else { "" }
            ));
        }

        // Adopt the first listed sub-account so later steps have an id
        // even when creation fails.
        if self.context.sub_account_id.is_none() {
            if let Some(first) = subs.first() {
                self.context.sub_account_id = Some(first.id);
                self.context.sub_account_api_key = Some(first.api_key.clone());
                detail.push(format!("adopted sub-account #{} for later steps", first.id));
            }
        }

        Ok(StepOutcome::Success { detail })
    }

    fn create_sub_account(&mut self) -> Result<StepOutcome, ApiError> {
        let request = CreateSubAccountRequest {
            name: format!("Demo Client - {}", Utc::now().timestamp()),
        };
        let sub = self.client.create_sub_account(&request)?;

        self.context.sub_account_id = Some(sub.id);
        self.context.sub_account_api_key = Some(sub.api_key.clone());

        Ok(StepOutcome::Success {
            detail: vec![
                format!("created sub-account #{} {}", sub.id, sub.name),
                format!("type: {}", sub.type_label()),
                format!("api key: {}", sub.api_key),
            ],
        })
    }

    fn create_webhook(&mut self) -> Result<StepOutcome, ApiError> {
        let request = CreateWebhookRequest::all_events(self.config.webhook_url.clone());
        let webhook = self.client.create_webhook(&request)?;
        self.context.webhook_id = Some(webhook.id);

        Ok(StepOutcome::Success {
            detail: vec![
                format!("webhook #{} registered for {}", webhook.id, webhook.url),
                format!("enabled: {}", if webhook.enabled { "yes" } else { "no" }),
                "subscribed to all event types".to_string(),
            ],
        })
    }

    fn add_domain(&mut self) -> Result<StepOutcome, ApiError> {
        let request = CreateDomainRequest {
            name: self.config.domain.clone(),
        };
        let domain = self.client.add_domain(&request)?;
        self.context.domain_id = Some(domain.id);

        let mut detail = vec![format!(
            "domain #{} {} ({})",
            domain.id,
            domain.name,
            if domain.verified {
                "verified"
            } else {
                "unverified"
            }
        )];
        if let Some(dkim) = &domain.dkim {
            detail.push(format!("DKIM record: {}", dkim.text_value));
        }
        if let Some(spf) = &domain.spf {
            detail.push(format!("SPF record: {}", spf.text_value));
        }
        if !domain.verified {
            detail.push(
                "publish the DNS records above before the domain can verify".to_string(),
            );
        }

        Ok(StepOutcome::Success { detail })
    }

    fn list_domains(&mut self) -> Result<StepOutcome, ApiError> {
        let domains = self.client.list_domains()?;
        let mut detail = vec![format!("retrieved {} domain(s)", domains.len())];
        for domain in &domains {
            detail.push(format!(
                "#{} {} ({})",
                domain.id,
                domain.name,
                if domain.verified {
                    "verified"
                } else {
                    "unverified"
                }
            ));
        }
        Ok(StepOutcome::Success { detail })
    }

    fn send_transactional(&mut self) -> Result<StepOutcome, ApiError> {
        let mut recipient = Recipient::named(self.config.to_email.clone(), "Customer");
        recipient
            .custom_fields
            .insert("customer_id".to_string(), "67890".to_string());
        recipient
            .custom_fields
            .insert("order_value".to_string(), "99.99".to_string());

        let message = EmailMessage {
            from: EmailAddress::named(self.config.from_email.clone(), "Demo Company"),
            to: vec![recipient],
            subject: "Order Confirmation - Transactional Email".to_string(),
            html_body: "<h1>Thank you for your order!</h1>\
                        <p>Your order has been confirmed and will be processed shortly.</p>"
                .to_string(),
            text_body: "Thank you for your order! Your order has been confirmed \
                        and will be processed shortly."
                .to_string(),
            track_opens: true,
            track_clicks: true,
            headers: [
                ("X-Order-ID".to_string(), "12345".to_string()),
                ("X-Email-Type".to_string(), "transactional".to_string()),
            ]
            .into(),
            groups: Vec::new(),
        };

        let responses = self.client.send_email(&message)?;
        let mut detail = Vec::new();
        match responses.first() {
            Some(first) => {
                self.context.message_id = Some(first.message_id.clone());
                detail.push(format!("message id: {}", first.message_id));
                if let Some(to) = &first.to {
                    detail.push(format!("accepted for {}", to));
                }
            }
            None => detail.push("platform returned no acknowledgement".to_string()),
        }
        Ok(StepOutcome::Success { detail })
    }

    fn send_marketing(&mut self) -> Result<StepOutcome, ApiError> {
        let message = EmailMessage {
            from: EmailAddress::named(self.config.from_email.clone(), "Marketing Team"),
            to: vec![Recipient::named(self.config.to_email.clone(), "Customer 1")],
            subject: "Special Offer - 20% Off Everything!".to_string(),
            html_body: "<html><body><h1>Special Offer!</h1>\
                        <p>Get 20% off on all products. Use code: <strong>SAVE20</strong></p>\
                        <p><a href=\"https://example.com/shop\">Shop Now</a></p></body></html>"
                .to_string(),
            text_body: "Special Offer! Get 20% off on all products. Use code: SAVE20. \
                        Visit: https://example.com/shop"
                .to_string(),
            track_opens: true,
            track_clicks: true,
            headers: [
                ("X-Email-Type".to_string(), "marketing".to_string()),
                ("X-Campaign-ID".to_string(), "campaign-001".to_string()),
            ]
            .into(),
            groups: vec!["marketing".to_string(), "promotional".to_string()],
        };

        let responses = self.client.send_email(&message)?;
        let mut detail = Vec::new();
        if let Some(first) = responses.first() {
            // The transactional send is the primary message id source;
            // only fill the gap if it failed.
            if self.context.message_id.is_none() {
                self.context.message_id = Some(first.message_id.clone());
            }
            detail.push(format!("message id: {}", first.message_id));
        }
        detail.push("groups: marketing, promotional".to_string());
        Ok(StepOutcome::Success { detail })
    }

    fn message_detail(&mut self) -> Result<StepOutcome, ApiError> {
        let Some(message_id) = self.context.message_id.clone() else {
            return Ok(StepOutcome::Skipped {
                reason: "message id not available".to_string(),
            });
        };
        let message = self.client.get_message(&message_id)?;

        let mut detail = vec![format!("message id: {}", message.message_id)];
        if let Some(sub_id) = message.sub_account_id {
            detail.push(format!("sub-account: #{}", sub_id));
        }
        if let Some(subject) = &message.subject {
            detail.push(format!("subject: {}", subject));
        }
        if let Some(email_type) = &message.email_type {
            detail.push(format!("type: {}", email_type));
        }
        if let Some(submitted_at) = &message.submitted_at {
            detail.push(format!("submitted at: {}", submitted_at));
        }
        if let Some(public_ip) = &message.public_ip {
            detail.push(format!("sent from {}", public_ip));
        }
        if let Some(attempt) = message.attempt {
            detail.push(format!("delivery attempts: {}", attempt));
        }
        Ok(StepOutcome::Success { detail })
    }

    fn sub_account_stats(&mut self) -> Result<StepOutcome, ApiError> {
        let sub_account_id = self.context.sub_account_or_default();
        let (from, to) = self.stats_window();
        let stats = self.client.sub_account_stats(sub_account_id, from, to)?;

        let mut detail = vec![format!(
            "{} day record(s) for sub-account #{} ({} to {})",
            stats.len(),
            sub_account_id,
            from,
            to
        )];
        let mut processed = 0;
        let mut delivered = 0;
        for day in &stats {
            processed += day.stat.processed;
            delivered += day.stat.delivered;
        }
        detail.push(format!(
            "window totals: {} processed, {} delivered",
            processed, delivered
        ));
        Ok(StepOutcome::Success { detail })
    }

    fn aggregate_stats(&mut self) -> Result<StepOutcome, ApiError> {
        let sub_account_id = self.context.sub_account_or_default();
        let (from, to) = self.stats_window();
        let stat = self.client.aggregate_stats(sub_account_id, from, to)?;

        Ok(StepOutcome::Success {
            detail: vec![
                format!("processed: {}, delivered: {}", stat.processed, stat.delivered),
                format!(
                    "bounced: {} hard / {} soft, dropped: {}",
                    stat.hard_bounced, stat.soft_bounced, stat.dropped
                ),
                format!("unsubscribed: {}, spam: {}", stat.unsubscribed, stat.spam),
            ],
        })
    }

    fn account_stats(&mut self) -> Result<StepOutcome, ApiError> {
        let (from, to) = self.stats_window();
        let stats = self.client.account_stats(from, to)?;

        let mut detail = vec![format!(
            "{} day record(s) account-wide ({} to {})",
            stats.len(),
            from,
            to
        )];
        for day in &stats {
            detail.push(format!(
                "{}: {} processed, {} delivered, {} opened, {} clicked",
                day.date, day.stat.processed, day.stat.delivered, day.stat.opened, day.stat.clicked
            ));
        }
        Ok(StepOutcome::Success { detail })
    }

    fn list_ips(&mut self) -> Result<StepOutcome, ApiError> {
        let ips = self.client.list_ips()?;
        let mut detail = vec![format!("retrieved {} dedicated IP(s)", ips.len())];
        for ip in &ips {
            match &ip.reverse_dns_hostname {
                Some(rdns) => detail.push(format!("#{} {} ({})", ip.id, ip.public_ip, rdns)),
                None => detail.push(format!("#{} {}", ip.id, ip.public_ip)),
            }
        }
        if ips.is_empty() {
            detail.push("no dedicated IPs allocated to this account".to_string());
        }
        Ok(StepOutcome::Success { detail })
    }

    fn create_ip_pool(&mut self) -> Result<StepOutcome, ApiError> {
        // IP availability is runtime data: re-check here rather than
        // threading the whole list through the context.
        let ips = self.client.list_ips()?;
        let Some(first) = ips.first() else {
            return Ok(StepOutcome::Skipped {
                reason: "no dedicated IPs available to pool".to_string(),
            });
        };

        let request = CreateIpPoolRequest {
            name: format!("Marketing Pool - {}", Utc::now().timestamp()),
            routing_strategy: ROUTING_ROUND_ROBIN,
            ips: vec![PoolIp {
                public_ip: first.public_ip.clone(),
            }],
        };
        let pool = self.client.create_ip_pool(&request)?;
        self.context.ip_pool_id = Some(pool.id);

        Ok(StepOutcome::Success {
            detail: vec![
                format!("IP pool #{} {}", pool.id, pool.name),
                "routing strategy: round robin".to_string(),
                format!("{} IP(s) in pool", pool.ips.len()),
            ],
        })
    }

    fn stats_window(&self) -> (NaiveDate, NaiveDate) {
        let to = Utc::now().date_naive();
        let from = to
            .checked_sub_days(Days::new(self.config.stats_window_days.max(0) as u64))
            .unwrap_or(to);
        (from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::report::CaptureReporter;
    use httpmock::MockServer;
    use std::time::Duration;

    fn test_config(base_url: String) -> RunConfig {
        RunConfig {
            base_url,
            from_email: "sender@demo.test".to_string(),
            to_email: "recipient@example.com".to_string(),
            domain: "demo.test".to_string(),
            webhook_url: "https://hooks.example/esp".to_string(),
            stats_window_days: 7,
            timeout_secs: 5,
        }
    }

    #[test]
    fn context_starts_empty() {
        let server = MockServer::start();
        let config = test_config(server.base_url());
        let client = ApiClient::new(
            server.base_url(),
            Duration::from_secs(5),
            Credentials::from_keys("a", "b"),
        );
        let pipeline = Pipeline::new(&client, &config);
        assert!(pipeline.context().sub_account_id.is_none());
        assert!(pipeline.context().message_id.is_none());
    }

    #[test]
    fn run_continues_through_every_failure() {
        // No mocks registered: every request gets the mock server's 404.
        let server = MockServer::start();
        let config = test_config(server.base_url());
        let client = ApiClient::new(
            server.base_url(),
            Duration::from_secs(5),
            Credentials::from_keys("a", "b"),
        );

        let mut pipeline = Pipeline::new(&client, &config);
        let mut reporter = CaptureReporter::default();
        let summary = pipeline.run(&mut reporter);

        // Both sends fail, so message detail is skipped, not attempted;
        // everything else fails and the run still reaches the end.
        assert_eq!(summary.total(), 13);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 12);

        let detail = reporter
            .finished
            .iter()
            .find(|step| step.name == "Retrieve message detail")
            .unwrap();
        assert_eq!(detail.outcome, "skipped");
    }

    #[test]
    fn records_are_reported_in_pipeline_order() {
        let server = MockServer::start();
        let config = test_config(server.base_url());
        let client = ApiClient::new(
            server.base_url(),
            Duration::from_secs(5),
            Credentials::from_keys("a", "b"),
        );

        let mut pipeline = Pipeline::new(&client, &config);
        let mut reporter = CaptureReporter::default();
        pipeline.run(&mut reporter);

        let names: Vec<_> = reporter.finished.iter().map(|s| s.name.as_str()).collect();
        let expected: Vec<_> = PIPELINE.iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
    }
}
