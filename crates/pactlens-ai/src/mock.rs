//! In-process provider for offline runs and tests.
//!
//! The heuristic mode answers like a real model would, but from keyword
//! presence alone, so the provider path can run without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::prompt::document_section;
use crate::provider::{ProviderError, ReasoningProvider};

/// What a [`MockProvider`] does when called.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Synthesize a draft from keywords in the prompt's document.
    Heuristic,
    /// Return this completion verbatim.
    Respond(String),
    /// Fail with [`ProviderError::Unavailable`].
    Fail(String),
    /// Sleep, then return this completion.
    Delayed(Duration, String),
}

pub struct MockProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn heuristic() -> Self {
        Self::new(MockBehavior::Heuristic)
    }

    /// Number of completed or attempted calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReasoningProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Heuristic => {
                let document = document_section(prompt).unwrap_or(prompt);
                Ok(heuristic_draft(document).to_string())
            }
            MockBehavior::Respond(text) => Ok(text.clone()),
            MockBehavior::Fail(reason) => Err(ProviderError::Unavailable(reason.clone())),
            MockBehavior::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }
}

/// Build a provider-format draft from keyword presence.
pub fn heuristic_draft(document: &str) -> Value {
    let lower = document.to_lowercase();

    let document_type = if lower.contains("privacy") {
        "Privacy Policy"
    } else if lower.contains("terms") || lower.contains("service") {
        "Terms of Service"
    } else if lower.contains("employment") {
        "Employment Contract"
    } else if lower.contains("license") {
        "Software License"
    } else {
        "Unknown"
    };

    let mut red_flags = Vec::new();
    let mut concerns = Vec::new();

    if lower.contains("arbitration") {
        concerns.push("Mandatory arbitration waives your right to a jury trial.");
        red_flags.push(json!({
            "category": "Dispute Resolution",
            "clause": "All disputes must be resolved through binding arbitration.",
            "explanation": "You cannot take the company to a regular court or join a class action.",
            "severity": "High",
            "recommendation": "Check whether the document offers an arbitration opt-out window.",
            "legalImplications": "Arbitration decisions are final and hard to appeal."
        }));
    }
    if lower.contains("indemnify") {
        concerns.push("Broad indemnification increases your financial risk.");
        red_flags.push(json!({
            "category": "Liability",
            "clause": "You agree to indemnify the company against claims arising from your use.",
            "explanation": "You may have to pay the company's legal costs if someone sues over your actions.",
            "severity": "High",
            "recommendation": "Limit indemnity to claims caused by your own breach.",
            "legalImplications": "Could result in significant personal financial liability."
        }));
    }
    if lower.contains("terminate")
        && (lower.contains("any time") || lower.contains("without notice"))
    {
        concerns.push("Your account can be terminated without adequate notice.");
        red_flags.push(json!({
            "category": "Termination",
            "clause": "The company may terminate your account at any time without notice.",
            "explanation": "You could lose access to your account and data without warning.",
            "severity": "High",
            "recommendation": "Keep your own copies of anything stored with the service.",
            "legalImplications": "Termination may be lawful even without cause."
        }));
    }

    let mut rights = vec![json!({
        "category": "User Rights",
        "clause": "You may request access to and deletion of your personal data.",
        "explanation": "You can ask what is stored about you and have it removed.",
        "severity": "Low",
        "userProtection": "Use the access and deletion request process before closing your account."
    })];
    if lower.contains("data") && lower.contains("third") {
        concerns.push("Your data is shared extensively with third parties.");
        rights.push(json!({
            "category": "Data Sharing",
            "clause": "Your data may be shared with third parties.",
            "explanation": "Companies outside the service may receive your information.",
            "severity": "Medium",
            "userProtection": "Look for opt-out controls for marketing and data sales."
        }));
    }

    let obligations = vec![json!({
        "category": "Compliance",
        "clause": "You agree to comply with all applicable laws when using the service.",
        "explanation": "You are responsible for making sure your use of the service is lawful.",
        "severity": "Medium",
        "impact": "Breaking the law while using the service may also break this agreement."
    })];

    let (risk_level, sentiment) = if red_flags.is_empty() {
        ("Low", "Positive")
    } else {
        ("High", "Negative")
    };

    let standard = format!("Standard {} concerns apply.", document_type.to_lowercase());
    let key_points: Vec<&str> = if concerns.is_empty() {
        vec![standard.as_str()]
    } else {
        concerns.into_iter().take(3).collect()
    };

    json!({
        "summary": {
            "documentType": document_type,
            "sentiment": sentiment,
            "keyPoints": key_points,
            "riskLevel": risk_level
        },
        "obligations": obligations,
        "rights_and_data_usage": rights,
        "red_flags": red_flags
    })
}
