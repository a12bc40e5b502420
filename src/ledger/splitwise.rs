//! Splitwise HTTP client

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::settings::LedgerSettings;
use crate::error::{SplitterError, SplitterResult};
use crate::models::{ExpenseRecord, Person};
use crate::session::ports::LedgerClient;

/// Marker of a successful `create_expense` response body
const CREATED_MARKER: &str = r#""expenses":[{"#;

pub struct SplitwiseClient {
    http: reqwest::Client,
    token: String,
    settings: LedgerSettings,
}

impl SplitwiseClient {
    pub fn new(token: String, settings: LedgerSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/create_expense", self.settings.api_url.trim_end_matches('/'))
    }
}

/// Splitwise user id of a person
fn user_id(settings: &LedgerSettings, person: Person) -> i64 {
    match person {
        Person::A => settings.user_id_a,
        Person::B => settings.user_id_b,
    }
}

/// Build the `create_expense` body; the payer is listed first
pub fn build_payload(settings: &LedgerSettings, expense: &ExpenseRecord, store: &str) -> Value {
    let payer = expense.payer;
    let borrower = payer.other();
    let (payer_share, borrower_share) = (expense.share(payer), expense.share(borrower));

    json!({
        "currency_code": settings.currency_code,
        "category_id": settings.category_id,
        "description": format!("{} {}", store, expense.description),
        "cost": expense.cost.to_string(),
        "group_id": settings.group_id,
        "users__0__user_id": user_id(settings, payer),
        "users__0__paid_share": payer_share.paid.to_string(),
        "users__0__owed_share": payer_share.owed.to_string(),
        "users__1__user_id": user_id(settings, borrower),
        "users__1__paid_share": borrower_share.paid.to_string(),
        "users__1__owed_share": borrower_share.owed.to_string(),
    })
}

#[async_trait]
impl LedgerClient for SplitwiseClient {
    async fn create_expense(&self, expense: &ExpenseRecord, store: &str) -> SplitterResult<String> {
        if let Some(reason) = expense.skip_reason() {
            return Ok(reason.to_string());
        }

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .json(&build_payload(&self.settings, expense, store))
            .send()
            .await
            .map_err(|e| SplitterError::Ledger(format!("Error POSTing expense to Splitwise: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SplitterError::Ledger(format!(
                "Splitwise returned {}, but the body could not be read: {}",
                status, e
            ))
        })?;

        if !body.contains(CREATED_MARKER) {
            error!(%status, "splitwise rejected expense");
            return Err(SplitterError::Ledger(format!(
                "Splitwise returned {}: {}",
                status, body
            )));
        }

        info!(kind = %expense.kind, cost = %expense.cost, "expense created on splitwise");
        Ok("Expense successfully created on Splitwise.".to_string())
    }
}
