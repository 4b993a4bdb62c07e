use async_trait::async_trait;
use mailmask_core::{Router, RouterError, RouterResult};
use serde::Deserialize;
use tracing::{debug, trace};

const DEFAULT_API_BASE: &str = "https://api.mailgun.net/v3";
const ROUTE_PRIORITY: u32 = 8000;
const PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
struct MailgunRoute {
    id: String,
    expression: String,
}

#[derive(Debug, Deserialize)]
struct RoutesPage {
    items: Vec<MailgunRoute>,
}

fn map_http_error(operation: &str, err: reqwest::Error) -> RouterError {
    RouterError::Backend(format!("{operation}: {err}"))
}

/// Mailgun-backed implementation of the [`Router`] trait.
///
/// Forwarding rules are Mailgun routes matching the disposable address
/// exactly and forwarding to the recipient. Mailgun has no lookup by
/// expression, so both mutations list existing routes first; that listing
/// also provides the duplicate/missing distinction the contract requires.
pub struct MailgunRouter {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl MailgunRouter {
    /// Creates a router against the public Mailgun API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE)
    }

    /// Creates a router against a custom API base URL.
    ///
    /// Used for the EU region endpoint and for tests.
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    fn expression(from: &str) -> String {
        format!("match_recipient(\"{from}\")")
    }

    async fn find_route(&self, from: &str) -> RouterResult<Option<MailgunRoute>> {
        let expression = Self::expression(from);
        let mut skip = 0;

        loop {
            let page: RoutesPage = self
                .http
                .get(format!("{}/routes", self.api_base))
                .basic_auth("api", Some(&self.api_key))
                .query(&[("skip", skip.to_string()), ("limit", PAGE_LIMIT.to_string())])
                .send()
                .await
                .map_err(|err| map_http_error("failed to list routes", err))?
                .error_for_status()
                .map_err(|err| map_http_error("failed to list routes", err))?
                .json()
                .await
                .map_err(|err| map_http_error("failed to decode routes listing", err))?;

            if let Some(route) = page
                .items
                .iter()
                .find(|route| route.expression == expression)
            {
                return Ok(Some(route.clone()));
            }

            if page.items.len() < PAGE_LIMIT {
                return Ok(None);
            }
            skip += page.items.len();
        }
    }
}

#[async_trait]
impl Router for MailgunRouter {
    async fn set(&self, from: &str, to: &str) -> RouterResult<()> {
        trace!(from = %from, "creating Mailgun route");

        if self.find_route(from).await?.is_some() {
            return Err(RouterError::Duplicated(from.to_owned()));
        }

        let expression = Self::expression(from);
        let forward = format!("forward(\"{to}\")");
        self.http
            .post(format!("{}/routes", self.api_base))
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("priority", ROUTE_PRIORITY.to_string().as_str()),
                ("expression", expression.as_str()),
                ("action", forward.as_str()),
                ("action", "stop()"),
            ])
            .send()
            .await
            .map_err(|err| map_http_error("failed to create route", err))?
            .error_for_status()
            .map_err(|err| map_http_error("failed to create route", err))?;

        debug!(from = %from, "created Mailgun route");
        Ok(())
    }

    async fn unset(&self, from: &str) -> RouterResult<()> {
        trace!(from = %from, "deleting Mailgun route");

        let route = self
            .find_route(from)
            .await?
            .ok_or_else(|| RouterError::Undefined(from.to_owned()))?;

        self.http
            .delete(format!("{}/routes/{}", self.api_base, route.id))
            .basic_auth("api", Some(&self.api_key))
            .send()
            .await
            .map_err(|err| map_http_error("failed to delete route", err))?
            .error_for_status()
            .map_err(|err| map_http_error("failed to delete route", err))?;

        debug!(from = %from, "deleted Mailgun route");
        Ok(())
    }
}
