use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::redirect;
use tracing::debug;

use crate::error::ScrapeError;
use crate::user_agent::UserAgentSource;

const MAX_REDIRECTS: usize = 30;

/// A fetched page: the URL we ended up at after redirects, and its body.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<Page, ScrapeError>;
}

pub struct HttpFetcher<U> {
    client: Client,
    user_agents: U,
}

impl<U: UserAgentSource> HttpFetcher<U> {
    pub fn new(user_agents: U) -> Result<Self, ScrapeError> {
        let redirect_policy = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() > MAX_REDIRECTS {
                attempt.error(format!("Too many redirects (>{MAX_REDIRECTS})"))
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder().redirect(redirect_policy).build()?;

        Ok(Self {
            client,
            user_agents,
        })
    }
}

impl<U: UserAgentSource> PageSource for HttpFetcher<U> {
    fn fetch(&self, url: &str) -> Result<Page, ScrapeError> {
        let user_agent = self.user_agents.user_agent();
        debug!(%url, %user_agent, "fetching page");

        let resp = self.client.get(url).header(USER_AGENT, user_agent).send()?;
        let final_url = resp.url().to_string();
        debug!(status = %resp.status(), %final_url, "received response");

        Ok(Page {
            url: final_url,
            body: resp.text()?,
        })
    }
}
