use std::time::Duration;

use crate::error::EutilsError;
use crate::eutils::models::{ArticleSet, IdList};
use crate::xml;

pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const ESEARCH: &str = "esearch.fcgi";
const EFETCH: &str = "efetch.fcgi";
const DATABASE: &str = "pubmed";

pub struct EutilsClient {
    http: reqwest::Client,
    base_url: String,
}

impl EutilsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<EutilsClient, EutilsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(EutilsError::Client)?;

        Ok(EutilsClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw `esearch` XML for `term`.
    pub async fn search_xml(&self, term: &str) -> Result<String, EutilsError> {
        self.get(ESEARCH, &[("db", DATABASE), ("term", term)]).await
    }

    /// Raw `efetch` XML with abstracts for `ids`.
    pub async fn fetch_xml(&self, ids: &[String]) -> Result<String, EutilsError> {
        let ids = ids.join(",");
        self.get(EFETCH, &[("db", DATABASE), ("id", ids.as_str()), ("rettype", "abstract")])
            .await
    }

    pub async fn search(&self, term: &str) -> Result<IdList, EutilsError> {
        let body = self.search_xml(term).await?;
        let doc = xml::decode(&body)?;
        IdList::from_document(&doc)
    }

    pub async fn fetch(&self, ids: &[String]) -> Result<ArticleSet, EutilsError> {
        let body = self.fetch_xml(ids).await?;
        let doc = xml::decode(&body)?;
        ArticleSet::from_document(&doc)
    }

    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, EutilsError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {url} {:?}", query);

        let network = |source| EutilsError::Network {
            endpoint: endpoint.to_string(),
            source,
        };

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(network)?;

        let status = res.status();
        if !status.is_success() {
            return Err(EutilsError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        res.text().await.map_err(network)
    }
}
