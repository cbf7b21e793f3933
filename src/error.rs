use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("malformed XML")]
    Malformed(#[from] quick_xml::Error),

    #[error("document has no root element")]
    Empty,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("text found outside the root element")]
    TextOutsideRoot,

    #[error("closing tag without a matching opening tag")]
    UnexpectedEnd,

    #[error("element <{0}> is never closed")]
    UnclosedElement(String),
}

#[derive(Error, Debug)]
pub enum EutilsError {
    #[error("request to {endpoint} failed")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with HTTP {status}")]
    Http { endpoint: String, status: u16 },

    #[error("could not decode response")]
    Decode(#[from] XmlError),

    #[error("unexpected response structure: {0}")]
    Schema(String),

    #[error("PubMed reported an error: {0}")]
    Upstream(String),

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The \"term\" query parameter is required.")]
    MissingParameter,

    #[error("No articles were found for that search term.")]
    NoResultsFound,

    #[error("Could not extract the article titles.")]
    NoTitlesExtracted,

    #[error(transparent)]
    Upstream(#[from] EutilsError),
}

/// `err` followed by each of its sources, joined with `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut line = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        line.push_str(": ");
        line.push_str(&cause.to_string());
        source = cause.source();
    }
    line
}

const GENERIC_ERROR: &str = "An error occurred while processing the request.";

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter => StatusCode::BAD_REQUEST,
            ApiError::NoResultsFound | ApiError::NoTitlesExtracted => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Upstream details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            ApiError::Upstream(_) => GENERIC_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(err) = &self {
            log::error!("error querying PubMed: {}", error_chain(err));
        }

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (status, body).into_response()
    }
}
