use crate::error::EutilsError;
use crate::xml::{XmlDocument, XmlValue};

const ESEARCH_ROOT: &str = "eSearchResult";
const EFETCH_ROOT: &str = "PubmedArticleSet";
const TITLE_PATH: [&str; 3] = ["MedlineCitation", "Article", "ArticleTitle"];

/// PubMed identifiers returned by `esearch`, in result order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdList {
    ids: Vec<String>,
    count: Option<u64>,
}

impl IdList {
    pub fn from_document(doc: &XmlDocument) -> Result<IdList, EutilsError> {
        if doc.root != ESEARCH_ROOT {
            return Err(EutilsError::Schema(format!(
                "expected <{}>, got <{}>",
                ESEARCH_ROOT, doc.root
            )));
        }

        if let Some(error) = doc.value.first("ERROR") {
            return Err(EutilsError::Upstream(error.text().to_string()));
        }

        let id_list = doc
            .value
            .first("IdList")
            .ok_or_else(|| EutilsError::Schema("missing <IdList>".to_string()))?;

        // one <Id> or many, always a sequence
        let ids = id_list
            .children("Id")
            .map(|id| id.text().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        let count = doc
            .value
            .first("Count")
            .and_then(|count| count.text().trim().parse().ok());

        Ok(IdList { ids, count })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Total hits reported by PubMed, which may exceed `ids().len()`.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    pub pmid: Option<String>,
    pub title: Option<String>,
}

impl ArticleRecord {
    fn from_value(value: &XmlValue) -> ArticleRecord {
        let pmid = value
            .path(&["MedlineCitation", "PMID"])
            .map(|pmid| pmid.text().to_string())
            .filter(|pmid| !pmid.is_empty());
        let title = value
            .path(&TITLE_PATH)
            .map(|title| title.text().to_string())
            .filter(|title| !title.is_empty());

        ArticleRecord { pmid, title }
    }
}

/// Article records returned by `efetch`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleSet {
    pub articles: Vec<ArticleRecord>,
}

impl ArticleSet {
    pub fn from_document(doc: &XmlDocument) -> Result<ArticleSet, EutilsError> {
        if doc.root != EFETCH_ROOT {
            return Err(EutilsError::Schema(format!(
                "expected <{}>, got <{}>",
                EFETCH_ROOT, doc.root
            )));
        }

        let articles = doc
            .value
            .children("PubmedArticle")
            .map(ArticleRecord::from_value)
            .collect();

        Ok(ArticleSet { articles })
    }

    /// Titles ordered like `ids`. Records without a title are skipped;
    /// records whose PMID is not in `ids` keep their relative order at the end.
    pub fn titles_in_order(&self, ids: &[String]) -> Vec<String> {
        let mut ranked: Vec<(usize, &ArticleRecord)> = self
            .articles
            .iter()
            .map(|record| {
                let rank = record
                    .pmid
                    .as_ref()
                    .and_then(|pmid| ids.iter().position(|id| id == pmid))
                    .unwrap_or(usize::MAX);
                (rank, record)
            })
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);

        ranked
            .into_iter()
            .filter_map(|(_, record)| match &record.title {
                Some(title) => Some(title.clone()),
                None => {
                    log::warn!(
                        "article {} has no title, skipping",
                        record.pmid.as_deref().unwrap_or("<unknown>")
                    );
                    None
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
