//! External record collection contract and the headless-CMS adapter.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use coinmirror_core::{CoinId, PersistedRecord, RecordId};

use crate::error::CollectionError;
use crate::http::{HttpAuth, HttpClient, HttpRequest};

/// Narrow interface over the external collection.
///
/// `update`/`archive`/`delete` are idempotent by record id; `create` is not,
/// which is why the orchestrator never retries it.
pub trait RecordCollection: Send + Sync {
    /// List every record, paginating internally. A page shorter than
    /// `page_size` signals the end of the listing.
    fn list<'a>(
        &'a self,
        page_size: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PersistedRecord>, CollectionError>> + Send + 'a>>;

    fn create<'a>(
        &'a self,
        fields: &'a BTreeMap<String, Value>,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>>;

    fn update<'a>(
        &'a self,
        record_id: &'a RecordId,
        fields: &'a BTreeMap<String, Value>,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>>;

    fn archive<'a>(
        &'a self,
        record_id: &'a RecordId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>>;

    fn delete<'a>(
        &'a self,
        record_id: &'a RecordId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>>;
}

/// Webflow-shaped headless-CMS adapter.
pub struct WebflowCollection {
    http: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
    collection_id: String,
    /// External-identity slug inside the record field data.
    id_slug: String,
}

impl WebflowCollection {
    pub fn new(
        http: Arc<dyn HttpClient>,
        token: impl Into<String>,
        collection_id: impl Into<String>,
        id_slug: impl Into<String>,
    ) -> Self {
        Self {
            http,
            auth: HttpAuth::BearerToken(token.into()),
            base_url: String::from("https://api.webflow.com/v2"),
            collection_id: collection_id.into(),
            id_slug: id_slug.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn items_url(&self) -> String {
        format!("{}/collections/{}/items", self.base_url, self.collection_id)
    }

    fn item_url(&self, record_id: &RecordId) -> String {
        format!("{}/{}", self.items_url(), record_id)
    }

    async fn send(&self, request: HttpRequest) -> Result<String, CollectionError> {
        let response = self.http.execute(request.with_auth(&self.auth)).await?;
        if !response.is_success() {
            return Err(CollectionError::Status {
                status: response.status,
            });
        }
        Ok(response.body)
    }

    fn decode_record(&self, item: ItemPayload) -> Result<Option<PersistedRecord>, CollectionError> {
        let record_id = RecordId::parse(&item.id)?;
        let Some(raw_id) = item.field_data.get(&self.id_slug).and_then(Value::as_str) else {
            // Hand-edited records sometimes lose the identity field; they
            // cannot be reconciled, so they are skipped with a warning
            // instead of poisoning the whole listing.
            tracing::warn!(record_id = %record_id, slug = %self.id_slug,
                "record carries no external identity field; skipping");
            return Ok(None);
        };

        let coin_id = CoinId::parse(raw_id)?;
        Ok(Some(PersistedRecord {
            record_id,
            coin_id,
            archived: item.is_archived,
        }))
    }
}

impl RecordCollection for WebflowCollection {
    fn list<'a>(
        &'a self,
        page_size: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PersistedRecord>, CollectionError>> + Send + 'a>>
    {
        Box::pin(async move {
            let mut records = Vec::new();
            let mut offset = 0usize;

            loop {
                let url = format!("{}?limit={}&offset={}", self.items_url(), page_size, offset);
                let body = self.send(HttpRequest::get(url)).await?;
                let page: ItemsPage = serde_json::from_str(&body)?;
                let page_len = page.items.len();

                for item in page.items {
                    if let Some(record) = self.decode_record(item)? {
                        records.push(record);
                    }
                }

                if page_len < page_size {
                    break;
                }
                offset += page_size;
            }

            Ok(records)
        })
    }

    fn create<'a>(
        &'a self,
        fields: &'a BTreeMap<String, Value>,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::to_string(&json!({ "fieldData": fields }))?;
            self.send(HttpRequest::post(self.items_url()).with_json_body(body))
                .await?;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        record_id: &'a RecordId,
        fields: &'a BTreeMap<String, Value>,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::to_string(&json!({ "fieldData": fields }))?;
            self.send(HttpRequest::patch(self.item_url(record_id)).with_json_body(body))
                .await?;
            Ok(())
        })
    }

    fn archive<'a>(
        &'a self,
        record_id: &'a RecordId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::to_string(&json!({ "isArchived": true }))?;
            self.send(HttpRequest::patch(self.item_url(record_id)).with_json_body(body))
                .await?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        record_id: &'a RecordId,
    ) -> Pin<Box<dyn Future<Output = Result<(), CollectionError>> + Send + 'a>> {
        Box::pin(async move {
            self.send(HttpRequest::delete(self.item_url(record_id)))
                .await?;
            Ok(())
        })
    }
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    #[serde(default)]
    items: Vec<ItemPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPayload {
    id: String,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    field_data: BTreeMap<String, Value>,
}
