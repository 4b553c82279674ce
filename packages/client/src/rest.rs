//! The blocking REST client.

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value as JsonValue;

use lsw_address::Address;
use lsw_app::{Transport, TransportError};
use lsw_cache::CacheDocument;

use crate::error::ClientError;

/// A client for an lsw REST backend.
///
/// Caches live at `{scopedPartition}/{keyID}/{cacheID}`; collection
/// operations drop the trailing segments. All calls are synchronous and
/// block until the backend answers.
pub struct Client {
    http: HttpClient,
    base_url: Url,
}

impl Client {
    /// Create a client for the given backend endpoint, e.g.
    /// `https://backend.example.com` or `http://localhost:3030`.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Client { http, base_url })
    }

    /// The configured backend endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for a service path.
    fn service_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        self.base_url
            .join(&segments.join("/"))
            .map_err(|e| ClientError::InvalidUrl {
                message: e.to_string(),
            })
    }

    fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, ClientError> {
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} from {}", status, url);
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json()?)
    }

    /// Create a cache under a key: `POST {scopedPartition}/{keyID}`.
    pub fn create(
        &self,
        scoped_partition: &str,
        key_id: &str,
        document: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let url = self.service_url(&[scoped_partition, key_id])?;
        self.execute(Method::POST, url, Some(document))
    }

    /// List caches: `GET {scopedPartition}[/{keyID}]`.
    pub fn find(
        &self,
        scoped_partition: &str,
        key_id: Option<&str>,
    ) -> Result<JsonValue, ClientError> {
        let url = match key_id {
            Some(key_id) => self.service_url(&[scoped_partition, key_id])?,
            None => self.service_url(&[scoped_partition])?,
        };
        self.execute(Method::GET, url, None)
    }

    /// Fetch one cache: `GET {scopedPartition}/{keyID}/{cacheID}`.
    pub fn get(
        &self,
        scoped_partition: &str,
        key_id: &str,
        cache_id: &str,
    ) -> Result<JsonValue, ClientError> {
        let url = self.service_url(&[scoped_partition, key_id, cache_id])?;
        self.execute(Method::GET, url, None)
    }

    /// Replace a cache: `PUT {scopedPartition}/{keyID}/{cacheID}`.
    pub fn update(
        &self,
        scoped_partition: &str,
        key_id: &str,
        cache_id: &str,
        document: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let url = self.service_url(&[scoped_partition, key_id, cache_id])?;
        self.execute(Method::PUT, url, Some(document))
    }

    /// Partially update a cache: `PATCH {scopedPartition}/{keyID}/{cacheID}`.
    pub fn patch(
        &self,
        scoped_partition: &str,
        key_id: &str,
        cache_id: &str,
        document: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let url = self.service_url(&[scoped_partition, key_id, cache_id])?;
        self.execute(Method::PATCH, url, Some(document))
    }

    /// Delete a cache: `DELETE {scopedPartition}/{keyID}/{cacheID}`.
    pub fn remove(
        &self,
        scoped_partition: &str,
        key_id: &str,
        cache_id: &str,
    ) -> Result<JsonValue, ClientError> {
        let url = self.service_url(&[scoped_partition, key_id, cache_id])?;
        self.execute(Method::DELETE, url, None)
    }

    /// `create` addressed by an `lsw://` string (the cache ID in the address
    /// is ignored - creation targets the key).
    pub fn create_by_address(
        &self,
        address: &str,
        document: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let address = Address::parse(address)?;
        self.create(&address.scoped_partition(), address.key_id(), document)
    }

    /// `find` addressed by an `lsw://` string.
    pub fn find_by_address(&self, address: &str) -> Result<JsonValue, ClientError> {
        let address = Address::parse(address)?;
        self.find(&address.scoped_partition(), Some(address.key_id()))
    }

    /// `get` addressed by an `lsw://` string.
    pub fn get_by_address(&self, address: &str) -> Result<JsonValue, ClientError> {
        let address = Address::parse(address)?;
        self.get(
            &address.scoped_partition(),
            address.key_id(),
            address.cache_id(),
        )
    }

    /// `update` addressed by an `lsw://` string.
    pub fn update_by_address(
        &self,
        address: &str,
        document: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let address = Address::parse(address)?;
        self.update(
            &address.scoped_partition(),
            address.key_id(),
            address.cache_id(),
            document,
        )
    }

    /// `patch` addressed by an `lsw://` string.
    pub fn patch_by_address(
        &self,
        address: &str,
        document: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let address = Address::parse(address)?;
        self.patch(
            &address.scoped_partition(),
            address.key_id(),
            address.cache_id(),
            document,
        )
    }

    /// `remove` addressed by an `lsw://` string.
    pub fn remove_by_address(&self, address: &str) -> Result<JsonValue, ClientError> {
        let address = Address::parse(address)?;
        self.remove(
            &address.scoped_partition(),
            address.key_id(),
            address.cache_id(),
        )
    }

    /// Fetch the cache document an address points at.
    pub fn fetch_document_by_address(
        &self,
        address: &Address,
    ) -> Result<CacheDocument, ClientError> {
        let value = self.get(
            &address.scoped_partition(),
            address.key_id(),
            address.cache_id(),
        )?;
        Ok(CacheDocument::new(value))
    }
}

impl Transport for Client {
    fn fetch_document(&mut self, address: &Address) -> Result<CacheDocument, TransportError> {
        self.fetch_document_by_address(address)
            .map_err(TransportError::from)
    }
}
