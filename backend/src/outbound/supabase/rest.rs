//! Table-scoped client for the relational store's REST interface.
//!
//! Filters are `column=eq.value` pairs and ordering is `order=column.asc`;
//! every mutation asks for the affected rows back with
//! `Prefer: return=representation`.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::client::{ApiKey, SupabaseClient, SupabaseError};

const PREFER_REPRESENTATION: &str = "return=representation";

/// Query string for one table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RowQuery {
    pairs: Vec<(String, String)>,
}

impl RowQuery {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Columns (and embedded resources) to return.
    pub(crate) fn select(mut self, columns: &str) -> Self {
        self.pairs.push(("select".to_owned(), columns.to_owned()));
        self
    }

    /// Keep rows whose `column` equals `value`.
    pub(crate) fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.pairs.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Order rows by ascending `column`.
    pub(crate) fn order_asc(mut self, column: &str) -> Self {
        self.pairs.push(("order".to_owned(), format!("{column}.asc")));
        self
    }

    /// Order an embedded resource's rows by ascending `column`.
    pub(crate) fn order_embedded_asc(mut self, resource: &str, column: &str) -> Self {
        self.pairs
            .push((format!("{resource}.order"), format!("{column}.asc")));
        self
    }

    /// Return at most `count` rows.
    pub(crate) fn limit(mut self, count: usize) -> Self {
        self.pairs.push(("limit".to_owned(), count.to_string()));
        self
    }

    pub(crate) fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Client bound to one table.
#[derive(Clone)]
pub(crate) struct TableClient {
    client: SupabaseClient,
    table: &'static str,
}

impl TableClient {
    pub(crate) fn new(client: SupabaseClient, table: &'static str) -> Self {
        Self { client, table }
    }

    fn url(&self) -> reqwest::Url {
        self.client.endpoint(["rest", "v1", self.table])
    }

    fn request(&self, method: Method, query: &RowQuery) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(), ApiKey::ServiceRole)
            .query(query.pairs())
    }

    /// Rows matching `query`.
    pub(crate) async fn select<T>(&self, query: &RowQuery) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        self.client
            .send_json(self.request(Method::GET, query))
            .await
    }

    /// Insert `rows` (a single row or an array) and return the stored rows.
    pub(crate) async fn insert<B, T>(&self, rows: &B) -> Result<Vec<T>, SupabaseError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, &RowQuery::new())
            .header("Prefer", PREFER_REPRESENTATION)
            .json(rows);
        self.client.send_json(request).await
    }

    /// Apply `patch` to rows matching `query` and return them.
    pub(crate) async fn update<B, T>(
        &self,
        patch: &B,
        query: &RowQuery,
    ) -> Result<Vec<T>, SupabaseError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PATCH, query)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(patch);
        self.client.send_json(request).await
    }

    /// Delete rows matching `query` and return them.
    pub(crate) async fn delete<T>(&self, query: &RowQuery) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::DELETE, query)
            .header("Prefer", PREFER_REPRESENTATION);
        self.client.send_json(request).await
    }
}
