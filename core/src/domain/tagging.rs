//! Tag operations. Tags label mutations for filtering.

use crate::client::MootaClient;
use crate::endpoint;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::response::{ApiResponse, TaggingResponse};
use crate::transport::Transport;
use crate::types::CreateTagging;

pub struct Tagging<'a, T> {
    client: &'a MootaClient<T>,
}

impl<'a, T: Transport> Tagging<'a, T> {
    pub(crate) fn new(client: &'a MootaClient<T>) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.client.build_get(endpoint::TAGGING_INDEX, Vec::new())
    }

    pub fn list(&self) -> Result<ApiResponse> {
        self.client.execute(self.build_list())
    }

    pub fn build_store(&self, input: &CreateTagging) -> Result<HttpRequest> {
        self.client.build_json(endpoint::TAGGING_STORE, input)
    }

    pub fn store(&self, input: &CreateTagging) -> Result<TaggingResponse> {
        self.client
            .execute(self.build_store(input)?)?
            .try_into_tagging(endpoint::TAGGING_STORE)
    }
}
