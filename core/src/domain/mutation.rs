//! Mutation operations: listing, recording and annotating bank transactions.
//!
//! Failures on the index, store and destroy endpoints surface as
//! [`MootaError::Mutation`](crate::MootaError::Mutation). Note and webhook
//! calls carry a real mutation id in their URL, so they never match the
//! catalog and fail with the generic error.

use crate::client::MootaClient;
use crate::endpoint;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::response::{ApiResponse, MutationResponse};
use crate::transport::Transport;
use crate::types::{CreateMutation, DestroyMutations, MutationNote, MutationQuery};

pub struct Mutations<'a, T> {
    client: &'a MootaClient<T>,
}

impl<'a, T: Transport> Mutations<'a, T> {
    pub(crate) fn new(client: &'a MootaClient<T>) -> Self {
        Self { client }
    }

    pub fn build_list(&self, query: &MutationQuery) -> HttpRequest {
        self.client.build_get(endpoint::MUTATION_INDEX, query.to_query())
    }

    pub fn list(&self, query: &MutationQuery) -> Result<MutationResponse> {
        self.client
            .execute(self.build_list(query))?
            .try_into_mutation(endpoint::MUTATION_INDEX)
    }

    pub fn build_store(&self, input: &CreateMutation) -> Result<HttpRequest> {
        self.client.build_json(endpoint::MUTATION_STORE, input)
    }

    pub fn store(&self, input: &CreateMutation) -> Result<MutationResponse> {
        self.client
            .execute(self.build_store(input)?)?
            .try_into_mutation(endpoint::MUTATION_STORE)
    }

    pub fn build_add_note(&self, mutation_id: &str, note: &MutationNote) -> Result<HttpRequest> {
        let path = endpoint::resolve(endpoint::MUTATION_NOTE, "mutation_id", mutation_id);
        self.client.build_json(&path, note)
    }

    pub fn add_note(&self, mutation_id: &str, note: &MutationNote) -> Result<ApiResponse> {
        self.client.execute(self.build_add_note(mutation_id, note)?)
    }

    pub fn build_push_webhook(&self, mutation_id: &str) -> HttpRequest {
        let path = endpoint::resolve(endpoint::MUTATION_PUSH_WEBHOOK, "mutation_id", mutation_id);
        self.client.build_post(&path)
    }

    /// Ask Moota to re-send the webhook for one mutation.
    pub fn push_webhook(&self, mutation_id: &str) -> Result<ApiResponse> {
        self.client.execute(self.build_push_webhook(mutation_id))
    }

    pub fn build_destroy(&self, input: &DestroyMutations) -> Result<HttpRequest> {
        self.client.build_json(endpoint::MUTATION_DESTROY, input)
    }

    pub fn destroy(&self, input: &DestroyMutations) -> Result<ApiResponse> {
        self.client.execute(self.build_destroy(input)?)
    }
}
