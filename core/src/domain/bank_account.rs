//! Bank account operations.

use crate::client::MootaClient;
use crate::endpoint;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::response::{ApiResponse, BankAccountResponse};
use crate::transport::Transport;
use crate::types::BankAccountPayload;

pub struct BankAccounts<'a, T> {
    client: &'a MootaClient<T>,
}

impl<'a, T: Transport> BankAccounts<'a, T> {
    pub(crate) fn new(client: &'a MootaClient<T>) -> Self {
        Self { client }
    }

    pub fn build_list(&self, page: u32, per_page: u32) -> HttpRequest {
        self.client.build_get(
            endpoint::BANK_INDEX,
            vec![
                ("page".to_string(), page.to_string()),
                ("per_page".to_string(), per_page.to_string()),
            ],
        )
    }

    pub fn list(&self, page: u32, per_page: u32) -> Result<BankAccountResponse> {
        self.client
            .execute(self.build_list(page, per_page))?
            .try_into_bank_account(endpoint::BANK_INDEX)
    }

    pub fn build_store(&self, input: &BankAccountPayload) -> Result<HttpRequest> {
        self.client.build_json(endpoint::BANK_STORE, input)
    }

    pub fn store(&self, input: &BankAccountPayload) -> Result<BankAccountResponse> {
        self.client
            .execute(self.build_store(input)?)?
            .try_into_bank_account(endpoint::BANK_STORE)
    }

    pub fn build_update(&self, bank_id: &str, input: &BankAccountPayload) -> Result<HttpRequest> {
        let path = endpoint::resolve(endpoint::BANK_UPDATE, "bank_id", bank_id);
        self.client.build_json(&path, input)
    }

    /// The update endpoint is registered under its template, so a resolved
    /// URL comes back as raw JSON rather than a `BankAccountResponse`.
    pub fn update(&self, bank_id: &str, input: &BankAccountPayload) -> Result<ApiResponse> {
        self.client.execute(self.build_update(bank_id, input)?)
    }

    pub fn build_destroy(&self, bank_id: &str) -> HttpRequest {
        self.client
            .build_post(&endpoint::resolve(endpoint::BANK_DESTROY, "bank_id", bank_id))
    }

    pub fn destroy(&self, bank_id: &str) -> Result<ApiResponse> {
        self.client.execute(self.build_destroy(bank_id))
    }

    pub fn build_refresh_mutation(&self, bank_id: &str) -> HttpRequest {
        self.client
            .build_post(&endpoint::resolve(endpoint::BANK_REFRESH_MUTATION, "bank_id", bank_id))
    }

    /// Trigger an immediate mutation check for one bank account.
    pub fn refresh_mutation(&self, bank_id: &str) -> Result<ApiResponse> {
        self.client.execute(self.build_refresh_mutation(bank_id))
    }
}
