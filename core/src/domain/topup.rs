//! Top-up point operations: buying Moota points and confirming payment.

use crate::client::MootaClient;
use crate::endpoint;
use crate::error::Result;
use crate::http::{FormPart, HttpRequest};
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{CreateTopup, ManualConfirmation, TopupRecord};

pub struct Topups<'a, T> {
    client: &'a MootaClient<T>,
}

impl<'a, T: Transport> Topups<'a, T> {
    pub(crate) fn new(client: &'a MootaClient<T>) -> Self {
        Self { client }
    }

    pub fn build_payment_methods(&self) -> HttpRequest {
        self.client.build_get(endpoint::PAYMENT_METHOD, Vec::new())
    }

    /// Bank accounts that accept top-up payments.
    pub fn payment_methods(&self) -> Result<ApiResponse> {
        self.client.execute(self.build_payment_methods())
    }

    pub fn build_topup_amounts(&self) -> HttpRequest {
        self.client.build_get(endpoint::TOPUP_DENOM, Vec::new())
    }

    /// The point denominations that can be bought.
    pub fn topup_amounts(&self) -> Result<ApiResponse> {
        self.client.execute(self.build_topup_amounts())
    }

    pub fn build_list(&self, page: u32) -> HttpRequest {
        self.client
            .build_get(endpoint::TOPUP_INDEX, vec![("page".to_string(), page.to_string())])
    }

    pub fn list(&self, page: u32) -> Result<Vec<TopupRecord>> {
        self.client
            .execute(self.build_list(page))?
            .try_into_topup(endpoint::TOPUP_INDEX)?
            .topup_data()
    }

    pub fn build_create(&self, input: &CreateTopup) -> Result<HttpRequest> {
        self.client.build_json(endpoint::TOPUP_STORE, input)
    }

    pub fn create(&self, input: &CreateTopup) -> Result<ApiResponse> {
        self.client.execute(self.build_create(input)?)
    }

    pub fn build_manual_confirmation(&self, input: &ManualConfirmation) -> HttpRequest {
        let path = endpoint::resolve(endpoint::TOPUP_CONFIRMATION, "topup_id", &input.topup_id);
        self.client.build_multipart(
            &path,
            vec![FormPart::file("file", input.filename.clone(), input.contents.clone())],
        )
    }

    /// Upload proof of transfer for a pending top-up.
    pub fn upload_manual_confirmation(&self, input: &ManualConfirmation) -> Result<ApiResponse> {
        self.client.execute(self.build_manual_confirmation(input))
    }
}
