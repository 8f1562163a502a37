//! Typed response wrappers produced by the dispatcher.
//!
//! Each wrapper owns the decoded JSON body unchanged and adds accessors for
//! its shape. Record lists are decoded lazily from the body's `data` array.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{MootaError, Result};
use crate::types::{BankAccount, Mutation, Tag, TopupRecord};

/// Decode `body[key]` as a list of records. A missing or `null` key is an
/// empty list.
fn records<T: DeserializeOwned>(body: &Value, key: &str) -> Result<Vec<T>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items) => {
            serde_json::from_value(items.clone()).map_err(|e| MootaError::Decode(format!("`{key}`: {e}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationResponse {
    body: Value,
}

impl MutationResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// The full decoded body.
    pub fn data(&self) -> &Value {
        &self.body
    }

    pub fn into_data(self) -> Value {
        self.body
    }

    pub fn mutations(&self) -> Result<Vec<Mutation>> {
        records(&self.body, "data")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankAccountResponse {
    body: Value,
}

impl BankAccountResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn data(&self) -> &Value {
        &self.body
    }

    pub fn into_data(self) -> Value {
        self.body
    }

    pub fn bank_accounts(&self) -> Result<Vec<BankAccount>> {
        records(&self.body, "data")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggingResponse {
    body: Value,
}

impl TaggingResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn data(&self) -> &Value {
        &self.body
    }

    pub fn into_data(self) -> Value {
        self.body
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        records(&self.body, "data")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopupResponse {
    body: Value,
}

impl TopupResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn data(&self) -> &Value {
        &self.body
    }

    pub fn into_data(self) -> Value {
        self.body
    }

    /// The top-up records in the body's `data` array.
    pub fn topup_data(&self) -> Result<Vec<TopupRecord>> {
        records(&self.body, "data")
    }
}

/// What a successful dispatch produces: a typed wrapper when the endpoint is
/// registered in the catalog, the raw JSON body otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Mutation(MutationResponse),
    BankAccount(BankAccountResponse),
    Tagging(TaggingResponse),
    Topup(TopupResponse),
    Json(Value),
}

impl ApiResponse {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ApiResponse::Mutation(_) => "mutation",
            ApiResponse::BankAccount(_) => "bank_account",
            ApiResponse::Tagging(_) => "tagging",
            ApiResponse::Topup(_) => "topup",
            ApiResponse::Json(_) => "json",
        }
    }

    /// The decoded body, whichever variant holds it.
    pub fn into_json(self) -> Value {
        match self {
            ApiResponse::Mutation(r) => r.into_data(),
            ApiResponse::BankAccount(r) => r.into_data(),
            ApiResponse::Tagging(r) => r.into_data(),
            ApiResponse::Topup(r) => r.into_data(),
            ApiResponse::Json(v) => v,
        }
    }

    fn unexpected(&self, path: &str) -> MootaError {
        MootaError::UnexpectedResponse {
            path: path.to_string(),
            found: self.kind_name(),
        }
    }

    pub fn try_into_mutation(self, path: &str) -> Result<MutationResponse> {
        match self {
            ApiResponse::Mutation(r) => Ok(r),
            other => Err(other.unexpected(path)),
        }
    }

    pub fn try_into_bank_account(self, path: &str) -> Result<BankAccountResponse> {
        match self {
            ApiResponse::BankAccount(r) => Ok(r),
            other => Err(other.unexpected(path)),
        }
    }

    pub fn try_into_tagging(self, path: &str) -> Result<TaggingResponse> {
        match self {
            ApiResponse::Tagging(r) => Ok(r),
            other => Err(other.unexpected(path)),
        }
    }

    pub fn try_into_topup(self, path: &str) -> Result<TopupResponse> {
        match self {
            ApiResponse::Topup(r) => Ok(r),
            other => Err(other.unexpected(path)),
        }
    }
}
