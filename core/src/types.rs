//! Request payloads and response records for the Moota API.
//!
//! # Design
//! Response records are permissive: every known field is optional and
//! anything else lands in `extra`, since the API adds fields freely and
//! reports amounts as either numbers or strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Direction of a mutation: credit (money in) or debit (money out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationType {
    #[serde(rename = "CR")]
    Credit,
    #[serde(rename = "DB")]
    Debit,
}

impl MutationType {
    pub fn as_str(self) -> &'static str {
        match self {
            MutationType::Credit => "CR",
            MutationType::Debit => "DB",
        }
    }
}

/// Filters for listing mutations. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationQuery {
    pub mutation_type: Option<MutationType>,
    pub bank: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub tags: Vec<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl MutationQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };
        push("type", self.mutation_type.map(|t| t.as_str().to_string()));
        push("bank", self.bank.clone());
        push("amount", self.amount.clone());
        push("description", self.description.clone());
        push("note", self.note.clone());
        push("date", self.date.clone());
        push("start_date", self.start_date.clone());
        push("end_date", self.end_date.clone());
        push("tag", (!self.tags.is_empty()).then(|| self.tags.join(",")));
        push("page", self.page.map(|p| p.to_string()));
        push("per_page", self.per_page.map(|p| p.to_string()));
        query
    }
}

/// Payload for recording a manual mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMutation {
    pub date: String,
    pub note: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub mutation_type: MutationType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationNote {
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyMutations {
    pub mutations: Vec<String>,
}

/// Payload for registering or updating a bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corporate_id: Option<String>,
    pub bank_type: String,
    pub username: String,
    pub password: String,
    pub name_holder: String,
    pub account_number: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTagging {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTopup {
    pub amount: u64,
    pub payment_method: String,
}

/// Proof of transfer for a top-up, sent as a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualConfirmation {
    pub topup_id: String,
    pub filename: String,
    pub contents: Vec<u8>,
}

/// A bank transaction tracked by Moota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    #[serde(default)]
    pub mutation_id: Option<String>,
    #[serde(default)]
    pub bank_id: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default, rename = "type")]
    pub mutation_type: Option<MutationType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(default)]
    pub bank_id: Option<String>,
    #[serde(default)]
    pub bank_type: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub atas_nama: Option<String>,
    #[serde(default)]
    pub balance: Value,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub tag_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A top-up of Moota points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopupRecord {
    #[serde(default)]
    pub topup_id: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_query_sends_nothing() {
        assert!(MutationQuery::default().to_query().is_empty());
    }

    #[test]
    fn query_uses_api_field_names() {
        let query = MutationQuery {
            mutation_type: Some(MutationType::Credit),
            bank: Some("klasdoi".to_string()),
            tags: vec!["tag_1".to_string(), "tag_2".to_string()],
            page: Some(1),
            per_page: Some(20),
            ..Default::default()
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("type".to_string(), "CR".to_string()),
                ("bank".to_string(), "klasdoi".to_string()),
                ("tag".to_string(), "tag_1,tag_2".to_string()),
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn create_mutation_serializes_type_code() {
        let payload = CreateMutation {
            date: "2021-09-21".to_string(),
            note: "Testing Note Mutation".to_string(),
            amount: "2000123".to_string(),
            mutation_type: MutationType::Debit,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "DB");
        assert!(json.get("mutation_type").is_none());
    }

    #[test]
    fn bank_payload_omits_missing_corporate_id() {
        let payload = BankAccountPayload {
            corporate_id: None,
            bank_type: "bca".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
            name_holder: "Jane".to_string(),
            account_number: "1234567890".to_string(),
            is_active: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("corporate_id").is_none());
        assert_eq!(json["is_active"], true);
    }

    #[test]
    fn mutation_record_keeps_unknown_fields() {
        let mutation: Mutation = serde_json::from_value(json!({
            "mutation_id": "m-1",
            "amount": "15000",
            "type": "CR",
            "balance": 99
        }))
        .unwrap();
        assert_eq!(mutation.mutation_type, Some(MutationType::Credit));
        assert_eq!(mutation.amount, json!("15000"));
        assert_eq!(mutation.extra.get("balance"), Some(&json!(99)));
        assert!(mutation.note.is_none());
    }
}
