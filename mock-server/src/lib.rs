//! In-memory emulation of the Moota v2 API for tests and local development.
//!
//! Every route requires a bearer token (any non-empty value). Failures are
//! JSON bodies of the form `{"message": "..."}`, matching the real service.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const SEED_BANK_ID: &str = "bank-1";
pub const SEED_MUTATION_ID: &str = "hash_mutation_id";
pub const SEED_TOPUP_ID: &str = "topup-1";
pub const MIN_TOPUP_AMOUNT: u64 = 10_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mutation {
    pub mutation_id: String,
    pub bank_id: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub mutation_type: String,
    pub description: String,
    pub note: String,
    pub date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank_id: String,
    pub bank_type: String,
    pub account_number: String,
    pub atas_nama: String,
    pub balance: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Topup {
    pub topup_id: String,
    pub amount: u64,
    pub payment_method: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateMutation {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default, rename = "type")]
    pub mutation_type: String,
}

#[derive(Deserialize)]
pub struct MutationNote {
    #[serde(default)]
    pub note: String,
}

#[derive(Deserialize)]
pub struct DestroyMutations {
    #[serde(default)]
    pub mutations: Vec<String>,
}

#[derive(Deserialize)]
pub struct BankAccountPayload {
    #[serde(default)]
    pub bank_type: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name_holder: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct CreateTagging {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateTopup {
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub payment_method: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pub mutations: HashMap<String, Mutation>,
    pub banks: HashMap<String, BankAccount>,
    pub tags: Vec<Tag>,
    pub topups: Vec<Topup>,
}

impl Store {
    /// One bank account, one mutation and one pending top-up.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.banks.insert(
            SEED_BANK_ID.to_string(),
            BankAccount {
                bank_id: SEED_BANK_ID.to_string(),
                bank_type: "bca".to_string(),
                account_number: "16899030".to_string(),
                atas_nama: "Moota".to_string(),
                balance: "1500000".to_string(),
                is_active: true,
            },
        );
        store.mutations.insert(
            SEED_MUTATION_ID.to_string(),
            Mutation {
                mutation_id: SEED_MUTATION_ID.to_string(),
                bank_id: SEED_BANK_ID.to_string(),
                amount: "100012".to_string(),
                mutation_type: "CR".to_string(),
                description: "Test Mutations".to_string(),
                note: String::new(),
                date: "2021-09-22".to_string(),
            },
        );
        store.topups.push(Topup {
            topup_id: SEED_TOPUP_ID.to_string(),
            amount: 50_000,
            payment_method: "bca".to_string(),
            status: "pending".to_string(),
        });
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/v2/mutation", get(list_mutations))
        .route("/v2/mutation/store", post(store_mutation))
        .route("/v2/mutation/destroy", post(destroy_mutations))
        .route("/v2/mutation/{mutation_id}/note", post(add_note))
        .route("/v2/mutation/{mutation_id}/webhook", post(push_webhook))
        .route("/v2/bank", get(list_banks))
        .route("/v2/bank/store", post(store_bank))
        .route("/v2/bank/update/{bank_id}", post(update_bank))
        .route("/v2/bank/{bank_id}/destroy", post(destroy_bank))
        .route("/v2/bank/{bank_id}/refresh", post(refresh_bank))
        .route("/v2/tagging", get(list_tags))
        .route("/v2/tagging/store", post(store_tag))
        .route("/v2/payment-method", get(payment_methods))
        .route("/v2/topup", get(list_topups))
        .route("/v2/topup/denominations", get(topup_denominations))
        .route("/v2/topup/store", post(store_topup))
        .route("/v2/topup/{topup_id}/manual-confirmation", post(confirm_topup))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "moota mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "Unauthenticated.").into_response();
    }
    next.run(request).await
}

fn page_of(params: &HashMap<String, String>) -> u64 {
    params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1)
}

// --- mutation ---

async fn list_mutations(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    if let Some(bank) = params.get("bank").filter(|b| !b.is_empty()) {
        if !store.banks.contains_key(bank) {
            return Err(error(StatusCode::NOT_FOUND, "Bank not found"));
        }
    }
    let data: Vec<&Mutation> = store
        .mutations
        .values()
        .filter(|m| params.get("bank").map_or(true, |b| b.is_empty() || *b == m.bank_id))
        .filter(|m| params.get("type").map_or(true, |t| t.is_empty() || *t == m.mutation_type))
        .collect();
    Ok(Json(json!({
        "data": data,
        "total": data.len(),
        "current_page": page_of(&params),
    })))
}

async fn store_mutation(
    State(db): State<Db>,
    Json(input): Json<CreateMutation>,
) -> Result<Json<Value>, ApiError> {
    if input.mutation_type != "CR" && input.mutation_type != "DB" {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The type field is required."));
    }
    if input.amount.is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The amount field is required."));
    }
    let mutation = Mutation {
        mutation_id: Uuid::new_v4().to_string(),
        bank_id: SEED_BANK_ID.to_string(),
        amount: input.amount,
        mutation_type: input.mutation_type,
        description: String::new(),
        note: input.note,
        date: input.date,
    };
    db.write().await.mutations.insert(mutation.mutation_id.clone(), mutation);
    Ok(Json(json!({ "error": false, "mutation": { "total": 1, "new": 1 } })))
}

async fn add_note(
    State(db): State<Db>,
    Path(mutation_id): Path<String>,
    Json(input): Json<MutationNote>,
) -> Result<Json<Mutation>, ApiError> {
    let mut store = db.write().await;
    let mutation = store
        .mutations
        .get_mut(&mutation_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Mutation not found"))?;
    mutation.note = input.note;
    Ok(Json(mutation.clone()))
}

async fn push_webhook(
    State(db): State<Db>,
    Path(mutation_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !db.read().await.mutations.contains_key(&mutation_id) {
        return Err(error(StatusCode::NOT_FOUND, "Mutation not found"));
    }
    Ok(Json(json!({ "success": true, "message": "Webhook queued" })))
}

async fn destroy_mutations(
    State(db): State<Db>,
    Json(input): Json<DestroyMutations>,
) -> Result<Json<Value>, ApiError> {
    if input.mutations.is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The mutations field is required."));
    }
    let mut store = db.write().await;
    if input.mutations.iter().any(|id| !store.mutations.contains_key(id)) {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Server Error"));
    }
    for id in &input.mutations {
        store.mutations.remove(id);
    }
    Ok(Json(json!({ "success": true })))
}

// --- bank ---

async fn list_banks(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let store = db.read().await;
    let data: Vec<&BankAccount> = store.banks.values().collect();
    Json(json!({
        "data": data,
        "total": data.len(),
        "current_page": page_of(&params),
    }))
}

fn validate_bank(input: &BankAccountPayload) -> Result<(), ApiError> {
    if input.bank_type.is_empty() || input.username.is_empty() || input.account_number.is_empty() {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "The bank_type, username and account_number fields are required.",
        ));
    }
    Ok(())
}

async fn store_bank(
    State(db): State<Db>,
    Json(input): Json<BankAccountPayload>,
) -> Result<Json<Value>, ApiError> {
    validate_bank(&input)?;
    let bank = BankAccount {
        bank_id: Uuid::new_v4().to_string(),
        bank_type: input.bank_type,
        account_number: input.account_number,
        atas_nama: input.name_holder,
        balance: "0".to_string(),
        is_active: input.is_active,
    };
    db.write().await.banks.insert(bank.bank_id.clone(), bank.clone());
    Ok(Json(json!({ "bank": bank })))
}

async fn update_bank(
    State(db): State<Db>,
    Path(bank_id): Path<String>,
    Json(input): Json<BankAccountPayload>,
) -> Result<Json<Value>, ApiError> {
    validate_bank(&input)?;
    let mut store = db.write().await;
    let bank = store
        .banks
        .get_mut(&bank_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Bank not found"))?;
    bank.bank_type = input.bank_type;
    bank.account_number = input.account_number;
    bank.atas_nama = input.name_holder;
    bank.is_active = input.is_active;
    Ok(Json(json!({ "bank": bank })))
}

async fn destroy_bank(
    State(db): State<Db>,
    Path(bank_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    db.write()
        .await
        .banks
        .remove(&bank_id)
        .map(|_| Json(json!({ "success": true })))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Bank not found"))
}

async fn refresh_bank(
    State(db): State<Db>,
    Path(bank_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !db.read().await.banks.contains_key(&bank_id) {
        return Err(error(StatusCode::NOT_FOUND, "Bank not found"));
    }
    Ok(Json(json!({ "success": true, "message": "Mutation refresh queued" })))
}

// --- tagging ---

async fn list_tags(State(db): State<Db>) -> Json<Value> {
    Json(json!({ "data": db.read().await.tags }))
}

async fn store_tag(
    State(db): State<Db>,
    Json(input): Json<CreateTagging>,
) -> Result<Json<Value>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The name field is required."));
    }
    let tag = Tag {
        tag_id: Uuid::new_v4().to_string(),
        name: input.name,
    };
    db.write().await.tags.push(tag.clone());
    Ok(Json(json!({ "data": [tag] })))
}

// --- top-up ---

async fn payment_methods() -> Json<Value> {
    Json(json!([
        { "bank_type": "bca", "account_number": "0611115554", "atas_nama": "PT Moota Teknologi" },
        { "bank_type": "mandiri", "account_number": "1370013305209", "atas_nama": "PT Moota Teknologi" },
    ]))
}

async fn topup_denominations() -> Json<Value> {
    Json(json!({ "minimum": MIN_TOPUP_AMOUNT, "maximum": 10_000_000 }))
}

async fn list_topups(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let store = db.read().await;
    Json(json!({
        "data": store.topups,
        "current_page": page_of(&params),
    }))
}

async fn store_topup(
    State(db): State<Db>,
    Json(input): Json<CreateTopup>,
) -> Result<Json<Topup>, ApiError> {
    if input.amount < MIN_TOPUP_AMOUNT {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The amount must be at least 10000."));
    }
    if input.payment_method.is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The payment_method field is required."));
    }
    let topup = Topup {
        topup_id: Uuid::new_v4().to_string(),
        amount: input.amount,
        payment_method: input.payment_method,
        status: "pending".to_string(),
    };
    db.write().await.topups.push(topup.clone());
    Ok(Json(topup))
}

async fn confirm_topup(
    State(db): State<Db>,
    Path(topup_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut multipart =
        multipart.map_err(|_| error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected multipart/form-data."))?;

    let mut proof = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err(error(StatusCode::BAD_REQUEST, "Malformed multipart body.")),
        };
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let contents = field
            .bytes()
            .await
            .map_err(|_| error(StatusCode::BAD_REQUEST, "Malformed multipart body."))?;
        proof = Some((filename, contents.len()));
    }
    let Some((Some(filename), size)) = proof else {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "The file field is required."));
    };
    info!(%topup_id, %filename, size, "manual confirmation uploaded");

    let mut store = db.write().await;
    let topup = store
        .topups
        .iter_mut()
        .find(|t| t.topup_id == topup_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Topup not found"))?;
    topup.status = "waiting-confirmation".to_string();
    Ok(Json(json!({ "success": true, "topup_id": topup.topup_id, "filename": filename })))
}
