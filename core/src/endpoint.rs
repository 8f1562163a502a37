//! Endpoint paths of the Moota v2 API, relative to the configured base URL.
//!
//! Paths containing `{...}` are templates; [`resolve`] substitutes the
//! placeholder before a request is sent.

pub const MUTATION_INDEX: &str = "/v2/mutation";
pub const MUTATION_STORE: &str = "/v2/mutation/store";
pub const MUTATION_NOTE: &str = "/v2/mutation/{mutation_id}/note";
pub const MUTATION_PUSH_WEBHOOK: &str = "/v2/mutation/{mutation_id}/webhook";
pub const MUTATION_DESTROY: &str = "/v2/mutation/destroy";

pub const BANK_INDEX: &str = "/v2/bank";
pub const BANK_STORE: &str = "/v2/bank/store";
pub const BANK_UPDATE: &str = "/v2/bank/update/{bank_id}";
pub const BANK_DESTROY: &str = "/v2/bank/{bank_id}/destroy";
pub const BANK_REFRESH_MUTATION: &str = "/v2/bank/{bank_id}/refresh";

pub const TAGGING_INDEX: &str = "/v2/tagging";
pub const TAGGING_STORE: &str = "/v2/tagging/store";

pub const PAYMENT_METHOD: &str = "/v2/payment-method";
pub const TOPUP_DENOM: &str = "/v2/topup/denominations";
pub const TOPUP_INDEX: &str = "/v2/topup";
pub const TOPUP_STORE: &str = "/v2/topup/store";
pub const TOPUP_CONFIRMATION: &str = "/v2/topup/{topup_id}/manual-confirmation";

/// Replace `{placeholder}` in `template` with `value`, percent-encoded so it
/// stays a single path segment.
pub fn resolve(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{placeholder}}}"), &urlencoding::encode(value))
}
