//! Request signing for the ECS RPC protocol.
//!
//! Every operation is a GET whose query string carries the action
//! parameters, the common protocol parameters, and an HMAC-SHA1 signature
//! computed over the canonicalised query.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::api::ApiError;

type HmacSha1 = Hmac<Sha1>;

pub(super) const API_VERSION: &str = "2014-05-26";

/// Percent-encodes `value`, leaving only the RPC unreserved set
/// (`A-Z a-z 0-9 - _ . ~`) untouched.
fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Joins parameters into the canonical query: pairs sorted by name, keys and
/// values percent-encoded.
fn canonical_query(params: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = params.iter().collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the string-to-sign from the canonical query.
fn string_to_sign(canonical: &str) -> String {
    format!("GET&%2F&{}", percent_encode(canonical))
}

/// Signs `payload` with the account secret suffixed by `&`.
fn sign(payload: &str, secret: &str) -> Result<String, ApiError> {
    let signing_key = format!("{secret}&");
    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes()).map_err(|err| {
        ApiError::Unexpected {
            message: format!("signing key rejected: {err}"),
        }
    })?;
    mac.update(payload.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Common parameters attached to every RPC call.
///
/// The nonce and timestamp are freshly generated, so two calls never share a
/// signature.
fn common_parameters(access_key_id: &str, region_id: &str) -> Vec<(String, String)> {
    vec![
        (String::from("Format"), String::from("JSON")),
        (String::from("Version"), String::from(API_VERSION)),
        (String::from("AccessKeyId"), access_key_id.to_owned()),
        (String::from("SignatureMethod"), String::from("HMAC-SHA1")),
        (String::from("SignatureVersion"), String::from("1.0")),
        (String::from("SignatureNonce"), Uuid::new_v4().to_string()),
        (
            String::from("Timestamp"),
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        ),
        (String::from("RegionId"), region_id.to_owned()),
    ]
}

/// Assembles the full signed query string for one RPC call.
///
/// # Errors
///
/// Returns [`ApiError::Unexpected`] when the signing key is rejected.
pub(super) fn signed_query(
    action: &str,
    action_params: &[(String, String)],
    access_key_id: &str,
    access_key_secret: &str,
    region_id: &str,
) -> Result<String, ApiError> {
    let mut params = common_parameters(access_key_id, region_id);
    params.push((String::from("Action"), action.to_owned()));
    params.extend(action_params.iter().cloned());

    let signature = sign(&string_to_sign(&canonical_query(&params)), access_key_secret)?;
    params.push((String::from("Signature"), signature));
    Ok(canonical_query(&params))
}
