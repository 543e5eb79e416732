use serde::Deserialize;

/// Envelope of every OCS JSON response.
#[derive(Deserialize)]
pub(super) struct OcsResponse<T> {
    pub ocs: Ocs<T>,
}

#[derive(Deserialize)]
pub(super) struct Ocs<T> {
    pub data: T,
}

#[derive(Deserialize)]
pub(super) struct OcsMeta {
    #[serde(default)]
    pub message: Option<String>,
}

/// Only the meta part, used to read the message of error responses.
#[derive(Deserialize)]
pub(super) struct OcsErrorResponse {
    pub ocs: OcsErrorBody,
}

#[derive(Deserialize)]
pub(super) struct OcsErrorBody {
    pub meta: OcsMeta,
}

#[derive(Deserialize)]
pub(super) struct UserInfoData {
    pub id: String,
    #[serde(rename = "display-name")]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct UserDetailsData {
    pub quota: QuotaData,
}

#[derive(Deserialize)]
pub(super) struct QuotaData {
    #[serde(default)]
    pub free: i64,
    #[serde(default)]
    pub used: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub relative: f64,
}

/// Message the server gave for a failed request, if any.
pub(super) fn failure_message(body: &str) -> Option<String> {
    if let Ok(error) = serde_json::from_str::<OcsErrorResponse>(body) {
        return error.ocs.meta.message.filter(|message| !message.is_empty());
    }

    let body = body.trim();
    if body.is_empty() || body.starts_with('<') {
        None
    } else {
        Some(body.to_string())
    }
}

#[derive(Deserialize)]
pub(super) struct StatusData {
    #[serde(default)]
    pub installed: bool,
    #[serde(default)]
    pub maintenance: bool,
    #[serde(default)]
    pub version: String,
}
