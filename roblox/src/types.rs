use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Universe resource as returned by the Open Cloud v2 API.
///
/// The API omits fields the caller has no permission to read, so the whole
/// struct decodes with per-field defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Universe {
    pub path: String,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
    pub display_name: String,
    pub description: String,
    pub user: String,
    pub visibility: String,
    pub voice_chat_enabled: bool,
    pub age_rating: String,
    pub private_server_price_robux: String,
    pub desktop_enabled: bool,
    pub mobile_enabled: bool,
    pub tablet_enabled: bool,
    pub console_enabled: bool,
    pub vr_enabled: bool,
    pub root_place: String,
    pub template_root_place: String,
}

/// User resource as returned by the Open Cloud v2 API.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub path: String,
    pub create_time: Option<DateTime<Utc>>,
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub about: String,
    pub locale: String,
    pub premium: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UniverseIdResponse {
    pub universe_id: u64,
}
