use serde::Serialize;

#[derive(Serialize)]
pub enum ResponseType {
    #[serde(rename = "health")]
    Health,

    #[serde(rename = "entry")]
    Entry,

    #[serde(rename = "week")]
    Week,

    #[serde(rename = "log")]
    Log,

    #[serde(rename = "bulk_transition")]
    BulkTransition,
}
