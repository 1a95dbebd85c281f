use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use surrealdb::sql::Thing;

use crate::database::table_names::{POST_TABLE_NAME, REPLY_TABLE_NAME, USER_TABLE_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportType {
    Post,
    Reply,
    User,
}

impl ReportType {
    /// Table the reported item lives in.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Post => POST_TABLE_NAME,
            Self::Reply => REPLY_TABLE_NAME,
            Self::User => USER_TABLE_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportReason {
    Spam,
    Harassment,
    HateSpeech,
    Inappropriate,
    Misinformation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
    Dismissed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Thing,
    pub reported_by: Thing,
    pub report_type: ReportType,
    pub reported_item: Thing,
    pub reason: ReportReason,
    #[serde(default)]
    pub description: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub reviewed_by: Option<Thing>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New reports start out `pending`.
#[derive(Debug, Serialize)]
pub struct CreateReport {
    pub reported_by: Thing,
    pub report_type: ReportType,
    pub reported_item: Thing,
    pub reason: ReportReason,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct TriageReport {
    pub status: ReportStatus,
    pub admin_note: Option<String>,
    pub reviewed_by: Thing,
}

#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub report_type: Option<ReportType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_stored_values() {
        assert_eq!(ReportReason::HateSpeech.to_string(), "hate-speech");
        assert!(ReportReason::VARIANTS.contains(&"hate-speech"));
        assert_eq!(
            serde_json::to_value(ReportReason::HateSpeech).unwrap(),
            serde_json::json!("hate-speech")
        );
        assert_eq!(ReportStatus::VARIANTS, &["pending", "reviewed", "resolved", "dismissed"]);
        assert_eq!("reply".parse::<ReportType>().unwrap(), ReportType::Reply);
        assert_eq!(ReportType::User.table(), USER_TABLE_NAME);
    }
}
