use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use uuid::Uuid;
use validator::Validate;

/// Employment type of a job posting, stored as the `job_type` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Freelance,
        JobType::Internship,
    ];

    /// Wire value, e.g. `full-time`
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
            JobType::Internship => "internship",
        }
    }

    /// Parse a wire value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        JobType::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// How often an alert subscriber wants to be notified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertFrequency {
    Instant,
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database representation of a job posting
///
/// `category` is a free string expected to match a `CategoryRow::slug`; it is
/// not enforced as a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub location: Option<String>,
    pub job_type: JobType,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub apply_url: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub posted_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job joined with its owning company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobWithCompany {
    #[serde(flatten)]
    pub job: JobRow,
    pub company: CompanyRow,
}

/// Reads a row produced by the jobs/companies join, where company columns are
/// aliased with a `company_` prefix.
impl<'r> FromRow<'r, PgRow> for JobWithCompany {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let job = JobRow::from_row(row)?;
        let company = CompanyRow {
            id: job.company_id,
            name: row.try_get("company_name")?,
            slug: row.try_get("company_slug")?,
            logo_url: row.try_get("company_logo_url")?,
            website: row.try_get("company_website")?,
            description: row.try_get("company_description")?,
            is_verified: row.try_get("company_is_verified")?,
            created_at: row.try_get("company_created_at")?,
            updated_at: row.try_get("company_updated_at")?,
        };
        Ok(JobWithCompany { job, company })
    }
}

/// Saved search criteria of a job alert, stored as JSONB
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AlertFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "Keywords must be at most 200 characters"))]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_types: Option<Vec<JobType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Minimum salary cannot be negative"))]
    pub salary_min: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct JobAlertRow {
    pub id: Uuid,
    pub email: String,
    pub filters: Json<AlertFilters>,
    pub frequency: AlertFrequency,
    pub is_active: bool,
    pub last_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an alert
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct NewJobAlert {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(nested)]
    pub filters: AlertFilters,
    pub frequency: AlertFrequency,
}

/// Partial update of an alert; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct JobAlertUpdate {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    #[validate(nested)]
    pub filters: Option<AlertFilters>,
    pub frequency: Option<AlertFrequency>,
    pub is_active: Option<bool>,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|value| value.map(|v| v.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_wire_values_round_trip_through_parse() {
        for job_type in JobType::ALL {
            assert_eq!(JobType::parse(job_type.as_str()), Some(job_type));
        }
        assert_eq!(JobType::parse("Full-Time"), None);
        assert_eq!(JobType::parse("remote"), None);
    }

    #[test]
    fn alert_emails_are_trimmed_before_validation() {
        let alert: NewJobAlert = serde_json::from_str(
            r#"{"email": "  dev@example.com ", "frequency": "daily"}"#,
        )
        .unwrap();
        assert_eq!(alert.email, "dev@example.com");
        assert!(alert.validate().is_ok());

        let update: JobAlertUpdate = serde_json::from_str(r#"{"email": " a@example.com"}"#).unwrap();
        assert_eq!(update.email.as_deref(), Some("a@example.com"));
        assert!(update.validate().is_ok());

        let empty: JobAlertUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.email.is_none());
    }

    #[test]
    fn job_type_serializes_kebab_case() {
        let json = serde_json::to_string(&JobType::PartTime).unwrap();
        assert_eq!(json, "\"part-time\"");
    }

    #[test]
    fn new_alert_rejects_bad_email_and_negative_salary() {
        let alert = NewJobAlert {
            email: "not-an-email".to_string(),
            filters: AlertFilters {
                salary_min: Some(-1),
                ..Default::default()
            },
            frequency: AlertFrequency::Daily,
        };

        let errors = alert.validate().unwrap_err();
        let errors = errors.errors();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("filters"));
    }

    #[test]
    fn alert_filters_omit_absent_fields() {
        let filters = AlertFilters {
            keywords: Some("rust".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            serde_json::json!({"keywords": "rust"})
        );
    }
}
