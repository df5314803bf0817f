use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: i64,
    pub candidate_id: i64,
    pub file_path: String,
    pub file_type: String,
    pub upload_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewResume {
    pub file_path: String,
    pub file_type: String,
}
