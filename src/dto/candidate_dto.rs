use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Error;
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::education::{Education, NewEducation};
use crate::models::resume::{NewResume, Resume};
use crate::models::work_experience::{NewWorkExperience, WorkExperience};
use crate::utils::validation::parse_iso_date;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub address: Option<String>,
    #[serde(default)]
    pub educations: Vec<EducationPayload>,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperiencePayload>,
    pub cv: Option<CvPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPayload {
    pub institution: String,
    pub title: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperiencePayload {
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvPayload {
    pub file_path: String,
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeResponse {
    pub file_path: String,
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfileResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub education: Vec<EducationResponse>,
    pub work_experience: Vec<WorkExperienceResponse>,
    pub resumes: Vec<ResumeResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationResponse {
    pub id: i64,
    pub institution: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceResponse {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: i64,
    pub file_path: String,
    pub file_type: String,
}

impl From<&CreateCandidatePayload> for NewCandidate {
    fn from(value: &CreateCandidatePayload) -> Self {
        Self {
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            email: value.email.clone(),
            phone: value.phone.clone().filter(|p| !p.is_empty()),
            address: value.address.clone().filter(|a| !a.is_empty()),
        }
    }
}

impl TryFrom<&EducationPayload> for NewEducation {
    type Error = Error;

    fn try_from(value: &EducationPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            institution: value.institution.clone(),
            title: value.title.clone(),
            start_date: parse_iso_date(&value.start_date)?,
            end_date: value.end_date.as_deref().map(parse_iso_date).transpose()?,
        })
    }
}

impl TryFrom<&WorkExperiencePayload> for NewWorkExperience {
    type Error = Error;

    fn try_from(value: &WorkExperiencePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            company: value.company.clone(),
            position: value.position.clone(),
            description: value.description.clone(),
            start_date: parse_iso_date(&value.start_date)?,
            end_date: value.end_date.as_deref().map(parse_iso_date).transpose()?,
        })
    }
}

impl From<&CvPayload> for NewResume {
    fn from(value: &CvPayload) -> Self {
        Self {
            file_path: value.file_path.clone(),
            file_type: value.file_type.clone(),
        }
    }
}

impl From<Education> for EducationResponse {
    fn from(value: Education) -> Self {
        Self {
            id: value.id,
            institution: value.institution,
            title: value.title,
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

impl From<WorkExperience> for WorkExperienceResponse {
    fn from(value: WorkExperience) -> Self {
        Self {
            id: value.id,
            company: value.company,
            position: value.position,
            description: value.description,
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

impl From<Resume> for ResumeResponse {
    fn from(value: Resume) -> Self {
        Self {
            id: value.id,
            file_path: value.file_path,
            file_type: value.file_type,
        }
    }
}

impl CandidateProfileResponse {
    pub fn from_parts(
        candidate: Candidate,
        education: Vec<Education>,
        work_experience: Vec<WorkExperience>,
        resumes: Vec<Resume>,
    ) -> Self {
        Self {
            id: candidate.id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            phone: candidate.phone,
            address: candidate.address,
            education: education.into_iter().map(Into::into).collect(),
            work_experience: work_experience.into_iter().map(Into::into).collect(),
            resumes: resumes.into_iter().map(Into::into).collect(),
        }
    }
}
