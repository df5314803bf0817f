use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::dto::candidate_dto::CreateCandidatePayload;
use crate::error::{Error, Result};

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("email regex"))
}

// National mobile numbers: 9 digits, leading 6, 7 or 9.
fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(r"^(6|7|9)\d{8}$").expect("phone regex"))
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Checks a candidate payload against the submission rules, reporting the
/// first violation. Identity fields (email, phone) are checked before the
/// nested collections, so multiply-invalid records surface the identity
/// error. Absent optional fields are skipped.
pub fn validate_candidate(data: &CreateCandidatePayload) -> Result<()> {
    if !email_regex().is_match(&data.email) {
        return Err(Error::InvalidEmail);
    }

    if let Some(phone) = data.phone.as_deref() {
        if !phone.is_empty() && !phone_regex().is_match(phone) {
            return Err(Error::InvalidPhone);
        }
    }

    for entry in &data.educations {
        parse_iso_date(&entry.start_date)?;
        if let Some(end) = entry.end_date.as_deref() {
            parse_iso_date(end)?;
        }
    }

    for entry in &data.work_experiences {
        parse_iso_date(&entry.start_date)?;
        if let Some(end) = entry.end_date.as_deref() {
            parse_iso_date(end)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::candidate_dto::{CvPayload, EducationPayload, WorkExperiencePayload};

    fn base_payload() -> CreateCandidatePayload {
        CreateCandidatePayload {
            first_name: "Albert".to_string(),
            last_name: "Saelices".to_string(),
            email: "albert.saelices@gmail.com".to_string(),
            phone: Some("656874937".to_string()),
            address: Some("Calle Sant Dalmir 2, 5B. Barcelona".to_string()),
            educations: vec![],
            work_experiences: vec![],
            cv: None,
        }
    }

    #[test]
    fn accepts_complete_valid_candidate() {
        let mut payload = base_payload();
        payload.educations = vec![EducationPayload {
            institution: "UC3M".to_string(),
            title: "Computer Science".to_string(),
            start_date: "2006-12-31".to_string(),
            end_date: Some("2010-12-26".to_string()),
        }];
        payload.work_experiences = vec![WorkExperiencePayload {
            company: "Coca Cola".to_string(),
            position: "SWE".to_string(),
            description: Some("".to_string()),
            start_date: "2011-01-13".to_string(),
            end_date: Some("2013-01-17".to_string()),
        }];
        payload.cv = Some(CvPayload {
            file_path: "uploads/1715760936750-cv.pdf".to_string(),
            file_type: "application/pdf".to_string(),
        });

        assert!(validate_candidate(&payload).is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        let mut payload = base_payload();
        payload.email = "invalid-email".to_string();

        assert!(matches!(
            validate_candidate(&payload),
            Err(Error::InvalidEmail)
        ));
    }

    #[test]
    fn rejects_missing_email() {
        let mut payload = base_payload();
        payload.email = String::new();

        assert!(matches!(
            validate_candidate(&payload),
            Err(Error::InvalidEmail)
        ));
    }

    #[test]
    fn rejects_short_phone() {
        let mut payload = base_payload();
        payload.phone = Some("123".to_string());

        assert!(matches!(
            validate_candidate(&payload),
            Err(Error::InvalidPhone)
        ));
    }

    #[test]
    fn rejects_phone_with_wrong_prefix() {
        let mut payload = base_payload();
        payload.phone = Some("556874937".to_string());

        assert!(matches!(
            validate_candidate(&payload),
            Err(Error::InvalidPhone)
        ));
    }

    #[test]
    fn accepts_absent_phone() {
        let mut payload = base_payload();
        payload.phone = None;

        assert!(validate_candidate(&payload).is_ok());
    }

    #[test]
    fn rejects_unparseable_education_date() {
        let mut payload = base_payload();
        payload.educations = vec![EducationPayload {
            institution: "UC3M".to_string(),
            title: "Computer Science".to_string(),
            start_date: "invalid-date".to_string(),
            end_date: Some("2010-12-26".to_string()),
        }];

        let err = validate_candidate(&payload).unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
        assert!(err.to_string().starts_with("Invalid date"));
    }

    #[test]
    fn rejects_calendar_impossible_date() {
        let mut payload = base_payload();
        payload.work_experiences = vec![WorkExperiencePayload {
            company: "Coca Cola".to_string(),
            position: "SWE".to_string(),
            description: None,
            start_date: "2023-02-30".to_string(),
            end_date: None,
        }];

        assert!(matches!(
            validate_candidate(&payload),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn reports_email_before_nested_dates() {
        let mut payload = base_payload();
        payload.email = "invalid-email".to_string();
        payload.educations = vec![EducationPayload {
            institution: "UC3M".to_string(),
            title: "Computer Science".to_string(),
            start_date: "not-a-date".to_string(),
            end_date: None,
        }];

        assert!(matches!(
            validate_candidate(&payload),
            Err(Error::InvalidEmail)
        ));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_iso_date("2006-12-31").unwrap(),
            NaiveDate::from_ymd_opt(2006, 12, 31).unwrap()
        );
        assert!(parse_iso_date("31/12/2006").is_err());
    }
}
