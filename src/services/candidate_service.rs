use validator::Validate;

use crate::database::store::{CandidateStore, PgCandidateStore};
use crate::dto::candidate_dto::{CandidateProfileResponse, CreateCandidatePayload};
use crate::error::Result;
use crate::models::candidate::NewCandidate;
use crate::models::education::NewEducation;
use crate::models::resume::NewResume;
use crate::models::work_experience::NewWorkExperience;
use crate::utils::validation::validate_candidate;

/// Orchestrates candidate aggregate persistence: the candidate row is
/// written first, then each nested collection row against the generated
/// id. Writes are sequential and not wrapped in a transaction; a storage
/// failure surfaces to the caller unchanged.
#[derive(Clone)]
pub struct CandidateService<S: CandidateStore = PgCandidateStore> {
    store: S,
}

impl<S: CandidateStore> CandidateService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn add_candidate(
        &self,
        payload: CreateCandidatePayload,
    ) -> Result<CandidateProfileResponse> {
        payload.validate()?;
        validate_candidate(&payload)?;

        let candidate = self
            .store
            .insert_candidate(&NewCandidate::from(&payload))
            .await?;

        let mut education = Vec::with_capacity(payload.educations.len());
        for entry in &payload.educations {
            let row = self
                .store
                .insert_education(candidate.id, &NewEducation::try_from(entry)?)
                .await?;
            education.push(row);
        }

        let mut work_experience = Vec::with_capacity(payload.work_experiences.len());
        for entry in &payload.work_experiences {
            let row = self
                .store
                .insert_work_experience(candidate.id, &NewWorkExperience::try_from(entry)?)
                .await?;
            work_experience.push(row);
        }

        let mut resumes = Vec::new();
        if let Some(cv) = &payload.cv {
            let row = self
                .store
                .insert_resume(candidate.id, &NewResume::from(cv))
                .await?;
            resumes.push(row);
        }

        Ok(CandidateProfileResponse::from_parts(
            candidate,
            education,
            work_experience,
            resumes,
        ))
    }

    pub async fn update_candidate(
        &self,
        id: i64,
        payload: CreateCandidatePayload,
    ) -> Result<CandidateProfileResponse> {
        payload.validate()?;
        validate_candidate(&payload)?;

        let candidate = self
            .store
            .update_candidate(id, &NewCandidate::from(&payload))
            .await?;

        for entry in &payload.educations {
            self.store
                .insert_education(id, &NewEducation::try_from(entry)?)
                .await?;
        }
        for entry in &payload.work_experiences {
            self.store
                .insert_work_experience(id, &NewWorkExperience::try_from(entry)?)
                .await?;
        }
        if let Some(cv) = &payload.cv {
            self.store.insert_resume(id, &NewResume::from(cv)).await?;
        }

        let education = self.store.list_education(id).await?;
        let work_experience = self.store.list_work_experience(id).await?;
        let resumes = self.store.list_resumes(id).await?;

        Ok(CandidateProfileResponse::from_parts(
            candidate,
            education,
            work_experience,
            resumes,
        ))
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Option<CandidateProfileResponse>> {
        let candidate = match self.store.get_candidate(id).await? {
            Some(candidate) => candidate,
            None => return Ok(None),
        };

        let education = self.store.list_education(id).await?;
        let work_experience = self.store.list_work_experience(id).await?;
        let resumes = self.store.list_resumes(id).await?;

        Ok(Some(CandidateProfileResponse::from_parts(
            candidate,
            education,
            work_experience,
            resumes,
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;
    use crate::database::store::MockCandidateStore;
    use crate::dto::candidate_dto::EducationPayload;
    use crate::error::Error;
    use crate::models::candidate::Candidate;
    use crate::models::education::Education;

    fn minimal_payload() -> CreateCandidatePayload {
        CreateCandidatePayload {
            first_name: "Albert".to_string(),
            last_name: "Saelices".to_string(),
            email: "albert.saelices@gmail.com".to_string(),
            phone: None,
            address: None,
            educations: vec![],
            work_experiences: vec![],
            cv: None,
        }
    }

    fn candidate_row(id: i64, data: &NewCandidate) -> Candidate {
        Candidate {
            id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            address: data.address.clone(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn add_candidate_returns_generated_id() {
        let mut store = MockCandidateStore::new();
        store
            .expect_insert_candidate()
            .times(1)
            .returning(|data| Ok(candidate_row(1, data)));

        let service = CandidateService::new(store);
        let profile = service.add_candidate(minimal_payload()).await.unwrap();

        assert_eq!(profile.id, 1);
        assert_eq!(profile.first_name, "Albert");
        assert!(profile.education.is_empty());
        assert!(profile.work_experience.is_empty());
        assert!(profile.resumes.is_empty());
    }

    #[tokio::test]
    async fn add_candidate_propagates_store_failure() {
        let mut store = MockCandidateStore::new();
        store
            .expect_insert_candidate()
            .times(1)
            .returning(|_| Err(Error::Internal("Database error".to_string())));

        let service = CandidateService::new(store);
        let err = service.add_candidate(minimal_payload()).await.unwrap_err();

        assert!(matches!(err, Error::Internal(_)));
        assert!(err.to_string().contains("Database error"));
    }

    #[tokio::test]
    async fn add_candidate_persists_education_entries() {
        let mut store = MockCandidateStore::new();
        store
            .expect_insert_candidate()
            .times(1)
            .returning(|data| Ok(candidate_row(7, data)));
        store
            .expect_insert_education()
            .withf(|candidate_id, entry| *candidate_id == 7 && entry.institution == "UC3M")
            .times(1)
            .returning(|candidate_id, entry| {
                Ok(Education {
                    id: 1,
                    candidate_id,
                    institution: entry.institution.clone(),
                    title: entry.title.clone(),
                    start_date: entry.start_date,
                    end_date: entry.end_date,
                })
            });

        let mut payload = minimal_payload();
        payload.educations = vec![EducationPayload {
            institution: "UC3M".to_string(),
            title: "Computer Science".to_string(),
            start_date: "2006-12-31".to_string(),
            end_date: Some("2010-12-26".to_string()),
        }];

        let service = CandidateService::new(store);
        let profile = service.add_candidate(payload).await.unwrap();

        assert_eq!(profile.id, 7);
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].institution, "UC3M");
    }

    #[tokio::test]
    async fn add_candidate_rejects_invalid_email_before_any_write() {
        // No expectations: any store call panics the test.
        let store = MockCandidateStore::new();
        let service = CandidateService::new(store);

        let mut payload = minimal_payload();
        payload.email = "invalid-email".to_string();

        let err = service.add_candidate(payload).await.unwrap_err();
        assert!(matches!(err, Error::InvalidEmail));
    }

    #[tokio::test]
    async fn add_candidate_does_not_deduplicate() {
        let next_id = AtomicI64::new(1);
        let mut store = MockCandidateStore::new();
        store.expect_insert_candidate().times(2).returning(move |data| {
            Ok(candidate_row(next_id.fetch_add(1, Ordering::SeqCst), data))
        });

        let service = CandidateService::new(store);
        let first = service.add_candidate(minimal_payload()).await.unwrap();
        let second = service.add_candidate(minimal_payload()).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn update_candidate_revalidates_payload() {
        let store = MockCandidateStore::new();
        let service = CandidateService::new(store);

        let mut payload = minimal_payload();
        payload.phone = Some("123".to_string());

        let err = service.update_candidate(4, payload).await.unwrap_err();
        assert!(matches!(err, Error::InvalidPhone));
    }

    #[tokio::test]
    async fn update_candidate_returns_refreshed_aggregate() {
        let mut store = MockCandidateStore::new();
        store
            .expect_update_candidate()
            .withf(|id, _| *id == 4)
            .times(1)
            .returning(|id, data| Ok(candidate_row(id, data)));
        store
            .expect_list_education()
            .times(1)
            .returning(|_| Ok(vec![]));
        store
            .expect_list_work_experience()
            .times(1)
            .returning(|_| Ok(vec![]));
        store.expect_list_resumes().times(1).returning(|_| Ok(vec![]));

        let service = CandidateService::new(store);
        let profile = service
            .update_candidate(4, minimal_payload())
            .await
            .unwrap();

        assert_eq!(profile.id, 4);
        assert_eq!(profile.first_name, "Albert");
    }

    #[tokio::test]
    async fn get_candidate_returns_none_when_missing() {
        let mut store = MockCandidateStore::new();
        store.expect_get_candidate().times(1).returning(|_| Ok(None));

        let service = CandidateService::new(store);
        let profile = service.get_candidate(99).await.unwrap();

        assert!(profile.is_none());
    }
}
