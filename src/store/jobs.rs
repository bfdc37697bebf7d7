//! Job board
//!
//! Thin representative slice of the portal's CRUD surface, kept only as the
//! collaborator the authorization policy gates.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub posted_by: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("job not found")]
    UnknownJob,
    #[error("already applied")]
    AlreadyApplied,
}

#[derive(Default)]
pub struct JobBoard {
    jobs: DashMap<Uuid, Job>,
    applications: DashMap<Uuid, Application>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, title: &str, company: &str, description: &str, posted_by: &str) -> Job {
        let job = Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: company.to_string(),
            description: description.to_string(),
            posted_by: posted_by.to_string(),
            posted_at: Utc::now(),
        };
        self.jobs.insert(job.id, job.clone());
        job
    }

    /// Newest first
    pub fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.iter().map(|j| j.value().clone()).collect();
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        jobs
    }

    pub fn apply(&self, job_id: Uuid, applicant: &str) -> Result<Application, ApplyError> {
        if !self.jobs.contains_key(&job_id) {
            return Err(ApplyError::UnknownJob);
        }
        let duplicate = self
            .applications
            .iter()
            .any(|a| a.job_id == job_id && a.applicant == applicant);
        if duplicate {
            return Err(ApplyError::AlreadyApplied);
        }

        let application = Application {
            id: Uuid::new_v4(),
            job_id,
            applicant: applicant.to_string(),
            applied_at: Utc::now(),
        };
        self.applications.insert(application.id, application.clone());
        Ok(application)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn application_count(&self) -> usize {
        self.applications.len()
    }
}
