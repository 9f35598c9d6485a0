//! Jobs, their results and the job source that enumerates them

use crate::crawler::FetchError;

/// One URL paired with its position in the input list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Zero-based index of the line in the input list
    pub position: usize,

    /// The URL exactly as it appeared in the input
    pub url: String,
}

/// Outcome of processing one [`Job`]
///
/// `outcome` holds either the extracted title or the classified failure, so
/// a result can never carry both or neither.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    /// Copied verbatim from the originating job
    pub position: usize,

    /// The URL exactly as it appeared in the input
    pub url: String,

    pub outcome: Result<String, FetchError>,
}

impl JobResult {
    pub fn success(job: &Job, title: String) -> Self {
        Self {
            position: job.position,
            url: job.url.clone(),
            outcome: Ok(title),
        }
    }

    pub fn failure(job: &Job, error: FetchError) -> Self {
        Self {
            position: job.position,
            url: job.url.clone(),
            outcome: Err(error),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.outcome.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Finite, eagerly enumerated supply of jobs
///
/// Every input line becomes a job, including blank and duplicate lines, so
/// the job count always equals the line count.
#[derive(Debug, Clone, Default)]
pub struct JobSource {
    jobs: Vec<Job>,
}

impl JobSource {
    /// Builds one job per URL, numbered in input order
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let jobs = urls
            .into_iter()
            .enumerate()
            .map(|(position, url)| Job {
                position,
                url: url.into(),
            })
            .collect();

        Self { jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn into_jobs(self) -> Vec<Job> {
        self.jobs
    }
}
