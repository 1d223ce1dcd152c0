use super::models::{
    Course, CourseListResponse, CourseWork, CourseWorkListResponse, StudentSubmission,
    SubmissionListResponse,
};
use super::token::TokenManager;
use crate::error::{classroom_error, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

const CLASSROOM_API_BASE: &str = "https://classroom.googleapis.com/v1";

/// Read-only view of the Classroom API used by the coursework aggregator.
///
/// The trait seam exists so tests can substitute a scripted fake for the
/// network client.
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    async fn list_courses(&self) -> AppResult<Vec<Course>>;
    async fn list_coursework(&self, course_id: &str) -> AppResult<Vec<CourseWork>>;
    async fn list_submissions(
        &self,
        course_id: &str,
        coursework_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<StudentSubmission>>;
}

/// HTTP client for the Google Classroom API
#[derive(Clone)]
pub struct ClassroomClient {
    client: Client,
    token_manager: TokenManager,
    page_size: u32,
}

impl ClassroomClient {
    pub fn new(token_manager: TokenManager, page_size: u32) -> Self {
        Self {
            client: Client::new(),
            token_manager,
            page_size,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let access_token = self.token_manager.access_token().await?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| classroom_error(&format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(classroom_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| classroom_error(&format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ClassroomApi for ClassroomClient {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let mut url = Url::parse(&format!("{}/courses", CLASSROOM_API_BASE))
            .map_err(|e| classroom_error(&format!("Failed to parse URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("pageSize", &self.page_size.to_string());

        let response: CourseListResponse = self.get_json(url).await?;
        Ok(response.courses)
    }

    async fn list_coursework(&self, course_id: &str) -> AppResult<Vec<CourseWork>> {
        let url = Url::parse(&format!(
            "{}/courses/{}/courseWork",
            CLASSROOM_API_BASE, course_id
        ))
        .map_err(|e| classroom_error(&format!("Failed to parse URL: {}", e)))?;

        let response: CourseWorkListResponse = self.get_json(url).await?;
        Ok(response.course_work)
    }

    async fn list_submissions(
        &self,
        course_id: &str,
        coursework_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<StudentSubmission>> {
        let mut url = Url::parse(&format!(
            "{}/courses/{}/courseWork/{}/studentSubmissions",
            CLASSROOM_API_BASE, course_id, coursework_id
        ))
        .map_err(|e| classroom_error(&format!("Failed to parse URL: {}", e)))?;
        url.query_pairs_mut().append_pair("userId", user_id);

        let response: SubmissionListResponse = self.get_json(url).await?;
        Ok(response.student_submissions)
    }
}
