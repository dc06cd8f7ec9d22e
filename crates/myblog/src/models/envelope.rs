//! Response envelopes shared by every endpoint

use serde::Serialize;

use super::Record;

/// Successful response: `{success: true, data}` or `{success: true, message}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Material sub-collections keyed by media kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct Materials {
    pub video: Vec<Record>,
    pub surat: Vec<Record>,
    pub audio: Vec<Record>,
    pub matn: Vec<Record>,
}

impl Materials {
    /// Record count across the four material kinds
    pub fn total(&self) -> usize {
        self.video.len() + self.surat.len() + self.audio.len() + self.matn.len()
    }
}

/// Every collection, newest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct OverviewData {
    pub news: Vec<Record>,
    pub videos: Vec<Record>,
    pub materials: Materials,
    pub admin: Vec<Record>,
    pub comments: Vec<Record>,
}

/// Per-collection counts for the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverviewSummary {
    #[serde(rename = "totalNews")]
    pub total_news: usize,
    #[serde(rename = "totalVideos")]
    pub total_videos: usize,
    #[serde(rename = "totalMaterials")]
    pub total_materials: usize,
    #[serde(rename = "totalAdmin")]
    pub total_admin: usize,
    #[serde(rename = "totalComments")]
    pub total_comments: usize,
}

impl From<&OverviewData> for OverviewSummary {
    fn from(data: &OverviewData) -> Self {
        Self {
            total_news: data.news.len(),
            total_videos: data.videos.len(),
            total_materials: data.materials.total(),
            total_admin: data.admin.len(),
            total_comments: data.comments.len(),
        }
    }
}

/// Response of the aggregate root endpoint
#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    pub success: bool,
    pub data: OverviewData,
    pub summary: OverviewSummary,
}

impl From<OverviewData> for OverviewResponse {
    fn from(data: OverviewData) -> Self {
        let summary = OverviewSummary::from(&data);
        Self {
            success: true,
            data,
            summary,
        }
    }
}
