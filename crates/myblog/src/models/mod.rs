//! Data models for the content collections

mod envelope;
mod record;
mod schema;

pub use envelope::*;
pub use record::*;
pub use schema::*;

use crate::db::collections;

/// Every content collection served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    News,
    Videos,
    MaterialsVideo,
    MaterialsSurat,
    MaterialsAudio,
    MaterialsMatn,
    Admin,
    Comments,
}

impl Collection {
    /// All collections, in route registration order
    pub const ALL: [Collection; 8] = [
        Collection::News,
        Collection::Videos,
        Collection::MaterialsVideo,
        Collection::MaterialsSurat,
        Collection::MaterialsAudio,
        Collection::MaterialsMatn,
        Collection::Admin,
        Collection::Comments,
    ];

    /// Path segment under `/api/`
    pub fn slug(self) -> &'static str {
        match self {
            Collection::News => "newsPageCardData",
            Collection::Videos => "videosPageCardData",
            Collection::MaterialsVideo => "materialsVideoPageCardData",
            Collection::MaterialsSurat => "materialsSuratPageCardData",
            Collection::MaterialsAudio => "materialsAudioPageCardData",
            Collection::MaterialsMatn => "materialsMatnPageCardData",
            Collection::Admin => "adminPageCardData",
            Collection::Comments => "profilPageCommentData",
        }
    }

    /// Name of the backing MongoDB collection
    pub fn store_name(self) -> &'static str {
        match self {
            Collection::News => collections::NEWS,
            Collection::Videos => collections::VIDEOS,
            Collection::MaterialsVideo => collections::MATERIALS_VIDEO,
            Collection::MaterialsSurat => collections::MATERIALS_SURAT,
            Collection::MaterialsAudio => collections::MATERIALS_AUDIO,
            Collection::MaterialsMatn => collections::MATERIALS_MATN,
            Collection::Admin => collections::ADMIN,
            Collection::Comments => collections::COMMENTS,
        }
    }

    /// Model name used in validation messages
    pub fn model_name(self) -> &'static str {
        match self {
            Collection::News => "NewsPageCardData",
            Collection::Videos => "VideosPageCardData",
            Collection::MaterialsVideo => "MaterialsVideoPageCardData",
            Collection::MaterialsSurat => "MaterialsSuratPageCardData",
            Collection::MaterialsAudio => "MaterialsAudioPageCardData",
            Collection::MaterialsMatn => "MaterialsMatnPageCardData",
            Collection::Admin => "AdminPageCardData",
            Collection::Comments => "ProfilPageCommentData",
        }
    }

    /// Field schema for this collection
    pub fn schema(self) -> &'static [FieldSpec] {
        match self {
            Collection::News => NEWS_SCHEMA,
            Collection::Videos => VIDEOS_SCHEMA,
            Collection::MaterialsVideo => MATERIALS_VIDEO_SCHEMA,
            Collection::MaterialsSurat => MATERIALS_SURAT_SCHEMA,
            Collection::MaterialsAudio => MATERIALS_AUDIO_SCHEMA,
            Collection::MaterialsMatn => MATERIALS_MATN_SCHEMA,
            Collection::Admin => ADMIN_SCHEMA,
            Collection::Comments => COMMENT_SCHEMA,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
