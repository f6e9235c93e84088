//! Failures that abort a font load.
//!
//! Every variant names the resource location whose load failed. A load is
//! all-or-nothing: once one of these is produced no `Font` is returned.

use std::path::PathBuf;

use crate::{
    image_loader::ImageError,
    resource_location::{ResourceLocation, ResourceLocationError},
};

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// An identifier inside the descriptor (`file` or `id`) failed to parse.
    #[error("font {location}: {source}")]
    InvalidLocation {
        location: ResourceLocation,
        #[source]
        source: ResourceLocationError,
    },

    #[error("font {location}: cannot read descriptor {}", .path.display())]
    ResourceNotFound {
        location: ResourceLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font {location}: malformed descriptor: {reason}")]
    MalformedDescriptor {
        location: ResourceLocation,
        reason: String,
    },

    #[error("font {location}: unsupported provider type `{provider_type}`")]
    UnsupportedProviderType {
        location: ResourceLocation,
        provider_type: String,
    },

    #[error("font {location}: invalid or unsupported codepoint in advances key {key:?}")]
    InvalidAdvanceCodepoint {
        location: ResourceLocation,
        key: String,
    },

    #[error("cyclic font reference: {}", format_chain(.chain))]
    CyclicReference { chain: Vec<ResourceLocation> },

    #[error("font {location}: reference nesting exceeds {limit} levels")]
    ReferenceDepthExceeded {
        location: ResourceLocation,
        limit: usize,
    },

    #[error("font {location}: failed to load atlas image")]
    ImageLoad {
        location: ResourceLocation,
        #[source]
        source: ImageError,
    },

    #[error("font {location}: unusable atlas image")]
    ImageFormat {
        location: ResourceLocation,
        #[source]
        source: ImageError,
    },
}

impl FontError {
    pub(crate) fn malformed(location: &ResourceLocation, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            location: location.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn image(location: &ResourceLocation, source: ImageError) -> Self {
        let location = location.clone();
        match source {
            ImageError::Load { .. } => Self::ImageLoad { location, source },
            ImageError::Format { .. } => Self::ImageFormat { location, source },
        }
    }

    /// The location whose load produced this error.
    ///
    /// For a cycle this is the location that closed the loop.
    pub fn location(&self) -> Option<&ResourceLocation> {
        match self {
            Self::InvalidLocation { location, .. }
            | Self::ResourceNotFound { location, .. }
            | Self::MalformedDescriptor { location, .. }
            | Self::UnsupportedProviderType { location, .. }
            | Self::InvalidAdvanceCodepoint { location, .. }
            | Self::ReferenceDepthExceeded { location, .. }
            | Self::ImageLoad { location, .. }
            | Self::ImageFormat { location, .. } => Some(location),
            Self::CyclicReference { chain } => chain.last(),
        }
    }
}

fn format_chain(chain: &[ResourceLocation]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
