//! Object storage port - where uploaded media bytes go

use async_trait::async_trait;

use crate::error::DomainError;

/// Storage buckets, one per media class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Videos,
    Thumbnails,
    Avatars,
}

impl Bucket {
    /// Bucket name in the storage backend
    pub const fn name(self) -> &'static str {
        match self {
            Self::Videos => "videos",
            Self::Thumbnails => "thumbnails",
            Self::Avatars => "avatars",
        }
    }
}

/// Upload interface for media blobs.
///
/// Implementations return a publicly reachable URL for the stored object.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under a unique name derived from `filename` and return
    /// the public URL
    async fn upload(&self, data: Vec<u8>, filename: &str, bucket: Bucket)
        -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names() {
        assert_eq!(Bucket::Videos.name(), "videos");
        assert_eq!(Bucket::Thumbnails.name(), "thumbnails");
        assert_eq!(Bucket::Avatars.name(), "avatars");
    }
}
