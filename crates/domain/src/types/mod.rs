//! Domain data types

pub mod directory;
pub mod profile;
pub mod provider;
pub mod review;
pub mod user;

pub use directory::{DetailView, DirectoryEntry, DirectorySnapshot, ReviewWithAuthor};
pub use profile::{ImageUpload, OwnProfile, ProfileDraft};
pub use provider::{PortfolioImage, Provider};
pub use review::{NewReview, Review};
pub use user::{Role, User};
