//! Media Domain - Image Intake
//!
//! The catalog treats image storage as an external collaborator behind the
//! narrow [`ImageIntake`] trait: raw payloads go in, stored-location
//! identifiers come out. The filesystem implementation is the default
//! deployment; swapping in an object store only touches the trait impl.

pub mod error;
pub mod fs;
pub mod handlers;
pub mod intake;

pub use error::{IntakeError, IntakeResult};
pub use fs::FsImageIntake;
pub use handlers::ApiDoc;
pub use intake::ImageIntake;
