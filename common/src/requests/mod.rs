//! Field names of the admin upload form, shared by the form markup and the
//! multipart parser.

pub const CORAL_ID_FIELD: &str = "coralId";
pub const DESCRIPTION_FIELD: &str = "description";
pub const AVAILABILITY_FIELD: &str = "availability";
pub const IMAGES_FIELD: &str = "images";

/// Upper bound on image files accepted in a single submission.
pub const MAX_UPLOAD_IMAGES: usize = 4;
