pub mod candidate;
pub mod education;
pub mod resume;
pub mod work_experience;
