//! Portfolio content module for folio.
//!
//! Profile, projects, work experience and skills shown on the public
//! site and edited from the admin dashboard.

mod repository;
mod types;

pub use repository::{
    ExperienceRepository, ProfileRepository, ProjectRepository, SkillRepository,
};
pub use types::{
    Experience, ExperienceUpdate, NewExperience, NewProject, NewSkill, Profile, ProfileInput,
    Project, ProjectUpdate, Skill, SkillUpdate,
};
