//! Question lists shared by the branchform tests and docs.

pub mod branching_quiz;
pub mod capital_quiz;
pub mod onboarding;
pub mod pet_survey;

pub use branching_quiz::{DEEP_CHAIN_LEN, branching_quiz, deep_chain};
pub use capital_quiz::capital_quiz;
pub use onboarding::onboarding_form;
pub use pet_survey::pet_survey;
