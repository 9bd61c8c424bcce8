//! Descriptive statistics and normality evidence over a group's values.

pub mod descriptive;
pub mod normality;
pub mod profile;

pub use normality::{normality_test_for, JarqueBera, NormalityTest, SkewnessProxy};
pub use profile::DistributionProfile;
