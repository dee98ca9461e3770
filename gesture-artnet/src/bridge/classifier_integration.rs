//! Classifier integration - the seam to the external gesture models
//!
//! The models are trained and run elsewhere. This crate hands them
//! normalized features and takes back a class id. Closures work as
//! classifiers, which keeps tests and replay glue short.

use std::fs;
use std::path::Path;

use crate::classifier::{PoseFeatures, TrajectoryFeatures};
use crate::error::Result;

/// Keypoint (static hand sign) classifier
pub trait PoseClassifier {
    fn classify_pose(&mut self, features: &PoseFeatures) -> u8;
}

/// Point-history (dynamic finger gesture) classifier
pub trait TrajectoryClassifier {
    fn classify_trajectory(&mut self, features: &TrajectoryFeatures) -> u8;
}

impl<F> PoseClassifier for F
where
    F: FnMut(&PoseFeatures) -> u8,
{
    fn classify_pose(&mut self, features: &PoseFeatures) -> u8 {
        self(features)
    }
}

impl<F> TrajectoryClassifier for F
where
    F: FnMut(&TrajectoryFeatures) -> u8,
{
    fn classify_trajectory(&mut self, features: &TrajectoryFeatures) -> u8 {
        self(features)
    }
}

/// Class labels shipped alongside a model, one per line
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// First comma-separated column of each non-empty line; a leading
    /// UTF-8 BOM is ignored
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        let labels = raw
            .lines()
            .map(|line| line.split(',').next().unwrap_or("").trim())
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect();
        Self { labels }
    }

    pub fn label(&self, id: u8) -> &str {
        self.labels.get(id as usize).map(String::as_str).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
