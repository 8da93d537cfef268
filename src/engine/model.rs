use super::annotation::Annotation;
use serde::{Deserialize, Serialize};

/// Ordered sequence of metasteps; execution follows declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe {
    pub metasteps: Vec<Metastep>,
}

/// Named phase of a recipe with its own annotations and ordered steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metastep {
    pub id: String,
    pub desc: String,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    /// Human description, only shown when listing a recipe.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
}

impl Recipe {
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.metasteps
            .iter()
            .flat_map(|metastep| metastep.annotations.iter())
    }
}
