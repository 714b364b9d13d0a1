//! Output (monitor) topology as supplied by the windowing layer.

use crate::candidates::Candidate;
use crate::geometry::{Point, Rect};

/// Stable index of an output within the session's [`OutputLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(pub usize);

/// Geometry and identity of a single output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputInfo {
    pub rect: Rect,
    pub name: String,
}

impl OutputInfo {
    pub fn new(rect: Rect, name: impl Into<String>) -> Self {
        Self {
            rect,
            name: name.into(),
        }
    }
}

/// The set of outputs making up the virtual desktop. Fixed for the
/// lifetime of one selection session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputLayout {
    outputs: Vec<OutputInfo>,
}

impl OutputLayout {
    pub fn new(outputs: Vec<OutputInfo>) -> Self {
        Self { outputs }
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn get(&self, id: OutputId) -> Option<&OutputInfo> {
        self.outputs.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutputId, &OutputInfo)> {
        self.outputs
            .iter()
            .enumerate()
            .map(|(i, info)| (OutputId(i), info))
    }

    /// First output containing `p`, in layout order.
    pub fn output_at(&self, p: Point) -> Option<OutputId> {
        self.iter()
            .find(|(_, info)| info.rect.contains(p))
            .map(|(id, _)| id)
    }

    /// Converts an output-local position (as delivered for touch events)
    /// into global coordinates. Unknown ids pass through unchanged.
    pub fn to_global(&self, id: OutputId, local: Point) -> Point {
        match self.get(id) {
            Some(info) => Point::new(local.x + info.rect.x as f64, local.y + info.rect.y as f64),
            None => local,
        }
    }

    /// Outputs offered as pick candidates, front-to-back in layout order.
    pub fn as_candidates(&self) -> Vec<Candidate> {
        self.outputs
            .iter()
            .map(|info| Candidate::new(info.rect, info.name.clone()))
            .collect()
    }
}
