use crate::core::Vec2;
use crate::physics::BodyHandle;

/// What the synchronizer needs from a visual element.
///
/// Elements are shared references (not owned): cloning must yield a handle to
/// the same node, and `same_node` compares identity.
pub trait VisualNode: Clone {
    /// Rendered (untransformed) width/height in pixels
    fn size(&self) -> Vec2;

    /// Has a parent in the document tree
    fn is_attached(&self) -> bool;

    fn set_transform(&self, transform: &str);

    /// Detach from the document tree; no-op when already detached.
    fn remove_from_document(&self);

    fn same_node(&self, other: &Self) -> bool;
}

/// One simulated body and the element that mirrors it
#[derive(Clone, Debug)]
pub struct TrackedPair<E> {
    pub body: BodyHandle,
    pub element: E,
    /// Element size measured when tracking started
    pub size: Vec2,
}
