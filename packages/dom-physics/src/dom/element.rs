use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, Node};

use crate::core::Vec2;
use crate::sync::{ContainerSize, VisualNode};

impl VisualNode for HtmlElement {
    fn size(&self) -> Vec2 {
        // Layout size, unaffected by the transform we write
        Vec2::new(self.offset_width() as f32, self.offset_height() as f32)
    }

    fn is_attached(&self) -> bool {
        self.parent_node().is_some()
    }

    fn set_transform(&self, transform: &str) {
        if let Err(e) = self.style().set_property("transform", transform) {
            log::warn!("failed to set transform: {:?}", e);
        }
    }

    fn remove_from_document(&self) {
        if self.parent_node().is_some() {
            self.remove();
        }
    }

    fn same_node(&self, other: &Self) -> bool {
        let other: &Node = other.as_ref();
        self.is_same_node(Some(other))
    }
}

/// Client size of the container (excludes borders and scrollbars)
pub fn container_size(container: &HtmlElement) -> ContainerSize {
    ContainerSize::new(container.client_width() as f32, container.client_height() as f32)
}

/// Pointer position of `event` relative to the container's padding box, the
/// same box the walls are laid out in.
pub fn pointer_position(container: &HtmlElement, event: &Event) -> Option<Vec2> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let rect = container.get_bounding_client_rect();
    Some(to_padding_box(
        Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(container.client_left() as f32, container.client_top() as f32),
    ))
}

/// `border_origin` is the top-left of the border box in viewport space and
/// `border` the left/top border widths.
fn to_padding_box(client: Vec2, border_origin: Vec2, border: Vec2) -> Vec2 {
    client - border_origin - border
}
