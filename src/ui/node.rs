//! src/ui/node.rs
//!
//! Recursive layout Node + Panel trait used across the UI.
//!
//! The tree is rebuilt every frame; leaves borrow the analysis they draw, so a
//! `Node<'a>` never outlives the data behind it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Node tree used to compose the UI each frame.
pub enum Node<'a> {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node<'a>>,
    },
    Leaf {
        panel: Box<dyn Panel + 'a>,
    },
}

impl<'a> Node<'a> {
    /// Draw the node into the given area.
    ///
    /// Children beyond the number of constraints are not drawn.
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf { panel } => {
                panel.draw(f, area);
            }
        }
    }
}

/// Helper: create a group node.
pub fn group<'a>(
    direction: Direction,
    constraints: Vec<Constraint>,
    children: Vec<Node<'a>>,
) -> Node<'a> {
    Node::Group {
        direction,
        constraints,
        children,
    }
}

/// Helper: create a leaf node from any panel.
pub fn leaf<'a, P: Panel + 'a>(panel: P) -> Node<'a> {
    Node::Leaf {
        panel: Box::new(panel),
    }
}

/// Helper: children side by side, sharing the width equally.
pub fn row(children: Vec<Node<'_>>) -> Node<'_> {
    let n = children.len().max(1) as u32;
    let constraints = (0..children.len()).map(|_| Constraint::Ratio(1, n)).collect();
    group(Direction::Horizontal, constraints, children)
}
