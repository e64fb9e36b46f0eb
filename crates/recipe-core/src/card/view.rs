//! Displayable node tree produced by the renderer.

use serde::Serialize;

use super::action::CardAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Body,
    Heading,
    Banner,
    /// A numbered instruction; acknowledged steps are shown struck through.
    Step { acknowledged: bool },
    Link,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Menu,
    Edit,
    New,
    Save,
    Saved,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    Cover,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    VStack {
        children: Vec<Node>,
    },
    HStack {
        children: Vec<Node>,
    },
    /// Children stacked on top of each other, last on top.
    ZStack {
        children: Vec<Node>,
    },
    Text {
        text: String,
        style: TextStyle,
    },
    Image {
        url: String,
        description: String,
        resize: ResizeMode,
    },
    Button {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<Icon>,
        on_press: CardAction,
    },
    /// Makes `child` respond to taps.
    Pressable {
        on_press: CardAction,
        child: Box<Node>,
    },
    /// Full-surface tap capture.
    Backdrop {
        on_press: CardAction,
    },
    Empty,
}

impl Node {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Node::Text {
            text: text.into(),
            style,
        }
    }

    pub fn button(label: impl Into<String>, icon: Option<Icon>, on_press: CardAction) -> Self {
        Node::Button {
            label: label.into(),
            icon,
            on_press,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::VStack { children } | Node::HStack { children } | Node::ZStack { children } => {
                children
            }
            Node::Pressable { child, .. } => std::slice::from_ref(child.as_ref()),
            _ => &[],
        }
    }

    /// Depth-first walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }

    /// Every text in the tree, in display order.
    pub fn texts(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|node| match node {
                Node::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every action reachable by tapping somewhere in the tree.
    pub fn actions(&self) -> Vec<&CardAction> {
        self.walk()
            .into_iter()
            .filter_map(|node| match node {
                Node::Button { on_press, .. }
                | Node::Pressable { on_press, .. }
                | Node::Backdrop { on_press } => Some(on_press),
                _ => None,
            })
            .collect()
    }

    /// Labels of every button in the tree.
    pub fn button_labels(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|node| match node {
                Node::Button { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}
