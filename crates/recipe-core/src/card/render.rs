//! Pure projection of a recipe and its card state into a [`Node`] tree.
//!
//! Nothing here reads the store; every input arrives already resolved.

use super::action::{CardAction, PageDelta, PageDimension};
use super::pagination::{can_go_back, can_go_forward, page_range};
use super::state::{ActiveView, CardState};
use super::view::{Icon, Node, ResizeMode, TextStyle};
use crate::domain::Recipe;

/// Where a card is in its mount lifecycle.
#[derive(Debug, Clone, Copy)]
pub enum CardLoad<'a> {
    Loading,
    Failed(&'a str),
    Ready {
        recipe: &'a Recipe,
        state: &'a CardState,
        viewer: Option<&'a str>,
    },
}

impl CardLoad<'_> {
    pub fn render(&self) -> Node {
        match self {
            CardLoad::Loading => Node::text("Loading...", TextStyle::Body),
            CardLoad::Failed(message) => Node::text(format!("Error: {message}"), TextStyle::Error),
            CardLoad::Ready {
                recipe,
                state,
                viewer,
            } => render_card(recipe, state, *viewer),
        }
    }
}

/// Placeholder shown by the host before the card has mounted.
pub fn loading_preview() -> Node {
    Node::VStack {
        children: vec![Node::text("Loading...", TextStyle::Body)],
    }
}

pub fn render_card(recipe: &Recipe, state: &CardState, viewer: Option<&str>) -> Node {
    let ingredients = recipe.ingredient_lines();
    let steps = recipe.instruction_lines();

    let mut left = vec![
        intro_banner(&recipe.intro),
        Node::text("Ingredients:", TextStyle::Heading),
        format_ingredients(&ingredients, state.ingredients_page),
    ];
    if !steps.is_empty() {
        let label = match state.active_view {
            ActiveView::Picture => "Instructions",
            ActiveView::Instructions => "Picture",
        };
        left.push(Node::button(label, None, CardAction::ToggleView));
    }

    let right = match state.active_view {
        ActiveView::Instructions => Node::VStack {
            children: vec![
                Node::text("Directions:", TextStyle::Heading),
                format_instructions(&steps, state.instructions_page, &state.acknowledged_steps),
            ],
        },
        ActiveView::Picture => Node::Image {
            url: recipe.picture_url.clone(),
            description: recipe.title.clone(),
            resize: ResizeMode::Cover,
        },
    };

    let body = Node::VStack {
        children: vec![
            Node::HStack {
                children: vec![Node::VStack { children: left }, right],
            },
            link_line(&recipe.link),
            Node::button("Menu", Some(Icon::Menu), CardAction::ToggleMenu),
        ],
    };

    let mut layers = vec![body];
    if state.menu_open {
        layers.push(Node::Backdrop {
            on_press: CardAction::DismissMenu,
        });
        layers.push(menu(recipe, state, viewer));
    }
    Node::ZStack { children: layers }
}

fn intro_banner(intro: &str) -> Node {
    if intro.is_empty() {
        Node::Empty
    } else {
        Node::text(intro, TextStyle::Banner)
    }
}

fn link_line(link: &str) -> Node {
    if link.is_empty() {
        return Node::Empty;
    }
    Node::Pressable {
        on_press: CardAction::OpenLink,
        child: Box::new(Node::text(link, TextStyle::Link)),
    }
}

fn menu(recipe: &Recipe, state: &CardState, viewer: Option<&str>) -> Node {
    let mut entries = Vec::new();
    if recipe.is_author(viewer) {
        entries.push(Node::button("Edit", Some(Icon::Edit), CardAction::Edit));
    }
    entries.push(Node::button("New", Some(Icon::New), CardAction::New));
    if viewer.is_some() {
        entries.push(if state.saved {
            Node::button("Unsave", Some(Icon::Saved), CardAction::Unsave)
        } else {
            Node::button("Save", Some(Icon::Save), CardAction::Save)
        });
    }
    Node::VStack { children: entries }
}

fn pager(dimension: PageDimension, delta: PageDelta) -> Node {
    let (label, icon) = match delta {
        PageDelta::Previous => ("Up", Icon::Up),
        PageDelta::Next => ("Down", Icon::Down),
    };
    Node::button(label, Some(icon), CardAction::Paginate { dimension, delta })
}

/// Current ingredients page, each line bulleted, with pagers only where they lead somewhere.
pub fn format_ingredients(lines: &[&str], page: usize) -> Node {
    let dimension = PageDimension::Ingredients;
    let size = dimension.page_size();
    let mut children = Vec::new();

    if can_go_back(page) {
        children.push(pager(dimension, PageDelta::Previous));
    }
    for line in &lines[page_range(page, size, lines.len())] {
        children.push(Node::text(format!("- {line}"), TextStyle::Body));
    }
    if can_go_forward(page, size, lines.len()) {
        children.push(pager(dimension, PageDelta::Next));
    }
    Node::VStack { children }
}

/// Current instructions page. Step numbers count from the first line of the recipe.
pub fn format_instructions(lines: &[&str], page: usize, acknowledged: &[bool]) -> Node {
    let dimension = PageDimension::Instructions;
    let size = dimension.page_size();
    let mut children = Vec::new();

    if can_go_back(page) {
        children.push(pager(dimension, PageDelta::Previous));
    }
    for index in page_range(page, size, lines.len()) {
        let done = acknowledged.get(index).copied().unwrap_or(false);
        children.push(Node::Pressable {
            on_press: CardAction::AcknowledgeStep { index },
            child: Box::new(Node::text(
                format!("{}. {}", index + 1, lines[index]),
                TextStyle::Step { acknowledged: done },
            )),
        });
    }
    if can_go_forward(page, size, lines.len()) {
        children.push(pager(dimension, PageDelta::Next));
    }
    Node::VStack { children }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(prefix: &str, n: usize) -> String {
        (1..=n)
            .map(|i| format!("{prefix}{i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn recipe() -> Recipe {
        Recipe {
            title: "Stew".into(),
            picture_url: "https://media/stew.png".into(),
            intro: "Serves 4".into(),
            ingredients: numbered("i", 23),
            instructions: numbered("s", 12),
            link: "https://example.com/stew".into(),
            author: "t2_cook".into(),
        }
    }

    fn has_action(node: &Node, action: &CardAction) -> bool {
        node.actions().into_iter().any(|a| a == action)
    }

    #[test]
    fn test_ingredients_page_slices_and_guards() {
        let text = numbered("i", 23);
        let lines: Vec<&str> = text.split('\n').collect();
        let next = CardAction::Paginate {
            dimension: PageDimension::Ingredients,
            delta: PageDelta::Next,
        };
        let prev = CardAction::Paginate {
            dimension: PageDimension::Ingredients,
            delta: PageDelta::Previous,
        };

        for page in 0..3 {
            let node = format_ingredients(&lines, page);
            let expected: Vec<String> = lines[page_range(page, 10, lines.len())]
                .iter()
                .map(|l| format!("- {l}"))
                .collect();
            assert_eq!(node.texts(), expected);
            assert_eq!(has_action(&node, &next), (page + 1) * 10 < lines.len());
            assert_eq!(has_action(&node, &prev), page > 0);
        }
    }

    #[test]
    fn test_exactly_full_page_has_no_next() {
        let text = numbered("i", 10);
        let lines: Vec<&str> = text.split('\n').collect();
        let node = format_ingredients(&lines, 0);
        assert_eq!(node.texts().len(), 10);
        assert!(node.actions().is_empty());
    }

    #[test]
    fn test_step_numbers_are_global() {
        let text = numbered("s", 20);
        let lines: Vec<&str> = text.split('\n').collect();
        let acks = vec![false; lines.len()];

        for page in 0..3 {
            let node = format_instructions(&lines, page, &acks);
            for (i, text) in node.texts().into_iter().enumerate() {
                let number = page * 8 + i + 1;
                assert_eq!(text, format!("{number}. s{number}"));
            }
        }
    }

    #[test]
    fn test_acknowledged_step_style() {
        let lines = vec!["Boil", "Season"];
        let node = format_instructions(&lines, 0, &[false, true]);
        let styles: Vec<TextStyle> = node
            .walk()
            .into_iter()
            .filter_map(|n| match n {
                Node::Text { style, .. } => Some(*style),
                _ => None,
            })
            .collect();
        assert_eq!(
            styles,
            vec![
                TextStyle::Step { acknowledged: false },
                TextStyle::Step { acknowledged: true }
            ]
        );
    }

    #[test]
    fn test_picture_view_by_default() {
        let recipe = recipe();
        let state = CardState::new(&recipe, false);
        let node = render_card(&recipe, &state, None);

        assert!(node.walk().iter().any(|n| matches!(n, Node::Image { .. })));
        assert!(!node.texts().contains(&"Directions:"));
        assert!(node.texts().contains(&"Serves 4"));
        assert!(node.button_labels().contains(&"Instructions"));
    }

    #[test]
    fn test_instructions_view() {
        let recipe = recipe();
        let state = CardState {
            active_view: ActiveView::Instructions,
            ..CardState::new(&recipe, false)
        };
        let node = render_card(&recipe, &state, None);

        assert!(!node.walk().iter().any(|n| matches!(n, Node::Image { .. })));
        assert!(node.texts().contains(&"1. s1"));
        assert!(node.button_labels().contains(&"Picture"));
    }

    #[test]
    fn test_optional_sections_hidden_when_empty() {
        let recipe = Recipe {
            title: "Toast".into(),
            ingredients: "Bread".into(),
            ..Default::default()
        };
        let state = CardState::new(&recipe, false);
        let node = render_card(&recipe, &state, None);

        assert_eq!(node.texts(), vec!["Ingredients:", "- Bread"]);
        assert!(!has_action(&node, &CardAction::OpenLink));
        assert!(!has_action(&node, &CardAction::ToggleView));
    }

    #[test]
    fn test_menu_entries_follow_viewer() {
        let recipe = recipe();
        let open = CardState {
            menu_open: true,
            ..CardState::new(&recipe, false)
        };

        let closed = render_card(&recipe, &CardState::new(&recipe, false), Some("t2_cook"));
        assert!(!closed.button_labels().contains(&"New"));

        let author = render_card(&recipe, &open, Some("t2_cook"));
        assert!(has_action(&author, &CardAction::DismissMenu));
        let labels = author.button_labels();
        assert!(labels.contains(&"Edit"));
        assert!(labels.contains(&"New"));
        assert!(labels.contains(&"Save"));

        let guest = render_card(&recipe, &open, Some("t2_guest"));
        assert!(!guest.button_labels().contains(&"Edit"));

        let anonymous = render_card(&recipe, &open, None);
        assert!(!anonymous.button_labels().contains(&"Save"));

        let saved = CardState { saved: true, ..open };
        let node = render_card(&recipe, &saved, Some("t2_guest"));
        assert!(node.button_labels().contains(&"Unsave"));
        assert!(!node.button_labels().contains(&"Save"));
    }

    #[test]
    fn test_load_projections() {
        assert_eq!(CardLoad::Loading.render().texts(), vec!["Loading..."]);
        assert_eq!(
            CardLoad::Failed("Recipe not found").render().texts(),
            vec!["Error: Recipe not found"]
        );
    }
}
