//! Interaction state of one update menu.
//!
//! The menu is either collapsed (only the header is shown) or expanded (the button list is shown
//! below the header). Clicking the header toggles between the two. Clicking a button makes it
//! active, collapses the list and yields the [`MethodCall`] the host should run. Hovering a
//! button highlights it until the pointer leaves, independently of which button is active.

use crate::chart::MethodCall;
use crate::model::MenuOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Appended to the active label in the header.
pub const HEADER_SUFFIX: &str = "  ▼";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fold {
    #[default]
    Collapsed,
    Expanded,
}

impl Fold {
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn buttons_visible(self) -> bool {
        self == Self::Expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum MenuEvent {
    HeaderClick,
    ButtonClick(usize),
    ButtonEnter(usize),
    ButtonLeave(usize),
}

/// How a button's rect is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVisual {
    Normal,
    Active,
    Hovered,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    fold: Fold,
    /// The button the user picked. `None` until the first selection.
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&self) -> Fold {
        self.fold
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The button shown in the header.
    ///
    /// Before any selection (or after the button list shrank below the selection) this is the
    /// first button. An empty menu has no active button.
    pub fn active_index(&self, button_count: usize) -> Option<usize> {
        if button_count == 0 {
            return None;
        }
        Some(self.selected.filter(|&i| i < button_count).unwrap_or(0))
    }

    /// Drops indices that no longer point at a button. Called once per render.
    pub fn sync(&mut self, button_count: usize) {
        if self.selected.is_some_and(|i| i >= button_count) {
            tracing::debug!(
                selected = ?self.selected,
                button_count,
                "updatemenu: selected button vanished; falling back to the first button"
            );
            self.selected = None;
        }
        if self.hovered.is_some_and(|i| i >= button_count) {
            self.hovered = None;
        }
    }

    pub fn toggle(&mut self) -> Fold {
        self.fold = self.fold.toggled();
        self.hovered = None;
        tracing::debug!(fold = ?self.fold, "updatemenu: header toggled");
        self.fold
    }

    pub fn select(&mut self, index: usize, options: &MenuOptions) -> Result<MethodCall> {
        let Some(button) = options.buttons.get(index) else {
            return Err(Error::ButtonOutOfRange {
                index,
                len: options.buttons.len(),
            });
        };

        self.selected = Some(index);
        self.fold = Fold::Collapsed;
        self.hovered = None;
        tracing::debug!(index, label = %button.label, "updatemenu: button selected");

        Ok(MethodCall::for_button(index, button))
    }

    /// Hidden buttons cannot be hovered; the event is ignored while collapsed.
    pub fn hover_enter(&mut self, index: usize) {
        if self.fold.buttons_visible() {
            self.hovered = Some(index);
        }
    }

    /// Only clears the highlight if it belongs to `index`.
    pub fn hover_leave(&mut self, index: usize) {
        if self.hovered == Some(index) {
            self.hovered = None;
        }
    }

    pub fn apply(&mut self, event: MenuEvent, options: &MenuOptions) -> Result<Option<MethodCall>> {
        match event {
            MenuEvent::HeaderClick => {
                self.toggle();
                Ok(None)
            }
            MenuEvent::ButtonClick(i) => self.select(i, options).map(Some),
            MenuEvent::ButtonEnter(i) => {
                check_index(i, options)?;
                self.hover_enter(i);
                Ok(None)
            }
            MenuEvent::ButtonLeave(i) => {
                check_index(i, options)?;
                self.hover_leave(i);
                Ok(None)
            }
        }
    }

    pub fn button_visual(&self, index: usize, button_count: usize) -> ButtonVisual {
        if self.hovered == Some(index) {
            ButtonVisual::Hovered
        } else if self.active_index(button_count) == Some(index) {
            ButtonVisual::Active
        } else {
            ButtonVisual::Normal
        }
    }

    /// The header text: the active button's label plus [`HEADER_SUFFIX`].
    pub fn header_label(&self, options: &MenuOptions) -> Option<String> {
        let i = self.active_index(options.buttons.len())?;
        Some(format!("{}{HEADER_SUFFIX}", options.buttons[i].label))
    }
}

fn check_index(index: usize, options: &MenuOptions) -> Result<()> {
    if index >= options.buttons.len() {
        return Err(Error::ButtonOutOfRange {
            index,
            len: options.buttons.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Method;
    use crate::model::Button;
    use serde_json::json;

    fn menu(labels: &[&str]) -> MenuOptions {
        MenuOptions::with_buttons(
            labels
                .iter()
                .map(|l| Button::new(*l, Method::Restyle, vec![json!("visible"), json!(*l)]))
                .collect(),
        )
    }

    #[test]
    fn starts_collapsed_with_first_button_active() {
        let opts = menu(&["a", "b"]);
        let st = MenuState::new();
        assert_eq!(st.fold(), Fold::Collapsed);
        assert_eq!(st.active_index(opts.buttons.len()), Some(0));
        assert_eq!(st.header_label(&opts).as_deref(), Some("a  ▼"));
    }

    #[test]
    fn header_click_twice_restores_visibility() {
        let opts = menu(&["a"]);
        let mut st = MenuState::new();
        let before = st.fold();
        st.apply(MenuEvent::HeaderClick, &opts).unwrap();
        assert!(st.fold().buttons_visible());
        st.apply(MenuEvent::HeaderClick, &opts).unwrap();
        assert_eq!(st.fold(), before);
    }

    #[test]
    fn selecting_collapses_and_returns_method_call() {
        let opts = menu(&["a", "b", "c"]);
        let mut st = MenuState::new();
        st.toggle();

        let call = st
            .apply(MenuEvent::ButtonClick(2), &opts)
            .unwrap()
            .expect("method call");

        assert_eq!(call.button, 2);
        assert_eq!(call.method, Method::Restyle);
        assert_eq!(call.args[1], json!("c"));
        assert_eq!(st.fold(), Fold::Collapsed);
        assert_eq!(st.active_index(3), Some(2));
        assert_eq!(st.header_label(&opts).as_deref(), Some("c  ▼"));
    }

    #[test]
    fn exactly_one_active_button_for_any_selection() {
        let opts = menu(&["a", "b", "c", "d"]);
        for pick in 0..4 {
            let mut st = MenuState::new();
            st.select(pick, &opts).unwrap();
            let active = (0..4)
                .filter(|&i| st.button_visual(i, 4) == ButtonVisual::Active)
                .count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn hover_is_independent_of_active_and_reverts() {
        let opts = menu(&["a", "b"]);
        let mut st = MenuState::new();
        st.toggle();

        st.apply(MenuEvent::ButtonEnter(0), &opts).unwrap();
        assert_eq!(st.button_visual(0, 2), ButtonVisual::Hovered);
        assert_eq!(st.active_index(2), Some(0));

        st.apply(MenuEvent::ButtonLeave(1), &opts).unwrap();
        assert_eq!(st.button_visual(0, 2), ButtonVisual::Hovered);

        st.apply(MenuEvent::ButtonLeave(0), &opts).unwrap();
        assert_eq!(st.button_visual(0, 2), ButtonVisual::Active);
        assert_eq!(st.button_visual(1, 2), ButtonVisual::Normal);
    }

    #[test]
    fn hover_while_collapsed_does_not_survive_expansion() {
        let opts = menu(&["a", "b"]);
        let mut st = MenuState::new();

        st.apply(MenuEvent::ButtonEnter(1), &opts).unwrap();
        assert_eq!(st.hovered(), None);

        st.apply(MenuEvent::HeaderClick, &opts).unwrap();
        assert_eq!(st.fold(), Fold::Expanded);
        assert_eq!(st.button_visual(1, 2), ButtonVisual::Normal);
    }

    #[test]
    fn expanding_clears_a_leftover_hover() {
        let mut st: MenuState = serde_json::from_value(json!({
            "fold": "collapsed",
            "selected": null,
            "hovered": 1
        }))
        .unwrap();
        assert_eq!(st.toggle(), Fold::Expanded);
        assert_eq!(st.hovered(), None);
        assert_eq!(st.button_visual(1, 2), ButtonVisual::Normal);
    }

    #[test]
    fn hover_events_reject_unknown_buttons() {
        let opts = menu(&["a", "b"]);
        let mut st = MenuState::new();
        st.toggle();
        for event in [MenuEvent::ButtonEnter(2), MenuEvent::ButtonLeave(2)] {
            let err = st.apply(event, &opts).unwrap_err();
            assert!(matches!(err, Error::ButtonOutOfRange { index: 2, len: 2 }));
        }
    }

    #[test]
    fn out_of_range_selection_is_an_error_and_keeps_state() {
        let opts = menu(&["a"]);
        let mut st = MenuState::new();
        let err = st.select(3, &opts).unwrap_err();
        assert!(matches!(err, Error::ButtonOutOfRange { index: 3, len: 1 }));
        assert_eq!(st, MenuState::new());
    }

    #[test]
    fn sync_forgets_stale_selection() {
        let opts = menu(&["a", "b", "c"]);
        let mut st = MenuState::new();
        st.select(2, &opts).unwrap();
        st.sync(2);
        assert_eq!(st.selected(), None);
        assert_eq!(st.active_index(2), Some(0));
        assert_eq!(st.active_index(0), None);
    }

    #[test]
    fn events_serialize_with_kind_tag() {
        let v = serde_json::to_value(MenuEvent::ButtonClick(1)).unwrap();
        assert_eq!(v, json!({ "kind": "button_click", "index": 1 }));
    }
}
