//! Headless page model
//!
//! A small stand-in for the browser DOM: elements live in an arena owned by
//! the [`Document`] and are addressed by [`ElementHandle`]. Controllers
//! resolve the handles they need once, when they bind, and mutate the
//! elements through them afterwards.

pub mod alert;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;

pub use alert::{Alert, AlertLevel};

/// Document shared between a page and its controllers
pub type SharedDocument = Arc<Mutex<Document>>;

/// Index of an element inside the document that created it.
///
/// Handles are only meaningful for the issuing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(usize);

/// CSS `display` states the controllers toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Default,
    Hidden,
    Inline,
}

/// Element node
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub display: Display,
    /// Shown state of a modal dialog
    pub open: bool,
    /// Alert currently rendered inside this element
    pub alert: Option<Alert>,
    parent: Option<ElementHandle>,
    children: Vec<ElementHandle>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space separated classes
    pub fn with_class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.classes.insert(c.to_string());
        }
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn is_visible(&self) -> bool {
        self.display != Display::Hidden
    }

    pub fn children(&self) -> &[ElementHandle] {
        &self.children
    }

    /// Markup of the rendered alert, empty when none is shown
    pub fn inner_html(&self) -> String {
        self.alert.as_ref().map(Alert::to_html).unwrap_or_default()
    }
}

/// In-memory page
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
    ids: HashMap<String, ElementHandle>,
    meta: HashMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    /// Equivalent of `<meta name="{name}" content="{content}">`
    pub fn set_meta(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.meta.insert(name.into(), content.into());
    }

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(String::as_str)
    }

    /// Insert `element` under `parent` (or at the top level) and return its handle.
    ///
    /// Ids keep their first owner, as `getElementById` does.
    pub fn append(&mut self, parent: Option<ElementHandle>, mut element: Element) -> ElementHandle {
        let handle = ElementHandle(self.elements.len());
        element.parent = parent;
        if let Some(id) = &element.id {
            self.ids.entry(id.clone()).or_insert(handle);
        }
        self.elements.push(element);
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(handle);
        }
        handle
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.ids.get(id).copied()
    }

    /// First element, in insertion order, carrying `class`
    pub fn query_by_class(&self, class: &str) -> Option<ElementHandle> {
        self.elements
            .iter()
            .position(|e| e.has_class(class))
            .map(ElementHandle)
    }

    pub fn element(&self, handle: ElementHandle) -> &Element {
        &self.elements[handle.0]
    }

    pub fn element_mut(&mut self, handle: ElementHandle) -> &mut Element {
        &mut self.elements[handle.0]
    }

    pub fn parent(&self, handle: ElementHandle) -> Option<ElementHandle> {
        self.element(handle).parent
    }

    /// Close a modal dialog. Returns `false` when it was not open.
    pub fn hide_modal(&mut self, handle: ElementHandle) -> bool {
        let modal = self.element_mut(handle);
        if !modal.open {
            return false;
        }
        modal.open = false;
        true
    }
}
