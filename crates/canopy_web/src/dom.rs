//! `DomPort` over the live browser document.

use canopy_core::{DomError, DomPort, DomResult, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Browser document handle.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Uses `window.document`.
    pub fn from_window() -> DomResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DomError::Host("no window.document available".to_string()))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

pub(crate) fn host_error(err: JsValue) -> DomError {
    DomError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn html_element(node: &Element) -> DomResult<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
        .ok_or_else(|| DomError::NotAnElement(node.tag_name()))
}

impl DomPort for WebDom {
    type Node = Element;

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&mut self, tag: &str) -> DomResult<Element> {
        self.document.create_element(tag).map_err(host_error)
    }

    fn query_all(&self, selector: Selector<'_>) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(&selector.to_css()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> DomResult<()> {
        parent.append_child(child).map(|_| ()).map_err(host_error)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> DomResult<()> {
        node.set_attribute(name, value).map_err(host_error)
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) -> DomResult<()> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) -> DomResult<()> {
        node.set_inner_html(html);
        Ok(())
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) -> DomResult<()> {
        node.class_list().add_1(class).map_err(host_error)
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> DomResult<()> {
        node.class_list().remove_1(class).map_err(host_error)
    }

    fn toggle_class(&mut self, node: &Element, class: &str) -> DomResult<bool> {
        node.class_list().toggle(class).map_err(host_error)
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        html_element(node)
            .ok()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> DomResult<()> {
        let style = html_element(node)?.style();
        if value.is_empty() {
            style.remove_property(property).map(|_| ()).map_err(host_error)
        } else {
            style.set_property(property, value).map_err(host_error)
        }
    }

    fn previous_element_sibling(&self, node: &Element) -> Option<Element> {
        node.previous_element_sibling()
    }

    fn field_value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn reset_form(&mut self, form: &Element) -> DomResult<()> {
        form.dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| DomError::NotAnElement(form.tag_name()))?
            .reset();
        Ok(())
    }
}
