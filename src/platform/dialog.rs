//! `<dialog>` element driven by the session

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDialogElement};

use crate::error::BootError;
use crate::session::{Dialog, DialogContent};

const DIALOG_ID: &str = "dialog";
const TITLE_ID: &str = "dialog-title";
const ACTION_ID: &str = "dialog-action";
const VIEW_UNDER_ID: &str = "dialog-view-under";
const TRANSPARENT_CLASS: &str = "transparent";

/// The page's modal dialog
pub struct DomDialog {
    dialog: HtmlDialogElement,
    title: Element,
    action: Element,
    view_under: Element,
}

fn element(document: &Document, id: &'static str) -> Result<Element, BootError> {
    document
        .get_element_by_id(id)
        .ok_or(BootError::MissingElement(id))
}

impl DomDialog {
    /// Look up the dialog elements and stop the browser closing it on Escape
    pub fn new(document: &Document) -> Result<Self, BootError> {
        let dialog: HtmlDialogElement = element(document, DIALOG_ID)?
            .dyn_into()
            .map_err(|_| BootError::WrongElementType(DIALOG_ID))?;

        // Escape reaches the session through keydown instead
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
        });
        let _ = dialog.add_event_listener_with_callback("cancel", closure.as_ref().unchecked_ref());
        closure.forget();

        Ok(Self {
            title: element(document, TITLE_ID)?,
            action: element(document, ACTION_ID)?,
            view_under: element(document, VIEW_UNDER_ID)?,
            dialog,
        })
    }

    pub fn action_button(&self) -> &Element {
        &self.action
    }

    pub fn view_under_button(&self) -> &Element {
        &self.view_under
    }

    /// Make the dialog see-through so the frozen scene shows
    pub fn toggle_view_under(&self) {
        let _ = self.dialog.class_list().toggle(TRANSPARENT_CLASS);
    }
}

impl Dialog for DomDialog {
    fn open(&mut self, content: &DialogContent) {
        self.title.set_text_content(Some(content.title));
        self.action.set_text_content(Some(content.button));
        let _ = self.dialog.class_list().remove_1(TRANSPARENT_CLASS);
        if self.dialog.open() {
            return;
        }
        if let Err(e) = self.dialog.show_modal() {
            log::warn!("Dialog show_modal failed: {:?}", e);
        }
    }

    fn close(&mut self) {
        self.dialog.close();
    }
}
