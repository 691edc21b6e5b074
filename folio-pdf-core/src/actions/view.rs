use crate::actions::action::ActionType;
use crate::error::{PdfError, Result};
use crate::objects::{Array, Dictionary, Object, PdfString};
use crate::views::{dictionary_view, PdfObjectWrapper};

dictionary_view! {
    /// View over an action dictionary that already lives in the graph.
    pub struct ActionView;
}

impl ActionView<'_> {
    /// Creates an empty action dictionary of the given type.
    pub fn create(action_type: ActionType) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Action"));
        dict.set("S", Object::name(action_type.pdf_name()));
        dict
    }

    /// `None` when `S` is missing or names an action this crate does not know.
    pub fn action_type(&self) -> Option<ActionType> {
        self.dict
            .get_name("S")
            .and_then(|name| name.as_str())
            .and_then(ActionType::from_pdf_name)
    }

    pub fn uri(&self) -> Option<String> {
        self.dict
            .get_string("URI")
            .map(|uri| String::from_utf8_lossy(uri.as_bytes()).into_owned())
    }

    /// Turns the action into a URI action pointing at `uri`.
    pub fn set_uri(&mut self, uri: &str) -> &mut Self {
        self.put("S", Object::name(ActionType::URI.pdf_name()))
            .put("URI", PdfString::new(uri.as_bytes()))
    }

    /// The `D` entry of go-to actions.
    pub fn destination(&self) -> Option<&Object> {
        self.dict.get("D")
    }

    pub fn set_destination(&mut self, destination: impl Into<Object>) -> &mut Self {
        self.put("D", destination)
    }

    /// Follow-up actions in order. `Next` may hold one dictionary or an
    /// array of them; anything else is ignored.
    pub fn next(&self) -> Vec<&Dictionary> {
        match self.dict.get("Next") {
            Some(Object::Dictionary(next)) => vec![next],
            Some(Object::Array(next)) => next.iter().filter_map(Object::as_dict).collect(),
            _ => Vec::new(),
        }
    }

    /// Appends a follow-up action. The first one is stored as a dictionary;
    /// the second turns `Next` into an array.
    pub fn add_next(&mut self, action: Dictionary) -> Result<&mut Self> {
        match self.dict.get_mut("Next") {
            None => self.dict.set("Next", action),
            Some(Object::Array(chain)) => chain.push(action),
            Some(next @ Object::Dictionary(_)) => {
                let first = std::mem::replace(next, Object::Null);
                *next = Object::Array(Array::from(vec![first, Object::Dictionary(action)]));
            }
            Some(other) => {
                return Err(PdfError::WrongObjectKind {
                    key: "Next".to_string(),
                    expected: "dictionary or array",
                    found: other.kind().as_str(),
                })
            }
        }
        Ok(self)
    }
}
