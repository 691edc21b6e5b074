//! Owned action builders (ISO 32000-1 Section 12.6)

use crate::actions::destination::Destination;
use crate::objects::{Array, Dictionary, Object, PdfString};

/// Value of an action dictionary's `S` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    GoTo,
    GoToR,
    GoToE,
    Launch,
    Thread,
    URI,
    Sound,
    Movie,
    Hide,
    Named,
    SubmitForm,
    ResetForm,
    ImportData,
    JavaScript,
    SetOCGState,
    Rendition,
    Trans,
    GoTo3DView,
}

const ACTION_TYPES: [ActionType; 18] = [
    ActionType::GoTo,
    ActionType::GoToR,
    ActionType::GoToE,
    ActionType::Launch,
    ActionType::Thread,
    ActionType::URI,
    ActionType::Sound,
    ActionType::Movie,
    ActionType::Hide,
    ActionType::Named,
    ActionType::SubmitForm,
    ActionType::ResetForm,
    ActionType::ImportData,
    ActionType::JavaScript,
    ActionType::SetOCGState,
    ActionType::Rendition,
    ActionType::Trans,
    ActionType::GoTo3DView,
];

impl ActionType {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ActionType::GoTo => "GoTo",
            ActionType::GoToR => "GoToR",
            ActionType::GoToE => "GoToE",
            ActionType::Launch => "Launch",
            ActionType::Thread => "Thread",
            ActionType::URI => "URI",
            ActionType::Sound => "Sound",
            ActionType::Movie => "Movie",
            ActionType::Hide => "Hide",
            ActionType::Named => "Named",
            ActionType::SubmitForm => "SubmitForm",
            ActionType::ResetForm => "ResetForm",
            ActionType::ImportData => "ImportData",
            ActionType::JavaScript => "JavaScript",
            ActionType::SetOCGState => "SetOCGState",
            ActionType::Rendition => "Rendition",
            ActionType::Trans => "Trans",
            ActionType::GoTo3DView => "GoTo3DView",
        }
    }

    /// Parses an `S` value. Unknown names give `None`.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        ACTION_TYPES
            .iter()
            .copied()
            .find(|action_type| action_type.pdf_name() == name)
    }
}

/// Type-specific part of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    GoTo {
        destination: Destination,
    },
    GoToR {
        file: String,
        destination: Option<Destination>,
        new_window: Option<bool>,
    },
    URI {
        uri: String,
        is_map: bool,
    },
    Named {
        name: String,
    },
    Launch {
        file: String,
        parameters: Option<String>,
        new_window: Option<bool>,
    },
}

/// An action together with the actions to run after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub next: Vec<Action>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            next: Vec::new(),
        }
    }

    pub fn goto(destination: Destination) -> Self {
        Self::new(ActionKind::GoTo { destination })
    }

    pub fn goto_remote(file: impl Into<String>, destination: Option<Destination>) -> Self {
        Self::new(ActionKind::GoToR {
            file: file.into(),
            destination,
            new_window: None,
        })
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self::new(ActionKind::URI {
            uri: uri.into(),
            is_map: false,
        })
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(ActionKind::Named { name: name.into() })
    }

    pub fn launch(file: impl Into<String>) -> Self {
        Self::new(ActionKind::Launch {
            file: file.into(),
            parameters: None,
            new_window: None,
        })
    }

    /// Appends an action to run after this one.
    pub fn with_next(mut self, next: Action) -> Self {
        self.next.push(next);
        self
    }

    pub fn action_type(&self) -> ActionType {
        match self.kind {
            ActionKind::GoTo { .. } => ActionType::GoTo,
            ActionKind::GoToR { .. } => ActionType::GoToR,
            ActionKind::URI { .. } => ActionType::URI,
            ActionKind::Named { .. } => ActionType::Named,
            ActionKind::Launch { .. } => ActionType::Launch,
        }
    }

    /// Builds the action dictionary. A single follow-up action is written as
    /// a dictionary under `Next`, several as an array.
    pub fn to_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Action"));
        dict.set("S", Object::name(self.action_type().pdf_name()));

        match &self.kind {
            ActionKind::GoTo { destination } => {
                dict.set("D", destination.to_object());
            }
            ActionKind::GoToR {
                file,
                destination,
                new_window,
            } => {
                dict.set("F", file.as_str());
                if let Some(dest) = destination {
                    dict.set("D", dest.to_object());
                }
                if let Some(new_window) = new_window {
                    dict.set("NewWindow", *new_window);
                }
            }
            ActionKind::URI { uri, is_map } => {
                // URIs are 7-bit ASCII, never re-encoded
                dict.set("URI", PdfString::new(uri.as_bytes()));
                if *is_map {
                    dict.set("IsMap", true);
                }
            }
            ActionKind::Named { name } => {
                dict.set("N", Object::name(name.as_str()));
            }
            ActionKind::Launch {
                file,
                parameters,
                new_window,
            } => {
                dict.set("F", file.as_str());
                if let Some(parameters) = parameters {
                    dict.set("P", parameters.as_str());
                }
                if let Some(new_window) = new_window {
                    dict.set("NewWindow", *new_window);
                }
            }
        }

        match self.next.as_slice() {
            [] => {}
            [single] => dict.set("Next", single.to_dict()),
            many => dict.set(
                "Next",
                many.iter()
                    .map(|action| Object::Dictionary(action.to_dict()))
                    .collect::<Array>(),
            ),
        }

        dict
    }
}

impl From<Action> for Object {
    fn from(action: Action) -> Self {
        Object::Dictionary(action.to_dict())
    }
}
