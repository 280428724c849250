//! Platform-neutral message model: text, embeds and interactive component
//! rows. A chat client maps these onto its own widgets.

use core::fmt;

use serde::Serialize;

use crate::codec::{encode, fence, CodecError};
use crate::domain::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
    pub default: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption {
            label: label.into(),
            value: value.into(),
            description: None,
            default: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_if(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Component {
    Button {
        id: String,
        label: String,
        style: ButtonStyle,
        disabled: bool,
    },
    Link {
        label: String,
        url: String,
    },
    Select {
        id: String,
        options: Vec<SelectOption>,
        disabled: bool,
    },
}

impl Component {
    pub fn button(id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Component::Button {
            id: id.into(),
            label: label.into(),
            style,
            disabled: false,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Component::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Disable a button or menu; links are unaffected.
    pub fn disabled(mut self, value: bool) -> Self {
        match &mut self {
            Component::Button { disabled, .. } | Component::Select { disabled, .. } => {
                *disabled = value
            }
            Component::Link { .. } => {}
        }
        self
    }

    /// Custom id sent back when the component is used.
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::Button { id, .. } | Component::Select { id, .. } => Some(id),
            Component::Link { .. } => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Component::Button { disabled, .. } | Component::Select { disabled, .. } => *disabled,
            Component::Link { .. } => false,
        }
    }
}

pub type ActionRow = Vec<Component>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
}

/// What a variant draws for its current state. The token is added later by
/// [`Render::into_view`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Render {
    /// Text in front of the token block.
    pub lead: String,
    /// Text inside the token block, after the title.
    pub header: String,
    /// Text after the token block.
    pub body: String,
    pub embeds: Vec<Embed>,
    pub rows: Vec<ActionRow>,
}

impl Render {
    /// Encode `state` and lay out the finished public message.
    pub fn into_view(self, state: &GameState, title: &str) -> Result<View, CodecError> {
        let token = encode(state)?;
        Ok(View {
            content: format!("{}{}{}", self.lead, fence(&token, title, &self.header), self.body),
            embeds: self.embeds,
            rows: self.rows,
        })
    }
}

/// A complete outgoing message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub content: String,
    pub embeds: Vec<Embed>,
    pub rows: Vec<ActionRow>,
}

impl View {
    pub fn text(content: impl Into<String>) -> Self {
        View {
            content: content.into(),
            ..View::default()
        }
    }

    pub fn with_rows(mut self, rows: Vec<ActionRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Every component, row by row.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.rows.iter().flatten()
    }

    /// Ids of components that can still be used.
    pub fn enabled_ids(&self) -> Vec<&str> {
        self.components()
            .filter(|c| !c.is_disabled())
            .filter_map(Component::id)
            .collect()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.content)?;
        for embed in &self.embeds {
            writeln!(f, "== {} ==", embed.title)?;
            writeln!(f, "{}", embed.description)?;
        }
        for row in &self.rows {
            let mut line = Vec::with_capacity(row.len());
            for component in row {
                line.push(match component {
                    Component::Button {
                        id,
                        label,
                        disabled,
                        ..
                    } => {
                        if *disabled {
                            format!("({} {})", id, label)
                        } else {
                            format!("[{} {}]", id, label)
                        }
                    }
                    Component::Link { label, url } => format!("<{}: {}>", label, url),
                    Component::Select {
                        id,
                        options,
                        disabled,
                    } => {
                        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                        let mark = if *disabled { "disabled " } else { "" };
                        format!("{{{} {}select {}}}", id, mark, values.join(","))
                    }
                });
            }
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
