//! UI component primitives
//!
//! Each component is a plain props struct with a builder API. Props
//! serialize as camelCase JSON for the rendering layer, and every
//! component exposes `classes()` so the visual state is derivable
//! without rendering.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::classes::ClassList;

// ====== Button ======

/// Visual variant of a [`Button`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonVariant {
    /// Filled, high-emphasis
    #[default]
    Primary,
    /// Tonal, medium-emphasis
    Secondary,
    /// Bordered, low-emphasis
    Outline,
    /// No chrome until hovered
    Ghost,
    /// Destructive action
    Danger,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Secondary => "btn-secondary",
            Self::Outline => "btn-outline",
            Self::Ghost => "btn-ghost",
            Self::Danger => "btn-danger",
        }
    }
}

/// Size of a [`Button`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonSize {
    /// Compact
    Small,
    /// Default
    #[default]
    Medium,
    /// Prominent
    Large,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            Self::Small => "btn-sm",
            Self::Medium => "btn-md",
            Self::Large => "btn-lg",
        }
    }
}

/// Button props
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    /// Label text
    pub label: String,
    /// Visual variant
    #[serde(default)]
    pub variant: ButtonVariant,
    /// Size
    #[serde(default)]
    pub size: ButtonSize,
    /// Icon rendered before the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_icon: Option<String>,
    /// Icon rendered after the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_icon: Option<String>,
    /// Shows a spinner and suppresses interaction
    #[serde(default)]
    pub loading: bool,
    /// Suppresses interaction
    #[serde(default)]
    pub disabled: bool,
    /// Stretches to the container width
    #[serde(default)]
    pub full_width: bool,
    /// Extra classes appended after the computed ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl Button {
    /// Create a button with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    /// Set the visual variant
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size
    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Set the leading icon
    pub fn leading_icon(mut self, icon: impl Into<String>) -> Self {
        self.leading_icon = Some(icon.into());
        self
    }

    /// Set the trailing icon
    pub fn trailing_icon(mut self, icon: impl Into<String>) -> Self {
        self.trailing_icon = Some(icon.into());
        self
    }

    /// Set the loading state
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Stretch to the container width
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Append extra classes
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Whether the button accepts interaction
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Computed class string
    pub fn classes(&self) -> String {
        ClassList::new()
            .add("btn")
            .add(self.variant.class())
            .add(self.size.class())
            .add_if("btn-loading", self.loading)
            .add_if("btn-disabled", self.disabled && !self.loading)
            .add_if("w-full", self.full_width)
            .add_opt(self.class.clone())
            .merge()
    }
}

// ====== Badge ======

/// Small status label
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Label text
    pub label: String,
    /// Color tone, e.g. "success" or "warning"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl Badge {
    /// Create a badge with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), tone: None }
    }

    /// Set the color tone
    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Computed class string
    pub fn classes(&self) -> String {
        ClassList::new()
            .add("badge")
            .add_opt(self.tone.as_ref().map(|t| format!("badge-{t}")))
            .merge()
    }
}

// ====== Input ======

/// Text input props
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// Field name
    pub name: String,
    /// Current value
    #[serde(default)]
    pub value: String,
    /// Label shown above the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Validation error, switches the field to its error substate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Suppresses interaction
    #[serde(default)]
    pub disabled: bool,
}

impl Input {
    /// Create an input with the given field name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Set the current value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set a validation error
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the field is in its error substate
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Computed class string
    pub fn classes(&self) -> String {
        ClassList::new()
            .add("input")
            .add_if("input-error", self.has_error())
            .add_if("input-disabled", self.disabled)
            .merge()
    }
}

// ====== Card ======

/// Card header section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    /// Title text
    pub title: String,
    /// Subtitle text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl CardHeader {
    /// Create a header with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), subtitle: None }
    }

    /// Set the subtitle
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// Card body section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBody {
    /// Body content
    pub content: String,
}

impl CardBody {
    /// Create a body with the given content
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

/// Card footer section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFooter {
    /// Action buttons
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Button>,
}

impl CardFooter {
    /// Create a footer with the given actions
    pub fn new(actions: Vec<Button>) -> Self {
        Self { actions }
    }
}

/// Card container composed of optional sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Header section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    /// Body section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<CardBody>,
    /// Footer section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<CardFooter>,
    /// Extra classes appended after the computed ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl Card {
    /// Create an empty card
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header section
    pub fn header(mut self, header: CardHeader) -> Self {
        self.header = Some(header);
        self
    }

    /// Set the body section
    pub fn body(mut self, body: CardBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the footer section
    pub fn footer(mut self, footer: CardFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Append extra classes
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Computed class string
    pub fn classes(&self) -> String {
        ClassList::new().add("card").add_opt(self.class.clone()).merge()
    }
}

// ====== Avatar ======

/// Avatar with an image and initials fallback
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    /// Display name, used for the initials fallback
    pub name: String,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl Avatar {
    /// Create an avatar for the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), src: None }
    }

    /// Set the image URL
    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Initials shown when no image is available
    ///
    /// The first grapheme of each of the first two words, uppercased.
    /// Grapheme-aware so combined characters and emoji stay intact.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.graphemes(true).next())
            .flat_map(|g| g.to_uppercase().chars().collect::<Vec<_>>())
            .collect()
    }
}

// ====== Image ======

/// Loading state of an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageState {
    /// The source has not finished loading
    #[default]
    Loading,
    /// The source loaded
    Loaded,
    /// The source failed to load
    Error,
}

/// Image with a fallback source on load failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Primary source URL
    pub src: String,
    /// Alternative text
    #[serde(default)]
    pub alt: String,
    /// Source used when the primary fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_src: Option<String>,
    /// Current load state
    #[serde(default)]
    pub state: ImageState,
}

impl Image {
    /// Create an image for the given source
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into(), ..Self::default() }
    }

    /// Set the alternative text
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    /// Set the fallback source
    pub fn fallback_src(mut self, src: impl Into<String>) -> Self {
        self.fallback_src = Some(src.into());
        self
    }

    /// Mark the primary source as loaded
    pub fn on_load(&mut self) {
        self.state = ImageState::Loaded;
    }

    /// Mark the primary source as failed
    pub fn on_error(&mut self) {
        self.state = ImageState::Error;
    }

    /// The source to render: the fallback after a load failure
    pub fn effective_src(&self) -> &str {
        match (&self.state, &self.fallback_src) {
            (ImageState::Error, Some(fallback)) => fallback,
            _ => &self.src,
        }
    }

    /// Computed class string
    pub fn classes(&self) -> String {
        ClassList::new()
            .add("image")
            .add_if("image-loading", self.state == ImageState::Loading)
            .add_if("image-error", self.state == ImageState::Error)
            .merge()
    }
}

// ====== LoadingSpinner ======

/// Indeterminate loading indicator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingSpinner {
    /// Size token, e.g. "sm" or "lg"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Accessible label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LoadingSpinner {
    /// Create a spinner with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size token
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the accessible label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Computed class string
    pub fn classes(&self) -> String {
        ClassList::new()
            .add("spinner")
            .add_opt(self.size.as_ref().map(|s| format!("spinner-{s}")))
            .merge()
    }
}
