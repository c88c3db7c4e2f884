//! Wizard configuration: the object the operator builds and the preview renders.
//!
//! DESIGN
//! ======
//! Typed sections for theme, login gate, and recipient metadata. Page content
//! lives in `pages`, keyed by catalog id, as a tagged union per page type.
//! Only the greeting page has a known field set; every other page type keeps
//! an open JSON field map until its editor defines one.
//!
//! Page content is never removed when a page is switched off, so toggling it
//! back on restores earlier edits.
//!
//! Keys serialize in camelCase because the preview renderer reads this JSON
//! directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{self, PageDescriptor, PageKind};
use crate::error::WizardError;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#F5E6D3";
pub const DEFAULT_FONT_DISPLAY: &str = "Playfair Display, serif";
pub const DEFAULT_FONT_SANS: &str = "Poppins, sans-serif";
pub const DEFAULT_PARTICLES: &str = "hearts";
pub const DEFAULT_LOGIN_TITLE: &str = "Private Access";
pub const DEFAULT_LOGIN_INSTRUCTION: &str = "Enter our special date";
pub const DEFAULT_CUSTOMER_NAME: &str = "Recipient Name";
pub const DEFAULT_GREETING_TITLE: &str = "Happy Valentine's Day";
pub const DEFAULT_ENABLED_PAGES: [&str; 2] = ["page-1", "page-2"];

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub background_color: String,
    pub font_display: String,
    pub font_sans: String,
    /// Particle effect identifier, e.g. `"hearts"`.
    pub particles: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            font_display: DEFAULT_FONT_DISPLAY.to_owned(),
            font_sans: DEFAULT_FONT_SANS.to_owned(),
            particles: DEFAULT_PARTICLES.to_owned(),
        }
    }
}

/// Access-gate text for the produced gift page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSettings {
    pub password: String,
    pub title: String,
    pub instruction: String,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            password: String::new(),
            title: DEFAULT_LOGIN_TITLE.to_owned(),
            instruction: DEFAULT_LOGIN_INSTRUCTION.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Recipient display name.
    pub customer_name: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self { customer_name: DEFAULT_CUSTOMER_NAME.to_owned() }
    }
}

// =============================================================================
// PAGE CONTENT
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GreetingFields {
    /// Title as the editor and preview display it.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_GREETING_TITLE)
    }
}

/// Free-form field map for page types without a fixed schema yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenFields(pub BTreeMap<String, Value>);

/// Content of one page, tagged with the page's semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageContent {
    Greeting(GreetingFields),
    Music(OpenFields),
    Wrapped(OpenFields),
    Quiz(OpenFields),
    Gallery(OpenFields),
    Map(OpenFields),
    Letter(OpenFields),
    Lock(OpenFields),
    Infinity(OpenFields),
}

impl PageContent {
    /// Empty content for a page type. The login page has none: setup edits it.
    #[must_use]
    pub fn empty(kind: PageKind) -> Option<Self> {
        let content = match kind {
            PageKind::Login => return None,
            PageKind::Greeting => Self::Greeting(GreetingFields::default()),
            PageKind::Music => Self::Music(OpenFields::default()),
            PageKind::Wrapped => Self::Wrapped(OpenFields::default()),
            PageKind::Quiz => Self::Quiz(OpenFields::default()),
            PageKind::Gallery => Self::Gallery(OpenFields::default()),
            PageKind::Map => Self::Map(OpenFields::default()),
            PageKind::Letter => Self::Letter(OpenFields::default()),
            PageKind::Lock => Self::Lock(OpenFields::default()),
            PageKind::Infinity => Self::Infinity(OpenFields::default()),
        };
        Some(content)
    }

    #[must_use]
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Greeting(_) => PageKind::Greeting,
            Self::Music(_) => PageKind::Music,
            Self::Wrapped(_) => PageKind::Wrapped,
            Self::Quiz(_) => PageKind::Quiz,
            Self::Gallery(_) => PageKind::Gallery,
            Self::Map(_) => PageKind::Map,
            Self::Letter(_) => PageKind::Letter,
            Self::Lock(_) => PageKind::Lock,
            Self::Infinity(_) => PageKind::Infinity,
        }
    }

    /// Replace one field. Returns `false` when the page type has no such field.
    fn set(&mut self, name: &str, value: Value) -> bool {
        match self {
            Self::Greeting(g) => match name {
                "title" => g.title = Some(value_to_text(value)),
                "message" => g.message = Some(value_to_text(value)),
                _ => return false,
            },
            Self::Music(f)
            | Self::Wrapped(f)
            | Self::Quiz(f)
            | Self::Gallery(f)
            | Self::Map(f)
            | Self::Letter(f)
            | Self::Lock(f)
            | Self::Infinity(f) => {
                f.0.insert(name.to_owned(), value);
            }
        }
        true
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfiguration {
    pub theme: ThemeSettings,
    pub login: LoginSettings,
    pub metadata: Metadata,
    /// Enabled page ids in toggle order. Always a subset of the catalog.
    pub enabled_pages: Vec<String>,
    /// Page content keyed by catalog id. Entries outlive their page's toggle.
    #[serde(default)]
    pub pages: BTreeMap<String, PageContent>,
}

impl Default for WizardConfiguration {
    fn default() -> Self {
        Self {
            theme: ThemeSettings::default(),
            login: LoginSettings::default(),
            metadata: Metadata::default(),
            enabled_pages: DEFAULT_ENABLED_PAGES.iter().map(|id| (*id).to_owned()).collect(),
            pages: BTreeMap::new(),
        }
    }
}

/// Section addressed by a field edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Theme,
    Login,
    Metadata,
    Page(&'static PageDescriptor),
}

impl FieldCategory {
    /// Resolve a category name: a typed section, a page type (`"greeting"`),
    /// or a toggleable page id (`"page-2"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "theme" => return Some(Self::Theme),
            "login" => return Some(Self::Login),
            "metadata" => return Some(Self::Metadata),
            _ => {}
        }
        PageKind::from_section(raw)
            .and_then(catalog::find_by_kind)
            .or_else(|| catalog::find(raw).filter(|p| p.is_toggleable()))
            .map(Self::Page)
    }
}

impl WizardConfiguration {
    #[must_use]
    pub fn is_enabled(&self, page_id: &str) -> bool {
        self.enabled_pages.iter().any(|id| id == page_id)
    }

    /// Enabled pages in catalog order, regardless of toggle order.
    #[must_use]
    pub fn enabled_in_catalog_order(&self) -> Vec<&'static PageDescriptor> {
        catalog::PAGE_CATALOG
            .iter()
            .filter(|p| self.is_enabled(p.id))
            .collect()
    }

    #[must_use]
    pub fn page(&self, page_id: &str) -> Option<&PageContent> {
        self.pages.get(page_id)
    }

    /// Greeting content, if the greeting page has been edited.
    #[must_use]
    pub fn greeting(&self) -> Option<&GreetingFields> {
        let id = catalog::find_by_kind(PageKind::Greeting)?.id;
        match self.pages.get(id) {
            Some(PageContent::Greeting(g)) => Some(g),
            _ => None,
        }
    }

    /// Replace `category.field` with `value`; nothing else changes.
    ///
    /// String fields take strings verbatim; other scalars are stored as their
    /// JSON text and `null` as the empty string. Open page sections store the
    /// value as-is.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::UnknownField`] if the category or the field does
    /// not exist. The configuration is unchanged in that case.
    pub fn set_field(&mut self, category: &str, field: &str, value: Value) -> Result<(), WizardError> {
        let Some(section) = FieldCategory::parse(category) else {
            return Err(WizardError::unknown_field(category, field));
        };

        let slot = match section {
            FieldCategory::Theme => match field {
                "backgroundColor" => &mut self.theme.background_color,
                "fontDisplay" => &mut self.theme.font_display,
                "fontSans" => &mut self.theme.font_sans,
                "particles" => &mut self.theme.particles,
                _ => return Err(WizardError::unknown_field(category, field)),
            },
            FieldCategory::Login => match field {
                "password" => &mut self.login.password,
                "title" => &mut self.login.title,
                "instruction" => &mut self.login.instruction,
                _ => return Err(WizardError::unknown_field(category, field)),
            },
            FieldCategory::Metadata => match field {
                "customerName" => &mut self.metadata.customer_name,
                _ => return Err(WizardError::unknown_field(category, field)),
            },
            FieldCategory::Page(page) => return self.set_page_field(page, category, field, value),
        };
        *slot = value_to_text(value);
        Ok(())
    }

    fn set_page_field(
        &mut self,
        page: &'static PageDescriptor,
        category: &str,
        field: &str,
        value: Value,
    ) -> Result<(), WizardError> {
        if let Some(existing) = self.pages.get_mut(page.id) {
            return if existing.set(field, value) {
                Ok(())
            } else {
                Err(WizardError::unknown_field(category, field))
            };
        }

        // EDGE: build the section off to the side so a rejected field leaves no empty entry.
        let Some(mut content) = PageContent::empty(page.kind) else {
            return Err(WizardError::unknown_field(category, field));
        };
        if !content.set(field, value) {
            return Err(WizardError::unknown_field(category, field));
        }
        self.pages.insert(page.id.to_owned(), content);
        Ok(())
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
