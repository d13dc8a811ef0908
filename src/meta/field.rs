use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a doctype field
///
/// Known types get their own variant; anything else is kept verbatim so it
/// can still be lowercased into a widget kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Data,
    Check,
    Int,
    Float,
    Currency,
    Percent,
    Link,
    DynamicLink,
    Select,
    SmallText,
    Text,
    LongText,
    TextEditor,
    Date,
    Datetime,
    Time,
    Duration,
    Rating,
    AttachImage,
    SectionBreak,
    ColumnBreak,
    TabBreak,
    Html,
    Table,
    TableMultiSelect,
    Button,
    Image,
    Fold,
    Heading,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Data => "Data",
            FieldType::Check => "Check",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::Currency => "Currency",
            FieldType::Percent => "Percent",
            FieldType::Link => "Link",
            FieldType::DynamicLink => "Dynamic Link",
            FieldType::Select => "Select",
            FieldType::SmallText => "Small Text",
            FieldType::Text => "Text",
            FieldType::LongText => "Long Text",
            FieldType::TextEditor => "Text Editor",
            FieldType::Date => "Date",
            FieldType::Datetime => "Datetime",
            FieldType::Time => "Time",
            FieldType::Duration => "Duration",
            FieldType::Rating => "Rating",
            FieldType::AttachImage => "Attach Image",
            FieldType::SectionBreak => "Section Break",
            FieldType::ColumnBreak => "Column Break",
            FieldType::TabBreak => "Tab Break",
            FieldType::Html => "HTML",
            FieldType::Table => "Table",
            FieldType::TableMultiSelect => "Table MultiSelect",
            FieldType::Button => "Button",
            FieldType::Image => "Image",
            FieldType::Fold => "Fold",
            FieldType::Heading => "Heading",
            FieldType::Other(name) => name,
        }
    }

    /// Section and column breaks only shape the form grid
    pub fn is_layout(&self) -> bool {
        matches!(self, FieldType::SectionBreak | FieldType::ColumnBreak)
    }

    /// Types that never hold a stored value
    pub fn is_no_value(&self) -> bool {
        matches!(
            self,
            FieldType::SectionBreak
                | FieldType::ColumnBreak
                | FieldType::TabBreak
                | FieldType::Html
                | FieldType::Table
                | FieldType::TableMultiSelect
                | FieldType::Button
                | FieldType::Image
                | FieldType::Fold
                | FieldType::Heading
        )
    }

    /// Primitive types a list view can filter on
    pub fn is_filterable(&self) -> bool {
        matches!(
            self,
            FieldType::Check
                | FieldType::Data
                | FieldType::Float
                | FieldType::Int
                | FieldType::Link
                | FieldType::LongText
                | FieldType::Select
                | FieldType::SmallText
                | FieldType::TextEditor
                | FieldType::Text
        )
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Data" => FieldType::Data,
            "Check" => FieldType::Check,
            "Int" => FieldType::Int,
            "Float" => FieldType::Float,
            "Currency" => FieldType::Currency,
            "Percent" => FieldType::Percent,
            "Link" => FieldType::Link,
            "Dynamic Link" => FieldType::DynamicLink,
            "Select" => FieldType::Select,
            "Small Text" => FieldType::SmallText,
            "Text" => FieldType::Text,
            "Long Text" => FieldType::LongText,
            "Text Editor" => FieldType::TextEditor,
            "Date" => FieldType::Date,
            "Datetime" => FieldType::Datetime,
            "Time" => FieldType::Time,
            "Duration" => FieldType::Duration,
            "Rating" => FieldType::Rating,
            "Attach Image" => FieldType::AttachImage,
            "Section Break" => FieldType::SectionBreak,
            "Column Break" => FieldType::ColumnBreak,
            "Tab Break" => FieldType::TabBreak,
            "HTML" => FieldType::Html,
            "Table" => FieldType::Table,
            "Table MultiSelect" => FieldType::TableMultiSelect,
            "Button" => FieldType::Button,
            "Image" => FieldType::Image,
            "Fold" => FieldType::Fold,
            "Heading" => FieldType::Heading,
            _ => FieldType::Other(value),
        }
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        FieldType::from(value.to_string())
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a doctype as declared in schema metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub fieldname: String,
    #[serde(default)]
    pub label: Option<String>,
    pub fieldtype: FieldType,
    #[serde(default)]
    pub options: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub reqd: bool,
    #[serde(default)]
    pub read_only: bool,
}

impl FieldDescriptor {
    pub fn new(fieldname: impl Into<String>, fieldtype: impl Into<FieldType>) -> Self {
        Self {
            fieldname: fieldname.into(),
            label: None,
            fieldtype: fieldtype.into(),
            options: None,
            hidden: false,
            reqd: false,
            read_only: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn reqd(mut self, reqd: bool) -> Self {
        self.reqd = reqd;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }
}
