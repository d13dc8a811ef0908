use serde::{Serialize, Serializer};

use crate::meta::{FieldDescriptor, FieldType};

pub const READ_ONLY_TOOLTIP: &str = "This field is read only and cannot be edited.";

/// Input widget the form renderer should use for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    Phone,
    Email,
    Checkbox,
    Number,
    Textarea,
    ReadOnly,
    /// Declared field type, lowercased
    Declared(String),
}

impl WidgetKind {
    pub fn as_str(&self) -> &str {
        match self {
            WidgetKind::Phone => "phone",
            WidgetKind::Email => "email",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Number => "number",
            WidgetKind::Textarea => "textarea",
            WidgetKind::ReadOnly => "read_only",
            WidgetKind::Declared(kind) => kind,
        }
    }
}

impl Serialize for WidgetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classify a field into its widget kind.
///
/// Read-only wins over the Phone/Email hints on Data fields and over the
/// declared type, but Check, Int and the text types keep their widgets.
pub fn widget_kind(field: &FieldDescriptor) -> WidgetKind {
    match field.fieldtype {
        FieldType::Data if !field.read_only => match field.options.as_deref() {
            Some("Phone") => return WidgetKind::Phone,
            Some("Email") => return WidgetKind::Email,
            _ => {}
        },
        FieldType::Check => return WidgetKind::Checkbox,
        FieldType::Int => return WidgetKind::Number,
        FieldType::SmallText | FieldType::Text | FieldType::LongText => return WidgetKind::Textarea,
        _ => {}
    }

    if field.read_only {
        WidgetKind::ReadOnly
    } else {
        WidgetKind::Declared(field.fieldtype.as_str().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Rendering metadata for one form input
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub name: String,
    pub hidden: bool,
    pub reqd: bool,
    pub read_only: bool,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl FormField {
    pub fn from_descriptor(field: &FieldDescriptor) -> Self {
        let label = field.label_or_empty().to_string();
        let mut form_field = Self {
            placeholder: format!("Add {}...", label),
            kind: widget_kind(field),
            name: field.fieldname.clone(),
            hidden: field.hidden,
            reqd: field.reqd,
            read_only: field.read_only,
            doctype: None,
            options: None,
            tooltip: None,
            label,
        };

        match field.fieldtype {
            FieldType::Link => {
                form_field.placeholder = format!("Select {}...", form_field.label);
                form_field.doctype = field.options.clone();
            }
            FieldType::Select => {
                form_field.options = Some(select_options(field.options.as_deref()));
            }
            _ => {}
        }

        if field.read_only {
            form_field.tooltip = Some(READ_ONLY_TOOLTIP.to_string());
        }

        form_field
    }
}

/// Expand newline-separated select choices; blank lines are kept as empty choices
pub fn select_options(options: Option<&str>) -> Vec<SelectOption> {
    match options {
        Some(text) => text
            .split('\n')
            .map(|option| SelectOption { label: option.to_string(), value: option.to_string() })
            .collect(),
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_hints_map_to_phone_and_email() {
        let phone = FieldDescriptor::new("mobile_no", "Data").options("Phone");
        let email = FieldDescriptor::new("email", "Data").options("Email");
        assert_eq!(widget_kind(&phone), WidgetKind::Phone);
        assert_eq!(widget_kind(&email), WidgetKind::Email);
    }

    #[test]
    fn read_only_overrides_email_hint() {
        let email = FieldDescriptor::new("email", "Data").options("Email").read_only(true);
        assert_eq!(widget_kind(&email).as_str(), "read_only");
    }

    #[test]
    fn type_driven_widgets() {
        assert_eq!(widget_kind(&FieldDescriptor::new("converted", "Check")), WidgetKind::Checkbox);
        assert_eq!(widget_kind(&FieldDescriptor::new("no_of_employees", "Int")), WidgetKind::Number);
        for ty in ["Small Text", "Text", "Long Text"] {
            assert_eq!(widget_kind(&FieldDescriptor::new("notes", ty)), WidgetKind::Textarea);
        }
        assert_eq!(widget_kind(&FieldDescriptor::new("converted", "Check").read_only(true)), WidgetKind::Checkbox);
    }

    #[test]
    fn falls_back_to_lowercased_type_or_read_only() {
        assert_eq!(widget_kind(&FieldDescriptor::new("owner", "Link")).as_str(), "link");
        assert_eq!(widget_kind(&FieldDescriptor::new("website", "Data")).as_str(), "data");
        assert_eq!(widget_kind(&FieldDescriptor::new("annual_revenue", "Currency").read_only(true)), WidgetKind::ReadOnly);
        assert_eq!(widget_kind(&FieldDescriptor::new("geo", "Geolocation")).as_str(), "geolocation");
    }

    #[test]
    fn classification_is_stable_across_calls() {
        let field = FieldDescriptor::new("status", "Select").options("Open\nClosed");
        let first = widget_kind(&field);
        let _ = widget_kind(&FieldDescriptor::new("x", "Int"));
        assert_eq!(widget_kind(&field), first);
    }

    #[test]
    fn link_fields_get_select_placeholder_and_doctype() {
        let field = FieldDescriptor::new("organization", "Link")
            .label("Organization")
            .options("CRM Organization");
        let obj = FormField::from_descriptor(&field);
        assert_eq!(obj.placeholder, "Select Organization...");
        assert_eq!(obj.doctype.as_deref(), Some("CRM Organization"));
        assert!(obj.tooltip.is_none());
    }

    #[test]
    fn select_fields_expand_options() {
        let field = FieldDescriptor::new("status", "Select").label("Status").options("\nOpen\nLost");
        let obj = FormField::from_descriptor(&field);
        assert_eq!(obj.placeholder, "Add Status...");
        let options = obj.options.unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "");
        assert_eq!(options[2], SelectOption { label: "Lost".into(), value: "Lost".into() });
    }

    #[test]
    fn read_only_fields_carry_tooltip() {
        let field = FieldDescriptor::new("lead_owner", "Data").label("Lead Owner").read_only(true);
        let value = serde_json::to_value(FormField::from_descriptor(&field)).unwrap();
        assert_eq!(value["type"], "read_only");
        assert_eq!(value["tooltip"], READ_ONLY_TOOLTIP);
        assert!(value.get("doctype").is_none());
    }
}
