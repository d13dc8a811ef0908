use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::classifier::FormField;
use crate::meta::{FieldDescriptor, FieldType};

/// A tab of the record form and the inputs it holds
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: String,
    pub label: String,
    pub opened: bool,
    pub fields: Vec<FormField>,
}

/// Form layout for a doctype: tab sections plus every value field by name
#[derive(Debug, Clone, Serialize)]
pub struct FormLayout {
    pub sections: Vec<Section>,
    pub fields_meta: FieldsMeta,
}

/// Fieldname → descriptor, kept in declaration order and serialized as a JSON object
#[derive(Debug, Clone, Default)]
pub struct FieldsMeta(Vec<FieldDescriptor>);

impl FieldsMeta {
    /// A repeated fieldname replaces the earlier descriptor in its original position
    pub fn insert(&mut self, field: FieldDescriptor) {
        match self.0.iter_mut().find(|f| f.fieldname == field.fieldname) {
            Some(existing) => *existing = field,
            None => self.0.push(field),
        }
    }

    pub fn get(&self, fieldname: &str) -> Option<&FieldDescriptor> {
        self.0.iter().find(|f| f.fieldname == fieldname)
    }

    pub fn contains_key(&self, fieldname: &str) -> bool {
        self.get(fieldname).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.fieldname.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldsMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in &self.0 {
            map.serialize_entry(&field.fieldname, field)?;
        }
        map.end()
    }
}

/// Group a doctype's fields into tab sections.
///
/// A read-only tab break hides its whole tab: nothing is emitted for it and
/// the fields up to the next tab break are dropped from all sections. Those
/// fields still appear in `fields_meta`. Fields ahead of the first tab break
/// belong to no section.
pub fn group_sections(fields: &[FieldDescriptor]) -> FormLayout {
    let fields: Vec<&FieldDescriptor> = fields.iter().filter(|f| !f.fieldtype.is_layout()).collect();

    let mut sections: Vec<Section> = Vec::new();
    let mut open: Option<usize> = None;
    let mut pending: Vec<FormField> = Vec::new();

    for field in &fields {
        if field.fieldtype != FieldType::TabBreak {
            pending.push(FormField::from_descriptor(field));
            continue;
        }

        if let Some(index) = open.take() {
            sections[index].fields = std::mem::take(&mut pending);
        }
        pending.clear();

        if field.read_only {
            continue;
        }

        let section = Section {
            name: field.fieldname.clone(),
            label: field.label_or_empty().to_string(),
            opened: true,
            fields: vec![],
        };
        // Same tab name twice replaces the earlier tab in place
        let index = match sections.iter().position(|s| s.name == section.name) {
            Some(existing) => {
                sections[existing] = section;
                existing
            }
            None => {
                sections.push(section);
                sections.len() - 1
            }
        };
        open = Some(index);
    }

    if let Some(index) = open {
        sections[index].fields = pending;
    }

    let mut fields_meta = FieldsMeta::default();
    for field in fields.into_iter().filter(|f| f.fieldtype != FieldType::TabBreak) {
        fields_meta.insert(field.clone());
    }

    FormLayout { sections, fields_meta }
}
