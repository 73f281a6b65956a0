//! Declarative settings-form model for host configuration UIs.

use serde::Serialize;

use crate::fields::FieldSet;
use crate::layout::{LayoutCatalog, LayoutDefinition};
use crate::options::RowOptions;

/// One select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    pub name: String,
    pub label: String,
    /// `(value, label)` choices.
    pub options: Vec<(String, String)>,
    pub default: String,
    /// Extra leading choice standing for "no explicit value".
    pub empty_option: Option<String>,
}

/// Form model for the row-layout configuration surface: a layout select,
/// a default-region select, and one region select per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsForm {
    pub layout: SelectField,
    pub default_region: SelectField,
    pub assigned_regions: Vec<SelectField>,
}

/// Build the settings form for the given catalog, fields, and options.
///
/// An unresolvable configured layout id is absorbed here by substituting
/// the first available definition, so a form can still be displayed. This
/// fallback exists only on the settings surface; rendering never
/// substitutes a layout. Returns `None` when the catalog is empty.
pub fn options_form(
    catalog: &LayoutCatalog,
    fields: &FieldSet,
    options: &RowOptions,
) -> Option<SettingsForm> {
    let definition = match catalog.get(&options.layout) {
        Ok(definition) => definition,
        Err(_) => catalog.first()?,
    };

    let region_options = region_choices(definition);

    let layout = SelectField {
        name: "layout".to_string(),
        label: "Row layout".to_string(),
        options: catalog.layout_options(),
        default: definition.id.clone(),
        empty_option: None,
    };

    let default_region = SelectField {
        name: "default_region".to_string(),
        label: "Default region".to_string(),
        options: region_options.clone(),
        default: options.default_region.clone(),
        empty_option: None,
    };

    let assigned_regions = fields
        .iter()
        .map(|(id, definition)| SelectField {
            name: id.clone(),
            label: definition.label.clone(),
            options: region_options.clone(),
            default: options.assigned_region(id).unwrap_or("").to_string(),
            empty_option: Some("Default region".to_string()),
        })
        .collect();

    Some(SettingsForm {
        layout,
        default_region,
        assigned_regions,
    })
}

fn region_choices(definition: &LayoutDefinition) -> Vec<(String, String)> {
    definition
        .regions()
        .map(|region| (region.name.clone(), region.label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldDefinition;
    use crate::layout::LayoutDefinition;

    fn catalog() -> LayoutCatalog {
        let mut catalog = LayoutCatalog::new();
        catalog
            .register(
                LayoutDefinition::new("two_col", "Two columns")
                    .with_region("main", "Main")
                    .with_region("sidebar", "Sidebar"),
            )
            .unwrap();
        catalog
            .register(LayoutDefinition::new("stack", "Stacked").with_region("top", "Top"))
            .unwrap();
        catalog
    }

    fn fields() -> FieldSet {
        let mut fields = FieldSet::new();
        fields.insert("title", FieldDefinition::new("Title"));
        fields.insert("body", FieldDefinition::new("Body"));
        fields
    }

    #[test]
    fn form_reflects_selected_layout() {
        let options = RowOptions::new("stack", "top");
        let form = options_form(&catalog(), &fields(), &options).unwrap();

        assert_eq!(form.layout.default, "stack");
        assert_eq!(form.default_region.options, vec![("top".to_string(), "Top".to_string())]);
        assert_eq!(form.assigned_regions.len(), 2);
        assert_eq!(form.assigned_regions[0].label, "Title");
        assert_eq!(
            form.assigned_regions[0].empty_option.as_deref(),
            Some("Default region")
        );
    }

    #[test]
    fn unknown_layout_falls_back_to_first_definition() {
        let options = RowOptions::new("deleted_layout", "main");
        let form = options_form(&catalog(), &fields(), &options).unwrap();
        assert_eq!(form.layout.default, "two_col");
    }

    #[test]
    fn empty_catalog_builds_no_form() {
        let options = RowOptions::default();
        assert!(options_form(&LayoutCatalog::new(), &fields(), &options).is_none());
    }

    #[test]
    fn per_field_defaults_follow_assignments() {
        let options = RowOptions::new("two_col", "main").assign("body", "sidebar");
        let form = options_form(&catalog(), &fields(), &options).unwrap();
        assert_eq!(form.assigned_regions[0].default, "");
        assert_eq!(form.assigned_regions[1].default, "sidebar");
    }
}
