use crate::forms::{FieldErrors, FieldSpec, FormFields, Input};
use maud::{html, Markup};

/// Label, input and any validation message for one form field.
pub fn form_field(spec: &FieldSpec, values: &FormFields, errors: &FieldErrors) -> Markup {
    let value = values.get(spec.name).map(String::as_str).unwrap_or("");
    let error = errors.get(spec.name);

    html! {
        div class=(if error.is_some() { "field field-error" } else { "field" }) {
            label for=(spec.name) { (spec.label) }
            @match spec.input {
                Input::Select(options) => {
                    select id=(spec.name) name=(spec.name) required[spec.required] {
                        @for (v, label) in options {
                            option value=(v) selected[*v == value] { (label) }
                        }
                    }
                }
                Input::Date => {
                    input type="date" id=(spec.name) name=(spec.name) value=(value) required[spec.required];
                }
                Input::Count => {
                    input type="number" min="0" step="1" id=(spec.name) name=(spec.name) value=(value) required[spec.required];
                }
                Input::Amount | Input::Text => {
                    input type="text" id=(spec.name) name=(spec.name) value=(value) required[spec.required];
                }
            }
            @if let Some(msg) = error {
                p class="field-message" data-field=(spec.name) { (msg) }
            }
        }
    }
}
