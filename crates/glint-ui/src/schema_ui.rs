//! Controls generated from the engine's options schema.
//!
//! The native side pushes the `schemars` schema of its `Options` struct and
//! the current values as JSON. Each top-level property becomes a folder and
//! each leaf field a slider, checkbox or dropdown. Edits go straight back
//! over the bridge as `set_option` messages.

use dioxus::prelude::*;
use serde_json::Value;

use crate::bridge;

/// Folders expanded when the panel first appears.
const OPEN_SECTIONS: &[&str] = &["camera", "mini_sphere"];

/// `snake_case` to `Title Case`.
fn display_name(s: &str) -> String {
    s.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |c| {
                c.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Follow a local `$ref` (`#/$defs/Name`) against the root schema.
fn resolve_ref<'a>(schema: &'a Value, root: &'a Value) -> &'a Value {
    schema
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| root.pointer(r.trim_start_matches('#')))
        .unwrap_or(schema)
}

/// Title from the schema, or the prettified key.
fn title_of(schema: &Value, key: &str) -> String {
    schema
        .get("title")
        .and_then(Value::as_str)
        .map_or_else(|| display_name(key), str::to_owned)
}

/// Enum variant names from either `enum` or `oneOf`/`const` shapes.
fn enum_variants(schema: &Value) -> Vec<String> {
    if let Some(arr) = schema.get("enum").and_then(Value::as_array) {
        return arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect();
    }
    schema
        .get("oneOf")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| {
                    v.get("const")
                        .or_else(|| v.pointer("/enum/0"))
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Only this leaf subscribes to stats, so FPS ticks don't re-render
/// the rest of the panel.
#[component]
fn FpsLabel(stats_sig: Signal<Option<Value>>) -> Element {
    let fps_text = stats_sig
        .read()
        .as_ref()
        .and_then(|s| s.get("fps"))
        .and_then(Value::as_f64)
        .map_or_else(|| "--".to_owned(), |f| format!("{f:.0}"));

    rsx! {
        div { class: "field-row",
            label { class: "field-label", "FPS" }
            span {}
            span { class: "fps-value field-value", "{fps_text}" }
        }
    }
}

/// All option folders, in schema order.
#[component]
pub fn SchemaPanel(
    schema: Value,
    options: Value,
    stats_sig: Signal<Option<Value>>,
) -> Element {
    let Some(props) = schema.pointer("/properties").and_then(Value::as_object)
    else {
        return rsx! { p { "No schema loaded" } };
    };

    rsx! {
        for (key, section) in props.iter() {
            {render_section(
                key,
                resolve_ref(section, &schema),
                options.get(key),
                &schema,
                (key == "debug").then_some(stats_sig),
            )}
        }
    }
}

fn render_section(
    key: &str,
    schema: &Value,
    current: Option<&Value>,
    root: &Value,
    stats_sig: Option<Signal<Option<Value>>>,
) -> Element {
    let title = title_of(schema, key);
    let open = OPEN_SECTIONS.contains(&key);
    let fields = schema
        .pointer("/properties")
        .or_else(|| schema.pointer("/allOf/0/properties"))
        .and_then(Value::as_object);

    rsx! {
        details { open,
            summary { class: "section-header", "{title}" }
            div { class: "section-body",
                if let Some(sig) = stats_sig {
                    FpsLabel { stats_sig: sig }
                }
                if let Some(fields) = fields {
                    for (field, field_schema) in fields.iter() {
                        {render_field(
                            key,
                            field,
                            field_schema,
                            current.and_then(|c| c.get(field)),
                            root,
                        )}
                    }
                }
            }
        }
    }
}

fn render_field(
    section: &str,
    field: &str,
    raw_schema: &Value,
    current: Option<&Value>,
    root: &Value,
) -> Element {
    let schema = resolve_ref(raw_schema, root);
    let label = raw_schema
        .get("title")
        .map_or_else(|| title_of(schema, field), |_| title_of(raw_schema, field));
    let variants = enum_variants(schema);

    let control = match schema.get("type").and_then(Value::as_str) {
        Some("number" | "integer") => {
            render_number(section, field, schema, current)
        }
        Some("boolean") => render_bool(section, field, current),
        _ if !variants.is_empty() => {
            render_enum(section, field, variants, current)
        }
        Some("string") => render_text(section, field, current),
        _ => rsx! {
            span { class: "field-label", "(unsupported)" }
            span {}
        },
    };

    rsx! {
        div { class: "field-row",
            label { class: "field-label", "{label}" }
            {control}
        }
    }
}

/// Slider bounded by the schema range, stepping by its `step` extension.
/// Unbounded fields fall back to a number box.
fn render_number(
    section: &str,
    field: &str,
    schema: &Value,
    current: Option<&Value>,
) -> Element {
    let value = current.and_then(Value::as_f64).unwrap_or(0.0);
    let min = schema.get("minimum").and_then(Value::as_f64);
    let max = schema.get("maximum").and_then(Value::as_f64);
    let is_int = schema.get("type").and_then(Value::as_str) == Some("integer");
    let step = schema
        .get("step")
        .and_then(Value::as_f64)
        .unwrap_or(if is_int { 1.0 } else { 0.01 });
    let kind = if min.is_some() && max.is_some() {
        "range"
    } else {
        "number"
    };
    let readout = if is_int {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    };

    let section = section.to_owned();
    let field = field.to_owned();

    rsx! {
        input {
            r#type: kind,
            class: if kind == "number" { "text-input" } else { "" },
            value: "{value}",
            step: "{step}",
            min: min.map(|v| v.to_string()).unwrap_or_default(),
            max: max.map(|v| v.to_string()).unwrap_or_default(),
            oninput: move |evt: Event<FormData>| {
                let Ok(v) = evt.value().parse::<f64>() else {
                    return;
                };
                let val = if is_int {
                    Value::from(v.round() as i64)
                } else {
                    Value::from(v)
                };
                bridge::send_set_option(&section, &field, &val);
            },
        }
        span { class: "field-value", "{readout}" }
    }
}

fn render_bool(
    section: &str,
    field: &str,
    current: Option<&Value>,
) -> Element {
    let checked = current.and_then(Value::as_bool).unwrap_or(false);
    let section = section.to_owned();
    let field = field.to_owned();

    rsx! {
        input {
            r#type: "checkbox",
            checked,
            onchange: move |evt: Event<FormData>| {
                let val = Value::Bool(evt.checked());
                bridge::send_set_option(&section, &field, &val);
            },
        }
        span {}
    }
}

fn render_enum(
    section: &str,
    field: &str,
    variants: Vec<String>,
    current: Option<&Value>,
) -> Element {
    let selected = current.and_then(Value::as_str).unwrap_or("").to_owned();
    let section = section.to_owned();
    let field = field.to_owned();

    rsx! {
        select {
            onchange: move |evt: Event<FormData>| {
                bridge::send_set_option(&section, &field, &Value::String(evt.value()));
            },
            for variant in variants {
                option {
                    selected: variant == selected,
                    value: "{variant}",
                    {display_name(&variant)}
                }
            }
        }
        span {}
    }
}

fn render_text(
    section: &str,
    field: &str,
    current: Option<&Value>,
) -> Element {
    let text = current.and_then(Value::as_str).unwrap_or("").to_owned();
    let section = section.to_owned();
    let field = field.to_owned();

    rsx! {
        input {
            r#type: "text",
            class: "text-input",
            value: "{text}",
            onchange: move |evt: Event<FormData>| {
                bridge::send_set_option(&section, &field, &Value::String(evt.value()));
            },
        }
        span {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_name_titles_words() {
        assert_eq!(display_name("mini_sphere"), "Mini Sphere");
        assert_eq!(display_name("fov"), "Fov");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn resolve_ref_follows_defs() {
        let root = json!({
            "$defs": { "Mode": { "enum": ["orbit", "trackball"] } }
        });
        let field = json!({ "$ref": "#/$defs/Mode" });
        let resolved = resolve_ref(&field, &root);
        assert_eq!(enum_variants(resolved), vec!["orbit", "trackball"]);
    }

    #[test]
    fn enum_variants_reads_one_of() {
        let schema = json!({
            "oneOf": [{ "const": "orbit" }, { "enum": ["trackball"] }]
        });
        assert_eq!(enum_variants(&schema), vec!["orbit", "trackball"]);
    }
}
