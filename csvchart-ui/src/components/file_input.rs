//! File Intake
//!
//! File picker and view selector. Only the first selected file is used.

use csvchart::{first_selected, Variant};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};

use crate::state::ViewerStatus;

/// CSV file picker; calls `on_file` with the first selected file
#[component]
pub fn FileInput(#[prop(into)] on_file: Callback<File>) -> impl IntoView {
    let on_change = move |ev: Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        let selected = input
            .files()
            .and_then(|files| first_selected((0..files.length()).filter_map(|i| files.item(i))));

        if let Some(file) = selected {
            on_file.call(file);
        }
    };

    view! {
        <label class="file-input">
            <span>"CSV file"</span>
            <input type="file" accept=".csv,text/csv" on:change=on_change />
        </label>
    }
}

/// Chooses between the decoded chart view and the verbatim table view
#[component]
pub fn VariantSelect() -> impl IntoView {
    let status = use_context::<ViewerStatus>().expect("ViewerStatus not found");

    view! {
        <select
            class="variant-select"
            on:change=move |ev| status.variant.set(parse_variant(&event_target_value(&ev)))
        >
            <option value="extended" selected=true>"Chart"</option>
            <option value="basic">"Table only"</option>
        </select>
    }
}

fn parse_variant(value: &str) -> Variant {
    match value {
        "basic" => Variant::Basic,
        _ => Variant::Extended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        assert_eq!(parse_variant("basic"), Variant::Basic);
        assert_eq!(parse_variant("extended"), Variant::Extended);
        assert_eq!(parse_variant(""), Variant::Extended);
    }
}
