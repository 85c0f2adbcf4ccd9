//! Edit In Place Component
//!
//! Text input that replaces a label while it is being edited. Enter or
//! losing focus commits; the commit runs at most once per session.

use std::cell::Cell;
use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;

#[component]
pub fn EditInPlace(
    #[prop(into)] initial: String,
    #[prop(into)] class: String,
    #[prop(into)] on_commit: Callback<String>,
) -> impl IntoView {
    let input_ref = NodeRef::<html::Input>::new();
    let committed = Rc::new(Cell::new(false));

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let commit = move || {
        if committed.replace(true) {
            return;
        }
        let value = input_ref.get_untracked().map(|input| input.value()).unwrap_or_default();
        on_commit.run(value);
    };
    let commit_on_enter = commit.clone();

    view! {
        <input
            type="text"
            class=class
            value=initial
            node_ref=input_ref
            on:keydown=move |ev| {
                if ev.key() == "Enter" {
                    commit_on_enter();
                }
            }
            on:blur=move |_| commit()
        />
    }
}
