//! Sticker Item Row Component
//!
//! An item inside a sticker's list. Pressing the row arms an item drag;
//! clicking the content opens it for editing unless a drop just ended.

use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, PointerPress};
use sticker_board::{EditTarget, ItemId};

use crate::components::EditInPlace;
use crate::context::use_board;
use crate::ui_state::UiStateStoreFields;

#[component]
pub fn StickerItemRow(item: ItemId) -> impl IntoView {
    let ctx = use_board();
    let row_ref = NodeRef::<html::Li>::new();
    let element_id = item.to_string();
    let item = StoredValue::new(item);

    let hidden = move || item.with_value(|item| ctx.board.with(|board| board.surface().is_hidden(item)));
    let content = move || {
        item.with_value(|item| ctx.board.with(|board| board.item(item).map(|entry| entry.content.clone())))
            .unwrap_or_default()
    };
    let is_editing = move || {
        item.with_value(|item| {
            ctx.ui
                .editing()
                .with(|editing| matches!(editing, Some(EditTarget::Content(target)) if target == item))
        })
    };

    // Isolated so the enclosing sticker does not start its own drag
    let on_mousedown = make_on_mousedown(
        Callback::new(move |press: PointerPress| {
            if let Some(row) = row_ref.get_untracked() {
                ctx.press_item(item.get_value(), press, &row);
            }
        }),
        true,
    );

    let on_content_click = move |_| {
        if ctx.click_guard.is_armed() {
            log::debug!("[DND] click after drop ignored");
            return;
        }
        ctx.begin_edit(EditTarget::Content(item.get_value()));
    };

    view! {
        <li
            id=element_id
            class=move || if hidden() { "item droppable hidden" } else { "item droppable" }
            node_ref=row_ref
            on:mousedown=on_mousedown
            on:dragstart=|ev| ev.prevent_default()
        >
            <Show
                when=is_editing
                fallback=move || view! {
                    <span class="item-content" on:click=on_content_click>{content}</span>
                }
            >
                <EditInPlace
                    initial=content()
                    class="input-content"
                    on_commit=Callback::new(move |value: String| {
                        ctx.commit_edit(EditTarget::Content(item.get_value()), value)
                    })
                />
            </Show>
            <button data-action="delete" on:click=move |_| ctx.delete_item(&item.get_value())>"Delete"</button>
        </li>
    }
}
