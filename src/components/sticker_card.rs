//! Sticker Card Component
//!
//! One sticker: a draggable card with its title, actions and the item list
//! region that item drags drop into. The list renders the board's list
//! surface, placeholder included.

use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, PointerPress};
use sticker_board::{EditTarget, Node, StickerId};

use crate::components::{EditInPlace, StickerItemRow};
use crate::context::use_board;
use crate::probe::PLACEHOLDER_ELEMENT_ID;
use crate::ui_state::UiStateStoreFields;

#[component]
pub fn StickerCard(id: StickerId) -> impl IntoView {
    let ctx = use_board();
    let card_ref = NodeRef::<html::Div>::new();

    let style = move || {
        let dragged = ctx.ui.card_drag().with(|drag| {
            drag.as_ref()
                .filter(|drag| drag.sticker() == id)
                .map(|drag| drag.position())
        });
        ctx.board.with(|board| {
            board.sticker(id).map(|sticker| {
                let position = dragged.unwrap_or(sticker.position);
                format!(
                    "z-index: {}; background-color: {}; top: {}px; left: {}px;",
                    sticker.z_index, sticker.background_color, position.top, position.left,
                )
            })
        })
    };
    let title = move || {
        ctx.board
            .with(|board| board.sticker(id).map(|sticker| sticker.title.clone()))
            .unwrap_or_default()
    };
    let is_editing_title = move || ctx.ui.editing().with(|editing| editing == &Some(EditTarget::Title(id)));

    let on_mousedown = make_on_mousedown(
        Callback::new(move |press: PointerPress| {
            if let Some(card) = card_ref.get_untracked() {
                ctx.press_card(id, press, &card);
            }
        }),
        false,
    );

    let nodes = move || ctx.board.with(|board| board.surface().nodes(id).to_vec());
    let placeholder_style = move || format!("height: {}px;", ctx.ui.placeholder_height().get());

    view! {
        <div
            class="sticker draggable"
            style=style
            node_ref=card_ref
            on:mousedown=on_mousedown
            on:dragstart=|ev| ev.prevent_default()
        >
            <Show
                when=is_editing_title
                fallback=move || view! {
                    <div class="sticker-title" data-drag-handle="title">{title}</div>
                }
            >
                <EditInPlace
                    initial=title()
                    class="input-title"
                    on_commit=Callback::new(move |value: String| ctx.commit_edit(EditTarget::Title(id), value))
                />
            </Show>
            <button data-action="add-item" on:click=move |_| ctx.add_item(id)>"Add item"</button>
            <button data-action="delete-sticker" on:click=move |_| ctx.delete_sticker(id)>"Delete sticker"</button>
            <ul class="item-container droppable" data-sticker-id=id.to_string()>
                <For
                    each=nodes
                    key=|node| node.clone()
                    children=move |node| match node {
                        Node::Item(item) => view! { <StickerItemRow item=item /> }.into_any(),
                        Node::Placeholder => view! {
                            <li id=PLACEHOLDER_ELEMENT_ID class="placeholder" style=placeholder_style></li>
                        }.into_any(),
                    }
                />
            </ul>
        </div>
    }
}
