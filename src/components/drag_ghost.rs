//! Drag Ghost Component
//!
//! Floating copy of the item being dragged. It never takes pointer events,
//! so hit testing sees what lies underneath.

use leptos::prelude::*;

use crate::context::use_board;
use crate::ui_state::UiStateStoreFields;

#[component]
pub fn DragGhost() -> impl IntoView {
    let ctx = use_board();
    let ghost = move || ctx.drag.with(|drag| drag.ghost().cloned());

    view! {
        {move || {
            ghost().map(|ghost| {
                let (width, height) = ctx.ui.ghost_size().get();
                let content = ctx
                    .board
                    .with(|board| board.item(&ghost.item).map(|item| item.content.clone()))
                    .unwrap_or_default();
                let style = format!(
                    "left: {}px; top: {}px; width: {}px; height: {}px;",
                    ghost.left, ghost.top, width, height,
                );
                view! {
                    <li class="item ghost" style=style>
                        <span>{content}</span>
                    </li>
                }
            })
        }}
    }
}
