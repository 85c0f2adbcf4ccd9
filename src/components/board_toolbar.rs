//! Board Toolbar Component

use leptos::prelude::*;

use crate::context::use_board;

#[component]
pub fn BoardToolbar() -> impl IntoView {
    let ctx = use_board();
    let count = move || ctx.board.with(|board| board.len());

    view! {
        <div class="board-toolbar">
            <button id="btnCreateSticker" on:click=move |_| ctx.new_sticker()>"New sticker"</button>
            <button id="btnDeleteAllSticker" on:click=move |_| ctx.delete_all()>"Delete all"</button>
            <span class="sticker-count">{move || format!("{} sticker(s)", count())}</span>
        </div>
    }
}
