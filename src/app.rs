//! Root page component.
//!
//! Renders the visible page region and the demo trigger. The overlay and the
//! dialog `<template>`s live in `index.html`, since template content must be
//! parsed as inert markup rather than built node by node.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

/// Page title shown in the browser tab.
pub const TITLE: &str = "Page Shell";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=TITLE/>

        <main id="app" class="page">
            <header class="page__header">
                <h1 class="page__title">{TITLE}</h1>
                <p class="page__lede">
                    "A minimal page with a modal dialog and a remembered background color."
                </p>
            </header>
            <section class="page__body">
                <button id="change-color" class="btn btn--primary" type="button">
                    "Change background color"
                </button>
            </section>
            <footer class="page__footer">"Press Esc or click outside a dialog to dismiss it."</footer>
        </main>
    }
}
