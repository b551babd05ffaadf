use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<h1>"Page not found"</h1>
			<a href="/">"Back to the concept map"</a>
		</div>
	}
}
