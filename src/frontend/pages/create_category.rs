use crate::{
    common::category::CreateCategoryParams,
    frontend::utils::resources::{client, session},
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

#[component]
pub fn CreateCategory() -> impl IntoView {
    let client = client();
    let session = session();
    let navigate = use_navigate();
    let name = signal(String::new());
    let description = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let create_action = Action::new(move |params: &CreateCategoryParams| {
        let params = params.clone();
        let client = client.clone();
        let user = session.user_untracked();
        async move { client.create_category(&params, user.as_ref()).await }
    });
    Effect::new(move |_| match create_action.value().get() {
        Some(Ok(())) => navigate("/categories", Default::default()),
        Some(Err(e)) => set_error.set(Some(e.message())),
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        create_action.dispatch(CreateCategoryParams {
            name: name.0.get_untracked(),
            description: description.0.get_untracked(),
        });
    };

    view! {
        <Title text="New Category" />
        <form class="mx-auto space-y-4 max-w-2xl" on:submit=on_submit>
            <h1 class="my-8 font-serif text-5xl font-bold text-center text-primary">
                "New Category"
            </h1>
            <label class="block font-semibold" for="name">
                "Name"
            </label>
            <input id="name" class="w-full input input-primary" type="text" required bind:value=name />
            <label class="block font-semibold" for="description">
                "Description"
            </label>
            <textarea
                id="description"
                class="w-full textarea textarea-primary"
                rows="3"
                bind:value=description
            ></textarea>
            {move || error.get().map(|e| view! { <p class="text-error">{e}</p> })}
            <button class="btn btn-primary" type="submit" disabled=move || create_action.pending().get()>
                {move || {
                    if create_action.pending().get() { "Creating..." } else { "Create Category" }
                }}
            </button>
        </form>
    }
}
