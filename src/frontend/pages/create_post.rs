use crate::{
    common::{newtypes::CategoryId, post::ImageUpload},
    frontend::{
        components::suspense_error::SuspenseError,
        utils::{
            errors::{FrontendError, FrontendResult},
            resources::{client, session},
        },
    },
};
use leptos::{
    ev::SubmitEvent,
    html::{Input, Textarea},
    prelude::*,
    task::spawn_local,
};
use leptos_meta::Title;
use leptos_use::{use_textarea_autosize, UseTextareaAutosizeReturn};
use log::info;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// Reads the first selected file into memory.
async fn selected_image(input: Option<HtmlInputElement>) -> FrontendResult<Option<ImageUpload>> {
    let Some(file) = input.and_then(|i| i.files()).and_then(|f| f.item(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| FrontendError::new(format!("Failed to read image: {e:?}")))?;
    Ok(Some(ImageUpload {
        file_name: file.name(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}

#[component]
pub fn CreatePost() -> impl IntoView {
    let client = client();
    let session = session();
    let title = signal(String::new());
    let category = signal(String::new());
    let textarea_ref = NodeRef::<Textarea>::new();
    let UseTextareaAutosizeReturn {
        content,
        set_content,
        trigger_resize: _,
    } = use_textarea_autosize(textarea_ref);
    let file_ref = NodeRef::<Input>::new();
    let (pending, set_pending) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (created, set_created) = signal(false);

    let categories = Resource::new(|| (), {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            async move { client.list_categories().await }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let client = client.clone();
        let user = session.user_untracked();
        let title_ = title.0.get_untracked();
        let content_ = content.get_untracked();
        let category_id = category.0.get_untracked().parse().ok().map(CategoryId);
        let input = file_ref.get_untracked();
        set_pending.set(true);
        // reading the file needs browser futures, which are not Send
        spawn_local(async move {
            let res = match selected_image(input).await {
                Ok(image) => {
                    client
                        .create_post(title_, content_, category_id, image, user.as_ref())
                        .await
                }
                Err(e) => Err(e),
            };
            set_pending.set(false);
            match res {
                Ok(()) => {
                    info!("Created post");
                    title.1.set(String::new());
                    set_content.set(String::new());
                    set_error.set(None);
                    set_created.set(true);
                }
                Err(e) => set_error.set(Some(e.message())),
            }
        });
    };

    view! {
        <Title text="Add Recipe" />
        <h1 class="my-8 font-serif text-5xl font-bold text-center text-primary">"Add Recipe"</h1>
        <Show
            when=move || session.is_logged_in()
            fallback=move || {
                view! {
                    <p class="text-center">
                        <a class="link" on:click=move |_| session.sign_in()>
                            "Sign in"
                        </a>
                        " to share a recipe."
                    </p>
                }
            }
        >
            <form class="mx-auto space-y-4 max-w-2xl" on:submit=on_submit.clone()>
                <label class="block font-semibold" for="title">
                    "Recipe name"
                </label>
                <input
                    id="title"
                    class="w-full input input-primary"
                    type="text"
                    required
                    bind:value=title
                    prop:disabled=move || pending.get()
                />
                <label class="block font-semibold" for="content">
                    "Recipe"
                </label>
                <textarea
                    id="content"
                    class="w-full resize-none textarea textarea-primary min-h-32"
                    required
                    prop:value=content
                    on:input=move |evt| set_content.set(event_target_value(&evt))
                    node_ref=textarea_ref
                ></textarea>
                <label class="block font-semibold" for="category">
                    "Category"
                </label>
                <SuspenseError>
                    {move || Suspend::new(async move {
                        let categories = categories.await?;
                        Ok::<_, FrontendError>(
                            view! {
                                <select id="category" class="w-full select select-primary" bind:value=category>
                                    <option value="">"None"</option>
                                    {categories
                                        .into_iter()
                                        .map(|c| view! { <option value=c.id.0>{c.name}</option> })
                                        .collect::<Vec<_>>()}
                                </select>
                            },
                        )
                    })}
                </SuspenseError>
                <label class="block font-semibold" for="image">
                    "Photo"
                </label>
                <input
                    id="image"
                    class="w-full file-input file-input-primary"
                    type="file"
                    accept="image/*"
                    required
                    node_ref=file_ref
                />
                {move || error.get().map(|e| view! { <p class="text-error">{e}</p> })}
                <Show when=move || created.get()>
                    <div class="alert alert-success">"Your recipe was added."</div>
                </Show>
                <button class="btn btn-primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Uploading..." } else { "Add Recipe" }}
                </button>
            </form>
        </Show>
    }
}
