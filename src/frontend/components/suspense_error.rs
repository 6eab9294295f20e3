use leptos::prelude::*;

/// Loading text while remote reads are pending. A page which returns
/// `Err(FrontendError)` from inside gets the error message instead of its content.
#[component]
pub fn SuspenseError<Chil>(children: TypedChildren<Chil>) -> impl IntoView
where
    Chil: IntoView + Send + 'static,
{
    view! {
        <Suspense fallback=|| view! { <p class="my-4 text-center">"Loading..."</p> }>
            <ErrorBoundary
                fallback=|errors| {
                    view! {
                        <div class="grid place-items-center my-8">
                            {move || {
                                errors
                                    .get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <div class="alert alert-error w-fit">{e.to_string()}</div> })
                                    .collect::<Vec<_>>()
                            }}
                        </div>
                    }
                }
                children
            ></ErrorBoundary>
        </Suspense>
    }
}
